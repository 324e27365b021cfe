use crate::{glossary::DuplicatePolicy, tokenizer::SeparatorSet};

/// Settings for one site build.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Heading and page title of the generated pages.
    pub title: String,
    pub duplicates: DuplicatePolicy,
    /// Link a term's own name inside its definition.
    pub link_self: bool,
    /// Create the output directory when it is missing.
    pub create_dir: bool,
    pub separators: SeparatorSet,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Glossary".into(),
            duplicates: DuplicatePolicy::default(),
            link_self: true,
            create_dir: false,
            separators: SeparatorSet::default(),
        }
    }
}
