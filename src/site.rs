use crate::{
    config::SiteConfig,
    errors::GlossaryError,
    glossary::Glossary,
    linker::{Linker, anchor, escape, page_name},
};
use std::fs::{self, File};
use std::io::{BufWriter, prelude::*};
use std::path::{Path, PathBuf};

pub const INDEX_PAGE: &str = "index.html";

/// Summary of a finished build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SiteReport {
    /// Files written, the index included.
    pub pages: usize,
    /// Anchors emitted across all term pages.
    pub links: usize,
}

pub fn render_index<'a>(title: &str, terms: impl Iterator<Item = &'a str>) -> String {
    let title = escape(title);
    let items: Vec<String> = terms.map(|t| format!("<li>{}</li>", anchor(t))).collect();
    format!(
        r#"<html>
<head>
<title>{title}</title>
</head>
<body>
<h2>{title}</h2>
<hr size="1" width="100%" color="black">
<h1>Index</h1>
<ul>
{}
</ul>
</body>
</html>
"#,
        items.join("\n")
    )
}

/// `definition` is already HTML, as produced by the linker.
pub fn render_term_page(title: &str, term: &str, definition: &str) -> String {
    format!(
        r#"<html>
<head>
<title>{}</title>
</head>
<body>
<h2 style="color:red"><i>{}</i></h2>
<p>{definition}</p>
<hr size="0.5" width="100%" color="black">
<p>Return to <a href="{INDEX_PAGE}">index</a></p>
</body>
</html>
"#,
        escape(title),
        escape(term),
    )
}

/// Writes one page through its own handle, flushed and closed on return.
fn write_page(path: &Path, contents: &str) -> Result<(), GlossaryError> {
    let io_err = |source| GlossaryError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut f = BufWriter::new(File::create(path).map_err(io_err)?);
    f.write_all(contents.as_bytes()).map_err(io_err)?;
    f.flush().map_err(io_err)?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote page");
    Ok(())
}

pub struct Site<'g> {
    glossary: &'g Glossary,
    config: &'g SiteConfig,
}

impl<'g> Site<'g> {
    pub fn new(glossary: &'g Glossary, config: &'g SiteConfig) -> Self {
        Self { glossary, config }
    }

    fn prepare_dir(&self, out_dir: &Path) -> Result<(), GlossaryError> {
        if out_dir.is_dir() {
            return Ok(());
        }
        if !self.config.create_dir {
            return Err(GlossaryError::MissingOutputDir(out_dir.to_path_buf()));
        }
        tracing::info!(dir = %out_dir.display(), "creating output directory");
        fs::create_dir_all(out_dir).map_err(|source| GlossaryError::Io {
            path: out_dir.to_path_buf(),
            source,
        })
    }

    /// Writes one page per term, in term order, then the index.
    ///
    /// Stops at the first failing write; pages written before it stay as
    /// they are.
    pub fn render(&self, out_dir: &Path) -> Result<SiteReport, GlossaryError> {
        self.prepare_dir(out_dir)?;
        if self.glossary.is_empty() {
            tracing::warn!("glossary has no terms, only the index is written");
        }
        let linker =
            Linker::new(self.glossary, &self.config.separators).link_self(self.config.link_self);
        let mut report = SiteReport::default();
        for (term, linked) in linker.link_all() {
            let page = render_term_page(&self.config.title, term, &linked.html);
            let path: PathBuf = out_dir.join(page_name(term));
            write_page(&path, &page)?;
            report.pages += 1;
            report.links += linked.links;
        }
        let index = render_index(&self.config.title, self.glossary.terms());
        write_page(&out_dir.join(INDEX_PAGE), &index)?;
        report.pages += 1;
        tracing::info!(
            pages = report.pages,
            links = report.links,
            dir = %out_dir.display(),
            "site written"
        );
        Ok(report)
    }
}

/// Parses `source` and writes its site into `out_dir`.
pub fn generate(
    source: &str,
    out_dir: &Path,
    config: &SiteConfig,
) -> Result<SiteReport, GlossaryError> {
    let glossary = Glossary::parse(source, config.duplicates)?;
    Site::new(&glossary, config).render(out_dir)
}
