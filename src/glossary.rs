use crate::{
    errors::{GlossaryError, ParseError},
    parser::record,
    syntax::many0_blanks,
};
use nom::Finish;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::str::FromStr;

/// Line breaks in the part of `from` that lies before `to`.
fn newlines(from: &str, to: &str) -> usize {
    from[..from.len() - to.len()].matches('\n').count()
}

/// What to do when a term is defined more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DuplicatePolicy {
    /// The later definition replaces the earlier one.
    #[default]
    KeepLast,
    /// The earlier definition wins, later ones are dropped.
    KeepFirst,
    /// A repeated term aborts the build.
    Reject,
}

/// All terms of one source with their definitions, ordered by term.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Glossary {
    entries: BTreeMap<String, String>,
}

impl Glossary {
    pub fn parse(source: &str, policy: DuplicatePolicy) -> Result<Self, GlossaryError> {
        let mut entries = BTreeMap::new();
        let mut rest = source;
        // 1-based line of the next unread byte
        let mut line = 1;
        loop {
            // the term line starts after any stray blank lines
            let (after_blanks, _) = many0_blanks(rest)
                .finish()
                .map_err(|e| ParseError::new(source, e.internal.input, e.ty))?;
            line += newlines(rest, after_blanks);
            if after_blanks.is_empty() {
                break;
            }
            let (next, rec) = record(after_blanks)
                .finish()
                .map_err(|e| ParseError::new(source, e.internal.input, e.ty))?;
            let term_line = line;
            line += newlines(after_blanks, next);
            rest = next;

            match entries.entry(rec.term.to_string()) {
                Entry::Vacant(e) => {
                    e.insert(rec.definition);
                }
                Entry::Occupied(mut e) => {
                    tracing::warn!(term = rec.term, line = term_line, ?policy, "duplicate term");
                    match policy {
                        DuplicatePolicy::KeepLast => {
                            e.insert(rec.definition);
                        }
                        DuplicatePolicy::KeepFirst => (),
                        DuplicatePolicy::Reject => {
                            return Err(GlossaryError::DuplicateTerm {
                                term: rec.term.to_string(),
                                line: term_line,
                            });
                        }
                    }
                }
            }
        }
        let glossary = Self { entries };
        tracing::info!(terms = glossary.len(), "parsed glossary");
        Ok(glossary)
    }

    /// Terms in ascending lexicographic order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[cfg(test)]
    pub fn definition(&self, term: &str) -> Option<&str> {
        self.entries.get(term).map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.contains_key(term)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, d)| (t.as_str(), d.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for Glossary {
    type Err = GlossaryError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, DuplicatePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use crate::errors::ParseErrorType;

    const CATS: &str = "Cat\nA small feline.\n\nDog\nA domestic canine that chases Cat.\n\n";

    #[test]
    fn terms_sorted() {
        let g: Glossary = "zebra\nz\n\nApple\nA\n\napple\na\n\nBanana\nb\n"
            .parse()
            .unwrap();
        let terms: Vec<_> = g.terms().collect();
        assert_eq!(terms, vec!["Apple", "Banana", "apple", "zebra"]);
        assert_eq!(g.len(), 4);
    }

    #[test]
    fn scenario_two_terms() {
        let g: Glossary = CATS.parse().unwrap();
        assert_eq!(g.terms().collect::<Vec<_>>(), vec!["Cat", "Dog"]);
        assert_eq!(g.definition("Cat"), Some("A small feline."));
        assert_eq!(
            g.definition("Dog"),
            Some("A domestic canine that chases Cat.")
        );
    }

    #[test]
    fn two_line_definition_joined_without_space() {
        let g: Glossary = "Bird\nAn animal\nwith wings.\n\n".parse().unwrap();
        assert_eq!(g.definition("Bird"), Some("An animalwith wings."));
    }

    #[rstest]
    #[case(DuplicatePolicy::KeepLast, "Second.")]
    #[case(DuplicatePolicy::KeepFirst, "First.")]
    fn duplicate_policy(#[case] policy: DuplicatePolicy, #[case] kept: &str) {
        let g = Glossary::parse("Cat\nFirst.\n\nCat\nSecond.\n\n", policy).unwrap();
        assert_eq!(g.len(), 1);
        assert_eq!(g.definition("Cat"), Some(kept));
    }

    #[test]
    fn duplicate_rejected() {
        let err = Glossary::parse("Cat\nFirst.\n\nDog\nd\n\nCat\nSecond.\n", DuplicatePolicy::Reject)
            .unwrap_err();
        match err {
            GlossaryError::DuplicateTerm { term, line } => {
                assert_eq!(term, "Cat");
                assert_eq!(line, 7);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[rstest]
    #[case("")]
    #[case("\n\n")]
    fn empty_source(#[case] txt: &str) {
        let g: Glossary = txt.parse().unwrap();
        assert!(g.is_empty());
    }

    #[test]
    fn stray_blank_lines_skipped() {
        let g: Glossary = "\n\nCat\nc\n\n\n\nDog\nd\n\n\n".parse().unwrap();
        assert_eq!(g.terms().collect::<Vec<_>>(), vec!["Cat", "Dog"]);
    }

    #[rstest]
    #[case("Cat\nc\n\nDog\n", 5, ParseErrorType::MissingDefinition)]
    #[case("Cat\nc\n\nDog\n\nd\n", 5, ParseErrorType::MissingDefinition)]
    #[case("Bird\nAn animal\nwith\nwings.\n", 4, ParseErrorType::ExpectedBlank)]
    fn malformed_source(#[case] txt: &str, #[case] line: usize, #[case] ty: ParseErrorType) {
        match txt.parse::<Glossary>() {
            Err(GlossaryError::Parse(e)) => {
                assert_eq!(e.ty, ty);
                assert_eq!(e.line, line);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn large_source_keeps_line_numbers() {
        let mut src = String::new();
        for i in 0..5000 {
            src.push_str(&format!("term{i}\nA definition of term{i} that runs to about sixty chars.\n\n"));
        }
        src.push_str("term42\nAgain.\n");
        let g: Glossary = src.parse().unwrap();
        assert_eq!(g.len(), 5000);
        assert_eq!(g.definition("term42"), Some("Again."));

        match Glossary::parse(&src, DuplicatePolicy::Reject) {
            Err(GlossaryError::DuplicateTerm { term, line }) => {
                assert_eq!(term, "term42");
                assert_eq!(line, 5000 * 3 + 1);
            }
            other => panic!("expected duplicate, got {other:?}"),
        }
    }

    #[test]
    fn lone_carriage_return_stays_in_definition() {
        let g: Glossary = "Cat\nA\rB\n\nDog\r\nd\r\n".parse().unwrap();
        assert_eq!(g.definition("Cat"), Some("A\rB"));
        assert_eq!(g.definition("Dog"), Some("d"));
    }

    #[test]
    fn lookup_is_exact() {
        let g: Glossary = CATS.parse().unwrap();
        assert!(g.contains("Cat"));
        assert!(!g.contains("cat"));
        assert_eq!(g.definition("Cat "), None);
    }
}
