use nom::{IResult, error::ErrorKind};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, PartialEq, Clone, Default)]
pub struct ParseError {
    pub ty: ParseErrorType,
    pub line: usize,
    pub col: usize,
    pub linestr: String,
}

impl ParseError {
    /// Locates the error from the full `input` and the unparsed `rest`.
    pub fn new(input: &str, rest: &str, ty: ParseErrorType) -> Self {
        let offset = input.len() - rest.len();
        let consumed = &input[..offset];
        let line = consumed.matches('\n').count() + 1;
        let lstart = consumed.rfind('\n').map_or(0, |i| i + 1);
        let col = consumed[lstart..].chars().count() + 1;
        let linestr = input[lstart..]
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            ty,
            line,
            col,
            linestr,
        }
    }

    pub fn user_msg(&self, filename: Option<&str>) -> String {
        let mut msg = String::new();
        msg.push_str(&format!(
            "Error: Parse Error at Line {} Column {}\n",
            self.line, self.col
        ));
        if let Some(fname) = filename {
            msg.push_str(&format!("  -> {}:{}:{}\n", fname, self.line, self.col));
        }
        msg.push_str(&format!("  {}\n", self.linestr));
        msg.push_str(&format!("  {: >2$} {}", "^", self.ty.message(), self.col));
        msg
    }
}

pub type MatchRes<'a, T> = IResult<&'a str, T, MatchErr<'a>>;

impl std::error::Error for ParseError {}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ParseError: {} at line {} col {}",
            self.ty.message(),
            self.line,
            self.col
        )
    }
}

#[derive(Debug, PartialEq, Clone, Default)]
pub enum ParseErrorType {
    MissingDefinition,
    ExpectedBlank,
    #[default]
    SyntaxError,
}

impl ParseErrorType {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingDefinition => "MissingDefinition: Term has no definition line",
            Self::ExpectedBlank => {
                "ExpectedBlank: Definition spans at most two lines, blank line expected"
            }
            Self::SyntaxError => "SyntaxError: Invalid Syntax",
        }
    }
}

#[derive(Debug)]
pub struct MatchErr<'a> {
    pub ty: ParseErrorType,
    pub internal: nom::error::Error<&'a str>,
}

impl MatchErr<'_> {
    pub fn ty(mut self, ty: &ParseErrorType) -> Self {
        self.ty = ty.clone();
        self
    }
}

impl<'a> nom::error::ParseError<&'a str> for MatchErr<'a> {
    fn from_error_kind(input: &'a str, kind: ErrorKind) -> Self {
        MatchErr {
            ty: ParseErrorType::SyntaxError,
            internal: nom::error::Error::<&'a str>::from_error_kind(input, kind),
        }
    }

    fn append(input: &'a str, kind: ErrorKind, other: Self) -> Self {
        MatchErr {
            ty: other.ty,
            internal: nom::error::Error::<&'a str>::append(input, kind, other.internal),
        }
    }

    fn or(self, other: Self) -> Self {
        // keep the more specific kind when one branch tagged it
        let ty = match other.ty {
            ParseErrorType::SyntaxError => self.ty,
            ty => ty,
        };
        MatchErr {
            ty,
            internal: nom::error::Error::<&'a str>::or(self.internal, other.internal),
        }
    }
}

/// Everything that can abort a glossary build.
#[derive(Debug, Error)]
pub enum GlossaryError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("duplicate term {term:?} at line {line}")]
    DuplicateTerm { term: String, line: usize },

    #[error("output directory {0} does not exist")]
    MissingOutputDir(PathBuf),

    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Cat\nA cat.\n\nDog\n", "", 5, 1, "")]
    #[case("Cat\nA cat.\n\nDog\n\n", "\n", 5, 1, "")]
    #[case("Cat\nA cat.\nmore\nstray\n", "stray\n", 4, 1, "stray")]
    #[case("abc def", "def", 1, 5, "abc def")]
    fn locate_test(
        #[case] input: &str,
        #[case] rest: &str,
        #[case] line: usize,
        #[case] col: usize,
        #[case] linestr: &str,
    ) {
        let err = ParseError::new(input, rest, ParseErrorType::SyntaxError);
        assert_eq!((err.line, err.col), (line, col));
        assert_eq!(err.linestr, linestr);
    }

    #[test]
    fn user_msg_points_at_column() {
        let err = ParseError::new("abc def", "def", ParseErrorType::ExpectedBlank);
        let msg = err.user_msg(Some("terms.txt"));
        assert!(msg.contains("terms.txt:1:5"));
        assert!(msg.ends_with(&format!("      ^ {}", ParseErrorType::ExpectedBlank.message())));
    }
}
