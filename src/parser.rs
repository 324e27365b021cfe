use crate::{
    errors::{MatchRes, ParseErrorType},
    syntax::*,
};
use nom::{
    Parser,
    branch::alt,
    combinator::{cut, map, value},
    sequence::terminated,
};

/// One term with its assembled definition, as read from the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'a> {
    pub term: &'a str,
    pub definition: String,
}

/// A second definition line, closed by a blank line or end of input.
pub fn continuation(inp: &str) -> MatchRes<'_, Option<&str>> {
    map(
        terminated(
            filled_line,
            cut(err_ctx(&ParseErrorType::ExpectedBlank, record_end)),
        ),
        Some,
    )
    .parse(inp)
}

pub fn record(inp: &str) -> MatchRes<'_, Record<'_>> {
    map(
        (
            filled_line,
            cut(err_ctx(&ParseErrorType::MissingDefinition, filled_line)),
            alt((value(None, record_end), continuation)),
        ),
        |(term, first, second)| Record {
            term,
            // two definition lines are joined as-is, with nothing between them
            definition: match second {
                Some(more) => format!("{first}{more}"),
                None => first.to_string(),
            },
        },
    )
    .parse(inp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MatchErr;
    use rstest::rstest;

    #[rstest]
    #[case("Cat\nA small feline.\n\n", "Cat", "A small feline.", "")]
    #[case("Cat\nA small feline.\n\nDog\n", "Cat", "A small feline.", "Dog\n")]
    #[case("Cat\nA small feline.", "Cat", "A small feline.", "")]
    #[case("Bird\nAn animal\nwith wings.\n\n", "Bird", "An animalwith wings.", "")]
    #[case("Bird\r\nAn animal\r\nwith wings.\r\n", "Bird", "An animalwith wings.", "")]
    #[case("काम\nwork\n\n", "काम", "work", "")]
    fn record_test(
        #[case] txt: &str,
        #[case] term: &str,
        #[case] definition: &str,
        #[case] reminder: &str,
    ) {
        let (rest, rec) = record(txt).unwrap();
        assert_eq!(rest, reminder);
        assert_eq!(rec.term, term);
        assert_eq!(rec.definition, definition);
    }

    #[rstest]
    #[case("Cat\n", ParseErrorType::MissingDefinition)]
    #[case("Cat\n\nA small feline.\n", ParseErrorType::MissingDefinition)]
    #[case("Bird\nAn animal\nwith\nwings.\n", ParseErrorType::ExpectedBlank)]
    fn record_failure_test(#[case] txt: &str, #[case] ty: ParseErrorType) {
        match record(txt) {
            Err(nom::Err::Failure(MatchErr { ty: t, .. })) => assert_eq!(t, ty),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn no_term_is_recoverable() {
        assert!(matches!(record(""), Err(nom::Err::Error(_))));
        assert!(matches!(record("\nCat\n"), Err(nom::Err::Error(_))));
    }
}
