use crate::errors::{MatchErr, MatchRes, ParseErrorType};
use nom::{
    Parser,
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::line_ending,
    combinator::{eof, map, value, verify},
    multi::many0,
    sequence::terminated,
};

/// Text of a physical line, without its line ending.
///
/// Only a `'\r'` right before the `'\n'` belongs to the ending; a lone
/// `'\r'` is line content.
pub fn line_content(inp: &str) -> MatchRes<'_, &str> {
    map(take_till(|c: char| c == '\n'), strip_cr).parse(inp)
}

fn strip_cr(s: &str) -> &str {
    s.strip_suffix('\r').unwrap_or(s)
}

/// Line ending, or the end of the input.
pub fn eol(inp: &str) -> MatchRes<'_, ()> {
    value((), alt((tag("\n"), eof))).parse(inp)
}

/// A line with at least one character on it.
pub fn filled_line(inp: &str) -> MatchRes<'_, &str> {
    verify(terminated(line_content, eol), |s: &str| !s.is_empty()).parse(inp)
}

pub fn blank_line(inp: &str) -> MatchRes<'_, ()> {
    value((), line_ending).parse(inp)
}

/// Closes a record: a blank line or the end of input.
pub fn record_end(inp: &str) -> MatchRes<'_, ()> {
    alt((blank_line, value((), eof))).parse(inp)
}

pub fn many0_blanks(inp: &str) -> MatchRes<'_, ()> {
    value((), many0(blank_line)).parse(inp)
}

/// Tags any error raised by `f` with the given kind.
pub fn err_ctx<'a, O, F>(
    ty: &'static ParseErrorType,
    mut f: F,
) -> impl Parser<&'a str, Output = O, Error = MatchErr<'a>>
where
    F: Parser<&'a str, Output = O, Error = MatchErr<'a>>,
{
    move |i: &'a str| match f.parse(i) {
        Ok(o) => Ok(o),
        Err(nom::Err::Incomplete(i)) => Err(nom::Err::Incomplete(i)),
        Err(nom::Err::Error(e)) => Err(nom::Err::Error(e.ty(ty))),
        Err(nom::Err::Failure(e)) => Err(nom::Err::Failure(e.ty(ty))),
    }
}
