use nom::{IResult, Parser, branch::alt, bytes::complete::take_while1, combinator::map};
use std::collections::HashSet;

/// Characters splitting a definition into words.
pub const DEFAULT_SEPARATORS: &str = " ,!.?()";

#[derive(Clone, PartialEq, Debug)]
pub struct SeparatorSet(HashSet<char>);

impl SeparatorSet {
    pub fn new(chars: &str) -> Self {
        Self(chars.chars().collect())
    }

    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }
}

impl Default for SeparatorSet {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATORS)
    }
}

#[derive(Clone, PartialEq, Debug, Copy)]
pub enum TokenType {
    Word,
    Separator,
}

#[derive(Clone, PartialEq, Debug, Copy)]
pub struct Token<'a> {
    pub ty: TokenType,
    pub content: &'a str,
}

impl<'a> Token<'a> {
    fn new(ty: TokenType, content: &'a str) -> Self {
        Self { ty, content }
    }

    pub fn is_word(&self) -> bool {
        self.ty == TokenType::Word
    }

    pub(crate) fn len(&self) -> usize {
        self.content.len()
    }
}

pub(crate) type TokenRes<'a> = IResult<&'a str, Token<'a>>;

fn separator_run<'a>(i: &'a str, separators: &SeparatorSet) -> TokenRes<'a> {
    map(take_while1(|c| separators.contains(c)), |s| {
        Token::new(TokenType::Separator, s)
    })
    .parse(i)
}

fn word_run<'a>(i: &'a str, separators: &SeparatorSet) -> TokenRes<'a> {
    map(take_while1(|c| !separators.contains(c)), |s| {
        Token::new(TokenType::Word, s)
    })
    .parse(i)
}

/// Returns the maximal word or separator run of `text` starting at byte
/// offset `position`.
///
/// `None` when `position` is past the end of `text` or not on a character
/// boundary. The caller advances its own cursor by `token.len()`.
pub fn next_token<'a>(
    text: &'a str,
    position: usize,
    separators: &SeparatorSet,
) -> Option<Token<'a>> {
    let rest = text.get(position..).filter(|r| !r.is_empty())?;
    alt((
        |i: &'a str| separator_run(i, separators),
        |i: &'a str| word_run(i, separators),
    ))
    .parse(rest)
    .ok()
    .map(|(_, token)| token)
}

/// Iterator over the tokens partitioning a text, left to right.
pub struct Tokens<'a, 's> {
    text: &'a str,
    position: usize,
    separators: &'s SeparatorSet,
}

impl<'a> Iterator for Tokens<'a, '_> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = next_token(self.text, self.position, self.separators)?;
        self.position += token.len();
        Some(token)
    }
}

pub fn tokens<'a, 's>(text: &'a str, separators: &'s SeparatorSet) -> Tokens<'a, 's> {
    Tokens {
        text,
        position: 0,
        separators,
    }
}
