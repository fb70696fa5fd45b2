//! Line tokenizer for group files
//!
//! The format is line oriented, so tokenizing happens in two steps. Each raw
//! line is trimmed and classified into a [`LineKind`]; key/value lines are
//! then split into words with a logos lexer that keeps double-quoted runs
//! (quotes included) together as one word.

use crate::ast::{Value, UNNAMED_GROUP};
use logos::Logos;
use std::ops::Range;

/// Words of a key/value line
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"\s+")]
pub enum Token<'src> {
    /// A run of non-blank characters, where a `"..."` section may contain blanks
    #[regex(r#"("[^"]*"|[^\s"])+"#, |lex| lex.slice())]
    Word(&'src str),

    /// A `"` that is never closed
    #[token("\"")]
    StrayQuote,
}

/// Split a line into words. A stray unbalanced quote is dropped and the
/// text after it is still split into words.
pub fn tokenize(line: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut rest = line;

    loop {
        let mut lexer = Token::lexer(rest);
        let mut resume = None;
        while let Some(token) = lexer.next() {
            match token {
                Ok(Token::Word(word)) => words.push(word),
                Ok(Token::StrayQuote) => {}
                Err(()) => {
                    // restart one character past the point the lexer gave up
                    let start = lexer.span().start;
                    let width = rest[start..].chars().next().map_or(1, char::len_utf8);
                    resume = Some(start + width);
                    break;
                }
            }
        }
        match resume {
            Some(offset) => rest = &rest[offset..],
            None => return words,
        }
    }
}

/// Classification of one trimmed line
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'src> {
    Blank,
    /// Full comment text, `#` included
    Comment(&'src str),
    GroupHeader(&'src str),
    BraceOpen,
    BraceClose,
    KeyValue { key: &'src str, value: Value },
    /// A key/value line with fewer than two words
    Malformed(&'src str),
}

/// A classified line with its location in the source
#[derive(Debug, Clone, PartialEq)]
pub struct SourceLine<'src> {
    /// 1-based line number
    pub number: usize,
    /// Byte range of the trimmed line content
    pub span: Range<usize>,
    pub kind: LineKind<'src>,
}

/// Classify a line that has already been trimmed.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with('#') {
        return LineKind::Comment(line);
    }
    if let Some(name) = group_header_name(line) {
        return LineKind::GroupHeader(name);
    }
    match line {
        "{" => return LineKind::BraceOpen,
        "}" => return LineKind::BraceClose,
        _ => {}
    }

    let words = tokenize(line);
    match words.split_first() {
        Some((key, rest)) if !rest.is_empty() => match Value::from_tokens(rest) {
            Some(value) => LineKind::KeyValue { key: *key, value },
            None => LineKind::Malformed(line),
        },
        _ => LineKind::Malformed(line),
    }
}

/// Name of a `group` header line, matched case-insensitively. A header
/// with nothing after the keyword, or with the keyword glued to other
/// text, is named [`UNNAMED_GROUP`].
fn group_header_name(line: &str) -> Option<&str> {
    const KEYWORD: &str = "group";

    let prefix = line.get(..KEYWORD.len())?;
    if !prefix.eq_ignore_ascii_case(KEYWORD) {
        return None;
    }

    let rest = &line[KEYWORD.len()..];
    let name = rest.trim();
    if name.is_empty() || !rest.starts_with(char::is_whitespace) {
        Some(UNNAMED_GROUP)
    } else {
        Some(name)
    }
}

/// Iterate over every line of `source`, trimmed and classified.
pub fn lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut offset = 0;
    source.split('\n').enumerate().map(move |(i, raw)| {
        let start = offset;
        offset += raw.len() + 1;

        let trimmed = raw.trim();
        let lead = raw.len() - raw.trim_start().len();
        let content_start = start + lead;

        SourceLine {
            number: i + 1,
            span: content_start..content_start + trimmed.len(),
            kind: classify_line(trimmed),
        }
    })
}
