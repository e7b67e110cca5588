//! Passage markup syntax: scanning, S-expression reading and parsing.
//!
//! Raw passage text flows through the [`scanner::Scanner`] into the
//! [`parser`], which calls the [`sexp`] reader for every `#(` annotation and
//! decodes the head list into a [`directive::Directive`].

use serde::{Deserialize, Serialize};

pub mod directive;
pub mod parser;
pub mod scanner;
pub mod sexp;

pub use directive::Directive;
pub use parser::{parse, parse_named, Parser};
pub use scanner::{Scanner, Token, TokenKind};
pub use sexp::SExp;

/// Represents a byte span in the passage source.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Converts the byte offsets to 1-based `(line, column)` pairs.
    pub fn line_col(&self, source: &str) -> Option<((usize, usize), (usize, usize))> {
        if !source.is_char_boundary(self.start) || !source.is_char_boundary(self.end) {
            return None;
        }
        Some((position(source, self.start), position(source, self.end)))
    }
}

fn position(source: &str, offset: usize) -> (usize, usize) {
    let before = &source[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(nl) => before[nl + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, column)
}
