//! Generic S-expression values and the reader that builds them from the
//! directive-mode token stream.
//!
//! The reader knows nothing about passages: it turns `(option "next")` into a
//! proper list of atoms and leaves the interpretation to the caller.

use std::fmt;

use crate::{
    err_span,
    syntax::{
        scanner::{Scanner, TokenKind},
        Span,
    },
    IridiumError,
};

/// A directive payload value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SExp {
    /// A bare word, folded to lowercase at construction.
    Symbol(String),
    /// A quoted string, verbatim.
    String(String),
    /// The empty list.
    Nil,
    Cons(Box<SExp>, Box<SExp>),
}

impl SExp {
    pub fn symbol(name: &str) -> Self {
        SExp::Symbol(name.to_lowercase())
    }

    pub fn string(value: impl Into<String>) -> Self {
        SExp::String(value.into())
    }

    pub fn cons(car: SExp, cdr: SExp) -> Self {
        SExp::Cons(Box::new(car), Box::new(cdr))
    }

    /// Builds a proper list from `items`, preserving their order.
    pub fn list(items: Vec<SExp>) -> Self {
        items
            .into_iter()
            .rev()
            .fold(SExp::Nil, |tail, item| SExp::cons(item, tail))
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, SExp::Symbol(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, SExp::String(_))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, SExp::Nil)
    }

    pub fn is_cons(&self) -> bool {
        matches!(self, SExp::Cons(..))
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            SExp::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            SExp::String(s) => Some(s),
            _ => None,
        }
    }

    /// Iterates over the elements of a list; atoms yield nothing.
    pub fn iter(&self) -> ListIter<'_> {
        ListIter { current: self }
    }

    /// Number of elements in a list; zero for atoms and `Nil`.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        !self.is_cons()
    }

    /// The `index`-th element of a list.
    pub fn nth(&self, index: usize) -> Option<&SExp> {
        self.iter().nth(index)
    }
}

/// Iterator over the `car`s of a `Cons` chain.
pub struct ListIter<'a> {
    current: &'a SExp,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a SExp;

    fn next(&mut self) -> Option<Self::Item> {
        match self.current {
            SExp::Cons(car, cdr) => {
                self.current = cdr;
                Some(car)
            }
            _ => None,
        }
    }
}

impl fmt::Display for SExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SExp::Symbol(s) => write!(f, "{}", s),
            SExp::String(s) => write!(f, "\"{}\"", s),
            SExp::Nil => write!(f, "()"),
            SExp::Cons(..) => {
                write!(f, "(")?;
                for (i, item) in self.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Reads the rest of a list whose opening `#(` or `(` was just consumed.
///
/// Returns the list and the span from its first element to its closing `)`.
pub fn read_list(scanner: &mut Scanner<'_>) -> Result<(SExp, Span), IridiumError> {
    let mut items = Vec::new();
    let mut span: Option<Span> = None;
    loop {
        let token = scanner.next_directive();
        span = Some(span.map_or(token.span, |s| s.to(token.span)));
        match token.kind {
            kind if kind.is_whitespace() => continue,
            TokenKind::ListClose => break,
            TokenKind::ListOpen => {
                let (inner, inner_span) = read_list(scanner)?;
                span = span.map(|s| s.to(inner_span));
                items.push(inner);
            }
            TokenKind::QuotedString(s) => items.push(SExp::String(s)),
            TokenKind::Word(w) => items.push(SExp::symbol(&w)),
            TokenKind::EndOfInput => {
                return Err(err_span!(
                    Unterminated,
                    token.span,
                    "annotation is missing its closing ')'"
                ))
            }
            TokenKind::Illegal(raw) => {
                return Err(err_span!(Lexical, token.span, "illegal input {:?} in s-expression", raw))
            }
            other => {
                return Err(err_span!(
                    Structural,
                    token.span,
                    "illegal token in s-expression: {}",
                    other.describe()
                ))
            }
        }
    }
    Ok((SExp::list(items), span.unwrap_or_default()))
}
