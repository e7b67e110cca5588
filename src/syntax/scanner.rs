//! Two-mode scanner for passage markup.
//!
//! In text mode the scanner produces words, quote marks, whitespace runs and
//! the `#(` annotation marker. Once an annotation is open the scanner tracks
//! parenthesis depth, and every request for a token is served in directive
//! mode until the depth drops back to zero, so `(`/`)` balance is global no
//! matter which entry point the parser calls.

use std::{iter::Peekable, str::CharIndices};

use serde::Serialize;

use crate::syntax::Span;

/// The classification of a scanned token. Raw payloads are verbatim source slices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    EndOfInput,
    /// A whitespace run containing at most one newline.
    Whitespace(String),
    /// A whitespace run containing two or more newlines.
    ParagraphBreak(String),
    Word(String),
    QuoteMark,
    /// The `#(` marker that opens a directive.
    AnnotationOpen,
    ListOpen,
    ListClose,
    /// The content of a directive string literal, without its quotes.
    QuotedString(String),
    Illegal(String),
}

impl TokenKind {
    pub fn is_whitespace(&self) -> bool {
        matches!(self, TokenKind::Whitespace(_) | TokenKind::ParagraphBreak(_))
    }

    /// Short human-readable name used in error messages.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::EndOfInput => "end of input".to_string(),
            TokenKind::Whitespace(_) => "whitespace".to_string(),
            TokenKind::ParagraphBreak(_) => "paragraph break".to_string(),
            TokenKind::Word(w) => format!("word '{}'", w),
            TokenKind::QuoteMark => "quote mark".to_string(),
            TokenKind::AnnotationOpen => "'#('".to_string(),
            TokenKind::ListOpen => "'('".to_string(),
            TokenKind::ListClose => "')'".to_string(),
            TokenKind::QuotedString(s) => format!("string \"{}\"", s),
            TokenKind::Illegal(raw) => format!("illegal input {:?}", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WordMode {
    Text,
    Directive,
}

/// Scanner over one passage's source text.
pub struct Scanner<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    depth: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            depth: 0,
        }
    }

    /// Current parenthesis depth; non-zero while inside a directive payload.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Scans one token in text mode, or in directive mode while a directive is open.
    pub fn next(&mut self) -> Token {
        if self.depth > 0 {
            return self.next_directive();
        }

        let start = self.offset();
        let Some((_, ch)) = self.chars.next() else {
            return Token::new(TokenKind::EndOfInput, start, start);
        };

        match ch {
            c if c.is_whitespace() => self.scan_whitespace(start),
            '"' => Token::new(TokenKind::QuoteMark, start, self.offset()),
            '#' if self.peek() == Some('(') => {
                self.chars.next();
                self.depth += 1;
                Token::new(TokenKind::AnnotationOpen, start, self.offset())
            }
            c if is_illegal(c) => self.illegal(start),
            _ => self.scan_word(start, WordMode::Text),
        }
    }

    /// Scans one token in directive mode.
    pub fn next_directive(&mut self) -> Token {
        let start = self.offset();
        let Some((_, ch)) = self.chars.next() else {
            return Token::new(TokenKind::EndOfInput, start, start);
        };

        match ch {
            c if c.is_whitespace() => self.scan_whitespace(start),
            '(' => {
                self.depth += 1;
                Token::new(TokenKind::ListOpen, start, self.offset())
            }
            ')' => {
                self.depth = self.depth.saturating_sub(1);
                Token::new(TokenKind::ListClose, start, self.offset())
            }
            '"' => self.scan_string(start),
            c if is_illegal(c) => self.illegal(start),
            _ => self.scan_word(start, WordMode::Directive),
        }
    }

    /// Scans the whole source in text mode, including the final `EndOfInput`.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = scanner.next();
            let done = token.kind == TokenKind::EndOfInput;
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }

    fn offset(&mut self) -> usize {
        self.chars
            .peek()
            .map(|(i, _)| *i)
            .unwrap_or(self.source.len())
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn slice(&mut self, start: usize) -> String {
        let end = self.offset();
        self.source[start..end].to_string()
    }

    fn scan_whitespace(&mut self, start: usize) -> Token {
        let mut newlines = usize::from(self.source[start..].starts_with('\n'));
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            if c == '\n' {
                newlines += 1;
            }
            self.chars.next();
        }
        let raw = self.slice(start);
        let end = self.offset();
        if newlines > 1 {
            Token::new(TokenKind::ParagraphBreak(raw), start, end)
        } else {
            Token::new(TokenKind::Whitespace(raw), start, end)
        }
    }

    fn scan_word(&mut self, start: usize, mode: WordMode) -> Token {
        while let Some(c) = self.peek() {
            let stop = c.is_whitespace()
                || is_illegal(c)
                || match mode {
                    WordMode::Text => c == '"',
                    WordMode::Directive => c == '(' || c == ')',
                };
            if stop {
                break;
            }
            self.chars.next();
        }
        let raw = self.slice(start);
        let end = self.offset();
        Token::new(TokenKind::Word(raw), start, end)
    }

    fn scan_string(&mut self, start: usize) -> Token {
        let content_start = self.offset();
        while let Some((i, c)) = self.chars.next() {
            if c == '"' {
                let content = self.source[content_start..i].to_string();
                return Token::new(TokenKind::QuotedString(content), start, self.offset());
            }
        }
        // No closing quote before end of input.
        let raw = self.slice(start);
        let end = self.offset();
        Token::new(TokenKind::Illegal(raw), start, end)
    }

    fn illegal(&mut self, start: usize) -> Token {
        let raw = self.slice(start);
        let end = self.offset();
        Token::new(TokenKind::Illegal(raw), start, end)
    }
}

/// Characters no token can start with or contain.
fn is_illegal(c: char) -> bool {
    c.is_control() && !c.is_whitespace()
}
