//! Iridium passage parser.
//!
//! Single pass over the scanner's token stream with one token of lookahead.
//! Prose is gathered into paragraphs, quotations nest through an explicit
//! stack of saved buffers, and each `#(` annotation is read as an
//! S-expression and decoded into a [`Directive`]. The first malformed
//! construct aborts the parse; there is no partial result.

use std::mem;

use crate::{
    ast::{Block, Choice, Passage, Text},
    err_span,
    syntax::{
        directive::Directive,
        scanner::{Scanner, Token, TokenKind},
        sexp::read_list,
        Span,
    },
    IridiumError,
};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Parses one passage's text.
pub fn parse(source: &str) -> Result<Passage, IridiumError> {
    Parser::new(source).parse()
}

/// Parses one passage's text, attaching `name` and the text to any error so it
/// renders with a labelled snippet.
pub fn parse_named(name: &str, source: &str) -> Result<Passage, IridiumError> {
    parse(source).map_err(|e| e.with_source(name, source))
}

pub struct Parser<'a> {
    scanner: Scanner<'a>,
    pending: Option<Token>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
            pending: None,
        }
    }

    pub fn parse(mut self) -> Result<Passage, IridiumError> {
        let mut passage = Passage::default();
        let mut text = TextBuilder::default();

        loop {
            let token = self.scan();
            match token.kind {
                TokenKind::Word(w) => text.word(w),
                TokenKind::Whitespace(_) => text.gap(),
                TokenKind::ParagraphBreak(_) => flush(&mut text, &mut passage),
                TokenKind::QuoteMark => {
                    let next = self.peek();
                    text.quote_mark(next);
                }
                TokenKind::EndOfInput => {
                    flush(&mut text, &mut passage);
                    return Ok(passage);
                }
                TokenKind::AnnotationOpen => {
                    flush(&mut text, &mut passage);
                    match self.directive()? {
                        (Directive::Option { target }, _) => {
                            let content = self.option_label(token.span, &target)?;
                            passage.options.push(Choice { target, content });
                        }
                        (Directive::Image { target }, _) => {
                            passage.blocks.push(Block::Image {
                                target,
                                style: String::new(),
                            });
                        }
                        (Directive::End, span) => {
                            return Err(err_span!(Structural, span, "#(end) without an open option")
                                .with_help("an option reads `#(option \"target\") label #(end)`"));
                        }
                    }
                }
                other => return Err(unexpected(other, token.span)),
            }
        }
    }

    // ========================================================================
    // DIRECTIVES
    // ========================================================================

    /// Reads the head list of an annotation whose `#(` was just consumed.
    fn directive(&mut self) -> Result<(Directive, Span), IridiumError> {
        debug_assert!(self.pending.is_none());
        let (head, span) = read_list(&mut self.scanner)?;
        let directive = Directive::from_sexp(&head, span)?;
        Ok((directive, span))
    }

    /// Scans an option's label up to the `#(end)` that closes it.
    fn option_label(&mut self, open: Span, target: &str) -> Result<Vec<Text>, IridiumError> {
        let mut label = TextBuilder::default();
        loop {
            let token = self.scan();
            match token.kind {
                TokenKind::Word(w) => label.word(w),
                TokenKind::Whitespace(_) | TokenKind::ParagraphBreak(_) => label.gap(),
                TokenKind::QuoteMark => {
                    let next = self.peek();
                    label.quote_mark(next);
                }
                TokenKind::AnnotationOpen => match self.directive()? {
                    (Directive::End, _) => return Ok(label.finish()),
                    (other, span) => {
                        return Err(err_span!(
                            Structural,
                            span,
                            "#({}) is not allowed inside the label of option \"{}\"",
                            other.name(),
                            target
                        )
                        .with_help("close the option with #(end) first"))
                    }
                },
                TokenKind::EndOfInput => {
                    return Err(err_span!(Unterminated, open, "option \"{}\" is never closed", target)
                        .with_help("end the option label with #(end)"))
                }
                other => return Err(unexpected(other, token.span)),
            }
        }
    }

    // ========================================================================
    // TOKEN BUFFER
    // ========================================================================

    fn scan(&mut self) -> Token {
        match self.pending.take() {
            Some(token) => token,
            None => self.scanner.next(),
        }
    }

    fn peek(&mut self) -> &TokenKind {
        let scanner = &mut self.scanner;
        &self.pending.get_or_insert_with(|| scanner.next()).kind
    }
}

fn flush(text: &mut TextBuilder, passage: &mut Passage) {
    let content = text.finish();
    if !content.is_empty() {
        passage.blocks.push(Block::Text { content });
    }
}

fn unexpected(kind: TokenKind, span: Span) -> IridiumError {
    match kind {
        TokenKind::Illegal(raw) => err_span!(Lexical, span, "illegal input {:?}", raw),
        other => err_span!(Structural, span, "unexpected {}", other.describe()),
    }
}

// ============================================================================
// QUOTATION NESTING
// ============================================================================

/// What the next quote mark is glued to on its left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Left {
    /// Whitespace or the start of a paragraph.
    #[default]
    Gap,
    /// A word or a closing quote mark.
    Glued,
    /// An opening quote mark.
    Opening,
}

/// Paragraph buffer plus the stack of outer buffers suspended by open quotes.
#[derive(Debug, Default)]
struct TextBuilder {
    buffer: Vec<Text>,
    saved: Vec<Vec<Text>>,
    left: Left,
}

impl TextBuilder {
    fn word(&mut self, w: String) {
        self.buffer.push(Text::Word(w));
        self.left = Left::Glued;
    }

    fn gap(&mut self) {
        self.left = Left::Gap;
    }

    fn in_quote(&self) -> bool {
        !self.saved.is_empty()
    }

    /// Opens or closes a quotation, judging by the tokens on either side.
    fn quote_mark(&mut self, next: &TokenKind) {
        let closes = self.in_quote()
            && match self.left {
                Left::Glued => true,
                Left::Opening => !matches!(next, TokenKind::Word(_) | TokenKind::QuoteMark),
                Left::Gap => matches!(
                    next,
                    TokenKind::Whitespace(_)
                        | TokenKind::ParagraphBreak(_)
                        | TokenKind::EndOfInput
                        | TokenKind::AnnotationOpen
                ),
            };
        if closes {
            self.close_quote();
        } else {
            self.open_quote();
        }
    }

    fn open_quote(&mut self) {
        self.saved.push(mem::take(&mut self.buffer));
        self.left = Left::Opening;
    }

    fn close_quote(&mut self) {
        if let Some(outer) = self.saved.pop() {
            let inner = mem::replace(&mut self.buffer, outer);
            self.buffer.push(Text::Quote(inner));
        }
        self.left = Left::Glued;
    }

    /// Force-closes open quotes and hands back the finished content.
    fn finish(&mut self) -> Vec<Text> {
        while self.in_quote() {
            self.close_quote();
        }
        self.left = Left::Gap;
        mem::take(&mut self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorType;

    fn w(s: &str) -> Text {
        Text::word(s)
    }

    fn q(children: Vec<Text>) -> Text {
        Text::quote(children)
    }

    fn para(content: Vec<Text>) -> Block {
        Block::text(content)
    }

    #[test]
    fn test_empty_source() {
        assert_eq!(parse("").unwrap(), Passage::default());
        assert_eq!(parse(" \n\n\t\n").unwrap(), Passage::default());
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let passage = parse("The door\nis shut.\n\n\n  It is\nlocked.").unwrap();
        assert_eq!(
            passage.blocks,
            vec![
                para(vec![w("The"), w("door"), w("is"), w("shut.")]),
                para(vec![w("It"), w("is"), w("locked.")]),
            ]
        );
    }

    #[test]
    fn test_simple_quote() {
        let passage = parse("He said \"hello there\" and left.").unwrap();
        assert_eq!(
            passage.blocks,
            vec![para(vec![
                w("He"),
                w("said"),
                q(vec![w("hello"), w("there")]),
                w("and"),
                w("left."),
            ])]
        );
    }

    #[test]
    fn test_nested_quote() {
        let passage = parse("\"a \"b\" c\"").unwrap();
        assert_eq!(
            passage.blocks,
            vec![para(vec![q(vec![w("a"), q(vec![w("b")]), w("c")])])]
        );
    }

    #[test]
    fn test_quote_opening_with_nested_quote() {
        let passage = parse("\"\"b\" c\"").unwrap();
        assert_eq!(
            passage.blocks,
            vec![para(vec![q(vec![q(vec![w("b")]), w("c")])])]
        );
    }

    #[test]
    fn test_adjacent_quotes_are_siblings() {
        let passage = parse("\"one\" \"two\"").unwrap();
        assert_eq!(
            passage.blocks,
            vec![para(vec![q(vec![w("one")]), q(vec![w("two")])])]
        );
    }

    #[test]
    fn test_empty_quote() {
        let passage = parse("x \"\" y").unwrap();
        assert_eq!(passage.blocks, vec![para(vec![w("x"), q(vec![]), w("y")])]);
    }

    #[test]
    fn test_unterminated_quote_closes_at_end() {
        let passage = parse("She whispered \"run").unwrap();
        assert_eq!(
            passage.blocks,
            vec![para(vec![w("She"), w("whispered"), q(vec![w("run")])])]
        );
    }

    #[test]
    fn test_unterminated_quote_closes_at_paragraph_break() {
        let passage = parse("\"First part\n\n\"Second part.\"").unwrap();
        assert_eq!(
            passage.blocks,
            vec![
                para(vec![q(vec![w("First"), w("part")])]),
                para(vec![q(vec![w("Second"), w("part.")])]),
            ]
        );
    }

    #[test]
    fn test_option() {
        let passage = parse("#(option \"next\" ) Go on #(end)").unwrap();
        assert!(passage.blocks.is_empty());
        assert_eq!(
            passage.options,
            vec![Choice::new("next", vec![w("Go"), w("on")])]
        );
    }

    #[test]
    fn test_option_label_with_quote_and_line_breaks() {
        let passage = parse("#(option \"ask\")\n  Ask \"why?\"\n\n  again\n#(end)").unwrap();
        assert_eq!(
            passage.options[0].content,
            vec![w("Ask"), q(vec![w("why?")]), w("again")]
        );
    }

    #[test]
    fn test_options_preserve_order() {
        let passage = parse("#(option \"a\") Go #(end) #(option \"b\") Stay #(end)").unwrap();
        assert!(passage.blocks.is_empty());
        assert_eq!(passage.targets().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_directive_flushes_paragraph() {
        let passage = parse("Look \"up #(image \"sky.png\") down").unwrap();
        assert_eq!(
            passage.blocks,
            vec![
                para(vec![w("Look"), q(vec![w("up")])]),
                Block::image("sky.png", ""),
                para(vec![w("down")]),
            ]
        );
    }

    #[test]
    fn test_symbols_are_case_insensitive() {
        let upper = parse("#(OPTION \"x\") Go #(END)").unwrap();
        let lower = parse("#(option \"x\") Go #(end)").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_option_target_is_case_sensitive() {
        let passage = parse("#(option \"Cellar\") Down #(end)").unwrap();
        assert_eq!(passage.options[0].target, "Cellar");
    }

    #[test]
    fn test_hash_words_are_prose() {
        let passage = parse("## #tag (aside)").unwrap();
        assert_eq!(passage.blocks, vec![para(vec![w("##"), w("#tag"), w("(aside)")])]);
    }

    #[test]
    fn test_option_with_extra_argument() {
        let err = parse("#(option \"next\" \"extra\")").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Structural);
        assert!(err.message().starts_with("extra junk after option name"));
    }

    #[test]
    fn test_image_with_extra_argument() {
        let err = parse("#(image \"pic.png\" \"width: 50%\")").unwrap_err();
        assert!(err.message().starts_with("extra junk after image target"));
    }

    #[test]
    fn test_unknown_directive() {
        let err = parse("Hello.\n\n#(bogus)").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Structural);
        assert_eq!(err.message(), "unsupported block type bogus");
        assert_eq!(err.span(), Some(Span::new(10, 16)));
    }

    #[test]
    fn test_end_outside_option() {
        let err = parse("#(end)").unwrap_err();
        assert_eq!(err.message(), "#(end) without an open option");
    }

    #[test]
    fn test_unterminated_option() {
        let err = parse("#(option \"next\") Go on").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Unterminated);
        assert_eq!(err.span(), Some(Span::new(0, 2)));
    }

    #[test]
    fn test_end_with_arguments() {
        let err = parse("#(option \"next\") Go #(end now)").unwrap_err();
        assert!(err.message().starts_with("extra junk after end"));
    }

    #[test]
    fn test_directive_inside_option_label() {
        let err = parse("#(option \"next\") Go #(image \"x.png\") #(end)").unwrap_err();
        assert_eq!(
            err.message(),
            "#(image) is not allowed inside the label of option \"next\""
        );
    }

    #[test]
    fn test_illegal_character() {
        let err = parse("bell \u{7} here").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Lexical);
        assert_eq!(err.span(), Some(Span::new(5, 6)));
    }

    #[test]
    fn test_unclosed_annotation() {
        let err = parse("#(option \"next\"").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Unterminated);
    }

    #[test]
    fn test_parse_named_attaches_source() {
        use miette::Diagnostic;

        let err = parse_named("cellar", "#(bogus)").unwrap_err();
        assert!(err.source_code().is_some());
        assert_eq!(err.labels().map(|l| l.count()), Some(1));
    }
}
