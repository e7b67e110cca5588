//! Document model for parsed passages.
//!
//! A [`Passage`] is the immutable result of parsing one passage file: its
//! content [`Block`]s and its player [`Choice`]s, both in source order. Every
//! type serializes with `serde`; field names and sequence order are stable so
//! the bundler and any JSON consumer behave reproducibly.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};

pub mod render;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Inline content: a word, or a quotation holding further inline content.
///
/// # Examples
///
/// ```rust
/// use iridium::ast::Text;
/// let said = Text::quote(vec![Text::word("hello")]);
/// assert_eq!(said.to_string(), "\"hello\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Text {
    /// A whitespace-delimited word, verbatim.
    Word(String),
    /// Content between a matching pair of `"`; the marks themselves are not stored.
    Quote(Vec<Text>),
}

/// One unit of passage content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Block {
    /// A paragraph. Never empty.
    Text { content: Vec<Text> },
    /// An image reference with an opaque style string.
    Image { target: String, style: String },
}

/// A player option: the label shown and the passage it leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub target: String,
    pub content: Vec<Text>,
}

/// The parse result for one passage file.
///
/// # Examples
///
/// ```rust
/// let passage = iridium::parse("It is dark.\n\n#(option \"light\") Strike a match #(end)").unwrap();
/// assert_eq!(passage.blocks.len(), 1);
/// assert_eq!(passage.targets().collect::<Vec<_>>(), vec!["light"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Passage {
    pub blocks: Vec<Block>,
    pub options: Vec<Choice>,
}

// ============================================================================
// CONSTRUCTORS AND QUERIES
// ============================================================================

impl Text {
    pub fn word(w: impl Into<String>) -> Self {
        Text::Word(w.into())
    }

    pub fn quote(children: Vec<Text>) -> Self {
        Text::Quote(children)
    }
}

impl Block {
    pub fn text(content: Vec<Text>) -> Self {
        Block::Text { content }
    }

    pub fn image(target: impl Into<String>, style: impl Into<String>) -> Self {
        Block::Image {
            target: target.into(),
            style: style.into(),
        }
    }
}

impl Choice {
    pub fn new(target: impl Into<String>, content: Vec<Text>) -> Self {
        Self {
            target: target.into(),
            content,
        }
    }
}

impl Passage {
    /// A passage without options ends the story.
    pub fn is_terminal(&self) -> bool {
        self.options.is_empty()
    }

    /// Paragraph contents, skipping images.
    pub fn paragraphs(&self) -> impl Iterator<Item = &[Text]> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Text { content } => Some(content.as_slice()),
            Block::Image { .. } => None,
        })
    }

    /// Option targets in presentation order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.target.as_str())
    }
}
