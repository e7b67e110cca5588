//! Text renderings of the document model: plain text for terminals, HTML for
//! the bundled page, and passage markup for round-tripping.

use std::fmt;

use super::{Block, Choice, Passage, Text};

/// Words joined by single spaces, quotations wrapped in `"`.
pub fn plain(content: &[Text]) -> String {
    join(content, &|children| format!("\"{}\"", plain(children)))
}

/// Like [`plain`], but quotations become `<q>` elements.
///
/// Words are emitted verbatim so authors can use inline markup.
pub fn html(content: &[Text]) -> String {
    join(content, &|children| format!("<q>{}</q>", html(children)))
}

/// Passage markup for inline content.
///
/// Like [`plain`], except that a closing mark which would directly follow an
/// empty quotation is set off by a space; `""` followed by `"` would read back
/// as a nested opening mark.
pub fn markup(content: &[Text]) -> String {
    markup_loose(content).0
}

/// Renders `content`, also reporting whether it ends in a loose quotation: an
/// empty one, or one whose own closing mark had to be spaced.
fn markup_loose(content: &[Text]) -> (String, bool) {
    let mut out = String::new();
    let mut loose = false;
    for (i, text) in content.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        loose = match text {
            Text::Word(w) => {
                out.push_str(w);
                false
            }
            Text::Quote(children) if children.is_empty() => {
                out.push_str("\"\"");
                true
            }
            Text::Quote(children) => {
                let (inner, inner_loose) = markup_loose(children);
                out.push('"');
                out.push_str(&inner);
                if inner_loose {
                    out.push(' ');
                }
                out.push('"');
                inner_loose
            }
        };
    }
    (out, loose)
}

fn join(content: &[Text], quote: &dyn Fn(&[Text]) -> String) -> String {
    content
        .iter()
        .map(|t| match t {
            Text::Word(w) => w.clone(),
            Text::Quote(children) => quote(children),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", plain(std::slice::from_ref(self)))
    }
}

impl Block {
    /// The block in passage markup.
    pub fn to_source(&self) -> String {
        match self {
            Block::Text { content } => markup(content),
            Block::Image { target, .. } => format!("#(image \"{}\")", target),
        }
    }
}

impl Choice {
    /// The option in passage markup.
    pub fn to_source(&self) -> String {
        if self.content.is_empty() {
            format!("#(option \"{}\") #(end)", self.target)
        } else {
            format!("#(option \"{}\") {} #(end)", self.target, markup(&self.content))
        }
    }
}

impl Passage {
    /// Re-emits the passage as markup; parsing the result yields an equal passage.
    pub fn to_source(&self) -> String {
        self.blocks
            .iter()
            .map(Block::to_source)
            .chain(self.options.iter().map(Choice::to_source))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
