//! Handles all user-facing output for the CLI.
//!
//! Status lines and warnings go to stderr, coloured only when stderr is a
//! terminal. Command results (parsed passages, token dumps) go to stdout
//! uncoloured so they can be piped.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{
    ast::{Block, Passage, Text},
    status::StatusSink,
    syntax::Token,
};

// ============================================================================
// STATUS SINK
// ============================================================================

/// StderrStatus: right-aligned coloured status verbs, cargo style.
pub struct StderrStatus {
    stream: StandardStream,
}

impl StderrStatus {
    pub fn new() -> Self {
        Self {
            stream: StandardStream::stderr(stderr_color_choice()),
        }
    }
}

impl Default for StderrStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for StderrStatus {
    fn status(&mut self, action: &str, subject: &str) {
        let _ = self
            .stream
            .set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true));
        let _ = write!(self.stream, "{:>12}", action);
        let _ = self.stream.reset();
        let _ = writeln!(self.stream, " {}", subject);
    }
}

fn stderr_color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stderr) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

// ============================================================================
// CORE OUTPUT FUNCTIONS
// ============================================================================

pub fn print_warning(message: &str) {
    print_labelled("warning", Color::Yellow, message);
}

pub fn print_summary(failed: usize, warnings: usize, total: usize) {
    let (label, color) = if failed == 0 {
        ("ok", Color::Green)
    } else {
        ("failed", Color::Red)
    };
    print_labelled(
        label,
        color,
        &format!(
            "{} passages checked, {} with errors, {} warnings",
            total, failed, warnings
        ),
    );
}

fn print_labelled(label: &str, color: Color, message: &str) {
    let mut stderr = StandardStream::stderr(stderr_color_choice());
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stderr, "{}", label);
    let _ = stderr.reset();
    let _ = writeln!(stderr, ": {}", message);
}

// ============================================================================
// PASSAGE DUMPS
// ============================================================================

/// An indented outline of a passage, one node per line.
pub fn tree(passage: &Passage) -> String {
    let mut out = String::from("passage\n");
    for block in &passage.blocks {
        match block {
            Block::Text { content } => {
                out.push_str("  text\n");
                tree_text(&mut out, content, 2);
            }
            Block::Image { target, style } if style.is_empty() => {
                out.push_str(&format!("  image {:?}\n", target));
            }
            Block::Image { target, style } => {
                out.push_str(&format!("  image {:?} style {:?}\n", target, style));
            }
        }
    }
    for option in &passage.options {
        out.push_str(&format!("  option -> {:?}\n", option.target));
        tree_text(&mut out, &option.content, 2);
    }
    out
}

fn tree_text(out: &mut String, content: &[Text], depth: usize) {
    let pad = "  ".repeat(depth);
    for text in content {
        match text {
            Text::Word(w) => out.push_str(&format!("{}word {:?}\n", pad, w)),
            Text::Quote(children) => {
                out.push_str(&format!("{}quote\n", pad));
                tree_text(out, children, depth + 1);
            }
        }
    }
}

/// One line per token: start line and column, byte range, then the token kind.
pub fn tokens(source: &str, tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| {
            let at = match t.span.line_col(source) {
                Some(((line, col), _)) => format!("{}:{}", line, col),
                None => "?".to_string(),
            };
            format!(
                "{:<8} {:>5}..{:<5} {}\n",
                at,
                t.span.start,
                t.span.end,
                t.kind.describe()
            )
        })
        .collect()
}
