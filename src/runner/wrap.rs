//! Greedy word wrapping by terminal display width.

use std::mem;

use unicode_width::UnicodeWidthStr;

/// Terminal width the runner wraps to.
pub const MAX_WIDTH: usize = 78;

/// Wraps `text` at whitespace so no line exceeds `width` display columns.
///
/// The first line is assumed to follow a prefix `indent` columns wide that the
/// caller prints; continuation lines are indented by `indent` spaces. A word
/// wider than the line is placed alone rather than split.
pub fn wrap(text: &str, indent: usize, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut used = indent;

    for word in text.split_whitespace() {
        let w = word.width();
        if !line.is_empty() && used + 1 + w > width {
            lines.push(mem::take(&mut line));
            used = indent;
        }
        if !line.is_empty() {
            line.push(' ');
            used += 1;
        }
        line.push_str(word);
        used += w;
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }

    let pad = " ".repeat(indent);
    for continuation in lines.iter_mut().skip(1) {
        continuation.insert_str(0, &pad);
    }
    lines
}
