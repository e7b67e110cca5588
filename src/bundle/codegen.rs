//! JavaScript generation for the page engine.
//!
//! Every passage becomes one function in the `content` table. The function
//! writes the passage's blocks through the `io` helpers and registers one
//! choice per option; choosing it asks the `engine` to move to the target.

use crate::ast::{render, Block, Passage};

/// A JavaScript string literal.
///
/// JSON escaping plus `</` so passage text cannot close the surrounding
/// `<script>` element.
pub fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string())
        .to_string()
        .replace("</", "<\\/")
}

/// The `content["name"] = (function(state) { ... });` entry for one passage.
pub fn passage_function(name: &str, passage: &Passage) -> String {
    let mut body = String::from("let c = io.choices(); ");
    for block in &passage.blocks {
        match block {
            Block::Text { content } => {
                body.push_str(&format!("io.p({}); ", js_string(&render::html(content))));
            }
            Block::Image { target, style } => {
                body.push_str(&format!("io.img({}, {}); ", js_string(target), js_string(style)));
            }
        }
    }
    for option in &passage.options {
        body.push_str(&format!(
            "c = c.option({}, function() {{ engine.goPassage(state, content, {}, true); }}); ",
            js_string(&render::html(&option.content)),
            js_string(&option.target)
        ));
    }
    body.push_str("c.show();");
    format!("content[{}] = (function(state) {{ {} }});", js_string(name), body)
}

/// The `content` factory holding every passage function, in the order given.
pub fn content_table<'a>(passages: impl IntoIterator<Item = (&'a str, &'a Passage)>) -> String {
    let entries = passages
        .into_iter()
        .map(|(name, passage)| passage_function(name, passage))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "const content = function(fn) {{ let content = {{}};\n{}\nreturn content;}}\n",
        entries
    )
}
