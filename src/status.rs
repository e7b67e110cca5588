//! Progress reporting for long-running project commands.
//!
//! Library code reports what it is doing through a [`StatusSink`]; the CLI
//! supplies a coloured stderr sink and tests collect into a [`StatusLog`].

/// Receives one progress line per step, e.g. `("Creating", "dist/game.html")`.
pub trait StatusSink {
    fn status(&mut self, action: &str, subject: &str);
}

/// StatusLog: collects status lines as `"<action> <subject>"` strings.
#[derive(Debug, Default)]
pub struct StatusLog {
    pub lines: Vec<String>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl StatusSink for StatusLog {
    fn status(&mut self, action: &str, subject: &str) {
        if subject.is_empty() {
            self.lines.push(action.to_string());
        } else {
            self.lines.push(format!("{} {}", action, subject));
        }
    }
}
