//! Terminal playthrough of a game project.
//!
//! The runner starts at the configured initial passage, prints its text and
//! a numbered menu of options, and follows the player's choice until a
//! passage without options is reached or the player quits. Input and output
//! are generic so sessions can be scripted.

use std::io::{BufRead, Write};

use crate::{
    ast::{render, Block, Passage},
    project::{GameConfig, Project},
    IridiumError,
};

pub mod wrap;

use wrap::{wrap, MAX_WIDTH};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";
const OPTION_INDENT: usize = 5;

/// How a playthrough finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A passage without options was reached.
    Ended,
    /// The player typed `q` or closed the input.
    Quit,
}

pub struct Runner<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Runner<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear_screen: false,
        }
    }

    /// Clears the screen before the title and between passages.
    pub fn clear_screen(mut self, clear: bool) -> Self {
        self.clear_screen = clear;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Plays the project's game from its initial passage.
    pub fn run(&mut self, project: &Project) -> Result<Outcome, IridiumError> {
        let config = project.config()?;
        let store = project.store();
        self.play(&config, |name| store.load(name))
    }

    /// Plays a game whose passages come from `load`.
    pub fn play<F>(&mut self, config: &GameConfig, mut load: F) -> Result<Outcome, IridiumError>
    where
        F: FnMut(&str) -> Result<Passage, IridiumError>,
    {
        let mut current = config.initial_passage()?.to_string();
        self.title(config).map_err(terminal)?;

        loop {
            let passage = load(&current)?;
            self.show(&passage).map_err(terminal)?;
            if passage.is_terminal() {
                return Ok(Outcome::Ended);
            }
            match self.choose(&passage)? {
                Some(index) => current = passage.options[index].target.clone(),
                None => {
                    writeln!(self.output, "Bailing").map_err(terminal)?;
                    return Ok(Outcome::Quit);
                }
            }
            self.clear().map_err(terminal)?;
        }
    }

    fn clear(&mut self) -> std::io::Result<()> {
        if self.clear_screen {
            write!(self.output, "{}", CLEAR_SCREEN)?;
        }
        Ok(())
    }

    fn title(&mut self, config: &GameConfig) -> std::io::Result<()> {
        self.clear()?;
        writeln!(self.output, "{}", config.title)?;
        if !config.subtitle.is_empty() {
            writeln!(self.output, "{}", config.subtitle)?;
        }
        if !config.author.is_empty() {
            writeln!(self.output, "By {}", config.author)?;
        }
        writeln!(self.output)
    }

    fn show(&mut self, passage: &Passage) -> std::io::Result<()> {
        for block in &passage.blocks {
            match block {
                Block::Text { content } => {
                    for line in wrap(&render::plain(content), 0, MAX_WIDTH) {
                        writeln!(self.output, "{}", line)?;
                    }
                }
                Block::Image { target, .. } => writeln!(self.output, "[image: {}]", target)?,
            }
            writeln!(self.output)?;
        }

        if passage.is_terminal() {
            return self.output.flush();
        }
        for (i, option) in passage.options.iter().enumerate() {
            write!(self.output, " {:>2}. ", i + 1)?;
            for line in wrap(&render::plain(&option.content), OPTION_INDENT, MAX_WIDTH) {
                writeln!(self.output, "{}", line)?;
            }
        }
        writeln!(self.output)
    }

    /// Prompts until a valid choice is made. `None` means the player quit.
    fn choose(&mut self, passage: &Passage) -> Result<Option<usize>, IridiumError> {
        let count = passage.options.len();
        loop {
            write!(self.output, "? ").map_err(terminal)?;
            self.output.flush().map_err(terminal)?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|e| IridiumError::io("cannot read player input", e))?;
            if read == 0 {
                return Ok(None);
            }

            match line.trim() {
                "q" => return Ok(None),
                "" if count == 1 => return Ok(Some(0)),
                input => {
                    if let Ok(n) = input.parse::<usize>() {
                        if (1..=count).contains(&n) {
                            return Ok(Some(n - 1));
                        }
                    }
                }
            }
        }
    }
}

fn terminal(e: std::io::Error) -> IridiumError {
    IridiumError::io("cannot write to the terminal", e)
}
