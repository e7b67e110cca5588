//! Defines the command-line arguments and subcommands for the Iridium CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "iridium",
    version,
    about = "Write branching stories as plain-text passages, then play or bundle them."
)]
pub struct IridiumArgs {
    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new game project.
    Init {
        /// The folder to create; it must not exist.
        #[arg(required = true)]
        folder: PathBuf,
    },
    /// Bundle the project into dist/game.html.
    Build {
        /// The project folder.
        #[arg(default_value = ".")]
        folder: PathBuf,
    },
    /// Play the game in the terminal.
    Run {
        /// The project folder.
        #[arg(default_value = ".")]
        folder: PathBuf,
    },
    /// Parse every passage and report errors and dangling options.
    Check {
        /// The project folder.
        #[arg(default_value = ".")]
        folder: PathBuf,
    },
    /// Parse a single passage file and print the result.
    Parse {
        /// The passage file to parse.
        #[arg(required = true)]
        file: PathBuf,
        /// How to print the parsed passage.
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// The document model as JSON.
    Json,
    /// The document model as YAML.
    Yaml,
    /// An indented outline.
    Tree,
    /// Normalized passage markup.
    Source,
    /// The scanner's token stream, one token per line.
    Tokens,
}
