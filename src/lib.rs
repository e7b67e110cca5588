pub use crate::{
    ast::{Block, Choice, Passage, Text},
    diagnostics::{print_error, ErrorContext, ErrorType, IridiumError},
    syntax::{parse, parse_named, Span},
};

pub mod ast;
pub mod bundle;
pub mod cli;
pub mod diagnostics;
pub mod project;
pub mod runner;
pub mod status;
pub mod syntax;
