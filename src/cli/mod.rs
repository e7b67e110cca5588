//! The Iridium Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::{
    collections::BTreeSet,
    fs,
    io::{self, Write},
    path::Path,
    process,
};

use clap::Parser;

use crate::{
    bundle,
    cli::{
        args::{Command, Format, IridiumArgs},
        output::{print_summary, print_warning, StderrStatus},
    },
    err_msg, parse_named, print_error,
    project::Project,
    runner::Runner,
    status::StatusSink,
    syntax::Scanner,
    IridiumError,
};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = IridiumArgs::parse();

    let result = match args.command {
        Command::Init { folder } => handle_init(&folder),
        Command::Build { folder } => handle_build(&folder),
        Command::Run { folder } => handle_run(&folder),
        Command::Check { folder } => handle_check(&folder),
        Command::Parse { file, format } => handle_parse(&file, format),
    };

    if let Err(e) = result {
        print_error(e);
        process::exit(1);
    }
}

fn handle_init(folder: &Path) -> Result<(), IridiumError> {
    let mut status = StderrStatus::new();
    Project::init(folder, &mut status)?;
    Ok(())
}

fn handle_build(folder: &Path) -> Result<(), IridiumError> {
    let mut status = StderrStatus::new();
    let page = bundle::build(&Project::open(folder), &mut status)?;
    status.status("Finished", &page.display().to_string());
    Ok(())
}

fn handle_run(folder: &Path) -> Result<(), IridiumError> {
    let project = Project::open(folder);
    let clear = project.config()?.config.clear && atty::is(atty::Stream::Stdout);
    let stdin = io::stdin();
    let mut runner = Runner::new(stdin.lock(), io::stdout().lock()).clear_screen(clear);
    runner.run(&project)?;
    Ok(())
}

/// Parses every passage, printing each failure, then warns about options
/// whose target does not exist.
fn handle_check(folder: &Path) -> Result<(), IridiumError> {
    let project = Project::open(folder);
    let config = project.config()?;
    let store = project.store();
    let names = store.names()?;
    let known: BTreeSet<&str> = names.iter().map(String::as_str).collect();

    let mut failed = 0;
    let mut warnings = 0;
    for name in &names {
        let passage = match store.load(name) {
            Ok(passage) => passage,
            Err(e) => {
                print_error(e);
                failed += 1;
                continue;
            }
        };
        for target in passage.targets() {
            if !known.contains(target) {
                print_warning(&format!(
                    "passage '{}' has an option to missing passage '{}'",
                    name, target
                ));
                warnings += 1;
            }
        }
    }

    let init = config.initial_passage()?;
    if !known.contains(init) {
        print_warning(&format!("initial passage '{}' does not exist", init));
        warnings += 1;
    }

    print_summary(failed, warnings, names.len());
    if failed > 0 {
        return Err(err_msg!(
            Structural,
            "{} of {} passages failed to parse",
            failed,
            names.len()
        ));
    }
    Ok(())
}

fn handle_parse(file: &Path, format: Format) -> Result<(), IridiumError> {
    let source = fs::read_to_string(file)
        .map_err(|e| IridiumError::io(format!("cannot read {}", file.display()), e))?;

    let passage = || parse_named(&file.display().to_string(), &source);
    let rendered = match format {
        Format::Tokens => output::tokens(&source, &Scanner::tokenize(&source)),
        Format::Json => serialized(serde_json::to_string_pretty(&passage()?).map(|s| s + "\n"))?,
        Format::Yaml => serialized(serde_yaml::to_string(&passage()?))?,
        Format::Tree => output::tree(&passage()?),
        Format::Source => passage()?.to_source() + "\n",
    };

    io::stdout()
        .write_all(rendered.as_bytes())
        .map_err(|e| IridiumError::io("cannot write to stdout", e))
}

fn serialized<E>(result: Result<String, E>) -> Result<String, IridiumError>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.map_err(|e| IridiumError::Config {
        message: format!("cannot serialize passage: {}", e),
        ctx: crate::ErrorContext::none(),
        source: Some(Box::new(e)),
    })
}
