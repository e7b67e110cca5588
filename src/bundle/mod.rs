//! Bundling a project into a single playable page.
//!
//! `build` compiles every passage to JavaScript, then copies the project's
//! HTML shell to `dist/game.html` with the runtime, the compiled content, the
//! game configuration and a bootstrap call inserted just before `</body>`.
//! A non-empty `assets/` directory is copied to `dist/assets/`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use regex::Regex;
use walkdir::WalkDir;

use crate::{
    err_msg,
    project::{create_dir, PassageStore, Project, GAME_DIST, SRC_ASSETS, SRC_HTML},
    status::StatusSink,
    IridiumError,
};

pub mod codegen;

/// The `io` and `engine` page runtime.
pub const RUNTIME_JS: &str = include_str!("runtime.js");

const BOOTSTRAP_JS: &str =
    "document.querySelector('head > title').innerText = game.title; engine.run(game, content);";

lazy_static! {
    static ref BODY_CLOSE: Regex = Regex::new(r"(?i)</body\s*>").unwrap();
}

/// Parses every passage in the store and generates the `content` table.
pub fn compile(store: &PassageStore, status: &mut dyn StatusSink) -> Result<String, IridiumError> {
    let mut passages = Vec::new();
    for name in store.names()? {
        status.status("Processing", &name);
        let passage = store.load(&name)?;
        passages.push((name, passage));
    }
    Ok(codegen::content_table(
        passages.iter().map(|(name, passage)| (name.as_str(), passage)),
    ))
}

/// Inserts the game scripts into `shell` before its closing body tag.
pub fn inject(shell: &str, content_js: &str, game_json: &str) -> Result<String, IridiumError> {
    let Some(close) = BODY_CLOSE.find(shell) else {
        return Err(err_msg!(Config, "{} has no </body> tag to insert the game before", SRC_HTML)
            .with_help("restore the closing </body> tag in game.html"));
    };

    let (head, tail) = shell.split_at(close.start());
    let mut page = String::with_capacity(shell.len() + RUNTIME_JS.len() + content_js.len() + game_json.len() + 256);
    page.push_str(head);
    page.push_str("\n<script>\n");
    page.push_str(RUNTIME_JS);
    page.push_str("</script>\n<script>\n");
    page.push_str(content_js);
    page.push_str("</script>\n<script>\nconst game = ");
    page.push_str(game_json.trim_end());
    page.push_str(";\n</script>\n<script> ");
    page.push_str(BOOTSTRAP_JS);
    page.push_str(" </script>\n");
    page.push_str(tail);
    Ok(page)
}

/// Builds `dist/` for the project and returns the path of the written page.
pub fn build(project: &Project, status: &mut dyn StatusSink) -> Result<PathBuf, IridiumError> {
    status.status("Compiling", "passages");
    let content_js = compile(&project.store(), status)?;

    // Validates the configuration before anything is written.
    project.config()?;
    let game_json = project.config_text()?;
    let shell_path = project.html_path();
    let shell = fs::read_to_string(&shell_path)
        .map_err(|e| IridiumError::io(format!("cannot read {}", shell_path.display()), e))?;
    let page = inject(&shell, &content_js, &game_json)?;

    let dist = project.dist_dir();
    if dist.exists() {
        fs::remove_dir_all(&dist)
            .map_err(|e| IridiumError::io(format!("cannot remove {}", dist.display()), e))?;
    }
    create_dir(&dist)?;

    status.status("Creating", &format!("{}/{}", GAME_DIST, SRC_HTML));
    let page_path = dist.join(SRC_HTML);
    fs::write(&page_path, page)
        .map_err(|e| IridiumError::io(format!("cannot write {}", page_path.display()), e))?;

    let assets = project.assets_dir();
    if has_entries(&assets) {
        status.status("Creating", &format!("{}/{}", GAME_DIST, SRC_ASSETS));
        copy_dir(&assets, &dist.join(SRC_ASSETS))?;
    }
    Ok(page_path)
}

fn has_entries(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Recursively copies `from` into `to`, creating directories as needed.
fn copy_dir(from: &Path, to: &Path) -> Result<(), IridiumError> {
    for entry in WalkDir::new(from) {
        let entry = entry.map_err(|e| err_msg!(Io, "cannot walk {}: {}", from.display(), e))?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| err_msg!(Io, "cannot copy {}: {}", entry.path().display(), e))?;
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            create_dir(&target)?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target).map_err(|e| {
                IridiumError::io(format!("cannot copy {}", entry.path().display()), e)
            })?;
        }
    }
    Ok(())
}
