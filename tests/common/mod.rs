// Shared fixtures for integration tests: small game projects in temp directories.

#![allow(dead_code)]

use std::{fs, path::Path};

use tempfile::TempDir;

pub const GAME_JSON: &str = r#"{
    "title": "The Cellar",
    "subtitle": "A short descent",
    "author": "Test Author",
    "init": "start",
    "config": { "clear": false, "debug": false }
}
"#;

pub const SHELL: &str = "<!DOCTYPE html>\n<html>\n<head><title>x</title></head>\n<body>\n<div id=\"play\"></div>\n</body>\n</html>\n";

/// A temp project with the given passages; returns the guard and the project root.
pub fn project(passages: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_project(dir.path(), passages);
    dir
}

pub fn write_project(root: &Path, passages: &[(&str, &str)]) {
    fs::write(root.join("game.json"), GAME_JSON).unwrap();
    fs::write(root.join("game.html"), SHELL).unwrap();
    fs::create_dir_all(root.join("passages")).unwrap();
    for (name, text) in passages {
        fs::write(root.join("passages").join(format!("{}.txt", name)), text).unwrap();
    }
}

/// A two-passage game: `start` offers one option leading to `end`.
pub fn small_game() -> TempDir {
    project(&[
        ("start", "You stand at the top of the stairs.\n\n#(option \"end\") Go down #(end)"),
        ("end", "It is dark. The story ends."),
    ])
}
