// tests/project_tests.rs
//
// Project layout, passage store, scaffolding, bundling and terminal play on
// real temporary directories.

mod common;

use std::{fs, io::Cursor};

use iridium::{
    bundle,
    project::Project,
    runner::{Outcome, Runner},
    status::StatusLog,
    ErrorType,
};

// ---
// Passage store
// ---

#[test]
fn test_store_names_are_sorted_txt_stems() {
    let dir = common::project(&[("zeta", "z"), ("alpha", "a"), ("mid", "m")]);
    let passages = dir.path().join("passages");
    fs::write(passages.join("notes.md"), "not a passage").unwrap();
    fs::create_dir(passages.join("drafts")).unwrap();
    fs::write(passages.join("drafts").join("hidden.txt"), "nested").unwrap();

    let store = Project::open(dir.path()).store();
    assert_eq!(store.names().unwrap(), vec!["alpha", "mid", "zeta"]);
    assert!(store.contains("mid"));
    assert!(!store.contains("hidden"));
}

#[test]
fn test_store_read_write() {
    let dir = common::project(&[]);
    let store = Project::open(dir.path()).store();
    store.write("hall", "A long hall.").unwrap();
    assert_eq!(store.read("hall").unwrap(), "A long hall.");
    assert_eq!(store.load("hall").unwrap().blocks.len(), 1);
}

#[test]
fn test_store_strips_byte_order_mark() {
    let dir = common::project(&[("bom", "\u{feff}Hello.")]);
    let store = Project::open(dir.path()).store();
    assert_eq!(store.read("bom").unwrap(), "Hello.");
}

#[test]
fn test_store_rejects_escaping_names() {
    let dir = common::project(&[]);
    let store = Project::open(dir.path()).store();
    let err = store.write("../game", "oops").unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Config);
    assert!(!dir.path().join("game.txt").exists());
}

#[test]
fn test_store_missing_passage_is_io_error() {
    let dir = common::project(&[]);
    let err = Project::open(dir.path()).store().read("nowhere").unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Io);
}

#[test]
fn test_load_attaches_file_name_to_parse_errors() {
    use miette::Diagnostic;

    let dir = common::project(&[("broken", "#(option \"x\") never closed")]);
    let err = Project::open(dir.path()).store().load("broken").unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Unterminated);
    assert!(err.source_code().is_some());
}

// ---
// Scaffolding
// ---

#[test]
fn test_init_scaffolds_a_playable_project() {
    let parent = tempfile::tempdir().unwrap();
    let root = parent.path().join("game");
    let mut log = StatusLog::new();
    let project = Project::init(&root, &mut log).unwrap();

    assert!(root.join("game.html").is_file());
    assert!(root.join("game.json").is_file());
    assert!(root.join("assets").is_dir());
    assert!(log.contains("game.json"));

    let config = project.config().unwrap();
    assert_eq!(config.init, "start");
    let store = project.store();
    let start = store.load("start").unwrap();
    for target in start.targets() {
        assert!(store.contains(target), "dangling option {target}");
    }
}

#[test]
fn test_init_refuses_existing_folder() {
    let dir = tempfile::tempdir().unwrap();
    let err = Project::init(dir.path(), &mut StatusLog::new()).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Config);
}

// ---
// Bundling
// ---

#[test]
fn test_build_writes_page() {
    let dir = common::small_game();
    let mut log = StatusLog::new();
    let page_path = bundle::build(&Project::open(dir.path()), &mut log).unwrap();

    assert_eq!(page_path, dir.path().join("dist").join("game.html"));
    let page = fs::read_to_string(&page_path).unwrap();
    assert!(page.contains("const engine ="));
    assert!(page.contains("content[\"start\"] = (function(state) {"));
    assert!(page.contains("engine.goPassage(state, content, \"end\", true)"));
    assert!(page.contains("\"title\": \"The Cellar\""));
    assert!(page.find("engine.run(game, content)").unwrap() < page.find("</body>").unwrap());
    assert!(log.contains("Processing end"));
    assert!(log.contains("Creating dist/game.html"));
    assert!(!dir.path().join("dist").join("assets").exists());
}

#[test]
fn test_build_copies_assets_and_recreates_dist() {
    let dir = common::small_game();
    let assets = dir.path().join("assets").join("img");
    fs::create_dir_all(&assets).unwrap();
    fs::write(assets.join("door.png"), b"png").unwrap();
    let dist = dir.path().join("dist");
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("stale.txt"), "old").unwrap();

    bundle::build(&Project::open(dir.path()), &mut StatusLog::new()).unwrap();

    assert_eq!(fs::read(dist.join("assets").join("img").join("door.png")).unwrap(), b"png");
    assert!(!dist.join("stale.txt").exists());
}

#[test]
fn test_build_stops_on_parse_error() {
    let dir = common::project(&[("start", "#(bogus)")]);
    let err = bundle::build(&Project::open(dir.path()), &mut StatusLog::new()).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Structural);
    assert!(!dir.path().join("dist").exists());
}

#[test]
fn test_build_requires_body_tag() {
    let dir = common::small_game();
    fs::write(dir.path().join("game.html"), "<html></html>").unwrap();
    let err = bundle::build(&Project::open(dir.path()), &mut StatusLog::new()).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Config);
}

// ---
// Terminal play
// ---

#[test]
fn test_run_project_to_the_end() {
    let dir = common::small_game();
    let mut runner = Runner::new(Cursor::new("\n"), Vec::new());
    let outcome = runner.run(&Project::open(dir.path())).unwrap();
    assert_eq!(outcome, Outcome::Ended);

    let output = String::from_utf8(runner.into_output()).unwrap();
    assert!(output.starts_with("The Cellar\nA short descent\nBy Test Author\n\n"));
    assert!(output.contains("  1. Go down\n"));
    assert!(output.ends_with("It is dark. The story ends.\n\n"));
}

#[test]
fn test_run_requires_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut runner = Runner::new(Cursor::new(""), Vec::new());
    let err = runner.run(&Project::open(dir.path())).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Io);
}
