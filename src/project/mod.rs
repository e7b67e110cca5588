//! Game project layout.
//!
//! ```text
//! game.json        configuration
//! game.html        page shell the bundle is injected into
//! passages/*.txt   one passage per file
//! assets/          optional static files
//! dist/            build output
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{err_msg, status::StatusSink, IridiumError};

pub mod config;
pub mod scaffold;
pub mod store;

pub use config::{GameConfig, Settings};
pub use store::PassageStore;

pub const SRC_JSON: &str = "game.json";
pub const SRC_HTML: &str = "game.html";
pub const SRC_PASSAGES: &str = "passages";
pub const SRC_ASSETS: &str = "assets";
pub const GAME_DIST: &str = "dist";

/// A project rooted at a directory. Nothing is read until asked for.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scaffolds a new project in `root`, which must not exist yet.
    pub fn init(root: impl Into<PathBuf>, status: &mut dyn StatusSink) -> Result<Self, IridiumError> {
        let project = Self::open(root);
        let root = project.root();
        if root.exists() {
            return Err(err_msg!(Config, "{} already exists", root.display())
                .with_help("choose a new folder name"));
        }

        status.status("Creating", &root.display().to_string());
        create_dir(root)?;
        project.create_file(SRC_HTML, scaffold::GAME_HTML, status)?;
        project.create_file(SRC_JSON, scaffold::GAME_JSON, status)?;

        status.status("Creating", &project.relative(SRC_PASSAGES));
        create_dir(&project.passages_dir())?;
        let store = project.store();
        for (name, text) in [
            ("start", scaffold::START_PASSAGE),
            ("next-screen", scaffold::NEXT_PASSAGE),
        ] {
            status.status("Creating", &format!("{}/{}.txt", project.relative(SRC_PASSAGES), name));
            store.write(name, text)?;
        }

        status.status("Creating", &project.relative(SRC_ASSETS));
        create_dir(&project.assets_dir())?;
        Ok(project)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(SRC_JSON)
    }

    pub fn html_path(&self) -> PathBuf {
        self.root.join(SRC_HTML)
    }

    pub fn passages_dir(&self) -> PathBuf {
        self.root.join(SRC_PASSAGES)
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.root.join(SRC_ASSETS)
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.root.join(GAME_DIST)
    }

    pub fn store(&self) -> PassageStore {
        PassageStore::new(self.passages_dir())
    }

    pub fn config(&self) -> Result<GameConfig, IridiumError> {
        GameConfig::load(&self.config_path())
    }

    /// The verbatim text of `game.json`.
    pub fn config_text(&self) -> Result<String, IridiumError> {
        let path = self.config_path();
        fs::read_to_string(&path)
            .map_err(|e| IridiumError::io(format!("cannot read {}", path.display()), e))
    }

    fn relative(&self, name: &str) -> String {
        self.root.join(name).display().to_string()
    }

    fn create_file(&self, name: &str, text: &str, status: &mut dyn StatusSink) -> Result<(), IridiumError> {
        let path = self.root.join(name);
        status.status("Creating", &path.display().to_string());
        fs::write(&path, text).map_err(|e| IridiumError::io(format!("cannot write {}", path.display()), e))
    }
}

pub(crate) fn create_dir(path: &Path) -> Result<(), IridiumError> {
    fs::create_dir_all(path).map_err(|e| IridiumError::io(format!("cannot create {}", path.display()), e))
}
