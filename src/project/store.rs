//! Named passage files in a project's `passages/` directory.
//!
//! A passage's name is its file stem: `passages/cellar.txt` holds `cellar`.
//! Names are flat; anything that could escape the directory is rejected.

use std::{fs, path::PathBuf};

use walkdir::WalkDir;

use crate::{ast::Passage, err_msg, syntax::parse_named, IridiumError};

pub const PASSAGE_EXTENSION: &str = "txt";

#[derive(Debug, Clone)]
pub struct PassageStore {
    dir: PathBuf,
}

impl PassageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// All passage names, sorted. Subdirectories are not searched.
    pub fn names(&self) -> Result<Vec<String>, IridiumError> {
        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                err_msg!(Io, "cannot list {}: {}", self.dir.display(), e)
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PASSAGE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.path(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// The file backing `name`.
    pub fn path(&self, name: &str) -> Result<PathBuf, IridiumError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{}.{}", name, PASSAGE_EXTENSION)))
    }

    /// Raw passage text, without any leading byte-order mark.
    pub fn read(&self, name: &str) -> Result<String, IridiumError> {
        let path = self.path(name)?;
        let text = fs::read_to_string(&path)
            .map_err(|e| IridiumError::io(format!("cannot read passage '{}'", name), e))?;
        Ok(match text.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => text,
        })
    }

    pub fn write(&self, name: &str, text: &str) -> Result<(), IridiumError> {
        let path = self.path(name)?;
        fs::write(&path, text)
            .map_err(|e| IridiumError::io(format!("cannot write passage '{}'", name), e))
    }

    /// Reads and parses a passage; parse errors carry the file's text for display.
    pub fn load(&self, name: &str) -> Result<Passage, IridiumError> {
        let text = self.read(name)?;
        parse_named(&format!("{}.{}", name, PASSAGE_EXTENSION), &text)
    }
}

fn validate_name(name: &str) -> Result<(), IridiumError> {
    let bad = name.trim().is_empty()
        || name.contains("..")
        || name.contains('/')
        || name.contains('\\')
        || name.contains(std::path::MAIN_SEPARATOR);
    if bad {
        return Err(err_msg!(Config, "invalid passage name '{}'", name)
            .with_help("passage names are plain file stems such as `start` or `cellar`"));
    }
    Ok(())
}
