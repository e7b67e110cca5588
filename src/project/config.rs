//! `game.json`: title, credits, the initial passage and runtime flags.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{err_msg, IridiumError};

/// Parsed `game.json`. Missing fields take their defaults; unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    /// Name of the first passage.
    pub init: String,
    pub config: Settings,
}

/// Runtime flags passed through to the page engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Clear the screen between passages instead of appending.
    pub clear: bool,
    pub debug: bool,
}

impl GameConfig {
    pub fn from_json(text: &str) -> Result<Self, IridiumError> {
        serde_json::from_str(text).map_err(|e| IridiumError::Config {
            message: format!("game.json is not valid: {}", e),
            ctx: crate::ErrorContext::none(),
            source: Some(Box::new(e)),
        })
    }

    pub fn load(path: &Path) -> Result<Self, IridiumError> {
        let text = fs::read_to_string(path)
            .map_err(|e| IridiumError::io(format!("cannot read {}", path.display()), e))?;
        Self::from_json(&text)
    }

    /// The initial passage name, which must be set before a game can start.
    pub fn initial_passage(&self) -> Result<&str, IridiumError> {
        if self.init.trim().is_empty() {
            return Err(err_msg!(Config, "game.json does not name an initial passage")
                .with_help("add \"init\": \"start\" to game.json"));
        }
        Ok(&self.init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorType;

    #[test]
    fn test_full_config() {
        let config = GameConfig::from_json(
            r#"{"title": "Cave", "subtitle": "A descent", "author": "Ada",
                "init": "start", "config": {"clear": true, "debug": false}}"#,
        )
        .unwrap();
        assert_eq!(config.title, "Cave");
        assert_eq!(config.initial_passage().unwrap(), "start");
        assert!(config.config.clear);
        assert!(!config.config.debug);
    }

    #[test]
    fn test_missing_fields_default() {
        let config = GameConfig::from_json(r#"{"title": "Cave", "global": {"x": 1}}"#).unwrap();
        assert_eq!(config.author, "");
        assert_eq!(config.config, Settings::default());
        let err = config.initial_passage().unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Config);
    }

    #[test]
    fn test_malformed_json() {
        let err = GameConfig::from_json("{\"title\": ").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Config);
        assert!(std::error::Error::source(&err).is_some());
    }
}
