//! Bot settings, read from a TOML file.
//!
//! ```toml
//! bot_name = "Chatbot"
//! user_name = "User"
//! knowledge_file = "knowledge.ini"
//! log_filter = "warn"
//! ```
//!
//! Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Names, startup knowledge, and log verbosity for one chatbot session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Printed before each of the bot's lines.
    pub bot_name: String,

    /// Printed as the input prompt.
    pub user_name: String,

    /// Knowledge file loaded before the first prompt.
    pub knowledge_file: Option<PathBuf>,

    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot_name: "Chatbot".to_string(),
            user_name: "User".to_string(),
            knowledge_file: None,
            log_filter: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Create settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the knowledge file to preload.
    pub fn with_knowledge_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.knowledge_file = Some(path.into());
        self
    }
}
