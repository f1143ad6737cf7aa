//! Error types raised by the settings store.

use std::path::PathBuf;

use thiserror::Error;
use wand_core::{ConfigError, WandType};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access {}: {source}", .file.display())]
    Io {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML or does not have the expected shape.
    #[error("malformed configuration document {}: {detail}", .file.display())]
    Parse { file: PathBuf, detail: String },

    #[error("{source}")]
    Invalid {
        wand: WandType,
        #[source]
        source: ConfigError,
    },
}

impl SettingsError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "SETTINGS_IO",
            Self::Parse { .. } => "SETTINGS_PARSE",
            Self::Invalid { source, .. } => source.error_code(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;
