//! Unified error types surfaced by the plugin runtime.
//!
//! Wraps failures from the settings store, the compiler and optional plugin
//! integrations so the command surface can report them with consistent
//! context.
use thiserror::Error;
use wand_content::SettingsError;
use wand_core::{ConfigError, WandType};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("failed to compile {wand} wand: {source}")]
    Compile {
        wand: WandType,
        #[source]
        source: ConfigError,
    },

    #[error("no settings are active; the plugin is not enabled")]
    NotEnabled,
}

impl RuntimeError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Settings(e) => e.error_code(),
            Self::Compile { source, .. } => source.error_code(),
            Self::NotEnabled => "RUNTIME_NOT_ENABLED",
        }
    }
}

/// Failure talking to an optional external plugin.
///
/// Never fatal: the wand that depends on the integration is left out of the
/// active mapping and everything else keeps working.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrationError {
    #[error("unable to find {plugin}")]
    PluginNotFound { plugin: &'static str },

    #[error("{plugin} is incompatible: {reason}")]
    ExternalPluginIncompatible {
        plugin: &'static str,
        reason: String,
    },
}

/// Failure reading or writing a named field on an [`ExtensionPoint`].
///
/// [`ExtensionPoint`]: crate::integrations::ExtensionPoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("no field named '{0}'")]
    Missing(String),

    #[error("field '{field}' expects {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
}
