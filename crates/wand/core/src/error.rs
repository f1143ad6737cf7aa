//! Configuration error taxonomy.
//!
//! Every variant names the YAML path of the offending value so that the
//! message can be shown verbatim to an operator in chat or in the log.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors produced while validating or compiling a wand configuration.
///
/// All of them are recoverable: a reload that hits one is aborted and the
/// previously active configuration stays in place.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The name does not resolve against the host material catalog.
    #[error("{path}: unknown material '{name}'")]
    UnknownMaterial { path: String, name: String },

    /// The material resolves but cannot be used in this position (e.g. air).
    #[error("{path}: material '{material}' cannot be used here")]
    InvalidMaterial { path: String, material: String },

    /// Crafting shape row count or row width is out of bounds.
    #[error("{path}: {reason}")]
    InvalidShape { path: String, reason: String },

    /// A placeholder used in the shape has no entry in the ingredient map.
    #[error("{path}: placeholder '{key}' used in row {row} has no ingredient mapping")]
    MissingIngredientMapping { path: String, key: char, row: usize },

    /// An ingredient map key is not exactly one character.
    #[error("{path}: ingredient key '{key}' must be exactly one character")]
    InvalidIngredientKey { path: String, key: String },

    #[error("{path}: invalid range {min}..{max} ({})", bounds_hint(.lower, .upper))]
    InvalidRange {
        path: String,
        min: i64,
        max: i64,
        lower: i64,
        upper: Option<i64>,
    },

    #[error("{path}: chance {value} must be between 1 and 100")]
    InvalidPercentage { path: String, value: i64 },

    #[error("{path}: amount {value} must be between {lower} and {upper}")]
    InvalidQuantity {
        path: String,
        value: i64,
        lower: i64,
        upper: i64,
    },

    #[error("{path}: expected 1 or 2 ingredients, got {count}")]
    InvalidIngredientCount { path: String, count: usize },

    #[error("invalid namespaced key '{0}'")]
    InvalidKey(String),
}

impl ConfigError {
    /// Returns a static identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownMaterial { .. } => "CONFIG_UNKNOWN_MATERIAL",
            Self::InvalidMaterial { .. } => "CONFIG_INVALID_MATERIAL",
            Self::InvalidShape { .. } => "CONFIG_INVALID_SHAPE",
            Self::MissingIngredientMapping { .. } => "CONFIG_MISSING_INGREDIENT_MAPPING",
            Self::InvalidIngredientKey { .. } => "CONFIG_INVALID_INGREDIENT_KEY",
            Self::InvalidRange { .. } => "CONFIG_INVALID_RANGE",
            Self::InvalidPercentage { .. } => "CONFIG_INVALID_PERCENTAGE",
            Self::InvalidQuantity { .. } => "CONFIG_INVALID_QUANTITY",
            Self::InvalidIngredientCount { .. } => "CONFIG_INVALID_INGREDIENT_COUNT",
            Self::InvalidKey(_) => "CONFIG_INVALID_KEY",
        }
    }

    /// YAML path of the offending value, when the error is tied to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::UnknownMaterial { path, .. }
            | Self::InvalidMaterial { path, .. }
            | Self::InvalidShape { path, .. }
            | Self::MissingIngredientMapping { path, .. }
            | Self::InvalidIngredientKey { path, .. }
            | Self::InvalidRange { path, .. }
            | Self::InvalidPercentage { path, .. }
            | Self::InvalidQuantity { path, .. }
            | Self::InvalidIngredientCount { path, .. } => Some(path.as_str()),
            Self::InvalidKey(_) => None,
        }
    }
}

fn bounds_hint(lower: &i64, upper: &Option<i64>) -> String {
    match upper {
        Some(upper) => format!("expected {lower} <= min <= max <= {upper}"),
        None => format!("expected {lower} <= min <= max"),
    }
}
