//! Raw document access and default layering.

use std::path::Path;

use serde_yaml::{Mapping, Value};
use wand_core::{WandConfig, WandType};

use crate::error::{Result, SettingsError};
use crate::schema::{MergeRule, merge_rule};

/// Reads the settings file; a missing file is not an error.
pub(crate) fn read_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SettingsError::Io {
            file: path.to_path_buf(),
            source,
        }),
    }
}

/// Parses the document root, which must be a mapping (or empty).
pub(crate) fn parse_document(file: &Path, content: &str) -> Result<Mapping> {
    let root: Value = serde_yaml::from_str(content).map_err(|e| SettingsError::Parse {
        file: file.to_path_buf(),
        detail: e.to_string(),
    })?;
    match root {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(SettingsError::Parse {
            file: file.to_path_buf(),
            detail: format!("expected a mapping at the top level, found {}", kind(&other)),
        }),
    }
}

/// Deserializes one wand subtree, with every key the user left out taken
/// from the wand type's defaults.
pub(crate) fn wand_config(file: &Path, wand: WandType, user: Option<Value>) -> Result<WandConfig> {
    let parse_error = |e: serde_yaml::Error| SettingsError::Parse {
        file: file.to_path_buf(),
        detail: format!("{}: {e}", wand.config_key()),
    };

    let defaults = serde_yaml::to_value(wand.default_config()).map_err(parse_error)?;
    let value = match user {
        Some(user) => layer(defaults, user, ""),
        None => defaults,
    };
    serde_yaml::from_value(value).map_err(parse_error)
}

fn child_path(parent: &str, key: &Value) -> String {
    let key = key.as_str().unwrap_or_default();
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Layers `user` over `base` following the schema's merge rules.
fn layer(base: Value, user: Value, path: &str) -> Value {
    if user.is_null() {
        return base;
    }
    match (merge_rule(path), base, user) {
        (MergeRule::Merge, Value::Mapping(mut base), Value::Mapping(user)) => {
            for (key, value) in user {
                let path = child_path(path, &key);
                match base.get_mut(&key) {
                    Some(slot) => {
                        let existing = std::mem::take(slot);
                        *slot = layer(existing, value, &path);
                    }
                    None => {
                        base.insert(key, value);
                    }
                }
            }
            Value::Mapping(base)
        }
        (MergeRule::EachElement, Value::Sequence(base), Value::Sequence(user)) => {
            let template = base.into_iter().next();
            let element_path = format!("{path}[]");
            Value::Sequence(
                user.into_iter()
                    .map(|item| match &template {
                        Some(template) => layer(template.clone(), item, &element_path),
                        None => item,
                    })
                    .collect(),
            )
        }
        (_, _, user) => stringify_keys(user),
    }
}

/// YAML allows `1: STICK`; ingredient maps are keyed by strings.
fn stringify_keys(value: Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .into_iter()
                .map(|(key, value)| {
                    let key = match key {
                        Value::Number(n) => Value::String(n.to_string()),
                        Value::Bool(b) => Value::String(b.to_string()),
                        other => other,
                    };
                    (key, value)
                })
                .collect(),
        ),
        other => other,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
