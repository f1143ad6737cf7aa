//! Commented YAML output.
//!
//! `serde_yaml` drops comments when serializing, so the document is emitted
//! here by walking the serialized value tree. Every key documented in
//! [`crate::schema`] gets its comment lines right above it.

use serde_yaml::{Mapping, Sequence, Value};

use crate::schema::{field_doc, section_doc};
use crate::store::WandSettings;

const INDENT: &str = "  ";

/// Renders the whole settings document.
pub fn render_settings(settings: &WandSettings) -> Result<String, serde_yaml::Error> {
    let mut out = String::new();
    for (index, (wand, config)) in settings.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        for line in section_doc(wand) {
            comment(&mut out, 0, line);
        }
        out.push_str(wand.config_key());
        out.push(':');

        match serde_yaml::to_value(config)? {
            Value::Mapping(mapping) if !mapping.is_empty() => {
                out.push('\n');
                emit_mapping(&mut out, &mapping, 1, "")?;
            }
            other => {
                out.push(' ');
                out.push_str(&scalar(&other)?);
                out.push('\n');
            }
        }
    }
    Ok(out)
}

fn pad(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn comment(out: &mut String, depth: usize, line: &str) {
    pad(out, depth);
    out.push_str("# ");
    out.push_str(line);
    out.push('\n');
}

fn child_path(parent: &str, key: &Value) -> String {
    let key = key.as_str().unwrap_or_default();
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn emit_mapping(
    out: &mut String,
    mapping: &Mapping,
    depth: usize,
    parent: &str,
) -> Result<(), serde_yaml::Error> {
    for (key, value) in mapping {
        let path = child_path(parent, key);
        if let Some(doc) = field_doc(&path) {
            for line in doc.comment {
                comment(out, depth, line);
            }
        }
        pad(out, depth);
        out.push_str(&scalar(key)?);
        out.push(':');
        emit_nested(out, value, depth, &path)?;
    }
    Ok(())
}

/// Writes what follows `key:` or `-`.
fn emit_nested(
    out: &mut String,
    value: &Value,
    depth: usize,
    path: &str,
) -> Result<(), serde_yaml::Error> {
    match value {
        Value::Mapping(mapping) if !mapping.is_empty() => {
            out.push('\n');
            emit_mapping(out, mapping, depth + 1, path)
        }
        Value::Sequence(sequence) if !sequence.is_empty() => {
            out.push('\n');
            emit_sequence(out, sequence, depth + 1, path)
        }
        other => {
            out.push(' ');
            out.push_str(&scalar(other)?);
            out.push('\n');
            Ok(())
        }
    }
}

fn emit_sequence(
    out: &mut String,
    sequence: &Sequence,
    depth: usize,
    path: &str,
) -> Result<(), serde_yaml::Error> {
    let element_path = format!("{path}[]");
    for item in sequence {
        match item {
            Value::Mapping(mapping) if !mapping.is_empty() => {
                // The first key shares the dash line; `- ` is as wide as one indent.
                let mut element = String::new();
                emit_mapping(&mut element, mapping, depth + 1, &element_path)?;
                pad(out, depth);
                out.push_str("- ");
                out.push_str(&element[INDENT.len() * (depth + 1)..]);
            }
            other => {
                pad(out, depth);
                out.push('-');
                emit_nested(out, other, depth, &element_path)?;
            }
        }
    }
    Ok(())
}

fn scalar(value: &Value) -> Result<String, serde_yaml::Error> {
    match value {
        Value::String(s) if s.contains(['\n', '\r', '\t']) => Ok(double_quoted(s)),
        other => Ok(serde_yaml::to_string(other)?.trim_end().to_string()),
    }
}

fn double_quoted(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;
    use wand_core::{WandConfig, WandType};

    use super::*;

    fn reparse(text: &str) -> Vec<(WandType, WandConfig)> {
        let root: Mapping = serde_yaml::from_str(text).unwrap();
        WandType::iter()
            .map(|wand| {
                let value = root[wand.config_key()].clone();
                (wand, serde_yaml::from_value(value).unwrap())
            })
            .collect()
    }

    #[test]
    fn defaults_render_and_read_back() {
        let settings = WandSettings::defaults();
        let text = render_settings(&settings).unwrap();

        for (wand, config) in reparse(&text) {
            assert_eq!(Some(&config), settings.get(wand));
        }
    }

    #[test]
    fn documented_keys_carry_comments() {
        let text = render_settings(&WandSettings::defaults()).unwrap();
        assert!(text.starts_with("# Wand toggling item frame visibility.\n"));
        assert!(text.contains("    # Item type used for the wand.\n"));
        assert!(text.contains("# Possible values: see https://papermc.io/javadocs/paper/1.16/org/bukkit/Material.html"));
        assert!(text.contains("\n      - type: EMERALD\n        count:\n"));
    }

    #[test]
    fn awkward_strings_survive() {
        let mut config = WandType::ItemFrame.default_config();
        config.item.name = "two\nlines \"quoted\" \\ slash".into();
        config.item.lore = vec![];
        let settings = WandSettings::from_iter([(WandType::ItemFrame, config.clone())]);

        let text = render_settings(&settings).unwrap();
        assert!(text.contains("lore: []"));
        let root: Mapping = serde_yaml::from_str(&text).unwrap();
        let parsed: WandConfig = serde_yaml::from_value(root["item_frame"].clone()).unwrap();
        assert_eq!(parsed, config);
    }
}
