use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A `namespace:key` identifier, as used by the host for recipes and
/// persistent data.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NamespacedKey {
    namespace: String,
    key: String,
}

impl NamespacedKey {
    /// Creates a key, lowercasing both halves the way the host does for
    /// plugin-owned keys.
    pub fn new(namespace: &str, key: &str) -> Result<Self, ConfigError> {
        let namespace = namespace.to_ascii_lowercase();
        let key = key.to_ascii_lowercase();
        let valid_namespace = !namespace.is_empty()
            && namespace
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "._-".contains(c));
        let valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "._-/".contains(c));
        if !valid_namespace || !valid_key {
            return Err(ConfigError::InvalidKey(format!("{namespace}:{key}")));
        }
        Ok(Self { namespace, key })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for NamespacedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.key)
    }
}

impl FromStr for NamespacedKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, key) = s
            .split_once(':')
            .ok_or_else(|| ConfigError::InvalidKey(s.to_string()))?;
        Self::new(namespace, key)
    }
}

impl TryFrom<String> for NamespacedKey {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NamespacedKey> for String {
    fn from(value: NamespacedKey) -> Self {
        value.to_string()
    }
}

/// Byte-valued persistent data attached to an item.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistentDataContainer {
    bytes: BTreeMap<NamespacedKey, u8>,
}

impl PersistentDataContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: NamespacedKey, value: u8) {
        self.bytes.insert(key, value);
    }

    pub fn get(&self, key: &NamespacedKey) -> Option<u8> {
        self.bytes.get(key).copied()
    }

    pub fn has(&self, key: &NamespacedKey) -> bool {
        self.bytes.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Identity marker: a namespaced key paired with a sentinel byte.
///
/// A player's held item is recognised as a wand iff its persistent data
/// holds exactly this key with exactly this value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersistentFlag {
    pub key: NamespacedKey,
    pub value: u8,
}

impl PersistentFlag {
    pub const DEFAULT_VALUE: u8 = 1;

    pub fn new(key: NamespacedKey, value: u8) -> Self {
        Self { key, value }
    }

    /// Flag with the conventional sentinel value `1`.
    pub fn marker(key: NamespacedKey) -> Self {
        Self::new(key, Self::DEFAULT_VALUE)
    }

    pub fn apply_to(&self, container: &mut PersistentDataContainer) {
        container.set(self.key.clone(), self.value);
    }

    pub fn is_in(&self, container: &PersistentDataContainer) -> bool {
        container.get(&self.key) == Some(self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_lowercases() {
        let key: NamespacedKey = "WanderfulAdditions:Item_Frame_Wand".parse().unwrap();
        assert_eq!(key.namespace(), "wanderfuladditions");
        assert_eq!(key.to_string(), "wanderfuladditions:item_frame_wand");
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(NamespacedKey::new("my plugin", "wand").is_err());
        assert!(NamespacedKey::new("plugin", "").is_err());
        assert!("no_separator".parse::<NamespacedKey>().is_err());
    }

    #[test]
    fn flag_requires_matching_value() {
        let key = NamespacedKey::new("wa", "item_frame_wand").unwrap();
        let flag = PersistentFlag::marker(key.clone());
        let mut container = PersistentDataContainer::new();
        assert!(!flag.is_in(&container));

        container.set(key, 2);
        assert!(!flag.is_in(&container));

        flag.apply_to(&mut container);
        assert!(flag.is_in(&container));
    }
}
