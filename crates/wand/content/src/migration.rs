//! Upgrade of the flat single-wand layout.
//!
//! The first settings layout described one wand with top-level `wand`,
//! `recipe` and `wandering_trader` keys. That wand is the item frame wand, so
//! the upgrade moves those keys under `item_frame` and leaves every other
//! wand type to its defaults.

use serde_yaml::{Mapping, Value};
use strum::IntoEnumIterator;
use tracing::info;
use wand_core::WandType;

const FLAT_ITEM: &str = "wand";
const FLAT_RECIPE: &str = "recipe";
const FLAT_TRADE: &str = "wandering_trader";

/// Which layout a document uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaVersion {
    /// One wand, described by top-level `wand`/`recipe`/`wandering_trader`.
    Flat,
    /// One subtree per wand type.
    Keyed,
}

impl SchemaVersion {
    pub fn detect(document: &Mapping) -> Self {
        let keyed = WandType::iter().any(|wand| document.contains_key(wand.config_key()));
        let flat = [FLAT_ITEM, FLAT_RECIPE, FLAT_TRADE]
            .iter()
            .any(|key| document.contains_key(*key));
        if flat && !keyed {
            SchemaVersion::Flat
        } else {
            SchemaVersion::Keyed
        }
    }
}

/// Rewrites a flat document in place. Returns whether anything changed.
pub fn migrate(document: &mut Mapping) -> bool {
    if SchemaVersion::detect(document) != SchemaVersion::Flat {
        return false;
    }

    let mut wand = Mapping::new();
    wand.insert("enabled".into(), Value::Bool(true));
    for (from, to) in [(FLAT_ITEM, "item"), (FLAT_RECIPE, "crafting"), (FLAT_TRADE, FLAT_TRADE)] {
        if let Some(value) = document.remove(from) {
            wand.insert(to.into(), value);
        }
    }
    document.insert(WandType::ItemFrame.config_key().into(), Value::Mapping(wand));

    info!(
        target: "wand::settings",
        wand = %WandType::ItemFrame,
        "migrated flat settings layout"
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(s: &str) -> Mapping {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn flat_layout_moves_under_item_frame() {
        let mut document = doc(
            "wand:\n  type: STICK\nrecipe:\n  amount: 2\nwandering_trader:\n  chance: 50\n",
        );
        assert_eq!(SchemaVersion::detect(&document), SchemaVersion::Flat);
        assert!(migrate(&mut document));

        assert_eq!(document.len(), 1);
        let wand = document["item_frame"].as_mapping().unwrap();
        assert_eq!(wand["enabled"], Value::Bool(true));
        assert_eq!(wand["item"]["type"], Value::from("STICK"));
        assert_eq!(wand["crafting"]["amount"], Value::from(2));
        assert_eq!(wand["wandering_trader"]["chance"], Value::from(50));
    }

    #[test]
    fn keyed_layout_is_untouched() {
        let mut document = doc("item_frame:\n  enabled: false\n");
        assert_eq!(SchemaVersion::detect(&document), SchemaVersion::Keyed);
        assert!(!migrate(&mut document));
        assert_eq!(document, doc("item_frame:\n  enabled: false\n"));
    }

    #[test]
    fn empty_document_is_keyed() {
        let mut document = Mapping::new();
        assert!(!migrate(&mut document));
        assert!(document.is_empty());
    }
}
