//! Wand config aggregate.
//!
//! One [`WandConfig`] per [`WandType`], deserialized from the wand type's
//! subtree of the settings document and validated as a unit before use.
mod defaults;
mod fields;

pub use fields::{CraftingConfig, ItemAppearance, RangeConfig, TradeConfig, TradeIngredientConfig};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::env::MaterialCatalog;
use crate::error::{ConfigError, Result};

/// The kinds of wand the plugin knows about.
///
/// The snake case name doubles as the top-level document key and the command
/// argument (matched case-insensitively).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum WandType {
    /// Toggles item frame visibility.
    ItemFrame,
    /// Edit tool for the ArmorStandEditor plugin.
    ArmorStand,
}

impl WandType {
    /// Top-level key of this wand's subtree in the settings document.
    pub fn config_key(self) -> &'static str {
        self.into()
    }

    /// Configuration written on first run for this wand type.
    pub fn default_config(self) -> WandConfig {
        match self {
            WandType::ItemFrame => defaults::item_frame(),
            WandType::ArmorStand => defaults::armor_stand(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WandConfig {
    pub enabled: bool,
    pub item: ItemAppearance,
    pub crafting: CraftingConfig,
    pub wandering_trader: TradeConfig,
}

impl WandConfig {
    /// Validates every section, then checks that each shape placeholder has an
    /// ingredient. Stops at the first failure.
    pub fn validate(&self, wand: WandType, catalog: &dyn MaterialCatalog) -> Result<()> {
        let root = wand.config_key();
        let crafting_path = format!("{root}.crafting");

        self.item.validate(&format!("{root}.item"), catalog)?;
        self.crafting.validate(&crafting_path, catalog)?;
        self.wandering_trader
            .validate(&format!("{root}.wandering_trader"), catalog)?;

        for (row, line) in self.crafting.shape.iter().enumerate() {
            let unmapped = line
                .chars()
                .filter(|c| *c != CraftingConfig::EMPTY_SLOT)
                .find(|c| self.crafting.ingredient(*c).is_none());
            if let Some(key) = unmapped {
                return Err(ConfigError::MissingIngredientMapping {
                    path: format!("{crafting_path}.shape[{row}]"),
                    key,
                    row,
                });
            }
        }
        Ok(())
    }
}
