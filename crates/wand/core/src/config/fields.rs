//! Field config objects.
//!
//! Plain records mirroring one YAML section each. `validate` checks only the
//! record's own invariants; cross-field checks live on [`super::WandConfig`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::env::MaterialCatalog;
use crate::error::{ConfigError, Result};
use crate::item::ItemStack;
use crate::validation::{
    Range, require_non_air, require_percentage, require_quantity, require_range,
    resolve_material,
};

/// `item` section: what the wand looks like.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAppearance {
    #[serde(rename = "type")]
    pub material: String,
    pub name: String,
    pub lore: Vec<String>,
    pub glow: bool,
}

impl ItemAppearance {
    pub fn validate(&self, path: &str, catalog: &dyn MaterialCatalog) -> Result<()> {
        let type_path = format!("{path}.type");
        let material = resolve_material(catalog, &type_path, &self.material)?;
        require_non_air(&type_path, &material)
    }
}

/// `crafting` section: a shaped recipe producing the wand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftingConfig {
    pub enabled: bool,
    pub shape: Vec<String>,
    /// Placeholder character (as a one-character string) to material name.
    pub ingredients: BTreeMap<String, String>,
    pub amount: i64,
}

impl CraftingConfig {
    pub const MAX_ROWS: usize = 3;
    pub const MAX_COLUMNS: usize = 3;
    /// Placeholder the host treats as an empty grid slot.
    pub const EMPTY_SLOT: char = ' ';

    pub fn validate(&self, path: &str, catalog: &dyn MaterialCatalog) -> Result<()> {
        self.validate_shape(&format!("{path}.shape"))?;

        for (key, material) in &self.ingredients {
            let key_path = format!("{path}.ingredients.{key}");
            if key.chars().count() != 1 {
                return Err(ConfigError::InvalidIngredientKey {
                    path: key_path,
                    key: key.clone(),
                });
            }
            let material = resolve_material(catalog, &key_path, material)?;
            require_non_air(&key_path, &material)?;
        }

        require_quantity(
            &format!("{path}.amount"),
            self.amount,
            1,
            ItemStack::MAX_STACK,
        )?;
        Ok(())
    }

    fn validate_shape(&self, path: &str) -> Result<()> {
        let invalid = |reason: String| ConfigError::InvalidShape {
            path: path.to_string(),
            reason,
        };

        if self.shape.is_empty() || self.shape.len() > Self::MAX_ROWS {
            return Err(invalid(format!(
                "shape needs 1 to {} rows, got {}",
                Self::MAX_ROWS,
                self.shape.len()
            )));
        }

        let mut width = None;
        for (index, row) in self.shape.iter().enumerate() {
            let len = row.chars().count();
            if len == 0 || len > Self::MAX_COLUMNS {
                return Err(ConfigError::InvalidShape {
                    path: format!("{path}[{index}]"),
                    reason: format!(
                        "row '{row}' needs 1 to {} placeholders, got {len}",
                        Self::MAX_COLUMNS
                    ),
                });
            }
            match width {
                Some(expected) if expected != len => {
                    return Err(ConfigError::InvalidShape {
                        path: format!("{path}[{index}]"),
                        reason: format!(
                            "row '{row}' has {len} placeholders but the first row has {expected}; \
                             shapes must be rectangular"
                        ),
                    });
                }
                _ => width = Some(len),
            }
        }
        Ok(())
    }

    /// Placeholders used by the shape, each with the first row it appears in.
    pub fn placeholders(&self) -> BTreeMap<char, usize> {
        let mut used = BTreeMap::new();
        for (row, line) in self.shape.iter().enumerate() {
            for c in line.chars().filter(|c| *c != Self::EMPTY_SLOT) {
                used.entry(c).or_insert(row);
            }
        }
        used
    }

    /// Material name mapped to `placeholder`, if any.
    pub fn ingredient(&self, placeholder: char) -> Option<&str> {
        let mut buf = [0u8; 4];
        self.ingredients
            .get(placeholder.encode_utf8(&mut buf) as &str)
            .map(String::as_str)
    }
}

/// `{min, max}` pair as written in the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub min: i64,
    pub max: i64,
}

impl RangeConfig {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, path: &str, lower: i64, upper: Option<i64>) -> Result<Range> {
        require_range(path, self.min, self.max, lower, upper)
    }
}

/// One entry of `wandering_trader.ingredients`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeIngredientConfig {
    #[serde(rename = "type")]
    pub material: String,
    pub count: RangeConfig,
}

impl TradeIngredientConfig {
    pub const MIN_COUNT: i64 = 1;
    pub const MAX_COUNT: i64 = ItemStack::MAX_STACK as i64;

    pub fn validate(&self, path: &str, catalog: &dyn MaterialCatalog) -> Result<()> {
        let type_path = format!("{path}.type");
        let material = resolve_material(catalog, &type_path, &self.material)?;
        require_non_air(&type_path, &material)?;
        self.count.validate(
            &format!("{path}.count"),
            Self::MIN_COUNT,
            Some(Self::MAX_COUNT),
        )?;
        Ok(())
    }
}

/// `wandering_trader` section: an offer occasionally added to spawning traders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeConfig {
    pub enabled: bool,
    pub chance: i64,
    pub uses: RangeConfig,
    pub ingredients: Vec<TradeIngredientConfig>,
}

impl TradeConfig {
    pub const MAX_INGREDIENTS: usize = 2;

    pub fn validate(&self, path: &str, catalog: &dyn MaterialCatalog) -> Result<()> {
        require_percentage(&format!("{path}.chance"), self.chance)?;
        self.uses.validate(&format!("{path}.uses"), 1, None)?;

        if self.ingredients.is_empty() || self.ingredients.len() > Self::MAX_INGREDIENTS {
            return Err(ConfigError::InvalidIngredientCount {
                path: format!("{path}.ingredients"),
                count: self.ingredients.len(),
            });
        }
        for (index, ingredient) in self.ingredients.iter().enumerate() {
            ingredient.validate(&format!("{path}.ingredients[{index}]"), catalog)?;
        }
        Ok(())
    }
}
