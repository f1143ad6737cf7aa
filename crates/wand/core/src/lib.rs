//! Wand definitions, validation rules and host item model shared across crates.
//!
//! `wand-core` owns the declarative side of the plugin: the configuration
//! records mirroring the YAML document, the primitive validators they are
//! checked with, and the small slice of the host item model (materials,
//! namespaced keys, item stacks, recipes) that compiled wands are made of.
//! Nothing here performs I/O; the host catalog is reached through
//! [`env::MaterialCatalog`].
pub mod config;
pub mod env;
pub mod error;
pub mod item;
pub mod validation;

pub use config::{
    CraftingConfig, ItemAppearance, RangeConfig, TradeConfig, TradeIngredientConfig, WandConfig,
    WandType,
};
pub use env::{MaterialCatalog, StaticCatalog, normalize_material_name};
pub use error::{ConfigError, Result};
pub use item::{
    ItemMeta, ItemStack, MaterialRef, MerchantRecipe, NamespacedKey, PersistentDataContainer,
    PersistentFlag, ShapedRecipe, translate_color_codes,
};
pub use validation::{
    Range, require_non_air, require_percentage, require_quantity, require_range,
    resolve_material,
};
