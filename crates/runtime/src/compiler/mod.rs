//! Wand compiler.
//!
//! Turns a validated [`WandConfig`] into the host artifacts that make up a
//! wand: the item itself, its shaped crafting recipe and its wandering trader
//! offer. The identity tokens are supplied by the caller so that compiling the
//! same config twice yields artifacts the host treats as the same
//! registration.

mod trade;

pub use trade::WanderingTraderRecipe;

use arrayvec::ArrayVec;
use wand_core::{
    ConfigError, ItemStack, MaterialCatalog, NamespacedKey, PersistentFlag, ShapedRecipe,
    WandConfig, WandType, require_non_air, require_quantity, resolve_material,
    translate_color_codes,
};

/// An artifact that is always built but only installed when enabled.
///
/// Keeping disabled recipes around lets the plugin unregister whatever it
/// registered last without re-deriving keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enableable<T> {
    pub enabled: bool,
    pub entry: T,
}

impl<T> Enableable<T> {
    pub fn new(enabled: bool, entry: T) -> Self {
        Self { enabled, entry }
    }

    /// The entry, if enabled.
    pub fn active(&self) -> Option<&T> {
        self.enabled.then_some(&self.entry)
    }
}

/// Identity tokens issued by the plugin lifecycle for one wand type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WandIdentity {
    /// Marker imprinted on the wand item.
    pub flag: PersistentFlag,
    /// Registration key of the crafting recipe.
    pub crafting_key: NamespacedKey,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledWand {
    pub wand: WandType,
    pub enabled: bool,
    pub item: ItemStack,
    pub crafting: Enableable<ShapedRecipe>,
    pub trading: Enableable<WanderingTraderRecipe>,
    pub flag: PersistentFlag,
}

impl CompiledWand {
    /// Whether `item` carries this wand's identity marker.
    pub fn matches(&self, item: &ItemStack) -> bool {
        self.flag.is_in(&item.meta.persistent_data)
    }

    pub fn active_recipe(&self) -> Option<&ShapedRecipe> {
        self.enabled.then(|| self.crafting.active()).flatten()
    }

    pub fn active_trade(&self) -> Option<&WanderingTraderRecipe> {
        self.enabled.then(|| self.trading.active()).flatten()
    }
}

/// Compiles one wand.
///
/// The config is validated again and every material re-resolved, so a catalog
/// that changed since the settings were loaded surfaces as a [`ConfigError`].
pub fn compile(
    wand: WandType,
    config: &WandConfig,
    catalog: &dyn MaterialCatalog,
    identity: WandIdentity,
) -> Result<CompiledWand, ConfigError> {
    config.validate(wand, catalog)?;
    let root = wand.config_key();

    let item = build_item(root, config, catalog, &identity.flag)?;
    let crafting = build_recipe(root, config, catalog, &item, identity.crafting_key)?;
    let trading = WanderingTraderRecipe::build(
        &format!("{root}.wandering_trader"),
        &config.wandering_trader,
        catalog,
        &item,
    )?;

    Ok(CompiledWand {
        wand,
        enabled: config.enabled,
        item,
        crafting: Enableable::new(config.crafting.enabled, crafting),
        trading: Enableable::new(config.wandering_trader.enabled, trading),
        flag: identity.flag,
    })
}

fn build_item(
    root: &str,
    config: &WandConfig,
    catalog: &dyn MaterialCatalog,
    flag: &PersistentFlag,
) -> Result<ItemStack, ConfigError> {
    let appearance = &config.item;
    let material = resolve_material(catalog, &format!("{root}.item.type"), &appearance.material)?;

    let mut item = ItemStack::new(material, 1);
    item.meta.display_name = Some(translate_color_codes(&appearance.name));
    item.meta.lore = appearance
        .lore
        .iter()
        .map(|line| translate_color_codes(line))
        .collect();
    item.meta.glow = appearance.glow;
    flag.apply_to(&mut item.meta.persistent_data);
    Ok(item)
}

fn build_recipe(
    root: &str,
    config: &WandConfig,
    catalog: &dyn MaterialCatalog,
    item: &ItemStack,
    key: NamespacedKey,
) -> Result<ShapedRecipe, ConfigError> {
    let crafting = &config.crafting;
    let path = format!("{root}.crafting");
    let amount = require_quantity(
        &format!("{path}.amount"),
        crafting.amount,
        1,
        ItemStack::MAX_STACK,
    )?;

    let mut shape = ArrayVec::new();
    for (row, line) in crafting.shape.iter().enumerate() {
        shape
            .try_push(line.clone())
            .map_err(|_| ConfigError::InvalidShape {
                path: format!("{path}.shape[{row}]"),
                reason: "too many rows".into(),
            })?;
    }

    // Only placeholders the grid actually uses become recipe ingredients.
    let mut ingredients = std::collections::BTreeMap::new();
    for (placeholder, row) in crafting.placeholders() {
        let name = crafting
            .ingredient(placeholder)
            .ok_or_else(|| ConfigError::MissingIngredientMapping {
                path: format!("{path}.shape[{row}]"),
                key: placeholder,
                row,
            })?;
        let key_path = format!("{path}.ingredients.{placeholder}");
        let material = resolve_material(catalog, &key_path, name)?;
        require_non_air(&key_path, &material)?;
        ingredients.insert(placeholder, material);
    }

    Ok(ShapedRecipe {
        key,
        result: item.with_amount(amount),
        shape,
        ingredients,
    })
}
