//! In-memory host.
//!
//! A small stand-in for a game server: registries are maps, entities are plain
//! structs and chat output is collected instead of sent. Used by the console
//! binary and by tests.

use std::collections::{BTreeMap, BTreeSet};

use wand_core::{
    ItemStack, MaterialCatalog, MaterialRef, MerchantRecipe, NamespacedKey, ShapedRecipe,
    StaticCatalog,
};

use super::{CommandSender, ItemFrameEntity, Merchant, Player, Server};
use crate::api::FieldError;
use crate::integrations::{ExtensionPoint, FieldValue};

#[derive(Debug, Default)]
pub struct InMemoryServer {
    catalog: StaticCatalog,
    recipes: BTreeMap<NamespacedKey, ShapedRecipe>,
    plugins: BTreeMap<String, InMemoryExtension>,
    players: BTreeMap<String, WorldPlayer>,
}

impl InMemoryServer {
    pub fn new(catalog: StaticCatalog) -> Self {
        Self {
            catalog,
            ..Default::default()
        }
    }

    pub fn catalog_mut(&mut self) -> &mut StaticCatalog {
        &mut self.catalog
    }

    pub fn load_plugin(&mut self, name: impl Into<String>, extension: InMemoryExtension) {
        self.plugins.insert(name.into(), extension);
    }

    pub fn unload_plugin(&mut self, name: &str) -> Option<InMemoryExtension> {
        self.plugins.remove(name)
    }

    pub fn extension(&self, name: &str) -> Option<&InMemoryExtension> {
        self.plugins.get(name)
    }

    pub fn join(&mut self, player: WorldPlayer) {
        self.players.insert(player.name.clone(), player);
    }

    pub fn leave(&mut self, name: &str) -> Option<WorldPlayer> {
        self.players.remove(name)
    }

    pub fn player(&self, name: &str) -> Option<&WorldPlayer> {
        self.players.get(name)
    }

    pub fn recipe(&self, key: &NamespacedKey) -> Option<&ShapedRecipe> {
        self.recipes.get(key)
    }

    pub fn recipes(&self) -> impl Iterator<Item = &ShapedRecipe> {
        self.recipes.values()
    }
}

impl Server for InMemoryServer {
    fn catalog(&self) -> &dyn MaterialCatalog {
        &self.catalog
    }

    fn add_recipe(&mut self, recipe: ShapedRecipe) -> bool {
        if self.recipes.contains_key(&recipe.key) {
            return false;
        }
        self.recipes.insert(recipe.key.clone(), recipe);
        true
    }

    fn remove_recipe(&mut self, key: &NamespacedKey) -> bool {
        self.recipes.remove(key).is_some()
    }

    fn plugin(&self, name: &str) -> Option<&dyn ExtensionPoint> {
        self.plugins.get(name).map(|p| p as &dyn ExtensionPoint)
    }

    fn plugin_mut(&mut self, name: &str) -> Option<&mut dyn ExtensionPoint> {
        self.plugins
            .get_mut(name)
            .map(|p| p as &mut dyn ExtensionPoint)
    }

    fn player_mut(&mut self, name: &str) -> Option<&mut dyn Player> {
        self.players.get_mut(name).map(|p| p as &mut dyn Player)
    }

    fn online_players(&self) -> Vec<String> {
        self.players.keys().cloned().collect()
    }
}

/// Named fields exposed by a simulated external plugin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InMemoryExtension {
    api_version: u32,
    fields: BTreeMap<String, FieldValue>,
}

impl InMemoryExtension {
    pub fn new(api_version: u32) -> Self {
        Self {
            api_version,
            fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: FieldValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// ArmorStandEditor as it looks right after it loads.
    pub fn armor_stand_editor(edit_tool_key: NamespacedKey) -> Self {
        Self::new(1)
            .with_field("editToolKey", FieldValue::Key(edit_tool_key))
            .with_field("editTool", FieldValue::Material(MaterialRef::new("FLINT")))
            .with_field("requireToolData", FieldValue::Bool(false))
            .with_field("requireToolLore", FieldValue::Bool(false))
            .with_field("requireToolKey", FieldValue::Bool(false))
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

impl ExtensionPoint for InMemoryExtension {
    fn api_version(&self) -> u32 {
        self.api_version
    }

    fn get(&self, field: &str) -> Option<FieldValue> {
        self.fields.get(field).cloned()
    }

    fn set(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError> {
        let slot = self
            .fields
            .get_mut(field)
            .ok_or_else(|| FieldError::Missing(field.to_string()))?;
        if slot.kind() != value.kind() {
            return Err(FieldError::WrongType {
                field: field.to_string(),
                expected: slot.kind(),
            });
        }
        *slot = value;
        Ok(())
    }
}

/// An online player with an inventory and a chat log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldPlayer {
    pub name: String,
    pub inventory: Vec<ItemStack>,
    pub main_hand: Option<ItemStack>,
    pub permissions: BTreeSet<String>,
    pub messages: Vec<String>,
}

impl WorldPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_permission(mut self, node: &str) -> Self {
        self.permissions.insert(node.to_string());
        self
    }
}

impl Player for WorldPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn give_item(&mut self, item: ItemStack) {
        self.inventory.push(item);
    }
}

impl CommandSender for WorldPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, node: &str) -> bool {
        self.permissions.contains(node)
    }

    fn send_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn as_player_mut(&mut self) -> Option<&mut dyn Player> {
        Some(self)
    }

    fn is_player(&self) -> bool {
        true
    }
}

/// The server console: every permission, no inventory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsoleSender {
    pub messages: Vec<String>,
}

impl ConsoleSender {
    /// Takes the collected output.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.messages)
    }
}

impl CommandSender for ConsoleSender {
    fn name(&self) -> &str {
        "CONSOLE"
    }

    fn has_permission(&self, _node: &str) -> bool {
        true
    }

    fn send_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn as_player_mut(&mut self) -> Option<&mut dyn Player> {
        None
    }

    fn is_player(&self) -> bool {
        false
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemFrame {
    pub item: Option<ItemStack>,
    pub visible: bool,
}

impl ItemFrame {
    pub fn holding(item: ItemStack) -> Self {
        Self {
            item: Some(item),
            visible: true,
        }
    }

    pub fn empty() -> Self {
        Self {
            item: None,
            visible: true,
        }
    }
}

impl ItemFrameEntity for ItemFrame {
    fn item(&self) -> Option<&ItemStack> {
        self.item.as_ref()
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WanderingTrader {
    pub recipes: Vec<MerchantRecipe>,
}

impl Merchant for WanderingTrader {
    fn recipes(&self) -> &[MerchantRecipe] {
        &self.recipes
    }

    fn add_recipe(&mut self, recipe: MerchantRecipe) {
        self.recipes.push(recipe);
    }
}
