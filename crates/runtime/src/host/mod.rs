//! Narrow traits over the game server the plugin runs in.
//!
//! The runtime never reaches into the host directly; everything it needs is
//! expressed here so that a real server binding and the in-memory host used by
//! tests and the console are interchangeable.

mod entity;
mod event;
mod memory;

pub use entity::{EntityMut, ItemFrameEntity, Merchant};
pub use event::{CreatureSpawn, EntityDamage, EntityEvent, Hand, PlayerInteractEntity, PluginStateChange};
pub use memory::{
    ConsoleSender, InMemoryExtension, InMemoryServer, ItemFrame, WanderingTrader, WorldPlayer,
};

use wand_core::{ItemStack, MaterialCatalog, NamespacedKey, ShapedRecipe};

use crate::integrations::ExtensionPoint;

/// Server-wide registries.
pub trait Server {
    fn catalog(&self) -> &dyn MaterialCatalog;

    /// Registers a crafting recipe. Returns `false` if the key is taken.
    fn add_recipe(&mut self, recipe: ShapedRecipe) -> bool;

    /// Unregisters a crafting recipe. Returns `false` if nothing was removed.
    fn remove_recipe(&mut self, key: &NamespacedKey) -> bool;

    /// Extension point of another loaded plugin.
    fn plugin(&self, name: &str) -> Option<&dyn ExtensionPoint>;

    fn plugin_mut(&mut self, name: &str) -> Option<&mut dyn ExtensionPoint>;

    /// Online player by exact name.
    fn player_mut(&mut self, name: &str) -> Option<&mut dyn Player>;

    /// Names of online players, used for completions.
    fn online_players(&self) -> Vec<String>;
}

pub trait Player {
    fn name(&self) -> &str;

    /// Adds an item to the player's inventory.
    fn give_item(&mut self, item: ItemStack);
}

/// Whoever issued a chat command: a player or the console.
pub trait CommandSender {
    fn name(&self) -> &str;

    fn has_permission(&self, node: &str) -> bool;

    fn send_message(&mut self, message: &str);

    /// The sender as a player, if it is one.
    fn as_player_mut(&mut self) -> Option<&mut dyn Player>;

    fn is_player(&self) -> bool;
}
