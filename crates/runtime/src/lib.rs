//! Plugin runtime for wands.
//!
//! This crate turns validated wand settings into host artifacts and keeps the
//! host in sync with them. Consumers embed [`WandPlugin`] and forward host
//! callbacks to it: lifecycle, entity events, plugin state changes and chat
//! commands.
//!
//! Modules are organized by responsibility:
//! - [`compiler`] builds items, recipes and trade factories from configs
//! - [`plugin`] hosts the lifecycle and the build-then-swap wand mapping
//! - [`listeners`] reacts to entity and plugin events
//! - [`integrations`] bridges to optional external plugins
//! - [`commands`] exposes the `/wa` chat command
//! - [`host`] defines the traits over the game server, plus an in-memory host
pub mod api;
pub mod commands;
pub mod compiler;
pub mod host;
pub mod integrations;
pub mod listeners;
pub mod plugin;

pub use api::{FieldError, IntegrationError, Result, RuntimeError};
pub use commands::{ALIASES, NO_PERMISSION, NOT_ENABLED, Permission, is_alias};
pub use compiler::{CompiledWand, Enableable, WandIdentity, WanderingTraderRecipe, compile};
pub use host::{
    CommandSender, ConsoleSender, CreatureSpawn, EntityDamage, EntityEvent, EntityMut, Hand,
    InMemoryExtension, InMemoryServer, ItemFrame, ItemFrameEntity, Merchant, Player,
    PlayerInteractEntity, PluginStateChange, Server, WanderingTrader, WorldPlayer,
};
pub use integrations::{ArmorStandEditorWrapper, ExtensionPoint, FieldValue, PluginWrapper};
pub use listeners::{EventPriority, Listener, ListenerContext, ListenerRegistry};
pub use plugin::WandPlugin;
