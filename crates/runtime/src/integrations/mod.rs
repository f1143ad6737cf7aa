//! Optional integrations with other plugins.
//!
//! An integration talks to another plugin through the [`ExtensionPoint`] that
//! plugin exposes: a versioned set of named fields. Each known plugin gets one
//! [`PluginWrapper`]. An absent or incompatible plugin is an expected
//! condition that only takes the dependent wand out of play.

mod armor_stand_editor;

pub use armor_stand_editor::ArmorStandEditorWrapper;

use wand_core::{MaterialRef, NamespacedKey, PersistentFlag, WandType};

use crate::api::{FieldError, IntegrationError};
use crate::compiler::CompiledWand;
use crate::host::Server;

/// Value of a named extension point field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    Bool(bool),
    Material(MaterialRef),
    Key(NamespacedKey),
    Text(String),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "boolean",
            FieldValue::Material(_) => "material",
            FieldValue::Key(_) => "namespaced key",
            FieldValue::Text(_) => "text",
        }
    }
}

/// Contract another plugin publishes for integrations.
pub trait ExtensionPoint {
    /// Version of the field contract.
    fn api_version(&self) -> u32;

    fn get(&self, field: &str) -> Option<FieldValue>;

    fn set(&mut self, field: &str, value: FieldValue) -> Result<(), FieldError>;
}

/// Bridge to one known external plugin.
pub trait PluginWrapper {
    /// Name the plugin is registered under with the host.
    fn name(&self) -> &'static str;

    /// The wand type that only exists while this plugin is loaded.
    fn wand(&self) -> WandType;

    fn is_loaded(&self, server: &dyn Server) -> bool {
        server.plugin(self.name()).is_some()
    }

    /// Identity marker the external plugin recognises on its tool.
    fn flag(&self, server: &dyn Server) -> Result<PersistentFlag, IntegrationError>;

    /// Pushes the compiled wand's settings into the external plugin.
    fn configure(&self, server: &mut dyn Server, wand: &CompiledWand) -> Result<(), IntegrationError>;
}

/// Wrappers for every plugin the runtime knows how to integrate with.
pub fn known_integrations() -> Vec<Box<dyn PluginWrapper>> {
    vec![Box::new(ArmorStandEditorWrapper)]
}
