use wand_core::{PersistentFlag, WandType};

use super::{ExtensionPoint, FieldValue, PluginWrapper};
use crate::api::IntegrationError;
use crate::compiler::CompiledWand;
use crate::host::Server;

const NAME: &str = "ArmorStandEditor";
const SUPPORTED_API_VERSION: u32 = 1;
const EDIT_TOOL_KEY: &str = "editToolKey";

/// ArmorStandEditor: the armor stand wand is its edit tool.
///
/// The edit tool is matched by key only, so the wand's name and lore stay
/// free to change.
#[derive(Clone, Copy, Debug, Default)]
pub struct ArmorStandEditorWrapper;

impl ArmorStandEditorWrapper {
    fn incompatible(reason: String) -> IntegrationError {
        IntegrationError::ExternalPluginIncompatible { plugin: NAME, reason }
    }

    fn checked<'a>(
        extension: Option<&'a dyn ExtensionPoint>,
    ) -> Result<&'a dyn ExtensionPoint, IntegrationError> {
        let extension = extension.ok_or(IntegrationError::PluginNotFound { plugin: NAME })?;
        match extension.api_version() {
            SUPPORTED_API_VERSION => Ok(extension),
            other => Err(Self::incompatible(format!(
                "unsupported api version {other}, expected {SUPPORTED_API_VERSION}"
            ))),
        }
    }
}

impl PluginWrapper for ArmorStandEditorWrapper {
    fn name(&self) -> &'static str {
        NAME
    }

    fn wand(&self) -> WandType {
        WandType::ArmorStand
    }

    fn flag(&self, server: &dyn Server) -> Result<PersistentFlag, IntegrationError> {
        let extension = Self::checked(server.plugin(NAME))?;
        match extension.get(EDIT_TOOL_KEY) {
            Some(FieldValue::Key(key)) => Ok(PersistentFlag::marker(key)),
            Some(other) => Err(Self::incompatible(format!(
                "field type is incorrect for {EDIT_TOOL_KEY} (got {})",
                other.kind()
            ))),
            None => Err(Self::incompatible(format!(
                "missing required field {EDIT_TOOL_KEY}"
            ))),
        }
    }

    fn configure(&self, server: &mut dyn Server, wand: &CompiledWand) -> Result<(), IntegrationError> {
        Self::checked(server.plugin(NAME))?;
        let extension = server
            .plugin_mut(NAME)
            .ok_or(IntegrationError::PluginNotFound { plugin: NAME })?;

        let fields = [
            ("editTool", FieldValue::Material(wand.item.material.clone())),
            ("requireToolData", FieldValue::Bool(false)),
            ("requireToolLore", FieldValue::Bool(false)),
            ("requireToolKey", FieldValue::Bool(true)),
        ];
        for (field, value) in fields {
            extension.set(field, value).map_err(|e| {
                Self::incompatible(format!("encountered issue setting {NAME}.{field}: {e}"))
            })?;
        }
        Ok(())
    }
}
