use std::collections::BTreeSet;

use crate::host::PluginStateChange;
use crate::integrations::PluginWrapper;

/// Watches the plugins integrations depend on.
///
/// The wand mapping depends on which integrations are loaded, so it has to
/// be rebuilt whenever one of them is enabled or disabled.
#[derive(Clone, Debug, Default)]
pub struct PluginListener {
    watched: BTreeSet<&'static str>,
}

impl PluginListener {
    pub fn new(integrations: &[Box<dyn PluginWrapper>]) -> Self {
        Self {
            watched: integrations.iter().map(|i| i.name()).collect(),
        }
    }

    /// Whether this state change requires rebuilding the wand mapping.
    pub fn needs_reload(&self, event: &PluginStateChange) -> bool {
        self.watched.contains(event.plugin.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::known_integrations;

    #[test]
    fn only_integrated_plugins_trigger_reload() {
        let listener = PluginListener::new(&known_integrations());
        let change = |plugin: &str| PluginStateChange {
            plugin: plugin.to_string(),
            enabled: true,
        };
        assert!(listener.needs_reload(&change("ArmorStandEditor")));
        assert!(!listener.needs_reload(&change("WorldEdit")));
    }
}
