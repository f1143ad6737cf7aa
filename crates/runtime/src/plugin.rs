//! Plugin lifecycle.
//!
//! [`WandPlugin`] owns the settings store and the compiled wand mapping, and
//! keeps the host's registries in sync with it. A reload always builds the
//! complete new mapping before it replaces the active one.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rand::RngCore;
use tracing::{debug, error, info, warn};
use wand_content::{SettingsStore, WandSettings};
use wand_core::{ConfigError, NamespacedKey, PersistentFlag, WandType};

use crate::api::{Result, RuntimeError};
use crate::compiler::{CompiledWand, WandIdentity, compile};
use crate::host::{EntityEvent, PluginStateChange, Server};
use crate::integrations::{PluginWrapper, known_integrations};
use crate::listeners::{ListenerContext, ListenerRegistry, PluginListener};

const ISSUES_URL: &str = "https://github.com/Prof-Bloodstone/WanderfulAdditions/issues";

/// Logs something that should never happen, with a request to report it.
pub(crate) fn report_issue(msg: &str) {
    error!(
        target: "wand::issue",
        "{msg}\nThis is probably an error - please report to {ISSUES_URL}.\n\
         Include all relevant logs and the configuration file.\n\
         It's advised to restart the server since plugin might be in a partial state. Sorry :("
    );
}

pub struct WandPlugin {
    namespace: String,
    store: SettingsStore,
    wands: BTreeMap<WandType, CompiledWand>,
    integrations: Vec<Box<dyn PluginWrapper>>,
    listeners: ListenerRegistry,
    plugin_listener: PluginListener,
    trades_active: bool,
    fully_enabled: bool,
}

impl WandPlugin {
    /// Plugin with its settings at `settings_file` and identity keys under
    /// `namespace`.
    pub fn new(namespace: &str, settings_file: impl Into<PathBuf>) -> std::result::Result<Self, ConfigError> {
        // Validates the namespace once; every later key reuses it.
        let namespace = NamespacedKey::new(namespace, "wand")?.namespace().to_string();
        let integrations = known_integrations();
        let plugin_listener = PluginListener::new(&integrations);
        Ok(Self {
            namespace,
            store: SettingsStore::new(settings_file),
            wands: BTreeMap::new(),
            integrations,
            listeners: ListenerRegistry::default_listeners(),
            plugin_listener,
            trades_active: false,
            fully_enabled: false,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn is_enabled(&self) -> bool {
        self.fully_enabled
    }

    pub fn settings(&self) -> Option<&WandSettings> {
        self.store.settings()
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Active compiled wands.
    pub fn wands(&self) -> &BTreeMap<WandType, CompiledWand> {
        &self.wands
    }

    pub fn wand(&self, wand: WandType) -> Option<&CompiledWand> {
        self.wands.get(&wand)
    }

    pub fn enabled_wands(&self) -> impl Iterator<Item = &CompiledWand> {
        self.wands.values().filter(|w| w.enabled)
    }

    /// First load. A failure here leaves the plugin disabled.
    pub fn enable(&mut self, server: &mut dyn Server) -> Result<()> {
        if let Err(e) = self.rebuild(server, true) {
            error!(error = %e, code = e.error_code(), "failed to load configuration");
            error!("will disable now");
            return Err(e);
        }
        self.register_all(server);
        self.fully_enabled = true;
        info!(
            namespace = %self.namespace,
            wands = self.wands.len(),
            enabled = self.enabled_wands().count(),
            "plugin enabled"
        );
        Ok(())
    }

    /// Unregisters everything, rebuilds and registers again.
    ///
    /// With `from_disk` the settings file is read again; otherwise the active
    /// settings are recompiled (integrations may have changed). Whatever
    /// mapping is active afterwards is registered, so a failed reload leaves
    /// the previous wands installed. Before a successful [`enable`](Self::enable)
    /// nothing is touched and [`RuntimeError::NotEnabled`] is returned.
    pub fn reload(&mut self, server: &mut dyn Server, from_disk: bool) -> Result<()> {
        if !self.fully_enabled {
            return Err(RuntimeError::NotEnabled);
        }
        self.unregister_all(server);
        let result = self.rebuild(server, from_disk);
        self.register_all(server);
        result
    }

    pub fn disable(&mut self, server: &mut dyn Server) {
        if self.fully_enabled {
            self.unregister_all(server);
        }
        self.fully_enabled = false;
        info!("plugin disabled");
    }

    pub fn log_issue(&self, msg: &str) {
        report_issue(msg);
    }

    /// Runs the entity listeners for one event.
    pub fn on_entity_event(&self, event: &mut EntityEvent<'_>, rng: &mut dyn RngCore) {
        if !self.fully_enabled {
            return;
        }
        let mut ctx = ListenerContext {
            wands: &self.wands,
            trades_active: self.trades_active,
            rng,
        };
        self.listeners.dispatch(&mut ctx, event);
    }

    /// Rebuilds the mapping when an integrated plugin changes state.
    pub fn on_plugin_state_change(&mut self, server: &mut dyn Server, event: &PluginStateChange) {
        if !self.fully_enabled || !self.plugin_listener.needs_reload(event) {
            return;
        }
        info!(plugin = %event.plugin, enabled = event.enabled, "integrated plugin changed state");
        if let Err(e) = self.reload(server, false) {
            report_issue(&format!(
                "{e}\nError reloading configuration on '{}' plugin state change.",
                event.plugin
            ));
        }
    }

    fn key(&self, key: &str) -> std::result::Result<NamespacedKey, ConfigError> {
        NamespacedKey::new(&self.namespace, key)
    }

    fn integration(&self, wand: WandType) -> Option<&dyn PluginWrapper> {
        self.integrations
            .iter()
            .find(|i| i.wand() == wand)
            .map(|i| i.as_ref())
    }

    /// Identity tokens for `wand`, or `None` if its integration is unavailable.
    fn identity(&self, server: &dyn Server, wand: WandType) -> Result<Option<WandIdentity>> {
        let compile_error = |source| RuntimeError::Compile { wand, source };
        let crafting_key = self
            .key(&format!("{}_crafting", wand.config_key()))
            .map_err(compile_error)?;

        let flag = match self.integration(wand) {
            None => PersistentFlag::marker(
                self.key(&format!("{}_wand", wand.config_key()))
                    .map_err(compile_error)?,
            ),
            Some(integration) if !integration.is_loaded(server) => {
                debug!(%wand, plugin = integration.name(), "integration not loaded, wand unavailable");
                return Ok(None);
            }
            Some(integration) => match integration.flag(server) {
                Ok(flag) => flag,
                Err(e) => {
                    warn!(%wand, plugin = integration.name(), error = %e, "integration unavailable");
                    return Ok(None);
                }
            },
        };
        Ok(Some(WandIdentity { flag, crafting_key }))
    }

    fn rebuild(&mut self, server: &mut dyn Server, from_disk: bool) -> Result<()> {
        if from_disk {
            self.store.reload(server.catalog())?;
        }
        let settings = self.store.settings().ok_or(RuntimeError::NotEnabled)?;

        let mut wands = BTreeMap::new();
        for (wand, config) in settings.iter() {
            let Some(identity) = self.identity(&*server, wand)? else {
                continue;
            };
            let compiled = compile(wand, config, server.catalog(), identity)
                .map_err(|source| RuntimeError::Compile { wand, source })?;
            wands.insert(wand, compiled);
        }

        for integration in &self.integrations {
            let wand = integration.wand();
            let Some(compiled) = wands.get(&wand) else {
                continue;
            };
            if let Err(e) = integration.configure(server, compiled) {
                warn!(%wand, plugin = integration.name(), error = %e, "failed to configure integration");
                wands.remove(&wand);
            }
        }

        info!(wands = wands.len(), "compiled wands");
        self.wands = wands;
        Ok(())
    }

    fn register_all(&mut self, server: &mut dyn Server) {
        for wand in self.wands.values() {
            if let Some(recipe) = wand.active_recipe() {
                if server.add_recipe(recipe.clone()) {
                    debug!(key = %recipe.key, "registered recipe");
                } else {
                    warn!(key = %recipe.key, "recipe key already registered");
                }
            }
        }
        self.trades_active = true;
    }

    fn unregister_all(&mut self, server: &mut dyn Server) {
        for wand in self.wands.values() {
            if let Some(recipe) = wand.active_recipe() {
                if server.remove_recipe(&recipe.key) {
                    debug!(key = %recipe.key, "unregistered recipe");
                }
            }
        }
        self.trades_active = false;
    }
}
