//! Event listeners.
//!
//! Listeners react to entity events the host forwards to the plugin. They are
//! run in [`EventPriority`] order and, unless they opt out, skip events an
//! earlier listener already cancelled.
//!
//! Plugin state changes are not entity events; they go through
//! [`PluginListener`] because they may trigger a reload.

mod creature_spawn;
mod item_frame;
mod plugin_state;

pub use creature_spawn::WanderingTraderListener;
pub use item_frame::{ItemFrameDamageListener, ItemFrameInteractListener};
pub use plugin_state::PluginListener;

use std::collections::BTreeMap;

use rand::RngCore;
use tracing::trace;
use wand_core::WandType;

use crate::compiler::CompiledWand;
use crate::host::EntityEvent;

/// Order listeners run in; later priorities see earlier changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventPriority {
    Normal,
    High,
    /// Observes the final outcome; must not cancel.
    Monitor,
}

/// State a listener may read while handling an event.
pub struct ListenerContext<'a> {
    pub wands: &'a BTreeMap<WandType, CompiledWand>,
    /// Whether trade offers are currently registered.
    pub trades_active: bool,
    pub rng: &'a mut dyn RngCore,
}

pub trait Listener {
    fn name(&self) -> &'static str;

    fn priority(&self) -> EventPriority {
        EventPriority::Normal
    }

    fn ignore_cancelled(&self) -> bool {
        true
    }

    fn handle(&self, ctx: &mut ListenerContext<'_>, event: &mut EntityEvent<'_>);
}

pub struct ListenerRegistry {
    listeners: Vec<Box<dyn Listener>>,
}

impl ListenerRegistry {
    /// Creates a registry; listeners are sorted by priority.
    pub fn new(mut listeners: Vec<Box<dyn Listener>>) -> Self {
        listeners.sort_by_key(|l| l.priority());
        Self { listeners }
    }

    /// Item frame handling and wandering trader offers.
    pub fn default_listeners() -> Self {
        Self::new(vec![
            Box::new(WanderingTraderListener),
            Box::new(ItemFrameInteractListener),
            Box::new(ItemFrameDamageListener),
        ])
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.listeners.iter().map(|l| l.name())
    }

    pub fn dispatch(&self, ctx: &mut ListenerContext<'_>, event: &mut EntityEvent<'_>) {
        for listener in &self.listeners {
            if listener.ignore_cancelled() && event.is_cancelled() {
                trace!(listener = listener.name(), "skipping cancelled event");
                continue;
            }
            listener.handle(ctx, event);
        }
    }
}

impl Default for ListenerRegistry {
    fn default() -> Self {
        Self::default_listeners()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listeners_run_in_priority_order() {
        let registry = ListenerRegistry::default_listeners();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["wandering_trader", "item_frame_interact", "item_frame_damage"]
        );
    }
}
