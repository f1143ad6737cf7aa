use tracing::debug;
use wand_core::WandType;

use super::{EventPriority, Listener, ListenerContext};
use crate::host::{EntityEvent, Hand};
use crate::plugin::report_issue;

/// Right-clicking a filled item frame with the item frame wand toggles the
/// frame's visibility.
pub struct ItemFrameInteractListener;

impl Listener for ItemFrameInteractListener {
    fn name(&self) -> &'static str {
        "item_frame_interact"
    }

    fn priority(&self) -> EventPriority {
        EventPriority::High
    }

    fn handle(&self, ctx: &mut ListenerContext<'_>, event: &mut EntityEvent<'_>) {
        let EntityEvent::Interact(event) = event else {
            return;
        };
        let Some(frame) = event.target.as_item_frame() else {
            return;
        };
        if frame.item().is_none_or(|item| item.material.is_air()) {
            return;
        }
        if event.hand != Hand::Main {
            return;
        }
        let Some(held) = event.main_hand else {
            return;
        };
        let Some(wand) = ctx.wands.get(&WandType::ItemFrame) else {
            report_issue("Unable to find item-frame configuration!");
            return;
        };
        if !wand.matches(held) {
            return;
        }

        let visible = !frame.is_visible();
        frame.set_visible(visible);
        event.cancelled = true;
        debug!(player = event.player, visible, "toggled item frame");
    }
}

/// Damaging an item frame makes it visible again.
pub struct ItemFrameDamageListener;

impl Listener for ItemFrameDamageListener {
    fn name(&self) -> &'static str {
        "item_frame_damage"
    }

    fn priority(&self) -> EventPriority {
        EventPriority::Monitor
    }

    fn handle(&self, _ctx: &mut ListenerContext<'_>, event: &mut EntityEvent<'_>) {
        let EntityEvent::Damage(event) = event else {
            return;
        };
        if let Some(frame) = event.target.as_item_frame() {
            frame.set_visible(true);
        }
    }
}
