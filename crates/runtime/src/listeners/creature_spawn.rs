use tracing::debug;

use super::{Listener, ListenerContext};
use crate::host::EntityEvent;

/// Adds wand offers to freshly spawned wandering traders.
pub struct WanderingTraderListener;

impl Listener for WanderingTraderListener {
    fn name(&self) -> &'static str {
        "wandering_trader"
    }

    fn handle(&self, ctx: &mut ListenerContext<'_>, event: &mut EntityEvent<'_>) {
        if !ctx.trades_active {
            return;
        }
        let EntityEvent::Spawn(event) = event else {
            return;
        };
        let Some(trader) = event.target.as_wandering_trader() else {
            return;
        };

        for wand in ctx.wands.values() {
            let Some(trade) = wand.active_trade() else {
                continue;
            };
            if !trade.should_offer(&mut *ctx.rng) {
                continue;
            }
            let offer = trade.generate(&mut *ctx.rng);
            debug!(wand = %wand.wand, max_uses = offer.max_uses, "added wandering trader offer");
            trader.add_recipe(offer);
        }
    }
}
