use wand_core::ItemStack;

use super::EntityMut;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hand {
    Main,
    Off,
}

/// A player right-clicked an entity.
pub struct PlayerInteractEntity<'a> {
    pub player: &'a str,
    pub hand: Hand,
    /// What the player holds in their main hand.
    pub main_hand: Option<&'a ItemStack>,
    pub target: EntityMut<'a>,
    pub cancelled: bool,
}

/// Something damaged an entity.
pub struct EntityDamage<'a> {
    pub target: EntityMut<'a>,
    pub cancelled: bool,
}

/// A creature was spawned into the world.
pub struct CreatureSpawn<'a> {
    pub target: EntityMut<'a>,
    pub cancelled: bool,
}

/// Events that target a single entity.
pub enum EntityEvent<'a> {
    Interact(PlayerInteractEntity<'a>),
    Damage(EntityDamage<'a>),
    Spawn(CreatureSpawn<'a>),
}

impl EntityEvent<'_> {
    pub fn is_cancelled(&self) -> bool {
        match self {
            EntityEvent::Interact(e) => e.cancelled,
            EntityEvent::Damage(e) => e.cancelled,
            EntityEvent::Spawn(e) => e.cancelled,
        }
    }
}

/// Another plugin was enabled or disabled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginStateChange {
    pub plugin: String,
    pub enabled: bool,
}
