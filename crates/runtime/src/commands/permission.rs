use bitflags::bitflags;

use crate::host::CommandSender;

bitflags! {
    /// Permissions gating the chat commands.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Permission: u8 {
        const GIVE   = 1 << 0;
        const RELOAD = 1 << 1;
    }
}

const NODES: [(Permission, &str); 2] = [
    (Permission::GIVE, "wanderfuladditions.give"),
    (Permission::RELOAD, "wanderfuladditions.reload"),
];

impl Permission {
    /// Host permission node for a single permission.
    pub fn node(self) -> Option<&'static str> {
        NODES.iter().find(|(p, _)| *p == self).map(|(_, node)| *node)
    }

    /// Everything `sender` is allowed to do.
    pub fn granted_to(sender: &dyn CommandSender) -> Self {
        NODES
            .iter()
            .filter(|(_, node)| sender.has_permission(node))
            .fold(Permission::empty(), |acc, (p, _)| acc | *p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ConsoleSender, WorldPlayer};

    #[test]
    fn nodes() {
        assert_eq!(Permission::GIVE.node(), Some("wanderfuladditions.give"));
        assert_eq!(Permission::RELOAD.node(), Some("wanderfuladditions.reload"));
        assert_eq!(Permission::all().node(), None);
    }

    #[test]
    fn granted_permissions() {
        let player = WorldPlayer::new("Alex").with_permission("wanderfuladditions.give");
        assert_eq!(Permission::granted_to(&player), Permission::GIVE);
        assert_eq!(Permission::granted_to(&WorldPlayer::new("Steve")), Permission::empty());
        assert_eq!(Permission::granted_to(&ConsoleSender::default()), Permission::all());
    }
}
