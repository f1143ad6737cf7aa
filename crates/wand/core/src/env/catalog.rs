use std::collections::BTreeSet;

use crate::item::MaterialRef;

/// Host lookup from a user-supplied material name to a known material.
pub trait MaterialCatalog {
    /// Resolves `name`, tolerating case, a `minecraft:` prefix, whitespace and
    /// punctuation. Returns `None` for unknown materials.
    fn match_material(&self, name: &str) -> Option<MaterialRef>;
}

impl<C: MaterialCatalog + ?Sized> MaterialCatalog for &C {
    fn match_material(&self, name: &str) -> Option<MaterialRef> {
        (**self).match_material(name)
    }
}

/// Normalises a material name the way the host's lookup does:
/// strip a `minecraft:` namespace, uppercase, collapse whitespace runs into
/// `_`, then drop anything that is not a word character.
pub fn normalize_material_name(name: &str) -> String {
    let trimmed = name.trim();
    let bare = match trimmed.split_once(':') {
        Some((namespace, rest)) if namespace.eq_ignore_ascii_case("minecraft") => rest,
        _ => trimmed,
    };

    let mut out = String::with_capacity(bare.len());
    let mut in_space = false;
    for c in bare.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || c == '_' {
            out.push(c.to_ascii_uppercase());
        }
    }
    out
}

/// Fixed material catalog backed by a set of canonical names.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    materials: BTreeSet<String>,
}

impl StaticCatalog {
    /// Materials a stock server always knows about that wand configs commonly use.
    const VANILLA: &'static [&'static str] = &[
        "AIR", "CAVE_AIR", "VOID_AIR", "ARMOR_STAND", "BLAZE_ROD", "BONE", "BOOK", "BOW",
        "CHORUS_FRUIT", "COAL", "COBBLESTONE", "COPPER_INGOT", "DIAMOND", "DIAMOND_SWORD",
        "DIRT", "EMERALD", "EMERALD_BLOCK", "END_ROD", "ENDER_EYE", "ENDER_PEARL", "FEATHER",
        "FLINT", "GLASS_PANE", "GLOWSTONE_DUST", "GLOW_ITEM_FRAME", "GOLDEN_SWORD", "GOLD_INGOT",
        "GOLD_NUGGET", "IRON_INGOT", "IRON_NUGGET", "IRON_SWORD", "ITEM_FRAME", "LAPIS_LAZULI",
        "LEATHER", "NETHER_STAR", "OAK_PLANKS", "PAPER", "PHANTOM_MEMBRANE", "PRISMARINE_SHARD",
        "QUARTZ", "REDSTONE", "SHEARS", "STICK", "STONE", "STONE_SWORD", "STRING",
        "WOODEN_AXE", "WOODEN_HOE", "WOODEN_PICKAXE", "WOODEN_SHOVEL", "WOODEN_SWORD",
    ];

    pub fn new<I, S>(materials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            materials: materials
                .into_iter()
                .map(|name| normalize_material_name(name.as_ref()))
                .collect(),
        }
    }

    pub fn vanilla() -> Self {
        Self::new(Self::VANILLA.iter().copied())
    }

    pub fn insert(&mut self, name: &str) {
        self.materials.insert(normalize_material_name(name));
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.materials.remove(&normalize_material_name(name))
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl MaterialCatalog for StaticCatalog {
    fn match_material(&self, name: &str) -> Option<MaterialRef> {
        let normalized = normalize_material_name(name);
        self.materials
            .get(&normalized)
            .map(|canonical| MaterialRef::new(canonical.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_host_aliases() {
        assert_eq!(normalize_material_name("minecraft:emerald"), "EMERALD");
        assert_eq!(normalize_material_name("wooden sword"), "WOODEN_SWORD");
        assert_eq!(normalize_material_name("  Wooden   Sword "), "WOODEN_SWORD");
        assert_eq!(normalize_material_name("ender-pearl"), "ENDERPEARL");
    }

    #[test]
    fn vanilla_lookup_is_case_insensitive() {
        let catalog = StaticCatalog::vanilla();
        assert_eq!(
            catalog.match_material("Emerald"),
            Some(MaterialRef::new("EMERALD"))
        );
        assert_eq!(catalog.match_material("unobtainium"), None);
    }

    #[test]
    fn removed_material_no_longer_resolves() {
        let mut catalog = StaticCatalog::vanilla();
        assert!(catalog.remove("stick"));
        assert_eq!(catalog.match_material("STICK"), None);
    }
}
