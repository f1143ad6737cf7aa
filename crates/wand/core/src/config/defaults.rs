use super::{CraftingConfig, ItemAppearance, RangeConfig, TradeConfig, TradeIngredientConfig, WandConfig};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_trade() -> TradeConfig {
    TradeConfig {
        enabled: true,
        chance: 10,
        uses: RangeConfig::new(2, 5),
        ingredients: vec![TradeIngredientConfig {
            material: "EMERALD".into(),
            count: RangeConfig::new(20, 40),
        }],
    }
}

pub(super) fn item_frame() -> WandConfig {
    WandConfig {
        enabled: true,
        item: ItemAppearance {
            material: "WOODEN_SWORD".into(),
            name: "&6Item Frame Wand".into(),
            lore: strings(&["&2Now you see me,", "&4now you don't"]),
            glow: true,
        },
        crafting: CraftingConfig {
            enabled: true,
            shape: strings(&["E", "E", "S"]),
            ingredients: [("E", "EMERALD"), ("S", "STICK")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            amount: 1,
        },
        wandering_trader: default_trade(),
    }
}

/// Flint is ArmorStandEditor's own default edit tool.
pub(super) fn armor_stand() -> WandConfig {
    WandConfig {
        enabled: true,
        item: ItemAppearance {
            material: "FLINT".into(),
            name: "&6Armor Stand Wand".into(),
            lore: strings(&["&2Strike a pose,", "&4any pose"]),
            glow: true,
        },
        crafting: CraftingConfig {
            enabled: true,
            shape: strings(&["E", "F", "S"]),
            ingredients: [("E", "EMERALD"), ("F", "FLINT"), ("S", "STICK")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            amount: 1,
        },
        wandering_trader: default_trade(),
    }
}
