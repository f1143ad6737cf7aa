use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wand_core::{
    NamespacedKey, PersistentFlag, RangeConfig, StaticCatalog, TradeIngredientConfig, WandType,
};
use wand_runtime::{WandIdentity, compile};

fn identity() -> WandIdentity {
    WandIdentity {
        flag: PersistentFlag::marker(NamespacedKey::new("wanderfuladditions", "item_frame_wand").unwrap()),
        crafting_key: NamespacedKey::new("wanderfuladditions", "item_frame_crafting").unwrap(),
    }
}

fn ordered(a: i64, b: i64) -> (i64, i64) {
    (a.min(b), a.max(b))
}

proptest! {
    #[test]
    fn test_generated_offers_stay_in_configured_ranges(
        uses in (1i64..500, 1i64..500),
        first in (1i64..=64, 1i64..=64),
        second in proptest::option::of((1i64..=64, 1i64..=64)),
        seed in any::<u64>(),
    ) {
        let catalog = StaticCatalog::vanilla();
        let mut config = WandType::ItemFrame.default_config();
        let (uses_min, uses_max) = ordered(uses.0, uses.1);
        config.wandering_trader.uses = RangeConfig::new(uses_min, uses_max);

        let (first_min, first_max) = ordered(first.0, first.1);
        let mut ingredients = vec![TradeIngredientConfig {
            material: "EMERALD".into(),
            count: RangeConfig::new(first_min, first_max),
        }];
        if let Some((a, b)) = second {
            let (min, max) = ordered(a, b);
            ingredients.push(TradeIngredientConfig {
                material: "DIAMOND".into(),
                count: RangeConfig::new(min, max),
            });
        }
        config.wandering_trader.ingredients = ingredients.clone();

        let compiled = compile(WandType::ItemFrame, &config, &catalog, identity()).unwrap();
        let trade = compiled.active_trade().unwrap();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..8 {
            let offer = trade.generate(&mut rng);
            prop_assert_eq!(offer.uses, 0);
            prop_assert!(!offer.experience_reward);
            prop_assert!((uses_min..=uses_max).contains(&i64::from(offer.max_uses)));
            prop_assert_eq!(offer.ingredients.len(), ingredients.len());
            for (stack, ingredient) in offer.ingredients.iter().zip(&ingredients) {
                let amount = i64::from(stack.amount);
                prop_assert!((ingredient.count.min..=ingredient.count.max).contains(&amount));
            }
            prop_assert_eq!(&offer.result, &compiled.item);
        }
    }

    #[test]
    fn test_full_chance_always_offers(seed in any::<u64>()) {
        let catalog = StaticCatalog::vanilla();
        let mut config = WandType::ItemFrame.default_config();
        config.wandering_trader.chance = 100;
        let compiled = compile(WandType::ItemFrame, &config, &catalog, identity()).unwrap();
        let trade = compiled.active_trade().unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        prop_assert!(trade.should_offer(&mut rng));
    }
}
