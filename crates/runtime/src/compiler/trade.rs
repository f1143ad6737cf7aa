use arrayvec::ArrayVec;
use rand::Rng;
use wand_core::{
    ConfigError, ItemStack, MaterialCatalog, MaterialRef, MerchantRecipe, Range, TradeConfig,
    TradeIngredientConfig, require_non_air, require_percentage, resolve_material,
};

/// Offer factory for wandering traders.
///
/// Every call to [`generate`](Self::generate) draws fresh ingredient counts
/// and a fresh use limit; the result item and the chance stay fixed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WanderingTraderRecipe {
    chance: u8,
    result: ItemStack,
    uses: Range,
    ingredients: ArrayVec<(MaterialRef, Range), 2>,
}

impl WanderingTraderRecipe {
    pub(crate) fn build(
        path: &str,
        config: &TradeConfig,
        catalog: &dyn MaterialCatalog,
        result: &ItemStack,
    ) -> Result<Self, ConfigError> {
        let chance = require_percentage(&format!("{path}.chance"), config.chance)?;
        let uses = config.uses.validate(&format!("{path}.uses"), 1, None)?;

        let mut ingredients = ArrayVec::new();
        for (index, ingredient) in config.ingredients.iter().enumerate() {
            let item_path = format!("{path}.ingredients[{index}]");
            let type_path = format!("{item_path}.type");
            let material = resolve_material(catalog, &type_path, &ingredient.material)?;
            require_non_air(&type_path, &material)?;
            let count = ingredient.count.validate(
                &format!("{item_path}.count"),
                TradeIngredientConfig::MIN_COUNT,
                Some(TradeIngredientConfig::MAX_COUNT),
            )?;
            ingredients
                .try_push((material, count))
                .map_err(|_| ConfigError::InvalidIngredientCount {
                    path: format!("{path}.ingredients"),
                    count: config.ingredients.len(),
                })?;
        }
        if ingredients.is_empty() {
            return Err(ConfigError::InvalidIngredientCount {
                path: format!("{path}.ingredients"),
                count: 0,
            });
        }

        Ok(Self {
            chance,
            result: result.clone(),
            uses,
            ingredients,
        })
    }

    /// Chance in percent that a spawning trader offers this recipe.
    pub fn chance(&self) -> u8 {
        self.chance
    }

    pub fn result(&self) -> &ItemStack {
        &self.result
    }

    pub fn uses(&self) -> Range {
        self.uses
    }

    pub fn ingredients(&self) -> impl Iterator<Item = (&MaterialRef, Range)> {
        self.ingredients.iter().map(|(material, count)| (material, *count))
    }

    /// True with probability `chance / 100`.
    pub fn should_offer<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        rng.gen_range(0..100u8) < self.chance
    }

    /// Draws a new offer.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> MerchantRecipe {
        let ingredients = self
            .ingredients
            .iter()
            .map(|(material, count)| {
                // Counts are validated to 1..=64, so the draw fits a stack.
                let amount = rng.gen_range(count.as_inclusive()).min(ItemStack::MAX_STACK as u32);
                ItemStack::new(material.clone(), amount as u8)
            })
            .collect();

        MerchantRecipe {
            result: self.result.clone(),
            ingredients,
            uses: 0,
            max_uses: rng.gen_range(self.uses.as_inclusive()),
            experience_reward: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wand_core::{RangeConfig, StaticCatalog};

    use super::*;

    fn trade(count: (i64, i64)) -> TradeConfig {
        TradeConfig {
            enabled: true,
            chance: 10,
            uses: RangeConfig::new(2, 5),
            ingredients: vec![TradeIngredientConfig {
                material: "EMERALD".into(),
                count: RangeConfig::new(count.0, count.1),
            }],
        }
    }

    fn result() -> ItemStack {
        ItemStack::new(MaterialRef::new("WOODEN_SWORD"), 1)
    }

    #[test]
    fn draws_stay_within_configured_ranges() {
        let catalog = StaticCatalog::vanilla();
        let recipe =
            WanderingTraderRecipe::build("t", &trade((1, 3)), &catalog, &result()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1000 {
            let offer = recipe.generate(&mut rng);
            assert!((2..=5).contains(&offer.max_uses));
            assert_eq!(offer.uses, 0);
            assert_eq!(offer.ingredients.len(), 1);
            assert!((1..=3).contains(&offer.ingredients[0].amount));
            assert_eq!(offer.result, result());
        }
    }

    #[test]
    fn chance_is_roughly_respected() {
        let catalog = StaticCatalog::vanilla();
        let recipe =
            WanderingTraderRecipe::build("t", &trade((1, 3)), &catalog, &result()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let offered = (0..10_000).filter(|_| recipe.should_offer(&mut rng)).count();
        assert!((800..=1200).contains(&offered), "offered {offered} times");
    }

    #[test]
    fn full_chance_always_offers() {
        let catalog = StaticCatalog::vanilla();
        let mut config = trade((1, 3));
        config.chance = 100;
        let recipe = WanderingTraderRecipe::build("t", &config, &catalog, &result()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert!((0..1000).all(|_| recipe.should_offer(&mut rng)));
    }

    #[test]
    fn out_of_bounds_counts_fail() {
        let catalog = StaticCatalog::vanilla();
        for count in [(0, 3), (1, 65)] {
            let err = WanderingTraderRecipe::build("t", &trade(count), &catalog, &result())
                .unwrap_err();
            assert_eq!(err.error_code(), "CONFIG_INVALID_RANGE");
        }
    }

    #[test]
    fn generate_does_not_change_the_factory() {
        let catalog = StaticCatalog::vanilla();
        let recipe =
            WanderingTraderRecipe::build("t", &trade((20, 40)), &catalog, &result()).unwrap();
        let before = recipe.clone();
        let mut rng = StdRng::seed_from_u64(3);
        let _ = recipe.generate(&mut rng);
        assert_eq!(recipe, before);
    }
}
