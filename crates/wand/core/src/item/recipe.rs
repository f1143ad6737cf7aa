use std::collections::BTreeMap;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{ItemStack, MaterialRef, NamespacedKey};

/// Shaped crafting recipe registered with the host under [`ShapedRecipe::key`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapedRecipe {
    pub key: NamespacedKey,
    pub result: ItemStack,
    /// One to three rows of one to three placeholder characters.
    pub shape: ArrayVec<String, 3>,
    /// Ingredient for every placeholder that appears in `shape`.
    pub ingredients: BTreeMap<char, MaterialRef>,
}

impl ShapedRecipe {
    /// Materials actually used by the grid, in placeholder order.
    pub fn materials(&self) -> impl Iterator<Item = &MaterialRef> {
        self.ingredients.values()
    }
}

/// A single trade offer as held by a merchant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantRecipe {
    pub result: ItemStack,
    pub ingredients: ArrayVec<ItemStack, 2>,
    pub uses: u32,
    pub max_uses: u32,
    pub experience_reward: bool,
}
