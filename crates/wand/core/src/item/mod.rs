//! Host item model.
//!
//! The subset of the game server's item, persistent-data and recipe types the
//! plugin produces. Host bindings translate these into their native objects.
mod key;
mod material;
mod recipe;
mod stack;

pub use key::{NamespacedKey, PersistentDataContainer, PersistentFlag};
pub use material::MaterialRef;
pub use recipe::{MerchantRecipe, ShapedRecipe};
pub use stack::{ItemMeta, ItemStack, translate_color_codes};
