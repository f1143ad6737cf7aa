use serde::{Deserialize, Serialize};

use super::{MaterialRef, PersistentDataContainer};

/// Section sign the host uses to introduce a formatting code.
const COLOR_CHAR: char = '\u{00A7}';
const COLOR_CODES: &str = "0123456789AaBbCcDdEeFfKkLlMmNnOoRrXx";

/// Translates `&`-escaped formatting codes into the host's `§` codes.
///
/// Only an `&` directly followed by a valid code character is translated, so
/// text like `Fish & Chips` is left alone.
pub fn translate_color_codes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '&' && COLOR_CODES.contains(next) => {
                out.push(COLOR_CHAR);
                out.push(next.to_ascii_lowercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

/// Display and data attached to an item stack.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMeta {
    pub display_name: Option<String>,
    pub lore: Vec<String>,
    /// Enchantment glint with the enchantment itself hidden from the tooltip.
    pub glow: bool,
    pub persistent_data: PersistentDataContainer,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub material: MaterialRef,
    pub amount: u8,
    pub meta: ItemMeta,
}

impl ItemStack {
    pub const MAX_STACK: u8 = 64;

    pub fn new(material: MaterialRef, amount: u8) -> Self {
        Self {
            material,
            amount,
            meta: ItemMeta::default(),
        }
    }

    /// Same item with a different amount.
    pub fn with_amount(&self, amount: u8) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}
