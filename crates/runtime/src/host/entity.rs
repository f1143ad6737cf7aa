use wand_core::{ItemStack, MerchantRecipe};

pub trait ItemFrameEntity {
    /// Item displayed in the frame, `None` when empty.
    fn item(&self) -> Option<&ItemStack>;

    fn is_visible(&self) -> bool;

    fn set_visible(&mut self, visible: bool);
}

pub trait Merchant {
    fn recipes(&self) -> &[MerchantRecipe];

    fn add_recipe(&mut self, recipe: MerchantRecipe);
}

/// Entity targeted by an event, narrowed to the kinds the plugin cares about.
pub enum EntityMut<'a> {
    ItemFrame(&'a mut dyn ItemFrameEntity),
    WanderingTrader(&'a mut dyn Merchant),
    Other,
}

impl EntityMut<'_> {
    pub fn as_item_frame(&mut self) -> Option<&mut dyn ItemFrameEntity> {
        match self {
            EntityMut::ItemFrame(frame) => Some(&mut **frame),
            _ => None,
        }
    }

    pub fn as_wandering_trader(&mut self) -> Option<&mut dyn Merchant> {
        match self {
            EntityMut::WanderingTrader(merchant) => Some(&mut **merchant),
            _ => None,
        }
    }
}
