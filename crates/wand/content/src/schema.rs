//! Schema description of a wand subtree.
//!
//! Field paths are relative to a wand type's top-level key. The table drives
//! two things: the comments written above each key by [`crate::writer`], and
//! how [`crate::document`] layers a user document over the defaults (which
//! values are replaced wholesale rather than merged key by key).

use wand_core::WandType;

macro_rules! material_list {
    () => {
        "Possible values: see https://papermc.io/javadocs/paper/1.16/org/bukkit/Material.html"
    };
}

/// How a field's user value is combined with its default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeRule {
    /// Nested mapping: merge key by key.
    Merge,
    /// User value replaces the default completely.
    Replace,
    /// Sequence of records: each element is merged over the element default.
    EachElement,
}

#[derive(Clone, Copy, Debug)]
pub struct SettingDoc {
    pub path: &'static str,
    pub comment: &'static [&'static str],
    pub merge: MergeRule,
}

pub const WAND_FIELDS: &[SettingDoc] = &[
    SettingDoc {
        path: "enabled",
        comment: &["Whether this wand can be obtained at all."],
        merge: MergeRule::Replace,
    },
    SettingDoc {
        path: "item",
        comment: &["The wand item itself. It is the result of crafting and trading."],
        merge: MergeRule::Merge,
    },
    SettingDoc {
        path: "item.type",
        comment: &["Item type used for the wand.", material_list!()],
        merge: MergeRule::Replace,
    },
    SettingDoc {
        path: "item.name",
        comment: &["Color codes escaped with '&' are supported."],
        merge: MergeRule::Replace,
    },
    SettingDoc {
        path: "item.lore",
        comment: &["Lines shown under the item name.", "Color codes escaped with '&' are supported."],
        merge: MergeRule::Replace,
    },
    SettingDoc {
        path: "item.glow",
        comment: &["Whether the wand has an enchantment glint."],
        merge: MergeRule::Replace,
    },
    SettingDoc {
        path: "crafting",
        comment: &["Crafting recipe for the wand."],
        merge: MergeRule::Merge,
    },
    SettingDoc {
        path: "crafting.shape",
        comment: &[
            "Grid the ingredients are placed in.",
            "1 to 3 rows, each with 1 to 3 placeholders. All rows have the same width.",
            "A space is an empty slot.",
        ],
        merge: MergeRule::Replace,
    },
    SettingDoc {
        path: "crafting.ingredients",
        comment: &[
            "Placeholder (as used in the shape) to ingredient type.",
            material_list!(),
        ],
        merge: MergeRule::Replace,
    },
    SettingDoc {
        path: "crafting.amount",
        comment: &["How many wands a single craft yields (1 to 64)."],
        merge: MergeRule::Replace,
    },
    SettingDoc {
        path: "wandering_trader",
        comment: &["Wandering traders selling the wand."],
        merge: MergeRule::Merge,
    },
    SettingDoc {
        path: "wandering_trader.chance",
        comment: &["Chance in percent (1 to 100) that a spawning trader offers the wand."],
        merge: MergeRule::Replace,
    },
    SettingDoc {
        path: "wandering_trader.uses",
        comment: &["How many times the offer can be used before it runs out."],
        merge: MergeRule::Merge,
    },
    SettingDoc {
        path: "wandering_trader.ingredients",
        comment: &[
            "1 or 2 ingredients the trader asks for.",
            material_list!(),
            "Each offer asks for a random count between `count.min` and `count.max` (1 to 64).",
        ],
        merge: MergeRule::EachElement,
    },
];

/// Documentation entry for a relative field path.
pub fn field_doc(path: &str) -> Option<&'static SettingDoc> {
    WAND_FIELDS.iter().find(|doc| doc.path == path)
}

/// Merge rule for a relative field path; undocumented paths merge key by key.
pub fn merge_rule(path: &str) -> MergeRule {
    field_doc(path).map_or(MergeRule::Merge, |doc| doc.merge)
}

/// Header comment written above a wand type's subtree.
pub fn section_doc(wand: WandType) -> &'static [&'static str] {
    match wand {
        WandType::ItemFrame => &[
            "Wand toggling item frame visibility.",
            "Right-click a filled item frame while holding it.",
        ],
        WandType::ArmorStand => &[
            "Edit tool for the ArmorStandEditor plugin.",
            "Only used while ArmorStandEditor is installed.",
        ],
    }
}
