use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to a material known by the host catalog.
///
/// Instances are handed out by a [`crate::MaterialCatalog`]; the stored name
/// is the catalog's canonical spelling (upper snake case).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialRef(String);

impl MaterialRef {
    const AIR_VARIANTS: [&'static str; 3] = ["AIR", "CAVE_AIR", "VOID_AIR"];

    /// Wraps a canonical material name. Catalog implementations call this.
    pub fn new(canonical: impl Into<String>) -> Self {
        Self(canonical.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the air materials, which can't be held or crafted.
    pub fn is_air(&self) -> bool {
        Self::AIR_VARIANTS.contains(&self.0.as_str())
    }
}

impl fmt::Display for MaterialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
