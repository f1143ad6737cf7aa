//! Primitive validators.
//!
//! Each function checks one value against one constraint and reports the
//! failure with the YAML `path` it came from. None of them fall back to a
//! default on bad input.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::env::MaterialCatalog;
use crate::error::{ConfigError, Result};
use crate::item::MaterialRef;

/// A validated inclusive integer range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    min: u32,
    max: u32,
}

impl Range {
    pub const fn min(&self) -> u32 {
        self.min
    }

    pub const fn max(&self) -> u32 {
        self.max
    }

    pub const fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    pub const fn as_inclusive(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }
}

pub fn resolve_material(catalog: &dyn MaterialCatalog, path: &str, name: &str) -> Result<MaterialRef> {
    catalog
        .match_material(name)
        .ok_or_else(|| ConfigError::UnknownMaterial {
            path: path.to_string(),
            name: name.to_string(),
        })
}

pub fn require_non_air(path: &str, material: &MaterialRef) -> Result<()> {
    if material.is_air() {
        return Err(ConfigError::InvalidMaterial {
            path: path.to_string(),
            material: material.to_string(),
        });
    }
    Ok(())
}

/// Checks `lower <= min <= max` (and `max <= upper` when an upper bound is given).
pub fn require_range(
    path: &str,
    min: i64,
    max: i64,
    lower: i64,
    upper: Option<i64>,
) -> Result<Range> {
    let bounded_above = upper.is_none_or(|upper| max <= upper);
    let representable = u32::try_from(min).is_ok() && u32::try_from(max).is_ok();
    if min < lower || min > max || !bounded_above || !representable {
        return Err(ConfigError::InvalidRange {
            path: path.to_string(),
            min,
            max,
            lower,
            upper,
        });
    }
    Ok(Range {
        min: min as u32,
        max: max as u32,
    })
}

/// Checks a chance in `(0, 100]`.
pub fn require_percentage(path: &str, value: i64) -> Result<u8> {
    if !(1..=100).contains(&value) {
        return Err(ConfigError::InvalidPercentage {
            path: path.to_string(),
            value,
        });
    }
    Ok(value as u8)
}

/// Checks an item amount in `lower..=upper`.
pub fn require_quantity(path: &str, value: i64, lower: u8, upper: u8) -> Result<u8> {
    if value < i64::from(lower) || value > i64::from(upper) {
        return Err(ConfigError::InvalidQuantity {
            path: path.to_string(),
            value,
            lower: i64::from(lower),
            upper: i64::from(upper),
        });
    }
    Ok(value as u8)
}
