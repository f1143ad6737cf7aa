//! Traits describing read-only host data.
//!
//! The host server owns the material catalog; validation and compilation only
//! see it through [`MaterialCatalog`], so tests and offline tools can supply a
//! [`StaticCatalog`] instead.
mod catalog;

pub use catalog::{MaterialCatalog, StaticCatalog, normalize_material_name};
