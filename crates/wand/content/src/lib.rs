//! Settings store for wand definitions.
//!
//! This crate owns the persisted YAML document:
//! - reading it (a missing file means "all defaults")
//! - upgrading the flat single-wand layout to the keyed multi-wand layout
//! - filling in defaults for keys the document does not mention
//! - validating every wand type before exposing the new mapping
//! - writing it back with a comment above every documented key
//!
//! It is the only crate that touches the file system.

mod document;
mod error;
pub mod migration;
pub mod schema;
mod store;
pub mod writer;

pub use error::{Result, SettingsError};
pub use migration::{SchemaVersion, migrate};
pub use schema::{SettingDoc, WAND_FIELDS, field_doc, section_doc};
pub use store::{SettingsStore, WandSettings};
pub use writer::render_settings;
