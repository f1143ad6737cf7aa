//! Public runtime API surface.
//!
//! This module gathers the error types exposed to consumers of the runtime
//! crate so the other modules can stay focused on compiling, dispatching and
//! integrating.

pub mod errors;

pub use errors::{FieldError, IntegrationError, Result, RuntimeError};
