//! Shared package identity types for picl.
//!
//! A package is addressed on the command line as `name@version`. This crate
//! owns the newtypes for both halves and the parser that splits them.

pub mod spec;
pub mod types;

// Re-exports
pub use spec::{PackageSpec, SpecError};
pub use types::*;
