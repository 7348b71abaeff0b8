//! Configuration types for Wax.
//!
//! This crate provides the configuration read from `.wax/config.yaml`
//! and the environment variables Wax understands.

pub mod env;
pub mod loader;
pub mod types;

pub use env::*;
pub use loader::*;
pub use types::*;
