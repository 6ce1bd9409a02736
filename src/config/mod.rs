//! Configuration for zxtex
//!
//! Provides types and loading for optional `zxtex.toml` defaults.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
