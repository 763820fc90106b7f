//! Configuration module for iconbake
//!
//! Provides types and parsing for `iconbake.toml` configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
