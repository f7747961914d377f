//! Configuration for the editor and the `pxg` tool
//!
//! Provides types and loading for `pxg.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
