//! Pixelgrid - core of a browser-style pixel art editor
//!
//! This library provides functionality to:
//! - Parse and normalize colors (hex, `rgb()`, `rgba()`) into canonical 8-digit hex
//! - Paint a bounded grid of cells with a round brush
//! - Export and import grids as comma-separated hex text
//! - Render grids to scaled PNG images
//! - Compute display cell sizes for a viewport, with debounced resizes

pub mod brush;
pub mod cli;
pub mod color;
pub mod config;
pub mod grid;
pub mod layout;
pub mod output;
pub mod serialize;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;
