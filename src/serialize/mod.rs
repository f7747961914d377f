//! Conversions between a grid and its exchange formats.
//!
//! - [`text`]: row-major comma-separated compressed hex, with `# ` comment header
//! - [`raster`]: nearest-neighbor upscaled RGBA image

pub mod raster;
pub mod text;

pub use raster::{export_raster, RasterError, DEFAULT_RASTER_SCALE, MAX_RASTER_SCALE};
pub use text::{export_text, import_text, ImportError};
