//! Configuration schema types for `pxg.toml`
//!
//! Defines the structure and validation rules for editor configuration.

use serde::{Deserialize, Serialize};

use crate::color::is_recognized_color;
use crate::grid::{MAX_DIMENSION, MIN_DIMENSION};
use crate::serialize::{DEFAULT_RASTER_SCALE, MAX_RASTER_SCALE};

/// Preset colors offered when the config does not list any.
pub const DEFAULT_PRESETS: &[&str] = &[
    "#000000", "#ffffff", "#ff0000", "#00ff00", "#0000ff", "#ffff00", "#ff00ff", "#00ffff",
    "#ff8000", "#8000ff", "#804000", "#808080",
];

/// Editor defaults: the grid, brush and color a new session starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Grid width in cells
    #[serde(default = "default_dimension")]
    pub width: usize,
    /// Grid height in cells
    #[serde(default = "default_dimension")]
    pub height: usize,
    /// Brush size (1 paints a single cell)
    #[serde(default = "default_brush_size")]
    pub brush_size: u32,
    /// Initial base color
    #[serde(default = "default_color")]
    pub color: String,
    /// Initial alpha, 0-255
    #[serde(default = "default_alpha")]
    pub alpha: u8,
    /// Preset base colors
    #[serde(default = "default_presets")]
    pub presets: Vec<String>,
}

fn default_dimension() -> usize {
    16
}

fn default_brush_size() -> u32 {
    1
}

fn default_color() -> String {
    "#000000".to_string()
}

fn default_alpha() -> u8 {
    255
}

fn default_presets() -> Vec<String> {
    DEFAULT_PRESETS.iter().map(|s| s.to_string()).collect()
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            width: default_dimension(),
            height: default_dimension(),
            brush_size: default_brush_size(),
            color: default_color(),
            alpha: default_alpha(),
            presets: default_presets(),
        }
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Pixels per cell in raster exports
    #[serde(default = "default_scale")]
    pub scale: u32,
}

fn default_scale() -> u32 {
    DEFAULT_RASTER_SCALE
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { scale: default_scale() }
    }
}

/// Layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Quiet window before a viewport resize triggers a relayout, in milliseconds
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
    /// Viewport assumed before the first resize signal, [width, height]
    #[serde(default = "default_viewport")]
    pub viewport: [u32; 2],
}

fn default_resize_debounce_ms() -> u64 {
    250
}

fn default_viewport() -> [u32; 2] {
    [800, 600]
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { resize_debounce_ms: default_resize_debounce_ms(), viewport: default_viewport() }
    }
}

/// Complete pxg.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PxgConfig {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "editor.width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pxg.toml: '{}' {}", self.field, self.message)
    }
}

impl PxgConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: String, message: String| {
            errors.push(ConfigValidationError { field, message });
        };

        let dims = MIN_DIMENSION..=MAX_DIMENSION;
        if !dims.contains(&self.editor.width) {
            push("editor.width".into(), format!("must be between {} and {}", MIN_DIMENSION, MAX_DIMENSION));
        }
        if !dims.contains(&self.editor.height) {
            push("editor.height".into(), format!("must be between {} and {}", MIN_DIMENSION, MAX_DIMENSION));
        }
        if self.editor.brush_size == 0 {
            push("editor.brush_size".into(), "must be a positive integer".into());
        }
        if !is_recognized_color(&self.editor.color) {
            push("editor.color".into(), format!("'{}' is not a hex or rgb() color", self.editor.color));
        }
        for (i, preset) in self.editor.presets.iter().enumerate() {
            if !is_recognized_color(preset) {
                push(format!("editor.presets[{}]", i), format!("'{}' is not a hex or rgb() color", preset));
            }
        }

        if self.export.scale == 0 || self.export.scale > MAX_RASTER_SCALE {
            push("export.scale".into(), format!("must be between 1 and {}", MAX_RASTER_SCALE));
        }

        errors
    }
}
