//! WASM API module for browser/JS interop
//!
//! Exposes an [`Editor`] that a page drives from its DOM events: pointer
//! events paint, resize events trigger a relayout, and the export buttons get
//! text or PNG bytes back.
//!
//! `std::time::Instant` is unavailable on `wasm32-unknown-unknown`, so the page
//! owns the resize timer: it waits [`Editor::resize_debounce_ms`] after the last
//! resize event and then calls [`Editor::relayout`].

use wasm_bindgen::prelude::*;

use crate::color;
use crate::config::PxgConfig;
use crate::layout::{GridLayout, Viewport};
use crate::output;
use crate::session::EditorSession;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// Cell size and track templates for the grid container.
#[wasm_bindgen]
pub struct LayoutResult {
    cell_size: u32,
    columns: String,
    rows: String,
}

#[wasm_bindgen]
impl LayoutResult {
    /// Side length of one cell in pixels
    #[wasm_bindgen(getter)]
    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Column template, e.g. `repeat(16, 30px)`
    #[wasm_bindgen(getter)]
    pub fn columns(&self) -> String {
        self.columns.clone()
    }

    /// Row template, e.g. `repeat(16, 30px)`
    #[wasm_bindgen(getter)]
    pub fn rows(&self) -> String {
        self.rows.clone()
    }
}

/// An editing session bound to one page.
#[wasm_bindgen]
pub struct Editor {
    session: EditorSession,
    resize_debounce_ms: u32,
}

#[wasm_bindgen]
impl Editor {
    /// Create an editor with the default 16x16 grid and settings.
    #[wasm_bindgen(constructor)]
    #[allow(clippy::new_without_default)]
    pub fn new() -> Result<Editor, String> {
        let config = PxgConfig::default();
        let session = EditorSession::new(&config).map_err(|e| e.to_string())?;
        Ok(Editor {
            session,
            resize_debounce_ms: config.layout.resize_debounce_ms as u32,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.session.grid().width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.session.grid().height()
    }

    /// Replace the grid with a blank one. On error the current grid is kept.
    pub fn generate(&mut self, width: usize, height: usize) -> Result<(), String> {
        self.session.generate(width, height).map_err(|e| e.to_string())
    }

    /// Canonical hex8 color of the cell at `index`.
    pub fn cell_color(&self, index: usize) -> Result<String, String> {
        self.session.cell_color(index).map_err(|e| e.to_string())
    }

    /// Free color choice from the color input. Alpha is kept.
    pub fn set_color(&mut self, base: &str) {
        self.session.set_color(base);
    }

    /// Preset swatch click. Alpha resets to 255.
    pub fn select_preset(&mut self, base: &str) {
        self.session.select_preset(base);
    }

    pub fn presets(&self) -> Vec<String> {
        self.session.presets().to_vec()
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.session.set_alpha(alpha);
    }

    pub fn set_brush_size(&mut self, size: u32) -> Result<(), String> {
        self.session.set_brush_size(size).map_err(|e| e.to_string())
    }

    /// Color string the next stroke writes.
    pub fn active_color(&self) -> String {
        self.session.active_color()
    }

    pub fn pointer_down(&mut self, index: usize) -> Result<usize, String> {
        self.session.pointer_down(index).map_err(|e| e.to_string())
    }

    pub fn pointer_move(&mut self, index: usize) -> Result<usize, String> {
        self.session.pointer_move(index).map_err(|e| e.to_string())
    }

    pub fn pointer_up(&mut self) {
        self.session.pointer_up();
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    pub fn fill(&mut self) {
        self.session.fill();
    }

    pub fn export_text(&self) -> String {
        self.session.export_text()
    }

    /// Import a text export. On error the current grid is kept.
    pub fn import_text(&mut self, text: &str) -> Result<(), String> {
        self.session.import_text(text).map_err(|e| e.to_string())
    }

    /// Scaled raster export as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, String> {
        self.session.export_png().map_err(|e| e.to_string())
    }

    /// Download name for an export, e.g. `pixel-art-16x16-2024-05-01.png`.
    /// `date` comes from the page's clock as `YYYY-MM-DD`.
    pub fn export_file_name(&self, date: &str, ext: &str) -> String {
        output::export_file_name(self.width(), self.height(), date, ext)
    }

    /// Quiet period the page should wait after the last resize event.
    #[wasm_bindgen(getter)]
    pub fn resize_debounce_ms(&self) -> u32 {
        self.resize_debounce_ms
    }

    /// Recompute the cell size for a new viewport. Cell colors are untouched.
    pub fn relayout(&mut self, width: u32, height: u32) -> LayoutResult {
        self.session.relayout(Viewport::new(width, height)).into()
    }

    /// Current layout.
    pub fn layout(&self) -> LayoutResult {
        self.session.layout().into()
    }
}

impl From<GridLayout> for LayoutResult {
    fn from(layout: GridLayout) -> Self {
        LayoutResult {
            cell_size: layout.cell_size,
            columns: layout.column_template(),
            rows: layout.row_template(),
        }
    }
}

/// Canonical 8-digit hex for any color string.
#[wasm_bindgen]
pub fn canonical_hex8(input: &str) -> String {
    color::to_canonical_hex8(input)
}

/// Shortest hex form of a color, as written in text exports.
#[wasm_bindgen]
pub fn compress_hex(input: &str) -> String {
    color::compress(input)
}

/// Apply a 0-255 alpha to a base color.
#[wasm_bindgen]
pub fn compose_with_alpha(base: &str, alpha: u8) -> String {
    color::compose_with_alpha(base, alpha)
}
