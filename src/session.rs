//! Editing session: one grid plus the tool state a UI drives.
//!
//! The UI layer translates its events into calls on [`EditorSession`]:
//! pointer down/move/up become brush stamps, viewport resizes go through a
//! debouncer, and import/export hand back plain strings or image buffers.
//! Errors leave the session as it was, so a failed import keeps the old artwork.

use std::time::{Duration, Instant};

use image::RgbaImage;
use thiserror::Error;

use crate::brush::{Brush, BrushError};
use crate::color::{compose_with_alpha, Color};
use crate::config::PxgConfig;
use crate::grid::{CellPos, Grid, GridError};
use crate::layout::{compute_layout, GridLayout, ResizeDebouncer, Viewport};
use crate::output::{encode_png, OutputError};
use crate::serialize::{export_raster, export_text, import_text, ImportError, RasterError, MAX_RASTER_SCALE};

/// Error type for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("import failed: {0}")]
    Import(#[from] ImportError),
    #[error(transparent)]
    Brush(#[from] BrushError),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error(transparent)]
    Output(#[from] OutputError),
    /// Reading an import file failed.
    #[error("Error reading file: {0}")]
    Io(#[from] std::io::Error),
}

/// A single editing session.
#[derive(Debug, Clone)]
pub struct EditorSession {
    grid: Grid,
    base_color: String,
    alpha: u8,
    brush: Brush,
    presets: Vec<String>,
    drawing: bool,
    raster_scale: u32,
    viewport: Viewport,
    layout: GridLayout,
    debouncer: ResizeDebouncer,
    pending_viewport: Option<Viewport>,
}

impl EditorSession {
    /// Start a session from configuration, with a blank grid of the configured size.
    pub fn new(config: &PxgConfig) -> Result<Self, SessionError> {
        let editor = &config.editor;
        let grid = Grid::new(editor.width, editor.height)?;
        let brush = Brush::new(editor.brush_size)?;
        if config.export.scale == 0 || config.export.scale > MAX_RASTER_SCALE {
            return Err(RasterError::InvalidScale(config.export.scale).into());
        }
        let [vw, vh] = config.layout.viewport;
        let viewport = Viewport::new(vw, vh);
        let layout = compute_layout(viewport, grid.width(), grid.height());

        Ok(Self {
            grid,
            base_color: editor.color.clone(),
            alpha: editor.alpha,
            brush,
            presets: editor.presets.clone(),
            drawing: false,
            raster_scale: config.export.scale,
            viewport,
            layout,
            debouncer: ResizeDebouncer::new(Duration::from_millis(config.layout.resize_debounce_ms)),
            pending_viewport: None,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Replace the grid with a blank one of the given size.
    ///
    /// On `InvalidDimension` the current grid is kept.
    pub fn generate(&mut self, width: usize, height: usize) -> Result<(), SessionError> {
        let grid = Grid::new(width, height)?;
        log::debug!("generated {}x{} grid", width, height);
        self.replace_grid(grid);
        Ok(())
    }

    /// Canonical hex8 color of the cell at a linear index.
    pub fn cell_color(&self, index: usize) -> Result<String, GridError> {
        Ok(self.grid.get_index(index)?.to_hex8())
    }

    pub fn base_color(&self) -> &str {
        &self.base_color
    }

    /// Choose a free base color. The current alpha is kept.
    pub fn set_color(&mut self, base: &str) {
        self.base_color = base.trim().to_string();
    }

    /// Choose a preset base color. Alpha resets to fully opaque.
    pub fn select_preset(&mut self, base: &str) {
        self.set_color(base);
        self.alpha = u8::MAX;
    }

    pub fn presets(&self) -> &[String] {
        &self.presets
    }

    /// The preset equal to the current base color, if any.
    pub fn active_preset(&self) -> Option<&str> {
        self.presets.iter().find(|p| **p == self.base_color).map(String::as_str)
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn set_brush_size(&mut self, size: u32) -> Result<(), BrushError> {
        self.brush = Brush::new(size)?;
        Ok(())
    }

    /// The color string the next paint action writes.
    pub fn active_color(&self) -> String {
        compose_with_alpha(&self.base_color, self.alpha)
    }

    /// Stamp the brush centered on the cell at `index`. Returns the number of cells painted.
    pub fn paint_at(&mut self, index: usize) -> Result<usize, GridError> {
        let (row, col) = self.grid.position_of(index)?;
        let color = Color::parse(&self.active_color());
        let center = CellPos::new(row as i64, col as i64);
        let mut painted = 0;
        for pos in self.brush.stamp(center, self.grid.bounds()) {
            if self.grid.set_pos(pos, color) {
                painted += 1;
            }
        }
        Ok(painted)
    }

    /// Begin a drag and paint the cell under the pointer.
    pub fn pointer_down(&mut self, index: usize) -> Result<usize, GridError> {
        self.drawing = true;
        self.paint_at(index)
    }

    /// Paint the cell under the pointer if a drag is in progress.
    pub fn pointer_move(&mut self, index: usize) -> Result<usize, GridError> {
        if self.drawing {
            self.paint_at(index)
        } else {
            Ok(0)
        }
    }

    /// End the current drag.
    pub fn pointer_up(&mut self) {
        self.drawing = false;
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Reset every cell to transparent.
    pub fn clear(&mut self) {
        self.grid.clear();
    }

    /// Fill every cell with the base color as chosen, ignoring the alpha slider.
    pub fn fill(&mut self) {
        self.grid.fill(Color::parse(&self.base_color));
    }

    pub fn export_text(&self) -> String {
        export_text(&self.grid)
    }

    /// Replace the grid with one parsed from text. On error the current grid is kept.
    pub fn import_text(&mut self, text: &str) -> Result<(), SessionError> {
        let grid = import_text(text)?;
        self.replace_grid(grid);
        Ok(())
    }

    /// Read a text export from disk and import it.
    #[cfg(feature = "async-io")]
    pub async fn import_file(&mut self, path: impl AsRef<std::path::Path>) -> Result<(), SessionError> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        self.import_text(&text)
    }

    pub fn raster_scale(&self) -> u32 {
        self.raster_scale
    }

    pub fn set_raster_scale(&mut self, scale: u32) -> Result<(), RasterError> {
        if scale == 0 || scale > MAX_RASTER_SCALE {
            return Err(RasterError::InvalidScale(scale));
        }
        self.raster_scale = scale;
        Ok(())
    }

    pub fn export_raster(&self) -> Result<RgbaImage, SessionError> {
        Ok(export_raster(&self.grid, self.raster_scale)?)
    }

    /// Raster export encoded as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, SessionError> {
        Ok(encode_png(&self.export_raster()?)?)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Record a viewport resize. The relayout happens in [`tick`](Self::tick)
    /// once resizes stop arriving for the debounce window.
    pub fn on_viewport_resize(&mut self, viewport: Viewport, now: Instant) {
        self.pending_viewport = Some(viewport);
        self.debouncer.signal(now);
    }

    /// Apply a debounced resize if its quiet window has passed.
    pub fn tick(&mut self, now: Instant) -> Option<GridLayout> {
        if !self.debouncer.poll(now) {
            return None;
        }
        let viewport = self.pending_viewport.take()?;
        Some(self.relayout(viewport))
    }

    /// Recompute cell size for `viewport`. Cell colors and counts are untouched.
    pub fn relayout(&mut self, viewport: Viewport) -> GridLayout {
        self.viewport = viewport;
        self.layout = compute_layout(viewport, self.grid.width(), self.grid.height());
        log::debug!(
            "relayout {}x{} viewport: cell size {}px",
            viewport.width,
            viewport.height,
            self.layout.cell_size
        );
        self.layout
    }

    fn replace_grid(&mut self, grid: Grid) {
        self.grid = grid;
        self.drawing = false;
        self.layout = compute_layout(self.viewport, self.grid.width(), self.grid.height());
    }
}
