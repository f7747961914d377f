//! On-screen layout of the grid.
//!
//! Layout only decides how large each cell is drawn. It never touches cell
//! colors or the number of cells, so a relayout after a viewport change keeps
//! the artwork intact.

use std::time::{Duration, Instant};

/// Padding reserved around the grid container on each axis.
const CONTAINER_PADDING: i64 = 40;
/// Gap between adjacent cells.
const CELL_GAP: i64 = 1;
/// Border width summed over both sides of an axis.
const BORDER: i64 = 4;
/// Grids larger than this on either side use the small minimum cell size.
const LARGE_GRID_THRESHOLD: usize = 30;
const MIN_CELL_SIZE_LARGE: u32 = 4;
const MIN_CELL_SIZE: u32 = 8;

/// Default quiet window before a resize triggers a relayout.
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Size of the area the grid is drawn into, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Rendering geometry for a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
    /// Side length of one cell in device pixels.
    pub cell_size: u32,
}

impl GridLayout {
    /// Total drawn width including gaps.
    pub fn pixel_width(&self) -> u32 {
        self.columns as u32 * self.cell_size + self.columns.saturating_sub(1) as u32 * CELL_GAP as u32
    }

    /// Total drawn height including gaps.
    pub fn pixel_height(&self) -> u32 {
        self.rows as u32 * self.cell_size + self.rows.saturating_sub(1) as u32 * CELL_GAP as u32
    }

    /// CSS grid template for the columns, e.g. `repeat(16, 20px)`.
    pub fn column_template(&self) -> String {
        format!("repeat({}, {}px)", self.columns, self.cell_size)
    }

    /// CSS grid template for the rows.
    pub fn row_template(&self) -> String {
        format!("repeat({}, {}px)", self.rows, self.cell_size)
    }
}

/// Compute the cell size that fits a `columns x rows` grid into `viewport`.
///
/// The cell size is the largest square that fits both axes after padding,
/// gaps and border are removed, but never below 8px (4px for grids with a
/// side over 30 cells), even if that overflows the viewport.
///
/// ```
/// use pixelgrid::layout::{compute_layout, Viewport};
///
/// let layout = compute_layout(Viewport::new(400, 300), 10, 10);
/// assert_eq!(layout.cell_size, 24);
/// ```
pub fn compute_layout(viewport: Viewport, columns: usize, rows: usize) -> GridLayout {
    let cols = columns.max(1) as i64;
    let rws = rows.max(1) as i64;

    let avail_w = viewport.width as i64 - CONTAINER_PADDING - (cols - 1) * CELL_GAP - BORDER;
    let avail_h = viewport.height as i64 - CONTAINER_PADDING - (rws - 1) * CELL_GAP - BORDER;
    let fit = avail_w.div_euclid(cols).min(avail_h.div_euclid(rws));

    let min = if columns > LARGE_GRID_THRESHOLD || rows > LARGE_GRID_THRESHOLD {
        MIN_CELL_SIZE_LARGE
    } else {
        MIN_CELL_SIZE
    };
    let cell_size = fit.clamp(min as i64, u32::MAX as i64) as u32;

    GridLayout { columns, rows, cell_size }
}

/// Trailing-edge debouncer for resize signals.
///
/// Every `signal` pushes the deadline out to `now + window`; `poll` fires once
/// after the deadline passes with no further signals.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_DEBOUNCE)
    }
}

impl ResizeDebouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, deadline: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a resize signal, restarting the quiet window.
    pub fn signal(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Whether a signal is waiting for its quiet window to elapse.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once per burst, when the quiet window has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
