//! The cell grid being edited.
//!
//! Cells are stored densely in row-major order, so linear index
//! `row * width + col` addresses every cell with no holes.

use thiserror::Error;

use crate::color::Color;

/// Smallest allowed width or height.
pub const MIN_DIMENSION: usize = 1;
/// Largest allowed width or height.
pub const MAX_DIMENSION: usize = 50;

/// Error type for grid operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height outside `1..=50`.
    #[error("invalid grid dimensions {width}x{height}, expected 1-{max} on each side", max = MAX_DIMENSION)]
    InvalidDimension { width: usize, height: usize },
    /// Coordinate outside the grid.
    #[error("cell ({row}, {col}) out of bounds for {width}x{height} grid")]
    OutOfBounds { row: usize, col: usize, width: usize, height: usize },
    /// Linear index outside the grid.
    #[error("cell index {index} out of bounds for grid of {len} cells")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// A cell coordinate. Signed so brush stamps can reach past the edges before clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: i64,
    pub col: i64,
}

impl CellPos {
    pub fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }
}

/// Grid dimensions, used to clip coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub width: usize,
    pub height: usize,
}

impl Bounds {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Whether `pos` lies inside these bounds.
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.row >= 0 && pos.col >= 0 && (pos.row as u64) < self.height as u64 && (pos.col as u64) < self.width as u64
    }
}

/// A rectangular grid of cell colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Color>,
}

impl Grid {
    /// Create a grid with every cell transparent.
    ///
    /// # Errors
    ///
    /// `GridError::InvalidDimension` unless both sides are within `1..=50`.
    ///
    /// ```
    /// use pixelgrid::grid::{Grid, GridError};
    ///
    /// let grid = Grid::new(16, 8).unwrap();
    /// assert_eq!(grid.len(), 128);
    /// assert!(matches!(Grid::new(51, 10), Err(GridError::InvalidDimension { .. })));
    /// ```
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let valid = MIN_DIMENSION..=MAX_DIMENSION;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(GridError::InvalidDimension { width, height });
        }
        Ok(Grid { width, height, cells: vec![Color::TRANSPARENT; width * height] })
    }

    /// Grid width (number of columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Linear index of (row, col), bounds-checked.
    pub fn index_of(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if row >= self.height || col >= self.width {
            return Err(GridError::OutOfBounds { row, col, width: self.width, height: self.height });
        }
        Ok(row * self.width + col)
    }

    /// (row, col) of a linear index, bounds-checked.
    pub fn position_of(&self, index: usize) -> Result<(usize, usize), GridError> {
        if index >= self.cells.len() {
            return Err(GridError::IndexOutOfBounds { index, len: self.cells.len() });
        }
        Ok((index / self.width, index % self.width))
    }

    /// Get the color at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<Color, GridError> {
        let index = self.index_of(row, col)?;
        Ok(self.cells[index])
    }

    /// Set the color at (row, col).
    pub fn set(&mut self, row: usize, col: usize, color: Color) -> Result<(), GridError> {
        let index = self.index_of(row, col)?;
        self.cells[index] = color;
        Ok(())
    }

    pub fn get_index(&self, index: usize) -> Result<Color, GridError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(GridError::IndexOutOfBounds { index, len: self.cells.len() })
    }

    pub fn set_index(&mut self, index: usize, color: Color) -> Result<(), GridError> {
        let len = self.cells.len();
        let cell = self.cells.get_mut(index).ok_or(GridError::IndexOutOfBounds { index, len })?;
        *cell = color;
        Ok(())
    }

    /// Store a composed color string at (row, col), canonicalizing it first.
    ///
    /// Unrecognized color strings store transparent, matching the codec's fail-soft rule.
    pub fn paint_cell(&mut self, row: usize, col: usize, composed: &str) -> Result<(), GridError> {
        self.set(row, col, Color::parse(composed))
    }

    /// Set a cell addressed by a signed position, if it is in bounds.
    ///
    /// Returns whether a cell was written.
    pub(crate) fn set_pos(&mut self, pos: CellPos, color: Color) -> bool {
        if !self.bounds().contains(pos) {
            return false;
        }
        let index = pos.row as usize * self.width + pos.col as usize;
        self.cells[index] = color;
        true
    }

    /// Reset every cell to transparent.
    pub fn clear(&mut self) {
        self.fill(Color::TRANSPARENT);
    }

    /// Set every cell to `color`.
    pub fn fill(&mut self, color: Color) {
        self.cells.iter_mut().for_each(|c| *c = color);
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Iterate over rows, each a slice of `width` cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks(self.width)
    }

    /// Number of cells that differ from the unpainted value.
    pub fn painted_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_transparent()).count()
    }
}
