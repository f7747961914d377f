//! Circular brush stamps.
//!
//! A brush of size `n` has radius `n - 1`. A cell belongs to the stamp when its
//! Euclidean distance from the center is at most `radius + 0.5`, which makes
//! size 1 paint exactly one cell and larger sizes approximate a disc.

use std::collections::HashSet;

use thiserror::Error;

use crate::grid::{Bounds, CellPos};

/// Error type for brush construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrushError {
    #[error("brush size must be at least 1, got {0}")]
    InvalidSize(u32),
}

/// A round brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    size: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Self { size: 1 }
    }
}

impl Brush {
    pub fn new(size: u32) -> Result<Self, BrushError> {
        if size == 0 {
            return Err(BrushError::InvalidSize(size));
        }
        Ok(Self { size })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Size 1 is radius 0.
    pub fn radius(&self) -> u32 {
        self.size - 1
    }

    /// Cells painted when this brush is applied at `center`.
    pub fn stamp(&self, center: CellPos, bounds: Bounds) -> HashSet<CellPos> {
        affected_cells(center, self.radius(), bounds)
    }
}

/// Compute the set of in-bounds cells within `radius + 0.5` of `center`.
///
/// Only the bounding square around the center is scanned. The result is
/// deterministic; its iteration order is not.
///
/// ```
/// use pixelgrid::brush::affected_cells;
/// use pixelgrid::grid::{Bounds, CellPos};
///
/// let center = CellPos::new(5, 5);
/// let cells = affected_cells(center, 0, Bounds::new(10, 10));
/// assert_eq!(cells.len(), 1);
/// assert!(cells.contains(&center));
/// ```
pub fn affected_cells(center: CellPos, radius: u32, bounds: Bounds) -> HashSet<CellPos> {
    let r = radius as i64;
    let limit = radius as f64 + 0.5;
    let mut cells = HashSet::new();

    let row_start = (center.row - r).max(0);
    let row_end = (center.row + r).min(bounds.height as i64 - 1);
    let col_start = (center.col - r).max(0);
    let col_end = (center.col + r).min(bounds.width as i64 - 1);

    for row in row_start..=row_end {
        for col in col_start..=col_end {
            let dr = (row - center.row) as f64;
            let dc = (col - center.col) as f64;
            if (dr * dr + dc * dc).sqrt() <= limit {
                cells.insert(CellPos::new(row, col));
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big() -> Bounds {
        Bounds::new(50, 50)
    }

    #[test]
    fn test_radius_zero_is_center_only() {
        for (row, col) in [(0, 0), (3, 7), (49, 49)] {
            let center = CellPos::new(row, col);
            let cells = affected_cells(center, 0, big());
            assert_eq!(cells, HashSet::from([center]));
        }
    }

    #[test]
    fn test_radius_one_is_full_square() {
        // diagonals sit at sqrt(2) ~ 1.414 <= 1.5
        let cells = affected_cells(CellPos::new(5, 5), 1, big());
        assert_eq!(cells.len(), 9);
    }

    #[test]
    fn test_radius_two_excludes_far_corners() {
        let center = CellPos::new(10, 10);
        let cells = affected_cells(center, 2, big());
        // corners of the 5x5 square are at distance sqrt(8) ~ 2.83 > 2.5
        assert!(!cells.contains(&CellPos::new(8, 8)));
        assert!(!cells.contains(&CellPos::new(12, 12)));
        // (8, 9) is at sqrt(5) ~ 2.24 <= 2.5
        assert!(cells.contains(&CellPos::new(8, 9)));
        assert_eq!(cells.len(), 21);
    }

    #[test]
    fn test_cells_at_exact_radius_included() {
        for radius in 1..=6u32 {
            let center = CellPos::new(25, 25);
            let cells = affected_cells(center, radius, big());
            let r = radius as i64;
            for pos in [
                CellPos::new(25 - r, 25),
                CellPos::new(25 + r, 25),
                CellPos::new(25, 25 - r),
                CellPos::new(25, 25 + r),
            ] {
                assert!(cells.contains(&pos), "radius {} missing {:?}", radius, pos);
            }
        }
    }

    #[test]
    fn test_count_approximates_disc_area() {
        for radius in 3..=10u32 {
            let cells = affected_cells(CellPos::new(25, 25), radius, big());
            let expected = std::f64::consts::PI * (radius as f64 + 0.5).powi(2);
            let diff = (cells.len() as f64 - expected).abs() / expected;
            assert!(diff < 0.15, "radius {}: {} cells vs {:.1}", radius, cells.len(), expected);
        }
    }

    #[test]
    fn test_all_cells_within_limit_and_bounds() {
        let bounds = Bounds::new(8, 6);
        let center = CellPos::new(1, 6);
        let cells = affected_cells(center, 3, bounds);
        assert!(!cells.is_empty());
        for pos in &cells {
            assert!(bounds.contains(*pos));
            let dr = (pos.row - center.row) as f64;
            let dc = (pos.col - center.col) as f64;
            assert!((dr * dr + dc * dc).sqrt() <= 3.5);
        }
    }

    #[test]
    fn test_clipped_at_corner() {
        let cells = affected_cells(CellPos::new(0, 0), 1, Bounds::new(4, 4));
        assert_eq!(
            cells,
            HashSet::from([
                CellPos::new(0, 0),
                CellPos::new(0, 1),
                CellPos::new(1, 0),
                CellPos::new(1, 1),
            ])
        );
    }

    #[test]
    fn test_center_outside_bounds_keeps_inside_part() {
        let cells = affected_cells(CellPos::new(-1, 2), 1, Bounds::new(5, 5));
        assert_eq!(
            cells,
            HashSet::from([CellPos::new(0, 1), CellPos::new(0, 2), CellPos::new(0, 3)])
        );
    }

    #[test]
    fn test_deterministic() {
        let a = affected_cells(CellPos::new(4, 4), 4, big());
        let b = affected_cells(CellPos::new(4, 4), 4, big());
        assert_eq!(a, b);
    }

    #[test]
    fn test_brush_size_and_radius() {
        assert_eq!(Brush::new(0), Err(BrushError::InvalidSize(0)));
        let brush = Brush::new(3).unwrap();
        assert_eq!(brush.size(), 3);
        assert_eq!(brush.radius(), 2);
        assert_eq!(brush.stamp(CellPos::new(10, 10), big()).len(), 21);
        assert_eq!(Brush::default().radius(), 0);
    }
}
