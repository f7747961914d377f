//! Raster export.
//!
//! Each cell becomes a solid `scale x scale` block. No interpolation or
//! anti-aliasing, and alpha is carried through untouched.

use image::RgbaImage;
use thiserror::Error;

use crate::grid::Grid;

/// Block size used when no scale is configured.
pub const DEFAULT_RASTER_SCALE: u32 = 10;

/// Largest accepted block size.
pub const MAX_RASTER_SCALE: u32 = 128;

/// Error type for raster export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Scale outside `1..=128`.
    #[error("invalid raster scale {0}, expected 1-{max}", max = MAX_RASTER_SCALE)]
    InvalidScale(u32),
}

/// Render a grid to an RGBA image with `scale x scale` pixels per cell.
///
/// ```
/// use pixelgrid::grid::Grid;
/// use pixelgrid::serialize::export_raster;
///
/// let mut grid = Grid::new(2, 1).unwrap();
/// grid.paint_cell(0, 1, "#ff000080").unwrap();
/// let image = export_raster(&grid, 10).unwrap();
/// assert_eq!(image.dimensions(), (20, 10));
/// assert_eq!(image.get_pixel(15, 5).0, [255, 0, 0, 128]);
/// ```
pub fn export_raster(grid: &Grid, scale: u32) -> Result<RgbaImage, RasterError> {
    if scale == 0 || scale > MAX_RASTER_SCALE {
        return Err(RasterError::InvalidScale(scale));
    }
    let out_w = grid.width() as u32 * scale;
    let out_h = grid.height() as u32 * scale;

    let palette: Vec<_> = grid.cells().iter().map(|c| c.to_device_rgba().to_rgba8()).collect();
    let width = grid.width();

    Ok(RgbaImage::from_fn(out_w, out_h, |x, y| {
        let col = (x / scale) as usize;
        let row = (y / scale) as usize;
        palette[row * width + col]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_dimensions() {
        let grid = Grid::new(3, 2).unwrap();
        assert_eq!(export_raster(&grid, 1).unwrap().dimensions(), (3, 2));
        assert_eq!(export_raster(&grid, 10).unwrap().dimensions(), (30, 20));
    }

    #[test]
    fn test_zero_scale_rejected() {
        let grid = Grid::new(1, 1).unwrap();
        assert_eq!(export_raster(&grid, 0).unwrap_err(), RasterError::InvalidScale(0));
    }

    #[test]
    fn test_oversized_scale_rejected() {
        let grid = Grid::new(50, 50).unwrap();
        assert_eq!(export_raster(&grid, 129).unwrap_err(), RasterError::InvalidScale(129));
        let small = Grid::new(1, 2).unwrap();
        assert_eq!(export_raster(&small, 128).unwrap().dimensions(), (128, 256));
    }

    #[test]
    fn test_blocks_are_solid() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.paint_cell(0, 0, "#ff0000").unwrap(); // Red
        grid.paint_cell(0, 1, "#00ff00").unwrap(); // Green
        grid.paint_cell(1, 0, "#0000ff80").unwrap(); // Translucent blue

        let image = export_raster(&grid, 4).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let expected = match (y / 4, x / 4) {
                    (0, 0) => Rgba([255, 0, 0, 255]),
                    (0, 1) => Rgba([0, 255, 0, 255]),
                    (1, 0) => Rgba([0, 0, 255, 128]),
                    _ => Rgba([0, 0, 0, 0]),
                };
                assert_eq!(*image.get_pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_zero_alpha_color_keeps_rgb() {
        let mut grid = Grid::new(1, 1).unwrap();
        grid.paint_cell(0, 0, "#ff000000").unwrap();
        let image = export_raster(&grid, 1).unwrap();
        assert_eq!(*image.get_pixel(0, 0), Rgba([255, 0, 0, 0]));
    }
}
