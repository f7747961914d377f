//! Integration tests for the editing core through the public library API.
//!
//! Covers color canonicalization, brush footprints, text round-trips and
//! session behavior across import, paint and relayout.

use std::time::{Duration, Instant};

use pixelgrid::brush::affected_cells;
use pixelgrid::color::{compose_with_alpha, compress, to_canonical_hex8, to_device_rgba};
use pixelgrid::config::PxgConfig;
use pixelgrid::grid::{Bounds, CellPos, Grid, GridError};
use pixelgrid::layout::Viewport;
use pixelgrid::serialize::{export_raster, export_text, import_text, ImportError};
use pixelgrid::session::{EditorSession, SessionError};

const COLORS: &[&str] = &[
    "#abc",
    "#abcd",
    "#a1b2c3",
    "#a1b2c3d4",
    "#FFFFFF",
    "rgb(12, 34, 56)",
    "rgba(255, 0, 0, 0.5)",
    "rgba(300, -1, 0, 1)",
    "transparent",
    "white",
    "",
    "not a color",
];

// ============================================================================
// Color codec
// ============================================================================

#[test]
fn test_compress_is_lossless() {
    for input in COLORS {
        let canonical = to_canonical_hex8(input);
        assert_eq!(to_canonical_hex8(&compress(&canonical)), canonical, "input {:?}", input);
    }
}

#[test]
fn test_canonical_form_shape() {
    for input in COLORS {
        let canonical = to_canonical_hex8(input);
        assert_eq!(canonical.len(), 9, "input {:?}", input);
        assert!(canonical.starts_with('#'));
        assert!(canonical[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}

#[test]
fn test_compose_replaces_alpha() {
    assert_eq!(compose_with_alpha("#ff0000", 128), "#ff000080");
    assert_eq!(compose_with_alpha("#ff000040", 128), "#ff000080");
    assert_eq!(compose_with_alpha("rgba(1, 2, 3, 0.1)", 51), "rgba(1,2,3,0.200)");
}

#[test]
fn test_device_rgba_channels() {
    let c = to_device_rgba("#ff000080");
    assert_eq!(c.r, 1.0);
    assert_eq!(c.g, 0.0);
    assert!((c.a - 128.0 / 255.0).abs() < 1e-6);
}

// ============================================================================
// Brush
// ============================================================================

#[test]
fn test_brush_area_grows_like_a_disc() {
    let bounds = Bounds::new(50, 50);
    let center = CellPos::new(25, 25);
    for r in 0..=10u32 {
        let cells = affected_cells(center, r, bounds);
        let expected = std::f64::consts::PI * (r as f64 + 0.5).powi(2);
        let diff = (cells.len() as f64 - expected).abs();
        assert!(diff <= 4.0 * r as f64 + 1.0, "radius {}: {} cells vs {:.1}", r, cells.len(), expected);

        // axis-aligned cells at exactly r are always included
        let r = r as i64;
        assert!(cells.contains(&CellPos::new(25 + r, 25)));
        assert!(cells.contains(&CellPos::new(25, 25 - r)));
    }
}

#[test]
fn test_brush_never_leaves_bounds() {
    let bounds = Bounds::new(5, 3);
    for row in -2..5 {
        for col in -2..7 {
            for pos in affected_cells(CellPos::new(row, col), 3, bounds) {
                assert!(bounds.contains(pos), "{:?} escaped from center ({}, {})", pos, row, col);
            }
        }
    }
}

// ============================================================================
// Text and raster export
// ============================================================================

fn sample_grid() -> Grid {
    let mut grid = Grid::new(4, 3).unwrap();
    grid.paint_cell(0, 0, "#ff0000").unwrap();
    grid.paint_cell(1, 2, "#12345678").unwrap();
    grid.paint_cell(2, 3, "rgba(0, 255, 0, 0.5)").unwrap();
    grid
}

#[test]
fn test_text_roundtrip() {
    let grid = sample_grid();
    let text = export_text(&grid);
    let restored = import_text(&text).unwrap();
    assert_eq!(restored, grid);
    assert_eq!(export_text(&restored), text);
}

#[test]
fn test_import_tolerates_line_endings_and_blank_lines() {
    let text = "# Pixel Art Export - 2x2\r\n\r\n#F00, #0f0\r#00f,#FFFF\n\n";
    let grid = import_text(text).unwrap();
    assert_eq!((grid.width(), grid.height()), (2, 2));
    assert_eq!(grid.get(1, 1).unwrap().to_hex8(), "#ffffffff");
}

#[test]
fn test_import_errors() {
    assert!(matches!(import_text("#zzz"), Err(ImportError::InvalidToken { line: 1, .. })));
    assert_eq!(import_text("# only comments"), Err(ImportError::NoData));
    assert!(matches!(
        import_text(&vec!["#000"; 51].join(",")),
        Err(ImportError::Grid(GridError::InvalidDimension { width: 51, height: 1 }))
    ));
}

#[test]
fn test_raster_blocks() {
    let grid = sample_grid();
    let img = export_raster(&grid, 4).unwrap();
    assert_eq!(img.dimensions(), (16, 12));
    for (x, y) in [(0, 0), (3, 3)] {
        assert_eq!(img.get_pixel(x, y).0, [255, 0, 0, 255]);
    }
    assert_eq!(img.get_pixel(4, 0).0, [0, 0, 0, 0]);
    assert_eq!(img.get_pixel(9, 7).0, [0x12, 0x34, 0x56, 0x78]);
    assert_eq!(img.get_pixel(15, 11).0, [0, 255, 0, 128]);
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn test_session_drag_paints_line() {
    let mut session = EditorSession::new(&PxgConfig::default()).unwrap();
    session.generate(5, 1).unwrap();
    session.set_color("#00f");

    session.pointer_down(0).unwrap();
    for i in 1..4 {
        session.pointer_move(i).unwrap();
    }
    session.pointer_up();
    session.pointer_move(4).unwrap();

    let text = session.export_text();
    assert_eq!(text.lines().last(), Some("#00f,#00f,#00f,#00f,#0000"));
}

#[test]
fn test_session_failed_import_keeps_artwork() {
    let mut session = EditorSession::new(&PxgConfig::default()).unwrap();
    session.paint_at(0).unwrap();
    let before = session.export_text();

    let err = session.import_text("#f00,#0f0\n#00f").unwrap_err();
    assert!(matches!(err, SessionError::Import(ImportError::RowLengthMismatch { line: 2, .. })));
    assert_eq!(session.export_text(), before);
}

#[test]
fn test_session_resize_preserves_cells() {
    let mut session = EditorSession::new(&PxgConfig::default()).unwrap();
    session.set_brush_size(4).unwrap();
    session.paint_at(8 * 16 + 8).unwrap();
    let before = session.grid().clone();
    let small = session.relayout(Viewport::new(200, 200)).cell_size;

    let start = Instant::now();
    for step in 0..5u64 {
        session.on_viewport_resize(Viewport::new(1200 + step as u32, 1000), start + Duration::from_millis(step * 50));
    }
    assert!(session.tick(start + Duration::from_millis(300)).is_none());
    let layout = session.tick(start + Duration::from_millis(500)).unwrap();

    assert!(layout.cell_size > small);
    assert_eq!(session.grid(), &before);
}
