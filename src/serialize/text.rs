//! Text exchange format.
//!
//! ```text
//! # Pixel Art Export - 3x2
//! # Width: 3, Height: 2
//! #f00,#0000,#00ff0080
//! #fff,#123456,#0000
//! ```
//!
//! Lines starting with `# ` are comments and blank lines are skipped on import.
//! Each remaining line is one row of comma-separated hex tokens (3, 4, 6 or 8
//! digits, any case). Export always writes compressed lowercase tokens.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::color::Color;
use crate::grid::{Grid, GridError};

static HEX_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{4}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})$")
        .expect("hex token pattern is valid")
});

/// Prefix marking a comment line.
const COMMENT_PREFIX: &str = "# ";

/// Error type for text import.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// Nothing left after removing comments and blank lines.
    #[error("no pixel data found")]
    NoData,
    /// A token is not a 3, 4, 6 or 8 digit hex color.
    #[error("line {line}: invalid hex color '{token}'")]
    InvalidToken { line: usize, token: String },
    /// A row has fewer tokens than the first row.
    #[error("line {line}: row has {found} colors, expected {expected}")]
    RowLengthMismatch { line: usize, expected: usize, found: usize },
    /// The derived dimensions are not a valid grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Serialize a grid to the text exchange format.
///
/// ```
/// use pixelgrid::grid::Grid;
/// use pixelgrid::serialize::export_text;
///
/// let mut grid = Grid::new(2, 1).unwrap();
/// grid.paint_cell(0, 0, "#ff0000").unwrap();
/// assert_eq!(
///     export_text(&grid),
///     "# Pixel Art Export - 2x1\n# Width: 2, Height: 1\n#f00,#0000"
/// );
/// ```
pub fn export_text(grid: &Grid) -> String {
    let mut lines = Vec::with_capacity(grid.height() + 2);
    lines.push(format!("# Pixel Art Export - {}x{}", grid.width(), grid.height()));
    lines.push(format!("# Width: {}, Height: {}", grid.width(), grid.height()));
    for row in grid.rows() {
        let tokens: Vec<String> = row.iter().map(Color::to_compressed).collect();
        lines.push(tokens.join(","));
    }
    lines.join("\n")
}

/// Parse the text exchange format into a fresh grid.
///
/// Width comes from the first data row and height from the number of data rows.
/// Accepts `\n`, `\r\n` and `\r` line endings and ignores whitespace around lines
/// and tokens. Tokens beyond the width on a longer row are checked but dropped.
///
/// # Errors
///
/// - `ImportError::NoData` if no data rows remain
/// - `ImportError::InvalidToken` for any token that is not a hex color
/// - `ImportError::RowLengthMismatch` for a row shorter than the first
/// - `ImportError::Grid` if the dimensions fall outside `1..=50`
pub fn import_text(text: &str) -> Result<Grid, ImportError> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let data: Vec<(usize, &str)> = normalized
        .split('\n')
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .collect();

    let Some((_, first)) = data.first() else {
        return Err(ImportError::NoData);
    };
    let width = first.split(',').count();
    let height = data.len();

    let mut rows: Vec<Vec<Color>> = Vec::with_capacity(height);
    for (line_no, line) in &data {
        let mut row = Vec::with_capacity(width);
        for token in line.split(',').map(str::trim) {
            if !HEX_TOKEN.is_match(token) {
                return Err(ImportError::InvalidToken { line: *line_no, token: token.to_string() });
            }
            row.push(Color::parse(token));
        }
        if row.len() < width {
            return Err(ImportError::RowLengthMismatch {
                line: *line_no,
                expected: width,
                found: row.len(),
            });
        }
        if row.len() > width {
            log::warn!(
                "line {}: ignoring {} colors past width {}",
                line_no,
                row.len() - width,
                width
            );
            row.truncate(width);
        }
        rows.push(row);
    }

    let mut grid = Grid::new(width, height)?;
    for (index, color) in rows.into_iter().flatten().enumerate() {
        grid.set_index(index, color)?;
    }
    log::debug!("imported {}x{} grid", width, height);
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_header_and_rows() {
        let mut grid = Grid::new(3, 2).unwrap();
        grid.paint_cell(0, 0, "#ff0000").unwrap();
        grid.paint_cell(0, 2, "#00ff0080").unwrap();
        grid.paint_cell(1, 1, "#123456").unwrap();
        let text = export_text(&grid);
        let lines: Vec<&str> = text.split('\n').collect();
        assert_eq!(lines[0], "# Pixel Art Export - 3x2");
        assert_eq!(lines[1], "# Width: 3, Height: 2");
        assert_eq!(lines[2], "#f00,#0000,#00ff0080");
        assert_eq!(lines[3], "#0000,#123456,#0000");
        assert_eq!(lines.len(), 4);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_import_basic() {
        let grid = import_text("#f00,#0f0\n#00f,#0000").unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 2));
        assert_eq!(grid.get(0, 0).unwrap().to_hex8(), "#ff0000ff");
        assert_eq!(grid.get(0, 1).unwrap().to_hex8(), "#00ff00ff");
        assert_eq!(grid.get(1, 0).unwrap().to_hex8(), "#0000ffff");
        assert!(grid.get(1, 1).unwrap().is_transparent());
    }

    #[test]
    fn test_import_skips_comments_and_blank_lines() {
        let text = "# Pixel Art Export - 1x2\n# Width: 1, Height: 2\n\n#abc\n   \n#DEF\n";
        let grid = import_text(text).unwrap();
        assert_eq!((grid.width(), grid.height()), (1, 2));
        assert_eq!(grid.get(1, 0).unwrap().to_hex8(), "#ddeeffff");
    }

    #[test]
    fn test_import_line_endings() {
        for text in ["#fff,#000\r\n#000,#fff", "#fff,#000\r#000,#fff", "#fff,#000\n#000,#fff\n"] {
            let grid = import_text(text).unwrap();
            assert_eq!((grid.width(), grid.height()), (2, 2), "text {:?}", text);
        }
    }

    #[test]
    fn test_import_trims_tokens() {
        let grid = import_text("  #fff , #12345678  ").unwrap();
        assert_eq!(grid.get(0, 1).unwrap().to_hex8(), "#12345678");
    }

    #[test]
    fn test_import_no_data() {
        assert_eq!(import_text(""), Err(ImportError::NoData));
        assert_eq!(import_text("# only a comment\n\n  \n"), Err(ImportError::NoData));
    }

    #[test]
    fn test_import_invalid_token() {
        assert_eq!(
            import_text("#zzz"),
            Err(ImportError::InvalidToken { line: 1, token: "#zzz".to_string() })
        );
        assert!(matches!(
            import_text("#fff,#fff\n#fff,red"),
            Err(ImportError::InvalidToken { line: 2, .. })
        ));
        assert!(matches!(import_text("#fff,"), Err(ImportError::InvalidToken { .. })));
        assert!(matches!(import_text("#12345"), Err(ImportError::InvalidToken { .. })));
    }

    #[test]
    fn test_import_hash_without_space_is_data() {
        // "#fff" is a token, not a comment; "#" alone is an invalid token
        assert!(matches!(import_text("#"), Err(ImportError::InvalidToken { .. })));
    }

    #[test]
    fn test_import_short_row() {
        assert_eq!(
            import_text("#fff,#fff,#fff\n#000,#000"),
            Err(ImportError::RowLengthMismatch { line: 2, expected: 3, found: 2 })
        );
    }

    #[test]
    fn test_import_long_row_truncated() {
        let grid = import_text("#fff\n#000,#f00").unwrap();
        assert_eq!((grid.width(), grid.height()), (1, 2));
        assert_eq!(grid.get(1, 0).unwrap().to_hex8(), "#000000ff");
    }

    #[test]
    fn test_import_too_large() {
        let row = vec!["#fff"; 51].join(",");
        assert!(matches!(
            import_text(&row),
            Err(ImportError::Grid(GridError::InvalidDimension { width: 51, height: 1 }))
        ));
    }

    #[test]
    fn test_roundtrip_preserves_canonical_cells() {
        let mut grid = Grid::new(4, 3).unwrap();
        let samples = ["#ff0000ff", "#11223344", "#12345678", "#ff000000", "#abcdefff", "#00000000"];
        for (i, s) in samples.iter().cycle().take(grid.len()).enumerate() {
            grid.set_index(i, Color::parse(s)).unwrap();
        }
        let back = import_text(&export_text(&grid)).unwrap();
        assert_eq!(back, grid);
    }
}
