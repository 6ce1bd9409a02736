//! Grid to text.

use crate::grid::PixelGrid;

use super::header::Header;

/// Output layout for encoded grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Header plus one line per row
    #[default]
    Rows,
    /// All cells on one line
    Raw,
}

/// Encode a grid with the given layout.
///
/// `source` is the original image name recorded in the row-mode header; raw
/// mode ignores it.
pub fn encode(grid: &PixelGrid, encoding: Encoding, source: Option<&str>) -> String {
    match encoding {
        Encoding::Rows => {
            let header = Header::for_grid(grid, source);
            encode_rows(grid, Some(&header))
        }
        Encoding::Raw => encode_raw(grid),
    }
}

/// Encode a grid as an optional header followed by one line per row.
///
/// # Examples
///
/// ```
/// use zxtex::codec::encode_rows;
/// use zxtex::grid::{Cell, PixelGrid};
///
/// let grid = PixelGrid::new(2, 2, vec![
///     Cell::Index(1), Cell::Transparent,
///     Cell::Index(10), Cell::Index(15),
/// ]).unwrap();
/// assert_eq!(encode_rows(&grid, None), "1.\nAF\n");
/// ```
pub fn encode_rows(grid: &PixelGrid, header: Option<&Header>) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height() + 64);
    if let Some(header) = header {
        out.push_str(&header.to_string());
    }
    for row in grid.rows() {
        out.extend(row.iter().map(|c| c.to_char()));
        out.push('\n');
    }
    out
}

/// Encode every cell on a single line, terminated by one newline.
pub fn encode_raw(grid: &PixelGrid) -> String {
    let mut out: String = grid.cells().iter().map(|c| c.to_char()).collect();
    out.push('\n');
    out
}
