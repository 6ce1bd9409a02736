//! Quantized pixel grids.
//!
//! A [`PixelGrid`] is the in-memory form of a sprite: a row-major array of
//! cells, each either transparent or a palette index.

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::codec::CodecError;
use crate::palette::{nearest_index, palette_color, Pixel, PALETTE_SIZE};
use crate::transparency::{is_transparent, TransparencyConfig};

/// Fully transparent output pixel.
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Text marker for a transparent cell.
pub const TRANSPARENT_MARKER: char = '.';

/// One sprite pixel after quantization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Transparent,
    Index(u8),
}

impl Cell {
    /// Quantize a source pixel.
    pub fn from_pixel(pixel: Pixel, transparency: &TransparencyConfig) -> Self {
        if is_transparent(pixel, transparency) {
            Cell::Transparent
        } else {
            Cell::Index(nearest_index(pixel.rgb()))
        }
    }

    /// The cell's text form: `.` or an uppercase hex digit.
    pub fn to_char(self) -> char {
        match self {
            Cell::Transparent => TRANSPARENT_MARKER,
            Cell::Index(i) => std::char::from_digit(i as u32, 16)
                .map(|c| c.to_ascii_uppercase())
                .unwrap_or(TRANSPARENT_MARKER),
        }
    }

    /// Parse one grid character. `position` is only used for error reporting.
    pub fn from_char(ch: char, position: usize) -> Result<Self, CodecError> {
        if ch == TRANSPARENT_MARKER {
            return Ok(Cell::Transparent);
        }
        match ch.to_digit(16) {
            Some(v) => Ok(Cell::Index(v as u8)),
            None => Err(CodecError::InvalidDigit { ch, position }),
        }
    }

    pub fn rgba(self) -> Rgba<u8> {
        match self {
            Cell::Transparent => TRANSPARENT,
            Cell::Index(i) => palette_color(i).map(|c| c.to_rgba()).unwrap_or(TRANSPARENT),
        }
    }
}

/// Error for grids whose shape does not hold together.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid dimensions must be at least 1x1, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },
    #[error("grid of {width}x{height} needs {expected} cells, got {actual}")]
    CellCount { width: usize, height: usize, expected: usize, actual: usize },
    #[error("palette index {0} out of range")]
    IndexOutOfRange(u8),
    #[error("grid of {width}x{height} does not fit in an image")]
    TooLarge { width: usize, height: usize },
}

/// A quantized sprite, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl PixelGrid {
    /// Build a grid, checking that the cells fill `width * height` exactly.
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        let expected = width
            .checked_mul(height)
            .filter(|_| u32::try_from(width).is_ok() && u32::try_from(height).is_ok())
            .ok_or(GridError::TooLarge { width, height })?;
        if cells.len() != expected {
            return Err(GridError::CellCount { width, height, expected, actual: cells.len() });
        }
        if let Some(Cell::Index(i)) =
            cells.iter().find(|c| matches!(c, Cell::Index(i) if *i as usize >= PALETTE_SIZE))
        {
            return Err(GridError::IndexOutOfRange(*i));
        }
        Ok(Self { width, height, cells })
    }

    /// Wrap cells already known to fit `width * height`, with both sides
    /// within `u32`.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert!(width > 0 && height > 0);
        debug_assert_eq!(cells.len(), width * height);
        debug_assert!(u32::try_from(width).is_ok() && u32::try_from(height).is_ok());
        Self { width, height, cells }
    }

    /// Quantize a row-major pixel buffer.
    ///
    /// Rows are processed in parallel; each pixel is handled independently.
    pub fn quantize(
        width: usize,
        height: usize,
        pixels: &[Pixel],
        transparency: &TransparencyConfig,
    ) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        if pixels.len() != width * height {
            return Err(GridError::CellCount {
                width,
                height,
                expected: width * height,
                actual: pixels.len(),
            });
        }

        let cells: Vec<Cell> = pixels
            .par_chunks(width)
            .flat_map_iter(|row| row.iter().map(|p| Cell::from_pixel(*p, transparency)))
            .collect();

        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x).copied()
    }

    /// Iterate over the grid one row at a time.
    pub fn rows(&self) -> std::slice::Chunks<'_, Cell> {
        self.cells.chunks(self.width)
    }

    /// Render to an RGBA image. Transparent cells become `(0, 0, 0, 0)`,
    /// indices become their opaque palette colour.
    pub fn to_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width as u32, self.height as u32);
        for (i, cell) in self.cells.iter().enumerate() {
            let x = (i % self.width) as u32;
            let y = (i / self.width) as u32;
            image.put_pixel(x, y, cell.rgba());
        }
        image
    }
}
