//! Text encoding of pixel grids.
//!
//! Two output layouts are supported:
//! - Row mode: a `# key: value` header followed by one line per scanline
//! - Raw mode: every cell on a single line, no header
//!
//! Parsing accepts either layout (plus inline `#` comments and stray
//! whitespace) and recovers a [`PixelGrid`](crate::grid::PixelGrid).

mod decode;
mod encode;
mod header;

use thiserror::Error;

pub use decode::{
    char_stream_to_grid, infer_dimensions, parse_direct, parse_text, ParsedText, MAX_WIDTH,
};
pub use encode::{encode, encode_raw, encode_rows, Encoding};
pub use header::{parse_header_line, Header, GENERATOR};

/// Errors raised while turning text back into a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// No grid characters survived parsing
    #[error("no pixel data found in input")]
    EmptyInput,
    /// A character outside `0-9`, `A-F` and `.` reached the grid builder
    #[error("invalid grid character '{ch}' at position {position}")]
    InvalidDigit { ch: char, position: usize },
    /// Requested width is above [`MAX_WIDTH`]
    #[error("width {width} is above the maximum of {max}")]
    WidthTooLarge { width: usize, max: usize },
    /// The grid would not fit in an image
    #[error("grid of {width}x{height} is too large to render")]
    TooLarge { width: usize, height: usize },
}
