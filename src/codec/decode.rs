//! Text to grid.

use crate::grid::{Cell, PixelGrid, TRANSPARENT_MARKER};

use super::header::parse_header_line;
use super::CodecError;

/// Result of scanning encoded text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedText {
    /// Grid characters (hex digits and `.`) in reading order
    pub stream: String,
    /// Length of the first content line, 0 when there was none
    pub declared_width: usize,
    /// Value of the `# file:` header, if present and non-empty
    pub file: Option<String>,
}

fn is_grid_char(c: char) -> bool {
    c.is_ascii_hexdigit() || c == TRANSPARENT_MARKER
}

/// Scan encoded text into a character stream.
///
/// Header lines (first non-space character `#`) are dropped, except that a
/// `file:` key is captured. Other lines lose any inline `# comment`, all
/// spaces and tabs, and are skipped when nothing is left. The concatenated
/// content is filtered down to hex digits and `.`, which also removes
/// carriage returns and byte-order marks.
///
/// # Examples
///
/// ```
/// use zxtex::codec::parse_text;
///
/// let parsed = parse_text("# file: hero.png\n0 1 2\n3.5 # eyes\n");
/// assert_eq!(parsed.stream, "0123.5");
/// assert_eq!(parsed.declared_width, 3);
/// assert_eq!(parsed.file.as_deref(), Some("hero.png"));
/// ```
pub fn parse_text(text: &str) -> ParsedText {
    let mut content = String::new();
    let mut declared_width = 0;
    let mut file = None;

    for line in text.lines() {
        if line.trim_start_matches([' ', '\t']).starts_with('#') {
            if let Some((key, value)) = parse_header_line(line) {
                if key == "file" {
                    file = Some(value).filter(|v| !v.is_empty());
                }
            }
            continue;
        }

        let body = line.split('#').next().unwrap_or_default();
        let stripped: String = body.chars().filter(|c| *c != ' ' && *c != '\t').collect();
        if stripped.is_empty() {
            continue;
        }

        if declared_width == 0 {
            declared_width = stripped.chars().count();
        }
        content.push_str(&stripped);
    }

    let stream = content.chars().filter(|c| is_grid_char(*c)).collect();
    ParsedText { stream, declared_width, file }
}

/// Clean up a literal grid passed directly on the command line.
///
/// Strips an optional `0x`/`0X` prefix and keeps only hex digits and `.`.
pub fn parse_direct(literal: &str) -> String {
    let trimmed = literal.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    body.chars().filter(|c| is_grid_char(*c)).collect()
}

/// Work out grid dimensions for a stream of `len` cells.
///
/// Without a width hint a perfect square is laid out square and anything
/// else becomes a single row. Height rounds up, so the last row may be short.
pub fn infer_dimensions(len: usize, width_hint: usize) -> (usize, usize) {
    let width = if width_hint > 0 {
        width_hint
    } else {
        let side = integer_sqrt(len);
        if side * side == len {
            side
        } else {
            len
        }
    };
    let height = len.div_ceil(width);
    (width, height)
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Widest grid accepted as an explicit width.
///
/// Inferred widths never exceed the stream length, so only a caller-supplied
/// width can ask for more cells than the input holds.
pub const MAX_WIDTH: usize = 65_535;

/// Build a grid from a character stream.
///
/// A `width_hint` of 0 asks for the width to be inferred. When the stream does
/// not fill the last row, the missing cells are transparent, which renders
/// the same as pixels that were never written.
pub fn char_stream_to_grid(stream: &str, width_hint: usize) -> Result<PixelGrid, CodecError> {
    let len = stream.chars().count();
    if len == 0 {
        return Err(CodecError::EmptyInput);
    }

    if width_hint > MAX_WIDTH {
        return Err(CodecError::WidthTooLarge { width: width_hint, max: MAX_WIDTH });
    }

    let (width, height) = infer_dimensions(len, width_hint);
    let total = width
        .checked_mul(height)
        .filter(|_| u32::try_from(width).is_ok() && u32::try_from(height).is_ok())
        .ok_or(CodecError::TooLarge { width, height })?;

    let mut cells = Vec::with_capacity(total);
    for (position, ch) in stream.chars().enumerate() {
        cells.push(Cell::from_char(ch, position)?);
    }
    cells.resize(total, Cell::Transparent);

    tracing::debug!(len, width, height, "decoded grid stream");

    Ok(PixelGrid::from_cells(width, height, cells))
}
