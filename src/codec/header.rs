//! Row-mode header block.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::grid::PixelGrid;

/// Producer tag written to the `generator` header line.
pub const GENERATOR: &str = "zxtex";

/// Metadata written above a row-mode grid.
///
/// Only `file` is read back; the dimensions are always re-derived from the
/// grid body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub file: Option<String>,
    pub width: usize,
    pub height: usize,
    pub generator: String,
}

impl Header {
    pub fn for_grid(grid: &PixelGrid, file: Option<&str>) -> Self {
        Self {
            file: file.map(String::from),
            width: grid.width(),
            height: grid.height(),
            generator: GENERATOR.to_string(),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# file: {}", self.file.as_deref().unwrap_or_default())?;
        writeln!(f, "# width: {}", self.width)?;
        writeln!(f, "# height: {}", self.height)?;
        writeln!(f, "# generator: {}", self.generator)
    }
}

fn header_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*#\s*([A-Za-z_][A-Za-z0-9_-]*)\s*:(.*)$").expect("header pattern is valid")
    })
}

/// Split a `# key: value` line into a lower-cased key and trimmed value.
///
/// Returns `None` for comment lines that are not key/value pairs.
///
/// # Examples
///
/// ```
/// use zxtex::codec::parse_header_line;
///
/// assert_eq!(
///     parse_header_line("# File: hero.png"),
///     Some(("file".to_string(), "hero.png".to_string()))
/// );
/// assert_eq!(parse_header_line("# just a note"), None);
/// ```
pub fn parse_header_line(line: &str) -> Option<(String, String)> {
    let caps = header_regex().captures(line)?;
    let key = caps.get(1)?.as_str().to_ascii_lowercase();
    let value = caps.get(2)?.as_str().trim().to_string();
    Some((key, value))
}
