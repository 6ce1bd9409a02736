//! Per-run transparency rules.
//!
//! A pixel is transparent when its alpha is zero. Two optional overrides can
//! widen that: an exact RGB colour (a "key colour", e.g. magenta) and a
//! palette index whose nearest matches are dropped.

use crate::palette::{is_reachable, nearest_index, Pixel, Rgb, PALETTE_SIZE};

/// Transparency overrides for one conversion. Built once, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransparencyConfig {
    /// Exact colour treated as transparent.
    pub color: Option<Rgb>,
    /// Palette index treated as transparent.
    pub index: Option<u8>,
}

impl TransparencyConfig {
    pub fn new(color: Option<Rgb>, index: Option<u8>) -> Self {
        Self { color, index }
    }

    /// Build a config from raw settings.
    ///
    /// A colour string that does not parse leaves the colour override off
    /// instead of failing the conversion. An index that quantization never
    /// produces is kept but logged, since it cannot match any pixel.
    pub fn from_settings(color: Option<&str>, index: Option<u8>) -> Self {
        let color = color.and_then(|s| {
            let parsed = parse_transparent_color(s);
            if parsed.is_none() {
                tracing::warn!(value = s, "ignoring malformed transparent colour");
            }
            parsed
        });
        if let Some(i) = index.filter(|i| (*i as usize) < PALETTE_SIZE && !is_reachable(*i)) {
            tracing::warn!(
                index = i,
                "transparent index never matches: its colour quantizes to another index"
            );
        }
        Self { color, index }
    }

    pub fn is_active(&self) -> bool {
        self.color.is_some() || self.index.is_some()
    }
}

/// Decide whether a pixel encodes as transparent.
pub fn is_transparent(pixel: Pixel, config: &TransparencyConfig) -> bool {
    if pixel.a == 0 {
        return true;
    }
    if config.color == Some(pixel.rgb()) {
        return true;
    }
    match config.index {
        Some(index) => nearest_index(pixel.rgb()) == index,
        None => false,
    }
}

/// Parse a transparent colour setting.
///
/// Accepts `#RRGGBB`, `RRGGBB`, `0xRRGGBB`, the short `#RGB` form and
/// decimal `r,g,b` triples. Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use zxtex::palette::Rgb;
/// use zxtex::transparency::parse_transparent_color;
///
/// assert_eq!(parse_transparent_color("#FF00FF"), Some(Rgb::new(255, 0, 255)));
/// assert_eq!(parse_transparent_color("255, 0, 255"), Some(Rgb::new(255, 0, 255)));
/// assert_eq!(parse_transparent_color("magenta"), None);
/// ```
pub fn parse_transparent_color(s: &str) -> Option<Rgb> {
    let s = s.trim();
    if s.contains(',') {
        return parse_decimal_triple(s);
    }

    let hex = s
        .strip_prefix('#')
        .or_else(|| s.strip_prefix("0x"))
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Rgb::new(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => None,
    }
}

fn parse_decimal_triple(s: &str) -> Option<Rgb> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    Some(Rgb::new(r, g, b))
}
