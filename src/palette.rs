//! The fixed 16-colour sprite palette and nearest-colour quantization.
//!
//! Indices 0-7 are the normal Spectrum colours, 8-F the bright ones.
//! Bright black (8) is the same colour as black (0); the table keeps both
//! so that indices in existing sprite files stay valid.

use image::Rgba;

/// An opaque 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// The colour with full alpha, ready to be written into an image.
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, 255])
    }
}

/// A source pixel with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(rgba: Rgba<u8>) -> Self {
        Self { r: rgba[0], g: rgba[1], b: rgba[2], a: rgba[3] }
    }

    /// Build a pixel from 16-bit channels. Only the high byte is kept.
    pub fn from_rgba16(rgba: Rgba<u16>) -> Self {
        Self {
            r: (rgba[0] >> 8) as u8,
            g: (rgba[1] >> 8) as u8,
            b: (rgba[2] >> 8) as u8,
            a: (rgba[3] >> 8) as u8,
        }
    }

    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

/// Number of palette entries.
pub const PALETTE_SIZE: usize = 16;

/// The sprite palette, addressed 0-F.
pub const ZX_PALETTE: [Rgb; PALETTE_SIZE] = [
    Rgb::new(0, 0, 0),       // 0: Black
    Rgb::new(0, 0, 215),     // 1: Blue
    Rgb::new(215, 0, 0),     // 2: Red
    Rgb::new(215, 0, 215),   // 3: Magenta
    Rgb::new(0, 215, 0),     // 4: Green
    Rgb::new(0, 215, 215),   // 5: Cyan
    Rgb::new(215, 215, 0),   // 6: Yellow
    Rgb::new(215, 215, 215), // 7: White
    Rgb::new(0, 0, 0),       // 8: Bright Black
    Rgb::new(0, 0, 255),     // 9: Bright Blue
    Rgb::new(255, 0, 0),     // A: Bright Red
    Rgb::new(255, 0, 255),   // B: Bright Magenta
    Rgb::new(0, 255, 0),     // C: Bright Green
    Rgb::new(0, 255, 255),   // D: Bright Cyan
    Rgb::new(255, 255, 0),   // E: Bright Yellow
    Rgb::new(255, 255, 255), // F: Bright White
];

/// Display names for the palette entries, in index order.
pub const PALETTE_NAMES: [&str; PALETTE_SIZE] = [
    "Black",
    "Blue",
    "Red",
    "Magenta",
    "Green",
    "Cyan",
    "Yellow",
    "White",
    "Bright Black",
    "Bright Blue",
    "Bright Red",
    "Bright Magenta",
    "Bright Green",
    "Bright Cyan",
    "Bright Yellow",
    "Bright White",
];

/// Look up the colour for a palette index.
pub fn palette_color(index: u8) -> Option<Rgb> {
    ZX_PALETTE.get(index as usize).copied()
}

fn distance_sq(a: Rgb, b: Rgb) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Find the palette index closest to `color` by squared RGB distance.
///
/// Ties resolve to the lowest index, so pure black always maps to 0, never 8.
///
/// # Examples
///
/// ```
/// use zxtex::palette::{nearest_index, Rgb};
///
/// assert_eq!(nearest_index(Rgb::new(250, 10, 5)), 0xA);
/// assert_eq!(nearest_index(Rgb::new(0, 0, 0)), 0);
/// ```
pub fn nearest_index(color: Rgb) -> u8 {
    let mut best_index = 0;
    let mut best_dist = u32::MAX;

    for (i, entry) in ZX_PALETTE.iter().enumerate() {
        let dist = distance_sq(color, *entry);
        if dist < best_dist {
            best_dist = dist;
            best_index = i;
        }
    }

    best_index as u8
}

/// Whether quantization can ever produce `index`.
///
/// Index 8 repeats black and loses every tie to 0, so it only shows up in
/// hand-written text.
pub fn is_reachable(index: u8) -> bool {
    palette_color(index).is_some_and(|c| nearest_index(c) == index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_duplicate_black_is_unreachable() {
        let unreachable: Vec<u8> = (0..PALETTE_SIZE as u8).filter(|i| !is_reachable(*i)).collect();
        assert_eq!(unreachable, vec![8]);
        assert!(!is_reachable(16));
    }

    #[test]
    fn test_exact_palette_colors_map_to_themselves() {
        for (i, color) in ZX_PALETTE.iter().enumerate() {
            let expected = if i == 8 { 0 } else { i as u8 };
            assert_eq!(nearest_index(*color), expected, "entry {:X}", i);
        }
    }

    #[test]
    fn test_duplicate_black_resolves_to_zero() {
        assert_eq!(ZX_PALETTE[0], ZX_PALETTE[8]);
        assert_eq!(nearest_index(Rgb::new(0, 0, 0)), 0);
        assert_eq!(nearest_index(Rgb::new(10, 10, 10)), 0);
    }

    #[test]
    fn test_near_colors() {
        assert_eq!(nearest_index(Rgb::new(200, 10, 10)), 2);
        assert_eq!(nearest_index(Rgb::new(250, 250, 250)), 0xF);
        assert_eq!(nearest_index(Rgb::new(0, 240, 240)), 0xD);
        assert_eq!(nearest_index(Rgb::new(120, 120, 120)), 0);
    }

    #[test]
    fn test_nearest_index_in_range_and_stable() {
        for r in (0..=255u16).step_by(17) {
            for g in (0..=255u16).step_by(51) {
                for b in (0..=255u16).step_by(85) {
                    let c = Rgb::new(r as u8, g as u8, b as u8);
                    let idx = nearest_index(c);
                    assert!(idx < 16);
                    assert_eq!(nearest_index(c), idx);
                }
            }
        }
    }

    #[test]
    fn test_equidistant_prefers_first_index() {
        // 235 sits halfway between 215 and 255 on every channel.
        let c = Rgb::new(235, 235, 235);
        assert_eq!(distance_sq(c, ZX_PALETTE[7]), distance_sq(c, ZX_PALETTE[0xF]));
        assert_eq!(nearest_index(c), 7);
    }

    #[test]
    fn test_from_rgba16_keeps_high_byte() {
        let p = Pixel::from_rgba16(Rgba([0xABCD, 0x00FF, 0xFF00, 0x0100]));
        assert_eq!(p, Pixel::new(0xAB, 0x00, 0xFF, 0x01));
    }

    #[test]
    fn test_palette_color_lookup() {
        assert_eq!(palette_color(0xB), Some(Rgb::new(255, 0, 255)));
        assert_eq!(palette_color(16), None);
        assert_eq!(Rgb::new(215, 0, 215).to_hex(), "#D700D7");
    }
}
