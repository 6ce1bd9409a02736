//! Raster image reading and PNG output

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::palette::Pixel;

/// Largest upscale factor accepted for PNG output.
pub const MAX_SCALE: u32 = 64;

/// Error type for image input/output
#[derive(Debug, Error)]
pub enum ImageIoError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The bytes could not be decoded as the expected format
    #[error("failed to decode {format:?} image: {source}")]
    Decode {
        format: ImageFormat,
        #[source]
        source: image::ImageError,
    },
    /// Image encoding error
    #[error("Image error: {0}")]
    Encode(#[from] image::ImageError),
}

/// What kind of content a file extension promises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// A raster image handled by the `image` crate
    Raster(ImageFormat),
    /// Encoded sprite text
    Text,
}

impl SourceFormat {
    /// Classify a path by its extension (case-insensitive).
    ///
    /// Returns `None` for extensions that are neither a supported raster
    /// format nor sprite text.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(SourceFormat::Raster(ImageFormat::Png)),
            "gif" => Some(SourceFormat::Raster(ImageFormat::Gif)),
            "bmp" => Some(SourceFormat::Raster(ImageFormat::Bmp)),
            "jpg" | "jpeg" => Some(SourceFormat::Raster(ImageFormat::Jpeg)),
            "txt" | "hex" => Some(SourceFormat::Text),
            _ => None,
        }
    }
}

/// A decoded raster as 8-bit pixels in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Pixel>,
}

/// Decode image bytes of a known format.
///
/// 16-bit sources keep only the high byte of each channel; every other
/// layout is expanded to 8-bit RGBA.
pub fn decode_image(bytes: &[u8], format: ImageFormat) -> Result<DecodedImage, ImageIoError> {
    let image = image::load_from_memory_with_format(bytes, format)
        .map_err(|source| ImageIoError::Decode { format, source })?;

    let width = image.width() as usize;
    let height = image.height() as usize;

    let pixels = match image {
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => {
            image.to_rgba16().pixels().map(|p| Pixel::from_rgba16(*p)).collect()
        }
        _ => image.to_rgba8().pixels().map(|p| Pixel::from_rgba8(*p)).collect(),
    };

    tracing::debug!(?format, width, height, "decoded source image");

    Ok(DecodedImage { width, height, pixels })
}

fn create_parent_dirs(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Save an RGBA image to a PNG file.
///
/// Parent directories are created as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), ImageIoError> {
    create_parent_dirs(path)?;
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Write sprite text to a file, creating parent directories like [`save_png`].
pub fn write_text(text: &str, path: &Path) -> Result<(), ImageIoError> {
    create_parent_dirs(path)?;
    std::fs::write(path, text)?;
    Ok(())
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, ImageIoError> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut io::Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// This preserves crisp pixel edges, so each sprite cell stays a solid block.
/// Returns `None` when `factor` is above [`MAX_SCALE`] or the scaled size
/// overflows `u32`.
pub fn scale_image(image: RgbaImage, factor: u32) -> Option<RgbaImage> {
    if factor > MAX_SCALE {
        return None;
    }
    if factor <= 1 {
        return Some(image);
    }
    let (w, h) = image.dimensions();
    let width = w.checked_mul(factor)?;
    let height = h.checked_mul(factor)?;
    Some(image::imageops::resize(&image, width, height, FilterType::Nearest))
}
