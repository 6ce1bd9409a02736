//! End-to-end conversions between images and sprite text.
//!
//! One call converts one input. Each conversion is independent and touches
//! nothing but its own input and declared output, so callers may run several
//! in parallel.

use image::{ImageFormat, RgbaImage};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::codec::{self, CodecError, Encoding};
use crate::grid::PixelGrid;
use crate::image_io::{self, ImageIoError, SourceFormat};
use crate::transparency::TransparencyConfig;

/// Output name used when nothing better is known.
pub const DEFAULT_OUTPUT: &str = "out.png";

/// Errors that end a conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input file extension is not a known raster or text format
    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),
    /// Image bytes could not be decoded
    #[error("failed to decode '{path}': {source}")]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// No pixel data to convert
    #[error("no pixel data found in input")]
    EmptyInput,
    /// A character outside the grid alphabet reached the grid builder
    #[error("invalid grid character '{ch}' at position {position}")]
    InvalidDigit { ch: char, position: usize },
    /// Required setting missing or unusable
    #[error("{0}")]
    Configuration(String),
    /// The decoded grid cannot be rendered as an image
    #[error("grid of {width}x{height} is too large to render")]
    TooLarge { width: usize, height: usize },
    /// Reading or writing a file failed
    #[error("failed to {action} '{path}': {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<CodecError> for ConvertError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::EmptyInput => ConvertError::EmptyInput,
            CodecError::InvalidDigit { ch, position } => {
                ConvertError::InvalidDigit { ch, position }
            }
            CodecError::WidthTooLarge { .. } => ConvertError::Configuration(e.to_string()),
            CodecError::TooLarge { width, height } => ConvertError::TooLarge { width, height },
        }
    }
}

impl ConvertError {
    fn from_image_io(e: ImageIoError, action: &'static str, path: &Path) -> Self {
        let path = path.to_path_buf();
        match e {
            ImageIoError::Decode { source, .. } => ConvertError::DecodeFailure { path, source },
            ImageIoError::Io(source) => ConvertError::Io { action, path, source },
            ImageIoError::Encode(image::ImageError::IoError(source)) => {
                ConvertError::Io { action, path, source }
            }
            ImageIoError::Encode(other) => {
                ConvertError::Io { action, path, source: io::Error::other(other) }
            }
        }
    }
}

/// Settings for a single conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Text layout for image -> text
    pub encoding: Encoding,
    /// Grid width for text -> image; 0 means unset
    pub width: usize,
    /// Explicit output path
    pub output: Option<PathBuf>,
    /// Extra transparency rules for image -> text
    pub transparency: TransparencyConfig,
    /// Integer upscale factor for PNG output
    pub scale: u32,
    /// PNG name used when neither `output` nor a header file name is known
    pub default_output: PathBuf,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            encoding: Encoding::Rows,
            width: 0,
            output: None,
            transparency: TransparencyConfig::default(),
            scale: 1,
            default_output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// What the command-line input refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// An existing raster image file
    Image(PathBuf, ImageFormat),
    /// An existing sprite text file
    Text(PathBuf),
    /// Not a file: the argument itself is the sprite text
    Literal(String),
}

impl Input {
    /// Classify an input argument.
    ///
    /// Existing files are dispatched on their extension; anything that is not
    /// an existing path is treated as literal sprite text.
    pub fn classify(arg: &str) -> Result<Self, ConvertError> {
        let path = Path::new(arg);
        if !path.exists() {
            return Ok(Input::Literal(arg.to_string()));
        }
        match SourceFormat::from_path(path) {
            Some(SourceFormat::Raster(format)) => Ok(Input::Image(path.to_path_buf(), format)),
            Some(SourceFormat::Text) => Ok(Input::Text(path.to_path_buf())),
            None => {
                let ext = path
                    .extension()
                    .map(|e| format!(".{}", e.to_string_lossy()))
                    .unwrap_or_else(|| path.display().to_string());
                Err(ConvertError::UnsupportedFormat(ext))
            }
        }
    }
}

/// A rendered sprite ready to be saved.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: RgbaImage,
    pub output_path: PathBuf,
    /// Grid size before scaling
    pub width: usize,
    pub height: usize,
}

/// Result of [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Image converted to text; `written_to` is `None` when the text should
    /// go to standard output.
    Text { text: String, written_to: Option<PathBuf> },
    /// Text converted to an image and saved
    Image { path: PathBuf, width: usize, height: usize },
}

/// Decode raster bytes and quantize them to a grid.
pub fn image_bytes_to_grid(
    bytes: &[u8],
    format: ImageFormat,
    source: &Path,
    transparency: &TransparencyConfig,
) -> Result<PixelGrid, ConvertError> {
    let decoded = image_io::decode_image(bytes, format)
        .map_err(|e| ConvertError::from_image_io(e, "decode", source))?;
    PixelGrid::quantize(decoded.width, decoded.height, &decoded.pixels, transparency)
        .map_err(|_| ConvertError::EmptyInput)
}

/// Convert an image file to sprite text.
pub fn image_to_text(
    path: &Path,
    format: ImageFormat,
    opts: &ConvertOptions,
) -> Result<String, ConvertError> {
    let bytes = fs::read(path).map_err(|source| ConvertError::Io {
        action: "read",
        path: path.to_path_buf(),
        source,
    })?;
    let grid = image_bytes_to_grid(&bytes, format, path, &opts.transparency)?;

    let source_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
    tracing::debug!(
        width = grid.width(),
        height = grid.height(),
        encoding = ?opts.encoding,
        transparency_overrides = opts.transparency.is_active(),
        "encoding grid"
    );
    Ok(codec::encode(&grid, opts.encoding, source_name.as_deref()))
}

/// Convert sprite text (file contents) to an image.
///
/// An explicit width wins over the width of the first grid line.
pub fn text_to_image(text: &str, opts: &ConvertOptions) -> Result<Rendered, ConvertError> {
    let parsed = codec::parse_text(text);
    let width = if opts.width > 0 { opts.width } else { parsed.declared_width };
    let grid = codec::char_stream_to_grid(&parsed.stream, width)?;
    let output_path =
        derive_output_path(opts.output.as_deref(), parsed.file.as_deref(), &opts.default_output);
    render(&grid, opts.scale, output_path)
}

/// Convert a literal grid string to an image.
///
/// The width must be given: a bare string carries no row structure.
pub fn literal_to_image(literal: &str, opts: &ConvertOptions) -> Result<Rendered, ConvertError> {
    if opts.width == 0 {
        return Err(ConvertError::Configuration(
            "a width is required when converting a literal hex string (use --width)".to_string(),
        ));
    }
    let stream = codec::parse_direct(literal);
    let grid = codec::char_stream_to_grid(&stream, opts.width)?;
    let output_path = derive_output_path(opts.output.as_deref(), None, &opts.default_output);
    render(&grid, opts.scale, output_path)
}

fn render(grid: &PixelGrid, scale: u32, output_path: PathBuf) -> Result<Rendered, ConvertError> {
    let image = image_io::scale_image(grid.to_image(), scale).ok_or_else(|| {
        ConvertError::Configuration(format!(
            "cannot scale a {}x{} grid by {} (scale must be 1-{})",
            grid.width(),
            grid.height(),
            scale,
            image_io::MAX_SCALE
        ))
    })?;
    Ok(Rendered { image, output_path, width: grid.width(), height: grid.height() })
}

/// Pick the PNG path for a text -> image conversion.
///
/// | Known | Output |
/// |-------|--------|
/// | explicit `-o` | that path |
/// | header `file: art/hero.gif` | `hero.png` |
/// | nothing | `default` |
pub fn derive_output_path(
    explicit: Option<&Path>,
    recovered: Option<&str>,
    default: &Path,
) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    recovered
        .and_then(|name| Path::new(name).file_stem())
        .map(|stem| PathBuf::from(format!("{}.png", stem.to_string_lossy())))
        .unwrap_or_else(|| default.to_path_buf())
}

fn save(rendered: &Rendered) -> Result<Outcome, ConvertError> {
    image_io::save_png(&rendered.image, &rendered.output_path)
        .map_err(|e| ConvertError::from_image_io(e, "write", &rendered.output_path))?;
    Ok(Outcome::Image {
        path: rendered.output_path.clone(),
        width: rendered.width,
        height: rendered.height,
    })
}

/// Run one conversion for a command-line input and write its output.
pub fn run(input: &str, opts: &ConvertOptions) -> Result<Outcome, ConvertError> {
    match Input::classify(input)? {
        Input::Image(path, format) => {
            let text = image_to_text(&path, format, opts)?;
            match &opts.output {
                Some(out) => {
                    image_io::write_text(&text, out)
                        .map_err(|e| ConvertError::from_image_io(e, "write", out))?;
                    Ok(Outcome::Text { text, written_to: Some(out.clone()) })
                }
                None => Ok(Outcome::Text { text, written_to: None }),
            }
        }
        Input::Text(path) => {
            let text = fs::read_to_string(&path).map_err(|source| ConvertError::Io {
                action: "read",
                path: path.clone(),
                source,
            })?;
            save(&text_to_image(&text, opts)?)
        }
        Input::Literal(literal) => save(&literal_to_image(&literal, opts)?),
    }
}
