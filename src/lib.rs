//! zxtex - sprites as editable hex text
//!
//! This library provides functionality to:
//! - Quantize RGBA pixels to a fixed 16-colour palette
//! - Encode quantized sprites as text (annotated rows or a raw single line)
//! - Parse that text back into a grid, inferring dimensions when needed
//! - Render grids to PNG

pub mod cli;
pub mod codec;
pub mod config;
pub mod convert;
pub mod grid;
pub mod image_io;
pub mod palette;
pub mod transparency;
