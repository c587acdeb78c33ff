//! Raster error types

use std::io;
use thiserror::Error;

use play_core::PlayError;

/// Result type for raster operations
pub type RasterResult<T> = Result<T, RasterError>;

/// Errors that can occur when rendering or exporting a sketch
#[derive(Error, Debug)]
pub enum RasterError {
    /// Output size that cannot back a pixmap
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// tiny-skia refused to allocate the pixmap
    #[error("Pixmap error: {0}")]
    Pixmap(String),

    /// PNG encoding failed
    #[error("Encode error: {0}")]
    Encode(String),

    /// IO error when writing the output
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The sketch itself failed
    #[error(transparent)]
    Sketch(#[from] PlayError),
}
