use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the I/O boundary of the canvas (image loading, export, config).
///
/// The drawing engine itself never fails; these only come from collaborators that
/// touch the filesystem or decode/encode rasters.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode {path}: {reason}")]
    Encode { path: PathBuf, reason: String },

    #[error("Invalid raster size {width}x{height}")]
    Raster { width: u32, height: u32 },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for canvas I/O operations
pub type CanvasResult<T> = Result<T, CanvasError>;
