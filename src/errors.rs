use thiserror::Error;

/// Errors that can occur in the scratch-reveal engine
#[derive(Error, Debug)]
pub enum ScratchError {
    /// Error when a session is constructed with invalid or missing options
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error when an unknown named operation is requested on a session
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Error when operating on a session after it was destroyed
    #[error("Session has been destroyed and accepts no further operations")]
    SessionDestroyed,

    /// Error when the raster surface cannot report per-pixel alpha.
    /// Caught at the surface-factory boundary and demoted to degraded
    /// mode; never propagated into a running session.
    #[error("Pixel inspection unavailable: {0}")]
    PixelInspection(String),

    /// Error when an erase operation is refused by the raster surface
    #[error("Surface erase failed: {0}")]
    Surface(String),

    /// Error when decoding a background image
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with ScratchError
pub type Result<T> = std::result::Result<T, ScratchError>;
