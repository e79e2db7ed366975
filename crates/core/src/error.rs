//! Error types for the dot-field core.

use thiserror::Error;

/// Errors produced by dot-field operations.
///
/// Numeric inputs (extents, density, speed) are never rejected; only the
/// mode string passed to [`DotField::update`](crate::DotField::update) and
/// the rendering helpers can fail.
#[derive(Debug, Error)]
pub enum FieldError {
    /// `update` received a mode other than `translation`, `cw` or `ccw`.
    #[error("invalid argument: unsupported mode '{0}'")]
    UnsupportedMode(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A raster surface was requested with a zero width or height.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Writing a snapshot failed.
    #[error("I/O error: {0}")]
    Io(String),
}
