//! PNG output of a [`Raster`].
//!
//! This module is feature-gated behind `png` (default on) so that callers
//! that only need pixels do not pull in the `image` crate.

use dot_field_core::{DotField, FieldError};
use std::path::Path;

use crate::raster::Raster;
use crate::{render, ScatterStyle};

/// Writes a raster as a PNG image.
///
/// Returns `FieldError::InvalidDimensions` if the raster dimensions overflow
/// `u32`, or `FieldError::Io` on write failure.
pub fn write_png(raster: &Raster, path: &Path) -> Result<(), FieldError> {
    let w = u32::try_from(raster.width()).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(raster.height()).map_err(|_| FieldError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, raster.rgba().to_vec())
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))?;
    tracing::debug!(path = %path.display(), width = w, height = h, "snapshot written");
    Ok(())
}

/// Plots `field` at the given pixel size and writes it as a PNG.
pub fn save_field_png<R>(
    field: &DotField<R>,
    style: &ScatterStyle,
    pixel_width: usize,
    pixel_height: usize,
    path: &Path,
) -> Result<(), FieldError> {
    let raster = render(field, style, pixel_width, pixel_height)?;
    write_png(&raster, path)
}
