#![deny(unsafe_code)]
//! Rendering for dot fields: the [`ScatterSurface`] drawing interface, the
//! pass-through [`ScatterStyle`], a CPU [`Raster`] surface, and PNG snapshots.
//!
//! The core crate knows nothing about drawing. [`plot`] is the single hand-off
//! point: it passes a field's positions to any surface and fixes the axes to
//! the field's rectangle with a 1:1 aspect ratio.

pub mod raster;

#[cfg(feature = "png")]
pub mod snapshot;

use dot_field_core::params::param_f64;
use dot_field_core::{DVec2, DotField, FieldError, Srgb};
use serde_json::{json, Value};

pub use raster::Raster;

/// Marker diameter used when no style overrides it.
pub const DEFAULT_MARKER_SIZE: f64 = 2.0;

/// A 2D scatter-plot drawing surface.
///
/// Surfaces only consume data; nothing is read back from them. Immediate-mode
/// surfaces such as [`Raster`] use the limits and aspect in effect when
/// `scatter` is called, so [`plot`] configures the axes first.
pub trait ScatterSurface {
    /// Sets the visible data range on each axis.
    fn set_limits(&mut self, x: (f64, f64), y: (f64, f64));

    /// Forces one data unit to span the same length on both axes.
    fn set_equal_aspect(&mut self);

    /// Draws a fixed-size marker at every point.
    fn scatter(&mut self, points: &[DVec2], marker_size: f64, style: &ScatterStyle);
}

/// Style options passed through to a surface untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterStyle {
    /// Marker diameter in pixels.
    pub marker_size: f64,
    pub color: Srgb,
    pub background: Srgb,
}

impl Default for ScatterStyle {
    fn default() -> Self {
        Self {
            marker_size: DEFAULT_MARKER_SIZE,
            color: Srgb::BLACK,
            background: Srgb::WHITE,
        }
    }
}

impl ScatterStyle {
    /// Extracts `marker_size`, `color` and `background` from a JSON object,
    /// falling back to defaults for missing or mistyped keys.
    ///
    /// Returns `FieldError::InvalidColor` if a color string is present but
    /// not a valid hex color.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        let defaults = Self::default();
        let color = |key: &str, default: Srgb| match params.get(key).and_then(Value::as_str) {
            Some(hex) => Srgb::from_hex(hex),
            None => Ok(default),
        };
        Ok(Self {
            marker_size: param_f64(params, "marker_size", defaults.marker_size),
            color: color("color", defaults.color)?,
            background: color("background", defaults.background)?,
        })
    }

    /// Current values as a JSON object.
    pub fn to_json(&self) -> Value {
        json!({
            "marker_size": self.marker_size,
            "color": self.color.to_hex(),
            "background": self.background.to_hex(),
        })
    }
}

/// Draws `field` on `surface` with axes fixed to `[0, width] × [0, height]`
/// and equal aspect.
pub fn plot<R, S: ScatterSurface + ?Sized>(
    field: &DotField<R>,
    surface: &mut S,
    style: &ScatterStyle,
) {
    surface.set_limits((0.0, field.width()), (0.0, field.height()));
    surface.set_equal_aspect();
    surface.scatter(field.positions(), style.marker_size, style);
}

/// Plots `field` onto a fresh raster of the given pixel size.
pub fn render<R>(
    field: &DotField<R>,
    style: &ScatterStyle,
    pixel_width: usize,
    pixel_height: usize,
) -> Result<Raster, FieldError> {
    let mut raster = Raster::new(pixel_width, pixel_height, style.background)?;
    plot(field, &mut raster, style);
    Ok(raster)
}
