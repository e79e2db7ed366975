//! CPU raster surface: an RGBA8 pixel buffer that draws scatter markers.
//!
//! This module is always available (no feature gate) so that callers can get
//! at the pixels without pulling in the `image` crate. Data y grows upward,
//! so row 0 of the buffer is the top edge of the visible range.

use dot_field_core::{DVec2, FieldError, Srgb};

use crate::{ScatterStyle, ScatterSurface};

/// An RGBA8 image that implements [`ScatterSurface`].
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
    x_limits: (f64, f64),
    y_limits: (f64, f64),
    equal_aspect: bool,
}

impl Raster {
    /// Creates a raster filled with `background`, showing `[0, 1] × [0, 1]`
    /// until limits are set.
    ///
    /// Returns `FieldError::InvalidDimensions` if either dimension is zero
    /// or if the buffer size overflows `usize`.
    pub fn new(width: usize, height: usize, background: Srgb) -> Result<Self, FieldError> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(FieldError::InvalidDimensions)?;
        let mut raster = Self {
            width,
            height,
            rgba: vec![0; len],
            x_limits: (0.0, 1.0),
            y_limits: (0.0, 1.0),
            equal_aspect: false,
        };
        raster.clear(background);
        Ok(raster)
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major RGBA8 bytes, top row first.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// The pixel at column `x`, row `y` (row 0 at the top).
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.rgba[i..i + 4]);
        Some(px)
    }

    /// Paints every pixel with `color`.
    pub fn clear(&mut self, color: Srgb) {
        let px = color.to_rgba8();
        self.rgba
            .chunks_exact_mut(4)
            .for_each(|chunk| chunk.copy_from_slice(&px));
    }

    /// Per-axis pixels-per-unit scale and the pixel offset of the data box.
    fn mapping(&self) -> (DVec2, DVec2) {
        let size = DVec2::new(self.width as f64, self.height as f64);
        let range = DVec2::new(
            self.x_limits.1 - self.x_limits.0,
            self.y_limits.1 - self.y_limits.0,
        );
        if self.equal_aspect {
            let s = (size.x / range.x).min(size.y / range.y);
            let scale = DVec2::splat(s);
            (scale, (size - range * scale) / 2.0)
        } else {
            (size / range, DVec2::ZERO)
        }
    }

    /// Maps a data point to continuous pixel coordinates.
    ///
    /// Returns `None` for points outside the limits or that map to a
    /// non-finite pixel position.
    pub fn to_pixel(&self, p: DVec2) -> Option<DVec2> {
        let (x0, x1) = self.x_limits;
        let (y0, y1) = self.y_limits;
        if !(x0..=x1).contains(&p.x) || !(y0..=y1).contains(&p.y) {
            return None;
        }
        let (scale, offset) = self.mapping();
        let px = DVec2::new(
            offset.x + (p.x - x0) * scale.x,
            offset.y + (y1 - p.y) * scale.y,
        );
        px.is_finite().then_some(px)
    }

    /// Fills a disc of `radius` pixels centered at `center`, always including
    /// the pixel that contains the center.
    fn fill_disc(&mut self, center: DVec2, radius: f64, px: [u8; 4]) {
        let max_x = self.width as isize - 1;
        let max_y = self.height as isize - 1;
        let cx = (center.x.floor() as isize).clamp(0, max_x);
        let cy = (center.y.floor() as isize).clamp(0, max_y);
        self.put(cx as usize, cy as usize, px);

        let x_lo = ((center.x - radius).floor() as isize).max(0);
        let x_hi = ((center.x + radius).ceil() as isize).min(max_x);
        let y_lo = ((center.y - radius).floor() as isize).max(0);
        let y_hi = ((center.y + radius).ceil() as isize).min(max_y);
        let r2 = radius * radius;
        for y in y_lo..=y_hi {
            for x in x_lo..=x_hi {
                let d = DVec2::new(x as f64 + 0.5, y as f64 + 0.5) - center;
                if d.length_squared() <= r2 {
                    self.put(x as usize, y as usize, px);
                }
            }
        }
    }

    fn put(&mut self, x: usize, y: usize, px: [u8; 4]) {
        let i = (y * self.width + x) * 4;
        self.rgba[i..i + 4].copy_from_slice(&px);
    }
}

impl ScatterSurface for Raster {
    fn set_limits(&mut self, x: (f64, f64), y: (f64, f64)) {
        self.x_limits = x;
        self.y_limits = y;
    }

    fn set_equal_aspect(&mut self) {
        self.equal_aspect = true;
    }

    /// Draws filled discs of diameter `marker_size` pixels (at least one
    /// pixel). Points outside the limits are skipped.
    fn scatter(&mut self, points: &[DVec2], marker_size: f64, style: &ScatterStyle) {
        let px = style.color.to_rgba8();
        let radius = (marker_size / 2.0).max(0.5);
        let mut drawn = 0usize;
        for &p in points {
            if let Some(center) = self.to_pixel(p) {
                self.fill_disc(center, radius, px);
                drawn += 1;
            }
        }
        tracing::trace!(points = points.len(), drawn, "scatter rasterized");
    }
}
