//! Randomly placed dots inside a rectangle, moved one frame at a time.
//!
//! A [`DotField`] scatters `floor(width * height * dot_density)` dots uniformly
//! over `[0, width) × [0, height)` and then translates or rotates all of them
//! together on every [`update`](DotField::update). Dots are never wrapped or
//! clamped: once a dot leaves the rectangle it stays outside.

use crate::error::FieldError;
use crate::motion::{Motion, MotionParams};
use crate::prng::{UniformSource, Xorshift64};
use glam::DVec2;

/// Number of dots for the given extents and density.
///
/// The product is truncated toward zero. Negative or NaN products yield 0.
pub fn dot_count(width: f64, height: f64, dot_density: f64) -> usize {
    (width * height * dot_density) as usize
}

/// A field of interchangeable dots and the random source that placed them.
#[derive(Debug, Clone)]
pub struct DotField<R = Xorshift64> {
    width: f64,
    height: f64,
    dot_density: f64,
    positions: Vec<DVec2>,
    // Owned for the field's lifetime; only read while placing dots.
    #[allow(dead_code)]
    rng: R,
}

impl DotField<Xorshift64> {
    /// Creates a field whose dots are placed by an entropy-seeded [`Xorshift64`].
    pub fn new(width: f64, height: f64, dot_density: f64) -> Self {
        Self::with_rng(width, height, dot_density, Xorshift64::from_entropy())
    }

    /// Creates a field whose layout is fully determined by `seed`.
    pub fn seeded(width: f64, height: f64, dot_density: f64, seed: u64) -> Self {
        Self::with_rng(width, height, dot_density, Xorshift64::new(seed))
    }
}

impl<R: UniformSource> DotField<R> {
    /// Creates a field, drawing every x coordinate first and then every y
    /// coordinate from `rng`.
    ///
    /// Extents and density are not validated.
    pub fn with_rng(width: f64, height: f64, dot_density: f64, mut rng: R) -> Self {
        let count = dot_count(width, height, dot_density);
        let xs = rng.uniform_n(0.0, width, count);
        let ys = rng.uniform_n(0.0, height, count);
        let positions = xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| DVec2::new(x, y))
            .collect();
        tracing::debug!(width, height, dot_density, count, "dot field initialized");
        Self {
            width,
            height,
            dot_density,
            positions,
            rng,
        }
    }
}

impl<R> DotField<R> {
    /// Advances one frame using a mode name (`"translation"`, `"cw"` or `"ccw"`).
    ///
    /// Returns a copy of the new positions. An unknown mode returns
    /// `FieldError::UnsupportedMode` and leaves every dot where it was.
    pub fn update(
        &mut self,
        mode: &str,
        direction: DVec2,
        speed: f64,
    ) -> Result<Vec<DVec2>, FieldError> {
        let motion: Motion = mode.parse()?;
        Ok(self.apply(motion, direction, speed))
    }

    /// Advances one frame with the given parameters.
    ///
    /// Translation shifts every dot by [`MotionParams::offset`]. Rotations
    /// turn every dot about [`center`](Self::center) by `speed` radians and
    /// ignore `direction`.
    pub fn step(&mut self, params: &MotionParams) -> Vec<DVec2> {
        match params.motion.rotation_angle(params.speed) {
            None => {
                let offset = params.offset();
                self.positions.iter_mut().for_each(|p| *p += offset);
            }
            Some(angle) => {
                self.positions = rotate_about(&self.positions, self.center(), angle);
            }
        }
        tracing::trace!(
            motion = %params.motion,
            speed = params.speed,
            dots = self.positions.len(),
            "frame applied"
        );
        self.positions.clone()
    }

    /// Advances one frame with an already-parsed motion.
    pub fn apply(&mut self, motion: Motion, direction: DVec2, speed: f64) -> Vec<DVec2> {
        self.step(&MotionParams {
            motion,
            direction,
            speed,
        })
    }

    /// Field width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Field height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Fraction of unit area covered by dots.
    pub fn dot_density(&self) -> f64 {
        self.dot_density
    }

    /// Geometric center of the rectangle, the pivot for rotations.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Current dot positions in initialization order.
    pub fn positions(&self) -> &[DVec2] {
        &self.positions
    }

    /// Number of dots; fixed for the lifetime of the field.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Rotates every point about `pivot` by `angle` radians (counter-clockwise
/// for positive angles when y points up).
fn rotate_about(points: &[DVec2], pivot: DVec2, angle: f64) -> Vec<DVec2> {
    let (sin_a, cos_a) = angle.sin_cos();
    points
        .iter()
        .map(|&p| {
            let d = p - pivot;
            DVec2::new(
                pivot.x + d.x * cos_a - d.y * sin_a,
                pivot.y + d.x * sin_a + d.y * cos_a,
            )
        })
        .collect()
}
