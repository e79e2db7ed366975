//! Reproducible description of a dot-field run.
//!
//! A [`Seed`] captures everything needed to recreate a field and its motion:
//! extents, density, PRNG seed, frame count, and motion parameters.

use crate::dot_field::DotField;
use crate::error::FieldError;
use crate::motion::MotionParams;
use serde::{Deserialize, Serialize};

/// Width of the demonstration field.
pub const DEMO_WIDTH: f64 = 200.0;
/// Height of the demonstration field.
pub const DEMO_HEIGHT: f64 = 150.0;
/// Density of the demonstration field (300 dots).
pub const DEMO_DENSITY: f64 = 0.01;
/// PRNG seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Everything needed to replay a dot-field run.
///
/// Two identical `Seed` values produce bit-identical positions after the
/// same number of frames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seed {
    pub width: f64,
    pub height: f64,
    pub dot_density: f64,
    pub seed: u64,
    #[serde(default)]
    pub frames: usize,
    /// Motion parameters in the shape read by [`MotionParams::from_json`].
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Default for Seed {
    /// The 200×150 field at density 0.01 used by the demo.
    fn default() -> Self {
        Self::new(DEMO_WIDTH, DEMO_HEIGHT, DEMO_DENSITY, DEFAULT_SEED)
    }
}

impl Seed {
    /// Creates a new Seed with default params (`{}`) and no frames.
    pub fn new(width: f64, height: f64, dot_density: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            dot_density,
            seed,
            frames: 0,
            params: empty_params(),
        }
    }

    /// Parses the motion parameters.
    pub fn motion(&self) -> Result<MotionParams, FieldError> {
        MotionParams::from_json(&self.params)
    }

    /// Builds the initial field, before any frames are applied.
    pub fn build(&self) -> DotField {
        DotField::seeded(self.width, self.height, self.dot_density, self.seed)
    }

    /// Builds the field and advances it by `frames` steps.
    ///
    /// Fails before building anything if the params name an unknown mode.
    pub fn run(&self) -> Result<DotField, FieldError> {
        let motion = self.motion()?;
        Ok(self.run_with(&motion))
    }

    /// Builds the field and advances it by `frames` steps of `motion`,
    /// ignoring the stored params.
    pub fn run_with(&self, motion: &MotionParams) -> DotField {
        let mut field = self.build();
        for _ in 0..self.frames {
            field.step(motion);
        }
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::Motion;

    #[test]
    fn default_seed_is_the_demo_field() {
        let s = Seed::default();
        assert_eq!(s.width, 200.0);
        assert_eq!(s.height, 150.0);
        assert_eq!(s.dot_density, 0.01);
        assert_eq!(s.frames, 0);
        assert_eq!(s.params, serde_json::json!({}));
        assert_eq!(s.build().len(), 300);
    }

    #[test]
    fn json_round_trip_with_custom_params() {
        let mut s = Seed::new(64.0, 48.0, 0.2, 99);
        s.params = serde_json::json!({"mode": "ccw", "speed": 0.1});
        s.frames = 12;
        let json = serde_json::to_string_pretty(&s).unwrap();
        let restored: Seed = serde_json::from_str(&json).unwrap();
        assert_eq!(s, restored);
    }

    #[test]
    fn missing_frames_and_params_default() {
        let s: Seed = serde_json::from_str(
            r#"{"width": 10.0, "height": 10.0, "dot_density": 0.5, "seed": 1}"#,
        )
        .unwrap();
        assert_eq!(s, Seed::new(10.0, 10.0, 0.5, 1));
    }

    #[test]
    fn motion_reads_params() {
        let mut s = Seed::default();
        s.params = serde_json::json!({"mode": "cw", "speed": 0.5});
        let m = s.motion().unwrap();
        assert_eq!(m.motion, Motion::Cw);
        assert_eq!(m.speed, 0.5);
    }

    #[test]
    fn run_applies_every_frame() {
        let mut s = Seed::new(20.0, 20.0, 0.5, 3);
        s.frames = 4;
        s.params = serde_json::json!({"direction": [0.0, 1.0], "speed": 0.5});
        let start = s.build();
        let end = s.run().unwrap();
        for (a, b) in start.positions().iter().zip(end.positions()) {
            assert_eq!(b.x, a.x);
            assert!((b.y - (a.y + 2.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn run_is_deterministic() {
        let mut s = Seed::default();
        s.frames = 30;
        s.params = serde_json::json!({"mode": "ccw", "speed": 0.02});
        assert_eq!(s.run().unwrap().positions(), s.run().unwrap().positions());
    }

    #[test]
    fn run_with_keeps_non_finite_speed() {
        let mut s = Seed::new(20.0, 20.0, 0.5, 3);
        s.frames = 1;
        let motion = MotionParams {
            motion: Motion::Ccw,
            speed: f64::NAN,
            ..MotionParams::default()
        };
        let field = s.run_with(&motion);
        assert!(!field.is_empty());
        assert!(field.positions().iter().all(|p| p.x.is_nan() && p.y.is_nan()));
    }

    #[test]
    fn run_with_ignores_stored_params() {
        let mut s = Seed::new(20.0, 20.0, 0.5, 3);
        s.frames = 2;
        s.params = serde_json::json!({"mode": "zoom"});
        let start = s.build();
        let end = s.run_with(&MotionParams::default());
        for (a, b) in start.positions().iter().zip(end.positions()) {
            assert!((b.x - (a.x + 2.0)).abs() < 1e-12);
            assert_eq!(b.y, a.y);
        }
    }

    #[test]
    fn run_rejects_unknown_mode() {
        let mut s = Seed::default();
        s.params = serde_json::json!({"mode": "zoom"});
        assert!(matches!(s.run(), Err(FieldError::UnsupportedMode(_))));
    }
}
