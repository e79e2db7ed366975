//! Per-frame motion kinds and the parameters that drive them.

use crate::error::FieldError;
use crate::params::{param_f64, param_string, param_vec2};
use glam::DVec2;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Default mode string accepted by [`DotField::update`](crate::DotField::update).
pub const DEFAULT_MODE: &str = "translation";
/// Default translation direction.
pub const DEFAULT_DIRECTION: DVec2 = DVec2::X;
/// Default speed (units per frame, or radians per frame when rotating).
pub const DEFAULT_SPEED: f64 = 1.0;

/// How a dot field moves from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Motion {
    /// Shift every dot by `direction * speed`.
    #[default]
    Translation,
    /// Rotate about the field center by `-speed` radians.
    Cw,
    /// Rotate about the field center by `+speed` radians.
    Ccw,
}

impl Motion {
    /// All motions, in the order their names are listed.
    pub const ALL: [Motion; 3] = [Motion::Translation, Motion::Cw, Motion::Ccw];

    /// The string form accepted by `update`.
    pub fn as_str(self) -> &'static str {
        match self {
            Motion::Translation => "translation",
            Motion::Cw => "cw",
            Motion::Ccw => "ccw",
        }
    }

    /// Signed rotation angle for `speed`, or `None` for translation.
    ///
    /// `cw` is the exact negation of `ccw` for the same speed.
    pub fn rotation_angle(self, speed: f64) -> Option<f64> {
        match self {
            Motion::Translation => None,
            Motion::Cw => Some(-speed),
            Motion::Ccw => Some(speed),
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Motion {
    type Err = FieldError;

    /// Matches the mode names exactly (case-sensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "translation" => Ok(Motion::Translation),
            "cw" => Ok(Motion::Cw),
            "ccw" => Ok(Motion::Ccw),
            other => Err(FieldError::UnsupportedMode(other.to_string())),
        }
    }
}

/// One frame's worth of motion: the kind, a direction, and a speed.
///
/// `direction` need not be unit length and is ignored by rotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub motion: Motion,
    pub direction: DVec2,
    pub speed: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            motion: Motion::default(),
            direction: DEFAULT_DIRECTION,
            speed: DEFAULT_SPEED,
        }
    }
}

impl MotionParams {
    /// Extracts `mode`, `direction` and `speed` from a JSON object,
    /// falling back to defaults for missing or mistyped keys.
    ///
    /// Returns `FieldError::UnsupportedMode` if `mode` names an unknown motion.
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        Ok(Self {
            motion: param_string(params, "mode", DEFAULT_MODE).parse()?,
            direction: param_vec2(params, "direction", DEFAULT_DIRECTION),
            speed: param_f64(params, "speed", DEFAULT_SPEED),
        })
    }

    /// Current values as a JSON object, in the shape `from_json` reads.
    pub fn to_json(&self) -> Value {
        json!({
            "mode": self.motion.as_str(),
            "direction": [self.direction.x, self.direction.y],
            "speed": self.speed,
        })
    }

    /// Per-frame translation offset, zero for rotations.
    pub fn offset(&self) -> DVec2 {
        match self.motion {
            Motion::Translation => self.direction * self.speed,
            Motion::Cw | Motion::Ccw => DVec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_supported_mode() {
        for motion in Motion::ALL {
            assert_eq!(motion.as_str().parse::<Motion>().unwrap(), motion);
        }
    }

    #[test]
    fn rejects_unknown_mode_with_its_name() {
        let err = "diagonal".parse::<Motion>().unwrap_err();
        assert!(matches!(&err, FieldError::UnsupportedMode(m) if m == "diagonal"));
    }

    #[test]
    fn mode_names_are_case_sensitive() {
        assert!("CW".parse::<Motion>().is_err());
        assert!("Translation".parse::<Motion>().is_err());
    }

    #[test]
    fn default_motion_is_translation() {
        assert_eq!(Motion::default(), Motion::Translation);
        assert_eq!(Motion::default().as_str(), DEFAULT_MODE);
    }

    #[test]
    fn cw_angle_is_negated_ccw_angle() {
        for speed in [0.0, 0.1, -0.7, std::f64::consts::PI] {
            let cw = Motion::Cw.rotation_angle(speed).unwrap();
            let ccw = Motion::Ccw.rotation_angle(speed).unwrap();
            assert_eq!(cw.to_bits(), (-ccw).to_bits());
        }
        assert!(Motion::Translation.rotation_angle(1.0).is_none());
    }

    #[test]
    fn motion_serializes_as_lowercase_name() {
        assert_eq!(serde_json::to_string(&Motion::Ccw).unwrap(), "\"ccw\"");
        let m: Motion = serde_json::from_str("\"translation\"").unwrap();
        assert_eq!(m, Motion::Translation);
    }

    #[test]
    fn from_json_uses_defaults_for_empty_json() {
        let p = MotionParams::from_json(&json!({})).unwrap();
        assert_eq!(p, MotionParams::default());
    }

    #[test]
    fn from_json_extracts_custom_values() {
        let p = MotionParams::from_json(&json!({
            "mode": "cw",
            "direction": [0.0, 2.0],
            "speed": 0.25,
        }))
        .unwrap();
        assert_eq!(p.motion, Motion::Cw);
        assert_eq!(p.direction, DVec2::new(0.0, 2.0));
        assert!((p.speed - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn from_json_rejects_unknown_mode() {
        let result = MotionParams::from_json(&json!({"mode": "spiral"}));
        assert!(matches!(result, Err(FieldError::UnsupportedMode(_))));
    }

    #[test]
    fn to_json_round_trips_through_from_json() {
        let p = MotionParams {
            motion: Motion::Ccw,
            direction: DVec2::new(-1.0, 0.5),
            speed: 0.03,
        };
        assert_eq!(MotionParams::from_json(&p.to_json()).unwrap(), p);
    }

    #[test]
    fn offset_scales_direction_by_speed() {
        let p = MotionParams {
            motion: Motion::Translation,
            direction: DVec2::new(3.0, -4.0),
            speed: 0.5,
        };
        assert_eq!(p.offset(), DVec2::new(1.5, -2.0));
    }

    #[test]
    fn offset_is_zero_for_rotations() {
        let p = MotionParams {
            motion: Motion::Ccw,
            ..MotionParams::default()
        };
        assert_eq!(p.offset(), DVec2::ZERO);
    }
}
