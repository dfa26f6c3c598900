//! Sphere orientation and the clamp/wrap rules every update goes through.

use serde::{Deserialize, Serialize};

use crate::core::constants::{MAX_PITCH, MIN_PITCH};

/// Normalizes an angle into [0, 360)
pub fn normalize_angle(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Wraps an angle into the signed range (-180, 180]
pub fn wrap_angle_signed(deg: f64) -> f64 {
    let wrapped = (deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Allowed pitch range in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchLimits {
    pub min: f64,
    pub max: f64,
}

impl PitchLimits {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, pitch: f64) -> f64 {
        pitch.clamp(self.min, self.max)
    }

    pub fn contains(&self, pitch: f64) -> bool {
        pitch >= self.min && pitch <= self.max
    }
}

impl Default for PitchLimits {
    fn default() -> Self {
        Self::new(MIN_PITCH, MAX_PITCH)
    }
}

/// Current orientation of the sphere, in degrees.
///
/// `pitch` is the rotation around the horizontal axis (CSS `rotateX`),
/// `yaw` the rotation around the vertical axis (CSS `rotateY`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotation {
    pub pitch: f64,
    pub yaw: f64,
}

impl Rotation {
    pub fn new(pitch: f64, yaw: f64) -> Self {
        Self { pitch, yaw }
    }

    /// Returns a copy with `yaw` replaced by `yaw + delta`, wrapped
    pub fn with_yaw_delta(self, delta: f64) -> Self {
        if !delta.is_finite() {
            return self;
        }
        Self {
            yaw: wrap_angle_signed(self.yaw + delta),
            ..self
        }
    }

    /// Returns a copy with `pitch` replaced by `pitch + delta`, clamped
    pub fn with_pitch_delta(self, delta: f64, limits: &PitchLimits) -> Self {
        if !delta.is_finite() {
            return self;
        }
        Self {
            pitch: limits.clamp(self.pitch + delta),
            ..self
        }
    }

    /// Brings an arbitrary rotation back into the valid ranges
    pub fn normalized(self, limits: &PitchLimits) -> Self {
        let pitch = if self.pitch.is_finite() {
            limits.clamp(self.pitch)
        } else {
            0.0
        };
        let yaw = if self.yaw.is_finite() {
            wrap_angle_signed(self.yaw)
        } else {
            0.0
        };
        Self { pitch, yaw }
    }

    /// CSS transform placing the sphere centre one radius behind the screen
    pub fn sphere_transform(&self) -> String {
        format!(
            "translate3d(0, 0, calc(var(--radius) * -1)) rotateX({}deg) rotateY({}deg)",
            self.pitch, self.yaw
        )
    }
}
