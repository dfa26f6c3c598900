//! Configuration system for gallery layout and interaction tuning
//!
//! Options are grouped by concern and can be picked through a profile
//! preset or loaded from JSON. Every field has a default, so a JSON
//! document only needs to carry the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::constants::*;
use crate::core::rotation::PitchLimits;
use crate::{GalleryError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionProfile {
    Standard,
    /// No inertia and no wheel rotation, for users asking for reduced motion
    ReducedMotion,
    Custom(GalleryConfig),
}

impl InteractionProfile {
    pub fn resolve(&self) -> GalleryConfig {
        match self {
            Self::Standard => GalleryConfig::default(),
            Self::ReducedMotion => GalleryConfig {
                inertia: InertiaConfig {
                    enabled: false,
                    ..InertiaConfig::default()
                },
                wheel: WheelConfig {
                    enabled: false,
                    ..WheelConfig::default()
                },
                ..GalleryConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for InteractionProfile {
    fn default() -> Self {
        Self::Standard
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub layout: LayoutConfig,
    pub pitch: PitchLimits,
    pub gesture: GestureConfig,
    pub inertia: InertiaConfig,
    pub wheel: WheelConfig,
    pub style: StyleConfig,
}

impl GalleryConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading gallery config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values that would make the engine divide by zero or never settle
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(GalleryError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )))
            }
        }

        if self.layout.segments == 0 || self.layout.segments > MAX_SEGMENTS {
            return Err(GalleryError::InvalidConfig(format!(
                "layout.segments must be in 1..={}, got {}",
                MAX_SEGMENTS, self.layout.segments
            )));
        }
        positive("layout.fit", self.layout.fit)?;
        positive("layout.wide_aspect_basis", self.layout.wide_aspect_basis)?;
        if let Some(min_radius) = self.layout.min_radius {
            positive("layout.min_radius", min_radius)?;
        }
        if !(self.pitch.min.is_finite() && self.pitch.max.is_finite())
            || self.pitch.min > self.pitch.max
        {
            return Err(GalleryError::InvalidConfig(format!(
                "pitch range {}..{} is empty",
                self.pitch.min, self.pitch.max
            )));
        }
        if !self.gesture.drag_threshold.is_finite() || self.gesture.drag_threshold < 0.0 {
            return Err(GalleryError::InvalidConfig(format!(
                "gesture.drag_threshold must not be negative, got {}",
                self.gesture.drag_threshold
            )));
        }
        positive("gesture.drag_divisor", self.gesture.drag_divisor)?;
        if !(self.gesture.velocity_smoothing > 0.0 && self.gesture.velocity_smoothing <= 1.0) {
            return Err(GalleryError::InvalidConfig(format!(
                "gesture.velocity_smoothing must be in (0, 1], got {}",
                self.gesture.velocity_smoothing
            )));
        }
        if !(self.inertia.friction > 0.0 && self.inertia.friction < 1.0) {
            return Err(GalleryError::InvalidConfig(format!(
                "inertia.friction must be in (0, 1), got {}",
                self.inertia.friction
            )));
        }
        positive("inertia.min_velocity", self.inertia.min_velocity)?;
        positive("inertia.divisor", self.inertia.divisor)?;
        positive("wheel.dominance_ratio", self.wheel.dominance_ratio)?;
        positive("wheel.divisor", self.wheel.divisor)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub segments: u32,
    pub column_origin: i32,
    pub fit: f64,
    pub min_radius: Option<f64>,
    pub wide_aspect_basis: f64,
}

impl LayoutConfig {
    /// Degrees covered by one grid unit
    pub fn unit_angle(&self) -> f64 {
        360.0 / self.segments.max(1) as f64 / 2.0
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            column_origin: DEFAULT_COLUMN_ORIGIN,
            fit: DEFAULT_FIT,
            min_radius: None,
            wide_aspect_basis: WIDE_ASPECT_BASIS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    pub drag_threshold: f64,
    pub drag_divisor: f64,
    pub velocity_smoothing: f64,
    pub min_sample_interval_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DRAG_THRESHOLD,
            drag_divisor: DRAG_DIVISOR,
            velocity_smoothing: VELOCITY_SMOOTHING,
            min_sample_interval_ms: MIN_SAMPLE_INTERVAL_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InertiaConfig {
    pub enabled: bool,
    pub friction: f64,
    pub min_velocity: f64,
    pub divisor: f64,
}

impl InertiaConfig {
    /// Number of frames a release at `speed` px/s coasts before stopping
    pub fn frames_to_rest(&self, speed: f64) -> u32 {
        let mut speed = speed.abs();
        let mut frames = 0;
        while speed >= self.min_velocity && frames < 10_000 {
            speed *= self.friction;
            frames += 1;
        }
        frames
    }
}

impl Default for InertiaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            friction: INERTIA_FRICTION,
            min_velocity: INERTIA_MIN_VELOCITY,
            divisor: INERTIA_DIVISOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub enabled: bool,
    pub dominance_ratio: f64,
    pub min_delta: f64,
    pub divisor: f64,
}

impl WheelConfig {
    /// True for a clearly horizontal gesture (touchpad swipe left/right)
    pub fn is_horizontal(&self, delta_x: f64, delta_y: f64) -> bool {
        delta_x.abs() > delta_y.abs() * self.dominance_ratio && delta_x.abs() > self.min_delta
    }
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dominance_ratio: WHEEL_DOMINANCE_RATIO,
            min_delta: WHEEL_MIN_DELTA,
            divisor: WHEEL_DIVISOR,
        }
    }
}

/// Presentation values handed to the host as CSS custom properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub overlay_blur_color: String,
    pub tile_radius: String,
    pub enlarge_radius: String,
    pub grayscale: bool,
    pub enlarge_transition_ms: u64,
}

impl StyleConfig {
    pub fn image_filter(&self) -> &'static str {
        if self.grayscale {
            "grayscale(1)"
        } else {
            "none"
        }
    }

    pub fn css_variables(&self, radius: f64, segments: u32) -> Vec<(&'static str, String)> {
        vec![
            ("--radius", format!("{}px", radius)),
            ("--overlay-blur-color", self.overlay_blur_color.clone()),
            ("--tile-radius", self.tile_radius.clone()),
            ("--enlarge-radius", self.enlarge_radius.clone()),
            ("--image-filter", self.image_filter().to_string()),
            ("--segments-x", segments.to_string()),
            ("--segments-y", segments.to_string()),
        ]
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            overlay_blur_color: "#060010".to_string(),
            tile_radius: "30px".to_string(),
            enlarge_radius: "30px".to_string(),
            grayscale: true,
            enlarge_transition_ms: 300,
        }
    }
}
