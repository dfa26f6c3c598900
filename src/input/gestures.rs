use crate::core::{
    config::GestureConfig,
    geo::Point,
    rotation::{PitchLimits, Rotation},
};
use instant::{Duration, Instant};
use serde::{Deserialize, Serialize};

/// Axis a drag rotates the sphere around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragAxis {
    /// Left/right drag, changes yaw
    Horizontal,
    /// Up/down drag, changes pitch
    Vertical,
}

impl DragAxis {
    /// Horizontal only when the horizontal component strictly dominates
    pub fn dominant(dx: f64, dy: f64) -> Self {
        if dx.abs() > dy.abs() {
            DragAxis::Horizontal
        } else {
            DragAxis::Vertical
        }
    }
}

/// Applies a pixel delta along `axis` to `baseline`
pub fn rotate_along(
    baseline: Rotation,
    axis: DragAxis,
    delta: Point,
    divisor: f64,
    limits: &PitchLimits,
) -> Rotation {
    match axis {
        DragAxis::Horizontal => baseline.with_yaw_delta(delta.x / divisor),
        DragAxis::Vertical => baseline.with_pitch_delta(-delta.y / divisor, limits),
    }
}

/// Exponentially smoothed pointer velocity in px/s
#[derive(Debug, Clone)]
pub struct VelocityTracker {
    velocity: Point,
    last_position: Option<Point>,
    last_time: Option<Instant>,
    smoothing: f64,
    min_interval: Duration,
}

impl VelocityTracker {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            velocity: Point::default(),
            last_position: None,
            last_time: None,
            smoothing: config.velocity_smoothing,
            min_interval: Duration::from_millis(config.min_sample_interval_ms.max(1)),
        }
    }

    /// Starts a fresh estimate at `position`
    pub fn reset(&mut self, position: Point, now: Instant) {
        self.velocity = Point::default();
        self.last_position = Some(position);
        self.last_time = Some(now);
    }

    /// Folds a new sample into the estimate
    pub fn sample(&mut self, position: Point, now: Instant) {
        if let (Some(last_position), Some(last_time)) = (self.last_position, self.last_time) {
            let elapsed = if now > last_time {
                now.duration_since(last_time)
            } else {
                Duration::ZERO
            };
            let elapsed = elapsed.max(self.min_interval);
            let dt = elapsed.as_secs_f64();
            let instant_velocity = position.subtract(&last_position).multiply(1.0 / dt);
            self.velocity = self
                .velocity
                .multiply(1.0 - self.smoothing)
                .add(&instant_velocity.multiply(self.smoothing));
        }
        self.last_position = Some(position);
        self.last_time = Some(now);
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn clear(&mut self) {
        self.velocity = Point::default();
        self.last_position = None;
        self.last_time = None;
    }
}

/// State of one drag, from pointer down to release
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub start: Point,
    pub baseline: Rotation,
    pub axis: Option<DragAxis>,
    pub moved: bool,
}

/// Result of feeding a move into a [`DragSession`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    pub rotation: Rotation,
    /// Set on the move that locked the axis
    pub locked: Option<DragAxis>,
}

impl DragSession {
    pub fn new(start: Point, baseline: Rotation) -> Self {
        Self {
            start,
            baseline,
            axis: None,
            moved: false,
        }
    }

    /// Rotation for the pointer at `position`.
    ///
    /// Until the pointer travels past the threshold the dominant axis is applied
    /// tentatively; the first move past it locks the axis for the whole gesture.
    pub fn update(
        &mut self,
        position: Point,
        config: &GestureConfig,
        limits: &PitchLimits,
    ) -> DragUpdate {
        let delta = position.subtract(&self.start);
        let mut locked = None;

        if delta.length() > config.drag_threshold {
            self.moved = true;
            if self.axis.is_none() {
                let axis = DragAxis::dominant(delta.x, delta.y);
                self.axis = Some(axis);
                locked = Some(axis);
            }
        }

        let axis = self
            .axis
            .unwrap_or_else(|| DragAxis::dominant(delta.x, delta.y));
        DragUpdate {
            rotation: rotate_along(self.baseline, axis, delta, config.drag_divisor, limits),
            locked,
        }
    }
}
