//! Post-release coasting: velocity decays by a constant friction per frame.

use crate::core::{
    config::InertiaConfig,
    geo::Point,
    rotation::{PitchLimits, Rotation},
};
use crate::input::gestures::DragAxis;

/// Decaying rotation driven by the release velocity of a drag
#[derive(Debug, Clone, PartialEq)]
pub struct Inertia {
    velocity: Point,
    axis: DragAxis,
    friction: f64,
    min_velocity: f64,
    divisor: f64,
}

impl Inertia {
    /// Keeps only the velocity component along `axis`
    pub fn new(velocity: Point, axis: DragAxis, config: &InertiaConfig) -> Self {
        let velocity = match axis {
            DragAxis::Horizontal => Point::new(velocity.x, 0.0),
            DragAxis::Vertical => Point::new(0.0, velocity.y),
        };
        Self {
            velocity,
            axis,
            friction: config.friction,
            min_velocity: config.min_velocity,
            divisor: config.divisor,
        }
    }

    /// True when the release was fast enough to coast at all
    pub fn should_start(&self) -> bool {
        self.velocity.is_finite()
            && (self.velocity.x.abs() > self.min_velocity || self.velocity.y.abs() > self.min_velocity)
    }

    pub fn velocity(&self) -> Point {
        self.velocity
    }

    pub fn axis(&self) -> DragAxis {
        self.axis
    }

    /// Advances one frame. Returns the new rotation, or `None` once the
    /// velocity fell below the threshold on both axes.
    pub fn step(&mut self, rotation: Rotation, limits: &PitchLimits) -> Option<Rotation> {
        if !self.velocity.is_finite()
            || (self.velocity.x.abs() < self.min_velocity
                && self.velocity.y.abs() < self.min_velocity)
        {
            self.velocity = Point::default();
            return None;
        }

        self.velocity = self.velocity.multiply(self.friction);

        Some(match self.axis {
            DragAxis::Horizontal => rotation.with_yaw_delta(self.velocity.x / self.divisor),
            DragAxis::Vertical => {
                rotation.with_pitch_delta(-self.velocity.y / self.divisor, limits)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slow_release_does_not_start() {
        let inertia = Inertia::new(
            Point::new(4.0, 0.0),
            DragAxis::Horizontal,
            &InertiaConfig::default(),
        );
        assert!(!inertia.should_start());
    }

    #[test]
    fn test_off_axis_velocity_is_dropped() {
        let inertia = Inertia::new(
            Point::new(2.0, 900.0),
            DragAxis::Horizontal,
            &InertiaConfig::default(),
        );
        assert_eq!(inertia.velocity(), Point::new(2.0, 0.0));
        assert!(!inertia.should_start());
    }

    #[test]
    fn test_friction_decay_until_rest() {
        let config = InertiaConfig::default();
        let limits = PitchLimits::default();
        let mut inertia = Inertia::new(Point::new(1000.0, 0.0), DragAxis::Horizontal, &config);
        assert!(inertia.should_start());

        let mut rotation = Rotation::default();
        let first = inertia.step(rotation, &limits).unwrap();
        assert!((first.yaw - 920.0 / config.divisor).abs() < 1e-9);
        assert!((inertia.velocity().x - 920.0).abs() < 1e-9);
        rotation = first;

        let mut frames = 1;
        while let Some(next) = inertia.step(rotation, &limits) {
            assert!(next.yaw > rotation.yaw);
            rotation = next;
            frames += 1;
        }
        assert_eq!(frames, config.frames_to_rest(1000.0));
        assert_eq!(inertia.velocity(), Point::default());
        assert_eq!(rotation.pitch, 0.0);
    }

    #[test]
    fn test_vertical_coasting_respects_pitch_limits() {
        let config = InertiaConfig::default();
        let limits = PitchLimits::default();
        let mut inertia = Inertia::new(Point::new(0.0, -50_000.0), DragAxis::Vertical, &config);

        let mut rotation = Rotation::new(24.0, 0.0);
        while let Some(next) = inertia.step(rotation, &limits) {
            assert!(limits.contains(next.pitch));
            rotation = next;
        }
        assert_eq!(rotation.pitch, limits.max);
    }
}
