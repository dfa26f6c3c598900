//! Gallery builder for fluent API configuration
//!
//! This module provides a DomeGalleryBuilder that configures a gallery from
//! an interaction profile plus individual overrides.

use crate::{
    animation::scheduler::{FrameScheduler, ManualFrameScheduler},
    core::{
        config::{GalleryConfig, InteractionProfile, StyleConfig},
        geo::Point,
        rotation::{PitchLimits, Rotation},
    },
    gallery::DomeGallery,
    layout::tiles::ImageDescriptor,
    GalleryError, Result,
};

/// Builder for creating and configuring DomeGallery instances
pub struct DomeGalleryBuilder {
    images: Vec<ImageDescriptor>,
    profile: InteractionProfile,
    segments: Option<u32>,
    fit: Option<f64>,
    min_radius: Option<f64>,
    pitch_limits: Option<PitchLimits>,
    drag_divisor: Option<f64>,
    inertia: Option<bool>,
    wheel: Option<bool>,
    style: Option<StyleConfig>,
    container_size: Option<Point>,
    initial_rotation: Option<Rotation>,
}

impl DomeGalleryBuilder {
    pub fn new() -> Self {
        Self {
            images: Vec::new(),
            profile: InteractionProfile::default(),
            segments: None,
            fit: None,
            min_radius: None,
            pitch_limits: None,
            drag_divisor: None,
            inertia: None,
            wheel: None,
            style: None,
            container_size: None,
            initial_rotation: None,
        }
    }

    /// Set the image pool
    pub fn with_images<I, T>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageDescriptor>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    /// Add one image to the pool
    pub fn with_image(mut self, src: impl Into<String>, alt: impl Into<String>) -> Self {
        self.images.push(ImageDescriptor::new(src, alt));
        self
    }

    /// Set the interaction profile
    pub fn with_profile(mut self, profile: InteractionProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Use a complete configuration
    pub fn with_config(mut self, config: GalleryConfig) -> Self {
        self.profile = InteractionProfile::Custom(config);
        self
    }

    /// Set the number of sphere columns
    pub fn with_segments(mut self, segments: u32) -> Self {
        self.segments = Some(segments);
        self
    }

    /// Set the radius fit factor and an optional lower bound in pixels
    pub fn with_fit(mut self, fit: f64, min_radius: Option<f64>) -> Self {
        self.fit = Some(fit);
        self.min_radius = min_radius;
        self
    }

    /// Set pitch limits in degrees
    pub fn with_pitch_limits(mut self, min: f64, max: f64) -> Self {
        self.pitch_limits = Some(PitchLimits::new(min, max));
        self
    }

    /// Set how many pixels of drag make one degree of rotation
    pub fn with_drag_sensitivity(mut self, pixels_per_degree: f64) -> Self {
        self.drag_divisor = Some(pixels_per_degree);
        self
    }

    /// Enable or disable post-release coasting
    pub fn with_inertia(mut self, enabled: bool) -> Self {
        self.inertia = Some(enabled);
        self
    }

    /// Enable or disable horizontal wheel rotation
    pub fn with_wheel_rotation(mut self, enabled: bool) -> Self {
        self.wheel = Some(enabled);
        self
    }

    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the container size used for the initial radius
    pub fn with_container_size(mut self, width: f64, height: f64) -> Self {
        self.container_size = Some(Point::new(width, height));
        self
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.initial_rotation = Some(rotation);
        self
    }

    /// Resolve the profile and overrides into a validated configuration
    pub fn config(&self) -> Result<GalleryConfig> {
        let mut config = self.profile.resolve();

        if let Some(segments) = self.segments {
            config.layout.segments = segments;
        }
        if let Some(fit) = self.fit {
            config.layout.fit = fit;
            config.layout.min_radius = self.min_radius;
        }
        if let Some(limits) = self.pitch_limits {
            config.pitch = limits;
        }
        if let Some(divisor) = self.drag_divisor {
            config.gesture.drag_divisor = divisor;
        }
        if let Some(enabled) = self.inertia {
            config.inertia.enabled = enabled;
        }
        if let Some(enabled) = self.wheel {
            config.wheel.enabled = enabled;
        }
        if let Some(style) = &self.style {
            config.style = style.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Build the gallery with a polled frame scheduler
    pub fn build(self) -> Result<DomeGallery> {
        self.build_with_scheduler(ManualFrameScheduler::new())
    }

    /// Build the gallery on top of a host frame scheduler
    pub fn build_with_scheduler<S: FrameScheduler>(self, scheduler: S) -> Result<DomeGallery<S>> {
        let config = self.config()?;

        if let Some(size) = self.container_size {
            if !(size.x > 0.0 && size.y > 0.0) {
                return Err(GalleryError::InvalidConfig(format!(
                    "container size must be positive, got {}x{}",
                    size.x, size.y
                )));
            }
        }

        let mut gallery = DomeGallery::with_scheduler(self.images, config, scheduler)?;

        if let Some(size) = self.container_size {
            gallery.set_container_size(size.x, size.y);
        }
        if let Some(rotation) = self.initial_rotation {
            gallery.set_rotation(rotation);
            // Construction is not a user-visible rotation
            gallery.process_events();
        }

        Ok(gallery)
    }
}

impl Default for DomeGalleryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience methods for common gallery setups
impl DomeGalleryBuilder {
    /// Standard desktop gallery
    pub fn desktop<I, T>(images: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageDescriptor>,
    {
        Self::new()
            .with_images(images)
            .with_profile(InteractionProfile::Standard)
    }

    /// Gallery that never animates on its own
    pub fn reduced_motion<I, T>(images: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageDescriptor>,
    {
        Self::new()
            .with_images(images)
            .with_profile(InteractionProfile::ReducedMotion)
    }

    /// Smaller sphere for narrow screens, without wheel rotation so the
    /// page keeps scrolling
    pub fn mobile<I, T>(images: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageDescriptor>,
    {
        Self::new()
            .with_images(images)
            .with_segments(20)
            .with_wheel_rotation(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::handler::InteractionState;

    #[test]
    fn test_builder_overrides() {
        let gallery = DomeGalleryBuilder::new()
            .with_images(["a.jpg", "b.jpg", "c.jpg"])
            .with_segments(10)
            .with_pitch_limits(-10.0, 10.0)
            .with_container_size(700.0, 600.0)
            .build()
            .unwrap();

        assert_eq!(gallery.tiles().len(), 50);
        assert_eq!(gallery.config().pitch, PitchLimits::new(-10.0, 10.0));
        assert_eq!(gallery.radius(), 300.0);
        assert_eq!(gallery.state(), InteractionState::Idle);
    }

    #[test]
    fn test_builder_profile_then_override() {
        let config = DomeGalleryBuilder::reduced_motion(["a.jpg"])
            .with_inertia(true)
            .config()
            .unwrap();
        assert!(config.inertia.enabled);
        assert!(!config.wheel.enabled);
    }

    #[test]
    fn test_builder_initial_rotation_is_clamped() {
        let mut gallery = DomeGalleryBuilder::new()
            .with_image("a.jpg", "A")
            .with_rotation(Rotation::new(80.0, 30.0))
            .build()
            .unwrap();
        assert_eq!(gallery.rotation(), Rotation::new(25.0, 30.0));
        assert!(gallery.process_events().is_empty());
    }

    #[test]
    fn test_builder_rejects_bad_values() {
        assert!(DomeGalleryBuilder::new().with_segments(0).build().is_err());
        assert!(DomeGalleryBuilder::new()
            .with_container_size(0.0, 100.0)
            .build()
            .is_err());
        assert!(DomeGalleryBuilder::new()
            .with_drag_sensitivity(-1.0)
            .build()
            .is_err());
    }
}
