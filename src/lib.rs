//! # Dome Gallery
//!
//! An interactive photo sphere: images are laid out on the inside of a
//! dome and the user rotates it by dragging, flinging or scrolling
//! horizontally.
//!
//! The crate is the interaction engine. It computes the tile layout, owns
//! the rotation state, interprets pointer, touch and wheel input, and runs
//! inertia on frames requested from a host scheduler. Rendering is left to
//! the host: an egui widget and a wasm/DOM binding ship behind features.

pub mod animation;
pub mod core;
pub mod gallery;
pub mod input;
pub mod layout;
pub mod prelude;
#[cfg(feature = "render")]
pub mod render;
#[cfg(feature = "egui")]
pub mod ui;
#[cfg(feature = "wasm")]
pub mod web;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::DomeGalleryBuilder,
    config::{GalleryConfig, InteractionProfile},
    geo::{Point, TileRect},
    rotation::{PitchLimits, Rotation},
};

pub use gallery::DomeGallery;

pub use layout::tiles::{ImageDescriptor, Tile};

pub use input::{
    events::{EventHandled, GalleryEvent, InputEvent},
    handler::InteractionState,
};

pub use animation::scheduler::{FrameId, FrameScheduler, ManualFrameScheduler};

#[cfg(feature = "egui")]
pub use ui::widget::DomeGalleryWidget;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, GalleryError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Tile index {index} out of range ({len} tiles)")]
    TileIndex { index: usize, len: usize },

    #[error("Web error: {0}")]
    Web(String),
}

/// Error type alias for convenience
pub type Error = GalleryError;
