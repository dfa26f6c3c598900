//! Prelude module for common dome gallery types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use dome_gallery::prelude::*;`

pub use crate::core::{
    builder::DomeGalleryBuilder,
    config::{
        GalleryConfig, GestureConfig, InertiaConfig, InteractionProfile, LayoutConfig,
        StyleConfig, WheelConfig,
    },
    geo::{Point, TileRect},
    rotation::{PitchLimits, Rotation},
};

pub use crate::gallery::DomeGallery;

pub use crate::layout::{
    geometry::{base_rotation, fit_radius, TileAngles},
    tiles::{ImageDescriptor, LoadPriority, LoadingMode, Tile, TileAspect},
};

pub use crate::input::{
    events::{EventHandled, GalleryEvent, InputEvent, TouchPhase, TouchPoint},
    gestures::DragAxis,
    handler::InteractionState,
};

pub use crate::animation::scheduler::{FrameId, FrameScheduler, ManualFrameScheduler};

#[cfg(feature = "render")]
pub use crate::render::projection::{Projection, ProjectedTile};

#[cfg(feature = "egui")]
pub use crate::ui::widget::{DomeGalleryWidget, GalleryResponse};

pub use crate::{GalleryError, Result};

pub use instant::{Duration, Instant};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
