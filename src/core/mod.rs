pub mod builder;
pub mod config;
pub mod constants;
pub mod geo;
pub mod rotation;

pub use builder::DomeGalleryBuilder;
pub use config::{GalleryConfig, InteractionProfile};
pub use geo::{Point, TileRect};
pub use rotation::{PitchLimits, Rotation};
