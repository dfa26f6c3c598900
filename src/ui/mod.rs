pub mod widget;

pub use widget::{DomeGalleryWidget, GalleryResponse, TileClick, UiGalleryExt};
