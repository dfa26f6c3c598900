pub mod geometry;
pub mod tiles;

pub use geometry::{base_rotation, fit_radius, TileAngles};
pub use tiles::{
    build_slots, build_tiles, load_hint, normalize_pool, preload_sources, ImageDescriptor,
    LoadPriority, LoadingMode, Slot, Tile, TileAspect,
};
