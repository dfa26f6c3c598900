pub mod projection;

pub use projection::{hit_test, ProjectedTile, Projection};
