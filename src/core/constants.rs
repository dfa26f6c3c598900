//! Default tuning values for the dome gallery.
//! Every value here is the default of a field in [`GalleryConfig`](crate::core::config::GalleryConfig);
//! keeping them in one place makes it easier to tweak the feel of the gallery.

/// Number of longitude columns on the sphere.
pub const DEFAULT_SEGMENTS: u32 = 35;

/// Upper bound on the column count accepted by the layout.
pub const MAX_SEGMENTS: u32 = 360;

/// Longitude index of the first column. Columns advance by [`COLUMN_STEP`].
pub const DEFAULT_COLUMN_ORIGIN: i32 = -37;

/// Spacing between two neighbouring columns, in grid units.
pub const COLUMN_STEP: i32 = 2;

/// Latitude offsets used by even columns.
pub const EVEN_COLUMN_ROWS: [i32; 5] = [-4, -2, 0, 2, 4];

/// Latitude offsets used by odd columns.
pub const ODD_COLUMN_ROWS: [i32; 5] = [-3, -1, 1, 3, 5];

/// Every tile spans 2×2 grid units.
pub const TILE_SPAN: u32 = 2;

/// Pitch range that keeps populated rows in view (degrees).
pub const MIN_PITCH: f64 = -25.0;
pub const MAX_PITCH: f64 = 25.0;

/// Movement (px) before a drag locks onto an axis and counts as "moved".
pub const DRAG_THRESHOLD: f64 = 3.0;

/// Pixels of drag per degree of rotation.
pub const DRAG_DIVISOR: f64 = 50.0;

/// Weight of the newest sample in the exponentially smoothed velocity.
pub const VELOCITY_SMOOTHING: f64 = 0.3;

/// Lower bound on the time between two move samples (ms).
pub const MIN_SAMPLE_INTERVAL_MS: u64 = 1;

/// Per-frame velocity multiplier while coasting.
pub const INERTIA_FRICTION: f64 = 0.92;

/// Velocity (px/s) under which coasting stops.
pub const INERTIA_MIN_VELOCITY: f64 = 5.0;

/// Velocity (px/s) per degree of rotation applied in one inertia frame.
pub const INERTIA_DIVISOR: f64 = 2000.0;

/// A wheel gesture is horizontal when |dx| exceeds |dy| by this ratio.
pub const WHEEL_DOMINANCE_RATIO: f64 = 2.0;

/// Minimum |dx| for a wheel gesture to rotate the sphere.
pub const WHEEL_MIN_DELTA: f64 = 5.0;

/// Wheel delta per degree of yaw.
pub const WHEEL_DIVISOR: f64 = 50.0;

/// Fraction of the container basis used as sphere radius.
pub const DEFAULT_FIT: f64 = 0.5;

/// Containers at least this wide (width / height) use their width as radius basis.
pub const WIDE_ASPECT_BASIS: f64 = 1.3;

/// Tiles loaded eagerly, counted from the first slot.
pub const EAGER_TILE_COUNT: usize = 20;

/// Tiles fetched with high priority, counted from the first slot.
pub const HIGH_PRIORITY_TILE_COUNT: usize = 8;

/// Image ratios beyond these bounds get a wide or tall tile.
pub const WIDE_IMAGE_RATIO: f64 = 1.3;
pub const TALL_IMAGE_RATIO: f64 = 0.8;

/// Shown instead of the sphere when no image was provided.
pub const EMPTY_PLACEHOLDER: &str = "No images provided";
