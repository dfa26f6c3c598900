//! Tile layout: placing a flat image list onto the sphere grid.

use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::constants::{
    COLUMN_STEP, EAGER_TILE_COUNT, EVEN_COLUMN_ROWS, HIGH_PRIORITY_TILE_COUNT, MAX_SEGMENTS,
    ODD_COLUMN_ROWS, TALL_IMAGE_RATIO, TILE_SPAN, WIDE_IMAGE_RATIO,
};

/// An image as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

impl ImageDescriptor {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

impl From<&str> for ImageDescriptor {
    fn from(src: &str) -> Self {
        Self::new(src, "")
    }
}

impl From<String> for ImageDescriptor {
    fn from(src: String) -> Self {
        Self::new(src, "")
    }
}

/// A grid coordinate on the sphere awaiting an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub x: i32,
    pub y: i32,
    pub size_x: u32,
    pub size_y: u32,
}

/// A slot with its assigned image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub x: i32,
    pub y: i32,
    pub size_x: u32,
    pub size_y: u32,
    pub src: String,
    pub alt: String,
}

impl Tile {
    fn from_slot(slot: Slot, image: Option<&ImageDescriptor>) -> Self {
        let (src, alt) = image
            .map(|image| (image.src.clone(), image.alt.clone()))
            .unwrap_or_default();
        Self {
            x: slot.x,
            y: slot.y,
            size_x: slot.size_x,
            size_y: slot.size_y,
            src,
            alt,
        }
    }

    pub fn slot(&self) -> Slot {
        Slot {
            x: self.x,
            y: self.y,
            size_x: self.size_x,
            size_y: self.size_y,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.src.is_empty()
    }

    /// Stable key for host-side element reuse
    pub fn key(&self, index: usize) -> String {
        format!("{},{},{}", self.x, self.y, index)
    }
}

/// Generates the slot grid: `segments` columns, five rows each.
///
/// Even columns use rows `-4..=4` step 2, odd columns the same shifted by one,
/// which gives the staggered brick pattern of the dome.
///
/// The column count is capped at [`MAX_SEGMENTS`].
pub fn build_slots(segments: u32, column_origin: i32) -> Vec<Slot> {
    if segments > MAX_SEGMENTS {
        log::warn!(
            "Segment count {} exceeds the maximum of {}, capping",
            segments,
            MAX_SEGMENTS
        );
    }
    let columns = i32::try_from(segments.min(MAX_SEGMENTS)).unwrap_or(0);

    (0..columns)
        .flat_map(move |column| {
            let x = column_origin.saturating_add(column * COLUMN_STEP);
            let rows = if column % 2 == 0 {
                EVEN_COLUMN_ROWS
            } else {
                ODD_COLUMN_ROWS
            };
            rows.into_iter().map(move |y| Slot {
                x,
                y,
                size_x: TILE_SPAN,
                size_y: TILE_SPAN,
            })
        })
        .collect()
}

/// Drops descriptors without a source and merges repeated sources (first wins)
pub fn normalize_pool(pool: &[ImageDescriptor]) -> Vec<ImageDescriptor> {
    let mut seen = FxHashSet::default();
    let mut normalized = Vec::with_capacity(pool.len());
    let mut empty = 0;

    for image in pool {
        if image.src.trim().is_empty() {
            empty += 1;
            continue;
        }
        if seen.insert(image.src.as_str()) {
            normalized.push(image.clone());
        }
    }

    if empty > 0 {
        log::warn!("Ignoring {} image(s) without a source", empty);
    }
    let merged = pool.len() - empty - normalized.len();
    if merged > 0 {
        log::debug!("Merged {} repeated image source(s)", merged);
    }

    normalized
}

/// Assigns images to every slot of a `segments`-column grid.
///
/// The pool is reused cyclically when it is smaller than the grid. A pool
/// larger than the grid is truncated with a warning.
pub fn build_tiles(pool: &[ImageDescriptor], segments: u32, column_origin: i32) -> Vec<Tile> {
    let slots = build_slots(segments, column_origin);
    let images = normalize_pool(pool);

    if images.is_empty() {
        return slots
            .into_iter()
            .map(|slot| Tile::from_slot(slot, None))
            .collect();
    }

    if images.len() > slots.len() {
        log::warn!(
            "Provided image count ({}) exceeds available tiles ({}). Some images will not be shown.",
            images.len(),
            slots.len()
        );
    }

    let mut assigned: Vec<&ImageDescriptor> = (0..slots.len())
        .map(|i| &images[i % images.len()])
        .collect();
    separate_adjacent_duplicates(&mut assigned, |a, b| a.src == b.src);

    slots
        .into_iter()
        .zip(assigned)
        .map(|(slot, image)| Tile::from_slot(slot, Some(image)))
        .collect()
}

/// Swaps every item equal to its predecessor with the first later item that differs
pub(crate) fn separate_adjacent_duplicates<T, F>(items: &mut [T], same: F)
where
    F: Fn(&T, &T) -> bool,
{
    for i in 1..items.len() {
        if !same(&items[i], &items[i - 1]) {
            continue;
        }
        let later = items[i + 1..]
            .iter()
            .position(|item| !same(item, &items[i]));
        if let Some(offset) = later {
            items.swap(i, i + 1 + offset);
        }
    }
}

/// Fetch priority hint for a tile image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPriority {
    High,
    Auto,
    Low,
}

/// Loading strategy for a tile image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadingMode {
    Eager,
    Lazy,
}

/// How the host should load the image of the tile at `index`.
/// The first slots face the viewer at rest, so they are fetched first.
pub fn load_hint(index: usize) -> (LoadingMode, LoadPriority) {
    let mode = if index < EAGER_TILE_COUNT {
        LoadingMode::Eager
    } else {
        LoadingMode::Lazy
    };
    let priority = if index < HIGH_PRIORITY_TILE_COUNT {
        LoadPriority::High
    } else if index < EAGER_TILE_COUNT {
        LoadPriority::Auto
    } else {
        LoadPriority::Low
    };
    (mode, priority)
}

/// Sources worth preloading: the first `count` tiles, placeholders skipped
pub fn preload_sources(tiles: &[Tile], count: usize) -> Vec<&str> {
    tiles
        .iter()
        .take(count)
        .filter(|tile| !tile.is_placeholder())
        .map(|tile| tile.src.as_str())
        .collect()
}

/// Shape a tile takes once its image dimensions are known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileAspect {
    Wide,
    Tall,
    Square,
}

impl TileAspect {
    pub fn classify(natural_width: u32, natural_height: u32) -> Self {
        if natural_width == 0 || natural_height == 0 {
            return Self::Square;
        }
        let ratio = natural_width as f64 / natural_height as f64;
        if ratio > WIDE_IMAGE_RATIO {
            Self::Wide
        } else if ratio < TALL_IMAGE_RATIO {
            Self::Tall
        } else {
            Self::Square
        }
    }

    /// CSS width and height for the tile image box
    pub fn css_size(&self) -> (&'static str, &'static str) {
        match self {
            Self::Wide => ("calc(100% + 15px)", "auto"),
            Self::Tall => ("auto", "calc(100% + 15px)"),
            Self::Square => ("100%", "100%"),
        }
    }
}
