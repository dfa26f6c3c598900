use dome_gallery::{
    core::constants::{DEFAULT_COLUMN_ORIGIN, DEFAULT_SEGMENTS, EMPTY_PLACEHOLDER},
    layout::{base_rotation, build_slots, build_tiles, fit_radius, preload_sources},
    DomeGallery, GalleryConfig, ImageDescriptor,
};

/// Tile generation properties over a range of pool sizes
#[cfg(test)]
mod layout_tests {
    use super::*;

    fn pool(n: usize) -> Vec<ImageDescriptor> {
        (0..n)
            .map(|i| ImageDescriptor::new(format!("photos/{:03}.jpg", i), format!("Photo {}", i)))
            .collect()
    }

    fn slot_count() -> usize {
        build_slots(DEFAULT_SEGMENTS, DEFAULT_COLUMN_ORIGIN).len()
    }

    #[test]
    fn test_every_tile_has_a_source() {
        let slots = slot_count();
        for n in [1, 2, 3, 7, 34, 35, 100, slots - 1, slots] {
            let tiles = build_tiles(&pool(n), DEFAULT_SEGMENTS, DEFAULT_COLUMN_ORIGIN);
            assert_eq!(tiles.len(), slots);
            assert!(
                tiles.iter().all(|tile| !tile.src.is_empty()),
                "pool of {} left a tile empty",
                n
            );
        }
    }

    #[test]
    fn test_oversubscribed_pool_still_fills_grid() {
        let slots = slot_count();
        let tiles = build_tiles(&pool(slots + 40), DEFAULT_SEGMENTS, DEFAULT_COLUMN_ORIGIN);
        assert_eq!(tiles.len(), slots);
        assert!(tiles.iter().all(|tile| !tile.is_placeholder()));
    }

    #[test]
    fn test_no_adjacent_duplicates() {
        for n in [2, 3, 4, 5, 6, 11, 36, 70] {
            let tiles = build_tiles(&pool(n), DEFAULT_SEGMENTS, DEFAULT_COLUMN_ORIGIN);
            for pair in tiles.windows(2) {
                assert_ne!(pair[0].src, pair[1].src, "pool of {} repeats a neighbour", n);
            }
        }
    }

    #[test]
    fn test_repeated_sources_still_separate() {
        // Two distinct images, heavily repeated in the input
        let mut images = Vec::new();
        for _ in 0..10 {
            images.push(ImageDescriptor::new("a.jpg", "A"));
        }
        images.push(ImageDescriptor::new("b.jpg", "B"));
        images.push(ImageDescriptor::new("", "missing"));

        let tiles = build_tiles(&images, 10, DEFAULT_COLUMN_ORIGIN);
        assert_eq!(tiles.len(), 50);
        for pair in tiles.windows(2) {
            assert_ne!(pair[0].src, pair[1].src);
        }
    }

    #[test]
    fn test_empty_pool_shows_placeholder() {
        let gallery = DomeGallery::new(Vec::new(), GalleryConfig::default()).unwrap();
        assert_eq!(gallery.placeholder(), Some(EMPTY_PLACEHOLDER));
        assert!(gallery.tiles().iter().all(|tile| tile.is_placeholder()));
    }

    #[test]
    fn test_base_rotation_of_origin_slot() {
        let unit = 360.0 / DEFAULT_SEGMENTS as f64 / 2.0;
        let slot = build_slots(DEFAULT_SEGMENTS, 0)[0];
        assert_eq!((slot.x, slot.y), (0, -4));

        let origin = dome_gallery::layout::Slot { y: 0, ..slot };
        let angles = base_rotation(&origin, DEFAULT_SEGMENTS);
        assert!((angles.rotate_x + unit / 2.0).abs() < 1e-9);
        assert!((angles.rotate_y - unit / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_radius_follows_container_shape() {
        // Wide: width based
        assert_eq!(fit_radius(1600.0, 900.0, 0.5, None, 1.3), 800.0);
        // Portrait: shorter side
        assert_eq!(fit_radius(600.0, 1000.0, 0.5, None, 1.3), 300.0);
        // Lower bound only enlarges
        assert_eq!(fit_radius(200.0, 200.0, 0.5, Some(250.0), 1.3), 250.0);
        assert_eq!(fit_radius(1000.0, 1000.0, 0.5, Some(250.0), 1.3), 500.0);
    }

    #[test]
    fn test_preload_covers_front_tiles() {
        let tiles = build_tiles(&pool(3), DEFAULT_SEGMENTS, DEFAULT_COLUMN_ORIGIN);
        let sources = preload_sources(&tiles, 20);
        assert_eq!(sources.len(), 20);
        assert_ne!(sources[0], sources[1]);
        assert_ne!(sources[1], sources[2]);
    }
}
