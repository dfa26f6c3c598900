use dome_gallery::{
    core::geo::{Point, TileRect},
    input::events::{TouchPhase, TouchPoint},
    DomeGallery, DomeGalleryBuilder, EventHandled, GalleryConfig, GalleryEvent, ImageDescriptor,
    InputEvent, InteractionProfile, InteractionState,
};
use instant::{Duration, Instant};
use std::cell::RefCell;
use std::rc::Rc;

/// End-to-end interaction scenarios driven through the public gallery API
#[cfg(test)]
mod gallery_interaction_tests {
    use super::*;

    fn images(n: usize) -> Vec<ImageDescriptor> {
        (0..n)
            .map(|i| ImageDescriptor::new(format!("img-{}.webp", i), format!("Image {}", i)))
            .collect()
    }

    fn gallery() -> DomeGallery {
        DomeGallery::new(images(12), GalleryConfig::default()).unwrap()
    }

    /// Small deterministic generator for gesture fuzzing
    struct Lcg(u64);

    impl Lcg {
        fn next_f64(&mut self) -> f64 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (self.0 >> 11) as f64 / (1u64 << 53) as f64
        }

        fn range(&mut self, lo: f64, hi: f64) -> f64 {
            lo + (hi - lo) * self.next_f64()
        }
    }

    /// Drags in `steps` equal moves of `(dx, dy)` pixels, `dt_ms` apart
    fn drag(gallery: &mut DomeGallery, start: Instant, dx: f64, dy: f64, steps: u64, dt_ms: u64) {
        gallery.pointer_down(Point::new(500.0, 400.0), start);
        for i in 1..=steps {
            gallery.pointer_move(
                Point::new(500.0 + dx * i as f64, 400.0 + dy * i as f64),
                start + Duration::from_millis(i * dt_ms),
            );
        }
        gallery.pointer_up();
    }

    fn run_to_rest(gallery: &mut DomeGallery) -> usize {
        let mut frames = 0;
        while gallery.pump_frames() > 0 {
            frames += 1;
            assert!(frames < 10_000, "coasting never settled");
        }
        frames
    }

    #[test]
    fn test_pitch_stays_in_bounds_under_random_gestures() {
        let mut gallery = gallery();
        let limits = gallery.config().pitch;
        let mut rng = Lcg(7);
        let mut now = Instant::now();

        for _ in 0..200 {
            let dx = rng.range(-60.0, 60.0);
            let dy = rng.range(-60.0, 60.0);
            let steps = 1 + (rng.next_f64() * 10.0) as u64;
            drag(&mut gallery, now, dx, dy, steps, 8);
            now += Duration::from_millis(steps * 8 + 1);

            // Interleave partial coasting with new drags
            for _ in 0..(rng.next_f64() * 20.0) as usize {
                gallery.pump_frames();
                assert!(limits.contains(gallery.rotation().pitch));
            }
            assert!(limits.contains(gallery.rotation().pitch));
        }

        run_to_rest(&mut gallery);
        assert!(limits.contains(gallery.rotation().pitch));
    }

    #[test]
    fn test_yaw_always_in_half_open_range() {
        let mut gallery = gallery();
        gallery.hover_enter();
        let now = Instant::now();

        // Many full turns in both directions
        for round in 0..40 {
            let dx = if round % 3 == 0 { -90.0 } else { 120.0 };
            drag(&mut gallery, now, dx, 0.0, 20, 16);
            let yaw = gallery.rotation().yaw;
            assert!(yaw > -180.0 && yaw <= 180.0, "yaw {} out of range", yaw);

            gallery.wheel(400.0, 0.0);
            let yaw = gallery.rotation().yaw;
            assert!(yaw > -180.0 && yaw <= 180.0, "yaw {} out of range", yaw);
        }
    }

    #[test]
    fn test_vertical_wheel_is_left_to_the_page() {
        let mut gallery = gallery();
        gallery.hover_enter();
        let before = gallery.rotation();

        for (dx, dy) in [(0.0, 120.0), (0.0, -40.0), (10.0, 30.0), (4.0, 0.0), (-3.0, 1.0)] {
            assert_eq!(gallery.wheel(dx, dy), EventHandled::NotHandled);
            assert_eq!(gallery.rotation(), before);
        }

        assert_eq!(gallery.wheel(60.0, 5.0), EventHandled::Handled);
        assert!((gallery.rotation().yaw - 1.2).abs() < 1e-9);
        assert_eq!(gallery.rotation().pitch, before.pitch);
    }

    #[test]
    fn test_wheel_needs_hover() {
        let mut gallery = gallery();
        assert_eq!(gallery.wheel(100.0, 0.0), EventHandled::NotHandled);

        gallery.hover_enter();
        assert_eq!(gallery.wheel(100.0, 0.0), EventHandled::Handled);

        gallery.pointer_leave();
        assert_eq!(gallery.wheel(100.0, 0.0), EventHandled::NotHandled);
    }

    #[test]
    fn test_slow_release_stops_immediately() {
        let mut gallery = gallery();
        // 1 px per 500 ms is far below the coasting threshold
        drag(&mut gallery, Instant::now(), 1.0, 0.0, 10, 500);

        assert_eq!(gallery.state(), InteractionState::Idle);
        assert!(gallery.pending_frame().is_none());
        let rotation = gallery.rotation();
        assert_eq!(gallery.pump_frames(), 0);
        assert_eq!(gallery.rotation(), rotation);
    }

    #[test]
    fn test_new_drag_halts_coasting() {
        let mut gallery = gallery();
        let now = Instant::now();
        drag(&mut gallery, now, 30.0, 0.0, 10, 16);
        assert_eq!(gallery.state(), InteractionState::Coasting);
        gallery.pump_frames();
        gallery.pump_frames();

        let held = gallery.rotation();
        gallery.pointer_down(Point::new(10.0, 10.0), now + Duration::from_secs(1));
        assert_eq!(gallery.state(), InteractionState::Dragging);
        assert!(gallery.scheduler().is_idle());

        // Nothing left to deliver, and the rotation only follows the pointer
        for _ in 0..10 {
            assert_eq!(gallery.pump_frames(), 0);
        }
        assert_eq!(gallery.rotation(), held);

        gallery.pointer_move(
            Point::new(60.0, 10.0),
            now + Duration::from_millis(1016),
        );
        assert!((gallery.rotation().yaw - (held.yaw + 1.0)).abs() < 1e-9);
    }

    #[test]
    fn test_axis_lock_holds_for_whole_gesture() {
        let mut gallery = gallery();
        let now = Instant::now();
        gallery.pointer_down(Point::new(0.0, 0.0), now);
        gallery.pointer_move(Point::new(20.0, 2.0), now + Duration::from_millis(16));
        gallery.pointer_move(Point::new(25.0, 200.0), now + Duration::from_millis(32));

        assert_eq!(gallery.rotation().pitch, 0.0);
        assert!((gallery.rotation().yaw - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_event_stream_for_fling() {
        let mut gallery = gallery();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for kind in ["dragstart", "axislock", "dragend", "inertiastart", "inertiaend"] {
            let sink = seen.clone();
            gallery.on(kind, move |event: &GalleryEvent| {
                sink.borrow_mut().push(event.event_type())
            });
        }

        drag(&mut gallery, Instant::now(), 30.0, 0.0, 10, 16);
        run_to_rest(&mut gallery);
        gallery.process_events();

        assert_eq!(
            *seen.borrow(),
            vec!["dragstart", "axislock", "dragend", "inertiastart", "inertiaend"]
        );
    }

    #[test]
    fn test_single_finger_touch_rotates() {
        let mut gallery = gallery();
        let now = Instant::now();
        let one = |x: f64| vec![TouchPoint::new(1, x, 100.0)];

        gallery.touch(TouchPhase::Start, &one(0.0), now);
        assert_eq!(
            gallery.touch(TouchPhase::Move, &one(50.0), now + Duration::from_millis(16)),
            EventHandled::Handled
        );
        gallery.touch(TouchPhase::End, &[], now + Duration::from_millis(32));
        assert!((gallery.rotation().yaw - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_multi_touch_is_ignored() {
        let mut gallery = gallery();
        let now = Instant::now();
        let two = vec![
            TouchPoint::new(1, 0.0, 0.0),
            TouchPoint::new(2, 100.0, 0.0),
        ];

        gallery.touch(TouchPhase::Start, &two, now);
        assert_eq!(gallery.state(), InteractionState::Idle);
        assert_eq!(
            gallery.touch(TouchPhase::Move, &two, now + Duration::from_millis(16)),
            EventHandled::NotHandled
        );
        assert_eq!(gallery.rotation().yaw, 0.0);
    }

    #[test]
    fn test_handle_input_dispatch() {
        let mut gallery = gallery();
        let now = Instant::now();

        gallery.handle_input(InputEvent::HoverEnter, now);
        assert!(gallery.is_hovering());
        gallery.handle_input(
            InputEvent::PointerDown {
                position: Point::new(0.0, 0.0),
            },
            now,
        );
        let moved = gallery.handle_input(
            InputEvent::PointerMove {
                position: Point::new(100.0, 0.0),
            },
            now + Duration::from_millis(500),
        );
        assert!(moved.is_handled());
        gallery.handle_input(InputEvent::PointerUp, now + Duration::from_millis(500));
        assert!((gallery.rotation().yaw - 2.0).abs() < 1e-9);

        let wheel = gallery.handle_input(
            InputEvent::Wheel {
                delta_x: 50.0,
                delta_y: 0.0,
            },
            now,
        );
        assert!(wheel.is_handled());
        assert!((gallery.rotation().yaw - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_click_contract() {
        let mut gallery = gallery();
        let clicked = Rc::new(RefCell::new(None));
        let sink = clicked.clone();
        gallery.on_image_click(move |src, alt, rect| {
            *sink.borrow_mut() = Some((src.to_string(), alt.to_string(), rect))
        });

        let rect = TileRect::from_bounds(10.0, 20.0, 100.0, 80.0);
        assert!(gallery.click_tile(3, rect).unwrap());

        let (src, alt, got) = clicked.borrow().clone().unwrap();
        assert_eq!(src, gallery.tiles()[3].src);
        assert_eq!(alt, gallery.tiles()[3].alt);
        assert_eq!(got.center(), Point::new(60.0, 60.0));
    }

    #[test]
    fn test_teardown_and_drop_cancel_frames() {
        let mut gallery = gallery();
        drag(&mut gallery, Instant::now(), 30.0, 0.0, 10, 16);
        let pending = gallery.pending_frame().unwrap();

        gallery.teardown();
        assert!(gallery.scheduler().is_idle());
        assert!(!gallery.on_animation_frame(pending));
        assert_eq!(gallery.state(), InteractionState::Idle);
    }

    #[test]
    fn test_reduced_motion_never_coasts() {
        let mut gallery = DomeGalleryBuilder::new()
            .with_images(images(5))
            .with_profile(InteractionProfile::ReducedMotion)
            .build()
            .unwrap();
        gallery.hover_enter();

        drag(&mut gallery, Instant::now(), 80.0, 0.0, 10, 8);
        assert_eq!(gallery.state(), InteractionState::Idle);
        assert!(gallery.scheduler().is_idle());
        assert_eq!(gallery.wheel(100.0, 0.0), EventHandled::NotHandled);
    }
}
