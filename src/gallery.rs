//! The dome gallery component: one instance owns tiles, rotation, gestures
//! and the pending inertia frame.

use instant::Instant;

use crate::{
    animation::scheduler::{FrameId, FrameScheduler, ManualFrameScheduler},
    core::{
        config::GalleryConfig,
        constants::EMPTY_PLACEHOLDER,
        geo::{Point, TileRect},
        rotation::Rotation,
    },
    input::{
        events::{EventHandled, GalleryEvent, InputEvent, TouchPhase, TouchPoint},
        handler::{EventManager, InteractionHandler, InteractionState},
    },
    layout::{
        geometry::{base_rotation, TileAngles},
        tiles::{build_tiles, ImageDescriptor, Tile},
    },
    GalleryError, Result,
};

/// Called with `(src, alt, rect)` when a tile is clicked without dragging
pub type ImageClickCallback = Box<dyn FnMut(&str, &str, TileRect)>;

/// Interactive photo sphere.
///
/// Hosts forward pointer, touch and wheel input, deliver the animation
/// frames the gallery requests from its [`FrameScheduler`], and render
/// [`DomeGallery::tiles`] with [`DomeGallery::sphere_transform`].
///
/// ```
/// use dome_gallery::{DomeGallery, GalleryConfig, ImageDescriptor};
/// use dome_gallery::core::geo::Point;
/// use instant::{Duration, Instant};
///
/// let images = vec![ImageDescriptor::new("a.jpg", "A"), ImageDescriptor::new("b.jpg", "B")];
/// let mut gallery = DomeGallery::new(images, GalleryConfig::default()).unwrap();
///
/// let t0 = Instant::now();
/// gallery.pointer_down(Point::new(0.0, 0.0), t0);
/// gallery.pointer_move(Point::new(100.0, 0.0), t0 + Duration::from_millis(16));
/// gallery.pointer_up();
/// assert!(gallery.rotation().yaw > 0.0);
/// ```
pub struct DomeGallery<S: FrameScheduler = ManualFrameScheduler> {
    config: GalleryConfig,
    images: Vec<ImageDescriptor>,
    tiles: Vec<Tile>,
    handler: InteractionHandler,
    scheduler: S,
    inertia_frame: Option<FrameId>,
    events: EventManager,
    on_image_click: Option<ImageClickCallback>,
    radius: f64,
    container: Point,
}

impl DomeGallery<ManualFrameScheduler> {
    pub fn new(images: Vec<ImageDescriptor>, config: GalleryConfig) -> Result<Self> {
        Self::with_scheduler(images, config, ManualFrameScheduler::new())
    }

    /// Delivers every frame requested so far. Returns how many were delivered.
    pub fn pump_frames(&mut self) -> usize {
        let due = self.scheduler.take_due();
        let count = due.len();
        for id in due {
            self.on_animation_frame(id);
        }
        count
    }
}

impl<S: FrameScheduler> DomeGallery<S> {
    pub fn with_scheduler(
        images: Vec<ImageDescriptor>,
        config: GalleryConfig,
        scheduler: S,
    ) -> Result<Self> {
        config.validate()?;
        let tiles = build_tiles(&images, config.layout.segments, config.layout.column_origin);
        let handler = InteractionHandler::new(&config);
        let radius = config.layout.radius_for(1.0, 1.0);

        Ok(Self {
            config,
            images,
            tiles,
            handler,
            scheduler,
            inertia_frame: None,
            events: EventManager::new(),
            on_image_click: None,
            radius,
            container: Point::new(1.0, 1.0),
        })
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Applies a new configuration, rebuilding tiles when the grid changed
    pub fn set_config(&mut self, config: GalleryConfig) -> Result<()> {
        config.validate()?;
        let relayout = config.layout.segments != self.config.layout.segments
            || config.layout.column_origin != self.config.layout.column_origin;
        self.config = config;
        self.handler.reconfigure(&self.config);
        if relayout {
            self.rebuild_tiles();
        }
        self.radius = self.config.layout.radius_for(self.container.x, self.container.y);
        Ok(())
    }

    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn set_images(&mut self, images: Vec<ImageDescriptor>) {
        self.images = images;
        self.rebuild_tiles();
    }

    fn rebuild_tiles(&mut self) {
        self.tiles = build_tiles(
            &self.images,
            self.config.layout.segments,
            self.config.layout.column_origin,
        );
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Base angles of the tile at `index`
    pub fn tile_angles(&self, index: usize) -> Option<TileAngles> {
        self.tiles
            .get(index)
            .map(|tile| base_rotation(&tile.slot(), self.config.layout.segments))
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() || self.tiles.iter().all(Tile::is_placeholder)
    }

    /// Text to show instead of the sphere, when there is nothing to show
    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_PLACEHOLDER)
    }

    /// Resizes the container and returns the new sphere radius
    pub fn set_container_size(&mut self, width: f64, height: f64) -> f64 {
        self.container = Point::new(width, height);
        self.radius = self.config.layout.radius_for(width, height);
        self.radius
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// CSS custom properties for the container element
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        self.config
            .style
            .css_variables(self.radius, self.config.layout.segments)
    }

    pub fn rotation(&self) -> Rotation {
        self.handler.rotation()
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        let events = self.handler.set_rotation(rotation);
        self.events.emit_all(events);
    }

    pub fn sphere_transform(&self) -> String {
        self.handler.rotation().sphere_transform()
    }

    pub fn state(&self) -> InteractionState {
        self.handler.state()
    }

    pub fn is_hovering(&self) -> bool {
        self.handler.is_hovering()
    }

    pub fn velocity(&self) -> Point {
        self.handler.velocity()
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.handler.enabled = interactive;
        if !interactive {
            let events = self.handler.end_drag();
            self.events.emit_all(events);
            self.cancel_inertia();
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Id of the frame the gallery is waiting for, if coasting
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.inertia_frame
    }

    /// Dispatches a host event to the matching handler
    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> EventHandled {
        match event {
            InputEvent::PointerDown { position } => {
                self.pointer_down(position, now);
                EventHandled::Handled
            }
            InputEvent::PointerMove { position } => self.pointer_move(position, now),
            InputEvent::PointerUp => {
                self.pointer_up();
                EventHandled::Handled
            }
            InputEvent::PointerLeave => {
                self.pointer_leave();
                EventHandled::NotHandled
            }
            InputEvent::HoverEnter => {
                self.hover_enter();
                EventHandled::NotHandled
            }
            InputEvent::Wheel { delta_x, delta_y } => self.wheel(delta_x, delta_y),
            InputEvent::Touch { phase, touches } => self.touch(phase, &touches, now),
        }
    }

    /// Starts a drag. An ignored press (non-finite, or interaction disabled)
    /// leaves any coasting untouched.
    pub fn pointer_down(&mut self, position: Point, now: Instant) {
        let events = self.handler.begin_drag(position, now);
        if self.handler.state() == InteractionState::Dragging {
            // New gesture supersedes any coasting
            self.cancel_frame();
        }
        self.events.emit_all(events);
    }

    pub fn pointer_move(&mut self, position: Point, now: Instant) -> EventHandled {
        if self.handler.state() != InteractionState::Dragging {
            return EventHandled::NotHandled;
        }
        let events = self.handler.drag_to(position, now);
        self.events.emit_all(events);
        EventHandled::Handled
    }

    pub fn pointer_up(&mut self) {
        let events = self.handler.end_drag();
        self.events.emit_all(events);
        if self.handler.is_coasting() && self.inertia_frame.is_none() {
            self.inertia_frame = Some(self.scheduler.request_frame());
        }
    }

    /// Leaving the gallery ends the drag like a release, and the hover
    pub fn pointer_leave(&mut self) {
        self.handler.set_hovering(false);
        self.pointer_up();
    }

    pub fn hover_enter(&mut self) {
        self.handler.set_hovering(true);
    }

    pub fn hover_leave(&mut self) {
        self.handler.set_hovering(false);
    }

    /// Touch input. Only single-finger gestures rotate the sphere.
    pub fn touch(&mut self, phase: TouchPhase, touches: &[TouchPoint], now: Instant) -> EventHandled {
        match phase {
            TouchPhase::Start => {
                if let [touch] = touches {
                    self.pointer_down(touch.position, now);
                }
                EventHandled::NotHandled
            }
            TouchPhase::Move => match touches {
                [touch] if self.handler.state() == InteractionState::Dragging => {
                    self.pointer_move(touch.position, now)
                }
                _ => EventHandled::NotHandled,
            },
            TouchPhase::End | TouchPhase::Cancel => {
                self.pointer_up();
                EventHandled::NotHandled
            }
        }
    }

    /// Wheel input. `Handled` means the host must stop the page from scrolling.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64) -> EventHandled {
        let (handled, events) = self.handler.wheel(delta_x, delta_y);
        self.events.emit_all(events);
        handled
    }

    /// Delivers a frame requested from the scheduler. Returns whether the
    /// gallery asked for another one. Stale ids are ignored.
    pub fn on_animation_frame(&mut self, id: FrameId) -> bool {
        if self.inertia_frame != Some(id) {
            log::debug!("Ignoring stale frame {:?}", id);
            return false;
        }
        self.inertia_frame = None;

        let events = self.handler.step_inertia();
        self.events.emit_all(events);

        if self.handler.is_coasting() {
            self.inertia_frame = Some(self.scheduler.request_frame());
            true
        } else {
            false
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.inertia_frame.take() {
            log::debug!("Cancelling frame {:?}", id);
            self.scheduler.cancel_frame(id);
        }
    }

    /// Stops coasting and drops the pending frame
    pub fn cancel_inertia(&mut self) {
        self.cancel_frame();
        let events = self.handler.stop_inertia();
        self.events.emit_all(events);
    }

    /// Registers the caller's click handler (replaces a previous one)
    pub fn on_image_click<F>(&mut self, callback: F)
    where
        F: FnMut(&str, &str, TileRect) + 'static,
    {
        self.on_image_click = Some(Box::new(callback));
    }

    /// Reports a click on the tile at `index`, shown at `rect` on screen.
    ///
    /// Returns `Ok(false)` when the click ended a drag and was suppressed,
    /// or when the tile has no image.
    pub fn click_tile(&mut self, index: usize, rect: TileRect) -> Result<bool> {
        let tile = self.tiles.get(index).ok_or(GalleryError::TileIndex {
            index,
            len: self.tiles.len(),
        })?;

        if self.handler.last_gesture_moved()
            || self.handler.state() == InteractionState::Dragging
            || tile.is_placeholder()
        {
            return Ok(false);
        }

        let (src, alt) = (tile.src.clone(), tile.alt.clone());
        if let Some(callback) = self.on_image_click.as_mut() {
            callback(&src, &alt, rect);
        }
        self.events.emit(GalleryEvent::ImageClick {
            index,
            src,
            alt,
            rect,
        });
        Ok(true)
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&GalleryEvent) + 'static,
    {
        self.events.on(event_type, callback);
    }

    /// Dispatches queued events to listeners and returns them
    pub fn process_events(&mut self) -> Vec<GalleryEvent> {
        self.events.process_events()
    }

    /// Ends every gesture and cancels the pending frame, for host unmount
    pub fn teardown(&mut self) {
        self.handler.set_hovering(false);
        self.handler.end_drag();
        self.cancel_inertia();
        self.events.clear_events();
    }
}

impl<S: FrameScheduler> Drop for DomeGallery<S> {
    fn drop(&mut self) {
        self.cancel_frame();
    }
}
