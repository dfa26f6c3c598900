use crate::{
    animation::inertia::Inertia,
    core::{
        config::{GalleryConfig, GestureConfig, InertiaConfig, WheelConfig},
        geo::Point,
        rotation::{PitchLimits, Rotation},
    },
    input::{
        events::{EventHandled, GalleryEvent},
        gestures::{DragAxis, DragSession, VelocityTracker},
    },
};
use fxhash::FxHashMap as HashMap;
use instant::Instant;
use std::collections::VecDeque;

/// What the sphere is doing right now. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Dragging,
    Coasting,
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&GalleryEvent)>;

/// Event management system for the gallery
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type
    listeners: HashMap<String, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<GalleryEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&GalleryEvent) + 'static,
    {
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: GalleryEvent) {
        self.event_queue.push_back(event);
    }

    pub fn emit_all(&mut self, events: impl IntoIterator<Item = GalleryEvent>) {
        self.event_queue.extend(events);
    }

    /// Process all queued events
    pub fn process_events(&mut self) -> Vec<GalleryEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.event_type()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Clear all events from the queue
    pub fn clear_events(&mut self) {
        self.event_queue.clear();
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}

/// Rotation state machine: `Idle → Dragging → (Idle | Coasting) → Idle`.
///
/// The handler owns rotation, drag session, velocity and inertia. It does
/// not schedule frames; the owner asks for one whenever the state becomes
/// [`InteractionState::Coasting`] and calls [`InteractionHandler::step_inertia`]
/// on each delivered frame.
pub struct InteractionHandler {
    pub enabled: bool,
    gesture: GestureConfig,
    inertia_config: InertiaConfig,
    wheel: WheelConfig,
    limits: PitchLimits,
    rotation: Rotation,
    state: InteractionState,
    session: Option<DragSession>,
    velocity: VelocityTracker,
    inertia: Option<Inertia>,
    hovering: bool,
    last_gesture_moved: bool,
}

impl InteractionHandler {
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            enabled: true,
            gesture: config.gesture.clone(),
            inertia_config: config.inertia.clone(),
            wheel: config.wheel.clone(),
            limits: config.pitch,
            rotation: Rotation::default(),
            state: InteractionState::Idle,
            session: None,
            velocity: VelocityTracker::new(&config.gesture),
            inertia: None,
            hovering: false,
            last_gesture_moved: false,
        }
    }

    /// Applies new tuning. The current rotation is kept, brought into the new limits.
    pub fn reconfigure(&mut self, config: &GalleryConfig) {
        self.gesture = config.gesture.clone();
        self.inertia_config = config.inertia.clone();
        self.wheel = config.wheel.clone();
        self.limits = config.pitch;
        self.velocity = VelocityTracker::new(&config.gesture);
        self.rotation = self.rotation.normalized(&self.limits);
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Jumps to `rotation`, clamped and wrapped
    pub fn set_rotation(&mut self, rotation: Rotation) -> Vec<GalleryEvent> {
        self.rotation = rotation.normalized(&self.limits);
        vec![GalleryEvent::RotationChanged {
            rotation: self.rotation,
        }]
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    /// Axis locked by the current drag, if any
    pub fn drag_axis(&self) -> Option<DragAxis> {
        self.session.as_ref().and_then(|session| session.axis)
    }

    /// Whether the latest gesture travelled past the drag threshold.
    /// Tile clicks are suppressed while this holds.
    pub fn last_gesture_moved(&self) -> bool {
        self.last_gesture_moved
    }

    /// Current velocity estimate (px/s), or the coasting velocity
    pub fn velocity(&self) -> Point {
        match &self.inertia {
            Some(inertia) => inertia.velocity(),
            None => self.velocity.velocity(),
        }
    }

    /// Pointer/touch down. Cancels any coasting.
    pub fn begin_drag(&mut self, position: Point, now: Instant) -> Vec<GalleryEvent> {
        if !self.enabled || !position.is_finite() {
            return vec![];
        }

        let mut events = self.stop_inertia();
        self.session = Some(DragSession::new(position, self.rotation));
        self.velocity.reset(position, now);
        self.last_gesture_moved = false;
        self.state = InteractionState::Dragging;
        log::debug!("Drag started at ({:.1}, {:.1})", position.x, position.y);

        events.push(GalleryEvent::DragStart { position });
        events
    }

    /// Pointer/touch move during a drag
    pub fn drag_to(&mut self, position: Point, now: Instant) -> Vec<GalleryEvent> {
        if !self.enabled || !position.is_finite() {
            return vec![];
        }
        let Some(session) = self.session.as_mut() else {
            return vec![];
        };

        self.velocity.sample(position, now);
        let update = session.update(position, &self.gesture, &self.limits);

        let mut events = Vec::new();
        if let Some(axis) = update.locked {
            log::debug!("Drag locked to {:?} axis", axis);
            events.push(GalleryEvent::AxisLocked { axis });
        }
        if update.rotation != self.rotation {
            self.rotation = update.rotation;
            events.push(GalleryEvent::RotationChanged {
                rotation: self.rotation,
            });
        }
        events
    }

    /// Pointer/touch release. Moves to `Coasting` when the gesture was a real
    /// drag released fast enough along its axis, to `Idle` otherwise.
    pub fn end_drag(&mut self) -> Vec<GalleryEvent> {
        let Some(session) = self.session.take() else {
            return vec![];
        };

        self.last_gesture_moved = session.moved;
        let velocity = self.velocity.velocity();
        self.velocity.clear();

        let mut events = vec![GalleryEvent::DragEnd {
            moved: session.moved,
        }];

        let axis = session
            .axis
            .unwrap_or_else(|| DragAxis::dominant(velocity.x, velocity.y));
        let inertia = Inertia::new(velocity, axis, &self.inertia_config);

        if self.enabled
            && self.inertia_config.enabled
            && session.moved
            && inertia.should_start()
        {
            log::debug!(
                "Coasting with velocity ({:.1}, {:.1}) px/s",
                inertia.velocity().x,
                inertia.velocity().y
            );
            events.push(GalleryEvent::InertiaStart {
                velocity: inertia.velocity(),
            });
            self.inertia = Some(inertia);
            self.state = InteractionState::Coasting;
        } else {
            self.state = InteractionState::Idle;
        }

        events
    }

    /// Advances coasting by one frame. Returns to `Idle` once the velocity settles.
    pub fn step_inertia(&mut self) -> Vec<GalleryEvent> {
        let Some(inertia) = self.inertia.as_mut() else {
            return vec![];
        };

        match inertia.step(self.rotation, &self.limits) {
            Some(rotation) => {
                if rotation == self.rotation {
                    return vec![];
                }
                self.rotation = rotation;
                vec![GalleryEvent::RotationChanged { rotation }]
            }
            None => {
                self.inertia = None;
                self.state = InteractionState::Idle;
                log::debug!("Coasting finished");
                vec![GalleryEvent::InertiaEnd]
            }
        }
    }

    /// Stops coasting immediately
    pub fn stop_inertia(&mut self) -> Vec<GalleryEvent> {
        if self.inertia.take().is_none() {
            return vec![];
        }
        if self.state == InteractionState::Coasting {
            self.state = InteractionState::Idle;
        }
        vec![GalleryEvent::InertiaEnd]
    }

    pub fn is_coasting(&self) -> bool {
        self.state == InteractionState::Coasting
    }

    /// Wheel/touchpad scroll. Only a clearly horizontal gesture over a gallery
    /// that is not being dragged rotates the sphere; everything else is left
    /// to the page.
    pub fn wheel(&mut self, delta_x: f64, delta_y: f64) -> (EventHandled, Vec<GalleryEvent>) {
        if !self.enabled
            || !self.wheel.enabled
            || !self.hovering
            || self.state == InteractionState::Dragging
            || !delta_x.is_finite()
            || !delta_y.is_finite()
        {
            return (EventHandled::NotHandled, vec![]);
        }
        if !self.wheel.is_horizontal(delta_x, delta_y) {
            return (EventHandled::NotHandled, vec![]);
        }

        self.rotation = self.rotation.with_yaw_delta(delta_x / self.wheel.divisor);
        (
            EventHandled::Handled,
            vec![GalleryEvent::RotationChanged {
                rotation: self.rotation,
            }],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use instant::Duration;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn handler() -> InteractionHandler {
        InteractionHandler::new(&GalleryConfig::default())
    }

    #[test]
    fn test_event_manager_dispatch() {
        let mut manager = EventManager::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        manager.on("inertiaend", move |event| sink.borrow_mut().push(event.clone()));

        manager.emit(GalleryEvent::InertiaEnd);
        manager.emit(GalleryEvent::DragEnd { moved: false });
        assert_eq!(manager.pending_events(), 2);

        let events = manager.process_events();
        assert_eq!(events.len(), 2);
        assert_eq!(*seen.borrow(), vec![GalleryEvent::InertiaEnd]);
        assert_eq!(manager.pending_events(), 0);
    }

    #[test]
    fn test_fast_horizontal_release_coasts() {
        let mut handler = handler();
        let t0 = Instant::now();
        handler.begin_drag(Point::new(0.0, 0.0), t0);
        for i in 1..=10 {
            handler.drag_to(
                Point::new(i as f64 * 20.0, 0.0),
                t0 + Duration::from_millis(i * 16),
            );
        }
        assert_eq!(handler.drag_axis(), Some(DragAxis::Horizontal));

        let events = handler.end_drag();
        assert!(matches!(events[0], GalleryEvent::DragEnd { moved: true }));
        assert!(matches!(events[1], GalleryEvent::InertiaStart { .. }));
        assert_eq!(handler.state(), InteractionState::Coasting);
        assert_eq!(handler.velocity().y, 0.0);
    }

    #[test]
    fn test_slow_release_stops_immediately() {
        let mut handler = handler();
        let t0 = Instant::now();
        handler.begin_drag(Point::new(0.0, 0.0), t0);
        handler.drag_to(Point::new(10.0, 0.0), t0 + Duration::from_secs(5));
        handler.drag_to(Point::new(10.0, 0.0), t0 + Duration::from_secs(10));

        let events = handler.end_drag();
        assert_eq!(events, vec![GalleryEvent::DragEnd { moved: true }]);
        assert_eq!(handler.state(), InteractionState::Idle);
        assert!(handler.step_inertia().is_empty());
    }

    #[test]
    fn test_wheel_requires_hover_and_horizontal_dominance() {
        let mut handler = handler();
        let (handled, _) = handler.wheel(40.0, 0.0);
        assert_eq!(handled, EventHandled::NotHandled);

        handler.set_hovering(true);
        let (handled, events) = handler.wheel(0.0, 120.0);
        assert_eq!(handled, EventHandled::NotHandled);
        assert!(events.is_empty());
        assert_eq!(handler.rotation(), Rotation::default());

        let (handled, _) = handler.wheel(100.0, 10.0);
        assert!(handled.is_handled());
        assert_eq!(handler.rotation().yaw, 2.0);
        assert_eq!(handler.rotation().pitch, 0.0);
    }

    #[test]
    fn test_wheel_ignored_while_dragging() {
        let mut handler = handler();
        handler.set_hovering(true);
        handler.begin_drag(Point::new(0.0, 0.0), Instant::now());
        let (handled, _) = handler.wheel(100.0, 0.0);
        assert_eq!(handled, EventHandled::NotHandled);
    }

    #[test]
    fn test_disabled_handler_ignores_input() {
        let mut handler = handler();
        handler.enabled = false;
        assert!(handler.begin_drag(Point::new(0.0, 0.0), Instant::now()).is_empty());
        assert_eq!(handler.state(), InteractionState::Idle);
    }

    #[test]
    fn test_reduced_motion_never_coasts() {
        let config = crate::core::config::InteractionProfile::ReducedMotion.resolve();
        let mut handler = InteractionHandler::new(&config);
        let t0 = Instant::now();
        handler.begin_drag(Point::new(0.0, 0.0), t0);
        for i in 1..=10 {
            handler.drag_to(
                Point::new(i as f64 * 30.0, 0.0),
                t0 + Duration::from_millis(i * 10),
            );
        }
        handler.end_drag();
        assert_eq!(handler.state(), InteractionState::Idle);
    }
}
