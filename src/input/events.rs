use crate::core::{
    geo::{Point, TileRect},
    rotation::Rotation,
};
use crate::input::gestures::DragAxis;
use serde::{Deserialize, Serialize};

/// Input events a host forwards to the gallery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Mouse button pressed over the gallery
    PointerDown { position: Point },
    /// Mouse moved over the gallery
    PointerMove { position: Point },
    /// Mouse button released
    PointerUp,
    /// Pointer left the gallery; ends any drag and the hover
    PointerLeave,
    /// Pointer entered the gallery
    HoverEnter,
    /// Wheel or touchpad scroll
    Wheel { delta_x: f64, delta_y: f64 },
    /// Touch events, with every point currently on the surface
    Touch {
        phase: TouchPhase,
        touches: Vec<TouchPoint>,
    },
}

/// Types of touch events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// Individual touch point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id,
            position: Point::new(x, y),
        }
    }
}

/// Whether an event was handled.
///
/// `Handled` tells the host to stop the event's default action (page scroll
/// for wheel and touch-move events). `NotHandled` events must pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl EventHandled {
    pub fn is_handled(self) -> bool {
        self == Self::Handled
    }
}

/// Events emitted by the gallery
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryEvent {
    /// A drag session started
    DragStart { position: Point },
    /// The drag picked the axis it rotates for the rest of the gesture
    AxisLocked { axis: DragAxis },
    /// Sphere orientation changed (drag, wheel or inertia)
    RotationChanged { rotation: Rotation },
    /// A drag session ended
    DragEnd { moved: bool },
    /// Coasting started with this velocity (px/s)
    InertiaStart { velocity: Point },
    /// Coasting finished or was cancelled
    InertiaEnd,
    /// A tile was clicked without dragging
    ImageClick {
        index: usize,
        src: String,
        alt: String,
        rect: TileRect,
    },
}

impl GalleryEvent {
    /// Name listeners register under
    pub fn event_type(&self) -> &'static str {
        match self {
            GalleryEvent::DragStart { .. } => "dragstart",
            GalleryEvent::AxisLocked { .. } => "axislock",
            GalleryEvent::RotationChanged { .. } => "rotate",
            GalleryEvent::DragEnd { .. } => "dragend",
            GalleryEvent::InertiaStart { .. } => "inertiastart",
            GalleryEvent::InertiaEnd => "inertiaend",
            GalleryEvent::ImageClick { .. } => "imageclick",
        }
    }
}

impl InputEvent {
    /// Gets the primary position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::PointerDown { position } => Some(*position),
            InputEvent::PointerMove { position } => Some(*position),
            InputEvent::Touch { touches, .. } => touches.first().map(|t| t.position),
            _ => None,
        }
    }

    /// Checks if this is a mouse/pointer event
    pub fn is_pointer_event(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerDown { .. }
                | InputEvent::PointerMove { .. }
                | InputEvent::PointerUp
                | InputEvent::PointerLeave
                | InputEvent::HoverEnter
        )
    }

    /// Checks if this is a touch event
    pub fn is_touch_event(&self) -> bool {
        matches!(self, InputEvent::Touch { .. })
    }
}
