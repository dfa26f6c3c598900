pub mod events;
pub mod gestures;
pub mod handler;

// Re-export the essential types
pub use events::{EventHandled, GalleryEvent, InputEvent, TouchPhase, TouchPoint};
pub use gestures::{DragAxis, DragSession, VelocityTracker};
pub use handler::{EventManager, InteractionHandler, InteractionState};
