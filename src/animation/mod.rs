pub mod inertia;
pub mod scheduler;

pub use inertia::Inertia;
pub use scheduler::{FrameId, FrameScheduler, ManualFrameScheduler};
