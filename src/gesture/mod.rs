pub mod classifier;
pub mod tracker;
pub mod types;

pub use classifier::{HORIZONTAL_COMMIT_RATIO, VELOCITY_COMMIT, VERTICAL_COMMIT_RATIO, classify};
pub use tracker::DragTracker;
pub use types::{Bounds, Direction, GesturePhase, GestureSample, SwipeDecision};
