use serde::{Deserialize, Serialize};
use strum::Display;

/// Committed swipe direction. A gesture that commits to no direction is
/// represented as `None` at the [`SwipeDecision`] level, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Lifecycle of a drag gesture. Only the sample at `Ended` is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Active,
    Ended,
}

/// Viewport the gesture happened in, in device-independent pixels.
///
/// Passed explicitly so the classifier stays a pure function; never read
/// from ambient screen-dimension globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// One observation of a drag: cumulative translation from gesture start and
/// instantaneous velocity, both axes, in device-independent pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub translation_x: f64,
    pub translation_y: f64,
    /// Pixels per second, signed.
    pub velocity_x: f64,
    pub velocity_y: f64,
    pub phase: GesturePhase,
}

impl GestureSample {
    /// A terminal sample with the given translation and velocity.
    pub fn ended(translation: (f64, f64), velocity: (f64, f64)) -> Self {
        Self {
            translation_x: translation.0,
            translation_y: translation.1,
            velocity_x: velocity.0,
            velocity_y: velocity.1,
            phase: GesturePhase::Ended,
        }
    }
}

/// Outcome of classifying a terminal gesture sample.
///
/// `direction: None` means the gesture did not commit and the card must be
/// animated back to rest (spring-style, not to an edge). `magnitude` is the
/// absolute translation along the committed axis; for a rest decision it is
/// the larger of the two absolute translations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeDecision {
    pub direction: Option<Direction>,
    pub magnitude: f64,
}

impl SwipeDecision {
    pub fn rest(magnitude: f64) -> Self {
        Self {
            direction: None,
            magnitude,
        }
    }

    pub fn committed(direction: Direction, magnitude: f64) -> Self {
        Self {
            direction: Some(direction),
            magnitude,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.direction.is_none()
    }
}
