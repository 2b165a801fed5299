//! Pure gesture classification.
//!
//! Turns the terminal sample of a drag into a discrete directional decision.
//! The thresholds are product constants, not configuration: horizontal is the
//! primary gesture (accept/reject) and requires a deliberate 30%-of-width
//! motion; vertical is secondary (profile/share) and commits at 20% of
//! height. Horizontal always wins when both axes would commit.

use super::types::{Bounds, Direction, GestureSample, SwipeDecision};

/// Fraction of the viewport width a horizontal translation must exceed.
pub const HORIZONTAL_COMMIT_RATIO: f64 = 0.30;

/// Fraction of the viewport height a vertical translation must exceed.
pub const VERTICAL_COMMIT_RATIO: f64 = 0.20;

/// Velocity (px/s) past which either axis commits regardless of translation.
pub const VELOCITY_COMMIT: f64 = 500.0;

/// Classify the terminal sample of a drag gesture.
///
/// Total and deterministic: every input maps to exactly one decision and the
/// function never panics. Comparisons are strict, so a translation landing
/// exactly on a threshold does not commit.
pub fn classify(sample: &GestureSample, bounds: Bounds) -> SwipeDecision {
    let abs_x = sample.translation_x.abs();
    let abs_y = sample.translation_y.abs();
    let abs_vel_x = sample.velocity_x.abs();
    let abs_vel_y = sample.velocity_y.abs();

    if abs_x > HORIZONTAL_COMMIT_RATIO * bounds.width || abs_vel_x > VELOCITY_COMMIT {
        let direction = if sample.translation_x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        };
        return SwipeDecision::committed(direction, abs_x);
    }

    if abs_y > VERTICAL_COMMIT_RATIO * bounds.height || abs_vel_y > VELOCITY_COMMIT {
        let direction = if sample.translation_y > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        };
        return SwipeDecision::committed(direction, abs_y);
    }

    SwipeDecision::rest(abs_x.max(abs_y))
}
