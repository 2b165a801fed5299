//! Per-variant action routing.
//!
//! A pure lookup from `(variant, direction)` to a semantic outcome. The
//! table is transcribed per variant and the divergences between structurally
//! similar variants are intentional product semantics, not inconsistencies:
//! a friend card's down-swipe shares, a friend-request card's down-swipe
//! does nothing. Unmapped directions still consume the gesture (the host
//! animates off-screen or back to rest) with no side effects.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::card::CardVariant;
use crate::gesture::Direction;

/// Semantic actions forwarded to the host as opaque callbacks. The string
/// form is the `action_name` handed to the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Action {
    Skip,
    MessageIntent,
    ViewProfile,
    Share,
    Decline,
    Accept,
    Connect,
}

/// What a classified direction means for a given card variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Routed {
    /// Invoke a host callback. `dismiss` marks actions where the swipe is
    /// the card's primary mechanism of dismissal, so the deck also advances.
    Invoke { action: Action, dismiss: bool },
    /// Navigate to the next card.
    Forward,
    /// Navigate to the previous card.
    Back,
    /// Consumed with no effect.
    NoOp,
}

impl Routed {
    fn invoke(action: Action) -> Self {
        Self::Invoke {
            action,
            dismiss: false,
        }
    }

    fn dismiss(action: Action) -> Self {
        Self::Invoke {
            action,
            dismiss: true,
        }
    }
}

/// Route a committed swipe direction to its meaning for `variant`.
pub fn route(variant: CardVariant, direction: Direction) -> Routed {
    use CardVariant as V;
    use Direction as D;

    match (variant, direction) {
        // Friend cards act in place; no swipe dismisses them.
        (V::Friend, D::Left) => Routed::invoke(Action::Skip),
        (V::Friend, D::Right) => Routed::invoke(Action::MessageIntent),
        (V::Friend, D::Up) => Routed::invoke(Action::ViewProfile),
        (V::Friend, D::Down) => Routed::invoke(Action::Share),

        // Request cards are dismissed by deciding them.
        (V::FriendRequest, D::Left) => Routed::dismiss(Action::Decline),
        (V::FriendRequest, D::Right) => Routed::dismiss(Action::Accept),
        (V::FriendRequest, D::Up) => Routed::invoke(Action::ViewProfile),
        (V::FriendRequest, D::Down) => Routed::NoOp,

        (V::PublicProfile, D::Left) => Routed::dismiss(Action::Skip),
        (V::PublicProfile, D::Right) => Routed::dismiss(Action::Connect),
        (V::PublicProfile, D::Up) => Routed::invoke(Action::ViewProfile),
        (V::PublicProfile, D::Down) => Routed::NoOp,

        // Content decks navigate horizontally; reveal is a tap, not a swipe.
        (V::Prediction, D::Left) => Routed::Back,
        (V::Prediction, D::Right) => Routed::Forward,
        (V::Prediction, D::Up | D::Down) => Routed::NoOp,

        (V::ChallengeSubmission, D::Left) => Routed::Back,
        (V::ChallengeSubmission, D::Right) => Routed::Forward,
        (V::ChallengeSubmission, D::Up | D::Down) => Routed::NoOp,

        (V::Lesson, D::Left) => Routed::Back,
        (V::Lesson, D::Right) => Routed::Forward,
        (V::Lesson, D::Up | D::Down) => Routed::NoOp,
    }
}
