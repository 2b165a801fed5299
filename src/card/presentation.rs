//! Per-card presentation state: which face is showing and whether the card
//! has been completed this session.

use serde::{Deserialize, Serialize};

/// Which face of the card is showing. Front is the initial face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    #[default]
    Front,
    Back,
}

impl Face {
    pub fn flipped(self) -> Self {
        match self {
            Self::Front => Self::Back,
            Self::Back => Self::Front,
        }
    }
}

/// Presentation state for one card. Created on first render, mutated in
/// place, dropped when the card leaves the deck.
///
/// `flip` toggles unconditionally; completion is one-way within a session.
#[derive(Debug, Clone, PartialEq)]
pub struct CardPresentationState {
    card_id: String,
    face: Face,
    completed: bool,
}

impl CardPresentationState {
    pub fn new(card_id: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            face: Face::Front,
            completed: false,
        }
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Toggle between Front and Back. No guard conditions.
    pub fn flip(&mut self) {
        self.face = self.face.flipped();
    }

    /// Show the front face again (used when navigation moves to this card).
    pub fn reset_face(&mut self) {
        self.face = Face::Front;
    }

    /// Mark the card complete. Idempotent and irreversible; returns `true`
    /// only on the transition, which is the controller's signal to notify.
    pub fn mark_complete(&mut self) -> bool {
        if self.completed {
            return false;
        }
        self.completed = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_front_and_incomplete() {
        let state = CardPresentationState::new("c1");
        assert_eq!(state.face(), Face::Front);
        assert!(!state.is_completed());
    }

    #[test]
    fn flip_toggles_both_ways() {
        let mut state = CardPresentationState::new("c1");
        state.flip();
        assert_eq!(state.face(), Face::Back);
        state.flip();
        assert_eq!(state.face(), Face::Front);
    }

    #[test]
    fn mark_complete_transitions_only_once() {
        let mut state = CardPresentationState::new("c1");
        assert!(state.mark_complete());
        assert!(!state.mark_complete());
        assert!(state.is_completed());
    }

    #[test]
    fn reset_face_shows_front_regardless_of_flips() {
        let mut state = CardPresentationState::new("c1");
        state.flip();
        state.reset_face();
        assert_eq!(state.face(), Face::Front);
    }
}
