use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

use crate::card::Card;
use crate::snapshot::ProgressSnapshot;

/// An ordered, fixed-at-construction sequence of cards with a stable id.
/// The handoff shape from the card data source to a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub id: String,
    pub cards: Vec<Card>,
}

impl Deck {
    /// A deck with a generated id.
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            cards,
        }
    }

    pub fn with_id(id: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            id: id.into(),
            cards,
        }
    }
}

/// Terminal and non-terminal phases of a deck session.
///
/// `Complete` means every card was individually completed — a different
/// condition from the index reaching the end, since a user can navigate past
/// cards without completing them. `Empty` is terminal and distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckPhase {
    Active,
    Complete,
    Empty,
}

/// Navigation and completion state for one deck.
///
/// Invariants: `completed_ids ⊆ sequence`; `current_index` stays in
/// `[0, len - 1]` while the deck is non-empty. Restored data that violates
/// either is clamped or filtered, never trusted.
#[derive(Debug, Clone)]
pub struct DeckState {
    deck_id: String,
    sequence: Vec<String>,
    current_index: usize,
    completed_ids: HashSet<String>,
    phase: DeckPhase,
    created_at: DateTime<Utc>,
}

impl DeckState {
    /// Build deck state from the card sequence and an optional restored
    /// snapshot. A malformed snapshot (index out of bounds, completed ids
    /// that are not in the sequence) is clamped defensively.
    pub fn restore(
        deck_id: impl Into<String>,
        sequence: Vec<String>,
        snapshot: Option<&ProgressSnapshot>,
    ) -> Self {
        let phase = if sequence.is_empty() {
            DeckPhase::Empty
        } else {
            DeckPhase::Active
        };

        let mut completed_ids = HashSet::new();
        let mut current_index = 0;

        if let Some(snapshot) = snapshot {
            completed_ids = snapshot
                .completed_cards
                .iter()
                .filter(|id| sequence.iter().any(|card_id| card_id == *id))
                .cloned()
                .collect();
            current_index = snapshot
                .current_index
                .min(sequence.len().saturating_sub(1));
        }

        Self {
            deck_id: deck_id.into(),
            sequence,
            current_index,
            completed_ids,
            phase,
            created_at: Utc::now(),
        }
    }

    pub fn deck_id(&self) -> &str {
        &self.deck_id
    }

    pub fn phase(&self) -> DeckPhase {
        self.phase
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Id of the card at the current index; `None` once the deck is empty.
    pub fn current_card_id(&self) -> Option<&str> {
        self.sequence.get(self.current_index).map(String::as_str)
    }

    pub fn contains(&self, card_id: &str) -> bool {
        self.sequence.iter().any(|id| id == card_id)
    }

    pub fn is_completed(&self, card_id: &str) -> bool {
        self.completed_ids.contains(card_id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed_ids.len()
    }

    pub fn at_last(&self) -> bool {
        !self.sequence.is_empty() && self.current_index == self.sequence.len() - 1
    }

    /// Move to the next card. No wrap; `false` at the last card.
    pub fn advance(&mut self) -> bool {
        if self.current_index + 1 < self.sequence.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous card. `false` at the first card.
    pub fn retreat(&mut self) -> bool {
        if self.current_index > 0 {
            self.current_index -= 1;
            true
        } else {
            false
        }
    }

    /// Record a card as completed. Returns `true` on first insertion.
    pub fn complete(&mut self, card_id: &str) -> bool {
        if !self.contains(card_id) {
            return false;
        }
        self.completed_ids.insert(card_id.to_string())
    }

    /// Every card in the sequence has been completed.
    pub fn all_complete(&self) -> bool {
        !self.sequence.is_empty() && self.completed_ids.len() == self.sequence.len()
    }

    /// Enter the Complete phase.
    pub fn finish(&mut self) {
        self.phase = DeckPhase::Complete;
    }

    /// Drop a card mid-session. Clamps the index and transitions to Empty
    /// when the last card leaves.
    pub fn remove(&mut self, card_id: &str) -> bool {
        let Some(position) = self.sequence.iter().position(|id| id == card_id) else {
            return false;
        };
        self.sequence.remove(position);
        self.completed_ids.remove(card_id);

        if self.sequence.is_empty() {
            self.current_index = 0;
            self.phase = DeckPhase::Empty;
        } else if self.current_index >= self.sequence.len() {
            self.current_index = self.sequence.len() - 1;
        }
        true
    }
}
