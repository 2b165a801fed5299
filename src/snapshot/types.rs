use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serializable projection of a deck's navigation and completion state.
///
/// Constructed from a persisted row (or defaults on first visit), mutated by
/// the deck controller, and handed back to the store on every completion
/// event and on teardown. `completed_cards` is ordered, append-only, and
/// deduplicated; `time_spent_secs` is monotonic non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub deck_id: String,
    pub completed_cards: Vec<String>,
    pub total_cards: usize,
    pub current_index: usize,
    pub last_accessed: DateTime<Utc>,
    pub time_spent_secs: u64,
}

impl ProgressSnapshot {
    /// First-ever visit: nothing completed, index at the start.
    pub fn fresh(deck_id: impl Into<String>, total_cards: usize) -> Self {
        Self {
            deck_id: deck_id.into(),
            completed_cards: Vec::new(),
            total_cards,
            current_index: 0,
            last_accessed: Utc::now(),
            time_spent_secs: 0,
        }
    }

    /// Append a completed card id, preserving order and uniqueness.
    /// Returns `true` if the id was newly recorded.
    pub fn record_completion(&mut self, card_id: &str) -> bool {
        if self.completed_cards.iter().any(|id| id == card_id) {
            return false;
        }
        self.completed_cards.push(card_id.to_string());
        self.touch();
        true
    }

    /// Stamp the snapshot as mutated now.
    pub fn touch(&mut self) {
        self.last_accessed = Utc::now();
    }

    /// Accumulate elapsed time. Deltas come from a monotonic clock, so the
    /// counter never decreases.
    pub fn add_time(&mut self, secs: u64) {
        self.time_spent_secs = self.time_spent_secs.saturating_add(secs);
    }

    pub fn is_complete(&self) -> bool {
        self.total_cards > 0 && self.completed_cards.len() >= self.total_cards
    }
}
