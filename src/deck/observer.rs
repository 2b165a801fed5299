//! Host callback seam.
//!
//! The engine does not know how actions are fulfilled (network call, UI
//! push, share sheet); it forwards them here. Completion callbacks fire
//! at most once per logical event per controller lifetime.

use crate::router::Action;

/// Callbacks a host wires into a deck controller.
pub trait DeckObserver: Send + Sync {
    /// A non-navigation action was routed for a card.
    fn on_action(&self, _card_id: &str, _action: Action) {}

    /// A card transitioned to complete for the first time.
    fn on_card_complete(&self, _card_id: &str) {}

    /// Every card in the deck is complete. Fires exactly once.
    fn on_deck_complete(&self, _deck_id: &str) {}
}

/// Observer that ignores everything; useful for headless decks and tests.
pub struct NoopObserver;

impl DeckObserver for NoopObserver {}
