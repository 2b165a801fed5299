#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use deckflow::{Action, Card, CardVariant, DeckObserver};

static TRACING: Once = Once::new();

/// Route engine tracing into the test harness once per binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Observer that records every callback for later assertions.
#[derive(Default)]
pub struct RecordingObserver {
    actions: Mutex<Vec<(String, String)>>,
    card_completes: Mutex<Vec<String>>,
    deck_completes: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn actions(&self) -> Vec<(String, String)> {
        self.actions.lock().unwrap().clone()
    }

    pub fn card_completes(&self) -> Vec<String> {
        self.card_completes.lock().unwrap().clone()
    }

    pub fn deck_completes(&self) -> Vec<String> {
        self.deck_completes.lock().unwrap().clone()
    }
}

impl DeckObserver for RecordingObserver {
    fn on_action(&self, card_id: &str, action: Action) {
        self.actions
            .lock()
            .unwrap()
            .push((card_id.to_string(), action.to_string()));
    }

    fn on_card_complete(&self, card_id: &str) {
        self.card_completes.lock().unwrap().push(card_id.to_string());
    }

    fn on_deck_complete(&self, deck_id: &str) {
        self.deck_completes.lock().unwrap().push(deck_id.to_string());
    }
}

/// Three-card deck of one variant, ids "a", "b", "c".
pub fn three_cards(variant: CardVariant) -> Vec<Card> {
    vec![
        Card::new("a", variant),
        Card::new("b", variant),
        Card::new("c", variant),
    ]
}
