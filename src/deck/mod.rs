pub mod controller;
pub mod observer;
pub mod state;

pub use controller::DeckController;
pub use observer::{DeckObserver, NoopObserver};
pub use state::{Deck, DeckPhase, DeckState};
