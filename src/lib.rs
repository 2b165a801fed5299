#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

//! deckflow — swipeable card-deck interaction engine.
//!
//! One generic gesture classifier, one generic deck controller, and
//! per-variant action tables. Raw pointer events become a terminal
//! [`gesture::GestureSample`], the classifier turns it into a
//! [`gesture::SwipeDecision`], the router maps the committed direction to a
//! semantic outcome for the card's variant, and the [`deck::DeckController`]
//! applies it — emitting host callbacks and persisting a
//! [`snapshot::ProgressSnapshot`] along the way. Rendering, theming, and
//! data fetch belong to the host.

pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod gesture;
pub mod router;
pub mod snapshot;

pub use card::{Card, CardPresentationState, CardVariant, Face};
pub use config::EngineConfig;
pub use deck::{Deck, DeckController, DeckObserver, DeckPhase, NoopObserver};
pub use error::{FlowError, Result};
pub use gesture::{Bounds, Direction, DragTracker, GestureSample, SwipeDecision, classify};
pub use router::{Action, Routed, route};
pub use snapshot::{MemorySnapshotStore, ProgressSnapshot, SnapshotStore, SqliteSnapshotStore};
