//! Deck progression control.
//!
//! Owns the card sequence, the per-card presentation states, and the
//! in-memory progress snapshot. Consumes routed swipe outcomes and
//! completion events; emits host callbacks. Deferred transitions (the
//! visible pause after completing a card) are cancellable timer tasks, and
//! teardown cancels whatever is pending so a dead controller is never
//! mutated.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};

use crate::card::{Card, CardPresentationState, Face};
use crate::config::EngineConfig;
use crate::deck::observer::DeckObserver;
use crate::deck::state::{Deck, DeckPhase, DeckState};
use crate::error::{DeckError, Result};
use crate::gesture::Direction;
use crate::router::{Routed, route};
use crate::snapshot::{ProgressSnapshot, SnapshotStore};

#[derive(Debug, Clone, Copy)]
enum Deferred {
    Advance,
    Finish,
}

struct Shared {
    state: DeckState,
    snapshot: ProgressSnapshot,
    cards: HashMap<String, Card>,
    presentation: HashMap<String, CardPresentationState>,
    pending: Option<JoinHandle<()>>,
    deck_complete_fired: bool,
    shut_down: bool,
    last_tick: Instant,
}

impl Shared {
    fn accrue_time(&mut self) {
        let elapsed = self.last_tick.elapsed().as_secs();
        self.last_tick = Instant::now();
        self.snapshot.add_time(elapsed);
    }

    fn sync_snapshot_position(&mut self) {
        self.snapshot.current_index = self.state.current_index();
        self.snapshot.touch();
    }

    fn reset_current_face(&mut self) {
        if let Some(id) = self.state.current_card_id().map(str::to_string)
            && let Some(presentation) = self.presentation.get_mut(&id)
        {
            presentation.reset_face();
        }
    }
}

/// Controller for one mounted deck. One logical actor drives it at a time;
/// all mutation happens behind a single lock and the only suspension points
/// are snapshot I/O and the deferred-transition timers.
pub struct DeckController {
    shared: Arc<Mutex<Shared>>,
    store: Arc<dyn SnapshotStore>,
    observer: Arc<dyn DeckObserver>,
    advance_delay: Duration,
}

impl DeckController {
    /// Mount a deck: load its persisted snapshot once (absent or failing
    /// loads start fresh), seed state, and clamp anything malformed.
    pub async fn new(
        deck: Deck,
        store: Arc<dyn SnapshotStore>,
        observer: Arc<dyn DeckObserver>,
        config: &EngineConfig,
    ) -> Self {
        let loaded = match store.load(&deck.id).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(deck_id = %deck.id, "progress load failed, starting fresh: {err:#}");
                None
            }
        };

        let sequence: Vec<String> = deck.cards.iter().map(|card| card.id.clone()).collect();
        let state = DeckState::restore(deck.id.as_str(), sequence, loaded.as_ref());

        let mut snapshot = loaded
            .unwrap_or_else(|| ProgressSnapshot::fresh(deck.id.as_str(), deck.cards.len()));
        snapshot.total_cards = state.len();
        snapshot.current_index = state.current_index();

        let mut presentation: HashMap<String, CardPresentationState> = deck
            .cards
            .iter()
            .map(|card| (card.id.clone(), CardPresentationState::new(&card.id)))
            .collect();
        for card in &deck.cards {
            if state.is_completed(&card.id)
                && let Some(entry) = presentation.get_mut(&card.id)
            {
                entry.mark_complete();
            }
        }

        let cards = deck
            .cards
            .into_iter()
            .map(|card| (card.id.clone(), card))
            .collect();

        Self {
            shared: Arc::new(Mutex::new(Shared {
                state,
                snapshot,
                cards,
                presentation,
                pending: None,
                deck_complete_fired: false,
                shut_down: false,
                last_tick: Instant::now(),
            })),
            store,
            observer,
            advance_delay: Duration::from_millis(config.advance_delay_ms),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Shared> {
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn deck_id(&self) -> String {
        self.lock().state.deck_id().to_string()
    }

    pub fn phase(&self) -> DeckPhase {
        self.lock().state.phase()
    }

    pub fn len(&self) -> usize {
        self.lock().state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().state.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.lock().state.current_index()
    }

    /// The card at the current index; `None` once the deck is empty.
    pub fn current_card(&self) -> Option<Card> {
        let shared = self.lock();
        let id = shared.state.current_card_id()?;
        shared.cards.get(id).cloned()
    }

    /// Which face the current card is showing.
    pub fn current_face(&self) -> Option<Face> {
        let shared = self.lock();
        let id = shared.state.current_card_id()?;
        shared.presentation.get(id).map(CardPresentationState::face)
    }

    pub fn is_card_completed(&self, card_id: &str) -> bool {
        self.lock().state.is_completed(card_id)
    }

    pub fn completed_count(&self) -> usize {
        self.lock().state.completed_count()
    }

    /// Copy of the in-memory progress snapshot.
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.lock().snapshot.clone()
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Advance to the next card. No-op (and no callback) at the last card.
    pub fn next(&self) {
        let mut shared = self.lock();
        if shared.shut_down {
            return;
        }
        if shared.state.advance() {
            shared.reset_current_face();
            shared.sync_snapshot_position();
            tracing::debug!(
                deck_id = %shared.state.deck_id(),
                index = shared.state.current_index(),
                "advanced"
            );
        }
    }

    /// Go back one card. No-op (and no callback) at the first card.
    pub fn previous(&self) {
        let mut shared = self.lock();
        if shared.shut_down {
            return;
        }
        if shared.state.retreat() {
            shared.reset_current_face();
            shared.sync_snapshot_position();
            tracing::debug!(
                deck_id = %shared.state.deck_id(),
                index = shared.state.current_index(),
                "went back"
            );
        }
    }

    /// Toggle the current card between its front and back face.
    pub fn flip_current(&self) {
        let mut shared = self.lock();
        let Some(id) = shared.state.current_card_id().map(str::to_string) else {
            return;
        };
        if let Some(presentation) = shared.presentation.get_mut(&id) {
            presentation.flip();
        }
    }

    // ── Gesture consumption ─────────────────────────────────────────────

    /// Apply a classified swipe to the current card. Routes the direction
    /// through the variant table, performs navigation or forwards the action
    /// callback (advancing when the swipe dismisses the card), and returns
    /// the routed outcome so the host can drive the exit/rest animation.
    pub fn swipe(&self, direction: Direction) -> Routed {
        let (routed, card_id) = {
            let shared = self.lock();
            if shared.shut_down {
                return Routed::NoOp;
            }
            let Some(id) = shared.state.current_card_id() else {
                return Routed::NoOp;
            };
            let Some(card) = shared.cards.get(id) else {
                return Routed::NoOp;
            };
            (route(card.variant, direction), id.to_string())
        };

        match routed {
            Routed::Forward => self.next(),
            Routed::Back => self.previous(),
            Routed::Invoke { action, dismiss } => {
                tracing::debug!(card_id = %card_id, action = %action, "action routed");
                self.observer.on_action(&card_id, action);
                if dismiss {
                    self.next();
                }
            }
            Routed::NoOp => {}
        }

        routed
    }

    // ── Completion ──────────────────────────────────────────────────────

    /// Record a card as completed.
    ///
    /// Idempotent: a repeat call for the same id changes nothing, schedules
    /// nothing, and fires nothing. The first call persists the snapshot,
    /// fires `on_card_complete`, and schedules the deferred transition —
    /// either the deck-complete transition when this completion closes the
    /// set, or an advance when the completed card is the current, non-last
    /// one.
    pub async fn complete_card(&self, card_id: &str) -> Result<()> {
        let snapshot = {
            let mut shared = self.lock();
            if shared.shut_down {
                return Err(DeckError::ShutDown.into());
            }
            if !shared.state.contains(card_id) {
                return Err(DeckError::CardNotFound(card_id.to_string()).into());
            }
            if !shared.state.complete(card_id) {
                return Ok(());
            }

            if let Some(presentation) = shared.presentation.get_mut(card_id) {
                presentation.mark_complete();
            }
            shared.snapshot.record_completion(card_id);
            shared.snapshot.current_index = shared.state.current_index();
            shared.accrue_time();

            let is_current = shared.state.current_card_id() == Some(card_id);
            if shared.state.all_complete() {
                if !shared.deck_complete_fired {
                    self.schedule(&mut shared, Deferred::Finish);
                }
            } else if is_current && !shared.state.at_last() {
                self.schedule(&mut shared, Deferred::Advance);
            }

            shared.snapshot.clone()
        };

        self.observer.on_card_complete(card_id);
        self.persist(&snapshot).await;
        Ok(())
    }

    /// External mid-session removal. Clamps the index; the deck renders its
    /// empty state rather than crashing once the last card leaves. Returns
    /// `false` for an id that was not in the deck.
    pub fn remove_card(&self, card_id: &str) -> bool {
        let mut shared = self.lock();
        if !shared.state.remove(card_id) {
            return false;
        }
        shared.cards.remove(card_id);
        shared.presentation.remove(card_id);
        shared.snapshot.total_cards = shared.state.len();
        shared.sync_snapshot_position();

        // Removal can close the completion set.
        if shared.state.all_complete() && !shared.deck_complete_fired {
            self.schedule(&mut shared, Deferred::Finish);
        }
        true
    }

    // ── Teardown ────────────────────────────────────────────────────────

    /// Unmount: cancel any pending deferred transition, accumulate the final
    /// time delta, and hand the snapshot to the store one last time.
    pub async fn shutdown(&self) {
        let snapshot = {
            let mut shared = self.lock();
            if shared.shut_down {
                return;
            }
            shared.shut_down = true;
            if let Some(handle) = shared.pending.take() {
                handle.abort();
            }
            shared.accrue_time();
            shared.snapshot.touch();
            shared.snapshot.clone()
        };
        self.persist(&snapshot).await;
    }

    // ── Internals ───────────────────────────────────────────────────────

    /// Replace any pending deferred transition with a new one. The task
    /// holds only a weak reference, so a dropped controller is never
    /// touched, and teardown aborts it outright.
    fn schedule(&self, shared: &mut Shared, kind: Deferred) {
        if let Some(handle) = shared.pending.take() {
            handle.abort();
        }

        let weak = Arc::downgrade(&self.shared);
        let observer = Arc::clone(&self.observer);
        let delay = self.advance_delay;

        shared.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            let Some(shared) = weak.upgrade() else {
                return;
            };

            let fire = {
                let mut shared = shared.lock().unwrap_or_else(PoisonError::into_inner);
                shared.pending = None;
                if shared.shut_down {
                    return;
                }
                match kind {
                    Deferred::Advance => {
                        if shared.state.advance() {
                            shared.reset_current_face();
                            shared.sync_snapshot_position();
                        }
                        None
                    }
                    Deferred::Finish => {
                        if shared.deck_complete_fired {
                            None
                        } else {
                            shared.deck_complete_fired = true;
                            shared.state.finish();
                            Some(shared.state.deck_id().to_string())
                        }
                    }
                }
            };

            if let Some(deck_id) = fire {
                tracing::debug!(deck_id = %deck_id, "deck complete");
                observer.on_deck_complete(&deck_id);
            }
        }));
    }

    /// A failed save is logged and retried implicitly on the next mutation;
    /// losing one progress write is low-severity and never blocks the user.
    async fn persist(&self, snapshot: &ProgressSnapshot) {
        if let Err(err) = self.store.save(snapshot).await {
            tracing::warn!(
                deck_id = %snapshot.deck_id,
                "progress save failed, continuing in memory: {err:#}"
            );
        }
    }
}

impl Drop for DeckController {
    fn drop(&mut self) {
        let mut shared = self.lock();
        if let Some(handle) = shared.pending.take() {
            handle.abort();
        }
    }
}
