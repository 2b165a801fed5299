use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `deckflow`.
///
/// Each subsystem defines its own error variant. Host callers can match on
/// these to decide recovery strategy; internal code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum FlowError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Deck ────────────────────────────────────────────────────────────
    #[error("deck: {0}")]
    Deck(#[from] DeckError),

    // ── Snapshot persistence ────────────────────────────────────────────
    #[error("snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Deck errors ────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("card not found in deck: {0}")]
    CardNotFound(String),

    #[error("deck is empty")]
    Empty,

    #[error("controller already shut down")]
    ShutDown,
}

// ─── Snapshot persistence errors ────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot not found for deck: {0}")]
    NotFound(String),

    #[error("store: {0}")]
    Store(String),

    #[error("schema: {0}")]
    Schema(String),
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, FlowError>;
