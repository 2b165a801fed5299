use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

// ── Top-level config ──────────────────────────────────────────────

/// Engine configuration. Every field has a default, so an absent or empty
/// config file yields a working engine.
///
/// The gesture commit thresholds are deliberately not here: they are product
/// constants owned by the classifier, not tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Visible pause between completing a card and the deferred transition,
    /// so the completion animation registers before the deck moves.
    #[serde(default = "default_advance_delay_ms")]
    pub advance_delay_ms: u64,

    #[serde(default)]
    pub snapshot: SnapshotConfig,
}

fn default_advance_delay_ms() -> u64 {
    1000
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            advance_delay_ms: default_advance_delay_ms(),
            snapshot: SnapshotConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|err| ConfigError::Load(err.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.advance_delay_ms > 60_000 {
            return Err(ConfigError::Validation(format!(
                "advance_delay_ms {} exceeds 60s; the pause is a visible beat, not a timeout",
                self.advance_delay_ms
            )));
        }
        Ok(())
    }
}

// ── Snapshot persistence ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SnapshotBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SnapshotConfig {
    #[serde(default)]
    pub backend: SnapshotBackend,
    /// Database file for the sqlite backend; defaults under the home dir.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl SnapshotConfig {
    /// Resolved database path for the sqlite backend.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".deckflow").join("progress.db"))
            .unwrap_or_else(|| PathBuf::from("progress.db"))
    }
}
