use super::types::ProgressSnapshot;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqliteRow};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

/// Async progress persistence contract.
///
/// `load` returning `None` means first-ever visit and must be treated
/// identically to a fresh snapshot. Writes are last-writer-wins per deck id;
/// concurrent writers for one deck are not a supported scenario.
pub trait SnapshotStore: Send + Sync {
    fn load<'a>(
        &'a self,
        deck_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ProgressSnapshot>>> + Send + 'a>>;

    fn save<'a>(
        &'a self,
        snapshot: &'a ProgressSnapshot,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;
}

/// SQLite-backed snapshot store using sqlx async pool.
pub struct SqliteSnapshotStore {
    pool: SqlitePool,
}

const PROGRESS_SCHEMA_META_TABLE: &str = "
CREATE TABLE IF NOT EXISTS progress_schema_meta (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
)";
const PROGRESS_SCHEMA_VERSION_KEY: &str = "progress_schema_version";
const PROGRESS_SCHEMA_VERSION: u32 = 1;

async fn ensure_progress_schema_version(pool: &SqlitePool) -> Result<()> {
    sqlx::query(PROGRESS_SCHEMA_META_TABLE)
        .execute(pool)
        .await
        .context("create progress_schema_meta table")?;

    let stored_version: Option<(String,)> =
        sqlx::query_as("SELECT value FROM progress_schema_meta WHERE key = $1")
            .bind(PROGRESS_SCHEMA_VERSION_KEY)
            .fetch_optional(pool)
            .await
            .context("load progress schema version")?;

    if let Some((value,)) = stored_version {
        let parsed = value
            .parse::<u32>()
            .with_context(|| format!("invalid progress schema version value: {value}"))?;
        anyhow::ensure!(
            parsed == PROGRESS_SCHEMA_VERSION,
            "incompatible progress schema version: stored={parsed}, expected={PROGRESS_SCHEMA_VERSION}. \
compatibility is disabled; remove progress DB and restart."
        );
        return Ok(());
    }

    let legacy_table_count: (i64,) = sqlx::query_as(
        "SELECT COUNT(*)
         FROM sqlite_master
         WHERE type = 'table'
           AND name = 'deck_progress'",
    )
    .fetch_one(pool)
    .await
    .context("detect legacy progress tables")?;

    if legacy_table_count.0 > 0 {
        anyhow::bail!(
            "legacy progress database detected without schema version metadata. \
compatibility is disabled; remove progress DB and restart."
        );
    }

    sqlx::query("INSERT INTO progress_schema_meta (key, value) VALUES ($1, $2)")
        .bind(PROGRESS_SCHEMA_VERSION_KEY)
        .bind(PROGRESS_SCHEMA_VERSION.to_string())
        .execute(pool)
        .await
        .context("persist progress schema version")?;

    Ok(())
}

impl SqliteSnapshotStore {
    /// Create a new store with an existing pool and run migrations.
    pub async fn new(pool: SqlitePool) -> Result<Self> {
        ensure_progress_schema_version(&pool).await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS deck_progress (
                 deck_id TEXT PRIMARY KEY,
                 completed_cards TEXT NOT NULL,
                 total_cards INTEGER NOT NULL,
                 current_index INTEGER NOT NULL,
                 last_accessed TEXT NOT NULL,
                 time_spent_secs INTEGER NOT NULL
             )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    /// Access the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn map_progress_row(row: &SqliteRow) -> Result<ProgressSnapshot> {
    let completed_raw: String = row.try_get("completed_cards")?;
    let completed_cards: Vec<String> =
        serde_json::from_str(&completed_raw).context("deserialize completed card list")?;

    let total_cards: i64 = row.try_get("total_cards")?;
    let current_index: i64 = row.try_get("current_index")?;
    let time_spent: i64 = row.try_get("time_spent_secs")?;

    let last_accessed_raw: String = row.try_get("last_accessed")?;
    let last_accessed = DateTime::parse_from_rfc3339(&last_accessed_raw)
        .context("parse last_accessed timestamp")?
        .with_timezone(&Utc);

    Ok(ProgressSnapshot {
        deck_id: row.try_get("deck_id")?,
        completed_cards,
        total_cards: usize::try_from(total_cards).context("convert total_cards")?,
        current_index: usize::try_from(current_index).context("convert current_index")?,
        last_accessed,
        time_spent_secs: u64::try_from(time_spent).context("convert time_spent_secs")?,
    })
}

impl SnapshotStore for SqliteSnapshotStore {
    fn load<'a>(
        &'a self,
        deck_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ProgressSnapshot>>> + Send + 'a>> {
        Box::pin(async move {
            let row = sqlx::query(
                "SELECT deck_id, completed_cards, total_cards, current_index,
                        last_accessed, time_spent_secs
                 FROM deck_progress
                 WHERE deck_id = $1",
            )
            .bind(deck_id)
            .fetch_optional(&self.pool)
            .await
            .context("query progress by deck id")?;

            row.map(|r| map_progress_row(&r)).transpose()
        })
    }

    fn save<'a>(
        &'a self,
        snapshot: &'a ProgressSnapshot,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let completed = serde_json::to_string(&snapshot.completed_cards)
                .context("serialize completed card list")?;
            #[allow(clippy::cast_possible_wrap)]
            let total_cards = snapshot.total_cards as i64;
            #[allow(clippy::cast_possible_wrap)]
            let current_index = snapshot.current_index as i64;
            #[allow(clippy::cast_possible_wrap)]
            let time_spent = snapshot.time_spent_secs as i64;

            sqlx::query(
                "INSERT INTO deck_progress
                     (deck_id, completed_cards, total_cards, current_index,
                      last_accessed, time_spent_secs)
                 VALUES ($1, $2, $3, $4, $5, $6)
                 ON CONFLICT(deck_id) DO UPDATE SET
                     completed_cards = excluded.completed_cards,
                     total_cards = excluded.total_cards,
                     current_index = excluded.current_index,
                     last_accessed = excluded.last_accessed,
                     time_spent_secs = excluded.time_spent_secs",
            )
            .bind(&snapshot.deck_id)
            .bind(&completed)
            .bind(total_cards)
            .bind(current_index)
            .bind(snapshot.last_accessed.to_rfc3339())
            .bind(time_spent)
            .execute(&self.pool)
            .await
            .context("upsert deck progress")?;

            Ok(())
        })
    }
}

/// In-memory store for tests and hosts without durable storage.
#[derive(Default)]
pub struct MemorySnapshotStore {
    snapshots: Mutex<HashMap<String, ProgressSnapshot>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load<'a>(
        &'a self,
        deck_id: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<ProgressSnapshot>>> + Send + 'a>> {
        Box::pin(async move {
            let snapshots = self
                .snapshots
                .lock()
                .map_err(|_| anyhow::anyhow!("snapshot map poisoned"))?;
            Ok(snapshots.get(deck_id).cloned())
        })
    }

    fn save<'a>(
        &'a self,
        snapshot: &'a ProgressSnapshot,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let mut snapshots = self
                .snapshots
                .lock()
                .map_err(|_| anyhow::anyhow!("snapshot map poisoned"))?;
            snapshots.insert(snapshot.deck_id.clone(), snapshot.clone());
            Ok(())
        })
    }
}
