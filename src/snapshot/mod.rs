pub mod store;
pub mod types;

pub use store::{MemorySnapshotStore, SnapshotStore, SqliteSnapshotStore};
pub use types::ProgressSnapshot;
