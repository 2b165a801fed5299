pub mod schema;

pub use schema::{EngineConfig, SnapshotBackend, SnapshotConfig};
