mod kv;
mod writer;

pub use kv::{FileStore, KeyValueStore, MemoryStore, Result, StorageError};
pub use writer::{start_snapshot_writer, SnapshotWriter, WriterStatus};
