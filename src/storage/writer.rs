use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use super::kv::{KeyValueStore, Result, StorageError};

/// Messages consumed by the snapshot writer task
#[derive(Debug)]
enum WriterMessage {
    /// Persist a full snapshot
    Save { revision: u64, text: String },
    /// Reply once every earlier message has been handled
    Flush(oneshot::Sender<WriterStatus>),
}

/// Outcome counters reported by the writer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStatus {
    /// Snapshots saved successfully
    pub written: u64,
    /// Snapshots whose save failed
    pub failed: u64,
    /// Revision of the newest snapshot that reached the store
    pub last_written_revision: Option<u64>,
    /// Error from the most recent save, cleared by the next success
    pub last_error: Option<String>,
}

/// Handle for the background snapshot writer.
///
/// Snapshots are saved one at a time, in submission order, so a slow save
/// can never be overtaken by an older snapshot.
pub struct SnapshotWriter {
    sender: mpsc::UnboundedSender<WriterMessage>,
    next_revision: u64,
}

impl SnapshotWriter {
    /// Queue a snapshot. Returns its revision number.
    pub fn submit(&mut self, text: String) -> u64 {
        self.next_revision += 1;
        let revision = self.next_revision;
        if self
            .sender
            .send(WriterMessage::Save { revision, text })
            .is_err()
        {
            log::error!("Snapshot writer stopped; revision {} not persisted", revision);
        }
        revision
    }

    /// Revision of the most recently submitted snapshot
    pub fn revision(&self) -> u64 {
        self.next_revision
    }

    /// Wait until every submitted snapshot has been handled
    pub async fn flush(&self) -> Result<WriterStatus> {
        let (ack, done) = oneshot::channel();
        self.sender
            .send(WriterMessage::Flush(ack))
            .map_err(|_| StorageError::WriterClosed)?;
        done.await.map_err(|_| StorageError::WriterClosed)
    }
}

/// Start the snapshot writer for `key`.
///
/// Must be called from within a Tokio runtime. The task ends when the
/// returned handle is dropped.
pub fn start_snapshot_writer(store: Arc<dyn KeyValueStore>, key: String) -> SnapshotWriter {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        snapshot_writer_loop(store, key, rx).await;
    });

    SnapshotWriter {
        sender: tx,
        next_revision: 0,
    }
}

async fn snapshot_writer_loop(
    store: Arc<dyn KeyValueStore>,
    key: String,
    mut rx: mpsc::UnboundedReceiver<WriterMessage>,
) {
    let mut status = WriterStatus::default();

    while let Some(message) = rx.recv().await {
        match message {
            WriterMessage::Save { revision, text } => match store.save(&key, &text).await {
                Ok(()) => {
                    status.written += 1;
                    status.last_written_revision = Some(revision);
                    status.last_error = None;
                    log::debug!("Persisted '{}' revision {}", key, revision);
                }
                Err(e) => {
                    // The next submitted snapshot supersedes this one
                    status.failed += 1;
                    status.last_error = Some(e.to_string());
                    log::error!("Failed to persist '{}' revision {}: {}", key, revision, e);
                }
            },
            WriterMessage::Flush(ack) => {
                let _ = ack.send(status.clone());
            }
        }
    }

    log::debug!("Snapshot writer for '{}' shut down", key);
}
