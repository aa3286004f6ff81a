//! Flashdeck: a personal flashcard deck with tag filtering.
//!
//! The library holds the deck state machine ([`flashcards`]), the
//! persistence backends ([`storage`]) and user configuration ([`config`]).
//! Presentation lives in the `flashdeck-cli` binary.

pub mod config;
pub mod flashcards;
pub mod storage;

use std::sync::Arc;

use config::FlashdeckConfig;
use flashcards::StudySession;
use storage::FileStore;

/// Open a study session on the file-backed deck described by `config`.
///
/// Must be called from within a Tokio runtime.
pub async fn open_session(config: &FlashdeckConfig) -> crate::config::Result<StudySession> {
    let data_dir = config.resolved_data_dir()?;
    log::info!("Using data directory {}", data_dir.display());
    let store = Arc::new(FileStore::new(data_dir));
    Ok(StudySession::open(store, &config.storage_key).await)
}
