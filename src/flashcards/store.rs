//! The deck store: canonical card list plus persistence
//!
//! Every successful mutation serializes the whole deck right away and hands
//! the snapshot to the background [`SnapshotWriter`], so the persisted copy
//! always trails the in-memory deck by whole snapshots, in mutation order.

use std::collections::HashSet;
use std::sync::Arc;

use super::models::{normalize_tags, seed_deck, Card, CardInput, IdGenerator, ValidationError};
use crate::storage::{self, start_snapshot_writer, KeyValueStore, SnapshotWriter, WriterStatus};

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "flashcards";

/// Owner of the card list
pub struct DeckStore {
    cards: Vec<Card>,
    ids: IdGenerator,
    writer: SnapshotWriter,
}

impl DeckStore {
    /// Load the persisted deck stored under `key`, falling back to the seed
    /// deck when nothing is stored or the stored text cannot be parsed.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn hydrate(store: Arc<dyn KeyValueStore>, key: &str) -> Self {
        let cards = match store.load(key).await {
            Some(text) => match parse_deck(&text) {
                Ok(cards) => {
                    log::info!("Loaded {} cards from '{}'", cards.len(), key);
                    cards
                }
                Err(e) => {
                    log::warn!("Stored deck '{}' is unreadable, using seed deck: {}", key, e);
                    seed_deck()
                }
            },
            None => {
                log::info!("No stored deck under '{}', using seed deck", key);
                seed_deck()
            }
        };

        let writer = start_snapshot_writer(store, key.to_string());
        Self::with_cards(cards, writer)
    }

    fn with_cards(cards: Vec<Card>, writer: SnapshotWriter) -> Self {
        let mut ids = IdGenerator::new();
        for card in &cards {
            ids.observe(&card.id);
        }
        Self { cards, ids, writer }
    }

    /// All cards in display order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Create a card at the end of the deck
    pub fn add(&mut self, question: &str, answer: &str, tags_text: &str) -> Result<&Card, ValidationError> {
        let input = CardInput::parse(question, answer, tags_text)?;

        let card = Card {
            id: self.ids.next_id(),
            question: input.question,
            answer: input.answer,
            tags: input.tags,
        };
        log::debug!("Added card {}", card.id);
        self.cards.push(card);
        self.persist();

        Ok(&self.cards[self.cards.len() - 1])
    }

    /// Replace the question, answer and tags of a card in place.
    ///
    /// Returns `Ok(false)` without touching anything when no card has `id`.
    pub fn update(
        &mut self,
        id: &str,
        question: &str,
        answer: &str,
        tags_text: &str,
    ) -> Result<bool, ValidationError> {
        let input = CardInput::parse(question, answer, tags_text)?;

        let Some(card) = self.cards.iter_mut().find(|c| c.id == id) else {
            log::debug!("Ignoring update of unknown card {}", id);
            return Ok(false);
        };
        card.question = input.question;
        card.answer = input.answer;
        card.tags = input.tags;

        self.persist();
        Ok(true)
    }

    /// Delete a card. Returns `false` when no card has `id`.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(pos) = self.cards.iter().position(|c| c.id == id) else {
            log::debug!("Ignoring removal of unknown card {}", id);
            return false;
        };
        self.cards.remove(pos);
        self.persist();
        true
    }

    /// Distinct tags across the deck, in first-appearance order
    pub fn tag_universe(&self) -> Vec<String> {
        tag_universe(&self.cards)
    }

    /// Wait for queued snapshots to reach the store
    pub async fn flush(&self) -> storage::Result<WriterStatus> {
        self.writer.flush().await
    }

    fn persist(&mut self) {
        match serde_json::to_string_pretty(&self.cards) {
            Ok(text) => {
                self.writer.submit(text);
            }
            Err(e) => log::error!("Failed to serialize deck: {}", e),
        }
    }
}

/// Parse a stored deck. Cards repeating an earlier id are dropped and tags
/// are normalized the same way as typed input.
pub fn parse_deck(text: &str) -> serde_json::Result<Vec<Card>> {
    let mut cards: Vec<Card> = serde_json::from_str(text)?;
    for card in &mut cards {
        card.tags = normalize_tags(card.tags.iter().map(String::as_str));
    }

    let mut seen = HashSet::new();
    let total = cards.len();
    let unique: Vec<Card> = cards
        .into_iter()
        .filter(|card| seen.insert(card.id.clone()))
        .collect();
    if unique.len() < total {
        log::warn!("Dropped {} cards with duplicate ids", total - unique.len());
    }

    Ok(unique)
}

/// Distinct tags across `cards`, in first-appearance order
pub fn tag_universe(cards: &[Card]) -> Vec<String> {
    let mut seen = HashSet::new();
    cards
        .iter()
        .flat_map(|card| card.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

/// Tags text as shown in edit forms
pub fn tags_text(tags: &[String]) -> String {
    tags.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::parse_tags;
    use crate::storage::MemoryStore;

    async fn hydrate_memory(store: &Arc<MemoryStore>) -> DeckStore {
        DeckStore::hydrate(store.clone(), DEFAULT_STORAGE_KEY).await
    }

    fn stored_cards(store: &MemoryStore) -> Vec<Card> {
        let text = store.get(DEFAULT_STORAGE_KEY).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[tokio::test]
    async fn test_hydrate_without_data_uses_seed() {
        let store = Arc::new(MemoryStore::new());
        let deck = hydrate_memory(&store).await;

        assert_eq!(deck.cards(), seed_deck().as_slice());
        assert_eq!(deck.tag_universe(), vec!["Geography", "Math"]);
        // Hydration alone writes nothing
        assert_eq!(deck.flush().await.unwrap().written, 0);
    }

    #[tokio::test]
    async fn test_hydrate_corrupt_data_uses_seed() {
        let store = Arc::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, "{not json"));
        let deck = hydrate_memory(&store).await;
        assert_eq!(deck.cards(), seed_deck().as_slice());
    }

    #[tokio::test]
    async fn test_hydrate_persisted_deck() {
        let text = r#"[{"id":"10","question":"Q","answer":"A","tags":["x"]},
                       {"id":"10","question":"dup","answer":"dup","tags":[]},
                       {"id":"11","question":"Q2","answer":"A2","tags":[]}]"#;
        let store = Arc::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, text));
        let deck = hydrate_memory(&store).await;

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.cards()[0].question, "Q");
        assert_eq!(deck.cards()[1].id, "11");
    }

    #[tokio::test]
    async fn test_hydrate_normalizes_stored_tags() {
        let text = r#"[{"id":"10","question":"Q","answer":"A","tags":[""," x ","x"]}]"#;
        let store = Arc::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, text));
        let deck = hydrate_memory(&store).await;

        assert_eq!(deck.cards()[0].tags, vec!["x"]);
        assert_eq!(deck.tag_universe(), vec!["x"]);
    }

    #[tokio::test]
    async fn test_add_after_hydrating_maximal_id() {
        let text = r#"[{"id":"9223372036854775807","question":"Q","answer":"A","tags":[]}]"#;
        let store = Arc::new(MemoryStore::with_entry(DEFAULT_STORAGE_KEY, text));
        let mut deck = hydrate_memory(&store).await;

        let id = deck.add("Q2", "A2", "").unwrap().id.clone();
        assert_ne!(id, "9223372036854775807");
        assert!(id.parse::<i64>().unwrap() > 0);
        assert_eq!(deck.len(), 2);
    }

    #[tokio::test]
    async fn test_add_appends_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut deck = hydrate_memory(&store).await;

        let card = deck.add(" Q ", "A", "").unwrap().clone();
        assert_eq!(card.question, "Q");
        assert!(card.tags.is_empty());
        assert_eq!(deck.cards().last(), Some(&card));
        assert!(seed_deck().iter().all(|c| c.id != card.id));

        deck.flush().await.unwrap();
        assert_eq!(store.saves(DEFAULT_STORAGE_KEY).len(), 1);
        assert_eq!(stored_cards(&store), deck.cards());
    }

    #[tokio::test]
    async fn test_add_rejects_empty_question() {
        let store = Arc::new(MemoryStore::new());
        let mut deck = hydrate_memory(&store).await;

        assert_eq!(deck.add("", "A", "x").unwrap_err(), ValidationError::EmptyQuestion);
        assert_eq!(deck.add("Q", "  ", "x").unwrap_err(), ValidationError::EmptyAnswer);
        assert_eq!(deck.cards(), seed_deck().as_slice());

        deck.flush().await.unwrap();
        assert!(store.saves(DEFAULT_STORAGE_KEY).is_empty());
    }

    #[tokio::test]
    async fn test_ids_never_reused_after_remove() {
        let store = Arc::new(MemoryStore::new());
        let mut deck = hydrate_memory(&store).await;

        let first = deck.add("Q1", "A1", "").unwrap().id.clone();
        assert!(deck.remove(&first));
        let second = deck.add("Q2", "A2", "").unwrap().id.clone();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_update_in_place() {
        let store = Arc::new(MemoryStore::new());
        let mut deck = hydrate_memory(&store).await;

        assert_eq!(deck.update("1", "Capital of Italy?", "Rome", "Geography, Europe"), Ok(true));
        let card = &deck.cards()[0];
        assert_eq!(card.id, "1");
        assert_eq!(card.answer, "Rome");
        assert_eq!(card.tags, vec!["Geography", "Europe"]);
        assert_eq!(deck.tag_universe(), vec!["Geography", "Europe", "Math"]);

        deck.flush().await.unwrap();
        assert_eq!(stored_cards(&store), deck.cards());
    }

    #[tokio::test]
    async fn test_update_unknown_or_invalid_is_noop() {
        let store = Arc::new(MemoryStore::new());
        let mut deck = hydrate_memory(&store).await;

        assert_eq!(deck.update("missing", "Q", "A", ""), Ok(false));
        assert_eq!(deck.update("1", "Q", "", ""), Err(ValidationError::EmptyAnswer));
        assert!(!deck.remove("missing"));
        assert_eq!(deck.cards(), seed_deck().as_slice());

        deck.flush().await.unwrap();
        assert!(store.saves(DEFAULT_STORAGE_KEY).is_empty());
    }

    #[tokio::test]
    async fn test_add_then_remove_restores_deck() {
        let store = Arc::new(MemoryStore::new());
        let mut deck = hydrate_memory(&store).await;
        let before = deck.cards().to_vec();
        let tags_before = deck.tag_universe();

        let id = deck.add("Q", "A", "Temporary").unwrap().id.clone();
        assert!(deck.tag_universe().contains(&"Temporary".to_string()));
        assert!(deck.remove(&id));

        assert_eq!(deck.cards(), before.as_slice());
        assert_eq!(deck.tag_universe(), tags_before);
    }

    #[tokio::test]
    async fn test_one_snapshot_per_mutation() {
        let store = Arc::new(MemoryStore::new());
        let mut deck = hydrate_memory(&store).await;

        let id = deck.add("Q", "A", "t").unwrap().id.clone();
        deck.update(&id, "Q", "B", "t").unwrap();
        deck.remove("2");
        let status = deck.flush().await.unwrap();

        let saves = store.saves(DEFAULT_STORAGE_KEY);
        assert_eq!(saves.len(), 3);
        assert_eq!(status.written, 3);
        let last: Vec<Card> = serde_json::from_str(&saves[2]).unwrap();
        assert_eq!(last, deck.cards());
        let first: Vec<Card> = serde_json::from_str(&saves[0]).unwrap();
        assert_eq!(first.len(), 3);
    }

    #[tokio::test]
    async fn test_failed_write_recovered_by_next_mutation() {
        let store = Arc::new(MemoryStore::new());
        let mut deck = hydrate_memory(&store).await;

        store.set_failing(true);
        deck.add("Q1", "A1", "").unwrap();
        let status = deck.flush().await.unwrap();
        assert_eq!(status.failed, 1);
        assert_eq!(deck.len(), 3);

        store.set_failing(false);
        deck.add("Q2", "A2", "").unwrap();
        deck.flush().await.unwrap();
        assert_eq!(stored_cards(&store), deck.cards());
    }

    #[test]
    fn test_tag_universe_is_distinct_and_ordered() {
        let mut cards = seed_deck();
        cards[1].tags = vec!["Math".to_string(), "Geography".to_string(), "Easy".to_string()];
        assert_eq!(tag_universe(&cards), vec!["Geography", "Math", "Easy"]);
        assert!(tag_universe(&[]).is_empty());
    }

    #[test]
    fn test_tags_text_round_trips_through_parse() {
        let tags = vec!["a".to_string(), "b c".to_string()];
        assert_eq!(tags_text(&tags), "a, b c");
        assert_eq!(parse_tags(&tags_text(&tags)), tags);
    }
}
