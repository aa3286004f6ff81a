//! Study session: applies user intents to the deck, the view and the reveal
//! state, and reports what should be on screen afterwards.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::models::{Card, ValidationError};
use super::presentation::RevealState;
use super::store::DeckStore;
use super::view::ViewSelector;
use crate::storage::{self, KeyValueStore, WriterStatus};

/// Events accepted from the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    AddCard {
        question: String,
        answer: String,
        tags: String,
    },
    EditCard {
        id: String,
        question: String,
        answer: String,
        tags: String,
    },
    DeleteCard {
        id: String,
    },
    SetFilter {
        tag: Option<String>,
    },
    GoNext,
    GoPrevious,
    RevealAnswer,
}

/// Everything the presentation layer needs after an intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub current: Option<Card>,
    pub position: Option<usize>,
    pub filtered_count: usize,
    pub revealed: bool,
    pub tag_universe: Vec<String>,
    pub filter: Option<String>,
}

/// Identifies what is on screen, to detect navigation
#[derive(Debug, PartialEq, Eq)]
struct Cursor {
    position: Option<usize>,
    card_id: Option<String>,
}

pub struct StudySession {
    deck: DeckStore,
    view: ViewSelector,
    reveal: RevealState,
}

impl StudySession {
    /// Hydrate the deck stored under `key` and start at the first card
    pub async fn open(store: Arc<dyn KeyValueStore>, key: &str) -> Self {
        Self::new(DeckStore::hydrate(store, key).await)
    }

    pub fn new(deck: DeckStore) -> Self {
        let view = ViewSelector::new(deck.cards());
        Self {
            deck,
            view,
            reveal: RevealState::default(),
        }
    }

    pub fn deck(&self) -> &DeckStore {
        &self.deck
    }

    pub fn view(&self) -> &ViewSelector {
        &self.view
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal.is_revealed()
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.view.current_card(self.deck.cards())
    }

    pub fn tag_universe(&self) -> Vec<String> {
        self.deck.tag_universe()
    }

    /// Apply one intent and return the resulting frame
    pub fn apply(&mut self, intent: Intent) -> Result<Frame, ValidationError> {
        match intent {
            Intent::AddCard { question, answer, tags } => {
                self.add(&question, &answer, &tags)?;
            }
            Intent::EditCard { id, question, answer, tags } => {
                self.edit(&id, &question, &answer, &tags)?;
            }
            Intent::DeleteCard { id } => {
                self.delete(&id);
            }
            Intent::SetFilter { tag } => self.set_filter(tag),
            Intent::GoNext => {
                self.next();
            }
            Intent::GoPrevious => {
                self.previous();
            }
            Intent::RevealAnswer => self.reveal(),
        }
        Ok(self.frame())
    }

    pub fn frame(&self) -> Frame {
        Frame {
            current: self.current_card().cloned(),
            position: self.view.position(),
            filtered_count: self.view.filtered_count(self.deck.cards()),
            revealed: self.reveal.is_revealed(),
            tag_universe: self.deck.tag_universe(),
            filter: self.view.filter().map(str::to_string),
        }
    }

    /// Add a card. The view jumps to it only when it matches the active
    /// filter; otherwise the position is left alone.
    pub fn add(&mut self, question: &str, answer: &str, tags_text: &str) -> Result<String, ValidationError> {
        let before = self.cursor();
        let id = self.deck.add(question, answer, tags_text)?.id.clone();

        if !self.view.focus(self.deck.cards(), &id) {
            self.view.reclamp(self.deck.cards());
        }
        self.settle(before);
        Ok(id)
    }

    /// Edit a card in place. Returns `Ok(false)` for an unknown id.
    pub fn edit(
        &mut self,
        id: &str,
        question: &str,
        answer: &str,
        tags_text: &str,
    ) -> Result<bool, ValidationError> {
        let before = self.cursor();
        let found = self.deck.update(id, question, answer, tags_text)?;
        if found {
            self.view.reclamp(self.deck.cards());
            self.settle(before);
        }
        Ok(found)
    }

    /// Delete a card. Returns `false` for an unknown id.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.cursor();
        let found = self.deck.remove(id);
        if found {
            self.view.reclamp(self.deck.cards());
            self.settle(before);
        }
        found
    }

    pub fn set_filter(&mut self, tag: Option<String>) {
        self.view.set_filter(self.deck.cards(), tag);
        // A filter change always counts as navigation
        self.reveal.hide();
    }

    pub fn next(&mut self) -> bool {
        let moved = self.view.next(self.deck.cards());
        if moved {
            self.reveal.hide();
        }
        moved
    }

    pub fn previous(&mut self) -> bool {
        let moved = self.view.previous();
        if moved {
            self.reveal.hide();
        }
        moved
    }

    pub fn first(&mut self) {
        let before = self.cursor();
        self.view.first(self.deck.cards());
        self.settle(before);
    }

    pub fn last(&mut self) {
        let before = self.cursor();
        self.view.last(self.deck.cards());
        self.settle(before);
    }

    pub fn reveal(&mut self) {
        if self.current_card().is_some() {
            self.reveal.reveal();
        }
    }

    /// Flip the current card between question and answer
    pub fn flip(&mut self) {
        if self.current_card().is_some() {
            self.reveal.toggle();
        }
    }

    /// Wait for pending deck snapshots to be written
    pub async fn flush(&self) -> storage::Result<WriterStatus> {
        self.deck.flush().await
    }

    fn cursor(&self) -> Cursor {
        Cursor {
            position: self.view.position(),
            card_id: self.current_card().map(|c| c.id.clone()),
        }
    }

    /// Hide the answer if the position or the displayed card changed
    fn settle(&mut self, before: Cursor) {
        if self.cursor() != before {
            self.reveal.hide();
        }
    }
}
