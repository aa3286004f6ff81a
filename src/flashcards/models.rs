//! Data models for the flashcard deck

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A flashcard with a question, an answer and free-form tags.
///
/// The serialized form has exactly the fields `id`, `question`, `answer`
/// and `tags`; persisted decks are a JSON array of these records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Card {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Rejection reasons for add/edit input
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Question must not be empty")]
    EmptyQuestion,

    #[error("Answer must not be empty")]
    EmptyAnswer,
}

/// Validated question/answer/tags, ready to be stored on a card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardInput {
    pub question: String,
    pub answer: String,
    pub tags: Vec<String>,
}

impl CardInput {
    /// Validate raw form input. Question and answer are trimmed; the tags
    /// text is parsed with [`parse_tags`].
    pub fn parse(question: &str, answer: &str, tags_text: &str) -> Result<Self, ValidationError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ValidationError::EmptyQuestion);
        }
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(ValidationError::EmptyAnswer);
        }
        Ok(Self {
            question: question.to_string(),
            answer: answer.to_string(),
            tags: parse_tags(tags_text),
        })
    }
}

/// Split comma-separated tags text, trimming each label and dropping empty
/// labels and repeats. First occurrence order is kept.
pub fn parse_tags(text: &str) -> Vec<String> {
    normalize_tags(text.split(','))
}

/// Trim each label, dropping empty labels and repeats. First occurrence
/// order is kept.
pub fn normalize_tags<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in labels.into_iter().map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Issues card ids: millisecond timestamps as decimal strings, strictly
/// increasing, never at or below any id already observed.
/// Largest stored id that still bounds new ids. Millisecond timestamps sit
/// far below it, so larger ids are left to themselves.
pub const ID_CEILING: i64 = i64::MAX / 2;

#[derive(Debug, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an existing id so it is never issued again. Non-numeric ids
    /// cannot collide with generated ones and are ignored, as are numeric
    /// ids above [`ID_CEILING`], which generated ids never reach.
    pub fn observe(&mut self, id: &str) {
        if let Ok(value) = id.parse::<i64>() {
            if value <= ID_CEILING {
                self.last = self.last.max(value);
            }
        }
    }

    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = if now > self.last {
            now
        } else {
            self.last.saturating_add(1)
        };
        self.last.to_string()
    }
}

/// Built-in deck used when nothing is persisted yet or the stored copy is
/// unreadable.
pub fn seed_deck() -> Vec<Card> {
    vec![
        Card {
            id: "1".to_string(),
            question: "What is the capital of France?".to_string(),
            answer: "Paris".to_string(),
            tags: vec!["Geography".to_string()],
        },
        Card {
            id: "2".to_string(),
            question: "What is 2 + 2?".to_string(),
            answer: "4".to_string(),
            tags: vec!["Math".to_string()],
        },
    ]
}
