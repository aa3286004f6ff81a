//! Flashcard deck state for Flashdeck
//!
//! This module provides:
//! - Card models, tag parsing and the built-in seed deck
//! - The deck store (card CRUD with serialized persistence)
//! - The tag-filtered view and navigation position
//! - Answer reveal state and the study session tying them together

pub mod models;
pub mod presentation;
pub mod session;
pub mod store;
pub mod view;

pub use models::*;
pub use presentation::RevealState;
pub use session::{Frame, Intent, StudySession};
pub use store::{tag_universe, DeckStore, DEFAULT_STORAGE_KEY};
pub use view::{filtered_view, ViewSelector};
