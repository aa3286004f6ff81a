use std::path::Path;

use anyhow::{bail, Context, Result};

use flashdeck_lib::config::FlashdeckConfig;
use flashdeck_lib::flashcards::{Card, StudySession};

/// Shared application state for CLI commands
pub struct App {
    pub config: FlashdeckConfig,
    pub session: StudySession,
}

impl App {
    /// Load config and hydrate the deck
    pub async fn new(config_path: Option<&Path>) -> Result<Self> {
        let config = FlashdeckConfig::load_or_default(config_path)
            .context("Failed to load configuration")?;
        let session = flashdeck_lib::open_session(&config)
            .await
            .context("Failed to open deck")?;

        Ok(Self { config, session })
    }

    /// Find a card by id (exact match, then unique prefix match)
    pub fn find_card(&self, id: &str) -> Result<Card> {
        let cards = self.session.deck().cards();

        if let Some(card) = cards.iter().find(|c| c.id == id) {
            return Ok(card.clone());
        }

        let matches: Vec<&Card> = cards.iter().filter(|c| c.id.starts_with(id)).collect();

        match matches.len() {
            0 => bail!("No card with id '{}'", id),
            1 => Ok(matches[0].clone()),
            _ => bail!("Ambiguous card id '{}'. Matches:\n{}", id,
                matches.iter().map(|c| format!("  - {}  {}", c.id, c.question)).collect::<Vec<_>>().join("\n")),
        }
    }

    /// Wait for pending writes before exiting
    pub async fn finish(&self) {
        match self.session.flush().await {
            Ok(status) => {
                if let Some(err) = status.last_error {
                    log::error!("Latest deck changes were not saved: {}", err);
                }
            }
            Err(e) => log::error!("Failed to flush deck: {}", e),
        }
    }
}

/// Render tags as `#tag` labels
pub fn format_tags(tags: &[String]) -> String {
    tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" ")
}
