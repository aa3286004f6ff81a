//! Answer reveal state for the card on screen

/// Whether the answer of the current card is showing. Never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealState {
    revealed: bool,
}

impl RevealState {
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn hide(&mut self) {
        self.revealed = false;
    }

    /// Flip between question and answer
    pub fn toggle(&mut self) {
        self.revealed = !self.revealed;
    }
}
