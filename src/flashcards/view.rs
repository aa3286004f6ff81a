//! Filtered view over the deck and the navigation position inside it

use super::models::Card;

/// Cards carrying `filter`, or every card when there is no filter. Deck
/// order is preserved.
pub fn filtered_view<'a>(deck: &'a [Card], filter: Option<&str>) -> Vec<&'a Card> {
    match filter {
        Some(tag) => deck.iter().filter(|card| card.has_tag(tag)).collect(),
        None => deck.iter().collect(),
    }
}

/// Active filter plus the position of the current card within the
/// filtered view.
///
/// The selector never owns cards; every method takes the current deck so
/// the view is always derived from committed deck state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSelector {
    filter: Option<String>,
    /// `None` while the filtered view is empty
    position: Option<usize>,
}

impl ViewSelector {
    pub fn new(deck: &[Card]) -> Self {
        let mut view = Self::default();
        view.reclamp(deck);
        view
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn view<'a>(&self, deck: &'a [Card]) -> Vec<&'a Card> {
        filtered_view(deck, self.filter())
    }

    pub fn filtered_count(&self, deck: &[Card]) -> usize {
        match self.filter() {
            Some(tag) => deck.iter().filter(|card| card.has_tag(tag)).count(),
            None => deck.len(),
        }
    }

    pub fn current_card<'a>(&self, deck: &'a [Card]) -> Option<&'a Card> {
        let position = self.position?;
        self.view(deck).get(position).copied()
    }

    /// Change the filter and go back to the first matching card
    pub fn set_filter(&mut self, deck: &[Card], filter: Option<String>) {
        self.filter = filter;
        self.position = (self.filtered_count(deck) > 0).then_some(0);
    }

    /// Step forward. Returns `false` at the last card.
    pub fn next(&mut self, deck: &[Card]) -> bool {
        let count = self.filtered_count(deck);
        match self.position {
            Some(position) if position + 1 < count => {
                self.position = Some(position + 1);
                true
            }
            _ => false,
        }
    }

    /// Step back. Returns `false` at the first card.
    pub fn previous(&mut self) -> bool {
        match self.position {
            Some(position) if position > 0 => {
                self.position = Some(position - 1);
                true
            }
            _ => false,
        }
    }

    pub fn first(&mut self, deck: &[Card]) {
        self.position = (self.filtered_count(deck) > 0).then_some(0);
    }

    pub fn last(&mut self, deck: &[Card]) {
        self.position = self.filtered_count(deck).checked_sub(1);
    }

    /// Move to the card with `id` if it is visible under the filter.
    /// Returns `false` and leaves the position alone otherwise.
    pub fn focus(&mut self, deck: &[Card], id: &str) -> bool {
        match self.view(deck).iter().position(|card| card.id == id) {
            Some(position) => {
                self.position = Some(position);
                true
            }
            None => false,
        }
    }

    /// Bring the position back into range after the deck changed: an
    /// out-of-range position restarts at 0, an empty view has no position.
    pub fn reclamp(&mut self, deck: &[Card]) {
        let count = self.filtered_count(deck);
        self.position = match self.position {
            _ if count == 0 => None,
            Some(position) if position < count => Some(position),
            _ => Some(0),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::seed_deck;

    fn card(id: &str, tags: &[&str]) -> Card {
        Card {
            id: id.to_string(),
            question: format!("Question {}", id),
            answer: format!("Answer {}", id),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn sample_deck() -> Vec<Card> {
        vec![
            card("1", &["a"]),
            card("2", &["b"]),
            card("3", &["a", "b"]),
            card("4", &[]),
            card("5", &["a"]),
        ]
    }

    fn ids(cards: &[&Card]) -> Vec<String> {
        cards.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_filtered_view_preserves_order() {
        let deck = sample_deck();
        assert_eq!(ids(&filtered_view(&deck, Some("a"))), vec!["1", "3", "5"]);
        assert_eq!(ids(&filtered_view(&deck, Some("b"))), vec!["2", "3"]);
        assert_eq!(ids(&filtered_view(&deck, None)), vec!["1", "2", "3", "4", "5"]);
        assert!(filtered_view(&deck, Some("missing")).is_empty());
    }

    #[test]
    fn test_navigation_is_clamped() {
        let deck = sample_deck();
        let mut view = ViewSelector::new(&deck);
        assert_eq!(view.position(), Some(0));

        assert!(!view.previous());
        assert_eq!(view.position(), Some(0));

        for _ in 0..4 {
            assert!(view.next(&deck));
        }
        assert_eq!(view.position(), Some(4));
        assert!(!view.next(&deck));
        assert!(!view.next(&deck));
        assert_eq!(view.position(), Some(4));
        assert_eq!(view.current_card(&deck).map(|c| c.id.as_str()), Some("5"));
    }

    #[test]
    fn test_set_filter_resets_position() {
        let deck = sample_deck();
        let mut view = ViewSelector::new(&deck);
        view.next(&deck);
        view.next(&deck);

        view.set_filter(&deck, Some("b".to_string()));
        assert_eq!(view.position(), Some(0));
        assert_eq!(view.filtered_count(&deck), 2);
        assert_eq!(view.current_card(&deck).map(|c| c.id.as_str()), Some("2"));

        view.set_filter(&deck, Some("missing".to_string()));
        assert_eq!(view.position(), None);
        assert_eq!(view.current_card(&deck), None);
        assert!(!view.next(&deck));
        assert!(!view.previous());
    }

    #[test]
    fn test_reclamp_after_shrink() {
        let mut deck = sample_deck();
        let mut view = ViewSelector::new(&deck);
        view.last(&deck);
        assert_eq!(view.position(), Some(4));

        deck.pop();
        view.reclamp(&deck);
        assert_eq!(view.position(), Some(0));

        view.next(&deck);
        deck.remove(0);
        view.reclamp(&deck);
        assert_eq!(view.position(), Some(1));

        deck.clear();
        view.reclamp(&deck);
        assert_eq!(view.position(), None);

        deck.push(card("9", &[]));
        view.reclamp(&deck);
        assert_eq!(view.position(), Some(0));
    }

    #[test]
    fn test_focus_only_visible_cards() {
        let deck = sample_deck();
        let mut view = ViewSelector::new(&deck);
        view.set_filter(&deck, Some("a".to_string()));

        assert!(view.focus(&deck, "5"));
        assert_eq!(view.position(), Some(2));
        assert!(!view.focus(&deck, "2"));
        assert_eq!(view.position(), Some(2));
    }

    #[test]
    fn test_seed_deck_geography_filter() {
        let deck = seed_deck();
        let mut view = ViewSelector::new(&deck);

        view.set_filter(&deck, Some("Geography".to_string()));
        assert_eq!(view.filtered_count(&deck), 1);
        assert_eq!(view.position(), Some(0));
        assert_eq!(
            view.current_card(&deck).map(|c| c.question.as_str()),
            Some("What is the capital of France?")
        );

        assert!(!view.next(&deck));
        assert_eq!(view.position(), Some(0));

        view.set_filter(&deck, None);
        assert_eq!(view.filtered_count(&deck), 2);
    }
}
