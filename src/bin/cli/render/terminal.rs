//! Plain-terminal rendering of cards with optional ANSI styling

use flashdeck_lib::flashcards::Card;

use crate::app::format_tags;

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
}

fn styled(text: &str, style: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", style, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// One-line summary used by `list`
pub fn render_summary(position: usize, card: &Card, use_color: bool) -> String {
    let mut line = format!(
        "{:>3}. {}  {}",
        position + 1,
        styled(&card.id, Color::DIM, use_color),
        card.question
    );
    if !card.tags.is_empty() {
        line.push_str("  ");
        line.push_str(&styled(&format_tags(&card.tags), Color::DIM, use_color));
    }
    line
}

/// Full card: question, answer and tags
pub fn render_card(card: &Card, use_color: bool) -> String {
    let mut lines = vec![
        styled(&card.question, Color::BOLD, use_color),
        String::new(),
        styled(&card.answer, Color::GREEN, use_color),
    ];
    if !card.tags.is_empty() {
        lines.push(String::new());
        lines.push(styled(&format_tags(&card.tags), Color::DIM, use_color));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Card {
        Card {
            id: "42".to_string(),
            question: "Q?".to_string(),
            answer: "A.".to_string(),
            tags: vec!["x".to_string(), "y".to_string()],
        }
    }

    #[test]
    fn test_plain_rendering_has_no_escape_codes() {
        assert_eq!(render_summary(0, &card(), false), "  1. 42  Q?  #x #y");
        assert_eq!(render_card(&card(), false), "Q?\n\nA.\n\n#x #y");
    }

    #[test]
    fn test_colored_rendering() {
        let rendered = render_card(&card(), true);
        assert!(rendered.starts_with(Color::BOLD));
        assert!(rendered.contains(Color::RESET));
    }
}
