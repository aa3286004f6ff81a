use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::TuiState;
use super::ui::{accent, base_style};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let frame = state.app.session.frame();

    let filter = frame.filter.as_deref().map(|t| format!("#{}", t)).unwrap_or_else(|| "All".to_string());
    let title = match frame.position {
        Some(position) => format!(" {}  {}/{} ", filter, position + 1, frame.filtered_count),
        None => format!(" {}  0/0 ", filter),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent(state.theme)));

    let Some(card) = frame.current else {
        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No cards to show.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Press a to add a card, F to show all cards.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(help_text).block(block).style(base_style(state.theme)), area);
        return;
    };

    let mut text = vec![
        Line::from(""),
        Line::from(Span::styled(card.question, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
    ];
    if frame.revealed {
        text.push(Line::from(Span::styled(card.answer, Style::default().fg(Color::Green))));
    } else {
        text.push(Line::from(Span::styled(
            "Press Space to reveal the answer",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }
    if !card.tags.is_empty() {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            card.tags.iter().map(|t| format!("#{}", t)).collect::<Vec<_>>().join(" "),
            Style::default().fg(Color::Magenta),
        )));
    }

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(base_style(state.theme))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
