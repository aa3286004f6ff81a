use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use flashdeck_lib::config::Theme;

use super::app_state::{CardForm, FORM_FIELDS};
use super::ui::{accent, base_style, centered};

pub fn draw(f: &mut Frame, area: Rect, form: &CardForm, theme: Theme) {
    let popup = centered(area, 70, FORM_FIELDS.len() as u16 * 2 + 3);
    f.render_widget(Clear, popup);

    let title = if form.editing.is_some() { " Edit card " } else { " New card " };

    let mut text = vec![Line::from("")];
    for (i, label) in FORM_FIELDS.iter().enumerate() {
        let focused = i == form.focus;
        let label_style = if focused {
            Style::default().fg(accent(theme)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let cursor = if focused { "\u{2588}" } else { "" };
        text.push(Line::from(vec![
            Span::styled(format!(" {:<9}", label), label_style),
            Span::raw(format!("{}{}", form.fields[i], cursor)),
        ]));
        text.push(Line::from(""));
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent(theme)));
    f.render_widget(Paragraph::new(text).block(block).style(base_style(theme)), popup);
}
