use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app_state::{Mode, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Green).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let hints = match state.mode {
        Mode::Study => " Space: flip  l/h: next/prev  f: filter  a: add  e: edit  d: delete  t: theme  ?: help  q: quit ",
        Mode::Form(_) => " Tab: next field  Enter: save  Esc: cancel ",
        Mode::ConfirmDelete { .. } => " y: delete  any other key: cancel ",
    };

    let status = Paragraph::new(hints)
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
