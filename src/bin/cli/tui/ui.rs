use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use flashdeck_lib::config::Theme;

use super::app_state::{Mode, TuiState};
use super::{card_widget, form_widget, status_bar};

/// Foreground/background pair for the active theme
pub fn base_style(theme: Theme) -> Style {
    match theme {
        Theme::Light => Style::default().bg(Color::White).fg(Color::Black),
        Theme::Dark => Style::default().bg(Color::Black).fg(Color::White),
    }
}

pub fn accent(theme: Theme) -> Color {
    match theme {
        Theme::Light => Color::Blue,
        Theme::Dark => Color::Cyan,
    }
}

pub fn draw(f: &mut Frame, state: &TuiState) {
    let size = f.area();
    f.render_widget(Block::default().style(base_style(state.theme)), size);

    // Main layout: card area + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    card_widget::draw(f, outer[0], state);
    status_bar::draw(f, outer[1], state);

    match &state.mode {
        Mode::Form(form) => form_widget::draw(f, size, form, state.theme),
        Mode::ConfirmDelete { .. } => draw_confirm(f, size, state),
        Mode::Study if state.show_help => draw_help(f, size, state.theme),
        Mode::Study => {}
    }
}

/// Centered rectangle of the given size, clipped to `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_confirm(f: &mut Frame, area: Rect, state: &TuiState) {
    let question = state
        .app
        .session
        .current_card()
        .map(|c| c.question.clone())
        .unwrap_or_default();

    let popup = centered(area, 60, 5);
    f.render_widget(Clear, popup);

    let text = vec![
        Line::from(format!(" Delete \"{}\"?", question)),
        Line::from(""),
        Line::from(Span::styled(" y: delete   any other key: cancel", Style::default().fg(Color::DarkGray))),
    ];
    let block = Block::default()
        .title(" Confirm ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    f.render_widget(Paragraph::new(text).block(block).style(base_style(state.theme)), popup);
}

fn draw_help(f: &mut Frame, area: Rect, theme: Theme) {
    let lines = [
        "Space/Enter  flip card",
        "r            reveal answer",
        "l/j/Right    next card",
        "h/k/Left     previous card",
        "g/G          first/last card",
        "f            next tag filter",
        "F            show all cards",
        "a            add card",
        "e            edit card",
        "d            delete card",
        "t            toggle theme",
        "q/Esc        quit",
    ];

    let popup = centered(area, 40, lines.len() as u16 + 2);
    f.render_widget(Clear, popup);

    let text: Vec<Line> = lines.iter().map(|l| Line::from(format!(" {}", l))).collect();
    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent(theme)));
    f.render_widget(Paragraph::new(text).block(block).style(base_style(theme)), popup);
}
