use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app_state::{Mode, TuiState};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    match state.mode {
        Mode::Study => handle_study_key(state, key),
        Mode::Form(_) => handle_form_key(state, key),
        Mode::ConfirmDelete { .. } => handle_confirm_key(state, key),
    }
}

fn handle_study_key(state: &mut TuiState, key: KeyEvent) {
    if state.show_help {
        // Any key closes help
        state.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
        KeyCode::Char(' ') | KeyCode::Enter => state.app.session.flip(),
        KeyCode::Char('r') => state.app.session.reveal(),
        KeyCode::Char('l') | KeyCode::Char('j') | KeyCode::Right | KeyCode::Down => {
            state.app.session.next();
        }
        KeyCode::Char('h') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Up => {
            state.app.session.previous();
        }
        KeyCode::Char('g') | KeyCode::Home => state.app.session.first(),
        KeyCode::Char('G') | KeyCode::End => state.app.session.last(),
        KeyCode::Char('f') => state.cycle_filter(),
        KeyCode::Char('F') => state.clear_filter(),
        KeyCode::Char('a') => state.open_add_form(),
        KeyCode::Char('e') => state.open_edit_form(),
        KeyCode::Char('d') => state.ask_delete(),
        KeyCode::Char('t') => state.toggle_theme(),
        KeyCode::Char('?') => state.show_help = true,
        _ => {}
    }
}

fn handle_form_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => state.cancel(),
        KeyCode::Enter => state.submit_form(),
        _ => {
            let Mode::Form(form) = &mut state.mode else {
                return;
            };
            match key.code {
                KeyCode::Tab | KeyCode::Down => form.focus_next(),
                KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
                KeyCode::Backspace => {
                    form.input().pop();
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    form.input().clear();
                }
                KeyCode::Char(c) => form.input().push(c),
                _ => {}
            }
        }
    }
}

fn handle_confirm_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => state.confirm_delete(),
        _ => state.cancel(),
    }
}
