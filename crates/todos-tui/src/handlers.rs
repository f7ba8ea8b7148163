//! Keyboard event handling.

use crate::app::{App, AppState, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use todos_core::StorageBackend;

/// Handle a key event. Returns true if the app should quit.
pub fn handle_key<B: StorageBackend>(app: &mut App<B>, key: KeyEvent) -> bool {
    match app.input_mode() {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Form => handle_form_key(app, key),
    }
}

fn handle_normal_key<B: StorageBackend>(app: &mut App<B>, key: KeyEvent) -> bool {
    // Ctrl+C to quit
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.state = AppState::Quit;
        return true;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.state = AppState::Quit;
            true
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            false
        }
        KeyCode::Char('n') => {
            app.open_create();
            false
        }
        KeyCode::Char('e') | KeyCode::Enter => {
            app.open_edit_selected();
            false
        }
        KeyCode::Char('d') | KeyCode::Delete => {
            app.delete_selected();
            false
        }
        KeyCode::Char(' ') => {
            app.toggle_selected();
            false
        }
        _ => false,
    }
}

fn handle_form_key<B: StorageBackend>(app: &mut App<B>, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.cancel_form();
            false
        }
        KeyCode::Enter => {
            app.submit_form();
            false
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.next_field();
            false
        }
        KeyCode::Backspace => {
            app.pop_char();
            false
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.push_char(c);
            false
        }
        _ => false,
    }
}
