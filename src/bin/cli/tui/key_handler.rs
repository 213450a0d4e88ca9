use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tricard_lib::navigation::View;

use super::app_state::{Mode, TuiState};

pub fn handle_key(state: &mut TuiState, key: KeyEvent) {
    // Clear flash message on any keypress
    state.flash_message = None;

    match state.mode {
        Mode::NewDeck | Mode::ImagePath(_) => return handle_input_key(state, key),
        Mode::Confirm(_) => return handle_confirm_key(state, key),
        Mode::Normal => {}
    }

    // Tabs work from every view
    match key.code {
        KeyCode::F(1) => return state.go_decks(),
        KeyCode::F(2) => return state.go_create_card(),
        KeyCode::F(3) => return state.go_favorites(),
        _ => {}
    }

    match state.view() {
        View::DeckBrowser => handle_browser_key(state, key),
        View::DeckDetail => handle_detail_key(state, key),
        View::CardCreate | View::CardEdit => handle_form_key(state, key),
        View::StudySession => handle_study_key(state, key),
    }
}

fn handle_browser_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.quit = true,
        KeyCode::Char('j') | KeyCode::Down => state.browser_move(1),
        KeyCode::Char('k') | KeyCode::Up => state.browser_move(-1),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => state.open_selected_deck(),
        KeyCode::Char('n') => {
            state.mode = Mode::NewDeck;
            state.input_text.clear();
        }
        KeyCode::Char('d') => state.ask_delete_selected_deck(),
        KeyCode::Char('c') => state.go_create_card(),
        KeyCode::Char('f') => state.go_favorites(),
        _ => {}
    }
}

fn handle_detail_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.quit = true,
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left => {
            state.app.controller.back();
        }
        KeyCode::Char('j') | KeyCode::Down => state.detail_move(1),
        KeyCode::Char('k') | KeyCode::Up => state.detail_move(-1),
        KeyCode::Char('l') | KeyCode::Enter => state.learn(),
        KeyCode::Char('a') => state.add_card_to_deck(),
        KeyCode::Char('c') => state.go_create_card(),
        KeyCode::Char('e') => state.edit_selected_card(),
        KeyCode::Char('s') => state.toggle_favorite_selected(),
        KeyCode::Char('x') => state.ask_delete_selected_card(),
        _ => {}
    }
}

fn handle_study_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => state.quit = true,
        KeyCode::Esc | KeyCode::Backspace => {
            state.app.controller.back();
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            state.app.controller.flip(Instant::now());
        }
        KeyCode::Char('l') | KeyCode::Right => state.app.controller.next_card(),
        KeyCode::Char('h') | KeyCode::Left => state.app.controller.previous_card(),
        KeyCode::Char('s') => {
            state.app.controller.toggle_favorite_current();
        }
        KeyCode::Char('x') => state.ask_delete_current_card(),
        _ => {}
    }
}

/// The card form takes plain characters as text, so its commands use Ctrl
fn handle_form_key(state: &mut TuiState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => state.save_form(),
            KeyCode::Char('g') => state.request_generation(),
            KeyCode::Char('o') => state.start_image_input(),
            KeyCode::Char('x') => state.remove_image(),
            KeyCode::Char('n') => state.complete_deck(),
            _ => {}
        }
        return;
    }

    if let Some(editor) = state.app.controller.editor_mut() {
        editor.clear_messages();
    }

    match key.code {
        KeyCode::Esc => state.cancel_form(),
        KeyCode::Tab | KeyCode::Down => state.form_field = state.form_field.next(),
        KeyCode::BackTab | KeyCode::Up => state.form_field = state.form_field.previous(),
        KeyCode::Enter => state.form_type('\n'),
        KeyCode::Backspace => state.form_backspace(),
        KeyCode::Char(c) => state.form_type(c),
        _ => {}
    }
}

fn handle_input_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.input_text.clear();
            state.mode = Mode::Normal;
        }
        KeyCode::Enter => match state.mode {
            Mode::NewDeck => state.create_deck_from_input(),
            Mode::ImagePath(_) => state.attach_image_from_input(),
            _ => {}
        },
        KeyCode::Backspace => {
            state.input_text.pop();
        }
        KeyCode::Char(c) => {
            state.input_text.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_key(state: &mut TuiState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => state.confirm_delete(),
        _ => state.mode = Mode::Normal,
    }
}
