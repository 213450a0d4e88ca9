use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use tricard_lib::flashcards::{DeckScope, Side};
use tricard_lib::generator::{self, GenerationOutcome};
use tricard_lib::navigation::View;

use crate::app::App;

/// Input sub-modes layered over the controller's current view
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    NewDeck,
    ImagePath(Side),
    Confirm(PendingDelete),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PendingDelete {
    Deck(DeckScope),
    Card(String),
}

/// The form field receiving typed text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Deck,
    Side(Side),
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Deck,
        FormField::Side(Side::A),
        FormField::Side(Side::B),
        FormField::Side(Side::C),
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }
}

pub struct TuiState {
    pub app: App,
    pub mode: Mode,

    // List selections
    pub browser_selected: usize,
    pub detail_selected: usize,

    // Card form
    pub form_field: FormField,

    // Input mode state (for NewDeck / ImagePath)
    pub input_text: String,
    pub flash_message: Option<String>,

    // Generation round trips
    generation_tx: Sender<GenerationOutcome>,
    generation_rx: Receiver<GenerationOutcome>,

    pub quit: bool,
}

impl TuiState {
    pub fn new(app: App) -> Self {
        let (generation_tx, generation_rx) = mpsc::channel();
        Self {
            app,
            mode: Mode::Normal,
            browser_selected: 0,
            detail_selected: 0,
            form_field: FormField::Side(Side::A),
            input_text: String::new(),
            flash_message: None,
            generation_tx,
            generation_rx,
            quit: false,
        }
    }

    pub fn view(&self) -> View {
        self.app.controller.view()
    }

    /// Per-iteration housekeeping: finish flips and deliver generations
    pub fn on_tick(&mut self, now: Instant) {
        self.app.controller.tick(now);
        while let Ok(outcome) = self.generation_rx.try_recv() {
            self.app.controller.apply_generation(outcome);
        }
    }

    // ==================== Tabs ====================

    pub fn go_decks(&mut self) {
        self.app.controller.home();
        self.reset_input();
    }

    pub fn go_create_card(&mut self) {
        // The global entry is only accepted from the browser or a deck
        if !matches!(self.view(), View::DeckBrowser | View::DeckDetail) {
            self.app.controller.home();
        }
        if self.app.controller.open_create_card() {
            self.form_field = FormField::Deck;
        }
        self.reset_input();
    }

    pub fn go_favorites(&mut self) {
        self.app.controller.study_favorites();
        self.reset_input();
    }

    fn reset_input(&mut self) {
        self.mode = Mode::Normal;
        self.input_text.clear();
    }

    // ==================== Deck browser ====================

    pub fn browser_len(&self) -> usize {
        self.app.controller.browser_entries().len()
    }

    pub fn browser_move(&mut self, delta: isize) {
        self.browser_selected = step(self.browser_selected, delta, self.browser_len());
    }

    pub fn open_selected_deck(&mut self) {
        let entries = self.app.controller.browser_entries();
        if let Some(entry) = entries.get(self.browser_selected) {
            if self.app.controller.select_deck(entry.scope.clone()) {
                self.detail_selected = 0;
            }
        }
    }

    pub fn create_deck_from_input(&mut self) {
        match self.app.controller.create_deck(&self.input_text) {
            Ok(name) => {
                self.flash_message = Some(format!("Created deck \"{}\"", name));
                self.reset_input();
            }
            Err(e) => self.flash_message = Some(e.to_string()),
        }
    }

    pub fn ask_delete_selected_deck(&mut self) {
        let entries = self.app.controller.browser_entries();
        if let Some(entry) = entries.get(self.browser_selected) {
            if entry.deletable {
                self.mode = Mode::Confirm(PendingDelete::Deck(entry.scope.clone()));
            } else {
                self.flash_message = Some(format!("The \"{}\" deck cannot be deleted.", entry.name()));
            }
        }
    }

    pub fn confirm_delete(&mut self) {
        let Mode::Confirm(pending) = std::mem::replace(&mut self.mode, Mode::Normal) else {
            return;
        };

        match pending {
            PendingDelete::Deck(scope) => match self.app.controller.delete_deck(&scope) {
                Ok(removed) => {
                    self.flash_message =
                        Some(format!("Deleted deck \"{}\" and {} card(s)", scope, removed));
                    self.browser_selected = self.browser_selected.min(self.browser_len().saturating_sub(1));
                }
                Err(e) => self.flash_message = Some(e.to_string()),
            },
            PendingDelete::Card(id) => {
                self.app.controller.delete_card(&id);
                let len = self.app.controller.deck_cards().len();
                self.detail_selected = self.detail_selected.min(len.saturating_sub(1));
            }
        }
    }

    // ==================== Deck detail ====================

    pub fn detail_move(&mut self, delta: isize) {
        let len = self.app.controller.deck_cards().len();
        self.detail_selected = step(self.detail_selected, delta, len);
    }

    fn selected_card_id(&self) -> Option<String> {
        self.app
            .controller
            .deck_cards()
            .get(self.detail_selected)
            .map(|c| c.id.clone())
    }

    pub fn learn(&mut self) {
        if self.app.controller.deck_cards().is_empty() {
            self.flash_message = Some("This deck has no cards yet.".to_string());
            return;
        }
        self.app.controller.learn();
    }

    pub fn add_card_to_deck(&mut self) {
        if self.app.controller.open_create_card_in_deck() {
            self.form_field = FormField::Side(Side::A);
        }
    }

    pub fn edit_selected_card(&mut self) {
        if let Some(id) = self.selected_card_id() {
            if self.app.controller.open_edit_card(&id) {
                self.form_field = FormField::Side(Side::A);
            }
        }
    }

    pub fn toggle_favorite_selected(&mut self) {
        if let Some(id) = self.selected_card_id() {
            self.app.controller.toggle_favorite(&id);
        }
    }

    pub fn ask_delete_selected_card(&mut self) {
        if let Some(id) = self.selected_card_id() {
            self.mode = Mode::Confirm(PendingDelete::Card(id));
        }
    }

    pub fn ask_delete_current_card(&mut self) {
        let id = self
            .app
            .controller
            .study()
            .and_then(|s| s.current())
            .map(|c| c.id.clone());
        if let Some(id) = id {
            self.mode = Mode::Confirm(PendingDelete::Card(id));
        }
    }

    // ==================== Card form ====================

    pub fn form_type(&mut self, c: char) {
        let field = self.form_field;
        if let Some(editor) = self.app.controller.editor_mut() {
            match field {
                FormField::Deck => {
                    let mut deck = editor.draft().deck.clone();
                    deck.push(c);
                    editor.set_deck(&deck);
                }
                FormField::Side(side) => {
                    let mut text = editor.draft().face(side).text_or_empty().to_string();
                    text.push(c);
                    editor.set_text(side, &text);
                }
            }
        }
    }

    pub fn form_backspace(&mut self) {
        let field = self.form_field;
        if let Some(editor) = self.app.controller.editor_mut() {
            match field {
                FormField::Deck => {
                    let mut deck = editor.draft().deck.clone();
                    deck.pop();
                    editor.set_deck(&deck);
                }
                FormField::Side(side) => {
                    let mut text = editor.draft().face(side).text_or_empty().to_string();
                    text.pop();
                    editor.set_text(side, &text);
                }
            }
        }
    }

    /// Complete the deck field with the first existing deck it prefixes
    pub fn complete_deck(&mut self) {
        let suggestion = self.deck_suggestions().into_iter().next();
        if let (Some(name), Some(editor)) = (suggestion, self.app.controller.editor_mut()) {
            editor.set_deck(&name);
        }
    }

    /// Existing deck names matching what was typed in the deck field
    pub fn deck_suggestions(&self) -> Vec<String> {
        let Some(editor) = self.app.controller.editor() else {
            return Vec::new();
        };
        if editor.is_deck_locked() {
            return Vec::new();
        }

        let typed = editor.draft().deck.to_lowercase();
        self.app
            .controller
            .storage()
            .summaries()
            .into_iter()
            .map(|s| s.name)
            .filter(|name| name.to_lowercase().starts_with(&typed) && name.to_lowercase() != typed)
            .collect()
    }

    pub fn save_form(&mut self) {
        let was_edit = self.view() == View::CardEdit;
        match self.app.controller.save_form() {
            Ok(_) => {
                if self.view() == View::CardCreate {
                    self.form_field = FormField::Side(Side::A);
                } else {
                    self.flash_message = Some(if was_edit {
                        "Card updated".to_string()
                    } else {
                        "Card added".to_string()
                    });
                }
            }
            // Shown inline by the form
            Err(e) => log::debug!("Card not saved: {}", e),
        }
    }

    pub fn request_generation(&mut self) {
        if let Ok((term, definition)) = self.app.controller.request_generation() {
            generator::spawn_generation(
                self.app.controller.generator(),
                term,
                definition,
                self.generation_tx.clone(),
            );
        }
    }

    pub fn start_image_input(&mut self) {
        if let FormField::Side(side) = self.form_field {
            self.mode = Mode::ImagePath(side);
            self.input_text.clear();
        }
    }

    pub fn attach_image_from_input(&mut self) {
        let Mode::ImagePath(side) = self.mode else {
            return;
        };
        let path = PathBuf::from(self.input_text.trim());
        if let Some(editor) = self.app.controller.editor_mut() {
            // Failures are shown inline by the form
            if editor.attach_image_file(side, &path).is_ok() {
                self.flash_message = Some(format!("Attached image to side {}", side));
            }
        }
        self.reset_input();
    }

    pub fn remove_image(&mut self) {
        if let FormField::Side(side) = self.form_field {
            if let Some(editor) = self.app.controller.editor_mut() {
                editor.remove_image(side);
            }
        }
    }

    pub fn cancel_form(&mut self) {
        self.app.controller.cancel_form();
    }
}

/// Move a list cursor by `delta`, clamped to `[0, len)`
fn step(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = current as isize + delta;
    next.clamp(0, len as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clamps() {
        assert_eq!(step(0, -1, 3), 0);
        assert_eq!(step(1, 1, 3), 2);
        assert_eq!(step(2, 1, 3), 2);
        assert_eq!(step(5, 1, 0), 0);
    }

    #[test]
    fn test_form_field_cycle() {
        assert_eq!(FormField::Deck.next(), FormField::Side(Side::A));
        assert_eq!(FormField::Side(Side::C).next(), FormField::Deck);
        assert_eq!(FormField::Deck.previous(), FormField::Side(Side::C));
    }
}
