//! Top-level application controller.
//!
//! Exclusively owns the card store, the deck registry, the navigator, the
//! active study session and the active card editor. Front ends read
//! snapshots through the accessors and report user intents through the
//! methods below; nothing here panics on bad input. Validation failures come
//! back as [`ValidationError`], intents the current view does not accept are
//! logged and ignored (`false`).

use std::sync::Arc;
use std::time::Instant;

use crate::browser::{self, BrowserEntry};
use crate::editor::CardEditor;
use crate::flashcards::{DeckScope, Flashcard, FlashcardStorage};
use crate::generator::{ContentGenerator, GenerationOutcome};
use crate::navigation::{self, Navigator, View};
use crate::study::StudySession;
use crate::validation::{Result, ValidationError};

pub struct Controller {
    storage: FlashcardStorage,
    navigator: Navigator,
    study: Option<StudySession>,
    editor: Option<CardEditor>,
    generator: Arc<dyn ContentGenerator>,
}

impl Controller {
    pub fn new(storage: FlashcardStorage, generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            storage,
            navigator: Navigator::new(),
            study: None,
            editor: None,
            generator,
        }
    }

    // ==================== Snapshots ====================

    pub fn storage(&self) -> &FlashcardStorage {
        &self.storage
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn view(&self) -> View {
        self.navigator.view()
    }

    pub fn study(&self) -> Option<&StudySession> {
        self.study.as_ref()
    }

    pub fn editor(&self) -> Option<&CardEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut CardEditor> {
        self.editor.as_mut()
    }

    pub fn generator(&self) -> Arc<dyn ContentGenerator> {
        Arc::clone(&self.generator)
    }

    pub fn generation_available(&self) -> bool {
        self.generator.is_available()
    }

    pub fn browser_entries(&self) -> Vec<BrowserEntry> {
        browser::browser_entries(&self.storage)
    }

    /// Cards of the deck shown in the detail view
    pub fn deck_cards(&self) -> Vec<Flashcard> {
        match self.navigator.selected_named_deck() {
            Some(name) => self.storage.cards_in(&DeckScope::Named(name.to_string())),
            None => Vec::new(),
        }
    }

    // ==================== Navigation ====================

    fn navigate(&mut self, transition: navigation::Result<()>) -> bool {
        match transition {
            Ok(()) => {
                self.sync_view();
                true
            }
            Err(e) => {
                log::warn!("Ignoring intent: {}", e);
                false
            }
        }
    }

    /// Start or drop the study session and the editor to match the view
    fn sync_view(&mut self) {
        match self.navigator.view() {
            View::StudySession => {
                if self.study.is_none() {
                    if let Some(scope) = self.navigator.selected_deck().cloned() {
                        let cards = self.storage.cards_in(&scope);
                        log::debug!("Studying {} ({} cards)", scope, cards.len());
                        self.study = Some(StudySession::new(scope, cards));
                    }
                }
            }
            _ => self.study = None,
        }

        match self.navigator.view() {
            View::CardCreate => {
                if self.editor.is_none() {
                    self.editor = Some(CardEditor::for_new(self.navigator.card_draft_seed()));
                }
            }
            View::CardEdit => {
                if self.editor.is_none() {
                    self.editor = self.navigator.card_being_edited().map(CardEditor::for_edit);
                }
            }
            _ => self.editor = None,
        }
    }

    pub fn select_deck(&mut self, scope: DeckScope) -> bool {
        let transition = self.navigator.select_deck(scope);
        self.navigate(transition)
    }

    pub fn learn(&mut self) -> bool {
        let transition = self.navigator.learn();
        self.navigate(transition)
    }

    pub fn open_create_card(&mut self) -> bool {
        let transition = self.navigator.create_card();
        self.navigate(transition)
    }

    pub fn open_create_card_in_deck(&mut self) -> bool {
        let transition = self.navigator.create_card_in_deck();
        self.navigate(transition)
    }

    /// Open the edit form for a card; unknown ids are ignored
    pub fn open_edit_card(&mut self, card_id: &str) -> bool {
        let Some(card) = self.storage.card(card_id).cloned() else {
            return false;
        };
        let transition = self.navigator.edit_card(card);
        self.navigate(transition)
    }

    pub fn cancel_form(&mut self) -> bool {
        let transition = self.navigator.cancel();
        self.navigate(transition)
    }

    pub fn back(&mut self) -> bool {
        let transition = self.navigator.back();
        self.navigate(transition)
    }

    pub fn home(&mut self) {
        self.navigator.home();
        self.sync_view();
    }

    pub fn study_favorites(&mut self) {
        // A fresh snapshot every time the tab is used
        self.study = None;
        self.navigator.study_favorites();
        self.sync_view();
    }

    // ==================== Decks ====================

    /// Create a deck from the browser's "new deck" field
    pub fn create_deck(&mut self, name: &str) -> Result<String> {
        let name = browser::validate_new_deck_name(name, &self.storage.summaries())?;
        self.storage.create_deck(&name);
        Ok(name)
    }

    /// Delete a deck and its cards. Returns the number of cards removed.
    pub fn delete_deck(&mut self, scope: &DeckScope) -> Result<usize> {
        let name = browser::validate_deck_deletion(scope)?;
        let removed = self.storage.delete_deck(name);
        self.navigator.deck_deleted(name);
        self.sync_view();
        self.sync_study();
        Ok(removed)
    }

    // ==================== Cards ====================

    /// Validate and save the open form.
    ///
    /// Returns the saved card's id (`None` if an edited card vanished in the
    /// meantime). On a validation failure the error is also shown inline and
    /// nothing changes.
    pub fn save_form(&mut self) -> Result<Option<String>> {
        let Some(editor) = self.editor.as_mut() else {
            log::warn!("Ignoring save: no form is open");
            return Ok(None);
        };

        let data = match editor.validate() {
            Ok(data) => data,
            Err(e) => {
                editor.set_error(e.to_string());
                return Err(e);
            }
        };

        let original_id = editor.card_id().map(str::to_string);
        let saved = self.storage.save_card(data, original_id.as_deref());

        let transition = self.navigator.saved();
        if self.navigate(transition) && self.navigator.view() == View::CardCreate {
            if let Some(editor) = self.editor.as_mut() {
                editor.reset_for_next();
            }
        }
        Ok(saved)
    }

    pub fn delete_card(&mut self, card_id: &str) -> bool {
        let removed = self.storage.delete_card(card_id);
        self.sync_study();
        removed
    }

    pub fn toggle_favorite(&mut self, card_id: &str) -> Option<bool> {
        let value = self.storage.toggle_favorite(card_id);
        self.sync_study();
        value
    }

    fn sync_study(&mut self) {
        if let Some(study) = self.study.as_mut() {
            study.reconcile(self.storage.cards());
        }
    }

    // ==================== Study ====================

    pub fn flip(&mut self, now: Instant) -> bool {
        self.study.as_mut().is_some_and(|s| s.flip(now))
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.study.as_mut().is_some_and(|s| s.tick(now))
    }

    pub fn next_card(&mut self) {
        if let Some(study) = self.study.as_mut() {
            study.next();
        }
    }

    pub fn previous_card(&mut self) {
        if let Some(study) = self.study.as_mut() {
            study.previous();
        }
    }

    fn current_card_id(&self) -> Option<String> {
        self.study.as_ref()?.current().map(|c| c.id.clone())
    }

    pub fn delete_current(&mut self) -> bool {
        match self.current_card_id() {
            Some(id) => self.delete_card(&id),
            None => false,
        }
    }

    pub fn toggle_favorite_current(&mut self) -> Option<bool> {
        let id = self.current_card_id()?;
        self.toggle_favorite(&id)
    }

    // ==================== Generation ====================

    /// Check the form is ready and return the (term, definition) to send
    pub fn request_generation(&mut self) -> Result<(String, String)> {
        let available = self.generator.is_available();
        match self.editor.as_mut() {
            Some(editor) => editor.begin_generation(available),
            None => Err(ValidationError::GenerationInputsMissing),
        }
    }

    /// Deliver a resolved generation to the open form, if there still is one
    pub fn apply_generation(&mut self, outcome: GenerationOutcome) {
        match self.editor.as_mut() {
            Some(editor) => editor.finish_generation(outcome.result),
            None => log::debug!("Dropping generation result: form already closed"),
        }
    }

    /// Run a generation synchronously on the calling thread
    pub fn generate_now(&mut self) -> Result<()> {
        let (term, definition) = self.request_generation()?;
        let result = self.generator.generate(&term, &definition);
        self.apply_generation(GenerationOutcome { result });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::Side;
    use crate::generator::GenerateError;
    use crate::storage::MemoryStore;

    struct FixedGenerator(Option<&'static str>);

    impl ContentGenerator for FixedGenerator {
        fn is_available(&self) -> bool {
            self.0.is_some()
        }

        fn generate(&self, _term: &str, _definition: &str) -> std::result::Result<String, GenerateError> {
            self.0
                .map(str::to_string)
                .ok_or(GenerateError::MissingCredential)
        }
    }

    fn controller() -> Controller {
        Controller::new(
            FlashcardStorage::load(Box::new(MemoryStore::new())),
            Arc::new(FixedGenerator(Some("generated"))),
        )
    }

    fn fill(c: &mut Controller, a: &str, b: &str, side_c: &str) {
        let editor = c.editor_mut().unwrap();
        editor.set_text(Side::A, a);
        editor.set_text(Side::B, b);
        editor.set_text(Side::C, side_c);
    }

    fn add_card(c: &mut Controller, deck: &str, a: &str) -> String {
        c.home();
        c.open_create_card();
        c.editor_mut().unwrap().set_deck(deck);
        fill(c, a, "b", "c");
        c.save_form().unwrap().unwrap()
    }

    #[test]
    fn test_starts_in_browser() {
        let c = controller();
        assert_eq!(c.view(), View::DeckBrowser);
        assert!(c.study().is_none());
        assert!(c.editor().is_none());
    }

    #[test]
    fn test_create_deck_validation() {
        let mut c = controller();
        assert_eq!(c.create_deck(" Math ").unwrap(), "Math");
        assert_eq!(
            c.create_deck("MATH"),
            Err(ValidationError::DuplicateDeckName("MATH".to_string()))
        );
        assert!(c.create_deck("Favorites").is_err());
        assert_eq!(c.storage().deck_names().len(), 2);
    }

    #[test]
    fn test_invalid_intent_is_ignored() {
        let mut c = controller();
        assert!(!c.learn());
        assert!(!c.back());
        assert_eq!(c.view(), View::DeckBrowser);
    }

    #[test]
    fn test_deck_scoped_entry_repeats_with_blank_draft() {
        let mut c = controller();
        c.create_deck("Math").unwrap();
        c.select_deck(DeckScope::Named("Math".to_string()));
        assert!(c.open_create_card_in_deck());
        assert!(c.editor().unwrap().is_deck_locked());

        fill(&mut c, "1", "2", "3");
        c.save_form().unwrap();

        assert_eq!(c.view(), View::CardCreate);
        let editor = c.editor().unwrap();
        assert_eq!(editor.draft().deck, "Math");
        assert!(!editor.draft().side_a.has_content());
        assert!(editor.notice().is_some());
        assert_eq!(c.deck_cards().len(), 1);

        c.cancel_form();
        assert_eq!(c.view(), View::DeckDetail);
        assert!(c.editor().is_none());
    }

    #[test]
    fn test_global_create_cancelled_from_detail_goes_home() {
        let mut c = controller();
        c.create_deck("Math").unwrap();
        c.select_deck(DeckScope::Named("Math".to_string()));
        assert!(c.open_create_card());

        c.cancel_form();
        assert_eq!(c.view(), View::DeckBrowser);
        assert!(c.navigator().selected_deck().is_none());
        assert!(c.editor().is_none());
    }

    #[test]
    fn test_save_into_reserved_deck_any_case_is_rejected() {
        let mut c = controller();
        c.open_create_card();
        c.editor_mut().unwrap().set_deck("favorites");
        fill(&mut c, "a", "b", "c");

        assert_eq!(
            c.save_form(),
            Err(ValidationError::ReservedDeckName("favorites".to_string()))
        );
        assert!(c.storage().cards().is_empty());
        assert_eq!(c.storage().deck_names(), ["Default".to_string()]);
    }

    #[test]
    fn test_invalid_save_sets_inline_error() {
        let mut c = controller();
        c.open_create_card();
        fill(&mut c, "a", "b", "");

        assert_eq!(c.save_form(), Err(ValidationError::IncompleteSides));
        assert_eq!(c.view(), View::CardCreate);
        assert!(c.editor().unwrap().error().is_some());
        assert!(c.storage().cards().is_empty());
    }

    #[test]
    fn test_edit_flow() {
        let mut c = controller();
        let id = add_card(&mut c, "Math", "old");

        c.select_deck(DeckScope::Named("Math".to_string()));
        assert!(c.open_edit_card(&id));
        assert!(!c.open_edit_card("missing"));
        c.editor_mut().unwrap().set_text(Side::A, "new");
        assert_eq!(c.save_form().unwrap(), Some(id.clone()));

        assert_eq!(c.view(), View::DeckDetail);
        assert_eq!(c.storage().card(&id).unwrap().side_a.text_or_empty(), "new");
    }

    #[test]
    fn test_delete_selected_deck_returns_to_browser() {
        let mut c = controller();
        add_card(&mut c, "Math", "a");
        c.select_deck(DeckScope::Named("Math".to_string()));

        assert_eq!(c.delete_deck(&DeckScope::Named("Math".to_string())), Ok(1));
        assert_eq!(c.view(), View::DeckBrowser);
        assert!(c.storage().cards().is_empty());
        assert!(c.delete_deck(&DeckScope::Named("Default".to_string())).is_err());
    }

    #[test]
    fn test_study_session_lifecycle() {
        let mut c = controller();
        add_card(&mut c, "Math", "a");
        add_card(&mut c, "Math", "b");

        c.select_deck(DeckScope::Named("Math".to_string()));
        c.learn();
        assert_eq!(c.study().unwrap().len(), 2);

        c.next_card();
        assert_eq!(c.study().unwrap().current_index(), 1);
        assert!(c.delete_current());
        assert_eq!(c.study().unwrap().current_index(), 0);
        assert!(c.delete_current());
        assert!(c.study().unwrap().is_empty());
        assert!(!c.delete_current());

        c.back();
        assert_eq!(c.view(), View::DeckDetail);
        assert!(c.study().is_none());
    }

    #[test]
    fn test_flip_through_controller() {
        let mut c = controller();
        add_card(&mut c, "Math", "a");
        c.select_deck(DeckScope::AllCards);

        let t0 = Instant::now();
        assert!(c.flip(t0));
        assert!(!c.flip(t0));
        assert!(c.tick(t0 + crate::study::FLIP_DURATION));
        assert_eq!(c.study().unwrap().current_side(), Side::B);
    }

    #[test]
    fn test_favorites_snapshot_is_not_refiltered() {
        let mut c = controller();
        let id = add_card(&mut c, "Math", "a");
        c.toggle_favorite(&id);

        c.study_favorites();
        assert_eq!(c.study().unwrap().len(), 1);
        assert_eq!(c.toggle_favorite_current(), Some(false));
        assert_eq!(c.study().unwrap().len(), 1);
        assert!(!c.study().unwrap().cards()[0].is_favorite);

        c.home();
        c.study_favorites();
        assert!(c.study().unwrap().is_empty());
    }

    #[test]
    fn test_generation_through_controller() {
        let mut c = controller();
        c.open_create_card();
        fill(&mut c, "term", "definition", "");

        c.generate_now().unwrap();
        assert_eq!(c.editor().unwrap().draft().side_c.text_or_empty(), "generated");
        assert!(!c.editor().unwrap().is_generating());
    }

    #[test]
    fn test_generation_unavailable() {
        let mut c = Controller::new(
            FlashcardStorage::load(Box::new(MemoryStore::new())),
            Arc::new(FixedGenerator(None)),
        );
        c.open_create_card();
        fill(&mut c, "term", "definition", "");

        assert_eq!(c.generate_now(), Err(ValidationError::GenerationUnavailable));
        assert!(c.editor().unwrap().error().is_some());
    }

    #[test]
    fn test_late_generation_after_close_is_dropped() {
        let mut c = controller();
        c.open_create_card();
        fill(&mut c, "term", "definition", "");
        c.request_generation().unwrap();
        c.cancel_form();

        c.apply_generation(GenerationOutcome {
            result: Ok("late".to_string()),
        });
        assert!(c.editor().is_none());
    }
}
