//! Navigation Controller
//!
//! A strict finite-state machine selecting the active screen and the entity
//! in focus. Every transition is synchronous and driven by one intent.
//! An intent the current view does not accept is rejected with
//! [`NavigationError::InvalidTransition`] and leaves the state untouched.

use std::fmt;

use thiserror::Error;

use crate::flashcards::{DeckScope, Flashcard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    DeckBrowser,
    DeckDetail,
    CardCreate,
    CardEdit,
    StudySession,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            View::DeckBrowser => "deck browser",
            View::DeckDetail => "deck detail",
            View::CardCreate => "card create",
            View::CardEdit => "card edit",
            View::StudySession => "study session",
        };
        f.write_str(s)
    }
}

/// Where a card-creation form was opened from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationOrigin {
    /// Top-level "create card" entry, no deck preseeded
    #[default]
    Global,
    /// "Add card" inside a deck; saving keeps the form open for the next card
    DeckScoped,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum NavigationError {
    #[error("cannot {intent} from the {from}")]
    InvalidTransition { from: View, intent: &'static str },
}

pub type Result<T> = std::result::Result<T, NavigationError>;

/// Transient navigation state. Never persisted.
#[derive(Debug, Clone)]
pub struct Navigator {
    view: View,
    selected_deck: Option<DeckScope>,
    card_being_edited: Option<Flashcard>,
    card_draft_seed: Option<String>,
    creation_origin: CreationOrigin,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            view: View::DeckBrowser,
            selected_deck: None,
            card_being_edited: None,
            card_draft_seed: None,
            creation_origin: CreationOrigin::Global,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_deck(&self) -> Option<&DeckScope> {
        self.selected_deck.as_ref()
    }

    pub fn card_being_edited(&self) -> Option<&Flashcard> {
        self.card_being_edited.as_ref()
    }

    pub fn card_draft_seed(&self) -> Option<&str> {
        self.card_draft_seed.as_deref()
    }

    pub fn creation_origin(&self) -> CreationOrigin {
        self.creation_origin
    }

    /// Name of the selected real deck, if the selection is one
    pub fn selected_named_deck(&self) -> Option<&str> {
        match &self.selected_deck {
            Some(DeckScope::Named(name)) => Some(name),
            _ => None,
        }
    }

    fn expect_view(&self, allowed: &[View], intent: &'static str) -> Result<()> {
        if allowed.contains(&self.view) {
            Ok(())
        } else {
            Err(NavigationError::InvalidTransition {
                from: self.view,
                intent,
            })
        }
    }

    fn to_browser(&mut self) {
        self.view = View::DeckBrowser;
        self.selected_deck = None;
        self.clear_form();
    }

    fn clear_form(&mut self) {
        self.card_being_edited = None;
        self.card_draft_seed = None;
    }

    /// Open a deck: real decks show their detail, virtual decks go straight to study.
    pub fn select_deck(&mut self, scope: DeckScope) -> Result<()> {
        self.expect_view(&[View::DeckBrowser], "select a deck")?;
        self.view = if scope.is_virtual() {
            View::StudySession
        } else {
            View::DeckDetail
        };
        self.selected_deck = Some(scope);
        Ok(())
    }

    /// Study the selected deck
    pub fn learn(&mut self) -> Result<()> {
        self.expect_view(&[View::DeckDetail], "learn")?;
        self.view = View::StudySession;
        Ok(())
    }

    /// Open the creation form seeded with the selected deck
    pub fn create_card_in_deck(&mut self) -> Result<()> {
        self.expect_view(&[View::DeckDetail], "add a card to the deck")?;
        self.card_draft_seed = self.selected_named_deck().map(str::to_string);
        self.card_being_edited = None;
        self.creation_origin = CreationOrigin::DeckScoped;
        self.view = View::CardCreate;
        Ok(())
    }

    /// Open the creation form from the global entry point, no deck preseeded
    pub fn create_card(&mut self) -> Result<()> {
        self.expect_view(&[View::DeckBrowser, View::DeckDetail], "create a card")?;
        self.card_draft_seed = None;
        self.card_being_edited = None;
        self.creation_origin = CreationOrigin::Global;
        self.view = View::CardCreate;
        Ok(())
    }

    /// Open the edit form carrying a snapshot of the card
    pub fn edit_card(&mut self, card: Flashcard) -> Result<()> {
        self.expect_view(&[View::DeckDetail], "edit a card")?;
        self.card_being_edited = Some(card);
        self.card_draft_seed = None;
        self.view = View::CardEdit;
        Ok(())
    }

    /// A form was saved successfully.
    ///
    /// Deck-scoped creation stays on the form for the next card; everything
    /// else returns to the deck detail when a real deck is selected.
    pub fn saved(&mut self) -> Result<()> {
        self.expect_view(&[View::CardCreate, View::CardEdit], "save")?;
        if self.view == View::CardCreate && self.creation_origin == CreationOrigin::DeckScoped {
            return Ok(());
        }

        if self.selected_named_deck().is_some() {
            self.view = View::DeckDetail;
            self.clear_form();
        } else {
            self.to_browser();
        }
        Ok(())
    }

    /// Leave a form without saving. Edits and deck-scoped creates go back to
    /// the selected deck, the global create always goes home.
    pub fn cancel(&mut self) -> Result<()> {
        self.expect_view(&[View::CardCreate, View::CardEdit], "cancel")?;
        let back_to_deck = self.view == View::CardEdit
            || self.creation_origin == CreationOrigin::DeckScoped;
        if back_to_deck && self.selected_named_deck().is_some() {
            self.view = View::DeckDetail;
            self.clear_form();
        } else {
            self.to_browser();
        }
        Ok(())
    }

    pub fn back(&mut self) -> Result<()> {
        self.expect_view(&[View::DeckDetail, View::StudySession], "go back")?;
        if self.view == View::StudySession && self.selected_named_deck().is_some() {
            self.view = View::DeckDetail;
        } else {
            self.to_browser();
        }
        Ok(())
    }

    /// A deck was deleted; leave it if it is the one in focus
    pub fn deck_deleted(&mut self, name: &str) {
        if self.selected_named_deck() == Some(name) {
            log::info!("Selected deck \"{}\" deleted, returning to deck browser", name);
            self.to_browser();
        }
    }

    /// "Decks" tab: always available
    pub fn home(&mut self) {
        self.to_browser();
    }

    /// "Favorites" tab: study the favorites from anywhere
    pub fn study_favorites(&mut self) {
        self.clear_form();
        self.selected_deck = Some(DeckScope::Favorites);
        self.view = View::StudySession;
    }
}
