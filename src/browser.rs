//! Deck Browser rules
//!
//! The listing shown on the home screen and the checks applied before a deck
//! is created or deleted from it.

use crate::flashcards::{
    is_reserved_deck_name, DeckScope, DeckSummary, FlashcardStorage, DEFAULT_DECK,
};
use crate::validation::{Result, ValidationError};

/// One row of the deck browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub scope: DeckScope,
    pub card_count: usize,
    pub deletable: bool,
}

impl BrowserEntry {
    pub fn name(&self) -> &str {
        self.scope.name()
    }
}

/// Virtual decks first, then `Default`, then the remaining decks by name
pub fn browser_entries(storage: &FlashcardStorage) -> Vec<BrowserEntry> {
    let mut entries = vec![
        BrowserEntry {
            scope: DeckScope::Favorites,
            card_count: storage.favorite_count(),
            deletable: false,
        },
        BrowserEntry {
            scope: DeckScope::AllCards,
            card_count: storage.cards().len(),
            deletable: false,
        },
    ];

    let summaries = storage.summaries();
    let (default, user): (Vec<DeckSummary>, Vec<DeckSummary>) = summaries
        .into_iter()
        .partition(|s| s.name == DEFAULT_DECK);

    for summary in default.into_iter().chain(user) {
        entries.push(BrowserEntry {
            deletable: summary.name != DEFAULT_DECK,
            scope: DeckScope::Named(summary.name),
            card_count: summary.card_count,
        });
    }

    entries
}

/// Check a name typed into the "new deck" field; returns it trimmed
pub fn validate_new_deck_name(name: &str, existing: &[DeckSummary]) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyDeckName);
    }

    if is_reserved_deck_name(name) {
        return Err(ValidationError::ReservedDeckName(name.to_string()));
    }
    let lower = name.to_lowercase();
    if existing.iter().any(|d| d.name.to_lowercase() == lower) {
        return Err(ValidationError::DuplicateDeckName(name.to_string()));
    }

    Ok(name.to_string())
}

/// Only real, non-default decks may be deleted from the browser
pub fn validate_deck_deletion(scope: &DeckScope) -> Result<&str> {
    match scope {
        DeckScope::Named(name) if name != DEFAULT_DECK => Ok(name.as_str()),
        other => Err(ValidationError::ProtectedDeck(other.name().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::{CardData, CardFace};
    use crate::storage::MemoryStore;

    fn summary(name: &str) -> DeckSummary {
        DeckSummary {
            name: name.to_string(),
            card_count: 0,
        }
    }

    fn card(deck: &str) -> CardData {
        CardData {
            deck: deck.to_string(),
            side_a: CardFace::text("a"),
            side_b: CardFace::text("b"),
            side_c: CardFace::text("c"),
        }
    }

    #[test]
    fn test_new_deck_name_rules() {
        let existing = vec![summary("Default"), summary("Math")];

        assert_eq!(validate_new_deck_name("  Art ", &existing).unwrap(), "Art");
        assert_eq!(
            validate_new_deck_name("   ", &existing),
            Err(ValidationError::EmptyDeckName)
        );
        assert_eq!(
            validate_new_deck_name("math", &existing),
            Err(ValidationError::DuplicateDeckName("math".to_string()))
        );
        assert_eq!(
            validate_new_deck_name("FAVORITES", &existing),
            Err(ValidationError::ReservedDeckName("FAVORITES".to_string()))
        );
        assert_eq!(
            validate_new_deck_name("all cards", &existing),
            Err(ValidationError::ReservedDeckName("all cards".to_string()))
        );
    }

    #[test]
    fn test_deletion_guard() {
        assert_eq!(
            validate_deck_deletion(&DeckScope::Named("Math".to_string())),
            Ok("Math")
        );
        assert!(validate_deck_deletion(&DeckScope::Named("Default".to_string())).is_err());
        assert!(validate_deck_deletion(&DeckScope::Favorites).is_err());
        assert!(validate_deck_deletion(&DeckScope::AllCards).is_err());
    }

    #[test]
    fn test_browser_ordering_and_counts() {
        let mut storage = FlashcardStorage::load(Box::new(MemoryStore::new()));
        storage.create_deck("Zoology");
        storage.create_deck("Art");
        let id = storage.save_card(card("Art"), None).unwrap();
        storage.save_card(card("Zoology"), None);
        storage.toggle_favorite(&id);

        let entries = browser_entries(&storage);
        let rows: Vec<(&str, usize, bool)> = entries
            .iter()
            .map(|e| (e.name(), e.card_count, e.deletable))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("Favorites", 1, false),
                ("All Cards", 2, false),
                ("Default", 0, false),
                ("Art", 1, true),
                ("Zoology", 1, true),
            ]
        );
    }
}
