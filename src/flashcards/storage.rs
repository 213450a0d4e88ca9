//! Card Store and Deck Registry
//!
//! Both collections live in memory and are the source of truth for the
//! session. Every mutation rewrites the affected collection in full to the
//! key-value backend:
//! ```text
//! flashcards   -> JSON array of Flashcard
//! deck_names   -> JSON array of deck names, always containing "Default"
//! ```
//! A failed write is logged and otherwise ignored.

use serde::Serialize;

use super::models::*;
use super::summary::derive_summaries;
use crate::storage::KeyValueStore;

pub const CARDS_KEY: &str = "flashcards";
pub const DECK_NAMES_KEY: &str = "deck_names";

/// Owner of the card collection and the deck registry
pub struct FlashcardStorage {
    backend: Box<dyn KeyValueStore>,
    cards: Vec<Flashcard>,
    deck_names: Vec<String>,
}

impl FlashcardStorage {
    /// Read both collections from the backend.
    ///
    /// Missing or malformed data degrades to no cards and `["Default"]`.
    pub fn load(backend: Box<dyn KeyValueStore>) -> Self {
        let cards: Vec<Flashcard> = read_json(backend.as_ref(), CARDS_KEY).unwrap_or_default();
        let mut deck_names: Vec<String> = read_json(backend.as_ref(), DECK_NAMES_KEY)
            .unwrap_or_else(|| vec![DEFAULT_DECK.to_string()]);
        if !deck_names.iter().any(|d| d == DEFAULT_DECK) {
            deck_names.push(DEFAULT_DECK.to_string());
        }

        log::info!(
            "Loaded {} cards and {} registered decks",
            cards.len(),
            deck_names.len()
        );

        Self {
            backend,
            cards,
            deck_names,
        }
    }

    // ==================== Queries ====================

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn deck_names(&self) -> &[String] {
        &self.deck_names
    }

    pub fn card(&self, id: &str) -> Option<&Flashcard> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Summaries for the effective deck set, sorted by name
    pub fn summaries(&self) -> Vec<DeckSummary> {
        derive_summaries(&self.cards, &self.deck_names)
    }

    /// Snapshot of the cards in a scope
    pub fn cards_in(&self, scope: &DeckScope) -> Vec<Flashcard> {
        scope.filter(&self.cards)
    }

    pub fn favorite_count(&self) -> usize {
        self.cards.iter().filter(|c| c.is_favorite).count()
    }

    /// Whether a deck is known, either registered or referenced by a card
    pub fn has_deck(&self, name: &str) -> bool {
        self.deck_names.iter().any(|d| d == name) || self.cards.iter().any(|c| c.deck == name)
    }

    // ==================== Deck Operations ====================

    /// Register a deck. Returns false if the name was already registered.
    pub fn create_deck(&mut self, name: &str) -> bool {
        if self.deck_names.iter().any(|d| d == name) {
            return false;
        }
        self.deck_names.push(name.to_string());
        self.persist_deck_names();
        log::info!("Created deck \"{}\"", name);
        true
    }

    /// Remove a deck and every card it owns. Returns the number of cards removed.
    pub fn delete_deck(&mut self, name: &str) -> usize {
        self.deck_names.retain(|d| d != name);
        if !self.deck_names.iter().any(|d| d == DEFAULT_DECK) {
            self.deck_names.push(DEFAULT_DECK.to_string());
        }

        let before = self.cards.len();
        self.cards.retain(|c| c.deck != name);
        let removed = before - self.cards.len();

        self.persist_deck_names();
        self.persist_cards();
        log::info!("Deleted deck \"{}\" with {} cards", name, removed);
        removed
    }

    // ==================== Card Operations ====================

    /// Create a card, or replace an existing card's sides in place.
    ///
    /// With `original_id`, the card keeps its identity, deck and favorite
    /// flag. Without it, a new card is appended with a fresh identity.
    /// Returns the id of the saved card, or `None` if `original_id` does not
    /// exist. The card's deck is registered if it was not already.
    pub fn save_card(&mut self, data: CardData, original_id: Option<&str>) -> Option<String> {
        let (id, deck) = match original_id {
            Some(original_id) => {
                let Some(card) = self.cards.iter_mut().find(|c| c.id == original_id) else {
                    log::warn!("Card {} vanished before its edit was saved", original_id);
                    return None;
                };
                card.side_a = data.side_a;
                card.side_b = data.side_b;
                card.side_c = data.side_c;
                (card.id.clone(), card.deck.clone())
            }
            None => {
                let card = Flashcard::new(data);
                let saved = (card.id.clone(), card.deck.clone());
                self.cards.push(card);
                saved
            }
        };

        self.persist_cards();
        if !self.deck_names.iter().any(|d| *d == deck) {
            self.deck_names.push(deck);
            self.persist_deck_names();
        }
        Some(id)
    }

    /// Remove a card. Unknown ids are a no-op; returns whether a card was removed.
    pub fn delete_card(&mut self, id: &str) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        if self.cards.len() == before {
            return false;
        }
        self.persist_cards();
        true
    }

    /// Flip a card's favorite flag. Returns the new value, `None` for unknown ids.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let card = self.cards.iter_mut().find(|c| c.id == id)?;
        card.is_favorite = !card.is_favorite;
        let value = card.is_favorite;
        self.persist_cards();
        Some(value)
    }

    // ==================== Persistence ====================

    fn persist_cards(&mut self) {
        write_json(self.backend.as_mut(), CARDS_KEY, &self.cards);
    }

    fn persist_deck_names(&mut self) {
        write_json(self.backend.as_mut(), DECK_NAMES_KEY, &self.deck_names);
    }
}

fn read_json<T: serde::de::DeserializeOwned>(backend: &dyn KeyValueStore, key: &str) -> Option<T> {
    let content = match backend.get(key) {
        Ok(Some(content)) => content,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Could not read {} from storage: {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Could not parse {} from storage: {}", key, e);
            None
        }
    }
}

fn write_json<T: Serialize + ?Sized>(backend: &mut dyn KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_string_pretty(value)
        .map_err(Into::into)
        .and_then(|json| backend.set(key, &json));
    if let Err(e) = result {
        log::error!("Could not save {} to storage: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn data(deck: &str, a: &str, b: &str, c: &str) -> CardData {
        CardData {
            deck: deck.to_string(),
            side_a: CardFace::text(a),
            side_b: CardFace::text(b),
            side_c: CardFace::text(c),
        }
    }

    fn empty_storage() -> FlashcardStorage {
        FlashcardStorage::load(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_load_defaults() {
        let storage = empty_storage();
        assert!(storage.cards().is_empty());
        assert_eq!(storage.deck_names(), &["Default".to_string()]);
    }

    #[test]
    fn test_load_malformed_degrades() {
        let backend = MemoryStore::new()
            .with_entry(CARDS_KEY, "{not json")
            .with_entry(DECK_NAMES_KEY, "42");
        let storage = FlashcardStorage::load(Box::new(backend));

        assert!(storage.cards().is_empty());
        assert_eq!(storage.deck_names(), &["Default".to_string()]);
    }

    #[test]
    fn test_load_seeds_default_when_absent() {
        let backend = MemoryStore::new().with_entry(DECK_NAMES_KEY, r#"["Math"]"#);
        let storage = FlashcardStorage::load(Box::new(backend));
        assert_eq!(
            storage.deck_names(),
            &["Math".to_string(), "Default".to_string()]
        );
    }

    #[test]
    fn test_create_deck_is_idempotent() {
        let mut storage = empty_storage();
        assert!(storage.create_deck("Math"));
        assert!(!storage.create_deck("Math"));
        assert!(storage.create_deck("math"));
        assert_eq!(storage.deck_names().len(), 3);
    }

    #[test]
    fn test_save_new_card_registers_deck() {
        let mut storage = empty_storage();
        let id = storage.save_card(data("Physics", "F", "ma", "push"), None).unwrap();

        let card = storage.card(&id).unwrap();
        assert!(!card.is_favorite);
        assert!(storage.deck_names().contains(&"Physics".to_string()));
        assert!(storage
            .summaries()
            .iter()
            .any(|s| s.name == "Physics" && s.card_count == 1));
    }

    #[test]
    fn test_edit_preserves_identity_deck_and_favorite() {
        let mut storage = empty_storage();
        let id = storage.save_card(data("Math", "1+1", "2", "sum"), None).unwrap();
        storage.toggle_favorite(&id);

        let saved = storage
            .save_card(data("Other", "2+2", "4", "more"), Some(&id))
            .unwrap();

        assert_eq!(saved, id);
        assert_eq!(storage.cards().len(), 1);
        let card = storage.card(&id).unwrap();
        assert_eq!(card.deck, "Math");
        assert!(card.is_favorite);
        assert_eq!(card.side_a.text_or_empty(), "2+2");
        assert!(!storage.deck_names().contains(&"Other".to_string()));
    }

    #[test]
    fn test_edit_unknown_card_is_none() {
        let mut storage = empty_storage();
        assert!(storage.save_card(data("Math", "a", "b", "c"), Some("gone")).is_none());
        assert!(storage.cards().is_empty());
    }

    #[test]
    fn test_delete_and_toggle_unknown_are_noops() {
        let mut storage = empty_storage();
        storage.save_card(data("Math", "a", "b", "c"), None);

        assert!(!storage.delete_card("missing"));
        assert_eq!(storage.toggle_favorite("missing"), None);
        assert_eq!(storage.cards().len(), 1);
    }

    #[test]
    fn test_toggle_favorite_flips() {
        let mut storage = empty_storage();
        let id = storage.save_card(data("Math", "a", "b", "c"), None).unwrap();

        assert_eq!(storage.toggle_favorite(&id), Some(true));
        assert_eq!(storage.favorite_count(), 1);
        assert_eq!(storage.toggle_favorite(&id), Some(false));
        assert_eq!(storage.favorite_count(), 0);
    }

    #[test]
    fn test_delete_deck_cascades() {
        let mut storage = empty_storage();
        storage.create_deck("Math");
        storage.save_card(data("Math", "a", "b", "c"), None);
        storage.save_card(data("Math", "d", "e", "f"), None);
        let keep = storage.save_card(data("Art", "g", "h", "i"), None).unwrap();

        assert_eq!(storage.delete_deck("Math"), 2);
        assert!(!storage.has_deck("Math"));
        assert_eq!(storage.cards().len(), 1);
        assert_eq!(storage.cards()[0].id, keep);
    }

    #[test]
    fn test_delete_default_keeps_registry_entry() {
        let mut storage = empty_storage();
        storage.save_card(data("Default", "a", "b", "c"), None);

        assert_eq!(storage.delete_deck("Default"), 1);
        assert_eq!(storage.deck_names(), &["Default".to_string()]);
    }

    #[test]
    fn test_orphan_deck_is_known() {
        let backend = MemoryStore::new().with_entry(
            CARDS_KEY,
            r#"[{"id":"1","deck":"Orphan","sideA":{"text":"a"}}]"#,
        );
        let storage = FlashcardStorage::load(Box::new(backend));
        assert!(storage.has_deck("Orphan"));
        assert!(!storage.deck_names().contains(&"Orphan".to_string()));
    }

    #[test]
    fn test_failed_writes_keep_memory_state() {
        let mut storage = FlashcardStorage::load(Box::new(MemoryStore::failing()));
        let id = storage.save_card(data("Math", "a", "b", "c"), None).unwrap();
        storage.toggle_favorite(&id);

        assert_eq!(storage.cards().len(), 1);
        assert!(storage.card(&id).unwrap().is_favorite);
    }

    #[test]
    fn test_round_trip_through_file_store() {
        let temp_dir = TempDir::new().unwrap();
        let id = {
            let mut storage =
                FlashcardStorage::load(Box::new(FileStore::new(temp_dir.path().to_path_buf())));
            storage.create_deck("Math");
            let id = storage.save_card(data("Math", "2+2", "4", "arith"), None).unwrap();
            storage.toggle_favorite(&id);
            id
        };

        let storage =
            FlashcardStorage::load(Box::new(FileStore::new(temp_dir.path().to_path_buf())));
        assert_eq!(storage.cards().len(), 1);
        assert!(storage.card(&id).unwrap().is_favorite);
        assert_eq!(
            storage.deck_names(),
            &["Default".to_string(), "Math".to_string()]
        );
    }

    #[test]
    fn test_deletions_survive_reload() {
        let temp_dir = TempDir::new().unwrap();
        let (kept, gone) = {
            let mut storage =
                FlashcardStorage::load(Box::new(FileStore::new(temp_dir.path().to_path_buf())));
            storage.create_deck("Math");
            storage.create_deck("Art");
            let kept = storage.save_card(data("Math", "2+2", "4", "arith"), None).unwrap();
            let gone = storage.save_card(data("Math", "3+3", "6", "arith"), None).unwrap();
            storage.save_card(data("Art", "Hue", "Color", "tone"), None).unwrap();
            storage.save_card(data("Art", "Value", "Lightness", "tone"), None).unwrap();

            assert!(storage.delete_card(&gone));
            assert_eq!(storage.delete_deck("Art"), 2);
            (kept, gone)
        };

        let storage =
            FlashcardStorage::load(Box::new(FileStore::new(temp_dir.path().to_path_buf())));
        assert_eq!(storage.cards().len(), 1);
        assert!(storage.card(&kept).is_some());
        assert!(storage.card(&gone).is_none());
        assert!(storage.cards().iter().all(|c| c.deck != "Art"));
        assert!(!storage.has_deck("Art"));
        assert_eq!(
            storage.deck_names(),
            &["Default".to_string(), "Math".to_string()]
        );
    }
}
