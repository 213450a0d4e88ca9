//! Data models for the flashcard system

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Deck that always exists in the registry
pub const DEFAULT_DECK: &str = "Default";
/// Display name of the virtual deck holding every favorited card
pub const FAVORITES_DECK: &str = "Favorites";
/// Display name of the virtual deck holding every card
pub const ALL_CARDS_DECK: &str = "All Cards";

/// Whether a name collides with a virtual deck, ignoring case and padding
pub fn is_reserved_deck_name(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    [FAVORITES_DECK, ALL_CARDS_DECK]
        .iter()
        .any(|reserved| reserved.to_lowercase() == lower)
}

/// One of the three faces of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
    C,
}

impl Side {
    pub const ALL: [Side; 3] = [Side::A, Side::B, Side::C];

    /// The side shown after a flip: A -> B -> C -> A
    pub fn next(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::C,
            Side::C => Side::A,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
            Side::C => 2,
        }
    }

    /// Human label used by the editor and the study view
    pub fn label(self) -> &'static str {
        match self {
            Side::A => "Side 1 (Term)",
            Side::B => "Side 2 (Definition)",
            Side::C => "Side 3 (Example)",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::A => "A",
            Side::B => "B",
            Side::C => "C",
        };
        f.write_str(s)
    }
}

/// Content of a single side. Either field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardFace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Self-describing encoded image (`data:<mime>;base64,...`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl CardFace {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            image: None,
        }
    }

    /// A side has content when it carries non-blank text or any image
    pub fn has_content(&self) -> bool {
        let has_text = self.text.as_deref().is_some_and(|t| !t.trim().is_empty());
        has_text || self.image.is_some()
    }

    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// A three-sided flashcard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: String,
    pub deck: String,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub side_a: CardFace,
    #[serde(default)]
    pub side_b: CardFace,
    #[serde(default)]
    pub side_c: CardFace,
}

impl Flashcard {
    pub fn new(data: CardData) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            deck: data.deck,
            is_favorite: false,
            side_a: data.side_a,
            side_b: data.side_b,
            side_c: data.side_c,
        }
    }

    pub fn face(&self, side: Side) -> &CardFace {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
            Side::C => &self.side_c,
        }
    }
}

/// The caller-supplied part of a card: everything except identity and favorite flag
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardData {
    pub deck: String,
    pub side_a: CardFace,
    pub side_b: CardFace,
    pub side_c: CardFace,
}

impl CardData {
    pub fn face(&self, side: Side) -> &CardFace {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
            Side::C => &self.side_c,
        }
    }

    pub fn face_mut(&mut self, side: Side) -> &mut CardFace {
        match side {
            Side::A => &mut self.side_a,
            Side::B => &mut self.side_b,
            Side::C => &mut self.side_c,
        }
    }
}

impl From<&Flashcard> for CardData {
    fn from(card: &Flashcard) -> Self {
        Self {
            deck: card.deck.clone(),
            side_a: card.side_a.clone(),
            side_b: card.side_b.clone(),
            side_c: card.side_c.clone(),
        }
    }
}

/// Which set of cards a deck name refers to.
///
/// The virtual decks are never stored; a named deck is a real registry entry
/// (or a name some card still references).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeckScope {
    Favorites,
    AllCards,
    Named(String),
}

impl DeckScope {
    /// Map a user-facing deck name to its scope. Reserved names match exactly.
    pub fn from_name(name: &str) -> Self {
        match name {
            FAVORITES_DECK => Self::Favorites,
            ALL_CARDS_DECK => Self::AllCards,
            other => Self::Named(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Favorites => FAVORITES_DECK,
            Self::AllCards => ALL_CARDS_DECK,
            Self::Named(name) => name,
        }
    }

    pub fn is_virtual(&self) -> bool {
        !matches!(self, Self::Named(_))
    }

    /// Whether a card belongs to this scope
    pub fn contains(&self, card: &Flashcard) -> bool {
        match self {
            Self::Favorites => card.is_favorite,
            Self::AllCards => true,
            Self::Named(name) => card.deck == *name,
        }
    }

    /// The cards of this scope, in collection order
    pub fn filter(&self, cards: &[Flashcard]) -> Vec<Flashcard> {
        cards.iter().filter(|c| self.contains(c)).cloned().collect()
    }
}

impl fmt::Display for DeckScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived, never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSummary {
    pub name: String,
    pub card_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(deck: &str, favorite: bool) -> Flashcard {
        let mut card = Flashcard::new(CardData {
            deck: deck.to_string(),
            side_a: CardFace::text("a"),
            side_b: CardFace::text("b"),
            side_c: CardFace::text("c"),
        });
        card.is_favorite = favorite;
        card
    }

    #[test]
    fn test_side_cycle() {
        assert_eq!(Side::A.next(), Side::B);
        assert_eq!(Side::B.next(), Side::C);
        assert_eq!(Side::C.next(), Side::A);
    }

    #[test]
    fn test_reserved_deck_names() {
        assert!(is_reserved_deck_name("Favorites"));
        assert!(is_reserved_deck_name("favorites"));
        assert!(is_reserved_deck_name(" ALL CARDS "));
        assert!(!is_reserved_deck_name("All Cards 2"));
        assert!(!is_reserved_deck_name("Default"));
    }

    #[test]
    fn test_face_content() {
        assert!(!CardFace::default().has_content());
        assert!(!CardFace::text("   ").has_content());
        assert!(CardFace::text("x").has_content());

        let image_only = CardFace {
            text: None,
            image: Some("data:image/png;base64,AA==".to_string()),
        };
        assert!(image_only.has_content());
    }

    #[test]
    fn test_new_cards_get_distinct_ids() {
        let a = card("Math", false);
        let b = card("Math", false);
        assert_ne!(a.id, b.id);
        assert!(!a.is_favorite);
    }

    #[test]
    fn test_scope_from_reserved_names() {
        assert_eq!(DeckScope::from_name("Favorites"), DeckScope::Favorites);
        assert_eq!(DeckScope::from_name("All Cards"), DeckScope::AllCards);
        assert_eq!(
            DeckScope::from_name("favorites"),
            DeckScope::Named("favorites".to_string())
        );
        assert!(DeckScope::Favorites.is_virtual());
        assert!(!DeckScope::Named("Default".to_string()).is_virtual());
    }

    #[test]
    fn test_scope_filter() {
        let cards = vec![card("Math", true), card("Math", false), card("Art", false)];

        assert_eq!(DeckScope::Favorites.filter(&cards).len(), 1);
        assert_eq!(DeckScope::AllCards.filter(&cards).len(), 3);
        assert_eq!(DeckScope::Named("Math".to_string()).filter(&cards).len(), 2);
        assert!(DeckScope::Named("Nope".to_string()).filter(&cards).is_empty());
    }

    #[test]
    fn test_json_shape() {
        let mut c = card("Math", false);
        c.side_c.text = None;
        let json = serde_json::to_value(&c).unwrap();

        assert_eq!(json["deck"], "Math");
        assert_eq!(json["isFavorite"], false);
        assert_eq!(json["sideA"]["text"], "a");
        assert!(json["sideC"].get("text").is_none());

        let parsed: Flashcard =
            serde_json::from_str(r#"{"id":"x","deck":"D","sideA":{"text":"t"}}"#).unwrap();
        assert!(!parsed.is_favorite);
        assert!(!parsed.side_b.has_content());
    }
}
