//! Flashcard collection for Tri-Card
//!
//! This module provides:
//! - Three-sided card and deck models, including the virtual deck scopes
//! - Card Store and Deck Registry with save-on-mutation persistence
//! - Deck summary derivation

pub mod models;
pub mod storage;
pub mod summary;

pub use models::*;
pub use storage::{FlashcardStorage, CARDS_KEY, DECK_NAMES_KEY};
pub use summary::derive_summaries;
