//! Deck summary derivation.
//!
//! The effective deck set is the union of the registry and every deck name
//! a card references. Summaries are recomputed from the raw collections on
//! demand and never stored.

use std::collections::BTreeMap;

use super::models::{DeckSummary, Flashcard};

/// One summary per distinct deck name, sorted by name (byte order).
pub fn derive_summaries(cards: &[Flashcard], registry_names: &[String]) -> Vec<DeckSummary> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

    for card in cards {
        *counts.entry(card.deck.as_str()).or_insert(0) += 1;
    }
    for name in registry_names {
        counts.entry(name.as_str()).or_insert(0);
    }

    counts
        .into_iter()
        .map(|(name, card_count)| DeckSummary {
            name: name.to_string(),
            card_count,
        })
        .collect()
}
