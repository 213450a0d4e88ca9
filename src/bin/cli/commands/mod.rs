pub mod add;
pub mod card;
pub mod cards;
pub mod deck;
pub mod decks;
pub mod generate;
