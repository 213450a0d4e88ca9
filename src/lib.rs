//! Three-sided flashcards.
//!
//! Cards carry a term, a definition and an example or mnemonic. They are
//! grouped into named decks, studied one side at a time, and persisted
//! through a [`storage::KeyValueStore`]. The [`controller::Controller`] ties
//! the pieces together for the front ends in `src/bin`.

pub mod browser;
pub mod config;
pub mod controller;
pub mod editor;
pub mod flashcards;
pub mod generator;
pub mod navigation;
pub mod storage;
pub mod study;
pub mod validation;
