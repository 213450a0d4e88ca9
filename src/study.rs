//! Card Study Viewer
//!
//! Circular browsing over a point-in-time snapshot of a deck scope, with a
//! three-sided flip. A flip first enters a short transitional state (the
//! visual turn) and only then advances the side; further flips during that
//! window are ignored. Time is passed in so the state machine stays
//! deterministic.

use std::time::{Duration, Instant};

use crate::flashcards::{CardFace, DeckScope, Flashcard, Side};

/// Length of the visual flip before the side changes
pub const FLIP_DURATION: Duration = Duration::from_millis(150);

#[derive(Debug, Clone)]
pub struct StudySession {
    scope: DeckScope,
    cards: Vec<Flashcard>,
    current_index: usize,
    current_side: Side,
    flip_started: Option<Instant>,
}

impl StudySession {
    /// Start at the first card, side A
    pub fn new(scope: DeckScope, cards: Vec<Flashcard>) -> Self {
        Self {
            scope,
            cards,
            current_index: 0,
            current_side: Side::A,
            flip_started: None,
        }
    }

    pub fn scope(&self) -> &DeckScope {
        &self.scope
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True when the empty-state view should be shown
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_side(&self) -> Side {
        self.current_side
    }

    pub fn is_transitioning(&self) -> bool {
        self.flip_started.is_some()
    }

    pub fn current(&self) -> Option<&Flashcard> {
        self.cards.get(self.current_index)
    }

    pub fn current_face(&self) -> Option<&CardFace> {
        self.current().map(|card| card.face(self.current_side))
    }

    /// Begin a flip. Ignored while another flip is in progress or the deck is empty.
    pub fn flip(&mut self, now: Instant) -> bool {
        if self.flip_started.is_some() || self.is_empty() {
            return false;
        }
        self.flip_started = Some(now);
        true
    }

    /// Finish a pending flip once its interval has elapsed.
    /// Returns true when the side changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.flip_started {
            Some(started) if now.saturating_duration_since(started) >= FLIP_DURATION => {
                self.finish_flip();
                true
            }
            _ => false,
        }
    }

    /// Complete a pending flip immediately
    pub fn finish_flip(&mut self) {
        if self.flip_started.take().is_some() {
            self.current_side = self.current_side.next();
        }
    }

    pub fn next(&mut self) {
        if self.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.cards.len();
        self.reset_side();
    }

    pub fn previous(&mut self) {
        if self.is_empty() {
            return;
        }
        let len = self.cards.len();
        self.current_index = (self.current_index + len - 1) % len;
        self.reset_side();
    }

    fn reset_side(&mut self) {
        self.current_side = Side::A;
        self.flip_started = None;
    }

    /// Bring the snapshot in line with the store after a mutation.
    ///
    /// Cards that no longer exist are dropped and surviving cards pick up
    /// their new content (e.g. the favorite flag). Membership is not
    /// re-filtered. The index is clamped into range.
    pub fn reconcile(&mut self, store_cards: &[Flashcard]) {
        self.cards = self
            .cards
            .iter()
            .filter_map(|snap| store_cards.iter().find(|c| c.id == snap.id).cloned())
            .collect();

        if self.cards.is_empty() {
            self.current_index = 0;
            self.flip_started = None;
        } else if self.current_index >= self.cards.len() {
            self.current_index = self.cards.len() - 1;
        }
    }
}
