//! Card Editor
//!
//! Form state for creating or editing one card: the draft, inline error and
//! success notices, image intake and the side C generation round trip.

use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::flashcards::{is_reserved_deck_name, CardData, Flashcard, Side, DEFAULT_DECK};
use crate::generator::GenerateError;
use crate::validation::{Result, ValidationError, MAX_IMAGE_BYTES};

pub const CARD_ADDED_NOTICE: &str = "Card successfully added! Create another?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { card_id: String },
}

#[derive(Debug, Clone)]
pub struct CardEditor {
    mode: EditorMode,
    draft: CardData,
    deck_locked: bool,
    pending_generations: usize,
    error: Option<String>,
    notice: Option<String>,
}

impl CardEditor {
    /// Blank form. A seeded deck is fixed; otherwise the deck starts as "Default".
    pub fn for_new(seed_deck: Option<&str>) -> Self {
        let draft = CardData {
            deck: seed_deck.unwrap_or(DEFAULT_DECK).to_string(),
            ..CardData::default()
        };
        Self {
            mode: EditorMode::Create,
            draft,
            deck_locked: seed_deck.is_some(),
            pending_generations: 0,
            error: None,
            notice: None,
        }
    }

    /// Form pre-filled from an existing card. The deck cannot change.
    pub fn for_edit(card: &Flashcard) -> Self {
        Self {
            mode: EditorMode::Edit {
                card_id: card.id.clone(),
            },
            draft: CardData::from(card),
            deck_locked: true,
            pending_generations: 0,
            error: None,
            notice: None,
        }
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, EditorMode::Edit { .. })
    }

    pub fn card_id(&self) -> Option<&str> {
        match &self.mode {
            EditorMode::Edit { card_id } => Some(card_id),
            EditorMode::Create => None,
        }
    }

    pub fn draft(&self) -> &CardData {
        &self.draft
    }

    pub fn is_deck_locked(&self) -> bool {
        self.deck_locked
    }

    pub fn is_generating(&self) -> bool {
        self.pending_generations > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_messages(&mut self) {
        self.error = None;
        self.notice = None;
    }

    /// Returns false when the deck field is locked
    pub fn set_deck(&mut self, name: &str) -> bool {
        if self.deck_locked {
            return false;
        }
        self.draft.deck = name.to_string();
        true
    }

    pub fn set_text(&mut self, side: Side, text: &str) {
        self.draft.face_mut(side).text = Some(text.to_string());
    }

    /// Attach raw image bytes as a data URL
    pub fn attach_image(&mut self, side: Side, bytes: &[u8], mime_type: &str) -> Result<()> {
        let size = bytes.len() as u64;
        let outcome = if size > MAX_IMAGE_BYTES {
            Err(ValidationError::ImageTooLarge { size })
        } else if !mime_type.starts_with("image/") {
            Err(ValidationError::UnsupportedImage(mime_type.to_string()))
        } else {
            Ok(format!("data:{};base64,{}", mime_type, BASE64.encode(bytes)))
        };

        match outcome {
            Ok(data_url) => {
                self.draft.face_mut(side).image = Some(data_url);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Read an image file, checking its size before loading it
    pub fn attach_image_file(&mut self, side: Side, path: &Path) -> Result<()> {
        match load_image(path) {
            Ok((bytes, mime_type)) => self.attach_image(side, &bytes, mime_type),
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn remove_image(&mut self, side: Side) {
        self.draft.face_mut(side).image = None;
    }

    /// Check the draft and hand back the card data to save.
    ///
    /// The deck must be non-blank and not a built-in deck; every side needs
    /// text or an image.
    pub fn validate(&self) -> Result<CardData> {
        let deck = self.draft.deck.trim();
        if deck.is_empty() {
            return Err(ValidationError::MissingCardDeck);
        }
        if is_reserved_deck_name(deck) {
            return Err(ValidationError::ReservedDeckName(deck.to_string()));
        }
        if !Side::ALL.iter().all(|s| self.draft.face(*s).has_content()) {
            return Err(ValidationError::IncompleteSides);
        }

        let mut data = self.draft.clone();
        data.deck = deck.to_string();
        Ok(data)
    }

    /// Blank the sides for the next card, keeping the deck
    pub fn reset_for_next(&mut self) {
        let deck = std::mem::take(&mut self.draft.deck);
        self.draft = CardData {
            deck,
            ..CardData::default()
        };
        self.error = None;
        self.notice = Some(CARD_ADDED_NOTICE.to_string());
    }

    /// Start a side C generation; returns the (term, definition) to send
    pub fn begin_generation(&mut self, available: bool) -> Result<(String, String)> {
        let term = self.draft.side_a.text_or_empty().trim().to_string();
        let definition = self.draft.side_b.text_or_empty().trim().to_string();

        let outcome = if !available {
            Err(ValidationError::GenerationUnavailable)
        } else if term.is_empty() || definition.is_empty() {
            Err(ValidationError::GenerationInputsMissing)
        } else {
            Ok((term, definition))
        };

        match outcome {
            Ok(inputs) => {
                self.error = None;
                self.pending_generations += 1;
                Ok(inputs)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Apply a resolved generation. Each resolution overwrites side C text.
    pub fn finish_generation(&mut self, result: std::result::Result<String, GenerateError>) {
        self.pending_generations = self.pending_generations.saturating_sub(1);
        match result {
            Ok(text) => self.draft.side_c.text = Some(text),
            Err(e) => self.error = Some(format!("Failed to generate content: {}", e)),
        }
    }
}

/// Read an image file and pick its MIME type from the extension
fn load_image(path: &Path) -> Result<(Vec<u8>, &'static str)> {
    let mime_type = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("svg") => "image/svg+xml",
        other => {
            return Err(ValidationError::UnsupportedImage(
                other.unwrap_or("unknown").to_string(),
            ))
        }
    };

    let metadata = fs::metadata(path).map_err(|e| ValidationError::ImageRead(e.to_string()))?;
    if metadata.len() > MAX_IMAGE_BYTES {
        return Err(ValidationError::ImageTooLarge {
            size: metadata.len(),
        });
    }

    let bytes = fs::read(path).map_err(|e| ValidationError::ImageRead(e.to_string()))?;
    Ok((bytes, mime_type))
}
