//! User-facing validation failures.
//!
//! These abort the operation before any state changes and are shown inline.

use thiserror::Error;

/// Upper bound for an attached image, in bytes
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Deck name cannot be empty.")]
    EmptyDeckName,

    #[error("A deck with this name already exists.")]
    DuplicateDeckName(String),

    #[error("\"{0}\" is a built-in deck name.")]
    ReservedDeckName(String),

    #[error("The \"{0}\" deck cannot be deleted.")]
    ProtectedDeck(String),

    #[error("Deck name is required.")]
    MissingCardDeck,

    #[error("All three sides must have either text or an image.")]
    IncompleteSides,

    #[error("Image size should be less than 2MB.")]
    ImageTooLarge { size: u64 },

    #[error("Unsupported image type: {0}")]
    UnsupportedImage(String),

    #[error("Failed to read image file: {0}")]
    ImageRead(String),

    #[error("Please fill out Side 1 and Side 2 to generate Side 3 text.")]
    GenerationInputsMissing,

    #[error("API Key not configured. AI features disabled.")]
    GenerationUnavailable,
}

pub type Result<T> = std::result::Result<T, ValidationError>;
