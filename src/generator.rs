//! Content Generator
//!
//! Produces the third side of a card (an example sentence or mnemonic) from
//! the term and its definition. The HTTP implementation talks to the Gemini
//! `generateContent` endpoint. There is no retry and no timeout beyond the
//! transport default; failures come back as [`GenerateError`].

use std::sync::mpsc::Sender;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GeneratorConfig;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("API key not configured. Set TRICARD_API_KEY or API_KEY to enable generation.")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Generation API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Generation returned no text")]
    EmptyResponse,
}

pub type Result<T> = std::result::Result<T, GenerateError>;

/// Something that can write side C for a card
pub trait ContentGenerator: Send + Sync {
    /// False when generation is disabled (e.g. no credential)
    fn is_available(&self) -> bool;

    fn generate(&self, term: &str, definition: &str) -> Result<String>;
}

/// Prompt sent for a term/definition pair
pub fn build_prompt(term: &str, definition: &str) -> String {
    format!(
        "Given the term \"{}\" and its definition \"{}\", provide a simple and clear example \
         sentence or a helpful mnemonic for remembering it. Respond with only the example \
         sentence or mnemonic.",
        term, definition
    )
}

// ==================== Gemini ====================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, trimmed
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

/// Generator backed by the Gemini REST API
pub struct GeminiGenerator {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiGenerator {
    pub fn new(config: &GeneratorConfig, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl ContentGenerator for GeminiGenerator {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate(&self, term: &str, definition: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(GenerateError::MissingCredential)?;
        let prompt = build_prompt(term, definition);
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        log::debug!("Requesting generation from model {}", self.model);
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message: response.text().unwrap_or_default(),
            });
        }

        let parsed: GenerateResponse = response.json()?;
        parsed.text().ok_or(GenerateError::EmptyResponse)
    }
}

// ==================== Background dispatch ====================

/// Result of one generation request, delivered to the UI thread
#[derive(Debug)]
pub struct GenerationOutcome {
    pub result: Result<String>,
}

/// Run a generation request on a worker thread and send the outcome back.
///
/// Requests are independent: several may be in flight and each one is
/// delivered when it resolves, so the last to resolve wins.
pub fn spawn_generation(
    generator: Arc<dyn ContentGenerator>,
    term: String,
    definition: String,
    tx: Sender<GenerationOutcome>,
) {
    std::thread::spawn(move || {
        let result = generator.generate(&term, &definition);
        if let Err(ref e) = result {
            log::error!("Error generating flashcard content: {}", e);
        }
        // Receiver gone means the UI already exited
        let _ = tx.send(GenerationOutcome { result });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    struct EchoGenerator;

    impl ContentGenerator for EchoGenerator {
        fn is_available(&self) -> bool {
            true
        }

        fn generate(&self, term: &str, definition: &str) -> Result<String> {
            Ok(format!("{} means {}", term, definition))
        }
    }

    #[test]
    fn test_prompt_mentions_term_and_definition() {
        let prompt = build_prompt("React", "A UI library");
        assert!(prompt.contains("\"React\""));
        assert!(prompt.contains("\"A UI library\""));
        assert!(prompt.ends_with("Respond with only the example sentence or mnemonic."));
    }

    #[test]
    fn test_response_text_extraction() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"  Hello "},{"text":"world\n"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("Hello world"));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(empty.text().is_none());

        let blank: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#)
                .unwrap();
        assert!(blank.text().is_none());
    }

    #[test]
    fn test_missing_credential_is_reported() {
        let generator = GeminiGenerator::new(&GeneratorConfig::default(), None).unwrap();
        assert!(!generator.is_available());
        assert!(matches!(
            generator.generate("a", "b"),
            Err(GenerateError::MissingCredential)
        ));

        let blank = GeminiGenerator::new(&GeneratorConfig::default(), Some("  ".to_string())).unwrap();
        assert!(!blank.is_available());
    }

    #[test]
    fn test_url_shape() {
        let config = GeneratorConfig {
            endpoint: "https://example.test/v1beta/".to_string(),
            model: "m".to_string(),
            api_key: None,
        };
        let generator = GeminiGenerator::new(&config, Some("k".to_string())).unwrap();
        assert_eq!(generator.url(), "https://example.test/v1beta/models/m:generateContent");
    }

    #[test]
    fn test_spawn_generation_delivers_outcome() {
        let (tx, rx) = mpsc::channel();
        spawn_generation(
            Arc::new(EchoGenerator),
            "term".to_string(),
            "def".to_string(),
            tx,
        );

        let outcome = rx.recv().unwrap();
        assert_eq!(outcome.result.unwrap(), "term means def");
    }
}
