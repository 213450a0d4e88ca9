use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use tricard_lib::config::Config;
use tricard_lib::controller::Controller;
use tricard_lib::flashcards::{DeckScope, Flashcard, FlashcardStorage};
use tricard_lib::generator::{ContentGenerator, GeminiGenerator};
use tricard_lib::storage::{FileStore, KeyValueStore, MemoryStore};

/// Global command-line options shared by every subcommand
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub config_path: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub ephemeral: bool,
}

/// Shared application state for CLI commands
pub struct App {
    pub data_dir: Option<PathBuf>,
    pub controller: Controller,
}

impl App {
    /// Load the config, open the store and build the controller
    pub fn new(options: &AppOptions) -> Result<Self> {
        let config_path = match &options.config_path {
            Some(path) => Some(path.clone()),
            None => Config::default_path(),
        };
        let config = match &config_path {
            Some(path) => Config::load(path).context("Failed to load config")?,
            None => Config::default(),
        };

        let (backend, data_dir): (Box<dyn KeyValueStore>, Option<PathBuf>) = if options.ephemeral {
            (Box::new(MemoryStore::new()), None)
        } else {
            let data_dir = match options.data_dir.clone().or_else(|| config.data_dir.clone()) {
                Some(dir) => dir,
                None => FileStore::default_data_dir().context("Failed to get data directory")?,
            };
            log::debug!("Using data directory {}", data_dir.display());
            (Box::new(FileStore::new(data_dir.clone())), Some(data_dir))
        };

        let generator = GeminiGenerator::new(&config.generator, config.api_key())
            .context("Failed to initialize content generator")?;
        if !generator.is_available() {
            log::info!("No API key configured; content generation disabled");
        }

        let storage = FlashcardStorage::load(backend);
        let controller = Controller::new(storage, Arc::new(generator));

        Ok(Self {
            data_dir,
            controller,
        })
    }

    /// Where cards are kept, for display
    pub fn storage_label(&self) -> String {
        match &self.data_dir {
            Some(dir) => dir.display().to_string(),
            None => "in-memory, not saved".to_string(),
        }
    }

    /// Find a deck by name: exact match first, then case-insensitive prefix
    pub fn find_deck(&self, name: &str) -> Result<DeckScope> {
        let entries = self.controller.browser_entries();

        if let Some(entry) = entries.iter().find(|e| e.name() == name) {
            return Ok(entry.scope.clone());
        }

        let name_lower = name.to_lowercase();
        let matches: Vec<&DeckScope> = entries
            .iter()
            .filter(|e| e.name().to_lowercase().starts_with(&name_lower))
            .map(|e| &e.scope)
            .collect();

        match matches.len() {
            0 => bail!("No deck matching '{}'. Available decks:\n{}", name,
                entries.iter().map(|e| format!("  - {}", e.name())).collect::<Vec<_>>().join("\n")),
            1 => Ok(matches[0].clone()),
            _ => bail!("Ambiguous deck name '{}'. Matches:\n{}", name,
                matches.iter().map(|s| format!("  - {}", s)).collect::<Vec<_>>().join("\n")),
        }
    }

    /// Find a card by id or unique id prefix. Unknown ids are `None`.
    pub fn find_card(&self, id: &str) -> Result<Option<Flashcard>> {
        let cards = self.controller.storage().cards();
        if let Some(card) = cards.iter().find(|c| c.id == id) {
            return Ok(Some(card.clone()));
        }

        let matches: Vec<&Flashcard> = cards.iter().filter(|c| c.id.starts_with(id)).collect();
        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches[0].clone())),
            _ => bail!("Ambiguous card id '{}' ({} matches)", id, matches.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(temp_dir: &TempDir, ephemeral: bool) -> AppOptions {
        AppOptions {
            config_path: Some(temp_dir.path().join("missing.toml")),
            data_dir: Some(temp_dir.path().join("data")),
            ephemeral,
        }
    }

    #[test]
    fn test_storage_label_names_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let app = App::new(&options(&temp_dir, false)).unwrap();
        assert_eq!(app.data_dir.as_deref(), Some(temp_dir.path().join("data").as_path()));
        assert_eq!(
            app.storage_label(),
            temp_dir.path().join("data").display().to_string()
        );
    }

    #[test]
    fn test_storage_label_when_ephemeral() {
        let temp_dir = TempDir::new().unwrap();
        let app = App::new(&options(&temp_dir, true)).unwrap();
        assert!(app.data_dir.is_none());
        assert_eq!(app.storage_label(), "in-memory, not saved");
    }
}
