use anyhow::Result;

use tricard_lib::flashcards::DeckScope;

use crate::app::App;
use crate::OutputFormat;

pub fn run_new(app: &mut App, name: &str, format: &OutputFormat) -> Result<()> {
    let name = app.controller.create_deck(name)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "name": name, "cardCount": 0 });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => println!("Created deck \"{}\"", name),
    }

    Ok(())
}

pub fn run_delete(app: &mut App, name: &str, format: &OutputFormat) -> Result<()> {
    let scope = DeckScope::from_name(name);
    if let DeckScope::Named(ref deck) = scope {
        if !app.controller.storage().has_deck(deck) {
            anyhow::bail!("No deck named '{}'", deck);
        }
    }

    let removed = app.controller.delete_deck(&scope)?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "name": name, "cardsRemoved": removed });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted deck \"{}\" and {} card(s)", name, removed);
        }
    }

    Ok(())
}
