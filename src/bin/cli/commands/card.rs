use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

/// Toggle a card's favorite flag. An unknown id changes nothing.
pub fn run_favorite(app: &mut App, id: &str, format: &OutputFormat) -> Result<()> {
    let Some(card) = app.find_card(id)? else {
        log::info!("No card with id '{}'", id);
        return Ok(());
    };
    let is_favorite = app.controller.toggle_favorite(&card.id);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "id": card.id, "isFavorite": is_favorite });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => match is_favorite {
            Some(true) => println!("Added {} to favorites", card.id),
            Some(false) => println!("Removed {} from favorites", card.id),
            None => {}
        },
    }

    Ok(())
}

/// Delete a card. An unknown id changes nothing.
pub fn run_delete(app: &mut App, id: &str, format: &OutputFormat) -> Result<()> {
    let Some(card) = app.find_card(id)? else {
        log::info!("No card with id '{}'", id);
        return Ok(());
    };
    let removed = app.controller.delete_card(&card.id);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "id": card.id, "deleted": removed });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if removed {
                println!("Deleted card {} from deck \"{}\"", card.id, card.deck);
            }
        }
    }

    Ok(())
}
