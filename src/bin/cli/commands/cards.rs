use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{paint, render_card, Color};
use crate::OutputFormat;

pub fn run(app: &App, deck_name: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let scope = app.find_deck(deck_name)?;
    let cards = app.controller.storage().cards_in(&scope);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": scope.name(),
                "cards": cards,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{} ({} cards)", paint(scope.name(), Color::BOLD, use_color), cards.len());
            if cards.is_empty() {
                println!("  (no cards)");
            }
            for card in &cards {
                for line in render_card(card, use_color) {
                    println!("  {}", line);
                }
            }
        }
    }

    Ok(())
}
