use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let entries = app.controller.browser_entries();

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = entries
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "name": e.name(),
                        "cardCount": e.card_count,
                        "virtual": e.scope.is_virtual(),
                        "deletable": e.deletable,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for entry in &entries {
                let name = if entry.scope.is_virtual() {
                    paint(entry.name(), Color::YELLOW, use_color)
                } else {
                    paint(entry.name(), Color::BOLD, use_color)
                };
                let noun = if entry.card_count == 1 { "card" } else { "cards" };
                println!("  {} ({} {})", name, entry.card_count, noun);
            }
        }
    }

    Ok(())
}
