use anyhow::{Context, Result};

use tricard_lib::validation::ValidationError;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, term: &str, definition: &str, format: &OutputFormat) -> Result<()> {
    let generator = app.controller.generator();
    if !generator.is_available() {
        return Err(ValidationError::GenerationUnavailable.into());
    }
    if term.trim().is_empty() || definition.trim().is_empty() {
        return Err(ValidationError::GenerationInputsMissing.into());
    }

    let text = generator
        .generate(term.trim(), definition.trim())
        .context("Failed to generate content")?;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "term": term,
                "definition": definition,
                "text": text,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => println!("{}", text),
    }

    Ok(())
}
