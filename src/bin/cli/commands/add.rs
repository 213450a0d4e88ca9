use std::path::PathBuf;

use anyhow::{Context, Result};

use tricard_lib::editor::CardEditor;
use tricard_lib::flashcards::Side;

use crate::app::App;
use crate::render::terminal::render_card;
use crate::OutputFormat;

/// Card contents from the command line, indexed by side
pub struct AddRequest {
    pub deck: String,
    pub texts: [Option<String>; 3],
    pub images: [Option<PathBuf>; 3],
    pub generate: bool,
}

pub fn run(app: &mut App, request: AddRequest, format: &OutputFormat, use_color: bool) -> Result<()> {
    let controller = &mut app.controller;
    controller.home();
    controller.open_create_card();

    let editor = controller
        .editor_mut()
        .context("Card form did not open")?;
    fill_form(editor, &request)?;

    if request.generate {
        controller.generate_now()?;
        if let Some(error) = controller.editor().and_then(CardEditor::error) {
            anyhow::bail!("{}", error);
        }
    }

    let id = controller
        .save_form()?
        .context("Card was not saved")?;
    let card = controller
        .storage()
        .card(&id)
        .cloned()
        .context("Saved card not found")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => {
            println!("Added card to deck \"{}\"", card.deck);
            for line in render_card(&card, use_color) {
                println!("  {}", line);
            }
        }
    }

    Ok(())
}

fn fill_form(editor: &mut CardEditor, request: &AddRequest) -> Result<()> {
    editor.set_deck(&request.deck);

    for side in Side::ALL {
        if let Some(text) = &request.texts[side.index()] {
            editor.set_text(side, text);
        }
        if let Some(path) = &request.images[side.index()] {
            editor
                .attach_image_file(side, path)
                .with_context(|| format!("Failed to attach {}", path.display()))?;
        }
    }

    Ok(())
}
