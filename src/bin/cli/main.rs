mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use app::AppOptions;

#[derive(Parser)]
#[command(name = "tricard", about = "Three-sided flashcards: CLI and TUI", version)]
struct Cli {
    /// Config file (default: <config_dir>/tricard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the card and deck documents
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List decks with their card counts
    Decks,

    /// List the cards of a deck ("Favorites" and "All Cards" work too)
    Cards {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },

    /// Create an empty deck
    NewDeck {
        name: String,
    },

    /// Delete a deck and every card in it
    DeleteDeck {
        /// Deck name (exact)
        name: String,
    },

    /// Add a card
    Add {
        /// Deck to add the card to (created if it does not exist)
        #[arg(long, default_value = "Default")]
        deck: String,
        /// Side 1 text (term)
        #[arg(long)]
        a: Option<String>,
        /// Side 2 text (definition)
        #[arg(long)]
        b: Option<String>,
        /// Side 3 text (example or mnemonic)
        #[arg(long)]
        c: Option<String>,
        /// Image file for side 1
        #[arg(long)]
        a_image: Option<PathBuf>,
        /// Image file for side 2
        #[arg(long)]
        b_image: Option<PathBuf>,
        /// Image file for side 3
        #[arg(long)]
        c_image: Option<PathBuf>,
        /// Fill side 3 text with the content generator
        #[arg(long)]
        generate: bool,
    },

    /// Toggle the favorite flag of a card
    Favorite {
        /// Card id (or a unique prefix)
        id: String,
    },

    /// Delete a card
    Delete {
        /// Card id (or a unique prefix)
        id: String,
    },

    /// Generate an example sentence or mnemonic for a term
    Generate {
        term: String,
        definition: String,
    },

    /// Launch interactive TUI
    #[cfg(feature = "tui")]
    Tui,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal; keep stderr quiet unless asked otherwise
    let default_filter = match cli.command {
        None => "warn",
        #[cfg(feature = "tui")]
        Some(Command::Tui) => "warn",
        Some(_) => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let use_color = !cli.no_color && atty_check();
    let options = AppOptions {
        config_path: cli.config,
        data_dir: cli.data_dir,
        ephemeral: cli.ephemeral,
    };

    match cli.command {
        None => {
            #[cfg(feature = "tui")]
            {
                tui::run(&options)?;
            }
            #[cfg(not(feature = "tui"))]
            {
                eprintln!("TUI not available (built without 'tui' feature). Use a subcommand.");
                eprintln!("Run with --help for usage.");
                std::process::exit(1);
            }
        }
        Some(Command::Decks) => {
            let app = app::App::new(&options)?;
            commands::decks::run(&app, &cli.format, use_color)?;
        }
        Some(Command::Cards { deck }) => {
            let app = app::App::new(&options)?;
            commands::cards::run(&app, &deck, &cli.format, use_color)?;
        }
        Some(Command::NewDeck { name }) => {
            let mut app = app::App::new(&options)?;
            commands::deck::run_new(&mut app, &name, &cli.format)?;
        }
        Some(Command::DeleteDeck { name }) => {
            let mut app = app::App::new(&options)?;
            commands::deck::run_delete(&mut app, &name, &cli.format)?;
        }
        Some(Command::Add { deck, a, b, c, a_image, b_image, c_image, generate }) => {
            let mut app = app::App::new(&options)?;
            let request = commands::add::AddRequest {
                deck,
                texts: [a, b, c],
                images: [a_image, b_image, c_image],
                generate,
            };
            commands::add::run(&mut app, request, &cli.format, use_color)?;
        }
        Some(Command::Favorite { id }) => {
            let mut app = app::App::new(&options)?;
            commands::card::run_favorite(&mut app, &id, &cli.format)?;
        }
        Some(Command::Delete { id }) => {
            let mut app = app::App::new(&options)?;
            commands::card::run_delete(&mut app, &id, &cli.format)?;
        }
        Some(Command::Generate { term, definition }) => {
            let app = app::App::new(&options)?;
            commands::generate::run(&app, &term, &definition, &cli.format)?;
        }
        #[cfg(feature = "tui")]
        Some(Command::Tui) => {
            tui::run(&options)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
