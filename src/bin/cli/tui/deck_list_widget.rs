use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use tricard_lib::flashcards::DeckScope;

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .title(" Decks ")
        .title_bottom(Line::from(format!(" {} ", state.app.storage_label())).right_aligned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let entries = state.app.controller.browser_entries();
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let (prefix, style) = match entry.scope {
                DeckScope::Favorites => {
                    ("\u{2605} ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                }
                DeckScope::AllCards => {
                    ("\u{25a4} ", Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
                }
                DeckScope::Named(_) => ("\u{2022} ", Style::default().fg(Color::White)),
            };
            let noun = if entry.card_count == 1 { "card" } else { "cards" };
            let text = format!("{}{}  ({} {})", prefix, entry.name(), entry.card_count, noun);
            ListItem::new(text).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.browser_selected));

    f.render_stateful_widget(list, area, &mut list_state);
}
