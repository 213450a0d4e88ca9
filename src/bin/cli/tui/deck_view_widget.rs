use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use tricard_lib::flashcards::Side;

use super::app_state::TuiState;
use crate::render::terminal::face_preview;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let controller = &state.app.controller;
    let deck = controller.navigator().selected_named_deck().unwrap_or_default();
    let cards = controller.deck_cards();

    let block = Block::default()
        .title(format!(" {} ({} cards) ", deck, cards.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if cards.is_empty() {
        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  This deck has no cards yet.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Press a to add one.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(help_text).block(block), area);
        return;
    }

    let preview_width = (area.width.saturating_sub(12) / 3).max(8) as usize;
    let items: Vec<ListItem> = cards
        .iter()
        .map(|card| {
            let star = if card.is_favorite { "\u{2605} " } else { "  " };
            let mut spans = vec![Span::styled(star, Style::default().fg(Color::Yellow))];
            for side in Side::ALL {
                let style = match side {
                    Side::A => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                    Side::B => Style::default().fg(Color::Gray),
                    Side::C => Style::default().fg(Color::DarkGray),
                };
                spans.push(Span::styled(
                    format!("{:<width$}  ", face_preview(card.face(side), preview_width), width = preview_width),
                    style,
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.detail_selected));

    f.render_stateful_widget(list, area, &mut list_state);
}
