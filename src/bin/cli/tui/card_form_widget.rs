use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use tricard_lib::editor::CardEditor;
use tricard_lib::flashcards::Side;

use super::app_state::{FormField, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let Some(editor) = state.app.controller.editor() else {
        return;
    };

    let title = if editor.is_edit() { " Edit Card " } else { " Create New Card " };
    let outer = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Min(3),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(inner);

    draw_deck_field(f, rows[0], state, editor);
    for side in Side::ALL {
        draw_side_field(f, rows[1 + side.index()], state, editor, side);
    }
    draw_messages(f, rows[4], state, editor);
}

fn field_block(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        })
}

fn draw_deck_field(f: &mut Frame, area: Rect, state: &TuiState, editor: &CardEditor) {
    let focused = state.form_field == FormField::Deck;
    let mut title = " Deck ".to_string();
    if editor.is_deck_locked() {
        title.push_str("(locked) ");
    }

    let mut spans = vec![Span::raw(editor.draft().deck.clone())];
    if focused && !editor.is_deck_locked() {
        spans.push(Span::raw("\u{2588}"));
        let suggestions = state.deck_suggestions();
        if !suggestions.is_empty() {
            spans.push(Span::styled(
                format!("   Ctrl-n: {}", suggestions.join(", ")),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(field_block(title, focused));
    f.render_widget(paragraph, area);
}

fn draw_side_field(f: &mut Frame, area: Rect, state: &TuiState, editor: &CardEditor, side: Side) {
    let focused = state.form_field == FormField::Side(side);
    let face = editor.draft().face(side);

    let mut title = format!(" {} ", side.label());
    if face.image.is_some() {
        title.push_str("[image attached] ");
    }
    if side == Side::C && editor.is_generating() {
        title.push_str("generating\u{2026} ");
    }

    let mut text = face.text_or_empty().to_string();
    if focused {
        text.push('\u{2588}');
    }

    let paragraph = Paragraph::new(text)
        .block(field_block(title, focused))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_messages(f: &mut Frame, area: Rect, state: &TuiState, editor: &CardEditor) {
    let line = if let Some(error) = editor.error() {
        Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red)))
    } else if let Some(notice) = editor.notice() {
        Line::from(Span::styled(notice.to_string(), Style::default().fg(Color::Green)))
    } else if !state.app.controller.generation_available() {
        Line::from(Span::styled(
            "API Key not configured. AI features disabled.",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from("")
    };

    f.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}
