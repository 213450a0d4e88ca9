use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::app_state::TuiState;

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    let Some(session) = state.app.controller.study() else {
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", session.scope()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let Some(card) = session.current() else {
        let help_text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No cards to study here.",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Press Esc to go back.",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(help_text).block(block), area);
        return;
    };

    let side = session.current_side();
    let face = card.face(side);
    let star = if card.is_favorite { "\u{2605}" } else { "\u{2606}" };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Card {} / {}", session.current_index() + 1, session.len()),
                Style::default().fg(Color::Gray),
            ),
            Span::raw("   "),
            Span::styled(star, Style::default().fg(Color::Yellow)),
            Span::raw("   "),
            Span::styled(card.deck.clone(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            side.label(),
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    // Dim the face while a flip is in progress
    let face_style = if session.is_transitioning() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    };
    for text_line in face.text_or_empty().lines() {
        lines.push(Line::from(Span::styled(text_line.to_string(), face_style)));
    }
    if face.image.is_some() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("[image]", Style::default().fg(Color::Cyan))));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
