use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use tricard_lib::navigation::View;

use super::app_state::{Mode, PendingDelete, TuiState};

pub fn draw(f: &mut Frame, area: Rect, state: &TuiState) {
    // Show flash message if present
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Green).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    match &state.mode {
        Mode::NewDeck => {
            let text = format!(" New deck: {}\u{2588}", state.input_text);
            let prompt = Paragraph::new(text)
                .style(Style::default().bg(Color::Blue).fg(Color::White));
            f.render_widget(prompt, area);
        }
        Mode::ImagePath(side) => {
            let text = format!(" Image for side {}: {}\u{2588}", side, state.input_text);
            let prompt = Paragraph::new(text)
                .style(Style::default().bg(Color::Magenta).fg(Color::White));
            f.render_widget(prompt, area);
        }
        Mode::Confirm(pending) => {
            let text = match pending {
                PendingDelete::Deck(scope) => format!(
                    " Delete the \"{}\" deck and all its cards? (y/n) ",
                    scope
                ),
                PendingDelete::Card(_) => " Delete this card? (y/n) ".to_string(),
            };
            let prompt = Paragraph::new(text)
                .style(Style::default().bg(Color::Red).fg(Color::White));
            f.render_widget(prompt, area);
        }
        Mode::Normal => {
            let hints = match state.view() {
                View::DeckBrowser => {
                    " j/k: navigate  Enter: open  n: new deck  d: delete deck  c: create card  q: quit "
                }
                View::DeckDetail => {
                    " Enter: learn  a: add card  e: edit  s: favorite  x: delete  Esc: back  q: quit "
                }
                View::CardCreate | View::CardEdit => {
                    " Tab: next field  ^S: save  ^G: generate side 3  ^O: attach image  ^X: remove image  Esc: cancel "
                }
                View::StudySession => {
                    " Space: flip  h/l: previous/next  s: favorite  x: delete  Esc: back  q: quit "
                }
            };

            let status = Paragraph::new(hints)
                .style(Style::default().bg(Color::DarkGray).fg(Color::White));
            f.render_widget(status, area);
        }
    }
}
