use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::Tabs;

use tricard_lib::flashcards::DeckScope;
use tricard_lib::navigation::View;

use super::app_state::TuiState;
use super::{card_form_widget, deck_list_widget, deck_view_widget, status_bar, study_widget};

pub fn draw(f: &mut Frame, state: &TuiState) {
    let size = f.area();

    // Tab bar + content area + status bar
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(size);

    draw_tabs(f, outer[0], state);

    let main_area = outer[1];
    match state.view() {
        View::DeckBrowser => deck_list_widget::draw(f, main_area, state),
        View::DeckDetail => deck_view_widget::draw(f, main_area, state),
        View::CardCreate | View::CardEdit => card_form_widget::draw(f, main_area, state),
        View::StudySession => study_widget::draw(f, main_area, state),
    }

    status_bar::draw(f, outer[2], state);
}

fn draw_tabs(f: &mut Frame, area: Rect, state: &TuiState) {
    let favorites = state.app.controller.storage().favorite_count();
    let titles = vec![
        " F1 Decks ".to_string(),
        " F2 Create Card ".to_string(),
        format!(" F3 Favorites ({}) ", favorites),
    ];

    let controller = &state.app.controller;
    let selected = match state.view() {
        View::CardCreate => 1,
        View::StudySession if controller.study().is_some_and(|s| *s.scope() == DeckScope::Favorites) => 2,
        _ => 0,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider("|");
    f.render_widget(tabs, area);
}
