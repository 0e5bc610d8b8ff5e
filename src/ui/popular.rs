// src/ui/popular.rs

//! Popular tab: the typeahead input, its transient suggestion list and the
//! popular-titles collection.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use super::state::UiState;

pub fn draw(frame: &mut Frame, area: Rect, state: &UiState) {
    let [input_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let input = Paragraph::new(Line::from(vec![
        Span::raw(state.popular_input.as_str()),
        Span::styled("█", Style::new().fg(Color::Cyan)),
    ]))
    .block(Block::bordered().title(" Add popular title "));
    frame.render_widget(input, input_area);

    draw_list(frame, list_area, state);

    // The suggestion popup overlays the list, anchored under the input.
    if let Some(suggestions) = state.open_suggestions() {
        draw_suggestions(frame, input_area, state, suggestions);
    }
}

fn draw_list(frame: &mut Frame, area: Rect, state: &UiState) {
    let items: Vec<ListItem> = state
        .popular
        .iter()
        .map(|p| {
            ListItem::new(Line::from(vec![
                Span::raw(p.title.as_str()),
                Span::styled(
                    format!("  [{}]", p.category.as_str()),
                    Style::new().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    let list = List::new(items)
        .highlight_style(Style::new().fg(Color::Cyan).bold())
        .highlight_symbol("> ")
        .block(Block::bordered().title(format!(" Popular titles ({}) ", state.popular.len())));
    let mut list_state = ListState::default();
    if !state.popular.is_empty() {
        list_state.select(Some(state.popular_cursor.min(state.popular.len() - 1)));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn draw_suggestions(frame: &mut Frame, input_area: Rect, state: &UiState, suggestions: &[String]) {
    if suggestions.is_empty() {
        return;
    }
    let height = (suggestions.len() as u16 + 2).min(13);
    let rect = Rect::new(
        input_area.x,
        input_area.y + input_area.height,
        input_area.width.min(48),
        height,
    )
    .intersection(frame.area());
    frame.render_widget(Clear, rect);

    let items: Vec<ListItem> = suggestions
        .iter()
        .map(|s| ListItem::new(s.as_str()))
        .collect();
    let list = List::new(items)
        .highlight_style(Style::new().fg(Color::Black).bg(Color::Cyan))
        .block(Block::bordered().title(" Suggestions "));
    let mut list_state = ListState::default();
    list_state.select(state.suggestion_cursor);
    frame.render_stateful_widget(list, rect, &mut list_state);
}
