// src/ui/database.rs

//! Database tab: read-only movie and series collections.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem};
use ratatui::Frame;

use super::state::UiState;

fn entry<'a>(title: &'a str, created_at: Option<&'a str>) -> ListItem<'a> {
    let mut spans = vec![Span::raw(title)];
    if let Some(date) = created_at {
        spans.push(Span::styled(
            format!("  {}", date),
            Style::new().fg(Color::DarkGray),
        ));
    }
    ListItem::new(Line::from(spans))
}

pub fn draw(frame: &mut Frame, area: Rect, state: &UiState) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    let movies: Vec<ListItem> = state
        .movies
        .iter()
        .map(|m| entry(&m.title, m.created_at.as_deref()))
        .collect();
    frame.render_widget(
        List::new(movies).block(
            Block::bordered().title(format!(" Movies ({}) ", state.movies.len())),
        ),
        left,
    );

    let series: Vec<ListItem> = state
        .series
        .iter()
        .map(|s| entry(&s.show_title, s.created_at.as_deref()))
        .collect();
    frame.render_widget(
        List::new(series).block(
            Block::bordered().title(format!(" Series ({}) ", state.series.len())),
        ),
        right,
    );
}
