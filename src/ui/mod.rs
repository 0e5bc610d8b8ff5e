// src/ui/mod.rs

//! Rendering. Every panel draws from `UiState` only; nothing in here talks
//! to the network or mutates state beyond list cursors.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;

pub mod state;

mod database;
mod popular;
mod tools;
mod upload;

use state::{Tab, ToastKind, UiState};

pub fn draw(frame: &mut Frame, state: &mut UiState) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, state);

    match state.tab {
        Tab::Upload => upload::draw(frame, body, state),
        Tab::Database => database::draw(frame, body, state),
        Tab::Popular => popular::draw(frame, body, state),
        Tab::Tools => tools::draw(frame, body, state),
    }

    draw_footer(frame, footer, state);
    draw_toasts(frame, state);
    draw_confirm(frame, state);
}

fn draw_header(frame: &mut Frame, area: Rect, state: &UiState) {
    let titles = Tab::ALL.iter().map(|t| t.title());
    let tabs = Tabs::new(titles)
        .select(state.tab.index())
        .highlight_style(Style::new().fg(Color::Cyan).bold())
        .block(Block::bordered().title(format!(" mediadash — {} ", state.tab.title())));
    frame.render_widget(tabs, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, state: &UiState) {
    let hints = match state.tab {
        Tab::Upload => "Tab switch · u start upload · r reload table · Ctrl+q quit",
        Tab::Database => "Tab switch · r reload · Ctrl+q quit",
        Tab::Popular => {
            "type to search · ↑/↓ move · Enter select/add · Del remove · Esc close · Ctrl+q quit"
        }
        Tab::Tools => "type name · Enter scrape · Ctrl+k kind · F2 MKV · F3 CSV · Ctrl+q quit",
    };
    let line = match &state.last_error {
        Some(err) => Line::from(format!("Error: {}", err)).style(Style::new().fg(Color::Red)),
        None => Line::from(hints).style(Style::new().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn toast_style(kind: ToastKind) -> Style {
    match kind {
        ToastKind::Info => Style::new().fg(Color::Cyan),
        ToastKind::Success => Style::new().fg(Color::Green),
        ToastKind::Error => Style::new().fg(Color::Red),
    }
}

// Toasts stack below the header on the right edge.
fn draw_toasts(frame: &mut Frame, state: &UiState) {
    let area = frame.area();
    let width = 34u16.min(area.width);
    for (i, toast) in state.toasts.iter().enumerate() {
        let y = 3 + (i as u16) * 3;
        if y + 3 > area.height {
            break;
        }
        let rect = Rect::new(area.width.saturating_sub(width), y, width, 3);
        frame.render_widget(Clear, rect);
        let para = Paragraph::new(toast.text.as_str())
            .wrap(Wrap { trim: true })
            .block(Block::bordered().border_style(toast_style(toast.kind)));
        frame.render_widget(para, rect);
    }
}

fn draw_confirm(frame: &mut Frame, state: &UiState) {
    let Some(prompt) = &state.confirm else {
        return;
    };
    let rect = centered_rect(frame.area(), 44, 5);
    frame.render_widget(Clear, rect);
    let body = format!("{}\n\n[y] confirm    [n] cancel", prompt.question);
    let para = Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .block(Block::bordered().title(" Confirm "));
    frame.render_widget(para, rect);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
