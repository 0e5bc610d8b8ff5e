// src/ui/tools.rs

//! Tools tab: scraper input plus the MKV-process and CSV-update triggers,
//! with their shared output log.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;

use super::state::UiState;

pub fn draw(frame: &mut Frame, area: Rect, state: &UiState) {
    let [input_area, log_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let input = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("[{}] ", state.scrape_kind.as_str()),
            Style::new().fg(Color::Cyan).bold(),
        ),
        Span::raw(state.scrape_input.as_str()),
        Span::styled("█", Style::new().fg(Color::Cyan)),
    ]))
    .block(Block::bordered().title(" Scrape (Ctrl+k to change kind) "));
    frame.render_widget(input, input_area);

    // Tail of the output; the log only appends.
    let visible = log_area.height.saturating_sub(2) as usize;
    let lines: Vec<&str> = state
        .tools_log
        .iter()
        .flat_map(|entry| entry.lines())
        .collect();
    let start = lines.len().saturating_sub(visible);
    let para = Paragraph::new(lines[start..].join("\n"))
        .wrap(Wrap { trim: false })
        .block(Block::bordered().title(" Output "));
    frame.render_widget(para, log_area);
}
