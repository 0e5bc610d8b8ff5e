// src/ui/upload.rs

//! Upload tab: progress display, live feed of completed files, session log
//! and the recent-uploads table.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, Gauge, List, ListItem, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::api::UploadResult;
use crate::monitor::ProgressView;

use super::state::UiState;

pub fn draw(frame: &mut Frame, area: Rect, state: &UiState) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let progress_height = if state.progress.is_some() { 4 } else { 0 };
    let [progress_area, feed_area, log_area] = Layout::vertical([
        Constraint::Length(progress_height),
        Constraint::Length(7),
        Constraint::Min(0),
    ])
    .areas(left);

    if let Some(view) = &state.progress {
        draw_progress(frame, progress_area, view);
    }
    draw_feed(frame, feed_area, &state.live_feed);
    draw_log(frame, log_area, &state.upload_log);
    draw_table(frame, right, state);
}

fn draw_progress(frame: &mut Frame, area: Rect, view: &ProgressView) {
    let block = Block::bordered().title(" Batch progress ");
    match view {
        ProgressView::Pending => {
            frame.render_widget(
                Paragraph::new("Waiting for the server to report files...").block(block),
                area,
            );
        }
        ProgressView::NoFilesFound => {
            frame.render_widget(
                Paragraph::new("No files found in downloads folder")
                    .style(Style::new().fg(Color::Yellow))
                    .block(block),
                area,
            );
        }
        ProgressView::Active {
            file,
            index,
            total,
            percent,
        } => {
            let label = format!("Current: {}  ({}/{})  {}%", file, index, total, percent);
            let gauge = Gauge::default()
                .block(block)
                .gauge_style(Style::new().fg(Color::Cyan))
                .percent(u16::from(*percent))
                .label(label);
            frame.render_widget(gauge, area);
        }
    }
}

fn feed_line(result: &UploadResult) -> Line<'_> {
    let icon = if result.uploaded { "✅" } else { "❌" };
    let code = result.file_code.as_deref().unwrap_or("");
    Line::from(format!("{} {}  {}", icon, result.file, code))
}

fn draw_feed(frame: &mut Frame, area: Rect, feed: &[UploadResult]) {
    let items: Vec<ListItem> = feed.iter().map(|r| ListItem::new(feed_line(r))).collect();
    let list = List::new(items).block(Block::bordered().title(" Live uploads "));
    frame.render_widget(list, area);
}

fn draw_log(frame: &mut Frame, area: Rect, log: &[String]) {
    // Keep the tail in view; the log only ever appends.
    let visible = area.height.saturating_sub(2) as usize;
    let start = log.len().saturating_sub(visible);
    let text = log[start..].join("\n");
    let para = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::bordered().title(" Upload log "));
    frame.render_widget(para, area);
}

fn draw_table(frame: &mut Frame, area: Rect, state: &UiState) {
    let rows: Vec<Row> = state
        .uploads
        .iter()
        .map(|u| {
            Row::new(vec![
                u.display_name().to_string(),
                u.file_code.clone(),
                u.file_size.clone().unwrap_or_else(|| "-".to_string()),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(60),
            Constraint::Percentage(25),
            Constraint::Percentage(15),
        ],
    )
    .header(Row::new(vec!["Title", "Code", "Size"]).style(Style::new().bold()))
    .block(Block::bordered().title(format!(" Recent uploads ({}) ", state.uploads.len())));
    frame.render_widget(table, area);
}
