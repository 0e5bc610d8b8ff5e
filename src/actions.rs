// src/actions.rs

//! Action helper functions called by the key handlers. Each one spawns the
//! network work on a task and reports back over the UI channel.

use log::info;
use std::time::Instant;
use tokio::sync::mpsc;

use crate::app::{App, UiMessage};
use crate::monitor::{self, LaunchOptions, MonitorEvent, ProgressView};
use crate::ui::state::ToastKind;

// Start the batch upload session. Only one session may run at a time; a
// second start while the poller has not stopped is rejected outright.
pub(crate) fn start_upload(app: &mut App) {
    if app.state.session_active {
        app.state.push_toast(
            ToastKind::Error,
            "An upload session is already running",
            Instant::now(),
        );
        return;
    }
    info!("Action: batch upload requested");
    app.state.session_active = true;
    app.state.upload_log.clear();
    app.state.live_feed.clear();
    app.state.progress = Some(ProgressView::Pending);
    app.state.progress_hide_at = None;

    // Bridge monitor events into the UI channel, then run the launcher to
    // completion on its own task.
    let (monitor_tx, mut monitor_rx) = mpsc::unbounded_channel::<MonitorEvent>();
    let ui_tx = app.ui_tx.clone();
    tokio::spawn(async move {
        while let Some(event) = monitor_rx.recv().await {
            if ui_tx.send(UiMessage::Monitor(event)).is_err() {
                break;
            }
        }
    });
    tokio::spawn(monitor::launch_upload(
        app.api.clone(),
        monitor_tx,
        LaunchOptions::default(),
    ));
}

// Reload the recent-uploads table.
pub(crate) fn load_uploads(app: &App) {
    let api = app.api.clone();
    let ui_tx = app.ui_tx.clone();
    tokio::spawn(async move {
        match api.uploads_all().await {
            Ok(rows) => {
                let _ = ui_tx.send(UiMessage::UploadsLoaded(rows));
            }
            Err(e) => {
                let _ = ui_tx.send(UiMessage::Error(format!("Failed to load uploads: {:#}", e)));
            }
        }
    });
}

// Reload the database collections (movies, series, popular titles).
pub(crate) fn load_collections(app: &App) {
    let api = app.api.clone();
    let ui_tx = app.ui_tx.clone();
    tokio::spawn(async move {
        match api.db_collections().await {
            Ok(collections) => {
                let _ = ui_tx.send(UiMessage::CollectionsLoaded(collections));
            }
            Err(e) => {
                let _ = ui_tx.send(UiMessage::Error(format!(
                    "Failed to load collections: {:#}",
                    e
                )));
            }
        }
    });
}

// Add the typed title to the popular collection. The category comes from an
// exact index match, defaulting to movie for unknown titles.
pub(crate) fn add_popular(app: &mut App) {
    let title = app.state.popular_input.trim().to_string();
    if title.is_empty() {
        return;
    }
    let category = app.state.title_index.category_of(&title);
    let api = app.api.clone();
    let ui_tx = app.ui_tx.clone();
    tokio::spawn(async move {
        match api.add_popular(&title, category).await {
            Ok(()) => {
                let _ = ui_tx.send(UiMessage::Toast {
                    kind: ToastKind::Success,
                    text: "Popular title added".to_string(),
                });
                let _ = ui_tx.send(UiMessage::PopularChanged);
            }
            Err(e) => {
                let _ = ui_tx.send(UiMessage::Error(format!("{:#}", e)));
            }
        }
    });
    app.state.popular_input.clear();
    if let Some(ctl) = app.state.typeahead.controller(crate::ui::state::POPULAR_INPUT) {
        ctl.close();
    }
    app.state.suggestion_cursor = None;
}

// Delete a popular title. Only called once the confirmation prompt has been
// answered.
pub(crate) fn delete_popular(app: &App, id: String) {
    let api = app.api.clone();
    let ui_tx = app.ui_tx.clone();
    tokio::spawn(async move {
        match api.delete_popular(&id).await {
            Ok(()) => {
                let _ = ui_tx.send(UiMessage::Toast {
                    kind: ToastKind::Success,
                    text: "Removed".to_string(),
                });
                let _ = ui_tx.send(UiMessage::PopularChanged);
            }
            Err(e) => {
                let _ = ui_tx.send(UiMessage::Error(format!("Failed to remove: {:#}", e)));
            }
        }
    });
}

pub(crate) fn trigger_mkv(app: &mut App) {
    app.state
        .tools_log
        .push("Starting MKV process...".to_string());
    let api = app.api.clone();
    let ui_tx = app.ui_tx.clone();
    tokio::spawn(async move {
        match api.process_mkv().await {
            Ok(message) => {
                let _ = ui_tx.send(UiMessage::ToolOutput(format!("Success: {}", message)));
                let _ = ui_tx.send(UiMessage::Toast {
                    kind: ToastKind::Success,
                    text: "MKV process completed".to_string(),
                });
            }
            Err(e) => {
                let _ = ui_tx.send(UiMessage::ToolOutput(format!("Error: {:#}", e)));
                let _ = ui_tx.send(UiMessage::Toast {
                    kind: ToastKind::Error,
                    text: "MKV process failed".to_string(),
                });
            }
        }
    });
}

pub(crate) fn trigger_csv_update(app: &mut App) {
    app.state.tools_log.push("Updating CSV...".to_string());
    let api = app.api.clone();
    let ui_tx = app.ui_tx.clone();
    tokio::spawn(async move {
        match api.update_csv().await {
            Ok(message) => {
                let _ = ui_tx.send(UiMessage::ToolOutput(format!("Success: {}", message)));
                let _ = ui_tx.send(UiMessage::Toast {
                    kind: ToastKind::Success,
                    text: "CSV updated".to_string(),
                });
            }
            Err(e) => {
                let _ = ui_tx.send(UiMessage::ToolOutput(format!("Error: {:#}", e)));
                let _ = ui_tx.send(UiMessage::Toast {
                    kind: ToastKind::Error,
                    text: "CSV update failed".to_string(),
                });
            }
        }
    });
}

pub(crate) fn run_scrape(app: &mut App) {
    let name = app.state.scrape_input.trim().to_string();
    if name.is_empty() {
        app.state.push_toast(
            ToastKind::Error,
            format!("Please enter a {} name", app.state.scrape_kind.as_str()),
            Instant::now(),
        );
        return;
    }
    let kind = app.state.scrape_kind;
    app.state
        .tools_log
        .push(format!("Scraping {} \"{}\"...", kind.as_str(), name));
    let api = app.api.clone();
    let ui_tx = app.ui_tx.clone();
    tokio::spawn(async move {
        match api.scrape(kind, &name).await {
            Ok(pretty) => {
                let _ = ui_tx.send(UiMessage::ToolOutput(pretty));
                let _ = ui_tx.send(UiMessage::Toast {
                    kind: ToastKind::Success,
                    text: "Scraping successful".to_string(),
                });
            }
            Err(e) => {
                let _ = ui_tx.send(UiMessage::ToolOutput(format!("Error: {:#}", e)));
                let _ = ui_tx.send(UiMessage::Toast {
                    kind: ToastKind::Error,
                    text: "Scraping failed".to_string(),
                });
            }
        }
    });
}
