// src/app.rs

//! The application shell: owns the API client and the UI state, drains
//! messages from background tasks and maps key events to actions.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::error;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::actions;
use crate::api::{ApiClient, DbCollections, UploadRow};
use crate::monitor::{MonitorEvent, HIDE_GRACE};
use crate::typeahead::TitleIndex;
use crate::ui;
use crate::ui::state::{ConfirmPrompt, PendingAction, Tab, ToastKind, UiState, POPULAR_INPUT};

/// Messages sent back to the UI loop from background tasks.
#[derive(Debug)]
pub enum UiMessage {
    /// Event from the upload monitor
    Monitor(MonitorEvent),

    /// Fresh rows for the recent-uploads table
    UploadsLoaded(Vec<UploadRow>),

    /// Fresh database collections; also rebuilds the typeahead index
    CollectionsLoaded(DbCollections),

    /// A popular title was added or removed; the collections are stale
    PopularChanged,

    /// A line for the tools output log
    ToolOutput(String),

    /// Transient notification
    Toast { kind: ToastKind, text: String },

    /// Error from a background task
    Error(String),
}

pub struct App {
    pub(crate) api: ApiClient,
    pub state: UiState,
    pub(crate) ui_tx: mpsc::UnboundedSender<UiMessage>,
    ui_rx: mpsc::UnboundedReceiver<UiMessage>,
}

impl App {
    pub fn new(api: ApiClient) -> Self {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        Self {
            api,
            state: UiState::default(),
            ui_tx,
            ui_rx,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut terminal = ratatui::init();
        let result = self.event_loop(&mut terminal).await;
        ratatui::restore();
        result
    }

    async fn event_loop(&mut self, terminal: &mut ratatui::DefaultTerminal) -> Result<()> {
        // Populate the default tab up front
        actions::load_uploads(self);
        loop {
            self.drain_messages();
            self.state.expire(Instant::now());
            terminal.draw(|frame| ui::draw(frame, &mut self.state))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && self.handle_key(key) {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn drain_messages(&mut self) {
        while let Ok(message) = self.ui_rx.try_recv() {
            self.apply_message(message, Instant::now());
        }
    }

    pub fn apply_message(&mut self, message: UiMessage, now: Instant) {
        match message {
            UiMessage::Monitor(event) => self.apply_monitor_event(event, now),
            UiMessage::UploadsLoaded(rows) => {
                self.state.uploads = rows;
                self.state.last_error = None;
            }
            UiMessage::CollectionsLoaded(collections) => {
                let index = Arc::new(TitleIndex::from_collections(&collections));
                self.state.title_index = index.clone();
                // Re-binding replaces any previous handler for this input
                self.state.typeahead.bind(POPULAR_INPUT, index);
                self.state.movies = collections.movies;
                self.state.series = collections.series;
                self.state.popular = collections.popular;
                if self.state.popular_cursor >= self.state.popular.len() {
                    self.state.popular_cursor = self.state.popular.len().saturating_sub(1);
                }
                self.state.last_error = None;
            }
            UiMessage::PopularChanged => actions::load_collections(self),
            UiMessage::ToolOutput(text) => self.state.tools_log.push(text),
            UiMessage::Toast { kind, text } => self.state.push_toast(kind, text, now),
            UiMessage::Error(text) => {
                error!("Background task error: {}", text);
                self.state.last_error = Some(text.clone());
                self.state.push_toast(ToastKind::Error, text, now);
            }
        }
    }

    fn apply_monitor_event(&mut self, event: MonitorEvent, now: Instant) {
        match event {
            MonitorEvent::Log(line) => self.state.upload_log.push(line),
            MonitorEvent::Progress(view) => self.state.progress = Some(view),
            MonitorEvent::FeedChanged(feed) => self.state.live_feed = feed,
            MonitorEvent::RefreshUploads => actions::load_uploads(self),
            MonitorEvent::Notice { kind, text } => {
                self.state.push_toast(kind.into(), text, now)
            }
            MonitorEvent::LaunchRejected(reason) => {
                self.state.session_active = false;
                self.state.progress = None;
                self.state.progress_hide_at = None;
                self.state.push_toast(ToastKind::Error, reason, now);
            }
            MonitorEvent::SessionFinished(_) => {
                self.state.session_active = false;
                self.state.progress_hide_at = Some(now + HIDE_GRACE);
            }
        }
    }

    /// Returns true when the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => return true,
                KeyCode::Char('k') if self.state.tab == Tab::Tools => {
                    self.state.scrape_kind = self.state.scrape_kind.next();
                }
                _ => {}
            }
            return false;
        }

        // An open confirmation prompt swallows everything but its answer
        if self.state.confirm.is_some() {
            match key.code {
                KeyCode::Char('y') => {
                    if let Some(prompt) = self.state.confirm.take() {
                        match prompt.action {
                            PendingAction::DeletePopular { id } => {
                                actions::delete_popular(self, id)
                            }
                        }
                    }
                }
                KeyCode::Char('n') | KeyCode::Esc => self.state.confirm = None,
                _ => {}
            }
            return false;
        }

        match key.code {
            KeyCode::Tab => self.switch_tab(self.state.tab.next()),
            KeyCode::BackTab => self.switch_tab(self.state.tab.prev()),
            _ => match self.state.tab {
                Tab::Upload => self.handle_upload_key(key.code),
                Tab::Database => {
                    if key.code == KeyCode::Char('r') {
                        actions::load_collections(self);
                    }
                }
                Tab::Popular => self.handle_popular_key(key.code),
                Tab::Tools => self.handle_tools_key(key.code),
            },
        }
        false
    }

    fn switch_tab(&mut self, tab: Tab) {
        self.state.tab = tab;
        // Auto-load the data behind the tab, like the page did on nav clicks
        match tab {
            Tab::Upload => actions::load_uploads(self),
            Tab::Database | Tab::Popular => actions::load_collections(self),
            Tab::Tools => {}
        }
    }

    fn handle_upload_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('u') => actions::start_upload(self),
            KeyCode::Char('r') => actions::load_uploads(self),
            _ => {}
        }
    }

    fn handle_popular_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => {
                self.state.popular_input.push(c);
                self.popular_input_changed();
            }
            KeyCode::Backspace => {
                self.state.popular_input.pop();
                self.popular_input_changed();
            }
            KeyCode::Esc => {
                // The outside-interaction path: close without committing
                if let Some(ctl) = self.state.typeahead.controller(POPULAR_INPUT) {
                    ctl.close();
                }
                self.state.suggestion_cursor = None;
            }
            KeyCode::Down => self.move_popular_cursor(1),
            KeyCode::Up => self.move_popular_cursor(-1),
            KeyCode::Enter => {
                if let Some(i) = self.state.suggestion_cursor.take() {
                    if let Some(ctl) = self.state.typeahead.controller(POPULAR_INPUT) {
                        if let Some(title) = ctl.select(i) {
                            self.state.popular_input = title;
                        }
                    }
                } else {
                    actions::add_popular(self);
                }
            }
            KeyCode::Delete => {
                if let Some(entry) = self.state.popular.get(self.state.popular_cursor) {
                    self.state.confirm = Some(ConfirmPrompt {
                        question: format!("Remove \"{}\" from the popular list?", entry.title),
                        action: PendingAction::DeletePopular {
                            id: entry.id.clone(),
                        },
                    });
                }
            }
            _ => {}
        }
    }

    fn popular_input_changed(&mut self) {
        self.state.suggestion_cursor = None;
        let value = self.state.popular_input.clone();
        self.state.typeahead.handle_input(POPULAR_INPUT, &value);
    }

    fn move_popular_cursor(&mut self, delta: i32) {
        // Arrow keys walk the suggestion list while it is open, otherwise
        // the popular list itself.
        let open_len = self.state.open_suggestions().map(|s| s.len());
        if let Some(len) = open_len {
            if len == 0 {
                return;
            }
            let next = match (self.state.suggestion_cursor, delta) {
                (None, _) => 0,
                (Some(i), 1) => (i + 1).min(len - 1),
                (Some(i), _) => i.saturating_sub(1),
            };
            self.state.suggestion_cursor = Some(next);
        } else if !self.state.popular.is_empty() {
            let len = self.state.popular.len();
            let cur = self.state.popular_cursor.min(len - 1);
            self.state.popular_cursor = if delta > 0 {
                (cur + 1).min(len - 1)
            } else {
                cur.saturating_sub(1)
            };
        }
    }

    fn handle_tools_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => {
                self.state.scrape_input.push(c);
            }
            KeyCode::Backspace => {
                self.state.scrape_input.pop();
            }
            KeyCode::Enter => actions::run_scrape(self),
            KeyCode::F(2) => actions::trigger_mkv(self),
            KeyCode::F(3) => actions::trigger_csv_update(self),
            _ => {}
        }
    }
}
