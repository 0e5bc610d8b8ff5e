// src/ui/state.rs
// UI state structure shared by the draw pass and the key handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::api::{MovieDoc, PopularTitle, ScrapeKind, SeriesDoc, UploadResult, UploadRow};
use crate::monitor::{NoticeKind, ProgressView};
use crate::typeahead::{BindingRegistry, TitleIndex};

/// Registry key for the popular-titles input binding.
pub const POPULAR_INPUT: &str = "popular-input";

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Upload,
    Database,
    Popular,
    Tools,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Upload, Tab::Database, Tab::Popular, Tab::Tools];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Upload => "Upload",
            Tab::Database => "Database",
            Tab::Popular => "Popular",
            Tab::Tools => "Tools",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl From<NoticeKind> for ToastKind {
    fn from(kind: NoticeKind) -> Self {
        match kind {
            NoticeKind::Info => ToastKind::Info,
            NoticeKind::Success => ToastKind::Success,
            NoticeKind::Error => ToastKind::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub kind: ToastKind,
    pub expires_at: Instant,
}

/// A deferred, confirmable action; resolved by a later key event so nothing
/// ever blocks the interface.
#[derive(Debug, Clone)]
pub enum PendingAction {
    DeletePopular { id: String },
}

#[derive(Debug, Clone)]
pub struct ConfirmPrompt {
    pub question: String,
    pub action: PendingAction,
}

/// Everything the draw pass reads. Mutated only by the message drain and the
/// key handlers; rendering is a pure projection of this struct.
#[derive(Debug)]
pub struct UiState {
    pub tab: Tab,

    // Upload tab
    pub upload_log: Vec<String>,
    pub progress: Option<ProgressView>,
    pub progress_hide_at: Option<Instant>,
    pub live_feed: Vec<UploadResult>,
    pub uploads: Vec<UploadRow>,
    pub session_active: bool,

    // Database tab
    pub movies: Vec<MovieDoc>,
    pub series: Vec<SeriesDoc>,

    // Popular tab
    pub popular: Vec<PopularTitle>,
    pub popular_cursor: usize,
    pub popular_input: String,
    pub suggestion_cursor: Option<usize>,
    pub typeahead: BindingRegistry,
    pub title_index: Arc<TitleIndex>,

    // Tools tab
    pub tools_log: Vec<String>,
    pub scrape_kind: ScrapeKind,
    pub scrape_input: String,

    // Shared
    pub toasts: Vec<Toast>,
    pub last_error: Option<String>,
    pub confirm: Option<ConfirmPrompt>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: Tab::Upload,
            upload_log: Vec::new(),
            progress: None,
            progress_hide_at: None,
            live_feed: Vec::new(),
            uploads: Vec::new(),
            session_active: false,
            movies: Vec::new(),
            series: Vec::new(),
            popular: Vec::new(),
            popular_cursor: 0,
            popular_input: String::new(),
            suggestion_cursor: None,
            typeahead: BindingRegistry::default(),
            title_index: Arc::new(TitleIndex::default()),
            tools_log: Vec::new(),
            scrape_kind: ScrapeKind::Anime,
            scrape_input: String::new(),
            toasts: Vec::new(),
            last_error: None,
            confirm: None,
        }
    }
}

impl UiState {
    pub fn push_toast(&mut self, kind: ToastKind, text: impl Into<String>, now: Instant) {
        self.toasts.push(Toast {
            text: text.into(),
            kind,
            expires_at: now + TOAST_LIFETIME,
        });
    }

    /// Drops expired toasts and hides the progress display once its grace
    /// deadline has passed.
    pub fn expire(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
        if let Some(deadline) = self.progress_hide_at {
            if now >= deadline {
                self.progress = None;
                self.progress_hide_at = None;
            }
        }
    }

    /// Suggestions currently open for the popular input, if any.
    pub fn open_suggestions(&self) -> Option<&[String]> {
        self.typeahead.get(POPULAR_INPUT)?.suggestions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire() {
        let now = Instant::now();
        let mut state = UiState::default();
        state.push_toast(ToastKind::Info, "hello", now);
        state.expire(now + Duration::from_secs(1));
        assert_eq!(state.toasts.len(), 1);
        state.expire(now + TOAST_LIFETIME);
        assert!(state.toasts.is_empty());
    }

    #[test]
    fn progress_hides_only_after_grace_deadline() {
        let now = Instant::now();
        let mut state = UiState::default();
        state.progress = Some(ProgressView::Pending);
        state.progress_hide_at = Some(now + Duration::from_secs(10));

        state.expire(now + Duration::from_secs(9));
        assert!(state.progress.is_some());

        state.expire(now + Duration::from_secs(10));
        assert!(state.progress.is_none());
        assert!(state.progress_hide_at.is_none());
    }

    #[test]
    fn tab_cycle_wraps() {
        assert_eq!(Tab::Tools.next(), Tab::Upload);
        assert_eq!(Tab::Upload.prev(), Tab::Tools);
    }
}
