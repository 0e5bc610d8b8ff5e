// src/monitor/messages.rs

//! Defines the message types sent from the upload monitor to the UI.

use crate::api::UploadResult;

/// What the progress display should show for the current tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressView {
    /// The job was accepted but has not reported a file yet.
    Pending,
    Active {
        file: String,
        index: u32,
        total: u32,
        percent: u8,
    },
    /// The finished job never saw an eligible file. Distinct from an
    /// in-progress job that has not reported a file yet.
    NoFilesFound,
}

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Final accounting for a finished session, used for the completion log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub results: Vec<UploadResult>,
    pub total_files: u32,
}

/// Events that can be sent from the upload monitor to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    /// A line for the upload log panel
    Log(String),

    /// Progress display update for the current tick
    Progress(ProgressView),

    /// The bounded live feed changed; carries the full list to render,
    /// most recent first
    FeedChanged(Vec<UploadResult>),

    /// The uploads table should be reloaded now
    RefreshUploads,

    /// Transient notification, shown as a toast
    Notice { kind: NoticeKind, text: String },

    /// The job-start request was refused; no poller was created
    LaunchRejected(String),

    /// The poller reached `Stopped`; the progress display should be hidden
    /// after the grace period
    SessionFinished(SessionSummary),
}
