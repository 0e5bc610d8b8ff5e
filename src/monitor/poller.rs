// src/monitor/poller.rs

//! The polling state machine for one upload session.

use log::warn;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use crate::api::{ApiClient, StatusSnapshot};
use crate::monitor::differ::ResultDiffer;
use crate::monitor::feed::LiveFeed;
use crate::monitor::messages::{MonitorEvent, NoticeKind, ProgressView, SessionSummary};
use crate::monitor::throttle::{ThrottledRefresher, IDLE_REFRESH};

/// Fixed period between status polls.
pub const POLL_PERIOD: Duration = Duration::from_millis(1000);

/// How long the progress display stays visible after the session finishes,
/// so the final state can be read.
pub const HIDE_GRACE: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Idle,
    Polling,
    /// Terminal; no further ticks are handled once reached.
    Stopped,
}

/// Owns one monitoring session: the diff cursor, the live feed, the refresh
/// throttle and the state machine itself. Snapshots are folded in through
/// [`StatusPoller::handle_snapshot`], which is driven by [`StatusPoller::run`]
/// in production and called directly in tests.
#[derive(Debug)]
pub struct StatusPoller {
    state: PollerState,
    differ: ResultDiffer,
    feed: LiveFeed,
    refresher: ThrottledRefresher,
    events: mpsc::UnboundedSender<MonitorEvent>,
}

impl StatusPoller {
    pub fn new(events: mpsc::UnboundedSender<MonitorEvent>, now: Instant) -> Self {
        Self {
            state: PollerState::Idle,
            differ: ResultDiffer::new(),
            feed: LiveFeed::default(),
            refresher: ThrottledRefresher::new(IDLE_REFRESH, now),
            events,
        }
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Enters `Polling`. A no-op once the session has stopped.
    pub fn begin(&mut self) {
        if self.state == PollerState::Idle {
            self.state = PollerState::Polling;
        }
    }

    /// Single-shot transition to `Stopped`. Returns whether this call
    /// performed the transition.
    fn finish(&mut self) -> bool {
        if self.state == PollerState::Polling {
            self.state = PollerState::Stopped;
            true
        } else {
            false
        }
    }

    fn send(&self, event: MonitorEvent) {
        // The receiver going away just means the UI is shutting down.
        let _ = self.events.send(event);
    }

    /// Folds one snapshot into the session state and emits the resulting
    /// events. Returns the state after the tick; `Stopped` means the run
    /// loop must not issue another fetch.
    pub fn handle_snapshot(&mut self, status: &StatusSnapshot, now: Instant) -> PollerState {
        if self.state != PollerState::Polling {
            return self.state;
        }

        if status.total_files > 0 {
            self.send(MonitorEvent::Progress(ProgressView::Active {
                file: status.current_file.clone(),
                index: status.current_index,
                total: status.total_files,
                percent: status.current_file_percent.min(100),
            }));
        } else if !status.is_uploading {
            self.send(MonitorEvent::Progress(ProgressView::NoFilesFound));
        }

        let fresh = self.differ.diff(&status.results);
        if !fresh.is_empty() {
            self.feed.push(fresh);
            self.send(MonitorEvent::FeedChanged(self.feed.to_vec()));
            self.refresher.mark_changed(now);
            self.send(MonitorEvent::RefreshUploads);
        } else if status.is_uploading && self.refresher.poke_stalled(now) {
            self.send(MonitorEvent::RefreshUploads);
        }

        if !status.is_uploading {
            self.finish();
            self.send(MonitorEvent::Log("Upload session completed.".to_string()));
            if !status.results.is_empty() {
                for r in &status.results {
                    let icon = if r.uploaded { "✅" } else { "❌" };
                    let code = r.file_code.as_deref().unwrap_or("-");
                    self.send(MonitorEvent::Log(format!(
                        "{} {} (Code: {})",
                        icon, r.file, code
                    )));
                }
            } else if status.total_files == 0 {
                self.send(MonitorEvent::Log(
                    "⚠️ No video files were found to upload in the downloads directory."
                        .to_string(),
                ));
            }
            self.send(MonitorEvent::Notice {
                kind: NoticeKind::Success,
                text: "Batch upload finished".to_string(),
            });
            // One final forced refresh so the table reflects the whole session
            self.send(MonitorEvent::RefreshUploads);
            self.send(MonitorEvent::SessionFinished(SessionSummary {
                results: status.results.clone(),
                total_files: status.total_files,
            }));
        }

        self.state
    }

    /// Drives the session at the fixed poll cadence. Ticks are strictly
    /// sequential: the next fetch is only issued after the previous tick's
    /// handling has completed. A failed fetch is logged and the loop
    /// continues; a single dropped poll must not abort a healthy session.
    pub async fn run(mut self, api: ApiClient) {
        self.begin();
        let mut ticker = tokio::time::interval(POLL_PERIOD);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first interval tick completes immediately; skip it so the
        // first fetch happens one period after launch.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match api.upload_status().await {
                Ok(status) => {
                    if self.handle_snapshot(&status, Instant::now()) == PollerState::Stopped {
                        break;
                    }
                }
                Err(e) => warn!("Status poll failed: {:#}", e),
            }
        }
    }
}
