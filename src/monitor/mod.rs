// src/monitor/mod.rs

//! Batch upload monitor: launches the server-side job, polls its status and
//! turns raw snapshots into UI events.

pub mod differ;
pub mod feed;
pub mod launcher;
pub mod messages;
pub mod poller;
pub mod throttle;

pub use differ::ResultDiffer;
pub use feed::{LiveFeed, FEED_CAP};
pub use launcher::{launch_upload, LaunchOptions};
pub use messages::{MonitorEvent, NoticeKind, ProgressView, SessionSummary};
pub use poller::{PollerState, StatusPoller, HIDE_GRACE, POLL_PERIOD};
pub use throttle::{ThrottledRefresher, IDLE_REFRESH};
