// src/monitor/launcher.rs

use log::{error, info};
use std::time::Instant;
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::monitor::messages::{MonitorEvent, NoticeKind};
use crate::monitor::poller::StatusPoller;

#[derive(Debug, Clone, Copy)]
pub struct LaunchOptions {
    /// Ask the server to delete source files after a successful upload.
    pub delete_after: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self { delete_after: true }
    }
}

/// Issues the job-start request exactly once. On acceptance a poller is
/// created and driven to completion; this future resolves when the session
/// reaches `Stopped`. On rejection the reason is reported and no poller is
/// created — side effects end here.
pub async fn launch_upload(
    api: ApiClient,
    events: mpsc::UnboundedSender<MonitorEvent>,
    options: LaunchOptions,
) {
    let _ = events.send(MonitorEvent::Log(
        "Initializing upload process...".to_string(),
    ));
    let _ = events.send(MonitorEvent::Notice {
        kind: NoticeKind::Info,
        text: "Batch upload started".to_string(),
    });

    match api.start_upload(options.delete_after).await {
        Ok(_) => {
            info!("Upload job accepted, starting status poller");
            let _ = events.send(MonitorEvent::Log(
                "Background job started. Polling status...".to_string(),
            ));
            let poller = StatusPoller::new(events, Instant::now());
            poller.run(api).await;
        }
        Err(e) => {
            let reason = format!("{:#}", e);
            error!("Upload launch rejected: {}", reason);
            let _ = events.send(MonitorEvent::Log(format!("Error: {}", reason)));
            let _ = events.send(MonitorEvent::LaunchRejected(reason));
        }
    }
}
