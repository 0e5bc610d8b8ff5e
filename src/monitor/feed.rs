// src/monitor/feed.rs

use crate::api::UploadResult;
use std::collections::VecDeque;

/// How many entries the live upload feed shows at once.
pub const FEED_CAP: usize = 5;

/// Bounded, most-recent-first view of newly completed uploads.
#[derive(Debug)]
pub struct LiveFeed {
    entries: VecDeque<UploadResult>,
    cap: usize,
}

impl LiveFeed {
    pub fn new(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Inserts each entry at the front in arrival order (so the newest
    /// arrival ends up first) and drops the tail beyond the cap.
    pub fn push(&mut self, fresh: &[UploadResult]) {
        for entry in fresh {
            self.entries.push_front(entry.clone());
        }
        self.entries.truncate(self.cap);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot for rendering, most recent first.
    pub fn to_vec(&self) -> Vec<UploadResult> {
        self.entries.iter().cloned().collect()
    }
}

impl Default for LiveFeed {
    fn default() -> Self {
        Self::new(FEED_CAP)
    }
}
