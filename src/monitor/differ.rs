// src/monitor/differ.rs

use crate::api::UploadResult;

/// Tracks a monotonic cursor into the snapshot result list and yields the
/// entries that arrived since the previous tick. Every result is yielded
/// exactly once, in arrival order, across the life of a session.
#[derive(Debug, Default)]
pub struct ResultDiffer {
    processed: usize,
}

impl ResultDiffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of results already handed out.
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Returns the slice of results beyond the cursor and advances it.
    /// The cursor never retreats, so a snapshot that (out of contract)
    /// shrinks the list simply yields nothing.
    pub fn diff<'a>(&mut self, results: &'a [UploadResult]) -> &'a [UploadResult] {
        if results.len() > self.processed {
            let fresh = &results[self.processed..];
            self.processed = results.len();
            fresh
        } else {
            &[]
        }
    }
}
