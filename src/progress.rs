//! Progress reporting.
//!
//! This module provides [`ProgressCallback`] for monitoring a batch and
//! [`ProgressInfo`] for progress snapshots. Sorting reports once per file
//! examined; animating reports once per subject finished, whatever its
//! outcome.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use loopreel::{AnimateOptions, OperationType, ProgressCallback, ProgressInfo};
//!
//! struct PrintProgress;
//!
//! impl ProgressCallback for PrintProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         if info.operation == OperationType::Animating {
//!             if let Some(pct) = info.percentage {
//!                 println!("{pct:.0}% of subjects done");
//!             }
//!         }
//!     }
//! }
//!
//! let options = AnimateOptions::new().with_progress(Arc::new(PrintProgress));
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

/// The kind of work currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OperationType {
    /// Moving loose frames into subject folders.
    Sorting,
    /// Selecting and encoding frame sets.
    Animating,
}

/// A snapshot of batch progress.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// What kind of work is being performed.
    pub operation: OperationType,
    /// How many items (files or subjects) have been processed so far.
    pub current: u64,
    /// Total items expected, if known ahead of time.
    pub total: Option<u64>,
    /// Completion percentage (0.0 – 100.0), if `total` is known.
    pub percentage: Option<f32>,
    /// Wall-clock time elapsed since the operation started.
    pub elapsed: Duration,
    /// The subject the last item belonged to, if any.
    pub subject: Option<String>,
}

/// Trait for receiving progress updates during a batch.
///
/// Progress callbacks are **infallible**: they observe but cannot halt the
/// batch.
pub trait ProgressCallback: Send + Sync {
    /// Called after each processed item.
    fn on_progress(&self, info: &ProgressInfo);
}

/// A no-op implementation that discards all progress notifications.
///
/// This is the default when no callback is configured.
pub(crate) struct NoOpProgress;

impl ProgressCallback for NoOpProgress {
    fn on_progress(&self, _info: &ProgressInfo) {}
}

/// Internal helper that tracks progress timing and emits callbacks.
pub(crate) struct ProgressTracker {
    callback: Arc<dyn ProgressCallback>,
    operation: OperationType,
    total: Option<u64>,
    current: u64,
    start_time: Instant,
}

impl ProgressTracker {
    pub(crate) fn new(
        callback: Arc<dyn ProgressCallback>,
        operation: OperationType,
        total: Option<u64>,
    ) -> Self {
        Self {
            callback,
            operation,
            total,
            current: 0,
            start_time: Instant::now(),
        }
    }

    /// Record one completed item and fire the callback.
    pub(crate) fn advance(&mut self, subject: Option<&str>) {
        self.current += 1;

        let percentage = self
            .total
            .filter(|&t| t > 0)
            .map(|t| (self.current as f32 / t as f32) * 100.0);

        let info = ProgressInfo {
            operation: self.operation,
            current: self.current,
            total: self.total,
            percentage,
            elapsed: self.start_time.elapsed(),
            subject: subject.map(str::to_string),
        };

        self.callback.on_progress(&info);
    }
}
