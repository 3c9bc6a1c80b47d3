//! Per-invocation timing and outcome records.
//!
//! [`OperationSpan`] is an RAII guard: it captures the start time when
//! created and hands exactly one [`OperationRecord`] to an
//! [`OperationLog`] when dropped, on every exit path.

use std::fmt;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Outcome of one timed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    /// Operation name.
    pub operation: &'static str,
    /// Sandbox the operation ran for.
    pub cid: String,
    /// Correlation id from the operation context.
    pub activity_id: String,
    /// Wall-clock start.
    pub start_time: DateTime<Utc>,
    /// Wall-clock end.
    pub end_time: DateTime<Utc>,
    /// Monotonic elapsed time.
    pub duration: Duration,
    /// Terminal error message, if the operation failed.
    pub error: Option<String>,
}

/// Sink for operation records.
pub trait OperationLog: Send + Sync {
    /// Stores or emits a finished record.
    fn record(&self, record: &OperationRecord);
}

/// Emits records as `tracing` events.
///
/// Successful operations log at `info`, failed ones at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl OperationLog for TracingLog {
    fn record(&self, record: &OperationRecord) {
        let duration_ms = record.duration.as_secs_f64() * 1000.0;
        match &record.error {
            Some(error) => tracing::error!(
                cid = %record.cid,
                activity_id = %record.activity_id,
                start_time = %record.start_time.to_rfc3339(),
                end_time = %record.end_time.to_rfc3339(),
                duration_ms,
                error = %error,
                "{}",
                record.operation
            ),
            None => tracing::info!(
                cid = %record.cid,
                activity_id = %record.activity_id,
                start_time = %record.start_time.to_rfc3339(),
                end_time = %record.end_time.to_rfc3339(),
                duration_ms,
                "{}",
                record.operation
            ),
        }
    }
}

/// Keeps records in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryLog {
    records: Mutex<Vec<OperationRecord>>,
}

impl MemoryLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record received so far.
    #[must_use]
    pub fn records(&self) -> Vec<OperationRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OperationLog for MemoryLog {
    fn record(&self, record: &OperationRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}

/// Guard that times an operation and reports it once on drop.
pub struct OperationSpan<'a> {
    log: &'a dyn OperationLog,
    operation: &'static str,
    cid: String,
    activity_id: String,
    start_time: DateTime<Utc>,
    started: Instant,
    error: Option<String>,
}

impl<'a> OperationSpan<'a> {
    /// Starts timing `operation` for sandbox `cid`.
    #[must_use]
    pub fn start(
        log: &'a dyn OperationLog,
        operation: &'static str,
        cid: impl Into<String>,
        activity_id: impl Into<String>,
    ) -> Self {
        Self {
            log,
            operation,
            cid: cid.into(),
            activity_id: activity_id.into(),
            start_time: Utc::now(),
            started: Instant::now(),
            error: None,
        }
    }

    /// Marks the operation as failed with `error`.
    ///
    /// A later call replaces the earlier message.
    pub fn fail(&mut self, error: &dyn fmt::Display) {
        self.error = Some(error.to_string());
    }
}

impl Drop for OperationSpan<'_> {
    fn drop(&mut self) {
        let record = OperationRecord {
            operation: self.operation,
            cid: std::mem::take(&mut self.cid),
            activity_id: std::mem::take(&mut self.activity_id),
            start_time: self.start_time,
            end_time: Utc::now(),
            duration: self.started.elapsed(),
            error: self.error.take(),
        };
        self.log.record(&record);
    }
}
