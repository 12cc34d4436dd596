// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for batch lifecycle and per job outcomes.
//!
//! This module contains message types for logging events related to:
//! * Batch start and completion
//! * Individual job completion and failure
//! * Jobs skipped after a fail-fast abort

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// Batch started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use sol_nodegen::observability::messages::engine::BatchStarted;
///
/// let msg = BatchStarted {
///     job_count: 5,
///     max_concurrency: 4,
///     failure_strategy: "continue_on_error",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct BatchStarted<'a> {
    pub job_count: usize,
    pub max_concurrency: usize,
    pub failure_strategy: &'a str,
}

impl Display for BatchStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting batch: {} jobs, max_concurrency={}, failure_strategy={}",
            self.job_count, self.max_concurrency, self.failure_strategy
        )
    }
}

impl StructuredLog for BatchStarted<'_> {
    fn log(&self) {
        tracing::info!(
            job_count = self.job_count,
            max_concurrency = self.max_concurrency,
            failure_strategy = self.failure_strategy,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "batch",
            span_name = name,
            job_count = self.job_count,
            max_concurrency = self.max_concurrency,
            failure_strategy = self.failure_strategy,
        )
    }
}

/// Batch finished, whether or not every job succeeded.
///
/// # Log Level
/// `info!` - Important operational event
pub struct BatchCompleted {
    pub job_count: usize,
    pub failed_count: usize,
    pub duration: Duration,
}

impl Display for BatchCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Batch completed: {} jobs, {} failed, in {:?}",
            self.job_count, self.failed_count, self.duration
        )
    }
}

impl StructuredLog for BatchCompleted {
    fn log(&self) {
        tracing::info!(
            job_count = self.job_count,
            failed_count = self.failed_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "batch_completed",
            span_name = name,
            job_count = self.job_count,
            failed_count = self.failed_count,
            duration = ?self.duration,
        )
    }
}

/// A job finished successfully.
///
/// # Log Level
/// `debug!` - Per job detail
pub struct JobCompleted<'a> {
    pub job_id: &'a str,
    pub job_kind: &'a str,
    pub artifact_count: usize,
    pub duration: Duration,
}

impl Display for JobCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Job '{}' ({}) completed in {:?}: {} artifacts",
            self.job_id, self.job_kind, self.duration, self.artifact_count
        )
    }
}

impl StructuredLog for JobCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            job_id = self.job_id,
            job_kind = self.job_kind,
            artifact_count = self.artifact_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "job_completed",
            span_name = name,
            job_id = self.job_id,
            job_kind = self.job_kind,
        )
    }
}

/// A job failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use sol_nodegen::observability::messages::engine::JobFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// let msg = JobFailed {
///     job_id: "boolean",
///     job_kind: "node_type",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct JobFailed<'a> {
    pub job_id: &'a str,
    pub job_kind: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for JobFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Job '{}' ({}) failed: {}",
            self.job_id, self.job_kind, self.error
        )
    }
}

impl StructuredLog for JobFailed<'_> {
    fn log(&self) {
        tracing::error!(
            job_id = self.job_id,
            job_kind = self.job_kind,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "job_failed",
            span_name = name,
            job_id = self.job_id,
            job_kind = self.job_kind,
            error = %self.error,
        )
    }
}

/// A job never ran because an earlier one failed under fail-fast.
///
/// # Log Level
/// `warn!` - Degraded run
pub struct JobSkipped<'a> {
    pub job_id: &'a str,
}

impl Display for JobSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Job '{}' skipped after an earlier failure", self.job_id)
    }
}

impl StructuredLog for JobSkipped<'_> {
    fn log(&self) {
        tracing::warn!(job_id = self.job_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("job_skipped", span_name = name, job_id = self.job_id)
    }
}
