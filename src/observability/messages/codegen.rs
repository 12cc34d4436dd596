// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for C emission.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use std::path::Path;
use tracing::Span;

/// A job committed its outputs.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use sol_nodegen::observability::messages::codegen::ArtifactsWritten;
///
/// let msg = ArtifactsWritten {
///     job_kind: "node_type",
///     input: "boolean.json",
///     artifact_count: 2,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ArtifactsWritten<'a> {
    pub job_kind: &'a str,
    pub input: &'a str,
    pub artifact_count: usize,
}

impl Display for ArtifactsWritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Wrote {} artifact(s) for {} ({})",
            self.artifact_count, self.input, self.job_kind
        )
    }
}

impl StructuredLog for ArtifactsWritten<'_> {
    fn log(&self) {
        tracing::info!(
            job_kind = self.job_kind,
            input = self.input,
            artifact_count = self.artifact_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "artifacts_written",
            span_name = name,
            job_kind = self.job_kind,
            input = self.input,
        )
    }
}

/// An output could not be written; nothing from the job was kept.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ArtifactWriteFailed<'a> {
    pub path: &'a Path,
    pub error: &'a dyn std::error::Error,
}

impl Display for ArtifactWriteFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Failed to write {}, discarding outputs: {}",
            self.path.display(),
            self.error
        )
    }
}

impl StructuredLog for ArtifactWriteFailed<'_> {
    fn log(&self) {
        tracing::error!(
            path = %self.path.display(),
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "artifact_write_failed",
            span_name = name,
            path = %self.path.display(),
        )
    }
}
