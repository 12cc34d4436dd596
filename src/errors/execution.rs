// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{CodegenError, DescriptorError, OicError};
use serde::Deserialize;
use thiserror::Error;

/// How the batch engine reacts when a job fails.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureStrategy {
    /// Stop scheduling new jobs after the first failure
    #[default]
    FailFast,
    /// Record the failure and keep running the remaining jobs
    ContinueOnError,
    /// Like `ContinueOnError`; the batch still reports success when at least one job succeeded
    BestEffort,
}

impl FailureStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureStrategy::FailFast => "fail_fast",
            FailureStrategy::ContinueOnError => "continue_on_error",
            FailureStrategy::BestEffort => "best_effort",
        }
    }
}

/// Failure of a single generator run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error(transparent)]
    Oic(#[from] OicError),
}

impl GenerateError {
    /// Diagnostic lines for stderr.
    pub fn report(&self) -> Vec<String> {
        match self {
            GenerateError::Descriptor(e) | GenerateError::Codegen(CodegenError::Descriptor(e)) => {
                e.report()
            }
            other => vec![other.to_string()],
        }
    }
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("job '{job_id}' failed: {source}")]
    JobFailed {
        job_id: String,
        #[source]
        source: GenerateError,
    },

    #[error("job '{job_id}' was skipped after an earlier failure")]
    Skipped { job_id: String },

    #[error("internal error: {message}")]
    InternalError { message: String },
}
