// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for batch configuration loading.

use crate::errors::ConfigValidationError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A batch configuration was loaded.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConfigLoaded<'a> {
    pub path: &'a str,
    pub job_count: usize,
}

impl Display for ConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Loaded {} with {} jobs", self.path, self.job_count)
    }
}

impl StructuredLog for ConfigLoaded<'_> {
    fn log(&self) {
        tracing::info!(path = self.path, job_count = self.job_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "config_loaded",
            span_name = name,
            path = self.path,
            job_count = self.job_count,
        )
    }
}

/// One configuration validation problem.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use sol_nodegen::errors::ConfigValidationError;
/// use sol_nodegen::observability::messages::config::ConfigProblem;
///
/// let problem = ConfigValidationError::DuplicateJobId { job_id: "a".into() };
/// let msg = ConfigProblem { problem: &problem };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ConfigProblem<'a> {
    pub problem: &'a ConfigValidationError,
}

impl Display for ConfigProblem<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Invalid configuration: {}", self.problem)
    }
}

impl StructuredLog for ConfigProblem<'_> {
    fn log(&self) {
        tracing::error!(problem = %self.problem, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("config_problem", span_name = name, problem = %self.problem)
    }
}
