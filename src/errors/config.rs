// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Problems found while validating a batch configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// The configuration lists no jobs at all
    NoJobs,
    /// Two jobs share the same identifier
    DuplicateJobId {
        /// The duplicate job ID
        job_id: String,
    },
    /// A job kind needs a field that was left out
    MissingField {
        /// The job missing the field
        job_id: String,
        /// Name of the missing field
        field: &'static str,
    },
    /// Two jobs would write the same file
    OutputCollision {
        /// The contested output path
        path: PathBuf,
        /// The job that claimed the path first
        first_job: String,
        /// The job that claimed it again
        second_job: String,
    },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValidationError::NoJobs => write!(f, "Configuration declares no jobs"),
            ConfigValidationError::DuplicateJobId { job_id } => {
                write!(f, "Duplicate job ID: '{}'", job_id)
            }
            ConfigValidationError::MissingField { job_id, field } => {
                write!(f, "Job '{}' requires field '{}'", job_id, field)
            }
            ConfigValidationError::OutputCollision {
                path,
                first_job,
                second_job,
            } => write!(
                f,
                "Jobs '{}' and '{}' both write '{}'",
                first_job,
                second_job,
                path.display()
            ),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Invalid(Vec<ConfigValidationError>),
}

fn join_errors(errors: &[ConfigValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
