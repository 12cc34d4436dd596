// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Batch configuration validation.
//!
//! Checks run in order and every problem is collected:
//!
//! 1. the batch declares at least one job
//! 2. job ids are unique
//! 3. each job carries the fields its kind needs
//! 4. no two jobs write the same file
//!
//! # Example
//! ```rust
//! use sol_nodegen::config::{validate_config, Config};
//! use sol_nodegen::errors::ConfigValidationError;
//!
//! let config: Config = serde_yaml::from_str(
//!     "jobs:\n  - id: a\n    kind: validate\n  - id: a\n    kind: validate\n    input: a.json\n",
//! )
//! .unwrap();
//!
//! let problems = validate_config(&config).unwrap_err();
//! assert!(problems.contains(&ConfigValidationError::DuplicateJobId { job_id: "a".into() }));
//! assert!(problems.contains(&ConfigValidationError::MissingField { job_id: "a".into(), field: "input" }));
//! ```

use crate::config::Config;
use crate::errors::ConfigValidationError;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Validate a batch configuration, returning every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ConfigValidationError>> {
    let mut errors = Vec::new();

    if config.jobs.is_empty() {
        errors.push(ConfigValidationError::NoJobs);
        return Err(errors);
    }

    validate_unique_ids(config, &mut errors);
    validate_required_fields(config, &mut errors);
    validate_outputs(config, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_ids(config: &Config, errors: &mut Vec<ConfigValidationError>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for job in &config.jobs {
        if !seen.insert(job.id.as_str()) && reported.insert(job.id.as_str()) {
            errors.push(ConfigValidationError::DuplicateJobId {
                job_id: job.id.clone(),
            });
        }
    }
}

fn validate_required_fields(config: &Config, errors: &mut Vec<ConfigValidationError>) {
    for job in &config.jobs {
        for field in job.missing_fields() {
            errors.push(ConfigValidationError::MissingField {
                job_id: job.id.clone(),
                field,
            });
        }
    }
}

/// Outputs are compared as written; `a/../b.h` and `b.h` are not detected.
fn validate_outputs(config: &Config, errors: &mut Vec<ConfigValidationError>) {
    let mut owners: HashMap<&Path, &str> = HashMap::new();
    for job in &config.jobs {
        for output in job.outputs() {
            match owners.get(output) {
                Some(first) if *first != job.id => {
                    errors.push(ConfigValidationError::OutputCollision {
                        path: output.to_path_buf(),
                        first_job: first.to_string(),
                        second_job: job.id.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    owners.insert(output, &job.id);
                }
            }
        }
    }
}
