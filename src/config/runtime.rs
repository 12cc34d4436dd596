// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{Config, JobMap};
use crate::engine::factory::ExecutorFactory;
use crate::engine::BatchExecutor;
use crate::errors::{ConfigError, FailureStrategy};

/// Batch runtime builder - turns a configuration into runnable jobs and an
/// executor.
///
/// # Examples
///
/// ```
/// use sol_nodegen::config::{Config, RuntimeBuilder};
/// use sol_nodegen::errors::FailureStrategy;
///
/// let config: Config = serde_yaml::from_str(
///     "executor_options:\n  max_concurrency: 2\njobs:\n  - {id: check, kind: validate, input: descriptors/timer.json}\n",
/// )
/// .unwrap();
///
/// let (jobs, executor, failure_strategy) = RuntimeBuilder::from_config(&config).unwrap();
/// assert_eq!(jobs.len(), 1);
/// assert_eq!(executor.max_concurrency(), 2);
/// assert_eq!(failure_strategy, FailureStrategy::FailFast);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build the batch runtime from configuration.
    ///
    /// Creates and returns:
    /// - `JobMap`: every configured job, in order
    /// - `BatchExecutor`: bounded by `executor_options.max_concurrency`
    /// - `FailureStrategy`: how to react to failing jobs
    pub fn from_config(cfg: &Config) -> Result<(JobMap, BatchExecutor, FailureStrategy), ConfigError> {
        let jobs = JobMap::from_config(cfg)?;
        let executor = ExecutorFactory::from_config(cfg);
        Ok((jobs, executor, cfg.failure_strategy))
    }
}
