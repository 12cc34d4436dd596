// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tracing::Instrument;

use crate::config::JobMap;
use crate::errors::{ExecutionError, FailureStrategy};
use crate::observability::messages::engine::{
    BatchCompleted, BatchStarted, JobCompleted, JobFailed, JobSkipped,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{GenerationReport, Generator};

/// What happened to one job.
#[derive(Debug)]
pub enum JobOutcome {
    Succeeded(GenerationReport),
    Failed(ExecutionError),
    /// Never started because an earlier job failed under fail-fast
    Skipped,
}

#[derive(Debug)]
pub struct JobResult {
    pub job_id: String,
    pub job_kind: &'static str,
    pub outcome: JobOutcome,
    pub duration: Duration,
}

/// Per job outcomes of a batch, in job order.
#[derive(Debug)]
pub struct BatchReport {
    pub results: Vec<JobResult>,
    pub failure_strategy: FailureStrategy,
    pub duration: Duration,
}

impl BatchReport {
    pub fn succeeded_count(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Succeeded(_)))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Failed(_)))
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Skipped))
    }

    /// Whether the batch as a whole succeeded.
    ///
    /// Under `BestEffort` one successful job is enough; otherwise every job
    /// must have succeeded.
    pub fn success(&self) -> bool {
        match self.failure_strategy {
            FailureStrategy::BestEffort => {
                self.results.is_empty() || self.succeeded_count() > 0
            }
            FailureStrategy::FailFast | FailureStrategy::ContinueOnError => {
                self.succeeded_count() == self.results.len()
            }
        }
    }

    fn count(&self, pred: impl Fn(&JobOutcome) -> bool) -> usize {
        self.results.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Runs a batch of generators on the blocking pool.
///
/// Every job is spawned up front and waits on a shared semaphore, so at most
/// `max_concurrency` generators run at once and they start in job order.
/// Under `FailFast` the first failure raises an abort flag; jobs that have
/// not started yet see it once they get a permit and report themselves
/// skipped. All tasks are joined before the report is returned.
pub struct BatchExecutor {
    max_concurrency: usize,
}

impl BatchExecutor {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub async fn run(&self, jobs: &JobMap, failure_strategy: FailureStrategy) -> BatchReport {
        let started = Instant::now();
        let batch = BatchStarted {
            job_count: jobs.len(),
            max_concurrency: self.max_concurrency,
            failure_strategy: failure_strategy.as_str(),
        };
        batch.log();
        let batch_span = batch.span("batch");

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let aborted = Arc::new(AtomicBool::new(false));
        let mut tasks = Vec::with_capacity(jobs.len());

        for (job_id, generator) in jobs.iter() {
            let job_kind = generator.kind();
            let generator_clone = generator.clone();
            let job_id_clone = job_id.clone();
            let semaphore_clone = semaphore.clone();
            let aborted_clone = aborted.clone();

            let task = tokio::spawn(
                async move {
                    let job_started = Instant::now();
                    let result = Self::run_job(
                        &job_id_clone,
                        generator_clone,
                        &semaphore_clone,
                        &aborted_clone,
                        failure_strategy,
                    )
                    .await;
                    (result, job_started.elapsed())
                }
                .instrument(batch_span.clone()),
            );

            tasks.push((job_id.clone(), job_kind, task));
        }

        // Join in job order so the report reads like the configuration
        let mut results = Vec::with_capacity(tasks.len());
        for (job_id, job_kind, task) in tasks {
            let (outcome, duration) = match task.await {
                Ok((Ok(report), duration)) => (JobOutcome::Succeeded(report), duration),
                Ok((Err(ExecutionError::Skipped { .. }), duration)) => (JobOutcome::Skipped, duration),
                Ok((Err(e), duration)) => (JobOutcome::Failed(e), duration),
                Err(join_error) => (
                    JobOutcome::Failed(ExecutionError::InternalError {
                        message: format!("Task join error for job '{}': {}", job_id, join_error),
                    }),
                    Duration::ZERO,
                ),
            };

            log_outcome(&job_id, job_kind, &outcome, duration);
            results.push(JobResult {
                job_id,
                job_kind,
                outcome,
                duration,
            });
        }

        let report = BatchReport {
            results,
            failure_strategy,
            duration: started.elapsed(),
        };
        BatchCompleted {
            job_count: report.results.len(),
            failed_count: report.failed_count(),
            duration: report.duration,
        }
        .log();
        report
    }

    async fn run_job(
        job_id: &str,
        generator: Arc<dyn Generator>,
        semaphore: &Semaphore,
        aborted: &AtomicBool,
        failure_strategy: FailureStrategy,
    ) -> Result<GenerationReport, ExecutionError> {
        let _permit = semaphore
            .acquire()
            .await
            .map_err(|e| ExecutionError::InternalError {
                message: format!(
                    "Failed to acquire semaphore permit for job '{}': {}",
                    job_id, e
                ),
            })?;

        if aborted.load(Ordering::SeqCst) {
            return Err(ExecutionError::Skipped {
                job_id: job_id.to_string(),
            });
        }

        let result = tokio::task::spawn_blocking(move || generator.run())
            .await
            .map_err(|e| ExecutionError::InternalError {
                message: format!("Generator for job '{}' panicked: {}", job_id, e),
            })?;

        result.map_err(|source| {
            if failure_strategy == FailureStrategy::FailFast {
                aborted.store(true, Ordering::SeqCst);
            }
            ExecutionError::JobFailed {
                job_id: job_id.to_string(),
                source,
            }
        })
    }
}

fn log_outcome(job_id: &str, job_kind: &str, outcome: &JobOutcome, duration: Duration) {
    match outcome {
        JobOutcome::Succeeded(report) => JobCompleted {
            job_id,
            job_kind,
            artifact_count: report.artifacts.len(),
            duration,
        }
        .log(),
        JobOutcome::Failed(ExecutionError::JobFailed { source, .. }) => JobFailed {
            job_id,
            job_kind,
            error: source,
        }
        .log(),
        JobOutcome::Failed(other) => JobFailed {
            job_id,
            job_kind,
            error: other,
        }
        .log(),
        JobOutcome::Skipped => JobSkipped { job_id }.log(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(outcome: JobOutcome) -> JobResult {
        JobResult {
            job_id: "j".into(),
            job_kind: "validate",
            outcome,
            duration: Duration::ZERO,
        }
    }

    fn failed() -> JobOutcome {
        JobOutcome::Failed(ExecutionError::InternalError {
            message: "boom".into(),
        })
    }

    #[test]
    fn test_new_clamps_concurrency() {
        assert_eq!(BatchExecutor::new(0).max_concurrency(), 1);
        assert_eq!(BatchExecutor::new(8).max_concurrency(), 8);
    }

    #[test]
    fn test_success_rules() {
        let mixed = |failure_strategy| BatchReport {
            results: vec![
                result(JobOutcome::Succeeded(GenerationReport::default())),
                result(failed()),
            ],
            failure_strategy,
            duration: Duration::ZERO,
        };
        assert!(!mixed(FailureStrategy::FailFast).success());
        assert!(!mixed(FailureStrategy::ContinueOnError).success());
        assert!(mixed(FailureStrategy::BestEffort).success());

        let all_failed = BatchReport {
            results: vec![result(failed()), result(JobOutcome::Skipped)],
            failure_strategy: FailureStrategy::BestEffort,
            duration: Duration::ZERO,
        };
        assert!(!all_failed.success());
        assert_eq!(all_failed.failed_count(), 1);
        assert_eq!(all_failed.skipped_count(), 1);
    }
}
