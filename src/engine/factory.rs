// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::FALLBACK_CONCURRENCY;
use crate::config::Config;
use crate::engine::BatchExecutor;

/// Factory for creating the batch executor from configuration
pub struct ExecutorFactory;

impl ExecutorFactory {
    /// Bound the executor by `executor_options.max_concurrency`, or by the
    /// machine's parallelism when unset.
    pub fn from_config(cfg: &Config) -> BatchExecutor {
        let max_concurrency = cfg.executor_options.max_concurrency.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(FALLBACK_CONCURRENCY)
        });

        BatchExecutor::new(max_concurrency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_concurrency_wins() {
        let cfg: Config = serde_yaml::from_str(
            "executor_options:\n  max_concurrency: 3\njobs: []\n",
        )
        .unwrap();
        assert_eq!(ExecutorFactory::from_config(&cfg).max_concurrency(), 3);
    }

    #[test]
    fn test_default_concurrency_is_positive() {
        let cfg: Config = serde_yaml::from_str("jobs: []\n").unwrap();
        assert!(ExecutorFactory::from_config(&cfg).max_concurrency() >= 1);
    }
}
