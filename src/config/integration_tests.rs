// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod integration_tests {
    use crate::config::{load_and_validate_config, JobKind, RuntimeBuilder};
    use crate::errors::{ConfigError, ConfigValidationError, FailureStrategy};
    use std::fs;

    /// Test that the sample description batch loads and builds
    #[test]
    fn test_descriptors_yaml_loading() {
        let config = load_and_validate_config("configs/descriptors.yaml").unwrap();

        assert_eq!(config.failure_strategy, FailureStrategy::FailFast);
        assert_eq!(config.executor_options.max_concurrency, Some(2));
        assert_eq!(config.jobs.len(), 3);
        assert_eq!(config.jobs[0].id, "boolean");
        assert_eq!(config.jobs[2].kind, JobKind::Stub);
        assert_eq!(config.jobs[2].namespace.as_deref(), Some("sol-flow"));
        assert!(config.jobs[2].force);

        let (jobs, executor, failure_strategy) = RuntimeBuilder::from_config(&config).unwrap();
        assert_eq!(jobs.len(), 3);
        assert!(jobs.contains_key("timer"));
        assert_eq!(executor.max_concurrency(), 2);
        assert_eq!(failure_strategy, FailureStrategy::FailFast);
    }

    /// Test failure strategy and default overrides
    #[test]
    fn test_validate_all_yaml_loading() {
        let config = load_and_validate_config("configs/validate-all.yaml").unwrap();

        assert_eq!(config.failure_strategy, FailureStrategy::ContinueOnError);
        assert_eq!(config.defaults.context_lines(), 5);
        assert_eq!(config.defaults.prefix(), "sol_flow_node_type");
        assert!(config.jobs.iter().all(|j| j.kind == JobKind::Validate));
    }

    #[test]
    fn test_oic_yaml_loading() {
        let config = load_and_validate_config("configs/oic.yaml").unwrap();

        assert_eq!(config.failure_strategy, FailureStrategy::BestEffort);
        assert_eq!(config.jobs.len(), 1);
        assert_eq!(config.jobs[0].kind, JobKind::Oic);
        assert_eq!(config.jobs[0].gen_h.as_deref(), Some("oic-gen.h"));
    }

    /// Invalid files report every problem at once
    #[test]
    fn test_invalid_config_collects_problems() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(
            &path,
            r#"
jobs:
  - {id: a, kind: node_type, input: a.json, header: out.h}
  - {id: a, kind: stub, inputs: [a.json], output: out.h}
"#,
        )
        .unwrap();

        match load_and_validate_config(&path) {
            Err(ConfigError::Invalid(problems)) => {
                assert_eq!(problems.len(), 2);
                assert!(problems.contains(&ConfigValidationError::DuplicateJobId { job_id: "a".into() }));
                assert!(problems.contains(&ConfigValidationError::MissingField {
                    job_id: "a".into(),
                    field: "source"
                }));
            }
            other => panic!("expected validation failure, got {:?}", other.map(|c| c.jobs.len())),
        }
    }
}
