// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_CONTEXT_LINES, DEFAULT_PREFIX, DEFAULT_SCHEMA_MAX_DEPTH};
use crate::config::validate_config;
use crate::descriptor::DescriptorLoader;
use crate::errors::{ConfigError, FailureStrategy};
use crate::observability::messages::config::{ConfigLoaded, ConfigProblem};
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A batch of generator jobs.
///
/// # Example
/// ```yaml
/// failure_strategy: continue_on_error
/// executor_options:
///   max_concurrency: 4
/// defaults:
///   prefix: sol_flow_node_type
///   context_lines: 3
///   schema_max_depth: 2
/// jobs:
///   - id: boolean
///     kind: node_type
///     input: descriptors/boolean.json
///     header: build/boolean-gen.h
///     source: build/boolean-gen.c
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub failure_strategy: FailureStrategy,
    #[serde(default)]
    pub executor_options: ExecutorOptions,
    #[serde(default)]
    pub defaults: GeneratorDefaults,
    #[serde(default)]
    pub jobs: Vec<JobConfig>,
}

/// Executor-specific configuration options.
#[derive(Debug, Default, Deserialize)]
pub struct ExecutorOptions {
    /// Jobs running at once; defaults to the number of CPUs
    pub max_concurrency: Option<usize>,
}

/// Settings shared by every description-reading job unless the job overrides them.
#[derive(Debug, Default, Deserialize)]
pub struct GeneratorDefaults {
    pub prefix: Option<String>,
    pub context_lines: Option<usize>,
    pub schema_max_depth: Option<i32>,
}

impl GeneratorDefaults {
    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    pub fn context_lines(&self) -> usize {
        self.context_lines.unwrap_or(DEFAULT_CONTEXT_LINES)
    }

    pub fn schema_max_depth(&self) -> i32 {
        self.schema_max_depth.unwrap_or(DEFAULT_SCHEMA_MAX_DEPTH)
    }

    /// Description loader for a job, honouring its prefix override.
    pub fn loader(&self, prefix_override: Option<&str>) -> DescriptorLoader {
        let prefix = prefix_override.unwrap_or_else(|| self.prefix());
        let prefix = Some(prefix).filter(|p| !p.is_empty());
        DescriptorLoader::new(prefix)
            .with_context_lines(self.context_lines())
            .with_schema_max_depth(self.schema_max_depth())
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    /// Header and source for one description
    NodeType,
    /// Check a description, write nothing
    Validate,
    /// Implementation skeleton for one or more descriptions
    Stub,
    /// OIC schemas to a bundle and its C glue
    Oic,
}

impl JobKind {
    pub fn as_str(self) -> &'static str {
        match self {
            JobKind::NodeType => "node_type",
            JobKind::Validate => "validate",
            JobKind::Stub => "stub",
            JobKind::Oic => "oic",
        }
    }
}

/// One job of the batch. Which fields are needed depends on `kind`.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    pub id: String,
    pub kind: JobKind,
    pub input: Option<PathBuf>,
    /// Stub inputs; a single `input` works too
    #[serde(default)]
    pub inputs: Vec<PathBuf>,
    pub header: Option<PathBuf>,
    pub source: Option<PathBuf>,
    /// Stub output
    pub output: Option<PathBuf>,
    pub namespace: Option<String>,
    #[serde(default)]
    pub force: bool,
    /// Overrides `defaults.prefix`
    pub prefix: Option<String>,
    #[serde(default)]
    pub schema_dirs: Vec<PathBuf>,
    pub node_type_json: Option<PathBuf>,
    pub node_type_impl: Option<PathBuf>,
    pub gen_c: Option<String>,
    pub gen_h: Option<String>,
}

impl JobConfig {
    /// Inputs of a stub job.
    pub fn stub_inputs(&self) -> Vec<PathBuf> {
        if self.inputs.is_empty() {
            self.input.iter().cloned().collect()
        } else {
            self.inputs.clone()
        }
    }

    /// Fields this job's kind requires but the job leaves out.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let mut require = |present: bool, field: &'static str| {
            if !present {
                missing.push(field);
            }
        };
        match self.kind {
            JobKind::NodeType => {
                require(self.input.is_some(), "input");
                require(self.header.is_some(), "header");
                require(self.source.is_some(), "source");
            }
            JobKind::Validate => require(self.input.is_some(), "input"),
            JobKind::Stub => {
                require(!self.stub_inputs().is_empty(), "inputs");
                require(self.output.is_some(), "output");
            }
            JobKind::Oic => {
                require(!self.schema_dirs.is_empty(), "schema_dirs");
                require(self.node_type_json.is_some(), "node_type_json");
                require(self.node_type_impl.is_some(), "node_type_impl");
                require(self.gen_c.is_some(), "gen_c");
                require(self.gen_h.is_some(), "gen_h");
            }
        }
        missing
    }

    /// Files the job writes.
    pub fn outputs(&self) -> Vec<&Path> {
        [
            &self.header,
            &self.source,
            &self.output,
            &self.node_type_json,
            &self.node_type_impl,
        ]
        .into_iter()
        .flatten()
        .map(PathBuf::as_path)
        .collect()
    }
}

/// Load a config from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a config and check that its jobs can run
///
/// Every problem is logged and returned, not just the first one.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(&path)?;

    if let Err(problems) = validate_config(&cfg) {
        for problem in &problems {
            ConfigProblem { problem }.log();
        }
        return Err(ConfigError::Invalid(problems));
    }

    ConfigLoaded {
        path: &path.as_ref().display().to_string(),
        job_count: cfg.jobs.len(),
    }
    .log();
    Ok(cfg)
}
