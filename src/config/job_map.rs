// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::codegen::{NodeTypeJob, StubJob};
use crate::config::{Config, JobConfig, JobKind};
use crate::descriptor::ValidateJob;
use crate::errors::{ConfigError, ConfigValidationError};
use crate::oic::OicJob;
use crate::traits::Generator;
use indexmap::IndexMap;
use std::sync::Arc;

/// Job ids mapped to their generators, in configuration order.
///
/// Generators are held in `Arc` so the batch engine can hand each one to a
/// blocking task without cloning the job itself.
///
/// # Example
/// ```no_run
/// use sol_nodegen::config::{load_and_validate_config, JobMap};
///
/// let config = load_and_validate_config("configs/descriptors.yaml")?;
/// let jobs = JobMap::from_config(&config)?;
/// for (id, job) in jobs.iter() {
///     println!("{} -> {}", id, job.kind());
/// }
/// # Ok::<(), sol_nodegen::errors::ConfigError>(())
/// ```
#[derive(Clone, Default)]
pub struct JobMap(pub IndexMap<String, Arc<dyn Generator>>);

impl JobMap {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Build every job of `cfg`. Fails with the first job whose kind is
    /// missing a required field.
    pub fn from_config(cfg: &Config) -> Result<Self, ConfigError> {
        let mut jobs = IndexMap::new();
        for job in &cfg.jobs {
            let generator = build(cfg, job).map_err(|e| ConfigError::Invalid(vec![e]))?;
            jobs.insert(job.id.clone(), generator);
        }
        Ok(Self(jobs))
    }

    pub fn insert(&mut self, id: impl Into<String>, generator: Arc<dyn Generator>) {
        self.0.insert(id.into(), generator);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Arc<dyn Generator>)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }
}

fn build(cfg: &Config, job: &JobConfig) -> Result<Arc<dyn Generator>, ConfigValidationError> {
    let missing = |field: &'static str| ConfigValidationError::MissingField {
        job_id: job.id.clone(),
        field,
    };
    let loader = cfg.defaults.loader(job.prefix.as_deref());

    let generator: Arc<dyn Generator> = match job.kind {
        JobKind::NodeType => Arc::new(NodeTypeJob::new(
            job.input.clone().ok_or_else(|| missing("input"))?,
            job.header.clone().ok_or_else(|| missing("header"))?,
            job.source.clone().ok_or_else(|| missing("source"))?,
            loader,
        )),
        JobKind::Validate => Arc::new(ValidateJob::new(
            job.input.clone().ok_or_else(|| missing("input"))?,
            loader,
        )),
        JobKind::Stub => {
            let inputs = job.stub_inputs();
            if inputs.is_empty() {
                return Err(missing("inputs"));
            }
            Arc::new(StubJob {
                inputs,
                output: job.output.clone().ok_or_else(|| missing("output"))?,
                namespace: job.namespace.clone(),
                force: job.force,
                loader,
            })
        }
        JobKind::Oic => {
            if job.schema_dirs.is_empty() {
                return Err(missing("schema_dirs"));
            }
            Arc::new(OicJob {
                schema_dirs: job.schema_dirs.clone(),
                node_type_json: job.node_type_json.clone().ok_or_else(|| missing("node_type_json"))?,
                node_type_impl: job.node_type_impl.clone().ok_or_else(|| missing("node_type_impl"))?,
                gen_c: job.gen_c.clone().ok_or_else(|| missing("gen_c"))?,
                gen_h: job.gen_h.clone().ok_or_else(|| missing("gen_h"))?,
            })
        }
    };
    Ok(generator)
}
