// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::GenerateError;
use std::path::PathBuf;

/// What a successful generator run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// Files written, in the order they were committed
    pub artifacts: Vec<PathBuf>,
    /// Non fatal findings worth showing the user (skipped inputs and the like)
    pub notes: Vec<String>,
}

impl GenerationReport {
    pub fn with_artifacts(artifacts: Vec<PathBuf>) -> Self {
        Self {
            artifacts,
            notes: Vec::new(),
        }
    }
}

/// One unit of work: validate a description, emit C for it, write a stub or
/// translate OIC schemas.
///
/// Generators are synchronous. The batch engine runs them on the blocking
/// pool, so implementations are free to do file I/O directly.
pub trait Generator: Send + Sync {
    /// Short job kind name used in logs
    fn kind(&self) -> &'static str;

    fn run(&self) -> Result<GenerationReport, GenerateError>;
}
