// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::descriptor::DescriptorLoader;
use crate::errors::GenerateError;
use crate::traits::{GenerationReport, Generator};
use std::path::PathBuf;

/// Check a description file without generating anything.
#[derive(Debug, Clone)]
pub struct ValidateJob {
    pub input: PathBuf,
    pub loader: DescriptorLoader,
}

impl ValidateJob {
    pub fn new(input: impl Into<PathBuf>, loader: DescriptorLoader) -> Self {
        Self {
            input: input.into(),
            loader,
        }
    }
}

impl Generator for ValidateJob {
    fn kind(&self) -> &'static str {
        "validate"
    }

    fn run(&self) -> Result<GenerationReport, GenerateError> {
        let bundle = self.loader.load(&self.input)?;
        Ok(GenerationReport {
            artifacts: Vec::new(),
            notes: vec![format!(
                "{}: {} node type(s) valid",
                self.input.display(),
                bundle.types.len()
            )],
        })
    }
}
