// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::codegen::{
    generate_header, generate_source, generate_stub, stub_base_name, ArtifactWriter, StubInput,
};
use crate::descriptor::DescriptorLoader;
use crate::errors::{CodegenError, GenerateError};
use crate::observability::messages::codegen::{ArtifactWriteFailed, ArtifactsWritten};
use crate::observability::messages::StructuredLog;
use crate::traits::{GenerationReport, Generator};
use std::path::PathBuf;

/// Emit the header and source for one description file.
#[derive(Debug, Clone)]
pub struct NodeTypeJob {
    pub input: PathBuf,
    pub header: PathBuf,
    pub source: PathBuf,
    pub loader: DescriptorLoader,
}

impl NodeTypeJob {
    pub fn new(
        input: impl Into<PathBuf>,
        header: impl Into<PathBuf>,
        source: impl Into<PathBuf>,
        loader: DescriptorLoader,
    ) -> Self {
        Self {
            input: input.into(),
            header: header.into(),
            source: source.into(),
            loader,
        }
    }

    /// The source includes the header by the path it was given.
    fn header_include(&self) -> String {
        self.header.display().to_string()
    }
}

impl Generator for NodeTypeJob {
    fn kind(&self) -> &'static str {
        "node_type"
    }

    fn run(&self) -> Result<GenerationReport, GenerateError> {
        let bundle = self.loader.load(&self.input)?;
        let header = generate_header(&bundle);
        let source = generate_source(&bundle, &self.header_include());

        let mut writer = ArtifactWriter::new();
        writer.stage(&self.header, &header).map_err(write_failed)?;
        writer.stage(&self.source, &source).map_err(write_failed)?;
        let artifacts = writer.commit().map_err(write_failed)?;

        ArtifactsWritten {
            job_kind: self.kind(),
            input: &self.input.display().to_string(),
            artifact_count: artifacts.len(),
        }
        .log();
        Ok(GenerationReport::with_artifacts(artifacts))
    }
}

/// Write a skeleton implementation for one or more description files.
#[derive(Debug, Clone)]
pub struct StubJob {
    pub inputs: Vec<PathBuf>,
    pub output: PathBuf,
    /// Directory prefix for the included headers, e.g. `sol-flow`
    pub namespace: Option<String>,
    /// Replace an existing stub
    pub force: bool,
    pub loader: DescriptorLoader,
}

impl StubJob {
    fn load_inputs(&self) -> Result<Vec<StubInput>, GenerateError> {
        self.inputs
            .iter()
            .map(|path| -> Result<StubInput, GenerateError> {
                let base_name = stub_base_name(path)?;
                let bundle = self.loader.load(path)?;
                Ok(StubInput { base_name, bundle })
            })
            .collect()
    }
}

impl Generator for StubJob {
    fn kind(&self) -> &'static str {
        "stub"
    }

    fn run(&self) -> Result<GenerationReport, GenerateError> {
        if self.output.exists() && !self.force {
            return Err(CodegenError::StubExists {
                path: self.output.clone(),
            }
            .into());
        }
        let inputs = self.load_inputs()?;
        let stub = generate_stub(&inputs, self.namespace.as_deref());

        let mut writer = ArtifactWriter::new();
        writer.stage(&self.output, &stub).map_err(write_failed)?;
        let artifacts = writer.commit().map_err(write_failed)?;

        let input_list: Vec<String> = self.inputs.iter().map(|p| p.display().to_string()).collect();
        ArtifactsWritten {
            job_kind: self.kind(),
            input: &input_list.join(", "),
            artifact_count: artifacts.len(),
        }
        .log();
        Ok(GenerationReport::with_artifacts(artifacts))
    }
}

fn write_failed((path, source): (PathBuf, std::io::Error)) -> GenerateError {
    ArtifactWriteFailed {
        path: &path,
        error: &source,
    }
    .log();
    CodegenError::Write { path, source }.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TIMER: &str = r#"{
        "name": "timer",
        "category": "timer",
        "methods": {"open": "timer_open"},
        "out_ports": [{"name": "OUT", "data_type": "empty"}]
    }"#;

    #[test]
    fn node_type_job_writes_header_and_source() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("timer.json");
        fs::write(&input, TIMER).unwrap();
        let header = dir.path().join("gen/timer-gen.h");
        let source = dir.path().join("gen/timer-gen.c");

        let job = NodeTypeJob::new(&input, &header, &source, DescriptorLoader::new(Some("sol_flow_node_type")));
        let report = job.run().unwrap();

        assert_eq!(report.artifacts, vec![header.clone(), source.clone()]);
        let source_text = fs::read_to_string(&source).unwrap();
        assert!(source_text.contains(&format!("#include \"{}\"\n", header.display())));
        assert!(fs::read_to_string(&header).unwrap().contains("SOL_FLOW_NODE_TYPE_TIMER__OUT__OUT (0)"));
    }

    #[test]
    fn header_is_included_by_given_path() {
        let job = NodeTypeJob::new(
            "timer.json",
            "py/timer-gen.h",
            "py/timer-gen.c",
            DescriptorLoader::default(),
        );
        assert_eq!(job.header_include(), "py/timer-gen.h");
    }

    #[test]
    fn invalid_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.json");
        fs::write(&input, r#"{"name": "x", "category": "y", "in_ports": [{"name": "lower", "data_type": "int"}]}"#).unwrap();
        let header = dir.path().join("bad-gen.h");
        let source = dir.path().join("bad-gen.c");

        let job = NodeTypeJob::new(&input, &header, &source, DescriptorLoader::default());
        assert!(job.run().is_err());
        assert!(!header.exists());
        assert!(!source.exists());
    }

    #[test]
    fn stub_job_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("timer.json");
        fs::write(&input, TIMER).unwrap();
        let output = dir.path().join("timer.c");
        fs::write(&output, "hand written").unwrap();

        let mut job = StubJob {
            inputs: vec![input],
            output: output.clone(),
            namespace: None,
            force: false,
            loader: DescriptorLoader::default(),
        };
        let err = job.run().unwrap_err();
        assert!(matches!(err, GenerateError::Codegen(CodegenError::StubExists { .. })));
        assert_eq!(fs::read_to_string(&output).unwrap(), "hand written");

        job.force = true;
        job.run().unwrap();
        let stub = fs::read_to_string(&output).unwrap();
        assert!(stub.contains("\ntimer_open(struct sol_flow_node *node"));
        assert!(stub.ends_with("#include \"timer-gen.c\"\n"));
    }

    #[test]
    fn stub_job_rejects_non_json_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("timer.txt");
        fs::write(&input, TIMER).unwrap();
        let job = StubJob {
            inputs: vec![input],
            output: dir.path().join("timer.c"),
            namespace: None,
            force: false,
            loader: DescriptorLoader::default(),
        };
        assert!(matches!(
            job.run().unwrap_err(),
            GenerateError::Codegen(CodegenError::NotJsonInput { .. })
        ));
    }
}
