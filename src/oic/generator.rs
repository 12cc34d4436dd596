// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::codegen::ArtifactWriter;
use crate::errors::{GenerateError, OicError};
use crate::observability::messages::oic::{ResourceTranslated, ScanCompleted, SchemaSkipped};
use crate::observability::messages::StructuredLog;
use crate::oic::c_glue::{master_c, CGlue, ResourceGlue};
use crate::oic::node_types::{master_document, to_pretty_json};
use crate::oic::resource::{translate_definitions, Resource, SchemaResources};
use crate::oic::schema::SchemaLoader;
use crate::traits::{GenerationReport, Generator};
use std::fs;
use std::path::{Path, PathBuf};

const SCHEMA_PREFIXES: &[&str] = &["oic.r.", "core."];
const IGNORED_SUFFIXES: &[&str] = &["-Update.json", "-Error.json", "-Batch.json"];

/// Translate every resource schema found in `schema_dirs` into one node-type
/// bundle and its C implementation.
#[derive(Debug, Clone)]
pub struct OicJob {
    pub schema_dirs: Vec<PathBuf>,
    /// Bundle JSON to write; its file stem names the bundle
    pub node_type_json: PathBuf,
    /// C implementation to write
    pub node_type_impl: PathBuf,
    /// Include path of the source generated from the bundle
    pub gen_c: String,
    /// Include path of the header generated from the bundle
    pub gen_h: String,
}

impl OicJob {
    /// Bundle name: the JSON file name without `.json`.
    pub fn json_name(&self) -> String {
        let file = self
            .node_type_json
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match file.strip_suffix(".json") {
            Some(stem) => stem.to_string(),
            None => file,
        }
    }

    fn translate(&self) -> Result<Translation, OicError> {
        let json_name = self.json_name();
        let mut loader = SchemaLoader::new();
        let mut glue = CGlue::new();
        let mut translation = Translation::default();

        for dir in &self.schema_dirs {
            let (mut translated, mut skipped) = (0, 0);
            for file in schema_files(dir)? {
                let schema = dir.join(&file).display().to_string();
                let SchemaResources { resources, error } = match loader.load(dir, &file) {
                    Ok(definitions) => translate_definitions(&definitions, &json_name),
                    Err(error) => SchemaResources {
                        resources: Vec::new(),
                        error: Some(error),
                    },
                };
                let kept = resources.len();
                for resource in resources {
                    ResourceTranslated {
                        schema: &schema,
                        resource: &resource.resource_type,
                        property_count: resource.properties.len(),
                    }
                    .log();
                    translation.glue.push(glue.resource(&resource));
                    translation.resources.push(resource);
                }
                translated += kept;
                if let Some(error) = error {
                    SchemaSkipped {
                        schema: &schema,
                        kept,
                        error: &error,
                    }
                    .log();
                    let note = if kept == 0 {
                        format!("{}: skipped: {}", schema, error)
                    } else {
                        format!("{}: kept {} resource(s), skipped the rest: {}", schema, kept, error)
                    };
                    translation.notes.push(note);
                    skipped += 1;
                }
            }
            ScanCompleted {
                directory: &dir.display().to_string(),
                translated,
                skipped,
            }
            .log();
        }
        Ok(translation)
    }
}

#[derive(Debug, Default)]
struct Translation {
    resources: Vec<Resource>,
    glue: Vec<ResourceGlue>,
    notes: Vec<String>,
}

impl Generator for OicJob {
    fn kind(&self) -> &'static str {
        "oic"
    }

    fn run(&self) -> Result<GenerationReport, GenerateError> {
        let translation = self.translate()?;

        let master = master_document(&translation.resources, &self.json_name());
        let json = to_pretty_json(&master).map_err(|source| OicError::Json {
            path: self.node_type_json.clone(),
            source,
        })?;
        let c = master_c(&translation.glue, &self.gen_c, &self.gen_h);

        let mut writer = ArtifactWriter::new();
        let write_failed = |(path, source): (PathBuf, std::io::Error)| OicError::Write { path, source };
        writer.stage(&self.node_type_json, &json).map_err(write_failed)?;
        writer.stage(&self.node_type_impl, &c).map_err(write_failed)?;
        let artifacts = writer.commit().map_err(write_failed)?;

        Ok(GenerationReport {
            artifacts,
            notes: translation.notes,
        })
    }
}

/// Schema files of `dir` in name order.
fn schema_files(dir: &Path) -> Result<Vec<String>, OicError> {
    let io_error = |source| OicError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let name = entry.map_err(io_error)?.file_name().to_string_lossy().to_string();
        if seems_schema(&name) {
            files.push(name);
        }
    }
    files.sort();
    Ok(files)
}

fn seems_schema(name: &str) -> bool {
    name.ends_with(".json")
        && SCHEMA_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
        && !IGNORED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_schema_file_names() {
        assert!(seems_schema("oic.r.light.brightness.json"));
        assert!(seems_schema("core.light.json"));
        assert!(!seems_schema("oic.r.light-Update.json"));
        assert!(!seems_schema("oic.r.light-Batch.json"));
        assert!(!seems_schema("oic.core.json"));
        assert!(!seems_schema("oic.r.light.yaml"));
    }

    #[test]
    fn bundle_name_comes_from_the_json_file() {
        let job = OicJob {
            schema_dirs: vec![],
            node_type_json: PathBuf::from("build/oic.json"),
            node_type_impl: PathBuf::from("build/oic.c"),
            gen_c: "oic-gen.c".into(),
            gen_h: "oic-gen.h".into(),
        };
        assert_eq!(job.json_name(), "oic");
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let job = OicJob {
            schema_dirs: vec![dir.path().join("absent")],
            node_type_json: dir.path().join("oic.json"),
            node_type_impl: dir.path().join("oic.c"),
            gen_c: "oic-gen.c".into(),
            gen_h: "oic-gen.h".into(),
        };
        assert!(matches!(job.run(), Err(GenerateError::Oic(OicError::Io { .. }))));
        assert!(!dir.path().join("oic.json").exists());
    }
}
