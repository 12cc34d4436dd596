// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Reading description files into validated, named bundles.

use crate::descriptor::diagnostics::{schema_report, syntax_message, syntax_report};
use crate::descriptor::model::{BundleMeta, Document, NodeTypeDescription};
use crate::descriptor::naming::{c_clean, CNames};
use crate::descriptor::validate_document;
use crate::errors::DescriptorError;
use crate::observability::messages::descriptor::{DescriptorLoaded, DescriptorRejected};
use crate::observability::messages::StructuredLog;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// A node type together with its resolved C names.
#[derive(Debug, Clone)]
pub struct NodeType {
    pub spec: NodeTypeDescription,
    pub names: CNames,
}

/// Every node type described by one input file.
///
/// A file holding a single description becomes a bundle of one named after
/// that type.
#[derive(Debug, Clone)]
pub struct NodeTypeBundle {
    /// Input file, as given by the caller
    pub input: PathBuf,
    pub name: String,
    /// Cleaned bundle name, used by the per-bundle type enumeration function
    pub name_c: String,
    /// Prefixed C names of the bundle itself
    pub names: CNames,
    /// Whether the file declared a `types` list
    pub bundled: bool,
    pub meta: BundleMeta,
    pub types: Vec<NodeType>,
}

impl NodeTypeBundle {
    /// Build a bundle from an already decoded document.
    pub fn from_document(input: PathBuf, document: Document, prefix: Option<&str>) -> Self {
        let bundled = matches!(document, Document::Bundle(_));
        let (name, meta, specs) = match document {
            Document::Single(spec) => (spec.name.clone(), BundleMeta::default(), vec![spec]),
            Document::Bundle(bundle) => (bundle.name, bundle.meta, bundle.types),
        };
        let types = specs
            .into_iter()
            .map(|spec| {
                let spec = apply_meta(spec, &meta);
                let names = CNames::new(prefix, &spec.name);
                NodeType { spec, names }
            })
            .collect();
        Self {
            input,
            name_c: c_clean(&name.to_lowercase()),
            names: CNames::new(prefix, &name),
            bundled,
            name,
            meta,
            types,
        }
    }

    pub fn uses_float(&self) -> bool {
        self.types.iter().any(|t| t.spec.uses_float())
    }
}

fn apply_meta(mut spec: NodeTypeDescription, meta: &BundleMeta) -> NodeTypeDescription {
    if spec.author.is_none() {
        spec.author = meta.author.clone();
    }
    if spec.license.is_none() {
        spec.license = meta.license.clone();
    }
    if spec.version.is_none() {
        spec.version = meta.version.clone();
    }
    spec
}

/// Loads description files: read, parse with position reporting, validate,
/// decode and name.
///
/// # Example
/// ```no_run
/// use sol_nodegen::descriptor::DescriptorLoader;
///
/// let loader = DescriptorLoader::new(Some("sol_flow_node_type"));
/// let bundle = loader.load("descriptors/boolean.json").unwrap();
/// println!("{} types", bundle.types.len());
/// ```
#[derive(Debug, Clone)]
pub struct DescriptorLoader {
    prefix: Option<String>,
    context_lines: usize,
    schema_max_depth: i32,
}

impl Default for DescriptorLoader {
    fn default() -> Self {
        Self {
            prefix: None,
            context_lines: crate::config::consts::DEFAULT_CONTEXT_LINES,
            schema_max_depth: crate::config::consts::DEFAULT_SCHEMA_MAX_DEPTH,
        }
    }
}

impl DescriptorLoader {
    pub fn new(prefix: Option<&str>) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            ..Self::default()
        }
    }

    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn with_schema_max_depth(mut self, schema_max_depth: i32) -> Self {
        self.schema_max_depth = schema_max_depth;
        self
    }

    /// Parse and validate `path` without naming the result.
    pub fn load_document<P: AsRef<Path>>(&self, path: P) -> Result<Document, DescriptorError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let contents = fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value = serde_json::from_str(&contents).map_err(|e| {
            let report = syntax_report(&display, &contents, &e, self.context_lines);
            DescriptorRejected {
                input: &display,
                problems: 1,
            }
            .log();
            DescriptorError::Syntax {
                path: path.to_path_buf(),
                line: e.line(),
                column: e.column(),
                message: syntax_message(&e),
                report,
            }
        })?;

        if let Err(violations) = validate_document(&value) {
            DescriptorRejected {
                input: &display,
                problems: violations.len(),
            }
            .log();
            let report = schema_report(&display, &value, &violations, self.schema_max_depth);
            return Err(DescriptorError::Schema {
                path: path.to_path_buf(),
                violations,
                report,
            });
        }

        Document::from_value(value).map_err(|source| DescriptorError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` into a named bundle.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<NodeTypeBundle, DescriptorError> {
        let path = path.as_ref();
        let document = self.load_document(path)?;
        let bundle =
            NodeTypeBundle::from_document(path.to_path_buf(), document, self.prefix.as_deref());
        DescriptorLoaded {
            input: &path.display().to_string(),
            bundle: &bundle.name,
            type_count: bundle.types.len(),
        }
        .log();
        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_single_description_as_bundle_of_one() {
        let file = write_temp(r#"{"name": "Boolean/AND", "category": "boolean"}"#);
        let bundle = DescriptorLoader::new(Some("sol-flow-node-type"))
            .load(file.path())
            .unwrap();
        assert_eq!(bundle.name, "Boolean/AND");
        assert_eq!(bundle.name_c, "boolean_and");
        assert!(!bundle.bundled);
        assert_eq!(bundle.types.len(), 1);
        assert_eq!(bundle.types[0].names.lower, "sol_flow_node_type_boolean_and");
    }

    #[test]
    fn bundle_meta_fills_missing_fields() {
        let file = write_temp(
            r#"{
                "name": "pack",
                "meta": {"author": "Someone", "license": "MIT", "version": "2"},
                "types": [
                    {"name": "pack/a", "category": "x"},
                    {"name": "pack/b", "category": "x", "license": "BSD"}
                ]
            }"#,
        );
        let bundle = DescriptorLoader::default().load(file.path()).unwrap();
        assert_eq!(bundle.types[0].spec.author.as_deref(), Some("Someone"));
        assert_eq!(bundle.types[0].spec.license.as_deref(), Some("MIT"));
        assert_eq!(bundle.types[1].spec.license.as_deref(), Some("BSD"));
        assert_eq!(bundle.types[1].names.lower, "pack_b");
        assert!(bundle.bundled);
        assert_eq!(bundle.names.lower, "pack");
    }

    #[test]
    fn syntax_errors_carry_location() {
        let file = write_temp("{\n  \"name\": \"a\",\n}\n");
        let err = DescriptorLoader::default().load(file.path()).unwrap_err();
        match &err {
            DescriptorError::Syntax { line, report, message, .. } => {
                assert_eq!(*line, 3);
                assert_eq!(message, "trailing comma");
                assert!(report.iter().any(|l| l.contains(":3:")));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(err.to_string().contains(":3:"));
    }

    #[test]
    fn schema_errors_list_every_violation() {
        let file = write_temp(r#"{"name": "a", "in_ports": [{"name": "in", "data_type": "int"}]}"#);
        let err = DescriptorLoader::default()
            .with_schema_max_depth(0)
            .load(file.path())
            .unwrap_err();
        match err {
            DescriptorError::Schema { violations, report, .. } => {
                assert_eq!(violations.len(), 2);
                assert_eq!(report.iter().filter(|l| l.contains(": error: json")).count(), 2);
                assert!(report.iter().any(|l| l.ends_with(": faulty object at json = {")));
                assert!(!report.iter().any(|l| l.contains("schema for")));
            }
            other => panic!("unexpected {:?}", other),
        }

        let err = DescriptorLoader::default().load(file.path()).unwrap_err();
        let report = err.report();
        assert!(report.iter().any(|l| l.ends_with(": schema for json:")));
        assert!(report.iter().any(|l| l.ends_with(":   required:")));
        assert!(report.iter().any(|l| l.ends_with(":   pattern: ^[A-Z0-9_]+(\\[[0-9]+\\])?$")));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DescriptorLoader::default()
            .load("/nonexistent/description.json")
            .unwrap_err();
        assert!(matches!(err, DescriptorError::Io { .. }));
    }
}
