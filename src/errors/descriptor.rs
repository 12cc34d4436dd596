// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while loading and validating node-type descriptions.

use crate::descriptor::JsonPath;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single place where a description does not conform to the node-type schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaViolation {
    /// Location of the offending value inside the document
    pub path: JsonPath,
    /// Human readable reason
    pub message: String,
    /// Schema fragment the value broke, e.g. `{"type": "string"}`
    pub rule: Option<Value>,
}

impl SchemaViolation {
    pub fn new(path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
            rule: None,
        }
    }

    pub fn with_rule(mut self, rule: Value) -> Self {
        self.rule = Some(rule);
        self
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Errors that can occur while turning a description file into a typed bundle.
///
/// Every variant except `Io` carries a `report`: the editor friendly
/// `file:line:column` lines that the command line front-end prints verbatim.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}:{column}: error: {message}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
        report: Vec<String>,
    },

    #[error("{}: {} schema violation(s)", path.display(), violations.len())]
    Schema {
        path: PathBuf,
        violations: Vec<SchemaViolation>,
        report: Vec<String>,
    },

    #[error("{}: error: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl DescriptorError {
    /// Diagnostic lines to show the user, falling back to the error message.
    pub fn report(&self) -> Vec<String> {
        match self {
            DescriptorError::Syntax { report, .. } | DescriptorError::Schema { report, .. }
                if !report.is_empty() =>
            {
                report.clone()
            }
            other => vec![other.to_string()],
        }
    }
}
