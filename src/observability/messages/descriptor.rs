// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for description loading.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A description file was parsed, validated and named.
///
/// # Log Level
/// `debug!` - Routine progress
///
/// # Example
/// ```
/// use sol_nodegen::observability::messages::descriptor::DescriptorLoaded;
///
/// let msg = DescriptorLoaded {
///     input: "boolean.json",
///     bundle: "boolean",
///     type_count: 4,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct DescriptorLoaded<'a> {
    pub input: &'a str,
    pub bundle: &'a str,
    pub type_count: usize,
}

impl Display for DescriptorLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded '{}' from {}: {} node types",
            self.bundle, self.input, self.type_count
        )
    }
}

impl StructuredLog for DescriptorLoaded<'_> {
    fn log(&self) {
        tracing::debug!(
            input = self.input,
            bundle = self.bundle,
            type_count = self.type_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "descriptor_loaded",
            span_name = name,
            input = self.input,
            bundle = self.bundle,
        )
    }
}

/// A description file failed to parse or validate. The diagnostics
/// themselves travel in the error.
///
/// # Log Level
/// `warn!` - Rejected input
pub struct DescriptorRejected<'a> {
    pub input: &'a str,
    pub problems: usize,
}

impl Display for DescriptorRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Rejected {}: {} problem(s)", self.input, self.problems)
    }
}

impl StructuredLog for DescriptorRejected<'_> {
    fn log(&self) {
        tracing::warn!(input = self.input, problems = self.problems, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "descriptor_rejected",
            span_name = name,
            input = self.input,
            problems = self.problems,
        )
    }
}
