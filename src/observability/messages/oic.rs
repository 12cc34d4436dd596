// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for OIC schema translation.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A resource definition produced a client and a server node type.
///
/// # Log Level
/// `debug!` - Routine progress
pub struct ResourceTranslated<'a> {
    pub schema: &'a str,
    pub resource: &'a str,
    pub property_count: usize,
}

impl Display for ResourceTranslated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Translated {} from {}: {} properties",
            self.resource, self.schema, self.property_count
        )
    }
}

impl StructuredLog for ResourceTranslated<'_> {
    fn log(&self) {
        tracing::debug!(
            schema = self.schema,
            resource = self.resource,
            property_count = self.property_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "resource_translated",
            span_name = name,
            schema = self.schema,
            resource = self.resource,
        )
    }
}

/// A schema file could not be translated in full. Resources translated
/// before the failure stay in the output.
///
/// # Log Level
/// `warn!` - The run continues without it
///
/// # Example
/// ```
/// use sol_nodegen::observability::messages::oic::SchemaSkipped;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "unsupported");
/// let msg = SchemaSkipped {
///     schema: "oic.r.light.json",
///     kept: 0,
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct SchemaSkipped<'a> {
    pub schema: &'a str,
    /// Resources translated before the failure
    pub kept: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for SchemaSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.kept == 0 {
            write!(f, "Skipping {}: {}", self.schema, self.error)
        } else {
            write!(
                f,
                "Skipping rest of {} after {} resources: {}",
                self.schema, self.kept, self.error
            )
        }
    }
}

impl StructuredLog for SchemaSkipped<'_> {
    fn log(&self) {
        tracing::warn!(schema = self.schema, kept = self.kept, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "schema_skipped",
            span_name = name,
            schema = self.schema,
            error = %self.error,
        )
    }
}

/// A directory scan finished.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ScanCompleted<'a> {
    pub directory: &'a str,
    pub translated: usize,
    pub skipped: usize,
}

impl Display for ScanCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Scanned {}: {} resources translated, {} schemas skipped",
            self.directory, self.translated, self.skipped
        )
    }
}

impl StructuredLog for ScanCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            directory = self.directory,
            translated = self.translated,
            skipped = self.skipped,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "scan_completed",
            span_name = name,
            directory = self.directory,
        )
    }
}
