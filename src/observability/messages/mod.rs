// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human readable text and
//! [`StructuredLog`] to emit it through `tracing` with typed fields at the
//! level the event deserves.
//!
//! # Organization
//!
//! * `descriptor` - description loading and validation
//! * `codegen` - header, source and stub emission
//! * `oic` - OIC schema translation
//! * `engine` - batch lifecycle and job outcomes
//! * `config` - batch configuration loading
//!
//! # Usage Pattern
//!
//! ```rust
//! use sol_nodegen::observability::messages::engine::BatchStarted;
//! use sol_nodegen::observability::messages::StructuredLog;
//!
//! let msg = BatchStarted {
//!     job_count: 5,
//!     max_concurrency: 4,
//!     failure_strategy: "fail_fast",
//! };
//!
//! let span = msg.span("nightly");
//! let _guard = span.enter();
//! msg.log();
//! ```

pub mod codegen;
pub mod config;
pub mod descriptor;
pub mod engine;
pub mod oic;

use tracing::Span;

/// A log event with structured fields.
pub trait StructuredLog {
    /// Emit the event at its level.
    fn log(&self);

    /// A span carrying the same fields, for work that belongs to the event.
    fn span(&self, name: &str) -> Span;
}
