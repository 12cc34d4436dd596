// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and
//! operational logging in sol-nodegen. Message types follow a struct-based
//! pattern with a `Display` implementation so log text lives in one place
//! and every event carries the same structured fields wherever it is emitted.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::descriptor` - description loading and validation
//! * `messages::codegen` - header, source and stub emission
//! * `messages::oic` - OIC schema translation
//! * `messages::engine` - batch lifecycle and per job outcomes
//! * `messages::config` - batch configuration loading
//!
//! # Usage
//!
//! ```rust
//! use sol_nodegen::observability::messages::codegen::ArtifactsWritten;
//! use sol_nodegen::observability::messages::StructuredLog;
//!
//! let msg = ArtifactsWritten {
//!     job_kind: "node_type",
//!     input: "boolean.json",
//!     artifact_count: 2,
//! };
//!
//! msg.log();
//! ```
//!
//! Editor oriented diagnostics (`file:line:column: error: ...`) are not log
//! events; the command line front-end prints them to stderr verbatim.

pub mod messages;
