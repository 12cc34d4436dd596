// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! C emission for node types.
//!
//! * [`generate_header`] and [`generate_source`] turn a loaded bundle into
//!   the `-gen.h`/`-gen.c` pair that a node type implementation includes.
//! * [`generate_stub`] writes a starting point for that implementation.
//! * [`ArtifactWriter`] commits a job's outputs together or not at all.
//!
//! Emitters are pure functions of their input, so generating twice from the
//! same description yields byte-identical files.

pub mod c_literal;
mod header;
mod job;
mod source;
mod stub;
mod writer;

#[cfg(test)]
mod integration_tests;

pub use header::generate_header;
pub use job::{NodeTypeJob, StubJob};
pub use source::generate_source;
pub use stub::{generate_stub, stub_base_name, StubInput};
pub use writer::ArtifactWriter;
