// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod batch;
pub mod factory;

pub use batch::{BatchExecutor, BatchReport, JobOutcome, JobResult};
pub use factory::ExecutorFactory;
