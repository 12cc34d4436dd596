// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod codegen;
mod config;
mod descriptor;
mod execution;
mod oic;

pub use codegen::CodegenError;
pub use config::{ConfigError, ConfigValidationError};
pub use descriptor::{DescriptorError, SchemaViolation};
pub use execution::{ExecutionError, FailureStrategy, GenerateError};
pub use oic::OicError;
