// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod codegen;    // C header, source and stub emitters
pub mod config;     // batch configuration
pub mod descriptor; // node-type descriptions
pub mod engine;     // batch executor
pub mod errors;     // error handling
pub mod observability;
pub mod oic;        // OIC resource schemas
pub mod traits;     // the generator seam
