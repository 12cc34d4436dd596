// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Prefix of generated node-type symbols (`sol_flow_node_type_<name>`)
pub const DEFAULT_PREFIX: &str = "sol_flow_node_type";
/// Source lines shown before a JSON syntax error
pub const DEFAULT_CONTEXT_LINES: usize = 3;
/// Nesting shown when dumping the schema rule a description broke; 0 hides the rule, -1 is unlimited
pub const DEFAULT_SCHEMA_MAX_DEPTH: i32 = 2;
/// Concurrency used when neither the config nor the host reports one
pub const FALLBACK_CONCURRENCY: usize = 4;
