// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! OIC resource schemas to flow node types.
//!
//! Schemas are loaded with their `$ref`/`allOf` references expanded, each
//! object resource becomes a server and a client node type, and the C glue
//! connecting the OIC stack to those nodes is emitted next to the bundle
//! JSON. The bundle is then compiled like any other description.

pub mod c_glue;
mod generator;
pub mod node_types;
pub mod resource;
pub mod schema;

#[cfg(test)]
mod integration_tests;

pub use c_glue::{master_c, CGlue, ResourceGlue};
pub use generator::OicJob;
pub use node_types::{client_node_type, master_document, server_node_type};
pub use resource::{Property, PropertyKind, Resource, ResourceNames};
pub use schema::SchemaLoader;
