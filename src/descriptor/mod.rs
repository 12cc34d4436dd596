// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Node-type descriptions: typed model, naming rules, schema validation and
//! diagnostics.
//!
//! Loading a file goes through four steps, each with its own failure mode:
//!
//! 1. read the file ([`DescriptorError::Io`](crate::errors::DescriptorError::Io))
//! 2. parse JSON, reporting `file:line:column` on syntax errors
//! 3. walk the document against the description schema, collecting every
//!    violation
//! 4. decode into [`NodeTypeDescription`] and resolve C names
//!
//! # Example
//! ```no_run
//! use sol_nodegen::descriptor::DescriptorLoader;
//!
//! let bundle = DescriptorLoader::new(Some("sol_flow_node_type"))
//!     .with_context_lines(5)
//!     .load("descriptors/boolean.json")?;
//! for node_type in &bundle.types {
//!     println!("{} -> {}", node_type.spec.name, node_type.names.upper);
//! }
//! # Ok::<(), sol_nodegen::errors::DescriptorError>(())
//! ```

mod data_type;
pub mod diagnostics;
mod job;
mod loader;
pub mod model;
pub mod naming;
mod path;
pub mod repr;
mod schema;
pub mod value;

pub use data_type::{composed_suffix, DataType};
pub use job::ValidateJob;
pub use loader::{DescriptorLoader, NodeType, NodeTypeBundle};
pub use model::{
    BundleMeta, BundleSpec, Document, ExtraMethod, NodeMethods, NodeTypeDescription,
    NodeTypeExtension, OptionMember, OptionsSpec, PortSpec,
};
pub use naming::{c_clean, port_name_and_size, CNames};
pub use path::{JsonPath, PathSegment};
pub use schema::validate_document;
pub use value::DefaultValue;
