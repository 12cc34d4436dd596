// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for the OIC resource schema generator.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OicError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: invalid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{}: not a JSON schema", path.display())]
    NotJsonSchema { path: PathBuf },

    #[error("{}: empty definition block", path.display())]
    EmptyDefinitions { path: PathBuf },

    #[error("no $ref in allOf")]
    AllOfWithoutRef,

    #[error("malformed $ref '{reference}'")]
    BadReference { reference: String },

    #[error("{}: $ref cycle", path.display())]
    ReferenceCycle { path: PathBuf },

    #[error("definition '{name}' not found in {}", path.display())]
    MissingDefinition { path: PathBuf, name: String },

    #[error("'{name}' is not an OIC resource definition")]
    NotOicResource { name: String },

    /// Arrays and nested objects have no flow packet counterpart
    #[error("property '{property}' uses unsupported type '{kind}'")]
    UnsupportedProperty { property: String, kind: String },

    #[error("resource '{name}' declares no properties")]
    NoProperties { name: String },

    #[error("unknown type for property '{property}'")]
    UnknownPropertyType { property: String },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
