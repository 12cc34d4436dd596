// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for C code and stub emission.

use crate::errors::DescriptorError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stub files hold hand written code, so they are never replaced silently
    #[error("Can't overwrite stub file '{}'. Remove it yourself.", path.display())]
    StubExists { path: PathBuf },

    #[error("Description files not using .json extension '{}'.", path.display())]
    NotJsonInput { path: PathBuf },
}
