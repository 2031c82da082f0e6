// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types produced while loading resources.

use crate::resource::ResourceType;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong between a load request and a usable resource.
///
/// The variants map onto distinct outcomes a caller may want to react to
/// differently: an unsupported type is a configuration problem, a missing or
/// malformed file is a content problem, and an abandoned request only means
/// the loader shut down before getting to it.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No loader is registered for the requested resource type.
    #[error("no loader registered for resource type '{0}'")]
    Unsupported(ResourceType),

    /// The file does not exist on disk.
    #[error("file not found: '{}'", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file was read but its content could not be decoded.
    #[error("failed to decode '{}': {reason}", path.display())]
    Decode {
        /// The file that failed to decode.
        path: PathBuf,
        /// Human readable reason reported by the decoder.
        reason: String,
    },

    /// The loader panicked while producing the resource.
    #[error("loader panicked while loading '{path}': {message}")]
    Panicked {
        /// The requested path.
        path: String,
        /// The panic payload, when it was a string.
        message: String,
    },

    /// The request was still queued when the async loader stopped.
    #[error("load request for '{0}' was abandoned before dispatch")]
    Abandoned(String),
}

impl LoadError {
    /// Convenience constructor for decoder failures.
    pub fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        LoadError::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for failures caused by the file itself (missing,
    /// unreadable or malformed), as opposed to configuration or lifecycle
    /// failures.
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            LoadError::NotFound(_) | LoadError::Io { .. } | LoadError::Decode { .. }
        )
    }
}
