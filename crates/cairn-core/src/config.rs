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

//! Configuration for the resource subsystem.
//!
//! The configuration is plain data and can be stored as RON next to the
//! assets it describes:
//!
//! ```ron
//! (
//!     asset_directory: "assets",
//!     worker_thread_name: "cairn-loader",
//!     queue_capacity: 0,
//! )
//! ```
//!
//! Missing fields fall back to [`ResourceConfig::default`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        /// The config file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid RON for [`ResourceConfig`].
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Settings for a `ResourceManager`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Root that relative resource paths are resolved against.
    pub asset_directory: PathBuf,
    /// Name given to the background loader thread.
    pub worker_thread_name: String,
    /// Maximum number of queued requests before producers block.
    /// `0` means unbounded.
    pub queue_capacity: usize,
    /// Register the texture, mesh and audio loaders on initialization.
    pub register_default_loaders: bool,
    /// Route `.ogg`/`.mp3` through the compressed audio decoder.
    /// When disabled, only WAV files decode.
    pub enable_compressed_audio: bool,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            asset_directory: PathBuf::from("assets"),
            worker_thread_name: "cairn-loader".to_string(),
            queue_capacity: 0,
            register_default_loaders: true,
            enable_compressed_audio: true,
        }
    }
}

impl ResourceConfig {
    /// Parses a configuration from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Reads and parses a RON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    /// Returns a copy rooted at a different asset directory.
    pub fn with_asset_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.asset_directory = directory.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_falls_back_to_defaults() {
        let config = ResourceConfig::from_ron_str(r#"(asset_directory: "data", queue_capacity: 64)"#)
            .unwrap();
        assert_eq!(config.asset_directory, PathBuf::from("data"));
        assert_eq!(config.queue_capacity, 64);
        assert_eq!(config.worker_thread_name, "cairn-loader");
        assert!(config.register_default_loaders);
    }

    #[test]
    fn invalid_ron_is_a_parse_error() {
        let err = ResourceConfig::from_ron_str("(asset_directory: 12").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ResourceConfig::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
