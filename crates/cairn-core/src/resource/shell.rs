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

use super::{ResourceData, ResourceLoader, ResourceType};
use crate::error::LoadError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard};

/// Paths starting with this prefix denote built-in placeholder resources.
pub const PLACEHOLDER_PREFIX: &str = "__placeholder";

/// One asset instance: an identity-bearing shell around decoded content.
///
/// A `Resource` is created empty and filled by [`load`](Self::load). Its
/// content can be dropped with [`unload`](Self::unload) and filled again
/// later without changing the shell, which is what makes hot reloading
/// visible to everyone already holding a handle.
///
/// The content sits behind a `RwLock`; readers take
/// [`data`](Self::data) guards, and only `load`/`unload` write.
pub struct Resource {
    path: String,
    name: String,
    kind: ResourceType,
    location: PathBuf,
    loader: Arc<dyn ResourceLoader>,
    content: RwLock<ResourceData>,
}

impl Resource {
    /// Creates an unloaded shell.
    ///
    /// `path` is the key the resource is known by; `location` is where the
    /// loader actually reads from.
    pub fn new(
        path: impl Into<String>,
        location: impl Into<PathBuf>,
        loader: Arc<dyn ResourceLoader>,
    ) -> Self {
        let path = path.into();
        let name = Path::new(&path)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();
        let kind = loader.kind();

        Self {
            path,
            name,
            kind,
            location: location.into(),
            loader,
            content: RwLock::new(ResourceData::Empty(kind)),
        }
    }

    /// Runs the loader and stores the decoded content.
    ///
    /// On failure the shell is left unloaded with empty content and the error
    /// is logged and returned. The shell itself stays usable and can be
    /// loaded again.
    pub fn load(&self) -> Result<(), LoadError> {
        log::debug!("Loading {} '{}'", self.kind, self.path);

        // Decode before taking the lock so readers are only blocked for the swap.
        let result = self.loader.load(&self.location).and_then(|data| {
            if data.kind() == self.kind {
                Ok(data)
            } else {
                Err(LoadError::decode(
                    &self.location,
                    format!(
                        "loader '{}' produced {} content for a {} resource",
                        self.loader.name(),
                        data.kind(),
                        self.kind
                    ),
                ))
            }
        });

        match result {
            Ok(data) => {
                let bytes = data.memory_usage();
                *self.content.write().unwrap() = data;
                log::debug!("Loaded {} '{}' ({} bytes)", self.kind, self.path, bytes);
                Ok(())
            }
            Err(err) => {
                *self.content.write().unwrap() = ResourceData::Empty(self.kind);
                log::error!("Failed to load {} '{}': {}", self.kind, self.path, err);
                Err(err)
            }
        }
    }

    /// Drops the content and returns the shell to the unloaded state.
    pub fn unload(&self) {
        *self.content.write().unwrap() = ResourceData::Empty(self.kind);
    }

    /// Returns `true` if the shell currently holds decoded content.
    pub fn is_loaded(&self) -> bool {
        !self.content.read().unwrap().is_empty()
    }

    /// Bytes held by the content's buffers, 0 when unloaded.
    pub fn memory_usage(&self) -> usize {
        self.content.read().unwrap().memory_usage()
    }

    /// Read access to the current content.
    pub fn data(&self) -> RwLockReadGuard<'_, ResourceData> {
        self.content.read().unwrap()
    }

    /// The resource type.
    pub fn kind(&self) -> ResourceType {
        self.kind
    }

    /// The key this resource is known by.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The file stem of [`path`](Self::path).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the loader reads the file from.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Returns `true` for the built-in placeholder resources.
    pub fn is_placeholder(&self) -> bool {
        self.path.starts_with(PLACEHOLDER_PREFIX)
    }
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("location", &self.location)
            .field("loader", &self.loader.name())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
