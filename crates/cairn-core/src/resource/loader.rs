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

use super::{ResourceData, ResourceType};
use crate::error::LoadError;
use std::path::Path;

/// A type that knows how to turn a file into resource content.
///
/// Loaders are registered per [`ResourceType`] and shared between the caller
/// threads and the background worker, hence the `Send + Sync` bound. A loader
/// is also kept by every [`Resource`](super::Resource) it produced, so that
/// the resource can reload itself in place.
pub trait ResourceLoader: Send + Sync + 'static {
    /// The resource type this loader produces.
    fn kind(&self) -> ResourceType;

    /// Reads and decodes the file at `path`.
    ///
    /// Implementations must return content of [`kind`](Self::kind). Missing
    /// files should map to [`LoadError::NotFound`], malformed ones to
    /// [`LoadError::Decode`].
    fn load(&self, path: &Path) -> Result<ResourceData, LoadError>;

    /// A short name for logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
