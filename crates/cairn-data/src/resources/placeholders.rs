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

//! Storage for the per-type stand-in resources.

use cairn_core::{Resource, ResourceHandle, ResourceType};
use std::collections::HashMap;
use std::sync::Arc;

/// One pre-loaded stand-in resource per resource type.
#[derive(Debug, Default)]
pub struct PlaceholderSet {
    resources: HashMap<ResourceType, Arc<Resource>>,
}

impl PlaceholderSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `resource` as the placeholder for its type, replacing any previous one.
    pub fn insert(&mut self, resource: Arc<Resource>) {
        self.resources.insert(resource.kind(), resource);
    }

    /// A fresh handle to the placeholder for `kind`.
    ///
    /// Placeholders are never evicted, so each call opens its own lease.
    pub fn get(&self, kind: ResourceType) -> Option<ResourceHandle> {
        self.resources.get(&kind).cloned().map(ResourceHandle::new)
    }

    /// Bytes held by all placeholders.
    pub fn memory_usage(&self) -> usize {
        self.resources.values().map(|r| r.memory_usage()).sum()
    }

    /// Number of placeholders.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Drops every placeholder.
    pub fn clear(&mut self) {
        self.resources.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_core::{LoadError, ResourceData, ResourceLoader, TextureData};
    use std::path::Path;

    struct Magenta;

    impl ResourceLoader for Magenta {
        fn kind(&self) -> ResourceType {
            ResourceType::Texture
        }

        fn load(&self, _path: &Path) -> Result<ResourceData, LoadError> {
            Ok(TextureData::solid(2, 2, [255, 0, 255, 255]).into())
        }
    }

    #[test]
    fn handles_share_the_stored_instance() {
        let resource = Arc::new(Resource::new(
            "__placeholder_texture__",
            "__placeholder_texture__",
            Arc::new(Magenta),
        ));
        resource.load().unwrap();

        let mut set = PlaceholderSet::new();
        set.insert(resource);

        let a = set.get(ResourceType::Texture).unwrap();
        let b = set.get(ResourceType::Texture).unwrap();
        assert!(ResourceHandle::ptr_eq(&a, &b));
        assert!(a.is_placeholder());
        assert_eq!(set.memory_usage(), 16);
        assert!(set.get(ResourceType::Mesh).is_none());

        set.clear();
        assert!(set.is_empty());
        // Outstanding handles keep the content alive.
        assert!(a.is_loaded());
    }
}
