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

//! A path-keyed cache of loaded resources.

use cairn_core::{Resource, ResourceHandle, ResourceType, WeakLease};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// One cached resource.
///
/// The entry owns the resource strongly and remembers the lease shared by
/// every handle it has given out. When the lease can no longer be upgraded
/// no consumer holds the resource and the entry is considered unused.
#[derive(Debug)]
struct CacheEntry {
    resource: Arc<Resource>,
    lease: WeakLease,
}

impl CacheEntry {
    fn handle(&mut self) -> ResourceHandle {
        if let Some(handle) = self.lease.upgrade() {
            return handle;
        }
        let handle = ResourceHandle::new(self.resource.clone());
        self.lease = handle.downgrade();
        handle
    }
}

/// A central, in-memory cache mapping a path to its resource.
///
/// There is at most one entry per path, so any given file is decoded once
/// and every request for it shares the same instance.
#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: HashMap<String, CacheEntry>,
}

impl ResourceCache {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `resource` under its path and returns a handle to it.
    ///
    /// An existing entry for the same path is replaced. The previous
    /// resource is not unloaded; consumers still holding it keep their
    /// content.
    pub fn insert(&mut self, resource: Arc<Resource>) -> ResourceHandle {
        let handle = ResourceHandle::new(resource.clone());
        let entry = CacheEntry {
            resource,
            lease: handle.downgrade(),
        };
        if let Some(old) = self.entries.insert(handle.path().to_string(), entry) {
            log::debug!("Replaced cache entry '{}'", old.resource.path());
        }
        handle
    }

    /// Returns a handle to the cached resource for `path`.
    pub fn get(&mut self, path: &str) -> Option<ResourceHandle> {
        self.entries.get_mut(path).map(CacheEntry::handle)
    }

    /// The cached resource itself, without opening a lease.
    pub fn resource(&self, path: &str) -> Option<Arc<Resource>> {
        self.entries.get(path).map(|entry| entry.resource.clone())
    }

    /// Checks if an entry exists for `path`. Never triggers a load.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Unloads and erases the entry for `path`.
    ///
    /// Returns `false` if there was no such entry.
    pub fn unload(&mut self, path: &str) -> bool {
        match self.entries.remove(path) {
            Some(entry) => {
                entry.resource.unload();
                true
            }
            None => false,
        }
    }

    /// Unloads and erases every entry of `kind`, whether or not it is held.
    ///
    /// Returns the number of entries removed.
    pub fn unload_type(&mut self, kind: ResourceType) -> usize {
        self.unload_where(|entry| entry.resource.kind() == kind)
    }

    /// Unloads and erases every entry that no consumer holds a handle to.
    ///
    /// Returns the number of entries removed.
    pub fn unload_unused(&mut self) -> usize {
        self.unload_where(|entry| !entry.lease.is_held())
    }

    /// Unloads and erases everything.
    pub fn clear(&mut self) {
        self.unload_where(|_| true);
    }

    fn unload_where(&mut self, mut predicate: impl FnMut(&CacheEntry) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|path, entry| {
            if predicate(entry) {
                entry.resource.unload();
                log::trace!("Evicted '{}'", path);
                false
            } else {
                true
            }
        });
        before - self.entries.len()
    }

    /// Sum of [`Resource::memory_usage`] over every entry.
    pub fn total_memory_usage(&self) -> usize {
        self.entries
            .values()
            .map(|entry| entry.resource.memory_usage())
            .sum()
    }

    /// Number of entries whose resource currently holds content.
    pub fn loaded_count(&self) -> usize {
        self.entries
            .values()
            .filter(|entry| entry.resource.is_loaded())
            .count()
    }

    /// Paths of every entry of `kind`, sorted.
    pub fn paths_of_type(&self, kind: ResourceType) -> Vec<String> {
        let mut paths: Vec<String> = self
            .entries
            .values()
            .filter(|entry| entry.resource.kind() == kind)
            .map(|entry| entry.resource.path().to_string())
            .collect();
        paths.sort();
        paths
    }

    /// Number of entries per resource type.
    pub fn count_by_type(&self) -> BTreeMap<ResourceType, usize> {
        let mut counts = BTreeMap::new();
        for entry in self.entries.values() {
            *counts.entry(entry.resource.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the cache has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
