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

use super::Resource;
use std::{
    ops::Deref,
    sync::{Arc, Weak},
};

/// The shared token behind every clone of a [`ResourceHandle`].
#[derive(Debug)]
struct Lease {
    resource: Arc<Resource>,
}

/// A thread-safe, reference-counted handle to a resource.
///
/// Cloning a handle is cheap and does not duplicate the resource. All clones
/// of a handle share one *lease*; whoever owns the resource (usually the
/// cache) can keep a [`WeakLease`] to find out whether any consumer still
/// holds the resource, without counting references by hand.
#[derive(Debug, Clone)]
pub struct ResourceHandle(Arc<Lease>);

impl ResourceHandle {
    /// Opens a new lease on `resource`.
    pub fn new(resource: Arc<Resource>) -> Self {
        Self(Arc::new(Lease { resource }))
    }

    /// Returns a weak reference to this handle's lease.
    pub fn downgrade(&self) -> WeakLease {
        WeakLease(Arc::downgrade(&self.0))
    }

    /// The underlying resource. Only the lease keeps it alive; the `Arc`
    /// itself never leaves the handle.
    pub fn resource(&self) -> &Resource {
        &self.0.resource
    }

    /// Returns `true` if both handles point at the same resource instance,
    /// even if they come from different leases.
    pub fn ptr_eq(a: &ResourceHandle, b: &ResourceHandle) -> bool {
        Arc::ptr_eq(&a.0.resource, &b.0.resource)
    }
}

impl Deref for ResourceHandle {
    type Target = Resource;

    fn deref(&self) -> &Self::Target {
        &self.0.resource
    }
}

/// A weak reference to the lease shared by a group of handles.
#[derive(Debug, Clone, Default)]
pub struct WeakLease(Weak<Lease>);

impl WeakLease {
    /// Recovers a handle if any clone of the lease is still alive.
    pub fn upgrade(&self) -> Option<ResourceHandle> {
        self.0.upgrade().map(ResourceHandle)
    }

    /// Returns `true` while at least one handle of the lease is alive.
    pub fn is_held(&self) -> bool {
        self.0.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;
    use crate::resource::{ResourceData, ResourceLoader, ResourceType};
    use std::path::Path;

    struct NullLoader;

    impl ResourceLoader for NullLoader {
        fn kind(&self) -> ResourceType {
            ResourceType::Audio
        }

        fn load(&self, _path: &Path) -> Result<ResourceData, LoadError> {
            Ok(ResourceData::Empty(ResourceType::Audio))
        }
    }

    fn resource() -> Arc<Resource> {
        Arc::new(Resource::new("step.wav", "step.wav", Arc::new(NullLoader)))
    }

    #[test]
    fn lease_is_held_while_any_clone_lives() {
        let handle = ResourceHandle::new(resource());
        let weak = handle.downgrade();
        let clone = handle.clone();

        drop(handle);
        assert!(weak.is_held());
        drop(clone);
        assert!(!weak.is_held());
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn default_weak_lease_is_never_held() {
        assert!(!WeakLease::default().is_held());
    }

    #[test]
    fn handles_on_the_same_resource_compare_equal() {
        let shared = resource();
        let a = ResourceHandle::new(shared.clone());
        let b = ResourceHandle::new(shared);
        let c = ResourceHandle::new(resource());

        assert!(ResourceHandle::ptr_eq(&a, &b));
        assert!(!ResourceHandle::ptr_eq(&a, &c));
        assert_eq!(a.path(), "step.wav");
    }
}
