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

//! The resource manager: public API of the resource subsystem.

use super::handle::{LoadHandle, LoadResult};
use super::loader::{LoaderMetrics, LoaderRegistry};
use super::stats::ResourceStats;
use super::worker::{AsyncLoader, LoadRequest, RequestHandler};
use anyhow::Result;
use cairn_core::{LoadError, Resource, ResourceConfig, ResourceHandle, ResourceLoader, ResourceType};
use cairn_data::resources::{PlaceholderSet, ResourceCache};
use cairn_lanes::resource_lane::{placeholder_resource, scan_directory};
use cairn_telemetry::MetricsRegistry;
use std::any::Any;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything guarded by the manager's main lock.
struct State {
    asset_directory: PathBuf,
    registry: LoaderRegistry,
    cache: ResourceCache,
    placeholders: PlaceholderSet,
}

/// State shared between the manager and its worker thread.
struct Shared {
    state: Mutex<State>,
    /// Paths with requests waiting in the queue, with their multiplicity.
    queued: Mutex<HashMap<String, usize>>,
    /// The path the worker is processing right now.
    in_flight: Mutex<Option<String>>,
    total_requests: AtomicUsize,
    completed_requests: AtomicUsize,
    metrics: Arc<LoaderMetrics>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn enqueue(&self, path: &str) {
        *self.queued.lock().unwrap().entry(path.to_string()).or_insert(0) += 1;
    }

    fn dequeue(&self, path: &str) {
        let mut queued = self.queued.lock().unwrap();
        if let Some(count) = queued.get_mut(path) {
            *count -= 1;
            if *count == 0 {
                queued.remove(path);
            }
        }
    }

    /// Loads `path` on the calling thread and caches the result.
    ///
    /// An already cached path is returned as is. A file that is missing or
    /// fails to decode still yields its (empty) shell, which is cached so a
    /// later hot reload can fill it.
    fn load_now(&self, path: &str, kind: ResourceType) -> LoadResult {
        let (loader, location) = {
            let mut state = self.state();
            if let Some(handle) = state.cache.get(path) {
                log::trace!("'{}' is already cached", path);
                return Ok(handle);
            }
            let loader = state.registry.get(kind)?;
            let location = resolve(&state.asset_directory, path);
            (loader, location)
        };

        let resource = Resource::new(path, location, loader);
        let outcome = catch_unwind(AssertUnwindSafe(|| resource.load()));
        if let Err(payload) = outcome {
            self.metrics.record_failure();
            let message = panic_message(payload.as_ref());
            log::error!("Loader panicked while loading '{}': {}", path, message);
            return Err(LoadError::Panicked {
                path: path.to_string(),
                message,
            });
        }
        // A soft failure was logged by the shell itself; the shell is still cached.

        let mut state = self.state();
        if let Some(existing) = state.cache.get(path) {
            return Ok(existing);
        }
        Ok(state.cache.insert(Arc::new(resource)))
    }

    /// Answers an unsupported request with the type's placeholder, if any.
    fn substitute_placeholder(&self, path: &str, kind: ResourceType) -> LoadResult {
        match self.state().placeholders.get(kind) {
            Some(placeholder) => {
                log::warn!("No loader for {} '{}', using placeholder", kind, path);
                self.metrics.record_substitution();
                Ok(placeholder)
            }
            None => Err(LoadError::Unsupported(kind)),
        }
    }
}

impl RequestHandler for Shared {
    fn dispatch(&self, request: LoadRequest) {
        self.dequeue(&request.path);
        *self.in_flight.lock().unwrap() = Some(request.path.clone());

        let result = match self.load_now(&request.path, request.kind) {
            Err(LoadError::Unsupported(kind)) => self.substitute_placeholder(&request.path, kind),
            other => other,
        };

        *self.in_flight.lock().unwrap() = None;
        self.completed_requests.fetch_add(1, Ordering::SeqCst);

        if request.reply.send(result).is_err() {
            log::trace!("Nobody is waiting for '{}'", request.path);
        }
    }

    fn abandon(&self, request: LoadRequest) {
        self.dequeue(&request.path);
        log::warn!("Abandoning queued load of '{}'", request.path);
    }
}

fn resolve(asset_directory: &Path, path: &str) -> PathBuf {
    let requested = Path::new(path);
    if requested.is_absolute() {
        requested.to_path_buf()
    } else {
        asset_directory.join(requested)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// The central manager for loading, caching and releasing resources.
///
/// A manager owns one background worker that processes asynchronous
/// requests in submission order. It is `Send + Sync`; share it between
/// threads with an `Arc`.
///
/// ```no_run
/// use cairn_agents::ResourceManager;
/// use cairn_core::{ResourceConfig, ResourceType};
///
/// let manager = ResourceManager::new(ResourceConfig::default());
/// manager.initialize("assets").unwrap();
///
/// let handle = manager.request_load_async("textures/wall.png", ResourceType::Texture);
/// let wall = handle.wait().unwrap();
/// assert!(wall.is_loaded());
/// ```
pub struct ResourceManager {
    config: ResourceConfig,
    metrics: MetricsRegistry,
    shared: Arc<Shared>,
    running: Arc<AtomicBool>,
    worker: Mutex<Option<AsyncLoader>>,
}

impl ResourceManager {
    /// Creates a manager with its own metrics registry and starts the worker.
    ///
    /// No loader or placeholder exists until [`initialize`](Self::initialize)
    /// is called.
    pub fn new(config: ResourceConfig) -> Self {
        Self::with_metrics(config, MetricsRegistry::new())
    }

    /// Creates a manager that reports into an existing metrics registry.
    pub fn with_metrics(config: ResourceConfig, metrics: MetricsRegistry) -> Self {
        let loader_metrics = Arc::new(LoaderMetrics::new(&metrics));
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                asset_directory: config.asset_directory.clone(),
                registry: LoaderRegistry::new(loader_metrics.clone()),
                cache: ResourceCache::new(),
                placeholders: PlaceholderSet::new(),
            }),
            queued: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(None),
            total_requests: AtomicUsize::new(0),
            completed_requests: AtomicUsize::new(0),
            metrics: loader_metrics,
        });

        let manager = Self {
            config,
            metrics,
            shared,
            running: Arc::new(AtomicBool::new(false)),
            worker: Mutex::new(None),
        };
        manager.restart_async_loader();
        manager
    }

    /// Sets the asset directory, registers the default loaders (unless
    /// disabled in the config) and builds the placeholders.
    ///
    /// Also restarts the worker if it was stopped, so a manager can be
    /// initialized again after [`shutdown`](Self::shutdown).
    pub fn initialize(&self, asset_directory: impl Into<PathBuf>) -> Result<(), LoadError> {
        let asset_directory = asset_directory.into();
        {
            let mut state = self.shared.state();
            state.asset_directory = asset_directory.clone();

            if self.config.register_default_loaders {
                state
                    .registry
                    .register_defaults(self.config.enable_compressed_audio);
            }

            for kind in ResourceType::ALL {
                if let Some(placeholder) = placeholder_resource(kind) {
                    state.placeholders.insert(Arc::new(placeholder?));
                }
            }
        }

        self.restart_async_loader();
        log::info!(
            "ResourceManager initialized with asset directory: {}",
            asset_directory.display()
        );
        Ok(())
    }

    /// Stops the worker, then unloads and forgets every cached resource and
    /// placeholder.
    ///
    /// Handles still held elsewhere stay valid but their content is dropped.
    pub fn shutdown(&self) {
        self.stop_async_loader();

        let mut state = self.shared.state();
        log::info!(
            "ResourceManager shutting down. Unloading {} resources...",
            state.cache.len()
        );
        state.cache.clear();
        state.placeholders.clear();
    }

    /// Queues `path` for loading on the worker thread.
    ///
    /// The returned handle resolves, in submission order, with the loaded
    /// resource, the cached empty shell if the file is missing or malformed,
    /// the type's placeholder if no loader is registered, or an error.
    pub fn request_load_async(&self, path: &str, kind: ResourceType) -> LoadHandle {
        self.shared.total_requests.fetch_add(1, Ordering::SeqCst);
        let (reply, handle) = LoadHandle::pending(path);

        let sender = self
            .worker
            .lock()
            .unwrap()
            .as_ref()
            .filter(|_| self.running.load(Ordering::SeqCst))
            .map(AsyncLoader::sender);
        let Some(sender) = sender else {
            log::warn!("Resource loader is stopped, abandoning '{}'", path);
            return handle;
        };

        self.shared.enqueue(path);
        let request = LoadRequest {
            path: path.to_string(),
            kind,
            reply,
        };
        if sender.send(request).is_err() {
            self.shared.dequeue(path);
            log::warn!("Resource loader is gone, abandoning '{}'", path);
        } else {
            log::debug!("Queued {} '{}'", kind, path);
        }
        handle
    }

    /// Like [`request_load_async`](Self::request_load_async), but resolves
    /// immediately when `path` is already cached.
    pub fn load(&self, path: &str, kind: ResourceType) -> LoadHandle {
        if let Some(cached) = self.get(path) {
            return LoadHandle::resolved(path, Ok(cached));
        }
        self.request_load_async(path, kind)
    }

    /// Loads `path` on the calling thread, blocking until it is decoded.
    ///
    /// Unlike the async path, an unregistered type is reported as
    /// [`LoadError::Unsupported`] rather than answered with a placeholder.
    pub fn load_sync(&self, path: &str, kind: ResourceType) -> Result<ResourceHandle, LoadError> {
        self.shared.load_now(path, kind)
    }

    /// A handle to the cached resource for `path`.
    pub fn get(&self, path: &str) -> Option<ResourceHandle> {
        self.shared.state().cache.get(path)
    }

    /// Checks if `path` is cached. Never triggers a load.
    pub fn exists(&self, path: &str) -> bool {
        self.shared.state().cache.contains(path)
    }

    /// Unloads `path` and removes it from the cache. Does nothing if it is
    /// not cached.
    pub fn unload(&self, path: &str) {
        if self.shared.state().cache.unload(path) {
            log::debug!("Unloaded '{}'", path);
        }
    }

    /// Unloads and removes every cached resource of `kind`, including ones
    /// still held by consumers.
    pub fn unload_type(&self, kind: ResourceType) -> usize {
        let removed = self.shared.state().cache.unload_type(kind);
        log::debug!("Unloaded {} {} resource(s)", removed, kind);
        removed
    }

    /// Unloads and removes every cached resource no consumer holds.
    pub fn unload_unused(&self) -> usize {
        let removed = self.shared.state().cache.unload_unused();
        log::debug!("Unloaded {} unused resource(s)", removed);
        removed
    }

    /// Reloads a cached resource in place.
    ///
    /// Every existing handle observes the new content because the instance
    /// is kept. Returns `false` if `path` is not cached.
    pub fn hot_reload(&self, path: &str) -> bool {
        let Some(resource) = self.shared.state().cache.resource(path) else {
            return false;
        };

        log::info!("Hot reloading '{}'", path);
        resource.unload();
        // A failed reload leaves the shell empty and is logged by the shell.
        let _ = resource.load();
        true
    }

    /// Bytes held by every cached resource.
    pub fn total_memory_usage(&self) -> usize {
        self.shared.state().cache.total_memory_usage()
    }

    /// Number of cached resources that currently hold content.
    pub fn loaded_resource_count(&self) -> usize {
        self.shared.state().cache.loaded_count()
    }

    /// Fraction of asynchronous requests that have completed, in `[0, 1]`.
    ///
    /// `1.0` when nothing was ever requested.
    pub fn loading_progress(&self) -> f32 {
        let total = self.shared.total_requests.load(Ordering::SeqCst);
        if total == 0 {
            return 1.0;
        }
        let completed = self.shared.completed_requests.load(Ordering::SeqCst);
        (completed as f32 / total as f32).clamp(0.0, 1.0)
    }

    /// Returns `true` while a request for `path` waits in the queue.
    ///
    /// A request the worker has already picked up is not reported here; see
    /// [`in_flight`](Self::in_flight).
    pub fn is_loading(&self, path: &str) -> bool {
        self.shared.queued.lock().unwrap().contains_key(path)
    }

    /// The path the worker is processing right now, if any.
    pub fn in_flight(&self) -> Option<String> {
        self.shared.in_flight.lock().unwrap().clone()
    }

    /// Cached paths of `kind`, sorted.
    pub fn resources_of_type(&self, kind: ResourceType) -> Vec<String> {
        self.shared.state().cache.paths_of_type(kind)
    }

    /// Registers `loader` for `kind`, replacing any existing one.
    pub fn register_loader(&self, kind: ResourceType, loader: Arc<dyn ResourceLoader>) {
        self.shared.state().registry.register(kind, loader);
    }

    /// Lists the loadable files in `directory` without loading them.
    pub fn scan_directory(
        &self,
        directory: impl AsRef<Path>,
        recursive: bool,
    ) -> Result<Vec<(PathBuf, ResourceType)>> {
        let found = scan_directory(directory.as_ref(), recursive)?;
        log::info!(
            "Found {} resource file(s) in '{}'",
            found.len(),
            directory.as_ref().display()
        );
        Ok(found)
    }

    /// A handle to the built-in placeholder for `kind`.
    pub fn placeholder(&self, kind: ResourceType) -> Option<ResourceHandle> {
        self.shared.state().placeholders.get(kind)
    }

    /// The directory relative paths are resolved against.
    pub fn asset_directory(&self) -> PathBuf {
        self.shared.state().asset_directory.clone()
    }

    /// The registry this manager reports its load metrics into.
    pub fn metrics(&self) -> &MetricsRegistry {
        &self.metrics
    }

    /// Stops the worker and waits for it to exit.
    ///
    /// The request being processed completes; every request still queued is
    /// dropped and its handle reports [`LoadError::Abandoned`]. Does nothing
    /// if the worker is already stopped.
    pub fn stop_async_loader(&self) {
        let mut worker = self.worker.lock().unwrap();
        if let Some(worker) = worker.take() {
            log::info!("Stopping resource loader...");
            worker.stop();
        }
    }

    /// Starts a fresh worker if none is running.
    pub fn restart_async_loader(&self) {
        let mut worker = self.worker.lock().unwrap();
        if worker.is_some() {
            return;
        }
        *worker = Some(AsyncLoader::start(
            &self.config.worker_thread_name,
            self.config.queue_capacity,
            self.running.clone(),
            self.shared.clone(),
        ));
    }

    /// Returns `true` while the worker accepts and processes requests.
    pub fn is_async_loader_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// A snapshot of the manager's counters.
    pub fn stats(&self) -> ResourceStats {
        let queued_requests = self.shared.queued.lock().unwrap().values().sum();
        let state = self.shared.state();
        ResourceStats {
            total_resources: state.cache.len(),
            loaded_resources: state.cache.loaded_count(),
            memory_usage: state.cache.total_memory_usage(),
            by_type: state.cache.count_by_type(),
            placeholders: state.placeholders.len(),
            placeholder_memory: state.placeholders.memory_usage(),
            loaders: state.registry.len(),
            total_requests: self.shared.total_requests.load(Ordering::SeqCst),
            completed_requests: self.shared.completed_requests.load(Ordering::SeqCst),
            queued_requests,
        }
    }

    /// Logs [`stats`](Self::stats) and the load metrics at info level.
    pub fn print_stats(&self) {
        for line in self.stats().to_string().lines() {
            log::info!("{}", line);
        }
        for line in self.metrics.summary() {
            log::info!("  {}", line);
        }
    }
}

impl Drop for ResourceManager {
    fn drop(&mut self) {
        self.stop_async_loader();
    }
}
