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

//! A registry mapping each resource type to the loader that produces it.

use cairn_core::{LoadError, ResourceData, ResourceLoader, ResourceType};
use cairn_lanes::resource_lane::{
    loading::{AudioLoaderLane, MeshLoaderLane, TextureLoaderLane},
    FileLoaderLane,
};
use cairn_telemetry::{
    metrics::registry::{CounterHandle, HistogramHandle},
    MetricsRegistry, ScopedMetricTimer,
};
use std::{collections::HashMap, path::Path, sync::Arc};

/// A collection of metric handles shared by every registered loader.
pub(crate) struct LoaderMetrics {
    /// Histogram for tracking decode times in milliseconds.
    load_time_ms: HistogramHandle,
    /// Counter for successful decodes.
    loaded_total: CounterHandle,
    /// Counter for failed decodes, including loader panics.
    failed_total: CounterHandle,
    /// Counter for requests answered with a placeholder.
    placeholder_substitutions: CounterHandle,
}

impl LoaderMetrics {
    pub(crate) fn new(registry: &MetricsRegistry) -> Self {
        Self {
            load_time_ms: registry
                .register_histogram(
                    "assets",
                    "load_time",
                    "Resource decoding time",
                    "ms",
                    vec![1.0, 5.0, 16.0, 33.0, 100.0, 500.0],
                )
                .expect("Failed to register resource load time metric"),
            loaded_total: registry
                .register_counter(
                    "assets",
                    "loaded_total",
                    "Total number of resources loaded from disk",
                )
                .expect("Failed to register resource count metric"),
            failed_total: registry
                .register_counter(
                    "assets",
                    "failed_total",
                    "Total number of resource loads that failed",
                )
                .expect("Failed to register failed load metric"),
            placeholder_substitutions: registry
                .register_counter(
                    "assets",
                    "placeholder_substitutions",
                    "Requests answered with a placeholder resource",
                )
                .expect("Failed to register placeholder metric"),
        }
    }

    pub(crate) fn record_failure(&self) {
        bump(&self.failed_total);
    }

    pub(crate) fn record_substitution(&self) {
        bump(&self.placeholder_substitutions);
    }
}

fn bump(counter: &CounterHandle) {
    if let Err(e) = counter.increment() {
        log::warn!("Failed to update metric {}: {:?}", counter.id(), e);
    }
}

/// Wraps a registered loader so that every call is timed and counted.
///
/// It also pins the resource type to the one the loader was registered
/// under, so content of another type is rejected by the shell.
struct MeteredLoader {
    kind: ResourceType,
    inner: Arc<dyn ResourceLoader>,
    metrics: Arc<LoaderMetrics>,
}

impl ResourceLoader for MeteredLoader {
    fn kind(&self) -> ResourceType {
        self.kind
    }

    fn load(&self, path: &Path) -> Result<ResourceData, LoadError> {
        let _timer = ScopedMetricTimer::new(&self.metrics.load_time_ms);

        let result = self.inner.load(path);
        match &result {
            Ok(_) => bump(&self.metrics.loaded_total),
            Err(_) => bump(&self.metrics.failed_total),
        }
        result
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// The registry that resolves a [`ResourceType`] to its loader.
pub(crate) struct LoaderRegistry {
    metrics: Arc<LoaderMetrics>,
    loaders: HashMap<ResourceType, Arc<dyn ResourceLoader>>,
}

impl LoaderRegistry {
    pub(crate) fn new(metrics: Arc<LoaderMetrics>) -> Self {
        Self {
            metrics,
            loaders: HashMap::new(),
        }
    }

    /// Registers `loader` for `kind`, replacing any previous loader.
    pub(crate) fn register(&mut self, kind: ResourceType, loader: Arc<dyn ResourceLoader>) {
        if loader.kind() != kind {
            log::warn!(
                "Loader '{}' produces {} but is registered for {}",
                loader.name(),
                loader.kind(),
                kind
            );
        }
        let name = loader.name();
        let wrapped = MeteredLoader {
            kind,
            inner: loader,
            metrics: self.metrics.clone(),
        };
        if self.loaders.insert(kind, Arc::new(wrapped)).is_some() {
            log::debug!("Replaced {} loader with '{}'", kind, name);
        } else {
            log::debug!("Registered '{}' for {}", name, kind);
        }
    }

    /// Registers the file-backed texture, mesh and audio loaders.
    pub(crate) fn register_defaults(&mut self, enable_compressed_audio: bool) {
        self.register(
            ResourceType::Texture,
            Arc::new(FileLoaderLane::new(TextureLoaderLane)),
        );
        self.register(
            ResourceType::Mesh,
            Arc::new(FileLoaderLane::new(MeshLoaderLane::new())),
        );
        self.register(
            ResourceType::Audio,
            Arc::new(FileLoaderLane::new(AudioLoaderLane::new(
                enable_compressed_audio,
            ))),
        );
    }

    /// The loader registered for `kind`.
    pub(crate) fn get(&self, kind: ResourceType) -> Result<Arc<dyn ResourceLoader>, LoadError> {
        self.loaders
            .get(&kind)
            .cloned()
            .ok_or(LoadError::Unsupported(kind))
    }

    pub(crate) fn len(&self) -> usize {
        self.loaders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairn_core::TextureData;

    struct Fixed(Option<ResourceData>);

    impl ResourceLoader for Fixed {
        fn kind(&self) -> ResourceType {
            ResourceType::Texture
        }

        fn load(&self, path: &Path) -> Result<ResourceData, LoadError> {
            self.0
                .clone()
                .ok_or_else(|| LoadError::NotFound(path.to_path_buf()))
        }
    }

    fn counter(registry: &MetricsRegistry, name: &str) -> u64 {
        registry
            .register_counter("assets", name, "")
            .unwrap()
            .get()
            .unwrap()
    }

    #[test]
    fn unknown_type_is_unsupported() {
        let registry = LoaderRegistry::new(Arc::new(LoaderMetrics::new(&MetricsRegistry::new())));
        assert!(matches!(
            registry.get(ResourceType::Shader),
            Err(LoadError::Unsupported(ResourceType::Shader))
        ));
    }

    #[test]
    fn loads_are_counted_and_timed() {
        let metrics = MetricsRegistry::new();
        let mut registry = LoaderRegistry::new(Arc::new(LoaderMetrics::new(&metrics)));
        registry.register(
            ResourceType::Texture,
            Arc::new(Fixed(Some(TextureData::solid(1, 1, [0; 4]).into()))),
        );
        let loader = registry.get(ResourceType::Texture).unwrap();
        loader.load(Path::new("a.png")).unwrap();
        loader.load(Path::new("b.png")).unwrap();

        registry.register(ResourceType::Texture, Arc::new(Fixed(None)));
        assert_eq!(registry.len(), 1);
        let loader = registry.get(ResourceType::Texture).unwrap();
        assert!(loader.load(Path::new("c.png")).is_err());

        assert_eq!(counter(&metrics, "loaded_total"), 2);
        assert_eq!(counter(&metrics, "failed_total"), 1);
        let histogram = metrics
            .register_histogram("assets", "load_time", "", "ms", vec![])
            .unwrap();
        assert_eq!(histogram.snapshot().unwrap().count, 3);
    }

    #[test]
    fn registered_kind_wins_over_loader_kind() {
        let mut registry = LoaderRegistry::new(Arc::new(LoaderMetrics::new(&MetricsRegistry::new())));
        registry.register(ResourceType::Mesh, Arc::new(Fixed(None)));
        assert_eq!(
            registry.get(ResourceType::Mesh).unwrap().kind(),
            ResourceType::Mesh
        );
    }

    #[test]
    fn defaults_cover_the_file_backed_types() {
        let mut registry = LoaderRegistry::new(Arc::new(LoaderMetrics::new(&MetricsRegistry::new())));
        registry.register_defaults(false);

        assert_eq!(registry.len(), 3);
        assert_eq!(
            registry.get(ResourceType::Texture).unwrap().name(),
            "TextureLoader"
        );
        assert_eq!(registry.get(ResourceType::Audio).unwrap().name(), "AudioLoader");
        assert!(registry.get(ResourceType::AssetPack).is_err());
    }
}
