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

//! Registry for managing metrics.

use super::{HistogramSnapshot, MetricId, MetricType, MetricsError, MetricsResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
enum MetricValue {
    Counter(u64),
    Histogram(HistogramSnapshot),
}

impl MetricValue {
    fn metric_type(&self) -> MetricType {
        match self {
            MetricValue::Counter(_) => MetricType::Counter,
            MetricValue::Histogram(_) => MetricType::Histogram,
        }
    }
}

#[derive(Debug)]
struct MetricEntry {
    description: String,
    unit: String,
    value: MetricValue,
}

type Store = Arc<Mutex<HashMap<MetricId, MetricEntry>>>;

/// Central, in-memory registry for metrics.
///
/// Registration hands out cheap, cloneable handles that update the shared
/// store. Registering an id twice with the same type returns a handle to the
/// existing metric, so independent components can share a counter by name.
#[derive(Debug, Clone, Default)]
pub struct MetricsRegistry {
    store: Store,
}

impl MetricsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or retrieves) a counter.
    pub fn register_counter(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> MetricsResult<CounterHandle> {
        let id = MetricId::new(namespace, name);
        self.register(&id, description.into(), String::new(), || {
            MetricValue::Counter(0)
        })?;
        Ok(CounterHandle {
            id,
            store: self.store.clone(),
        })
    }

    /// Registers (or retrieves) a histogram with the given bucket bounds.
    pub fn register_histogram(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
        mut buckets: Vec<f64>,
    ) -> MetricsResult<HistogramHandle> {
        let id = MetricId::new(namespace, name);
        buckets.sort_by(|a, b| a.total_cmp(b));
        self.register(&id, description.into(), unit.into(), move || {
            let counts = vec![0; buckets.len() + 1];
            MetricValue::Histogram(HistogramSnapshot {
                buckets,
                counts,
                count: 0,
                sum: 0.0,
            })
        })?;
        Ok(HistogramHandle {
            id,
            store: self.store.clone(),
        })
    }

    fn register(
        &self,
        id: &MetricId,
        description: String,
        unit: String,
        init: impl FnOnce() -> MetricValue,
    ) -> MetricsResult<()> {
        let mut store = self.store.lock().unwrap();
        let value = init();
        if let Some(existing) = store.get(id) {
            let found = existing.value.metric_type();
            let expected = value.metric_type();
            return if found == expected {
                Ok(())
            } else {
                Err(MetricsError::TypeMismatch { expected, found })
            };
        }
        store.insert(
            id.clone(),
            MetricEntry {
                description,
                unit,
                value,
            },
        );
        Ok(())
    }

    /// Number of registered metrics.
    pub fn metric_count(&self) -> usize {
        self.store.lock().unwrap().len()
    }

    /// Renders every metric as `id = value` lines, sorted by id.
    pub fn summary(&self) -> Vec<String> {
        let store = self.store.lock().unwrap();
        let mut ids: Vec<_> = store.keys().cloned().collect();
        ids.sort();
        ids.iter()
            .map(|id| {
                let entry = &store[id];
                match &entry.value {
                    MetricValue::Counter(value) => {
                        format!("{id} = {value} ({})", entry.description)
                    }
                    MetricValue::Histogram(histogram) => format!(
                        "{id} = {} samples, mean {:.2}{} ({})",
                        histogram.count,
                        histogram.mean().unwrap_or(0.0),
                        entry.unit,
                        entry.description
                    ),
                }
            })
            .collect()
    }
}

/// Handle for counter operations.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    id: MetricId,
    store: Store,
}

impl CounterHandle {
    /// Increments the counter by 1 and returns the new value.
    pub fn increment(&self) -> MetricsResult<u64> {
        self.increment_by(1)
    }

    /// Increments the counter by `amount` and returns the new value.
    pub fn increment_by(&self, amount: u64) -> MetricsResult<u64> {
        let mut store = self.store.lock().unwrap();
        match store.get_mut(&self.id).map(|entry| &mut entry.value) {
            Some(MetricValue::Counter(value)) => {
                *value += amount;
                Ok(*value)
            }
            Some(other) => Err(MetricsError::TypeMismatch {
                expected: MetricType::Counter,
                found: other.metric_type(),
            }),
            None => Err(MetricsError::NotFound(self.id.clone())),
        }
    }

    /// Current counter value.
    pub fn get(&self) -> MetricsResult<u64> {
        self.increment_by(0)
    }

    /// The metric id.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

/// Handle for histogram operations.
#[derive(Debug, Clone)]
pub struct HistogramHandle {
    id: MetricId,
    store: Store,
}

impl HistogramHandle {
    /// Records a sample.
    pub fn observe(&self, sample: f64) -> MetricsResult<()> {
        let mut store = self.store.lock().unwrap();
        match store.get_mut(&self.id).map(|entry| &mut entry.value) {
            Some(MetricValue::Histogram(histogram)) => {
                let bucket = histogram
                    .buckets
                    .iter()
                    .position(|bound| sample <= *bound)
                    .unwrap_or(histogram.buckets.len());
                histogram.counts[bucket] += 1;
                histogram.count += 1;
                histogram.sum += sample;
                Ok(())
            }
            Some(other) => Err(MetricsError::TypeMismatch {
                expected: MetricType::Histogram,
                found: other.metric_type(),
            }),
            None => Err(MetricsError::NotFound(self.id.clone())),
        }
    }

    /// Copies the current histogram state.
    pub fn snapshot(&self) -> MetricsResult<HistogramSnapshot> {
        let store = self.store.lock().unwrap();
        match store.get(&self.id).map(|entry| &entry.value) {
            Some(MetricValue::Histogram(histogram)) => Ok(histogram.clone()),
            Some(other) => Err(MetricsError::TypeMismatch {
                expected: MetricType::Histogram,
                found: other.metric_type(),
            }),
            None => Err(MetricsError::NotFound(self.id.clone())),
        }
    }

    /// The metric id.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = MetricsRegistry::new();
        assert_eq!(registry.metric_count(), 0);
    }

    #[test]
    fn test_counter_registration_and_operations() {
        let registry = MetricsRegistry::new();
        let counter = registry
            .register_counter("assets", "loaded_total", "Assets loaded")
            .unwrap();

        assert_eq!(counter.increment().unwrap(), 1);
        assert_eq!(counter.increment_by(4).unwrap(), 5);
        assert_eq!(counter.get().unwrap(), 5);
        assert_eq!(counter.id().to_string(), "assets/loaded_total");
    }

    #[test]
    fn test_reregistration_shares_the_metric() {
        let registry = MetricsRegistry::new();
        let a = registry.register_counter("assets", "x", "").unwrap();
        let b = registry.register_counter("assets", "x", "").unwrap();
        a.increment().unwrap();
        assert_eq!(b.get().unwrap(), 1);
        assert_eq!(registry.metric_count(), 1);
    }

    #[test]
    fn test_reregistration_with_other_type_fails() {
        let registry = MetricsRegistry::new();
        registry.register_counter("assets", "x", "").unwrap();
        let err = registry
            .register_histogram("assets", "x", "", "ms", vec![1.0])
            .unwrap_err();
        assert_eq!(
            err,
            MetricsError::TypeMismatch {
                expected: MetricType::Histogram,
                found: MetricType::Counter,
            }
        );
    }

    #[test]
    fn test_histogram_buckets() {
        let registry = MetricsRegistry::new();
        let histogram = registry
            .register_histogram("assets", "load_time", "", "ms", vec![5.0, 1.0])
            .unwrap();

        histogram.observe(0.5).unwrap();
        histogram.observe(3.0).unwrap();
        histogram.observe(100.0).unwrap();

        let snapshot = histogram.snapshot().unwrap();
        assert_eq!(snapshot.buckets, vec![1.0, 5.0]);
        assert_eq!(snapshot.counts, vec![1, 1, 1]);
        assert_eq!(snapshot.count, 3);
        assert_eq!(snapshot.mean(), Some(103.5 / 3.0));
    }

    #[test]
    fn test_summary_lists_every_metric() {
        let registry = MetricsRegistry::new();
        registry.register_counter("b", "count", "second").unwrap();
        registry
            .register_histogram("a", "time", "first", "ms", vec![])
            .unwrap();

        let lines = registry.summary();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("a/time = 0 samples"));
        assert_eq!(lines[1], "b/count = 0 (second)");
    }
}
