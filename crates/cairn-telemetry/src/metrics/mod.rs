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

//! Metric identifiers, values and the registry that owns them.

pub mod registry;

use std::fmt;
use thiserror::Error;

/// Identifies a metric by namespace and name, e.g. `assets/load_time`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricId {
    /// Subsystem the metric belongs to.
    pub namespace: String,
    /// Metric name within the namespace.
    pub name: String,
}

impl MetricId {
    /// Creates a new identifier.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// The kind of a registered metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    /// Monotonically increasing count.
    Counter,
    /// Distribution of observed values.
    Histogram,
}

/// Errors returned by metric operations.
#[derive(Debug, Error, PartialEq)]
pub enum MetricsError {
    /// No metric with this id is registered.
    #[error("metric '{0}' is not registered")]
    NotFound(MetricId),
    /// The metric exists with a different type.
    #[error("metric type mismatch: expected {expected:?}, found {found:?}")]
    TypeMismatch {
        /// The type the operation needed.
        expected: MetricType,
        /// The type actually registered.
        found: MetricType,
    },
}

/// Result alias for metric operations.
pub type MetricsResult<T> = Result<T, MetricsError>;

/// A point-in-time copy of a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    /// Upper bounds of the buckets, ascending.
    pub buckets: Vec<f64>,
    /// Sample counts per bucket; the last entry counts samples above every bound.
    pub counts: Vec<u64>,
    /// Number of samples observed.
    pub count: u64,
    /// Sum of all samples.
    pub sum: f64,
}

impl HistogramSnapshot {
    /// Mean of the observed samples, or `None` if there are none.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}
