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

//! A point-in-time summary of the resource manager.

use cairn_core::ResourceType;
use std::collections::BTreeMap;
use std::fmt;

/// Counts and sizes reported by `ResourceManager::stats`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceStats {
    /// Number of cache entries, loaded or not.
    pub total_resources: usize,
    /// Entries whose resource currently holds content.
    pub loaded_resources: usize,
    /// Bytes held by cached resources.
    pub memory_usage: usize,
    /// Cache entries per type.
    pub by_type: BTreeMap<ResourceType, usize>,
    /// Number of built-in placeholders.
    pub placeholders: usize,
    /// Bytes held by the placeholders, outside the cache.
    pub placeholder_memory: usize,
    /// Number of registered loaders.
    pub loaders: usize,
    /// Requests submitted to the async loader.
    pub total_requests: usize,
    /// Requests the async loader has finished.
    pub completed_requests: usize,
    /// Requests waiting in the queue.
    pub queued_requests: usize,
}

impl ResourceStats {
    /// Fraction of submitted requests that completed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.total_requests == 0 {
            return 1.0;
        }
        (self.completed_requests as f32 / self.total_requests as f32).clamp(0.0, 1.0)
    }
}

impl fmt::Display for ResourceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Resource Manager Statistics ===")?;
        writeln!(f, "Total resources: {}", self.total_resources)?;
        writeln!(f, "Loaded resources: {}", self.loaded_resources)?;
        writeln!(
            f,
            "Memory usage: {:.2} MB ({} bytes)",
            self.memory_usage as f64 / (1024.0 * 1024.0),
            self.memory_usage
        )?;
        writeln!(
            f,
            "Placeholders: {} ({} bytes)",
            self.placeholders, self.placeholder_memory
        )?;
        writeln!(f, "Loaders: {}", self.loaders)?;
        writeln!(
            f,
            "Requests: {}/{} completed, {} queued ({:.0}%)",
            self.completed_requests,
            self.total_requests,
            self.queued_requests,
            self.progress() * 100.0
        )?;
        write!(f, "Resources by type:")?;
        if self.by_type.is_empty() {
            write!(f, " none")?;
        }
        for (kind, count) in &self.by_type {
            write!(f, "\n  {}: {}", kind, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_complete_without_requests() {
        assert_eq!(ResourceStats::default().progress(), 1.0);
    }

    #[test]
    fn report_lists_types_in_order() {
        let stats = ResourceStats {
            total_resources: 3,
            loaded_resources: 2,
            memory_usage: 2 * 1024 * 1024,
            by_type: [(ResourceType::Audio, 1), (ResourceType::Texture, 2)]
                .into_iter()
                .collect(),
            placeholders: 3,
            placeholder_memory: 1024,
            total_requests: 4,
            completed_requests: 2,
            ..Default::default()
        };

        let report = stats.to_string();
        assert!(report.contains("Memory usage: 2.00 MB"));
        assert!(report.contains("Placeholders: 3 (1024 bytes)"));
        assert!(report.contains("Requests: 2/4 completed, 0 queued (50%)"));
        let texture = report.find("texture: 2").unwrap();
        let audio = report.find("audio: 1").unwrap();
        assert!(texture < audio);
    }
}
