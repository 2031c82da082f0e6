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

//! Byte-level decoders for every supported resource type.

pub mod audio_loader_lane;
pub mod mesh_loader_lane;
mod texture_loader_lane;

pub use audio_loader_lane::AudioLoaderLane;
pub use mesh_loader_lane::MeshLoaderLane;
pub use texture_loader_lane::*;

use cairn_core::{ResourceData, ResourceType};
use std::error::Error;
use std::path::Path;

/// Boxed, thread-safe error returned by decoders.
pub type DecodeError = Box<dyn Error + Send + Sync>;

/// A type that can decode one kind of resource from the raw bytes of a file.
///
/// This is the CPU-intensive half of loading. Implementors never touch the
/// filesystem for the main file; `source` is only provided so that formats
/// with external references (glTF buffers) can resolve them.
pub trait DecoderLane: Send + Sync + 'static {
    /// The resource type produced by [`decode`](Self::decode).
    fn kind(&self) -> ResourceType;

    /// A short, stable name for logs.
    fn strategy_name(&self) -> &'static str;

    /// Parses `bytes` into resource content.
    fn decode(&self, bytes: &[u8], source: &Path) -> Result<ResourceData, DecodeError>;
}
