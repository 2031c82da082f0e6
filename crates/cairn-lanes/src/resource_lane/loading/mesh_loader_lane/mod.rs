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

//! Defines lanes for loading mesh resources.

mod gltf_loader_lane;
mod obj_loader_lane;

pub use gltf_loader_lane::*;
pub use obj_loader_lane::*;

use super::{DecodeError, DecoderLane};
use cairn_core::{ResourceData, ResourceType};
use std::path::Path;

/// Default normal for vertices without one.
pub(crate) const DEFAULT_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// Mesh decoder that picks the format by sniffing the content.
///
/// Binary glTF (`glTF` magic) and JSON glTF (leading `{`) go to
/// [`GltfLoaderLane`]; everything else is parsed as Wavefront OBJ.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshLoaderLane {
    obj: ObjLoaderLane,
    gltf: GltfLoaderLane,
}

impl MeshLoaderLane {
    /// Creates a new mesh lane.
    pub fn new() -> Self {
        Self::default()
    }

    fn is_gltf(bytes: &[u8]) -> bool {
        bytes.starts_with(b"glTF")
            || bytes
                .iter()
                .find(|b| !b.is_ascii_whitespace())
                .is_some_and(|b| *b == b'{')
    }
}

impl DecoderLane for MeshLoaderLane {
    fn kind(&self) -> ResourceType {
        ResourceType::Mesh
    }

    fn strategy_name(&self) -> &'static str {
        "MeshLoader"
    }

    fn decode(&self, bytes: &[u8], source: &Path) -> Result<ResourceData, DecodeError> {
        if Self::is_gltf(bytes) {
            self.gltf.decode(bytes, source)
        } else {
            self.obj.decode(bytes, source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gltf_content_is_detected() {
        assert!(MeshLoaderLane::is_gltf(b"glTF\x02\x00\x00\x00"));
        assert!(MeshLoaderLane::is_gltf(b"  \n{\"asset\":{}}"));
        assert!(!MeshLoaderLane::is_gltf(b"v 0 0 0\n"));
        assert!(!MeshLoaderLane::is_gltf(b""));
    }
}
