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

//! Built-in stand-in content for resources that cannot be loaded.

use cairn_core::{
    AudioClipData, LoadError, MeshData, Resource, ResourceData, ResourceLoader, ResourceType,
    TextureData,
};
use std::path::Path;
use std::sync::Arc;

/// Color of the placeholder texture.
pub const PLACEHOLDER_MAGENTA: [u8; 4] = [255, 0, 255, 255];

/// Sample rate of the placeholder audio clip.
pub const PLACEHOLDER_SAMPLE_RATE: u32 = 44_100;

/// A 2x2 solid magenta RGBA texture.
pub fn placeholder_texture() -> TextureData {
    TextureData::solid(2, 2, PLACEHOLDER_MAGENTA)
}

/// Two opposing unit quads, facing +Z and -Z.
pub fn placeholder_mesh() -> MeshData {
    #[rustfmt::skip]
    let vertices = vec![
        // Front
        -0.5, -0.5,  0.5,  0.0, 0.0,  1.0,  0.0, 0.0,
         0.5, -0.5,  0.5,  0.0, 0.0,  1.0,  1.0, 0.0,
         0.5,  0.5,  0.5,  0.0, 0.0,  1.0,  1.0, 1.0,
        -0.5,  0.5,  0.5,  0.0, 0.0,  1.0,  0.0, 1.0,
        // Back
         0.5, -0.5, -0.5,  0.0, 0.0, -1.0,  0.0, 0.0,
        -0.5, -0.5, -0.5,  0.0, 0.0, -1.0,  1.0, 0.0,
        -0.5,  0.5, -0.5,  0.0, 0.0, -1.0,  1.0, 1.0,
         0.5,  0.5, -0.5,  0.0, 0.0, -1.0,  0.0, 1.0,
    ];

    MeshData {
        vertices,
        indices: vec![0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4],
    }
}

/// One second of mono silence.
pub fn placeholder_audio() -> AudioClipData {
    AudioClipData {
        sample_rate: PLACEHOLDER_SAMPLE_RATE,
        channels: 1,
        samples: vec![0; PLACEHOLDER_SAMPLE_RATE as usize],
    }
}

/// Cache path of the placeholder for `kind`, if that type has one.
pub fn placeholder_path(kind: ResourceType) -> Option<&'static str> {
    match kind {
        ResourceType::Texture => Some("__placeholder_texture__"),
        ResourceType::Mesh => Some("__placeholder_mesh__"),
        ResourceType::Audio => Some("__placeholder_audio__"),
        _ => None,
    }
}

/// A loader that produces built-in content instead of reading a file.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderLoader {
    kind: ResourceType,
}

impl PlaceholderLoader {
    /// Creates the loader for `kind`, or `None` if the type has no placeholder.
    pub fn new(kind: ResourceType) -> Option<Self> {
        placeholder_path(kind).map(|_| Self { kind })
    }
}

impl ResourceLoader for PlaceholderLoader {
    fn kind(&self) -> ResourceType {
        self.kind
    }

    fn load(&self, _path: &Path) -> Result<ResourceData, LoadError> {
        match self.kind {
            ResourceType::Texture => Ok(placeholder_texture().into()),
            ResourceType::Mesh => Ok(placeholder_mesh().into()),
            ResourceType::Audio => Ok(placeholder_audio().into()),
            other => Err(LoadError::Unsupported(other)),
        }
    }

    fn name(&self) -> &'static str {
        "PlaceholderLoader"
    }
}

/// Builds and loads the placeholder resource for `kind`.
///
/// Returns `None` for types without a placeholder.
pub fn placeholder_resource(kind: ResourceType) -> Option<Result<Resource, LoadError>> {
    let loader = PlaceholderLoader::new(kind)?;
    let path = placeholder_path(kind)?;
    let resource = Resource::new(path, path, Arc::new(loader));
    Some(resource.load().map(|()| resource))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_placeholder_is_magenta() {
        let texture = placeholder_texture();
        assert_eq!((texture.width, texture.height, texture.channels), (2, 2, 4));
        assert_eq!(texture.memory_usage(), 16);
        assert!(texture.pixels.chunks(4).all(|px| px == PLACEHOLDER_MAGENTA));
    }

    #[test]
    fn mesh_placeholder_layout() {
        let mesh = placeholder_mesh();
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(mesh.memory_usage(), 304);
    }

    #[test]
    fn audio_placeholder_is_one_second_of_silence() {
        let clip = placeholder_audio();
        assert_eq!(clip.memory_usage(), 88_200);
        assert_eq!(clip.duration().as_secs(), 1);
        assert!(clip.samples.iter().all(|s| *s == 0));
    }

    #[test]
    fn placeholder_resources_are_loaded() {
        for kind in [ResourceType::Texture, ResourceType::Mesh, ResourceType::Audio] {
            let resource = placeholder_resource(kind).unwrap().unwrap();
            assert!(resource.is_loaded());
            assert!(resource.is_placeholder());
            assert_eq!(resource.kind(), kind);
        }
    }

    #[test]
    fn other_types_have_no_placeholder() {
        assert!(placeholder_resource(ResourceType::Shader).is_none());
        assert!(placeholder_resource(ResourceType::Unknown).is_none());
        assert!(PlaceholderLoader::new(ResourceType::AssetPack).is_none());
    }
}
