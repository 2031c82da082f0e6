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

use std::fmt;
use std::path::Path;

/// Classification of asset files, inferred from their extension.
///
/// Only `Texture`, `Mesh` and `Audio` have loaders out of the box. `Shader`
/// and `AssetPack` are recognized so that directory scans can report them,
/// but loading them fails explicitly unless a loader is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    /// Raster images converted to RGBA8.
    Texture,
    /// Triangulated meshes.
    Mesh,
    /// PCM audio clips.
    Audio,
    /// Shader sources.
    Shader,
    /// Packed asset bundles.
    AssetPack,
    /// Anything the extension table does not know about.
    Unknown,
}

impl ResourceType {
    /// Every variant, in declaration order.
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Texture,
        ResourceType::Mesh,
        ResourceType::Audio,
        ResourceType::Shader,
        ResourceType::AssetPack,
        ResourceType::Unknown,
    ];

    /// Classifies a file extension (without the leading dot, any case).
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "png" | "jpg" | "jpeg" | "bmp" | "tga" => ResourceType::Texture,
            "obj" | "fbx" | "gltf" | "glb" => ResourceType::Mesh,
            "wav" | "ogg" | "mp3" => ResourceType::Audio,
            "glsl" | "vert" | "frag" => ResourceType::Shader,
            "asset" | "pack" => ResourceType::AssetPack,
            _ => ResourceType::Unknown,
        }
    }

    /// Classifies a path by its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(ResourceType::Unknown)
    }

    /// A stable, lower-case name used in logs and metric labels.
    pub fn name(self) -> &'static str {
        match self {
            ResourceType::Texture => "texture",
            ResourceType::Mesh => "mesh",
            ResourceType::Audio => "audio",
            ResourceType::Shader => "shader",
            ResourceType::AssetPack => "asset_pack",
            ResourceType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
