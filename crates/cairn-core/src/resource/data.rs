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

//! Decoded, in-memory representations of the supported resource variants.

use super::ResourceType;
use std::time::Duration;

/// A decoded raster image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Channels per pixel. Decoders always produce RGBA8, so this is 4.
    pub channels: u8,
    /// Row-major pixel bytes, `width * height * channels` long.
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Builds an RGBA8 texture filled with a single color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        Self {
            width,
            height,
            channels: 4,
            pixels: rgba.repeat(pixel_count),
        }
    }

    /// Bytes held by the pixel buffer.
    pub fn memory_usage(&self) -> usize {
        self.width as usize * self.height as usize * self.channels as usize
    }
}

/// A triangulated mesh with an interleaved vertex layout.
///
/// Each vertex is [`MeshData::FLOATS_PER_VERTEX`] floats:
/// position (3), normal (3), texture coordinate (2).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    /// Interleaved vertex attributes.
    pub vertices: Vec<f32>,
    /// Triangle list indices into `vertices`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of floats per interleaved vertex.
    pub const FLOATS_PER_VERTEX: usize = 8;

    /// Number of vertices in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / Self::FLOATS_PER_VERTEX
    }

    /// Number of triangles described by the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bytes held by the vertex and index buffers.
    pub fn memory_usage(&self) -> usize {
        self.vertices.len() * std::mem::size_of::<f32>()
            + self.indices.len() * std::mem::size_of::<u32>()
    }
}

/// A decoded audio clip as interleaved 16-bit PCM.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AudioClipData {
    /// Samples per second, per channel.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Interleaved samples, `[L, R, L, R, ...]` for stereo.
    pub samples: Vec<i16>,
}

impl AudioClipData {
    /// Bytes held by the sample buffer.
    pub fn memory_usage(&self) -> usize {
        self.samples.len() * std::mem::size_of::<i16>()
    }

    /// Playback length of the clip.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 || self.channels == 0 {
            return Duration::ZERO;
        }
        let frames = self.samples.len() as f64 / self.channels as f64;
        Duration::from_secs_f64(frames / self.sample_rate as f64)
    }
}

/// The content of a resource.
///
/// `Empty` is what an unloaded shell, or one whose load failed, holds. It
/// remembers the kind so the shell keeps reporting a meaningful type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceData {
    /// No content.
    Empty(ResourceType),
    /// A decoded texture.
    Texture(TextureData),
    /// A decoded mesh.
    Mesh(MeshData),
    /// A decoded audio clip.
    Audio(AudioClipData),
}

impl ResourceData {
    /// The resource type this content belongs to.
    pub fn kind(&self) -> ResourceType {
        match self {
            ResourceData::Empty(kind) => *kind,
            ResourceData::Texture(_) => ResourceType::Texture,
            ResourceData::Mesh(_) => ResourceType::Mesh,
            ResourceData::Audio(_) => ResourceType::Audio,
        }
    }

    /// Returns `true` if there is no content.
    pub fn is_empty(&self) -> bool {
        matches!(self, ResourceData::Empty(_))
    }

    /// Bytes held by the content's buffers.
    pub fn memory_usage(&self) -> usize {
        match self {
            ResourceData::Empty(_) => 0,
            ResourceData::Texture(texture) => texture.memory_usage(),
            ResourceData::Mesh(mesh) => mesh.memory_usage(),
            ResourceData::Audio(audio) => audio.memory_usage(),
        }
    }

    /// The texture content, if this is a texture.
    pub fn as_texture(&self) -> Option<&TextureData> {
        match self {
            ResourceData::Texture(texture) => Some(texture),
            _ => None,
        }
    }

    /// The mesh content, if this is a mesh.
    pub fn as_mesh(&self) -> Option<&MeshData> {
        match self {
            ResourceData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// The audio content, if this is an audio clip.
    pub fn as_audio(&self) -> Option<&AudioClipData> {
        match self {
            ResourceData::Audio(audio) => Some(audio),
            _ => None,
        }
    }
}

impl From<TextureData> for ResourceData {
    fn from(texture: TextureData) -> Self {
        ResourceData::Texture(texture)
    }
}

impl From<MeshData> for ResourceData {
    fn from(mesh: MeshData) -> Self {
        ResourceData::Mesh(mesh)
    }
}

impl From<AudioClipData> for ResourceData {
    fn from(audio: AudioClipData) -> Self {
        ResourceData::Audio(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn texture_memory_is_width_height_channels() {
        let texture = TextureData::solid(64, 64, [0, 0, 0, 255]);
        assert_eq!(texture.pixels.len(), 64 * 64 * 4);
        assert_eq!(texture.memory_usage(), 16384);
    }

    #[test]
    fn mesh_memory_counts_floats_and_indices() {
        let mesh = MeshData {
            vertices: vec![0.0; 3 * MeshData::FLOATS_PER_VERTEX],
            indices: vec![0, 1, 2],
        };
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.memory_usage(), 24 * 4 + 3 * 4);
    }

    #[test]
    fn audio_memory_and_duration() {
        let clip = AudioClipData {
            sample_rate: 22050,
            channels: 2,
            samples: vec![0; 44100],
        };
        assert_eq!(clip.memory_usage(), 88200);
        assert_eq!(clip.duration(), Duration::from_secs(1));
    }

    #[test]
    fn empty_content_keeps_its_kind() {
        let data = ResourceData::Empty(ResourceType::Mesh);
        assert!(data.is_empty());
        assert_eq!(data.kind(), ResourceType::Mesh);
        assert_eq!(data.memory_usage(), 0);
        assert!(data.as_mesh().is_none());
    }
}
