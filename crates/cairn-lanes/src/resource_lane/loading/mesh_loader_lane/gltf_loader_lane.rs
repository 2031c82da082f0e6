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

//! glTF mesh format loader lane with support for both embedded and external buffers.

use super::DEFAULT_NORMAL;
use crate::resource_lane::loading::{DecodeError, DecoderLane};
use base64::Engine;
use cairn_core::{MeshData, ResourceData, ResourceType};
use gltf::{mesh::Mode, Buffer};
use std::path::Path;

/// Lane for loading glTF 2.0 meshes (`.gltf` JSON or `.glb` binary).
///
/// Every triangle-list primitive of every mesh in the document is merged
/// into a single interleaved buffer. External buffer URIs are resolved
/// relative to the directory of the source file.
#[derive(Debug, Clone, Copy, Default)]
pub struct GltfLoaderLane;

impl DecoderLane for GltfLoaderLane {
    fn kind(&self) -> ResourceType {
        ResourceType::Mesh
    }

    fn strategy_name(&self) -> &'static str {
        "GltfLoader"
    }

    fn decode(&self, bytes: &[u8], source: &Path) -> Result<ResourceData, DecodeError> {
        let gltf = gltf::Gltf::from_slice(bytes)
            .map_err(|e| format!("Failed to parse GLTF file: {}", e))?;

        let base_dir = source.parent().unwrap_or_else(|| Path::new(""));
        let buffer_data = self
            .load_buffer_data(&gltf, base_dir)
            .map_err(|e| format!("Failed to load GLTF buffer data: {}", e))?;

        let mut mesh = MeshData::default();

        for primitive in gltf.document.meshes().flat_map(|m| m.primitives()) {
            if primitive.mode() != Mode::Triangles {
                log::warn!(
                    "Skipping non-triangle primitive ({:?}) in '{}'",
                    primitive.mode(),
                    source.display()
                );
                continue;
            }

            let get_buffer_data =
                |buffer: Buffer<'_>| buffer_data.get(buffer.index()).map(Vec::as_slice);
            let reader = primitive.reader(get_buffer_data);

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or("Vertex positions attribute not found")?
                .collect();
            let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(Iterator::collect);
            let tex_coords: Option<Vec<[f32; 2]>> = reader
                .read_tex_coords(0)
                .map(|iter| iter.into_f32().collect());

            let base = mesh.vertex_count() as u32;
            for (i, position) in positions.iter().enumerate() {
                mesh.vertices.extend_from_slice(position);
                let normal = normals
                    .as_ref()
                    .and_then(|n| n.get(i))
                    .unwrap_or(&DEFAULT_NORMAL);
                mesh.vertices.extend_from_slice(normal);
                let uv = tex_coords
                    .as_ref()
                    .and_then(|t| t.get(i))
                    .copied()
                    .unwrap_or([0.0, 0.0]);
                mesh.vertices.extend_from_slice(&uv);
            }

            match reader.read_indices() {
                Some(indices) => mesh
                    .indices
                    .extend(indices.into_u32().map(|index| base + index)),
                None => mesh
                    .indices
                    .extend((0..positions.len() as u32).map(|index| base + index)),
            }
        }

        if mesh.indices.is_empty() {
            return Err("No triangle primitives found in GLTF file".into());
        }

        Ok(mesh.into())
    }
}

impl GltfLoaderLane {
    fn load_buffer_data(&self, gltf: &gltf::Gltf, base_dir: &Path) -> Result<Vec<Vec<u8>>, DecodeError> {
        let mut buffer_data = Vec::new();
        for buffer in gltf.buffers() {
            match buffer.source() {
                gltf::buffer::Source::Bin => {
                    if let Some(blob) = gltf.blob.as_deref() {
                        buffer_data.push(blob.to_vec());
                    } else {
                        return Err("GLB file references binary chunk but it is missing".into());
                    }
                }
                gltf::buffer::Source::Uri(uri) => {
                    if uri.starts_with("data:") {
                        buffer_data.push(self.decode_data_uri(uri)?);
                    } else {
                        let path = base_dir.join(uri);
                        let bytes = std::fs::read(&path).map_err(|e| {
                            format!("Failed to read external buffer from '{}': {}", path.display(), e)
                        })?;
                        buffer_data.push(bytes);
                    }
                }
            }
        }
        Ok(buffer_data)
    }

    fn decode_data_uri(&self, uri: &str) -> Result<Vec<u8>, DecodeError> {
        let base64_data = uri
            .strip_prefix("data:application/octet-stream;base64,")
            .or_else(|| uri.strip_prefix("data:application/gltf-buffer;base64,"))
            .ok_or_else(|| format!("Unsupported data URI format: {}", uri))?;

        base64::engine::general_purpose::STANDARD
            .decode(base64_data)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a one-triangle glTF document with its buffer inlined as a data URI.
    fn triangle_gltf() -> String {
        let mut buffer = Vec::new();
        for value in [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0] {
            buffer.extend_from_slice(&value.to_le_bytes());
        }
        for index in [0u16, 1, 2] {
            buffer.extend_from_slice(&index.to_le_bytes());
        }
        let encoded = base64::engine::general_purpose::STANDARD.encode(&buffer);

        format!(
            r#"{{
  "asset": {{ "version": "2.0" }},
  "buffers": [ {{ "byteLength": {len}, "uri": "data:application/octet-stream;base64,{encoded}" }} ],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 6 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }}
  ],
  "meshes": [ {{ "primitives": [ {{ "attributes": {{ "POSITION": 0 }}, "indices": 1 }} ] }} ]
}}"#,
            len = buffer.len()
        )
    }

    #[test]
    fn embedded_triangle_is_decoded() {
        let text = triangle_gltf();
        let data = GltfLoaderLane
            .decode(text.as_bytes(), Path::new("tri.gltf"))
            .unwrap();
        let mesh = data.as_mesh().unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        // Position of the second vertex, then the default normal and uv.
        assert_eq!(
            &mesh.vertices[8..16],
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn unsupported_data_uri_is_rejected() {
        assert!(GltfLoaderLane.decode_data_uri("data:text/plain,abc").is_err());
    }

    #[test]
    fn malformed_document_fails() {
        assert!(GltfLoaderLane
            .decode(b"{ not json", Path::new("bad.gltf"))
            .is_err());
    }
}
