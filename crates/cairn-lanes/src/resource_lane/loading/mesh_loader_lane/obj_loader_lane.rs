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

//! Defines a lane for loading OBJ meshes.

use super::DEFAULT_NORMAL;
use crate::resource_lane::loading::{DecodeError, DecoderLane};
use ahash::AHashMap;
use anyhow::Context;
use cairn_core::{MeshData, ResourceData, ResourceType};
use std::path::Path;

/// Lane for loading Wavefront OBJ meshes.
///
/// Faces are triangulated and every model in the file is merged into one
/// interleaved buffer. Missing normals default to +Y, missing texture
/// coordinates to the origin. Material libraries are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjLoaderLane;

impl DecoderLane for ObjLoaderLane {
    fn kind(&self) -> ResourceType {
        ResourceType::Mesh
    }

    fn strategy_name(&self) -> &'static str {
        "ObjLoader"
    }

    fn decode(&self, bytes: &[u8], _source: &Path) -> Result<ResourceData, DecodeError> {
        let obj_text = std::str::from_utf8(bytes).context("OBJ file is not valid UTF-8")?;

        let (models, _materials) = tobj::load_obj_buf(
            &mut std::io::Cursor::new(obj_text),
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
            |_| Ok((Vec::new(), AHashMap::new())),
        )
        .context("Failed to parse OBJ file")?;

        let mut mesh = MeshData::default();

        for model in &models {
            let source = &model.mesh;
            let vertex_count = source.positions.len() / 3;
            let base = mesh.vertex_count() as u32;

            mesh.vertices.reserve(vertex_count * MeshData::FLOATS_PER_VERTEX);
            for v in 0..vertex_count {
                mesh.vertices.extend_from_slice(&source.positions[v * 3..v * 3 + 3]);
                match source.normals.get(v * 3..v * 3 + 3) {
                    Some(normal) => mesh.vertices.extend_from_slice(normal),
                    None => mesh.vertices.extend_from_slice(&DEFAULT_NORMAL),
                }
                match source.texcoords.get(v * 2..v * 2 + 2) {
                    Some(uv) => mesh.vertices.extend_from_slice(uv),
                    None => mesh.vertices.extend_from_slice(&[0.0, 0.0]),
                }
            }

            mesh.indices.extend(source.indices.iter().map(|index| base + index));
        }

        if mesh.indices.is_empty() {
            return Err("No faces found in OBJ file".into());
        }

        Ok(mesh.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
o quad
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 1.0 1.0 0.0
v 0.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
f 1/1/1 2/2/1 3/3/1 4/4/1
";

    #[test]
    fn quad_is_triangulated_and_interleaved() {
        let data = ObjLoaderLane.decode(QUAD.as_bytes(), Path::new("quad.obj")).unwrap();
        let mesh = data.as_mesh().unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        // Second vertex: position, normal, uv.
        assert_eq!(
            &mesh.vertices[8..16],
            &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0]
        );
        assert_eq!(mesh.memory_usage(), 4 * 8 * 4 + 6 * 4);
    }

    #[test]
    fn missing_attributes_get_defaults() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let data = ObjLoaderLane.decode(text.as_bytes(), Path::new("tri.obj")).unwrap();
        let mesh = data.as_mesh().unwrap();

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(&mesh.vertices[3..8], &[0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn models_are_merged_with_offset_indices() {
        let text = "\
o a
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o b
v 0 0 1
v 1 0 1
v 0 1 1
f 4 5 6
";
        let data = ObjLoaderLane.decode(text.as_bytes(), Path::new("two.obj")).unwrap();
        let mesh = data.as_mesh().unwrap();

        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn file_without_faces_fails() {
        assert!(ObjLoaderLane
            .decode(b"# nothing here\n", Path::new("empty.obj"))
            .is_err());
    }
}
