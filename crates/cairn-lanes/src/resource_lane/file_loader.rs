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

use crate::resource_lane::loading::DecoderLane;
use cairn_core::{LoadError, ResourceData, ResourceLoader, ResourceType};
use std::path::Path;

/// Adapts a byte-level [`DecoderLane`] into a file-level [`ResourceLoader`].
///
/// This is the I/O half of loading: it reads the whole file, maps filesystem
/// failures onto [`LoadError`], and hands the bytes to the decoder.
pub struct FileLoaderLane<D> {
    decoder: D,
}

impl<D: DecoderLane> FileLoaderLane<D> {
    /// Wraps a decoder.
    pub fn new(decoder: D) -> Self {
        Self { decoder }
    }
}

impl<D: DecoderLane> ResourceLoader for FileLoaderLane<D> {
    fn kind(&self) -> ResourceType {
        self.decoder.kind()
    }

    fn load(&self, path: &Path) -> Result<ResourceData, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        self.decoder
            .decode(&bytes, path)
            .map_err(|e| LoadError::decode(path, e))
    }

    fn name(&self) -> &'static str {
        self.decoder.strategy_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_lane::loading::TextureLoaderLane;

    #[test]
    fn missing_file_is_not_found() {
        let loader = FileLoaderLane::new(TextureLoaderLane);
        let err = loader.load(Path::new("/no/such/dir/wall.png")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound(_)));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let loader = FileLoaderLane::new(TextureLoaderLane);
        let err = loader.load(&path).unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
        assert_eq!(loader.kind(), ResourceType::Texture);
        assert_eq!(loader.name(), "TextureLoader");
    }
}
