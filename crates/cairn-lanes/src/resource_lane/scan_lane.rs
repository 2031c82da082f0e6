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

//! Discovery of loadable files in an asset directory.

use anyhow::{bail, Result};
use cairn_core::ResourceType;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walks `dir` and classifies every file by extension.
///
/// Only the top level is visited unless `recursive` is set. Files with an
/// unknown extension are left out, as are entries that cannot be read (those
/// are logged). The result is sorted by path. Nothing is loaded.
pub fn scan_directory(dir: &Path, recursive: bool) -> Result<Vec<(PathBuf, ResourceType)>> {
    if !dir.is_dir() {
        bail!("'{}' is not a directory", dir.display());
    }

    let mut walker = WalkDir::new(dir).min_depth(1).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry under '{}': {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let kind = ResourceType::from_path(entry.path());
        if kind != ResourceType::Unknown {
            found.push((entry.into_path(), kind));
        }
    }

    log::debug!("Scanned '{}': {} resource file(s)", dir.display(), found.len());
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("wall.png"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();
        fs::create_dir(dir.path().join("sfx")).unwrap();
        fs::write(dir.path().join("sfx").join("step.WAV"), b"").unwrap();
        fs::write(dir.path().join("sfx").join("lit.frag"), b"").unwrap();
        dir
    }

    #[test]
    fn flat_scan_stays_at_top_level() {
        let dir = fixture();
        let found = scan_directory(dir.path(), false).unwrap();
        assert_eq!(found, vec![(dir.path().join("wall.png"), ResourceType::Texture)]);
    }

    #[test]
    fn recursive_scan_descends_and_skips_unknown() {
        let dir = fixture();
        let found = scan_directory(dir.path(), true).unwrap();
        let kinds: Vec<_> = found.iter().map(|(_, kind)| *kind).collect();

        assert_eq!(found.len(), 3);
        assert!(kinds.contains(&ResourceType::Audio));
        assert!(kinds.contains(&ResourceType::Shader));
        assert!(!found.iter().any(|(p, _)| p.ends_with("notes.txt")));
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(scan_directory(Path::new("/definitely/not/here"), true).is_err());
    }
}
