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

//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use cairn_agents::{LoadHandle, ResourceManager};
use cairn_core::{LoadError, ResourceConfig, ResourceHandle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound for any blocking wait in the tests.
pub const TIMEOUT: Duration = Duration::from_secs(10);

/// A manager rooted at `dir`, initialized with the default loaders.
pub fn manager(dir: &Path) -> ResourceManager {
    manager_with(ResourceConfig::default(), dir)
}

/// A manager built from `config`, initialized at `dir`.
pub fn manager_with(config: ResourceConfig, dir: &Path) -> ResourceManager {
    cairn_telemetry::logging::init_for_tests();
    let manager = ResourceManager::new(config.with_asset_directory(dir));
    manager.initialize(dir).expect("initialize");
    manager
}

/// Waits for `handle`, failing the test if it does not resolve in time.
pub fn resolve(handle: &LoadHandle) -> Result<ResourceHandle, LoadError> {
    handle
        .wait_timeout(TIMEOUT)
        .unwrap_or_else(|| panic!("'{}' did not resolve in time", handle.path()))
}

/// Writes a `width` x `height` RGBA PNG filled with `rgba`.
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32, rgba: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    image::RgbaImage::from_pixel(width, height, image::Rgba(rgba))
        .save(&path)
        .unwrap();
    path
}

/// Writes a 16-bit mono WAV holding `samples`.
pub fn write_wav(dir: &Path, name: &str, samples: &[i16]) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 22_050,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for sample in samples {
        writer.write_sample(*sample).unwrap();
    }
    writer.finalize().unwrap();
    path
}

/// Writes a unit quad as a Wavefront OBJ.
pub fn write_obj(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(
        &path,
        "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\n",
    )
    .unwrap();
    path
}
