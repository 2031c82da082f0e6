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

//! Implements a loader for `.wav` audio files.

use crate::resource_lane::loading::{DecodeError, DecoderLane};
use anyhow::anyhow;
use cairn_core::{AudioClipData, ResourceData, ResourceType};
use std::{io::Cursor, path::Path};

/// A lane that decodes RIFF/WAVE data into 16-bit interleaved samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavLoaderLane;

impl WavLoaderLane {
    /// Creates a new instance of `WavLoaderLane`.
    pub fn new() -> Self {
        Self
    }
}

impl DecoderLane for WavLoaderLane {
    fn kind(&self) -> ResourceType {
        ResourceType::Audio
    }

    fn strategy_name(&self) -> &'static str {
        "WavLoader"
    }

    fn decode(&self, bytes: &[u8], _source: &Path) -> Result<ResourceData, DecodeError> {
        let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();

        let samples: Result<Vec<i16>, _> = match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Int, 16) => reader.samples::<i16>().collect(),
            (hound::SampleFormat::Int, bits) => reader
                .samples::<i32>()
                .map(|sample| sample.map(|s| rescale_to_i16(s, bits)))
                .collect(),
            (hound::SampleFormat::Float, _) => reader
                .samples::<f32>()
                .map(|sample| sample.map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
                .collect(),
        };

        let samples = samples.map_err(|e| anyhow!("Failed to parse WAV samples: {}", e))?;

        Ok(AudioClipData {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            samples,
        }
        .into())
    }
}

fn rescale_to_i16(sample: i32, bits: u16) -> i16 {
    if bits > 16 {
        (sample >> (bits - 16)) as i16
    } else {
        (sample << (16 - bits)) as i16
    }
}
