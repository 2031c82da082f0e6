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

//! Defines lanes for loading audio clips.

mod symphonia_loader_lane;
mod wav_loader_lane;

pub use symphonia_loader_lane::*;
pub use wav_loader_lane::*;

use super::{DecodeError, DecoderLane};
use cairn_core::{ResourceData, ResourceType};
use std::path::Path;

/// Audio decoder that routes by content.
///
/// RIFF/WAVE data is decoded with [`WavLoaderLane`]. Any other container goes
/// to [`SymphoniaLoaderLane`] when compressed formats are enabled, and is
/// rejected otherwise.
#[derive(Debug, Clone, Copy)]
pub struct AudioLoaderLane {
    wav: WavLoaderLane,
    compressed: Option<SymphoniaLoaderLane>,
}

impl AudioLoaderLane {
    /// Creates an audio lane, optionally able to decode compressed formats.
    pub fn new(enable_compressed: bool) -> Self {
        Self {
            wav: WavLoaderLane,
            compressed: enable_compressed.then_some(SymphoniaLoaderLane),
        }
    }

    fn is_wav(bytes: &[u8]) -> bool {
        bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
    }
}

impl Default for AudioLoaderLane {
    fn default() -> Self {
        Self::new(true)
    }
}

impl DecoderLane for AudioLoaderLane {
    fn kind(&self) -> ResourceType {
        ResourceType::Audio
    }

    fn strategy_name(&self) -> &'static str {
        "AudioLoader"
    }

    fn decode(&self, bytes: &[u8], source: &Path) -> Result<ResourceData, DecodeError> {
        if Self::is_wav(bytes) {
            return self.wav.decode(bytes, source);
        }
        match &self.compressed {
            Some(lane) => lane.decode(bytes, source),
            None => Err("Not a RIFF/WAVE file and compressed audio is disabled".into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_wav_is_rejected_when_compressed_disabled() {
        let lane = AudioLoaderLane::new(false);
        let err = lane
            .decode(b"OggS\0\0\0\0\0\0\0\0", Path::new("clip.ogg"))
            .unwrap_err();
        assert!(err.to_string().contains("compressed audio is disabled"));
    }

    #[test]
    fn wav_header_is_sniffed() {
        assert!(AudioLoaderLane::is_wav(b"RIFF\x24\0\0\0WAVEfmt "));
        assert!(!AudioLoaderLane::is_wav(b"RIFF"));
        assert!(!AudioLoaderLane::is_wav(b"ID3\x03\0\0\0\0\0\0\0\0"));
    }
}
