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

//! Implements a universal loader for compressed audio formats using `symphonia`.

use crate::resource_lane::loading::{DecodeError, DecoderLane};
use anyhow::anyhow;
use cairn_core::{AudioClipData, ResourceData, ResourceType};
use std::{io::Cursor, path::Path};
use symphonia::core::{
    audio::SampleBuffer, codecs::DecoderOptions, formats::FormatOptions, io::MediaSourceStream,
    meta::MetadataOptions, probe::Hint,
};

/// A lane that uses `symphonia` to decode Ogg/Vorbis, MP3 and other containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaLoaderLane;

impl SymphoniaLoaderLane {
    /// Creates a new instance of `SymphoniaLoaderLane`.
    pub fn new() -> Self {
        Self
    }
}

impl DecoderLane for SymphoniaLoaderLane {
    fn kind(&self) -> ResourceType {
        ResourceType::Audio
    }

    fn strategy_name(&self) -> &'static str {
        "SymphoniaLoader"
    }

    fn decode(&self, bytes: &[u8], source: &Path) -> Result<ResourceData, DecodeError> {
        let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = source.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }
        let probed = symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;
        let mut format_reader = probed.format;

        let track = format_reader
            .default_track()
            .ok_or_else(|| anyhow!("No default audio track found"))?;

        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| anyhow!("Unknown sample rate"))?;
        let channels = track
            .codec_params
            .channels
            .ok_or_else(|| anyhow!("Unknown channel count"))?;

        let mut decoder =
            symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

        let mut all_samples = Vec::<i16>::new();

        loop {
            match format_reader.next_packet() {
                Ok(packet) => {
                    if packet.track_id() != track_id {
                        continue;
                    }

                    match decoder.decode(&packet) {
                        Ok(decoded) => {
                            // Planar output is interleaved into LRLR... order.
                            let mut sample_buf =
                                SampleBuffer::<i16>::new(decoded.capacity() as u64, *decoded.spec());
                            sample_buf.copy_interleaved_ref(decoded);
                            all_samples.extend_from_slice(sample_buf.samples());
                        }
                        Err(e) => {
                            log::warn!("Skipping undecodable packet in '{}': {}", source.display(), e);
                        }
                    }
                }
                // End of stream
                Err(symphonia::core::errors::Error::IoError(_)) => break,
                Err(e) => return Err(Box::new(e)),
            }
        }

        Ok(AudioClipData {
            sample_rate,
            channels: channels.count() as u16,
            samples: all_samples,
        }
        .into())
    }
}
