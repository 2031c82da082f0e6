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

//! Texture decoding.

use super::{DecodeError, DecoderLane};
use anyhow::Context;
use cairn_core::{ResourceData, ResourceType, TextureData};
use std::path::Path;

/// A lane dedicated to decoding raster images into RGBA8 textures.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureLoaderLane;

impl DecoderLane for TextureLoaderLane {
    fn kind(&self) -> ResourceType {
        ResourceType::Texture
    }

    fn strategy_name(&self) -> &'static str {
        "TextureLoader"
    }

    fn decode(&self, bytes: &[u8], _source: &Path) -> Result<ResourceData, DecodeError> {
        let img = image::load_from_memory(bytes).context("Failed to decode image from memory")?;
        let original_channels = img.color().channel_count();

        // Always hand out RGBA8 so consumers can upload without conversion.
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::trace!(
            "Decoded {}x{} image ({} original channels)",
            width,
            height,
            original_channels
        );

        Ok(TextureData {
            width,
            height,
            channels: 4,
            pixels: rgba_img.into_raw(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    #[test]
    fn rgb_png_is_expanded_to_rgba() {
        let img = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let data = TextureLoaderLane.decode(&bytes, Path::new("x.png")).unwrap();
        let texture = data.as_texture().unwrap();
        assert_eq!((texture.width, texture.height, texture.channels), (3, 2, 4));
        assert_eq!(&texture.pixels[..4], &[10, 20, 30, 255]);
        assert_eq!(texture.memory_usage(), 24);
    }

    #[test]
    fn invalid_bytes_fail() {
        assert!(TextureLoaderLane
            .decode(&[0, 1, 2, 3], Path::new("x.png"))
            .is_err());
    }
}
