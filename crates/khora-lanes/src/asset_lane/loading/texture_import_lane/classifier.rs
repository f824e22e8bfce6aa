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

//! Pixel-level properties of an imported texture.

use super::NormalizedBitmap;
use khora_core::asset::TextureInfo;

/// Maps a source bit depth to the number of meaningful channels.
///
/// Only standard 8-bit-per-channel rasters are recognized: 8 bpp is a single
/// gray channel, 24 bpp is RGB, 32 bpp is RGBA. Anything else yields 0.
pub fn channel_count(bits_per_pixel: u32, is_standard_raster: bool) -> u32 {
    if !is_standard_raster {
        return 0;
    }
    match bits_per_pixel {
        8 => 1,
        24 => 3,
        32 => 4,
        _ => 0,
    }
}

/// Returns `true` if every pixel of an RGBA8 buffer has R = G = B.
///
/// Alpha is not considered. An image without pixels is grayscale.
pub fn is_grayscale(rgba: &[u8], width: u32, height: u32) -> bool {
    let pixel_count = width as usize * height as usize;
    rgba.chunks_exact(4)
        .take(pixel_count)
        .all(|pixel| pixel[0] == pixel[1] && pixel[1] == pixel[2])
}

/// Annotates a texture record with the properties of its pixels.
#[derive(Debug, Default, Clone, Copy)]
pub struct PixelClassifier;

impl PixelClassifier {
    /// Fills `channel_count`, `is_transparent` and `is_grayscale`.
    ///
    /// Transparency is read from the normalized bitmap; grayscale is read from
    /// `base_level`, the extracted RGBA8 buffer.
    pub fn classify(&self, normalized: &NormalizedBitmap, base_level: &[u8], info: &mut TextureInfo) {
        info.channel_count = channel_count(
            normalized.source_bits_per_pixel,
            normalized.is_standard_raster,
        );
        if info.channel_count == 0 {
            log::info!(
                "PixelClassifier: \"{}\" has no standard channel layout ({} bpp, standard raster: {}).",
                info.path.display(),
                normalized.source_bits_per_pixel,
                normalized.is_standard_raster
            );
        }

        info.is_transparent = normalized.bitmap.is_transparent();
        info.is_grayscale = is_grayscale(base_level, info.width, info.height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_count_by_depth() {
        assert_eq!(channel_count(8, true), 1);
        assert_eq!(channel_count(24, true), 3);
        assert_eq!(channel_count(32, true), 4);
        assert_eq!(channel_count(16, true), 0);
        assert_eq!(channel_count(1, true), 0);
        assert_eq!(channel_count(64, true), 0);
    }

    #[test]
    fn test_channel_count_requires_standard_raster() {
        assert_eq!(channel_count(32, false), 0);
        assert_eq!(channel_count(8, false), 0);
    }

    #[test]
    fn test_grayscale_ignores_alpha() {
        let rgba = [10, 10, 10, 255, 200, 200, 200, 0, 0, 0, 0, 17];
        assert!(is_grayscale(&rgba, 3, 1));
    }

    #[test]
    fn test_single_colored_pixel_breaks_grayscale() {
        let mut rgba = vec![128u8; 4 * 4 * 4];
        assert!(is_grayscale(&rgba, 4, 4));

        // One pixel with R != B.
        rgba[5 * 4] = 129;
        assert!(!is_grayscale(&rgba, 4, 4));
    }

    #[test]
    fn test_grayscale_is_vacuous_for_empty_images() {
        assert!(is_grayscale(&[], 0, 0));
        assert!(is_grayscale(&[], 0, 12));
    }
}
