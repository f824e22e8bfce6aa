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

//! Decodes an image file into the engine's canonical bitmap layout.

use super::{Bitmap, ImageCodec, TextureImportError};
use image::{imageops::FilterType, ImageFormat};
use khora_core::asset::TextureInfo;
use std::path::Path;

/// The output of [`BitmapNormalizer::normalize`].
#[derive(Debug)]
pub struct NormalizedBitmap {
    /// Flipped, rescaled if requested, 8-bit RGBA.
    pub bitmap: Bitmap,
    /// Bit depth of the decoded file, before conversion.
    pub source_bits_per_pixel: u32,
    /// Whether the decoded file was a standard 8-bit-per-channel raster.
    pub is_standard_raster: bool,
}

/// A lane that decodes a file and brings it to the engine's conventions.
///
/// The steps always run in the same order:
/// 1. decode with the resolved format;
/// 2. flip vertically, so that row 0 is the bottom of the file;
/// 3. rescale, if the record asks for explicit dimensions that differ from the file;
/// 4. convert to 8-bit RGBA unless the pixels already are.
///
/// Every intermediate bitmap is dropped as soon as the next one exists.
pub struct BitmapNormalizer<'a> {
    codec: &'a dyn ImageCodec,
    filter: FilterType,
}

impl<'a> BitmapNormalizer<'a> {
    /// Creates a normalizer decoding through `codec` and rescaling with `filter`.
    pub fn new(codec: &'a dyn ImageCodec, filter: FilterType) -> Self {
        Self { codec, filter }
    }

    /// Runs the normalization steps and writes the resulting size and depth into `info`.
    ///
    /// `info.width` and `info.height` are read as the requested size (0 keeps the
    /// native size) and overwritten with the final size. `info.bits_per_pixel`
    /// is set to 32.
    pub fn normalize(
        &self,
        path: &Path,
        format: ImageFormat,
        info: &mut TextureInfo,
    ) -> Result<NormalizedBitmap, TextureImportError> {
        let mut decoded =
            self.codec
                .decode(path, format)
                .map_err(|e| TextureImportError::DecodeFailed {
                    path: path.to_path_buf(),
                    reason: format!("{e:#}"),
                })?;

        decoded.flip_vertical();

        let source_bits_per_pixel = decoded.bits_per_pixel();
        let is_standard_raster = decoded.is_standard_raster();

        let requested = info.extent();
        let native = decoded.extent();
        // A mismatch on a single side is enough to rescale.
        let scaled = if !requested.is_empty() && requested != native {
            log::debug!(
                "BitmapNormalizer: Rescaling \"{}\" from {} to {}",
                path.display(),
                native,
                requested
            );
            let rescaled = decoded.rescale(requested, self.filter);
            drop(decoded);
            rescaled.map_err(|e| TextureImportError::DecodeFailed {
                path: path.to_path_buf(),
                reason: format!("{e:#}"),
            })?
        } else {
            decoded
        };

        let bitmap = if scaled.is_rgba8() {
            scaled
        } else {
            scaled.to_32bpp()
        };

        info.width = bitmap.width();
        info.height = bitmap.height();
        info.source_bits_per_pixel = source_bits_per_pixel;
        info.bits_per_pixel = 32;

        Ok(NormalizedBitmap {
            bitmap,
            source_bits_per_pixel,
            is_standard_raster,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_lane::{DefaultImageCodec, Scanlines};
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use khora_core::math::Extent2D;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn normalize(path: &Path, info: &mut TextureInfo) -> NormalizedBitmap {
        BitmapNormalizer::new(&DefaultImageCodec, FilterType::Lanczos3)
            .normalize(path, ImageFormat::Png, info)
            .unwrap()
    }

    fn write_png(dir: &TempDir, name: &str, image: impl Into<DynamicImage>) -> PathBuf {
        let path = dir.path().join(name);
        image.into().save(&path).unwrap();
        path
    }

    #[test]
    fn test_rows_are_flipped() {
        let dir = tempdir().unwrap();
        let mut image = RgbaImage::new(1, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        image.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
        let path = write_png(&dir, "column.png", image);

        let mut info = TextureInfo::new(false);
        let normalized = normalize(&path, &mut info);

        assert_eq!(normalized.bitmap.scanline(0), &[0, 0, 255, 255]);
        assert_eq!(normalized.bitmap.scanline(1), &[255, 0, 0, 255]);
    }

    #[test]
    fn test_native_size_is_kept_when_not_requested() {
        let dir = tempdir().unwrap();
        let path = write_png(&dir, "native.png", RgbaImage::new(7, 3));

        let mut info = TextureInfo::new(false);
        normalize(&path, &mut info);

        assert_eq!(info.extent(), Extent2D::new(7, 3));
        assert_eq!(info.bits_per_pixel, 32);
        assert_eq!(info.source_bits_per_pixel, 32);
    }

    #[test]
    fn test_requested_size_rescales() {
        let dir = tempdir().unwrap();
        let path = write_png(
            &dir,
            "big.png",
            RgbImage::from_pixel(16, 8, Rgb([40, 80, 120])),
        );

        let mut info = TextureInfo::with_size(4, 8, false);
        let normalized = normalize(&path, &mut info);

        assert_eq!(info.extent(), Extent2D::new(4, 8));
        assert_eq!(normalized.bitmap.extent(), Extent2D::new(4, 8));
    }

    #[test]
    fn test_one_differing_side_rescales() {
        let dir = tempdir().unwrap();
        let path = write_png(&dir, "square.png", RgbaImage::new(10, 10));

        let mut info = TextureInfo::with_size(4, 10, false);
        let normalized = normalize(&path, &mut info);

        assert_eq!(info.extent(), Extent2D::new(4, 10));
        assert_eq!(normalized.bitmap.extent(), Extent2D::new(4, 10));
    }

    #[test]
    fn test_partial_request_keeps_native_size() {
        let dir = tempdir().unwrap();
        let path = write_png(&dir, "partial.png", RgbaImage::new(5, 5));

        let mut info = TextureInfo::with_size(10, 0, false);
        normalize(&path, &mut info);

        assert_eq!(info.extent(), Extent2D::new(5, 5));
    }

    #[test]
    fn test_gray_source_is_converted_but_depth_is_remembered() {
        let dir = tempdir().unwrap();
        let path = write_png(&dir, "gray.png", GrayImage::from_pixel(2, 2, Luma([90])));

        let mut info = TextureInfo::new(false);
        let normalized = normalize(&path, &mut info);

        assert!(normalized.bitmap.is_rgba8());
        assert_eq!(normalized.source_bits_per_pixel, 8);
        assert!(normalized.is_standard_raster);
        assert_eq!(info.bits_per_pixel, 32);
        assert_eq!(info.source_bits_per_pixel, 8);
        assert_eq!(normalized.bitmap.scanline(0), &[90, 90, 90, 255, 90, 90, 90, 255]);
    }

    #[test]
    fn test_sixteen_bit_source_is_not_standard() {
        let dir = tempdir().unwrap();
        let image: ImageBuffer<Rgba<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(2, 1, Rgba([65535, 0, 0, 65535]));
        let path = write_png(&dir, "deep.png", image);

        let mut info = TextureInfo::new(false);
        let normalized = normalize(&path, &mut info);

        assert_eq!(normalized.source_bits_per_pixel, 64);
        assert!(!normalized.is_standard_raster);
        assert!(normalized.bitmap.is_rgba8());
        assert_eq!(normalized.bitmap.scanline(0), &[255, 0, 0, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn test_undecodable_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fake.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let mut info = TextureInfo::new(false);
        let result = BitmapNormalizer::new(&DefaultImageCodec, FilterType::Lanczos3)
            .normalize(&path, ImageFormat::Png, &mut info);

        assert!(matches!(
            result,
            Err(TextureImportError::DecodeFailed { .. })
        ));
        assert_eq!(info.extent(), Extent2D::new(0, 0));
    }
}
