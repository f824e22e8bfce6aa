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

//! Defines the abstraction over the image decoding library, and the bitmap type it produces.

use super::Scanlines;
use anyhow::{ensure, Context, Result};
use image::{imageops::FilterType, ColorType, DynamicImage, ImageFormat, ImageReader};
use khora_core::math::Extent2D;
use std::{fs::File, io::BufReader, path::Path};

/// The decoding side of an image library: format probing and decoding.
///
/// Bitmap transformations live on [`Bitmap`] itself; this trait only covers
/// the operations that touch the file.
pub trait ImageCodec: Send + Sync {
    /// Identifies the format from the file's content signature.
    fn detect_format(&self, path: &Path) -> Option<ImageFormat>;

    /// Identifies the format from the file name alone.
    fn format_from_extension(&self, path: &Path) -> Option<ImageFormat>;

    /// Returns `true` if files of `format` can be decoded.
    fn supports_reading(&self, format: ImageFormat) -> bool;

    /// Decodes the file as `format`.
    fn decode(&self, path: &Path, format: ImageFormat) -> Result<Bitmap>;
}

/// The default [`ImageCodec`], backed by the `image` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultImageCodec;

impl ImageCodec for DefaultImageCodec {
    fn detect_format(&self, path: &Path) -> Option<ImageFormat> {
        // `ImageReader::open` would pre-fill the format from the extension.
        let file = File::open(path).ok()?;
        ImageReader::new(BufReader::new(file))
            .with_guessed_format()
            .ok()?
            .format()
    }

    fn format_from_extension(&self, path: &Path) -> Option<ImageFormat> {
        ImageFormat::from_path(path).ok()
    }

    fn supports_reading(&self, format: ImageFormat) -> bool {
        format.reading_enabled()
    }

    fn decode(&self, path: &Path, format: ImageFormat) -> Result<Bitmap> {
        let mut reader = ImageReader::open(path)
            .with_context(|| format!("Failed to open '{}'", path.display()))?;
        reader.set_format(format);
        let image = reader
            .decode()
            .with_context(|| format!("Failed to decode '{}' as {:?}", path.display(), format))?;
        Ok(Bitmap::new(image))
    }
}

/// A decoded image owned by the import pipeline.
///
/// Every transformation returns a new `Bitmap` and leaves its input untouched,
/// so a single bitmap can be shared read-only across parallel jobs. Pixel
/// memory is released when the value is dropped.
#[derive(Debug, Clone)]
pub struct Bitmap {
    image: DynamicImage,
}

impl Bitmap {
    /// Takes ownership of a decoded image.
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    /// The underlying image.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Width and height in pixels.
    pub fn extent(&self) -> Extent2D {
        Extent2D::new(self.width(), self.height())
    }

    /// Bits used by one pixel, all channels included.
    pub fn bits_per_pixel(&self) -> u32 {
        u32::from(self.image.color().bits_per_pixel())
    }

    /// Returns `true` for plain 8-bit-per-channel rasters.
    ///
    /// 16-bit and floating point images are valid bitmaps but not standard rasters.
    pub fn is_standard_raster(&self) -> bool {
        matches!(
            self.image.color(),
            ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8
        )
    }

    /// Returns `true` if the pixels are laid out as 8-bit RGBA.
    pub fn is_rgba8(&self) -> bool {
        self.image.color() == ColorType::Rgba8
    }

    /// Returns `true` if the bitmap carries alpha and at least one pixel is not opaque.
    pub fn is_transparent(&self) -> bool {
        if !self.image.color().has_alpha() {
            return false;
        }
        match self.image.as_rgba8() {
            Some(rgba) => rgba.pixels().any(|pixel| pixel[3] < u8::MAX),
            None => self
                .image
                .to_rgba8()
                .pixels()
                .any(|pixel| pixel[3] < u8::MAX),
        }
    }

    /// Mirrors the rows, so that row 0 becomes the last row of the file.
    pub fn flip_vertical(&mut self) {
        self.image = self.image.flipv();
    }

    /// Resamples to exactly `extent`, ignoring the aspect ratio.
    pub fn rescale(&self, extent: Extent2D, filter: FilterType) -> Result<Bitmap> {
        ensure!(!extent.is_empty(), "cannot rescale to an empty extent ({extent})");
        Ok(Bitmap::new(self.image.resize_exact(
            extent.width,
            extent.height,
            filter,
        )))
    }

    /// Converts to 8-bit RGBA, 32 bits per pixel.
    pub fn to_32bpp(&self) -> Bitmap {
        Bitmap::new(DynamicImage::ImageRgba8(self.image.to_rgba8()))
    }
}

impl Scanlines for Bitmap {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn scanline_bytes(&self) -> usize {
        self.image.width() as usize * usize::from(self.image.color().bytes_per_pixel())
    }

    fn scanline(&self, row: u32) -> &[u8] {
        let stride = self.scanline_bytes();
        let start = row as usize * stride;
        &self.image.as_bytes()[start..start + stride]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::tempdir;

    fn column(top: [u8; 4], bottom: [u8; 4]) -> Bitmap {
        let mut image = RgbaImage::new(1, 2);
        image.put_pixel(0, 0, Rgba(top));
        image.put_pixel(0, 1, Rgba(bottom));
        Bitmap::new(DynamicImage::ImageRgba8(image))
    }

    #[test]
    fn test_detect_format_reads_content_not_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("actually_a_png.jpg");
        RgbImage::from_pixel(2, 2, Rgb([1, 2, 3]))
            .save_with_format(&path, ImageFormat::Png)
            .unwrap();

        let codec = DefaultImageCodec;
        assert_eq!(codec.detect_format(&path), Some(ImageFormat::Png));
        assert_eq!(codec.format_from_extension(&path), Some(ImageFormat::Jpeg));
        assert!(codec.supports_reading(ImageFormat::Png));
    }

    #[test]
    fn test_detect_format_unknown_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello, not an image").unwrap();

        let codec = DefaultImageCodec;
        assert_eq!(codec.detect_format(&path), None);
        assert_eq!(codec.format_from_extension(&path), None);
        assert_eq!(codec.detect_format(&dir.path().join("missing.png")), None);
    }

    #[test]
    fn test_detect_format_ignores_a_known_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"this is definitely not an image").unwrap();

        let codec = DefaultImageCodec;
        assert_eq!(codec.detect_format(&path), None);
        assert_eq!(codec.format_from_extension(&path), Some(ImageFormat::Png));
    }

    #[test]
    fn test_decode_reports_depth_and_raster_kind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.png");
        GrayImage::from_pixel(3, 2, Luma([7])).save(&path).unwrap();

        let bitmap = DefaultImageCodec.decode(&path, ImageFormat::Png).unwrap();
        assert_eq!(bitmap.extent(), Extent2D::new(3, 2));
        assert_eq!(bitmap.bits_per_pixel(), 8);
        assert!(bitmap.is_standard_raster());
        assert!(!bitmap.is_rgba8());

        let converted = bitmap.to_32bpp();
        assert_eq!(converted.bits_per_pixel(), 32);
        assert!(converted.is_rgba8());
        assert_eq!(converted.scanline(1), &[7, 7, 7, 255, 7, 7, 7, 255, 7, 7, 7, 255]);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not a real chunk").unwrap();

        assert!(DefaultImageCodec.decode(&path, ImageFormat::Png).is_err());
    }

    #[test]
    fn test_flip_vertical_swaps_rows() {
        let mut bitmap = column([255, 0, 0, 255], [0, 0, 255, 255]);
        bitmap.flip_vertical();

        assert_eq!(bitmap.scanline(0), &[0, 0, 255, 255]);
        assert_eq!(bitmap.scanline(1), &[255, 0, 0, 255]);
    }

    #[test]
    fn test_rescale_leaves_source_untouched() {
        let bitmap = Bitmap::new(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            8,
            4,
            Rgba([10, 20, 30, 255]),
        )));

        let scaled = bitmap.rescale(Extent2D::new(3, 1), FilterType::Lanczos3).unwrap();
        assert_eq!(scaled.extent(), Extent2D::new(3, 1));
        assert_eq!(bitmap.extent(), Extent2D::new(8, 4));
        assert!(bitmap.rescale(Extent2D::new(0, 1), FilterType::Lanczos3).is_err());
    }

    #[test]
    fn test_transparency_requires_a_translucent_pixel() {
        assert!(!column([1, 2, 3, 255], [4, 5, 6, 255]).is_transparent());
        assert!(column([1, 2, 3, 255], [4, 5, 6, 128]).is_transparent());

        let opaque_rgb = Bitmap::new(DynamicImage::ImageRgb8(RgbImage::new(2, 2)));
        assert!(!opaque_rgb.is_transparent());
        assert!(!opaque_rgb.to_32bpp().is_transparent());
    }
}
