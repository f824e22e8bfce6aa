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

//! Flattens decoded scanlines into a tightly packed RGBA8 buffer.

use super::ExtractError;

/// Row-oriented access to raw pixel memory.
pub trait Scanlines {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Length in bytes of one scanline.
    fn scanline_bytes(&self) -> usize;

    /// The bytes of row `row`, at least [`scanline_bytes`](Self::scanline_bytes) long.
    fn scanline(&self, row: u32) -> &[u8];
}

/// Copies every pixel of `source` into a new buffer as R, G, B, A.
///
/// The per-pixel stride is derived as `scanline_bytes / width`, so sources
/// whose pixels carry padding after the four color bytes are handled; the
/// padding is dropped. The first four bytes of each pixel must be R, G, B, A.
pub fn extract_rgba<S>(source: &S) -> Result<Vec<u8>, ExtractError>
where
    S: Scanlines + ?Sized,
{
    let width = source.width() as usize;
    if width == 0 {
        return Err(ExtractError::ZeroWidth);
    }

    let pixel_stride = source.scanline_bytes() / width;
    if pixel_stride < 4 {
        return Err(ExtractError::PixelStrideTooSmall(pixel_stride));
    }

    let height = source.height();
    let row_len = width * pixel_stride;
    let mut rgba = Vec::with_capacity(width * height as usize * 4);

    for row in 0..height {
        let line = source.scanline(row);
        if line.len() < row_len {
            return Err(ExtractError::ShortScanline {
                row,
                expected: row_len,
                actual: line.len(),
            });
        }

        for pixel in line[..row_len].chunks_exact(pixel_stride) {
            rgba.extend_from_slice(&pixel[..4]);
        }
    }

    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Scanlines stored with an explicit per-pixel layout.
    struct RawRows {
        width: u32,
        rows: Vec<Vec<u8>>,
    }

    impl Scanlines for RawRows {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.rows.len() as u32
        }
        fn scanline_bytes(&self) -> usize {
            self.rows.first().map_or(0, Vec::len)
        }
        fn scanline(&self, row: u32) -> &[u8] {
            &self.rows[row as usize]
        }
    }

    #[test]
    fn test_extract_tightly_packed_rows() {
        let source = RawRows {
            width: 2,
            rows: vec![vec![1, 2, 3, 4, 5, 6, 7, 8], vec![9, 10, 11, 12, 13, 14, 15, 16]],
        };

        let rgba = extract_rgba(&source).unwrap();
        assert_eq!(rgba, (1..=16).collect::<Vec<u8>>());
    }

    #[test]
    fn test_extract_skips_pixel_padding() {
        // Six bytes per pixel: RGBA followed by two padding bytes.
        let source = RawRows {
            width: 2,
            rows: vec![vec![
                10, 20, 30, 40, 0xEE, 0xEE, //
                50, 60, 70, 80, 0xEE, 0xEE,
            ]],
        };

        let rgba = extract_rgba(&source).unwrap();
        assert_eq!(rgba, vec![10, 20, 30, 40, 50, 60, 70, 80]);
    }

    #[test]
    fn test_extract_fails_on_zero_width() {
        let source = RawRows {
            width: 0,
            rows: vec![vec![]],
        };
        assert_eq!(extract_rgba(&source), Err(ExtractError::ZeroWidth));
    }

    #[test]
    fn test_extract_fails_on_three_byte_pixels() {
        let source = RawRows {
            width: 2,
            rows: vec![vec![1, 2, 3, 4, 5, 6]],
        };
        assert_eq!(
            extract_rgba(&source),
            Err(ExtractError::PixelStrideTooSmall(3))
        );
    }

    #[test]
    fn test_extract_fails_on_short_row() {
        let source = RawRows {
            width: 1,
            rows: vec![vec![1, 2, 3, 4], vec![5, 6]],
        };
        assert_eq!(
            extract_rgba(&source),
            Err(ExtractError::ShortScanline {
                row: 1,
                expected: 4,
                actual: 2
            })
        );
    }

    #[test]
    fn test_extract_without_rows_has_no_stride() {
        let source = RawRows {
            width: 4,
            rows: vec![],
        };
        assert_eq!(
            extract_rgba(&source),
            Err(ExtractError::PixelStrideTooSmall(0))
        );
    }
}
