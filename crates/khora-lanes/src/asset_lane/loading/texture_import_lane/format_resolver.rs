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

//! Determines which decoder should read an image file.

use super::{ImageCodec, TextureImportError};
use image::ImageFormat;
use std::path::Path;

/// A lane that resolves the decodable format of a file.
///
/// The content signature is authoritative. The file extension is only consulted
/// when the content is not recognized.
pub struct FormatResolver<'a> {
    codec: &'a dyn ImageCodec,
}

impl<'a> FormatResolver<'a> {
    /// Creates a resolver that probes files through `codec`.
    pub fn new(codec: &'a dyn ImageCodec) -> Self {
        Self { codec }
    }

    /// Returns the format `path` should be decoded as.
    ///
    /// # Errors
    /// [`TextureImportError::FormatUndetectable`] if neither probe yields a
    /// format the codec can read.
    pub fn resolve(&self, path: &Path) -> Result<ImageFormat, TextureImportError> {
        let format = match self.codec.detect_format(path) {
            Some(format) => Some(format),
            None => {
                log::warn!(
                    "FormatResolver: Failed to determine image format for \"{}\", attempting to detect it from the file's extension...",
                    path.display()
                );
                let guessed = self.codec.format_from_extension(path);
                if guessed.is_some() {
                    log::warn!("FormatResolver: The image format has been detected from the extension.");
                }
                guessed
            }
        };

        match format {
            Some(format) if self.codec.supports_reading(format) => Ok(format),
            Some(format) => {
                log::warn!(
                    "FormatResolver: Format {:?} of \"{}\" cannot be read.",
                    format,
                    path.display()
                );
                Err(TextureImportError::FormatUndetectable(path.to_path_buf()))
            }
            None => {
                log::warn!("FormatResolver: Failed to detect the image format.");
                Err(TextureImportError::FormatUndetectable(path.to_path_buf()))
            }
        }
    }
}
