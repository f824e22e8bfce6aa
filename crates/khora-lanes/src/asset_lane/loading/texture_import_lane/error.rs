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

//! Error types of the texture import lanes.

use khora_core::asset::LoadState;
use std::path::PathBuf;

/// Why a texture import stopped.
///
/// Every variant is terminal for the import that produced it: the record ends
/// in [`LoadState::Failed`], except for [`TextureImportError::AlreadyLoaded`]
/// which leaves a record that was already in use untouched.
#[derive(Debug, thiserror::Error)]
pub enum TextureImportError {
    /// The path was empty or the "unassigned" placeholder.
    #[error("No file path has been provided")]
    PathInvalid,

    /// The path does not name an existing file.
    #[error("File path \"{}\" is invalid", .0.display())]
    PathNotFound(PathBuf),

    /// Neither the file content nor its extension maps to a readable format.
    #[error("Failed to detect the image format of \"{}\"", .0.display())]
    FormatUndetectable(PathBuf),

    /// The decoder rejected the file, or a requested rescale failed.
    #[error("Failed to decode \"{}\": {reason}", path.display())]
    DecodeFailed {
        /// The file being imported.
        path: PathBuf,
        /// The decoder's explanation.
        reason: String,
    },

    /// The normalized bitmap could not be turned into RGBA8 bytes.
    #[error("Failed to extract RGBA pixels: {0}")]
    ExtractionFailed(#[from] ExtractError),

    /// An engine-native texture file could not be read back.
    #[error("Failed to load engine texture \"{}\": {reason}", path.display())]
    DeserializeFailed {
        /// The engine texture file.
        path: PathBuf,
        /// What went wrong while reading it.
        reason: String,
    },

    /// Some mip levels could not be generated and the import requires a complete chain.
    #[error("{failed} of {total} mip level(s) could not be generated")]
    IncompleteMipChain {
        /// Number of levels left empty.
        failed: usize,
        /// Number of generated levels, base excluded.
        total: usize,
    },

    /// The record has already been through an import.
    #[error("Texture record is already {0:?}; create a new one to import again")]
    AlreadyLoaded(LoadState),
}

/// Why RGBA extraction from scanlines failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The per-pixel stride cannot be computed for an image without columns.
    #[error("image has zero width")]
    ZeroWidth,

    /// A pixel occupies fewer bytes than the four RGBA components.
    #[error("pixel stride of {0} byte(s) cannot hold RGBA")]
    PixelStrideTooSmall(usize),

    /// A scanline is shorter than its reported length.
    #[error("scanline {row} holds {actual} byte(s), expected {expected}")]
    ShortScanline {
        /// Index of the offending row.
        row: u32,
        /// Bytes the row should hold.
        expected: usize,
        /// Bytes the row actually holds.
        actual: usize,
    },
}
