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

//! The texture record produced by the import pipeline.

use super::Asset;
use crate::math::{mip_chain_extents, Extent2D};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// The progress of a texture import.
///
/// This is the only progress signal a caller can observe. It moves forward only:
/// `NotStarted -> Loading -> Completed | Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    /// The record has not been handed to an importer yet.
    #[default]
    NotStarted,
    /// An importer is working on the record.
    Loading,
    /// The import succeeded; the pixel data is ready.
    Completed,
    /// The import failed; the pixel data must not be used.
    Failed,
}

impl LoadState {
    /// Returns `true` for `Completed` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, LoadState::Completed | LoadState::Failed)
    }

    /// Returns `true` if moving from `self` to `next` respects the forward-only order.
    pub fn can_transition_to(self, next: LoadState) -> bool {
        matches!(
            (self, next),
            (LoadState::NotStarted, LoadState::Loading)
                | (LoadState::Loading, LoadState::Completed)
                | (LoadState::Loading, LoadState::Failed)
        )
    }
}

/// A texture record shared between a caller and a background import.
pub type SharedTextureInfo = Arc<RwLock<TextureInfo>>;

/// The engine-ready description of an imported texture.
///
/// The caller creates the record (optionally with target dimensions and the
/// mipmap flag) and keeps ownership of it; the importer only fills it in.
///
/// Pixel data is stored as RGBA8, one buffer per mip level. Index 0 of
/// [`mip_levels`](Self::mip_levels) is always the full-size base level; when
/// mipmaps are requested the following entries halve down to 1x1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextureInfo {
    /// The source file of this texture. Set once, never rewritten.
    #[serde(skip)]
    pub path: PathBuf,
    /// Requested width on input (0 = native); actual width after import.
    pub width: u32,
    /// Requested height on input (0 = native); actual height after import.
    pub height: u32,
    /// Bits per pixel of the stored data. Always 32 once imported.
    pub bits_per_pixel: u32,
    /// Bits per pixel of the decoded file, before normalization.
    pub source_bits_per_pixel: u32,
    /// Meaningful channels in the source (1, 3 or 4), or 0 when unsupported.
    pub channel_count: u32,
    /// Whether any pixel is not fully opaque.
    pub is_transparent: bool,
    /// Whether every pixel has equal red, green and blue components.
    pub is_grayscale: bool,
    /// Whether the importer should generate a full mip chain.
    pub uses_mipmaps: bool,
    /// RGBA8 buffers, base level first.
    pub mip_levels: Vec<Vec<u8>>,
    #[serde(skip)]
    load_state: LoadState,
}

impl Asset for TextureInfo {}

impl TextureInfo {
    /// Creates an import request at the file's native size.
    pub fn new(uses_mipmaps: bool) -> Self {
        Self {
            uses_mipmaps,
            ..Default::default()
        }
    }

    /// Creates an import request that rescales the texture to `width` x `height`.
    pub fn with_size(width: u32, height: u32, uses_mipmaps: bool) -> Self {
        Self {
            width,
            height,
            uses_mipmaps,
            ..Default::default()
        }
    }

    /// Returns a fresh, not-started record carrying only the caller's request
    /// (path, requested size and mipmap flag).
    pub fn request(&self) -> Self {
        Self {
            path: self.path.clone(),
            width: self.width,
            height: self.height,
            uses_mipmaps: self.uses_mipmaps,
            ..Default::default()
        }
    }

    /// The current progress of the import.
    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Advances the load state.
    ///
    /// Returns `false` and leaves the record untouched if `next` does not follow
    /// the current state.
    pub fn set_load_state(&mut self, next: LoadState) -> bool {
        if !self.load_state.can_transition_to(next) {
            log::warn!(
                "TextureInfo: Invalid load state transition {:?} -> {:?} for \"{}\"",
                self.load_state,
                next,
                self.path.display()
            );
            return false;
        }
        self.load_state = next;
        true
    }

    /// The size of the base level.
    pub fn extent(&self) -> Extent2D {
        Extent2D::new(self.width, self.height)
    }

    /// The full-size RGBA8 buffer, or an empty slice before import.
    pub fn base_level(&self) -> &[u8] {
        self.mip_levels.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of stored levels, base included.
    pub fn mip_level_count(&self) -> usize {
        self.mip_levels.len()
    }

    /// The expected extent of every level this record should hold.
    pub fn level_extents(&self) -> Vec<Extent2D> {
        if self.uses_mipmaps {
            mip_chain_extents(self.extent())
        } else {
            vec![self.extent()]
        }
    }

    /// Returns `true` if every stored level has the byte length its extent requires.
    ///
    /// A level whose generation failed is empty and makes the chain incomplete.
    pub fn has_complete_levels(&self) -> bool {
        let extents = self.level_extents();
        extents.len() == self.mip_levels.len()
            && extents
                .iter()
                .zip(&self.mip_levels)
                .all(|(extent, level)| level.len() == extent.rgba8_len())
    }
}
