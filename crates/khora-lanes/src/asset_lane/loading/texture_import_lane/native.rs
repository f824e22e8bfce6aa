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

//! The engine's own texture container (`.ktex`).
//!
//! Layout: the 4-byte magic `KTEX`, a little-endian `u32` format version, then
//! the [`TextureInfo`] payload encoded with bincode's standard configuration.
//! The payload already holds finished RGBA8 levels, so reading it back skips
//! every decoding lane.

use anyhow::{bail, ensure, Context, Result};
use bincode::config;
use khora_core::asset::TextureInfo;
use std::{fs, path::Path};

const MAGIC: &[u8; 4] = b"KTEX";
const VERSION: u32 = 1;
const HEADER_LEN: usize = MAGIC.len() + std::mem::size_of::<u32>();

/// Serializes an imported texture to `path`.
pub fn write_engine_texture(path: &Path, info: &TextureInfo) -> Result<()> {
    let payload = bincode::serde::encode_to_vec(info, config::standard())
        .context("Failed to encode texture payload")?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&VERSION.to_le_bytes());
    bytes.extend_from_slice(&payload);

    fs::write(path, bytes)
        .with_context(|| format!("Failed to write engine texture '{}'", path.display()))
}

/// Reads an engine texture file into `info`.
///
/// Every data field of `info` is replaced; its path and load state are kept.
/// On error `info` is left untouched.
pub fn read_engine_texture(path: &Path, info: &mut TextureInfo) -> Result<()> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read engine texture '{}'", path.display()))?;

    ensure!(
        bytes.len() >= HEADER_LEN && &bytes[..MAGIC.len()] == MAGIC,
        "not an engine texture file (missing KTEX header)"
    );
    let mut version = [0u8; 4];
    version.copy_from_slice(&bytes[MAGIC.len()..HEADER_LEN]);
    let version = u32::from_le_bytes(version);
    if version != VERSION {
        bail!("unsupported engine texture version {version} (expected {VERSION})");
    }

    let (stored, _): (TextureInfo, usize) =
        bincode::serde::decode_from_slice(&bytes[HEADER_LEN..], config::standard())
            .context("Failed to decode texture payload")?;

    let expected = stored.extent().rgba8_len();
    ensure!(
        stored.base_level().len() == expected && expected > 0,
        "base level holds {} byte(s), {}x{} RGBA8 needs {}",
        stored.base_level().len(),
        stored.width,
        stored.height,
        expected
    );

    info.width = stored.width;
    info.height = stored.height;
    info.bits_per_pixel = stored.bits_per_pixel;
    info.source_bits_per_pixel = stored.source_bits_per_pixel;
    info.channel_count = stored.channel_count;
    info.is_transparent = stored.is_transparent;
    info.is_grayscale = stored.is_grayscale;
    info.uses_mipmaps = stored.uses_mipmaps;
    info.mip_levels = stored.mip_levels;
    Ok(())
}
