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

//! Parallel generation of the mip chain below the base level.

use super::{extract_rgba, Bitmap};
use anyhow::{Context, Result};
use image::imageops::FilterType;
use khora_core::{
    asset::TextureInfo,
    math::{mip_chain_extents, Extent2D},
    task::{ScopedTask, TaskScheduler},
};

/// A mip level that could not be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MipLevelFailure {
    /// Index in [`TextureInfo::mip_levels`] (the base level is 0).
    pub level: usize,
    /// The size the level should have had.
    pub extent: Extent2D,
    /// Why the level is missing.
    pub reason: String,
}

/// What [`MipChainGenerator::generate`] produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MipChainReport {
    /// Number of levels appended after the base, failed ones included.
    pub generated: usize,
    /// Levels left empty.
    pub failures: Vec<MipLevelFailure>,
}

impl MipChainReport {
    /// Returns `true` if every level was generated.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A lane that builds every mip level of a texture from its base bitmap.
///
/// One scoped job per level is handed to the scheduler. Jobs read the same
/// source bitmap and each writes only its own slot, then the scheduler's join
/// returns once all of them are done.
pub struct MipChainGenerator<'a> {
    scheduler: &'a dyn TaskScheduler,
    filter: FilterType,
}

impl<'a> MipChainGenerator<'a> {
    /// Creates a generator that fans out on `scheduler` and resamples with `filter`.
    pub fn new(scheduler: &'a dyn TaskScheduler, filter: FilterType) -> Self {
        Self { scheduler, filter }
    }

    /// Appends every level below the base to `info.mip_levels`, largest first.
    ///
    /// `source` must be the normalized base bitmap. Failed levels are logged and
    /// stored as empty buffers so that indices keep matching the extents law.
    pub fn generate(&self, source: &Bitmap, info: &mut TextureInfo) -> MipChainReport {
        let extents: Vec<Extent2D> = mip_chain_extents(source.extent())
            .into_iter()
            .skip(1)
            .collect();
        if extents.is_empty() {
            return MipChainReport::default();
        }

        let filter = self.filter;
        let mut slots: Vec<Option<Result<Vec<u8>>>> = extents.iter().map(|_| None).collect();
        let jobs: Vec<ScopedTask<'_>> = slots
            .iter_mut()
            .zip(extents.iter().copied())
            .map(|(slot, extent)| {
                Box::new(move || *slot = Some(build_level(source, extent, filter))) as ScopedTask<'_>
            })
            .collect();
        self.scheduler.execute_all(jobs);

        let mut report = MipChainReport {
            generated: extents.len(),
            failures: Vec::new(),
        };
        info.mip_levels.reserve(extents.len());

        for (index, (slot, extent)) in slots.into_iter().zip(extents).enumerate() {
            let level = index + 1;
            match slot {
                Some(Ok(pixels)) => info.mip_levels.push(pixels),
                Some(Err(e)) => {
                    let reason = format!("{e:#}");
                    log::info!(
                        "MipChainGenerator: Failed to generate mip level {} ({}) of \"{}\": {}",
                        level,
                        extent,
                        info.path.display(),
                        reason
                    );
                    report.failures.push(MipLevelFailure {
                        level,
                        extent,
                        reason,
                    });
                    info.mip_levels.push(Vec::new());
                }
                None => {
                    log::info!(
                        "MipChainGenerator: Mip level {} ({}) of \"{}\" was never run.",
                        level,
                        extent,
                        info.path.display()
                    );
                    report.failures.push(MipLevelFailure {
                        level,
                        extent,
                        reason: "the job did not run".to_owned(),
                    });
                    info.mip_levels.push(Vec::new());
                }
            }
        }

        report
    }
}

fn build_level(source: &Bitmap, extent: Extent2D, filter: FilterType) -> Result<Vec<u8>> {
    let scaled = source
        .rescale(extent, filter)
        .with_context(|| format!("Failed to resample to {extent}"))?;
    let scaled = if scaled.is_rgba8() {
        scaled
    } else {
        scaled.to_32bpp()
    };
    extract_rgba(&scaled).with_context(|| format!("Failed to extract the {extent} level"))
}
