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

//! The texture importer: validation, lane orchestration and background loading.

use super::{MipFailurePolicy, TextureImportConfig};
use anyhow::{ensure, Result};
use khora_core::{
    asset::{LoadState, SharedTextureInfo, TextureInfo},
    task::TaskScheduler,
    vfs,
};
use khora_lanes::asset_lane::{
    extract_rgba, read_engine_texture, write_engine_texture, BitmapNormalizer, DefaultImageCodec,
    FormatResolver, ImageCodec, MipChainGenerator, PixelClassifier, TextureImportError,
};
use std::{
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
    sync::{Arc, PoisonError},
    time::Instant,
};

/// Imports image files into [`TextureInfo`] records.
///
/// The importer is cheap to clone; clones share the codec, the scheduler and
/// the configuration. The decoder is considered initialized for as long as any
/// clone is alive.
#[derive(Clone)]
pub struct TextureImporter {
    inner: Arc<ImporterInner>,
}

struct ImporterInner {
    codec: Arc<dyn ImageCodec>,
    scheduler: Arc<dyn TaskScheduler>,
    config: TextureImportConfig,
}

impl Drop for ImporterInner {
    fn drop(&mut self) {
        log::debug!("TextureImporter: Decoder released.");
    }
}

impl TextureImporter {
    /// Creates an importer with the default codec and configuration.
    pub fn new(scheduler: Arc<dyn TaskScheduler>) -> Self {
        Self::with_config(scheduler, TextureImportConfig::default())
    }

    /// Creates an importer with the default codec.
    pub fn with_config(scheduler: Arc<dyn TaskScheduler>, config: TextureImportConfig) -> Self {
        Self::with_codec(Arc::new(DefaultImageCodec), scheduler, config)
    }

    /// Creates an importer decoding through `codec`.
    pub fn with_codec(
        codec: Arc<dyn ImageCodec>,
        scheduler: Arc<dyn TaskScheduler>,
        config: TextureImportConfig,
    ) -> Self {
        log::info!(
            "TextureImporter: Decoder initialized ({} worker thread(s)).",
            scheduler.worker_count()
        );
        Self {
            inner: Arc::new(ImporterInner {
                codec,
                scheduler,
                config,
            }),
        }
    }

    /// The configuration this importer was built with.
    pub fn config(&self) -> &TextureImportConfig {
        &self.inner.config
    }

    /// Imports `path` into `info`, blocking until the import is finished.
    ///
    /// `info` must not have been through an import yet. Its requested size and
    /// mipmap flag are honored; everything else is overwritten. On return the
    /// record is `Completed` or `Failed`, except for
    /// [`TextureImportError::AlreadyLoaded`] which leaves it untouched.
    ///
    /// Mip levels are generated on the scheduler; the call returns once all of
    /// them are written.
    pub fn load(
        &self,
        path: impl AsRef<Path>,
        info: &mut TextureInfo,
    ) -> Result<(), TextureImportError> {
        let path = path.as_ref();
        let state = info.load_state();
        if state != LoadState::NotStarted {
            log::warn!(
                "TextureImporter: Refusing to import \"{}\" into a record that is already {:?}.",
                path.display(),
                state
            );
            return Err(TextureImportError::AlreadyLoaded(state));
        }

        if info.path.as_os_str().is_empty() {
            info.path = path.to_path_buf();
        }
        info.set_load_state(LoadState::Loading);

        match self.import(path, info) {
            Ok(()) => {
                info.set_load_state(LoadState::Completed);
                Ok(())
            }
            Err(e) => {
                log::warn!("TextureImporter: {e}");
                info.set_load_state(LoadState::Failed);
                Err(e)
            }
        }
    }

    /// Imports `path` into `shared` on one of the scheduler's workers.
    ///
    /// Returns immediately. There is no completion handle: poll
    /// [`TextureInfo::load_state`] through the lock until it is terminal. The
    /// lock is only held to mark the record `Loading` and to publish the result,
    /// never while decoding. A panic during the import publishes a `Failed` record.
    pub fn load_async(&self, path: impl Into<PathBuf>, shared: SharedTextureInfo) {
        let path = path.into();
        let importer = self.clone();

        self.inner.scheduler.submit(Box::new(move || {
            let mut local = {
                let mut record = shared.write().unwrap_or_else(PoisonError::into_inner);
                let state = record.load_state();
                if state != LoadState::NotStarted {
                    log::warn!(
                        "TextureImporter: Refusing to import \"{}\" into a record that is already {:?}.",
                        path.display(),
                        state
                    );
                    return;
                }
                if record.path.as_os_str().is_empty() {
                    record.path = path.clone();
                }
                record.set_load_state(LoadState::Loading);
                record.request()
            };

            // The outcome is published through the record's load state.
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| importer.load(&path, &mut local)));
            if outcome.is_err() {
                log::error!(
                    "TextureImporter: Import of \"{}\" panicked; marking it as failed.",
                    path.display()
                );
                let mut failed = local.request();
                failed.set_load_state(LoadState::Loading);
                failed.set_load_state(LoadState::Failed);
                local = failed;
            }

            *shared.write().unwrap_or_else(PoisonError::into_inner) = local;
        }));
    }

    /// Serializes a completed texture to `path` in the engine's own format.
    ///
    /// Files written this way are read back by [`load`](Self::load) without
    /// going through the decoder. Give them the
    /// [`ENGINE_TEXTURE_EXTENSION`](khora_core::vfs::ENGINE_TEXTURE_EXTENSION).
    pub fn save(&self, info: &TextureInfo, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        ensure!(
            info.load_state() == LoadState::Completed,
            "cannot save a texture that is {:?}",
            info.load_state()
        );
        if !vfs::is_engine_texture_file(path) {
            log::warn!(
                "TextureImporter: \"{}\" lacks the .{} extension and will be decoded as an image on load.",
                path.display(),
                vfs::ENGINE_TEXTURE_EXTENSION
            );
        }
        write_engine_texture(path, info)
    }

    fn import(&self, path: &Path, info: &mut TextureInfo) -> Result<(), TextureImportError> {
        self.validate(path)?;

        if vfs::is_engine_texture_file(path) {
            let started = Instant::now();
            read_engine_texture(path, info).map_err(|e| TextureImportError::DeserializeFailed {
                path: path.to_path_buf(),
                reason: format!("{e:#}"),
            })?;
            log::debug!(
                "TextureImporter: Read engine texture \"{}\" in {:?}",
                path.display(),
                started.elapsed()
            );
            return Ok(());
        }

        let codec = self.inner.codec.as_ref();
        let config = &self.inner.config;

        let started = Instant::now();
        let format = FormatResolver::new(codec).resolve(path)?;
        log::debug!(
            "TextureImporter: Resolved {:?} for \"{}\" in {:?}",
            format,
            path.display(),
            started.elapsed()
        );

        let started = Instant::now();
        let normalized = BitmapNormalizer::new(codec, config.resize_filter).normalize(path, format, info)?;
        log::debug!(
            "TextureImporter: Normalized \"{}\" to {} in {:?}",
            path.display(),
            normalized.bitmap.extent(),
            started.elapsed()
        );

        let base_level = extract_rgba(&normalized.bitmap)?;
        PixelClassifier.classify(&normalized, &base_level, info);
        info.mip_levels.clear();
        info.mip_levels.push(base_level);

        if info.uses_mipmaps {
            let started = Instant::now();
            let report = MipChainGenerator::new(self.inner.scheduler.as_ref(), config.mip_filter)
                .generate(&normalized.bitmap, info);
            log::debug!(
                "TextureImporter: Generated {} mip level(s) for \"{}\" in {:?}",
                report.generated,
                path.display(),
                started.elapsed()
            );

            if !report.is_complete() && config.mip_failure_policy == MipFailurePolicy::FailImport {
                return Err(TextureImportError::IncompleteMipChain {
                    failed: report.failures.len(),
                    total: report.generated,
                });
            }
        }

        Ok(())
    }

    fn validate(&self, path: &Path) -> Result<(), TextureImportError> {
        if path.as_os_str().is_empty() || path.as_os_str() == self.inner.config.unassigned_path.as_str() {
            return Err(TextureImportError::PathInvalid);
        }
        if !vfs::file_exists(path) {
            return Err(TextureImportError::PathNotFound(path.to_path_buf()));
        }
        Ok(())
    }
}
