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

use image::imageops::FilterType;

/// What an import does when some mip levels cannot be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MipFailurePolicy {
    /// Log the missing levels, leave them empty, and complete the import.
    #[default]
    Tolerate,
    /// Fail the import with
    /// [`TextureImportError::IncompleteMipChain`](khora_lanes::asset_lane::TextureImportError::IncompleteMipChain).
    FailImport,
}

/// Configuration for a [`TextureImporter`](super::TextureImporter).
#[derive(Debug, Clone)]
pub struct TextureImportConfig {
    /// Filter used when the caller requests explicit dimensions.
    pub resize_filter: FilterType,
    /// Filter used to resample each mip level from the base bitmap.
    pub mip_filter: FilterType,
    /// A path value meaning "no file assigned". Requests carrying it are
    /// rejected before touching the file system.
    pub unassigned_path: String,
    /// See [`MipFailurePolicy`].
    pub mip_failure_policy: MipFailurePolicy,
}

impl Default for TextureImportConfig {
    fn default() -> Self {
        Self {
            resize_filter: FilterType::Lanczos3,
            mip_filter: FilterType::Lanczos3,
            unassigned_path: "N/A".to_string(),
            mip_failure_policy: MipFailurePolicy::Tolerate,
        }
    }
}
