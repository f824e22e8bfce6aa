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

//! Acts as the **[A]gent** for the asset subsystem.
//!
//! This module provides the high-level, tactical logic for importing assets in
//! Khora. It is the public-facing API for requesting an import and observing
//! its progress, but it delegates the heavy lifting to the `asset_lane`.
//!
//! The primary entry point is [`TextureImporter`], which turns image files into
//! engine-ready [`TextureInfo`](khora_core::asset::TextureInfo) records, either
//! synchronously or on the scheduler's workers.

mod config;
mod importer;

pub use config::*;
pub use importer::*;
