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

//! Provides the foundational traits and record types for Khora's asset system.
//!
//! This module defines the "common language" shared by the import lanes and the
//! agents that drive them. It has no knowledge of how assets are decoded:
//!
//! - The [`Asset`] trait: a marker for all types that can be treated as assets.
//! - [`TextureInfo`]: the record a texture import populates in place, together
//!   with its [`LoadState`] progress signal.

mod texture;

pub use texture::*;

/// A marker trait for types that can be managed by the asset system.
///
/// The supertraits enforce critical safety guarantees:
/// - `Send` + `Sync`: The asset type can be safely shared and sent between threads.
///   This is essential for background loading.
/// - `'static`: The asset type does not contain any non-static references, ensuring
///   it can be stored for the lifetime of the application.
///
/// # Examples
///
/// ```
/// use khora_core::asset::Asset;
///
/// struct Sound {
///     // ... fields
/// }
///
/// impl Asset for Sound {}
/// ```
pub trait Asset: Send + Sync + 'static {}
