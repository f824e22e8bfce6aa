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

//! Lanes for importing image files as RGBA8 textures.
//!
//! An import runs the lanes in a fixed order, each consuming the previous output:
//!
//! ```text
//! FormatResolver      content probe, extension fallback
//!    ↓
//! BitmapNormalizer    decode → flip → rescale → 32 bpp
//!    ↓
//! extract_rgba        scanlines → flat RGBA8 base level
//!    ↓
//! PixelClassifier     channel count, transparency, grayscale
//!    ↓
//! MipChainGenerator   one scheduled job per level, joined
//! ```
//!
//! Files already serialized by the engine skip all of this and go through
//! [`read_engine_texture`].

mod classifier;
mod codec;
mod error;
mod extractor;
mod format_resolver;
mod mipmap;
mod native;
mod normalizer;

pub use classifier::*;
pub use codec::*;
pub use error::*;
pub use extractor::*;
pub use format_resolver::*;
pub use mipmap::*;
pub use native::*;
pub use normalizer::*;
