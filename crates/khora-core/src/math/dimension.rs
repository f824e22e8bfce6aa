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

//! Provides the pixel extent type used to describe texture and mip level sizes.
//!
//! Components are `u32`, which matches what image decoders report and what
//! GPU texture descriptors expect.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A two-dimensional extent, typically representing width and height.
///
/// This is commonly used for texture dimensions and mip level sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Extent2D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new extent.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either component is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The number of pixels covered by this extent.
    pub const fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The size in bytes of a tightly packed RGBA8 image of this extent.
    pub const fn rgba8_len(&self) -> usize {
        self.area() * 4
    }

    /// The extent of the next mip level: each component halved, floored to 1.
    pub fn halved(&self) -> Self {
        Self {
            width: (self.width / 2).max(1),
            height: (self.height / 2).max(1),
        }
    }
}

impl fmt::Display for Extent2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Computes the extents of a full mip chain, base level included.
///
/// Each level halves the previous one (floored to 1) and the chain ends at
/// the first 1x1 level. An empty base yields only the base itself.
///
/// # Examples
///
/// ```
/// use khora_core::math::{mip_chain_extents, Extent2D};
///
/// let chain = mip_chain_extents(Extent2D::new(4, 2));
/// assert_eq!(
///     chain,
///     vec![Extent2D::new(4, 2), Extent2D::new(2, 1), Extent2D::new(1, 1)]
/// );
/// ```
pub fn mip_chain_extents(base: Extent2D) -> Vec<Extent2D> {
    let mut chain = vec![base];
    if base.is_empty() {
        return chain;
    }

    let mut current = base;
    while current.width != 1 || current.height != 1 {
        current = current.halved();
        chain.push(current);
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mip_chain_for_non_power_of_two() {
        let chain = mip_chain_extents(Extent2D::new(513, 300));
        let expected: Vec<Extent2D> = [
            (513, 300),
            (256, 150),
            (128, 75),
            (64, 37),
            (32, 18),
            (16, 9),
            (8, 4),
            (4, 2),
            (2, 1),
            (1, 1),
        ]
        .into_iter()
        .map(|(w, h)| Extent2D::new(w, h))
        .collect();

        assert_eq!(chain, expected);
    }

    #[test]
    fn test_mip_chain_keeps_halving_the_long_side() {
        // Height reaches 1 long before width; the chain must continue.
        let chain = mip_chain_extents(Extent2D::new(16, 2));
        assert_eq!(chain.len(), 5);
        assert_eq!(chain[1], Extent2D::new(8, 1));
        assert_eq!(*chain.last().unwrap(), Extent2D::new(1, 1));
    }

    #[test]
    fn test_mip_chain_single_pixel_and_empty() {
        assert_eq!(
            mip_chain_extents(Extent2D::new(1, 1)),
            vec![Extent2D::new(1, 1)]
        );
        assert_eq!(
            mip_chain_extents(Extent2D::new(0, 8)),
            vec![Extent2D::new(0, 8)]
        );
    }

    #[test]
    fn test_extent_sizes() {
        let extent = Extent2D::new(3, 5);
        assert_eq!(extent.area(), 15);
        assert_eq!(extent.rgba8_len(), 60);
        assert_eq!(extent.to_string(), "3x5");
    }
}
