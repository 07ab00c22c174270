// Copyright 2022 Spanfile
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// Pixels with an alpha below this are treated as removed background.
pub const OPAQUE_ALPHA_THRESHOLD: u8 = 128;

/// A trait used to implement filters for the sampling process.
///
/// Every pixel visited while sampling is passed through each filter, and only pixels allowed by
/// all of them are clustered and counted toward the color percentages. This trait allows the
/// library consumer to implement custom filters.
///
/// See [`crate::DominantColorsBuilder::add_filter`] on how to add filters to the sampling process.
pub trait Filter {
    /// Return whether a given pixel should be sampled or not. The same pixel is given as sRGB with
    /// alpha and as HSL for convenience.
    fn is_allowed(&self, rgba: (u8, u8, u8, u8), hsl: (f32, f32, f32)) -> bool;

    /// Whether [`Filter::is_allowed`] reads its `hsl` argument. Filters that return `false` are
    /// given `(0.0, 0.0, 0.0)` instead, which saves the conversion.
    fn uses_hsl(&self) -> bool {
        true
    }
}

/// The default filter included in every [`crate::DominantColorsBuilder`] by default.
///
/// This filter disallows pixels that are mostly transparent, which is how a background removal
/// step marks everything that isn't the subject.
#[derive(Debug)]
pub struct OpaqueFilter;
impl Filter for OpaqueFilter {
    fn is_allowed(&self, (_, _, _, alpha): (u8, u8, u8, u8), _: (f32, f32, f32)) -> bool {
        is_opaque(alpha)
    }

    fn uses_hsl(&self) -> bool {
        false
    }
}

fn is_opaque(alpha: u8) -> bool {
    alpha >= OPAQUE_ALPHA_THRESHOLD
}
