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

// luminance weights: the eye is most sensitive to green and least to blue
const RED_WEIGHT: f32 = 0.30;
const GREEN_WEIGHT: f32 = 0.59;
const BLUE_WEIGHT: f32 = 0.11;

/// Weighted Euclidean distance between two sRGB colors.
///
/// Used both to merge samples into clusters and to find the closest named color.
pub fn weighted_distance(lhs: (u8, u8, u8), rhs: (u8, u8, u8)) -> f32 {
    let red = lhs.0 as f32 - rhs.0 as f32;
    let green = lhs.1 as f32 - rhs.1 as f32;
    let blue = lhs.2 as f32 - rhs.2 as f32;

    (RED_WEIGHT * red * red + GREEN_WEIGHT * green * green + BLUE_WEIGHT * blue * blue).sqrt()
}
