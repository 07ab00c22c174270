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

use std::fmt;

/// One dominant color of an image and how much of the sampled foreground it covers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorInfo {
    hex: String,
    rgb: (u8, u8, u8),
    percentage: f32,
    population: u32,
}

impl ColorInfo {
    pub(crate) fn new(rgb: (u8, u8, u8), population: u32, total_samples: u32) -> ColorInfo {
        Self {
            hex: crate::hex::hex_of(rgb),
            rgb,
            percentage: population as f32 / total_samples as f32 * 100.0,
            population,
        }
    }

    /// The color as a lowercase `#rrggbb` string.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        self.rgb
    }

    pub fn hsl(&self) -> (f32, f32, f32) {
        crate::rgb_to_hsl(self.rgb)
    }

    /// Share of sampled foreground pixels in this color, from 0 to 100.
    pub fn percentage(&self) -> f32 {
        self.percentage
    }

    /// Number of sampled pixels that were grouped into this color.
    pub fn population(&self) -> u32 {
        self.population
    }

    /// The closest human-readable color name.
    pub fn name(&self) -> &'static str {
        crate::names::name_of(&self.hex)
    }
}

impl fmt::Display for ColorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {:>5.1}%  {}", self.hex, self.percentage, self.name())
    }
}
