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

//! A library to extract the dominant colors of an image and give them human-readable names.
//!
//! The image is expected to have had its background removed already, so that everything that
//! isn't the subject is transparent. Pixels are sampled on a regular stride, transparent ones are
//! skipped, and the rest are grouped greedily: each sample joins the first existing group whose
//! running average color is within a threshold of it, or starts a new group. The largest groups
//! are reported with their share of the sampled pixels, and each can be named after the closest
//! entry of a small reference table.
//!
//! ```
//! use dominance::image::{Rgba, RgbaImage};
//!
//! let image = RgbaImage::from_fn(4, 4, |x, _| {
//!     if x == 3 { Rgba([0, 0, 255, 255]) } else { Rgba([255, 0, 0, 255]) }
//! });
//!
//! let colors = dominance::DominantColors::from_image(image).sample_size(100).generate();
//! let summary: Vec<_> = colors.named().map(|(color, name)| (color.hex(), color.percentage(), name)).collect();
//!
//! assert_eq!(summary, vec![("#ff0000", 75.0, "Red"), ("#0000ff", 25.0, "Blue")]);
//! ```

mod clusterer;
mod color_info;
mod distance;
mod error;
mod filter;
pub mod hex;
pub mod names;

/// How many pixels to visit along the side of a square image of the same area.
pub const DEFAULT_SAMPLE_SIZE: u32 = 5;
/// Samples closer than this to a group's average color join that group.
pub const DEFAULT_COLOR_THRESHOLD: f32 = 20.0;
pub const DEFAULT_MAXIMUM_COLOR_COUNT: usize = 5;

pub use crate::{
    color_info::ColorInfo,
    distance::weighted_distance,
    error::{DominanceError, Result},
    filter::{Filter, OpaqueFilter, OPAQUE_ALPHA_THRESHOLD},
    hex::{hex_of, rgb_of, ParseHexError},
    names::{name_of, name_of_rgb, UNKNOWN_COLOR_NAME},
};
pub use image;
pub use palette;

use clusterer::GreedyClusterer;
use image::{math::Rect, GenericImageView, ImageBuffer, RgbaImage};
use palette::IntoColor;
use std::path::Path;

/// The tunable parameters of color extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ExtractionOptions {
    /// Higher values sample more densely. Zero is treated as one.
    pub sample_size: u32,
    pub color_threshold: f32,
    pub maximum_color_count: usize,
}

/// The dominant colors of an image, most common first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DominantColors {
    colors: Vec<ColorInfo>,
    total_samples: u32,
}

pub struct DominantColorsBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>,
    options: ExtractionOptions,
    region: Option<Rect>,
    filters: Vec<Box<dyn Filter>>,
}

impl ExtractionOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.color_threshold.is_finite() || self.color_threshold < 0.0 {
            return Err(DominanceError::InvalidParameter {
                parameter: "color_threshold",
                value: self.color_threshold.to_string(),
            });
        }

        Ok(())
    }
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            color_threshold: DEFAULT_COLOR_THRESHOLD,
            maximum_color_count: DEFAULT_MAXIMUM_COLOR_COUNT,
        }
    }
}

impl DominantColors {
    pub fn from_image<P>(image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>) -> DominantColorsBuilder<P>
    where
        P: image::Pixel<Subpixel = u8> + 'static,
    {
        DominantColorsBuilder::from_image(image)
    }

    pub fn colors(&self) -> &[ColorInfo] {
        &self.colors
    }

    /// Number of pixels that were sampled and allowed by every filter.
    pub fn total_samples(&self) -> u32 {
        self.total_samples
    }

    pub fn most_dominant(&self) -> Option<&ColorInfo> {
        self.colors.first()
    }

    /// No colors were detected, e.g. because the image is entirely transparent.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Each color alongside its closest name.
    pub fn named(&self) -> impl Iterator<Item = (&ColorInfo, &'static str)> {
        self.colors.iter().map(|color| (color, color.name()))
    }

    pub fn into_colors(self) -> Vec<ColorInfo> {
        self.colors
    }
}

impl<P> DominantColorsBuilder<P>
where
    P: image::Pixel<Subpixel = u8> + 'static,
{
    pub fn from_image(image: ImageBuffer<P, Vec<<P as image::Pixel>::Subpixel>>) -> Self {
        Self {
            image,
            options: ExtractionOptions::default(),
            region: None,
            filters: default_filters(),
        }
    }

    pub fn options(self, options: ExtractionOptions) -> Self {
        Self { options, ..self }
    }

    pub fn sample_size(mut self, sample_size: u32) -> Self {
        self.options.sample_size = sample_size;
        self
    }

    pub fn color_threshold(mut self, color_threshold: f32) -> Self {
        self.options.color_threshold = color_threshold;
        self
    }

    pub fn maximum_color_count(mut self, maximum_color_count: usize) -> Self {
        self.options.maximum_color_count = maximum_color_count;
        self
    }

    /// Only sample the given rectangle of the image. The rectangle is clipped to the image bounds.
    pub fn region(self, x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            region: Some(Rect { x, y, width, height }),
            ..self
        }
    }

    pub fn add_filter<F>(mut self, filter: F) -> Self
    where
        F: Filter + 'static,
    {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn clear_region(self) -> Self {
        Self { region: None, ..self }
    }

    /// Remove every filter, including the default [`OpaqueFilter`], so that transparent pixels are
    /// sampled too.
    pub fn clear_filters(self) -> Self {
        Self {
            filters: Vec::new(),
            ..self
        }
    }

    pub fn generate(self) -> DominantColors {
        let region = self.clipped_region();
        let view = self.image.view(region.x, region.y, region.width, region.height);
        let pixels = view.pixels().map(|(_, _, p)| p).collect();

        let clusterer = GreedyClusterer::new(
            pixels,
            self.options.sample_size,
            self.options.color_threshold,
            self.filters,
        );
        let clustering = clusterer.clusters();
        let total_samples = clustering.total_samples();

        DominantColors {
            colors: clustering.finalize(self.options.maximum_color_count),
            total_samples,
        }
    }

    fn clipped_region(&self) -> Rect {
        let (width, height) = self.image.dimensions();

        match self.region {
            Some(region) => {
                let x = region.x.min(width);
                let y = region.y.min(height);

                Rect {
                    x,
                    y,
                    width: region.width.min(width - x),
                    height: region.height.min(height - y),
                }
            }
            None => Rect { x: 0, y: 0, width, height },
        }
    }
}

/// Extract up to [`DEFAULT_MAXIMUM_COLOR_COUNT`] dominant colors from a row-major RGBA buffer.
///
/// `pixels` must hold exactly `width * height * 4` bytes. Pixels with an alpha below
/// [`OPAQUE_ALPHA_THRESHOLD`] are ignored; if none remain the result is empty.
pub fn extract_dominant_colors(
    pixels: &[u8],
    width: u32,
    height: u32,
    sample_size: u32,
    color_threshold: f32,
) -> Vec<ColorInfo> {
    let pixel_count = width as usize * height as usize;
    debug_assert_eq!(pixels.len(), pixel_count * 4, "pixel buffer doesn't match a {width}x{height} RGBA image");

    let pixels = pixels
        .chunks_exact(4)
        .take(pixel_count)
        .map(|channels| image::Rgba([channels[0], channels[1], channels[2], channels[3]]))
        .collect();

    GreedyClusterer::new(pixels, sample_size, color_threshold, default_filters())
        .clusters()
        .finalize(DEFAULT_MAXIMUM_COLOR_COUNT)
}

/// Decode an image file of any supported format into RGBA.
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|err| DominanceError::image_load(path, err))?;

    Ok(image.to_rgba8())
}

fn default_filters() -> Vec<Box<dyn Filter>> {
    vec![Box::new(OpaqueFilter)]
}

fn rgb_to_hsl(rgb: (u8, u8, u8)) -> (f32, f32, f32) {
    let raw = palette::Srgb::from_components(rgb);
    let raw_float: palette::Srgb<f32> = raw.into_format();
    let hsl: palette::Hsl = raw_float.into_color();
    let (h, s, l) = hsl.into_components();

    (h.into_positive_degrees(), s, l)
}
