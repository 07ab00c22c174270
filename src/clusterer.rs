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

use crate::{color_info::ColorInfo, distance::weighted_distance, filter::Filter};

/// A group of similar samples represented by their running average color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColorCluster {
    color: (u8, u8, u8),
    count: u32,
}

/// The clusters formed from one image, in creation order, along with the number of samples that
/// went into them.
#[derive(Debug)]
pub(crate) struct Clustering {
    clusters: Vec<ColorCluster>,
    total_samples: u32,
}

pub(crate) struct GreedyClusterer<P>
where
    P: image::Pixel<Subpixel = u8>,
{
    pixels: Vec<P>,
    sample_size: u32,
    color_threshold: f32,
    filters: Vec<Box<dyn Filter>>,
}

impl ColorCluster {
    fn new(color: (u8, u8, u8)) -> Self {
        Self { color, count: 1 }
    }

    fn distance_to(&self, color: (u8, u8, u8)) -> f32 {
        weighted_distance(self.color, color)
    }

    fn absorb(&mut self, (r, g, b): (u8, u8, u8)) {
        // move the average toward the new sample by 1/(n+1) of the way
        let total = self.count as f64 + 1.0;
        let weight = self.count as f64 / total;
        let blend = |old: u8, new: u8| (old as f64 * weight + new as f64 / total).round() as u8;

        self.color = (blend(self.color.0, r), blend(self.color.1, g), blend(self.color.2, b));
        self.count += 1;
    }
}

impl Clustering {
    pub(crate) fn total_samples(&self) -> u32 {
        self.total_samples
    }

    /// Turn the clusters into color records, most common first, keeping at most `maximum_color_count`.
    pub(crate) fn finalize(mut self, maximum_color_count: usize) -> Vec<ColorInfo> {
        if self.total_samples == 0 {
            return Vec::new();
        }

        // stable, so clusters of equal size keep their creation order
        self.clusters.sort_by(|lhs, rhs| rhs.count.cmp(&lhs.count));

        self.clusters
            .into_iter()
            .take(maximum_color_count)
            .map(|cluster| ColorInfo::new(cluster.color, cluster.count, self.total_samples))
            .collect()
    }
}

impl<P> GreedyClusterer<P>
where
    P: image::Pixel<Subpixel = u8>,
{
    pub fn new(pixels: Vec<P>, sample_size: u32, color_threshold: f32, filters: Vec<Box<dyn Filter>>) -> Self {
        Self {
            pixels,
            sample_size,
            color_threshold,
            filters,
        }
    }

    pub fn clusters(self) -> Clustering {
        let stride = sampling_stride(self.pixels.len(), self.sample_size);
        let mut clusters: Vec<ColorCluster> = Vec::new();
        let mut total_samples = 0;

        for pixel in self.pixels.iter().step_by(stride) {
            let rgba = pixel_to_rgba(pixel);
            if self.should_ignore_pixel(rgba) {
                continue;
            }

            let color = (rgba.0, rgba.1, rgba.2);
            total_samples += 1;

            // the sample joins the first cluster close enough to it, not necessarily the closest one
            match clusters
                .iter_mut()
                .find(|cluster| cluster.distance_to(color) < self.color_threshold)
            {
                Some(cluster) => cluster.absorb(color),
                None => clusters.push(ColorCluster::new(color)),
            }
        }

        tracing::debug!(
            pixels = self.pixels.len(),
            stride,
            samples = total_samples,
            clusters = clusters.len(),
            "clustered sampled pixels"
        );

        Clustering {
            clusters,
            total_samples,
        }
    }

    fn should_ignore_pixel(&self, rgba: (u8, u8, u8, u8)) -> bool {
        // converted at most once, and only if a filter that reads it gets to see the pixel
        let mut hsl = None;

        self.filters.iter().any(|filter| {
            let filter_hsl = if filter.uses_hsl() {
                *hsl.get_or_insert_with(|| crate::rgb_to_hsl((rgba.0, rgba.1, rgba.2)))
            } else {
                (0.0, 0.0, 0.0)
            };

            !filter.is_allowed(rgba, filter_hsl)
        })
    }
}

/// Distance between visited pixels so that roughly `sample_size` pixels are visited per row of a
/// square image of the same area.
fn sampling_stride(pixel_count: usize, sample_size: u32) -> usize {
    let sample_size = sample_size.max(1);
    let stride = ((pixel_count as f64).sqrt() / sample_size as f64).floor() as usize;

    stride.max(1)
}

fn pixel_to_rgba<P>(pixel: &P) -> (u8, u8, u8, u8)
where
    P: image::Pixel<Subpixel = u8>,
{
    let rgba = pixel.to_rgba();
    (rgba.0[0], rgba.0[1], rgba.0[2], rgba.0[3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::OpaqueFilter;
    use image::Rgba;
    use std::{cell::RefCell, rc::Rc};

    struct Recorder {
        uses_hsl: bool,
        seen: Rc<RefCell<Vec<(f32, f32, f32)>>>,
    }

    impl Filter for Recorder {
        fn is_allowed(&self, _: (u8, u8, u8, u8), hsl: (f32, f32, f32)) -> bool {
            self.seen.borrow_mut().push(hsl);
            true
        }

        fn uses_hsl(&self) -> bool {
            self.uses_hsl
        }
    }

    fn cluster(pixels: Vec<Rgba<u8>>, sample_size: u32, color_threshold: f32) -> Clustering {
        GreedyClusterer::new(pixels, sample_size, color_threshold, vec![Box::new(OpaqueFilter)]).clusters()
    }

    fn opaque(r: u8, g: u8, b: u8) -> Rgba<u8> {
        Rgba([r, g, b, 255])
    }

    #[test]
    fn stride_follows_square_root_of_area() {
        assert_eq!(sampling_stride(0, 5), 1);
        assert_eq!(sampling_stride(16, 5), 1);
        assert_eq!(sampling_stride(100, 5), 2);
        assert_eq!(sampling_stride(10_000, 5), 20);
        assert_eq!(sampling_stride(10_000, 1000), 1);
        assert_eq!(sampling_stride(10_000, 0), 100);
    }

    #[test]
    fn absorbing_keeps_a_rounded_running_mean() {
        let mut cluster = ColorCluster::new((10, 20, 30));
        cluster.absorb((11, 20, 40));
        assert_eq!(cluster, ColorCluster { color: (11, 20, 35), count: 2 });

        cluster.absorb((8, 23, 35));
        assert_eq!(cluster, ColorCluster { color: (10, 21, 35), count: 3 });
    }

    #[test]
    fn transparent_pixels_are_not_sampled() {
        let pixels = vec![Rgba([255, 0, 0, 0]), Rgba([0, 255, 0, 127]), opaque(0, 0, 255)];
        let clustering = cluster(pixels, 100, 20.0);

        assert_eq!(clustering.total_samples(), 1);
        assert_eq!(clustering.clusters, vec![ColorCluster::new((0, 0, 255))]);
    }

    #[test]
    fn joins_first_cluster_within_threshold_rather_than_nearest() {
        // (30, 0, 0) is ~16.4 from the first cluster and ~5.5 from the second, both under 20
        let pixels = vec![opaque(0, 0, 0), opaque(40, 0, 0), opaque(30, 0, 0)];
        let clustering = cluster(pixels, 100, 20.0);

        assert_eq!(
            clustering.clusters,
            vec![ColorCluster { color: (15, 0, 0), count: 2 }, ColorCluster::new((40, 0, 0))]
        );
    }

    #[test]
    fn threshold_is_exclusive() {
        // distance between these is exactly sqrt(0.3) * 10
        let threshold = weighted_distance((0, 0, 0), (10, 0, 0));
        let clustering = cluster(vec![opaque(0, 0, 0), opaque(10, 0, 0)], 100, threshold);

        assert_eq!(clustering.clusters.len(), 2);
    }

    #[test]
    fn hsl_is_only_given_to_filters_that_use_it() {
        let with_hsl = Rc::new(RefCell::new(Vec::new()));
        let without_hsl = Rc::new(RefCell::new(Vec::new()));
        let filters: Vec<Box<dyn Filter>> = vec![
            Box::new(OpaqueFilter),
            Box::new(Recorder {
                uses_hsl: true,
                seen: Rc::clone(&with_hsl),
            }),
            Box::new(Recorder {
                uses_hsl: false,
                seen: Rc::clone(&without_hsl),
            }),
        ];

        // the transparent pixel is rejected before the recorders see it
        let pixels = vec![Rgba([255, 0, 0, 0]), opaque(255, 0, 0)];
        let clustering = GreedyClusterer::new(pixels, 100, 20.0, filters).clusters();

        assert_eq!(clustering.total_samples(), 1);
        assert_eq!(*without_hsl.borrow(), vec![(0.0, 0.0, 0.0)]);

        let with_hsl = with_hsl.borrow();
        assert_eq!(with_hsl.len(), 1);
        let (h, s, l) = with_hsl[0];
        assert!(h.abs() < 1e-3 && (s - 1.0).abs() < 1e-6 && (l - 0.5).abs() < 1e-6);
    }

    #[test]
    fn opaque_filter_skips_the_hsl_conversion() {
        assert!(!OpaqueFilter.uses_hsl());
    }

    #[test]
    fn finalize_orders_by_count_and_truncates() {
        let clustering = Clustering {
            clusters: vec![
                ColorCluster { color: (1, 1, 1), count: 1 },
                ColorCluster { color: (2, 2, 2), count: 4 },
                ColorCluster { color: (3, 3, 3), count: 1 },
                ColorCluster { color: (4, 4, 4), count: 2 },
            ],
            total_samples: 8,
        };

        let colors = clustering.finalize(3);
        let summary: Vec<_> = colors.iter().map(|c| (c.rgb(), c.percentage())).collect();

        assert_eq!(summary, vec![((2, 2, 2), 50.0), ((4, 4, 4), 25.0), ((1, 1, 1), 12.5)]);
    }

    #[test]
    fn finalize_without_samples_is_empty() {
        let clustering = cluster(vec![Rgba([9, 9, 9, 0]); 16], 5, 20.0);

        assert_eq!(clustering.total_samples(), 0);
        assert!(clustering.finalize(5).is_empty());
    }
}
