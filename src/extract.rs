//! Palette extraction from decoded images.

use image::DynamicImage;
use tracing::debug;

use crate::colour::Colour;
use crate::error::{Result, TintError};
use crate::math::perceived_luminance;

/// Default number of palette samples requested per image.
pub const DEFAULT_SAMPLE_COUNT: usize = 8;

/// Upper bound on pixels fed to the quantizer.
const SAMPLE_BUDGET: usize = 16_384;

/// Pixels at or below this alpha are skipped as background.
const ALPHA_CUTOFF: u8 = 128;

/// Dominant colours pulled from one image.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPalette {
    /// The most populous sample.
    pub base: Colour,
    /// All samples, most populous first. Never empty.
    pub samples: Vec<Colour>,
}

impl ExtractedPalette {
    /// Mean perceived luminance across the samples.
    pub fn average_luminance(&self) -> f64 {
        let sum: f64 = self
            .samples
            .iter()
            .map(|&colour| perceived_luminance(colour))
            .sum();
        sum / self.samples.len() as f64
    }
}

/// Quantizes an image into a small dominant-colour palette.
pub trait PaletteExtraction: Send + Sync {
    /// Extract up to `sample_count` dominant colours from `image`.
    ///
    /// Fewer samples come back when the image holds fewer distinct
    /// colours; an image with no usable pixels is an error.
    fn extract(&self, image: &DynamicImage, sample_count: usize) -> Result<ExtractedPalette>;
}

/// Median-cut quantizer.
///
/// Splits the sampled pixel set along its widest channel until the
/// requested bucket count is reached, then averages each bucket.
/// Deterministic for a given image.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianCutExtractor;

impl PaletteExtraction for MedianCutExtractor {
    fn extract(&self, image: &DynamicImage, sample_count: usize) -> Result<ExtractedPalette> {
        let pixels = collect_samples(image);
        if pixels.is_empty() {
            return Err(TintError::Extraction {
                message: "image has no opaque pixels".to_string(),
                help: Some("fully transparent images carry no usable colour".to_string()),
            });
        }

        let buckets = median_cut(pixels, sample_count.max(1));
        let samples: Vec<Colour> = buckets.iter().map(Bucket::average).collect();
        debug!(count = samples.len(), "extracted palette");

        Ok(ExtractedPalette {
            base: samples[0],
            samples,
        })
    }
}

/// Sample opaque pixels row-major, strided to stay within the budget.
fn collect_samples(image: &DynamicImage) -> Vec<[u8; 3]> {
    let rgba = image.to_rgba8();
    let total = (rgba.width() * rgba.height()) as usize;
    let stride = total.div_ceil(SAMPLE_BUDGET).max(1);
    rgba.pixels()
        .step_by(stride)
        .filter(|pixel| pixel.0[3] > ALPHA_CUTOFF)
        .map(|pixel| [pixel.0[0], pixel.0[1], pixel.0[2]])
        .collect()
}

/// One median-cut bucket of sampled pixels. Never empty.
struct Bucket {
    pixels: Vec<[u8; 3]>,
}

impl Bucket {
    /// Channel index with the widest value range, and that range.
    fn widest_channel(&self) -> (usize, u8) {
        let mut lo = [255u8; 3];
        let mut hi = [0u8; 3];
        for pixel in &self.pixels {
            for c in 0..3 {
                lo[c] = lo[c].min(pixel[c]);
                hi[c] = hi[c].max(pixel[c]);
            }
        }
        let mut widest = 0;
        for c in 1..3 {
            if hi[c] - lo[c] > hi[widest] - lo[widest] {
                widest = c;
            }
        }
        (widest, hi[widest] - lo[widest])
    }

    /// Split at the median of the widest channel. Both halves are non-empty
    /// when the bucket holds at least two pixels.
    fn split(mut self) -> (Bucket, Bucket) {
        let (channel, _) = self.widest_channel();
        self.pixels.sort_unstable_by_key(|pixel| pixel[channel]);
        let upper = self.pixels.split_off(self.pixels.len() / 2);
        (self, Bucket { pixels: upper })
    }

    /// Rounded mean colour of the bucket.
    fn average(&self) -> Colour {
        let n = self.pixels.len() as u64;
        let mut sums = [0u64; 3];
        for pixel in &self.pixels {
            for c in 0..3 {
                sums[c] += u64::from(pixel[c]);
            }
        }
        Colour::rgb(
            ((sums[0] + n / 2) / n) as u8,
            ((sums[1] + n / 2) / n) as u8,
            ((sums[2] + n / 2) / n) as u8,
        )
    }
}

/// Repeatedly split the bucket with the widest channel range until `count`
/// buckets exist or every bucket is a single flat colour, then order the
/// result by population.
fn median_cut(pixels: Vec<[u8; 3]>, count: usize) -> Vec<Bucket> {
    let mut buckets = vec![Bucket { pixels }];
    while buckets.len() < count {
        let candidate = buckets
            .iter()
            .enumerate()
            .map(|(i, bucket)| (i, bucket.widest_channel().1))
            .filter(|&(_, range)| range > 0)
            .max_by_key(|&(_, range)| range);
        let Some((index, _)) = candidate else { break };

        let (lower, upper) = buckets.swap_remove(index).split();
        buckets.push(lower);
        buckets.push(upper);
    }
    buckets.sort_by_key(|bucket| std::cmp::Reverse(bucket.pixels.len()));
    buckets
}
