//! Color-band segmentation with morphological cleanup.

use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{close, open};
use log::debug;

use crate::types::{ColorBand, Hsv};

/// Radius of the 5×5 square structuring element used by both cleanup passes.
const STRUCTURING_RADIUS: u8 = 2;

/// Produces a binary mask of pixels inside a configured [`ColorBand`].
#[derive(Debug, Clone, Copy)]
pub struct RegionSegmenter {
    band: ColorBand,
}

impl RegionSegmenter {
    pub fn new(band: ColorBand) -> Self {
        Self { band }
    }

    pub fn band(&self) -> ColorBand {
        self.band
    }

    /// Threshold the image against the band, then close (fill small holes)
    /// and open (drop small speckles) with the 5×5 square element.
    ///
    /// Closing runs first so the primary blob's interior is solid before the
    /// opening pass removes isolated noise. Always produces a mask; an image
    /// with no matching pixels yields an all-background mask, not an error.
    pub fn segment(&self, image: &RgbImage) -> GrayImage {
        let mut mask = GrayImage::new(image.width(), image.height());
        for (x, y, pixel) in image.enumerate_pixels() {
            if self.band.contains(hsv_from_rgb(*pixel)) {
                mask.put_pixel(x, y, Luma([255u8]));
            }
        }

        let raw = count_foreground(&mask);
        let mask = close(&mask, Norm::LInf, STRUCTURING_RADIUS);
        let mask = open(&mask, Norm::LInf, STRUCTURING_RADIUS);
        debug!(
            "segmentation: {} px in band, {} px after cleanup",
            raw,
            count_foreground(&mask)
        );

        mask
    }
}

impl Default for RegionSegmenter {
    fn default() -> Self {
        Self::new(ColorBand::leaf_green())
    }
}

fn count_foreground(mask: &GrayImage) -> usize {
    mask.iter().filter(|&&v| v > 0).count()
}

/// Convert an RGB pixel to 8-bit HSV with the half-angle hue scale
/// (hue 0–180, saturation and value 0–255).
pub fn hsv_from_rgb(rgb: Rgb<u8>) -> Hsv {
    let [r, g, b] = rgb.0;
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let value = max;
    let saturation = if max > 0.0 { delta / max * 255.0 } else { 0.0 };

    let hue_deg = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / delta
    } else if max == gf {
        60.0 * (bf - rf) / delta + 120.0
    } else {
        60.0 * (rf - gf) / delta + 240.0
    };
    let hue_deg = if hue_deg < 0.0 { hue_deg + 360.0 } else { hue_deg };

    Hsv::new(
        ((hue_deg / 2.0).round() as u16 % 180) as u8,
        saturation.round() as u8,
        value.round() as u8,
    )
}
