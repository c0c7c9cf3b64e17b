//! Annotation and unit conversion: contour outline plus area label.

use std::fs;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use log::warn;

use crate::contour::Contour;
use crate::error::Result;
use crate::types::ScaleFactor;

/// Outline color for the selected contour.
const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 255, 0]);
/// Label text color.
const LABEL_COLOR: Rgb<u8> = Rgb([0, 0, 255]);
/// Label anchor, offset from the image's top-left corner.
const LABEL_ORIGIN: (i32, i32) = (50, 50);
/// Label glyph height in pixels.
const LABEL_SCALE: f32 = 32.0;
/// Outline stroke width in pixels.
const OUTLINE_WIDTH: u32 = 2;

/// Converts a contour's pixel area to cm² and renders the annotated copy.
///
/// The label needs a font; fonts are runtime assets, never embedded. Without
/// one the outline is still drawn and the label is skipped with a warning;
/// the measured value is identical either way.
#[derive(Default)]
pub struct Annotator {
    font: Option<FontVec>,
}

impl Annotator {
    /// An annotator that draws the outline only.
    pub fn new() -> Self {
        Self { font: None }
    }

    /// An annotator that also renders the label, using a TTF/OTF file.
    pub fn with_font_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        let font = FontVec::try_from_vec(bytes)?;
        Ok(Self { font: Some(font) })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Produce `(annotated copy, area in cm²)` for a selected contour.
    ///
    /// PhysicalArea = area_px × scale²: scale is cm per pixel, so its square
    /// converts pixel² into cm². The input image is left untouched.
    pub fn convert(
        &self,
        image: &RgbImage,
        contour: &Contour,
        scale: ScaleFactor,
    ) -> (RgbImage, f64) {
        let area_cm2 = contour.area_px * scale.cm_per_px() * scale.cm_per_px();

        let mut annotated = image.clone();
        for p in &contour.points {
            let stroke = Rect::at(p.x as i32, p.y as i32).of_size(OUTLINE_WIDTH, OUTLINE_WIDTH);
            draw_filled_rect_mut(&mut annotated, stroke, OUTLINE_COLOR);
        }

        match self.font {
            Some(ref font) => draw_text_mut(
                &mut annotated,
                LABEL_COLOR,
                LABEL_ORIGIN.0,
                LABEL_ORIGIN.1,
                PxScale::from(LABEL_SCALE),
                font,
                &label_text(area_cm2),
            ),
            None => warn!("no label font configured; annotating outline only"),
        }

        (annotated, area_cm2)
    }
}

/// The area label. Fixed format: period decimal separator, two fractional
/// digits. Downstream consumers parse this text.
pub fn label_text(area_cm2: f64) -> String {
    format!("Área da folha: {:.2} cm²", area_cm2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contour::select_largest;
    use image::Luma;

    fn blob_scene(width: u32, height: u32, blob: (u32, u32, u32, u32)) -> (RgbImage, Contour) {
        let image = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
        let mut mask = image::GrayImage::new(width, height);
        let (x0, y0, w, h) = blob;
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                mask.put_pixel(x, y, Luma([255u8]));
            }
        }
        let contour = select_largest(&mask).unwrap();
        (image, contour)
    }

    #[test]
    fn test_label_text_format() {
        assert_eq!(label_text(12.96), "Área da folha: 12.96 cm²");
        assert_eq!(label_text(0.0), "Área da folha: 0.00 cm²");
        assert_eq!(label_text(1234.5678), "Área da folha: 1234.57 cm²");
    }

    #[test]
    fn convert_applies_square_of_scale() {
        let (image, contour) = blob_scene(200, 150, (50, 40, 100, 100));
        let annotator = Annotator::new();

        let (annotated, area_cm2) = annotator.convert(&image, &contour, ScaleFactor(0.036));
        assert_eq!(annotated.dimensions(), image.dimensions());
        assert!((area_cm2 - 10_000.0 * 0.036 * 0.036).abs() < 1e-9);
    }

    #[test]
    fn outline_is_drawn_and_input_untouched() {
        let (image, contour) = blob_scene(200, 150, (50, 40, 100, 100));
        let reference = image.clone();

        let (annotated, _) = Annotator::new().convert(&image, &contour, ScaleFactor(0.036));

        // Boundary pixels carry the outline color; the input stays pristine.
        assert_eq!(*annotated.get_pixel(50, 40), OUTLINE_COLOR);
        assert_eq!(*annotated.get_pixel(149, 139), OUTLINE_COLOR);
        assert_eq!(image, reference);

        // Interior of the blob is not painted over.
        assert_eq!(*annotated.get_pixel(100, 90), Rgb([255, 255, 255]));
    }
}
