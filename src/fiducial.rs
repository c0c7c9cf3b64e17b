//! Fiducial marker location.
//!
//! The pipeline only needs four corner coordinates; everything about *how*
//! a marker is found lives behind [`FiducialLocator`], so the calibration
//! math stays independent of the detection technique. The production
//! implementation is [`QrLocator`], backed by the `rqrr` QR-code detector.

use image::RgbImage;
use log::debug;

use crate::types::{FiducialCorners, Point};

/// Finds a single planar fiducial marker in an image.
pub trait FiducialLocator {
    /// Locate the marker and return its four corner pixel coordinates.
    ///
    /// `None` means no marker was found or its corner geometry could not be
    /// resolved; that is a normal outcome the caller must handle, not an
    /// error. The
    /// input image is never mutated. When several candidate markers are in
    /// frame, only the detector's best match is reported.
    fn locate(&self, image: &RgbImage) -> Option<FiducialCorners>;
}

/// QR-code locator backed by `rqrr`.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrLocator;

impl QrLocator {
    pub fn new() -> Self {
        Self
    }
}

impl FiducialLocator for QrLocator {
    fn locate(&self, image: &RgbImage) -> Option<FiducialCorners> {
        let gray = image::imageops::grayscale(image);
        let mut prepared = rqrr::PreparedImage::prepare(gray);
        let grids = prepared.detect_grids();

        let grid = grids.first()?;
        // A marker whose payload fails to decode still has usable corners;
        // the payload itself is irrelevant to calibration.
        match grid.decode() {
            Ok((_, payload)) => debug!("fiducial payload: {:?}", payload),
            Err(e) => debug!("fiducial payload not decodable: {}", e),
        }

        let corners = FiducialCorners::new(
            grid.bounds
                .map(|p| Point::new(p.x as f32, p.y as f32)),
        );
        debug!("fiducial corners: {:?}", corners.points);
        Some(corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use qrcode::{Color, QrCode};

    /// Paint a QR symbol at (x0, y0) with square modules of `module_px`.
    /// Returns the symbol's side length in pixels.
    fn paint_qr(image: &mut RgbImage, x0: u32, y0: u32, module_px: u32) -> u32 {
        let code = QrCode::new(b"foliar").expect("encode test symbol");
        let modules = code.width() as u32;
        let colors = code.to_colors();

        for (i, color) in colors.iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let row = i as u32 / modules;
            let col = i as u32 % modules;
            for dy in 0..module_px {
                for dx in 0..module_px {
                    image.put_pixel(
                        x0 + col * module_px + dx,
                        y0 + row * module_px + dy,
                        Rgb([0, 0, 0]),
                    );
                }
            }
        }

        modules * module_px
    }

    #[test]
    fn locates_rendered_symbol() {
        let mut image = RgbImage::from_pixel(400, 400, Rgb([255, 255, 255]));
        let side = paint_qr(&mut image, 100, 100, 8);

        let corners = QrLocator::new().locate(&image).expect("symbol not found");

        // Corners must outline the drawn symbol, within a small tolerance
        // for the detector's grid estimation.
        let longest = corners
            .edge_lengths()
            .iter()
            .fold(0.0f32, |acc, &e| acc.max(e));
        let error = (longest - side as f32).abs() / side as f32;
        assert!(
            error < 0.1,
            "longest edge {:.1}px vs drawn side {}px",
            longest,
            side
        );

        for p in corners.points {
            assert!(p.x >= 80.0 && p.x <= 320.0, "corner {:?} far from symbol", p);
            assert!(p.y >= 80.0 && p.y <= 320.0, "corner {:?} far from symbol", p);
        }
    }

    #[test]
    fn blank_image_has_no_fiducial() {
        let image = RgbImage::from_pixel(200, 160, Rgb([255, 255, 255]));
        assert!(QrLocator::new().locate(&image).is_none());
    }
}
