//! Pixel-to-centimeter calibration from fiducial geometry.

use log::{debug, info};

use crate::error::MeasureFailure;
use crate::types::{FiducialCorners, ScaleFactor};

/// Side length in centimeters of the printed reference marker.
///
/// Must match the physical marker actually photographed; a marker printed at
/// a different size needs a matching [`ScaleEstimator::new`] argument.
pub const DEFAULT_MARKER_CM: f64 = 3.6;

/// Derives a [`ScaleFactor`] from a detected marker's corner geometry.
#[derive(Debug, Clone, Copy)]
pub struct ScaleEstimator {
    side_cm: f64,
}

impl ScaleEstimator {
    pub fn new(side_cm: f64) -> Self {
        Self { side_cm }
    }

    pub fn side_cm(&self) -> f64 {
        self.side_cm
    }

    /// Estimate centimeters per pixel from the marker's corners.
    ///
    /// Uses the longest of the quadrilateral's four edges as the pixel
    /// measurement of the marker's side: under slight skew the longer, less
    /// foreshortened edge is the more reliable one, and taking all four edges
    /// makes the result independent of the detector's corner ordering.
    ///
    /// The only failure is [`MeasureFailure::DegenerateScale`], returned
    /// whenever the quotient would not be a positive finite number: coincident
    /// corners (zero-length longest edge) or a non-positive configured side
    /// length. A [`ScaleFactor`] handed out here is always positive and
    /// finite.
    pub fn estimate(&self, corners: &FiducialCorners) -> Result<ScaleFactor, MeasureFailure> {
        let edges = corners.edge_lengths();
        let longest = edges.iter().fold(0.0f32, |acc, &e| acc.max(e)) as f64;
        debug!("fiducial edge lengths {:?} px, longest {:.2} px", edges, longest);

        let scale = self.side_cm / longest;
        if !(scale.is_finite() && scale > 0.0) {
            return Err(MeasureFailure::DegenerateScale);
        }

        let scale = ScaleFactor(scale);
        info!("✅ Escala detectada: {:.4} cm/pixel", scale.cm_per_px());
        Ok(scale)
    }
}

impl Default for ScaleEstimator {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_CM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn square_corners(origin: Point, side: f32) -> FiducialCorners {
        FiducialCorners::new([
            Point::new(origin.x, origin.y),
            Point::new(origin.x + side, origin.y),
            Point::new(origin.x + side, origin.y + side),
            Point::new(origin.x, origin.y + side),
        ])
    }

    #[test]
    fn perfect_square_gives_exact_scale() {
        let estimator = ScaleEstimator::new(3.6);
        let corners = square_corners(Point::new(10.0, 10.0), 100.0);

        let scale = estimator.estimate(&corners).unwrap();
        assert_eq!(scale.cm_per_px(), 3.6 / 100.0);
    }

    #[test]
    fn scale_is_invariant_to_corner_rotation() {
        let estimator = ScaleEstimator::new(3.6);
        let p = [
            Point::new(10.0, 10.0),
            Point::new(110.0, 10.0),
            Point::new(110.0, 110.0),
            Point::new(10.0, 110.0),
        ];

        let a = estimator
            .estimate(&FiducialCorners::new([p[0], p[1], p[2], p[3]]))
            .unwrap();
        let b = estimator
            .estimate(&FiducialCorners::new([p[1], p[2], p[3], p[0]]))
            .unwrap();
        let c = estimator
            .estimate(&FiducialCorners::new([p[2], p[3], p[0], p[1]]))
            .unwrap();

        assert_eq!(a.cm_per_px(), b.cm_per_px());
        assert_eq!(b.cm_per_px(), c.cm_per_px());
    }

    #[test]
    fn skewed_quad_uses_longest_edge() {
        let estimator = ScaleEstimator::new(3.6);
        // 80px and 100px edges; the 100px one should win.
        let corners = FiducialCorners::new([
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 80.0),
            Point::new(0.0, 80.0),
        ]);

        let scale = estimator.estimate(&corners).unwrap();
        assert!((scale.cm_per_px() - 0.036).abs() < 1e-12);
    }

    #[test]
    fn test_coincident_corners_are_degenerate() {
        let estimator = ScaleEstimator::default();
        let p = Point::new(42.0, 42.0);
        let corners = FiducialCorners::new([p, p, p, p]);

        assert_eq!(
            estimator.estimate(&corners),
            Err(MeasureFailure::DegenerateScale)
        );
    }

    #[test]
    fn nonpositive_side_cannot_yield_a_scale() {
        // A zero or negative configured side must be rejected, never handed
        // out as a zero or negative ScaleFactor.
        let corners = square_corners(Point::new(10.0, 10.0), 100.0);

        assert_eq!(
            ScaleEstimator::new(0.0).estimate(&corners),
            Err(MeasureFailure::DegenerateScale)
        );
        assert_eq!(
            ScaleEstimator::new(-3.6).estimate(&corners),
            Err(MeasureFailure::DegenerateScale)
        );
    }
}
