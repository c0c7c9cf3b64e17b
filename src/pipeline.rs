//! The measurement pipeline: locate, calibrate, segment, select, convert.

use image::RgbImage;
use log::debug;
use serde::Serialize;

use crate::annotate::Annotator;
use crate::contour::select_largest;
use crate::error::MeasureFailure;
use crate::fiducial::{FiducialLocator, QrLocator};
use crate::scale::ScaleEstimator;
use crate::segment::RegionSegmenter;
use crate::types::{ColorBand, FiducialCorners, ScaleFactor};

/// One completed measurement.
#[derive(Clone, Serialize)]
pub struct Measurement {
    /// Physical area of the selected region, in cm².
    pub area_cm2: f64,
    /// Calibration derived from the fiducial, in cm per pixel.
    pub scale: ScaleFactor,
    /// Detected fiducial corner coordinates, in pixels.
    pub corners: FiducialCorners,
    /// Enclosed pixel area of the selected contour.
    pub area_px: f64,
    /// Copy of the input with the contour outline and area label drawn on.
    #[serde(skip)]
    pub annotated: RgbImage,
}

/// Runs the five measurement stages over one image.
///
/// Holds only immutable configuration, so a single pipeline value can serve
/// concurrent measurements from multiple threads; nothing is cached or
/// shared between invocations.
pub struct MeasurementPipeline<L = QrLocator> {
    locator: L,
    estimator: ScaleEstimator,
    segmenter: RegionSegmenter,
    annotator: Annotator,
}

impl MeasurementPipeline<QrLocator> {
    /// A pipeline with the QR locator, the leaf-green band, and the default
    /// marker size.
    pub fn new() -> Self {
        Self::with_locator(QrLocator::new())
    }
}

impl Default for MeasurementPipeline<QrLocator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: FiducialLocator> MeasurementPipeline<L> {
    /// A pipeline with defaults around a custom fiducial locator.
    pub fn with_locator(locator: L) -> Self {
        Self {
            locator,
            estimator: ScaleEstimator::default(),
            segmenter: RegionSegmenter::default(),
            annotator: Annotator::new(),
        }
    }

    pub fn with_marker_cm(mut self, side_cm: f64) -> Self {
        self.estimator = ScaleEstimator::new(side_cm);
        self
    }

    pub fn with_band(mut self, band: ColorBand) -> Self {
        self.segmenter = RegionSegmenter::new(band);
        self
    }

    pub fn with_annotator(mut self, annotator: Annotator) -> Self {
        self.annotator = annotator;
        self
    }

    /// Run one measurement over one image.
    ///
    /// Stages run in a fixed order with no retries: a missing fiducial,
    /// degenerate corner geometry, or an empty segmentation each terminate
    /// the measurement with its own [`MeasureFailure`], and there is never a
    /// partial result alongside a failure.
    pub fn measure(&self, image: &RgbImage) -> Result<Measurement, MeasureFailure> {
        let corners = self
            .locator
            .locate(image)
            .ok_or(MeasureFailure::FiducialNotFound)?;
        let scale = self.estimator.estimate(&corners)?;

        let mask = self.segmenter.segment(image);
        let contour = select_largest(&mask).ok_or(MeasureFailure::NoTargetRegion)?;
        debug!(
            "selected contour: {:.0} px enclosed, scale {:.6} cm/px",
            contour.area_px,
            scale.cm_per_px()
        );

        let (annotated, area_cm2) = self.annotator.convert(image, &contour, scale);
        Ok(Measurement {
            area_cm2,
            scale,
            corners,
            area_px: contour.area_px,
            annotated,
        })
    }
}
