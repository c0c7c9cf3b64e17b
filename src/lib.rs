//! # foliar
//!
//! Leaf area measurement from a single photo with a QR-code scale reference.
//!
//! Photograph a leaf on a plain background next to a printed QR code of known
//! physical size, and this crate measures the leaf's real-world area:
//! - **Calibration**: the QR code's detected corner geometry yields a
//!   centimeters-per-pixel scale factor
//! - **Segmentation**: an HSV color band picks out leaf-green pixels,
//!   cleaned by morphological closing and opening
//! - **Measurement**: the largest external contour's enclosed pixel area,
//!   converted to cm² through the squared scale
//! - **Annotation**: a copy of the photo with the contour outlined and an
//!   `Área da folha: … cm²` label drawn on
//!
//! ## Pipeline
//!
//! 1. Locate the fiducial marker ([`FiducialLocator`] / [`QrLocator`])
//! 2. Estimate the scale from its longest edge ([`ScaleEstimator`])
//! 3. Threshold against the [`ColorBand`] and clean the mask
//!    ([`RegionSegmenter`])
//! 4. Select the largest external contour ([`select_largest`])
//! 5. Convert to cm² and annotate ([`Annotator`])
//!
//! Each stage either advances or ends the measurement with one
//! [`MeasureFailure`]; there is no partial success.
//!
//! ## Quick Start
//!
//! ```rust
//! use foliar::MeasurementPipeline;
//! use image::{Rgb, RgbImage};
//!
//! // In practice: image::open("folha.jpg")?.to_rgb8()
//! let photo = RgbImage::from_pixel(640, 480, Rgb([255, 255, 255]));
//!
//! let pipeline = MeasurementPipeline::new();
//! match pipeline.measure(&photo) {
//!     Ok(m) => println!("Área da folha: {:.2} cm²", m.area_cm2),
//!     Err(reason) => eprintln!("{}", reason),
//! }
//! ```
//!
//! ## Custom detectors and bands
//!
//! The marker detector sits behind the [`FiducialLocator`] trait, so the
//! calibration math is independent of the detection technique:
//!
//! ```rust
//! use foliar::{FiducialCorners, FiducialLocator, MeasurementPipeline, Point, RgbImage};
//!
//! struct SheetCorners;
//!
//! impl FiducialLocator for SheetCorners {
//!     fn locate(&self, _image: &RgbImage) -> Option<FiducialCorners> {
//!         // e.g. corners from an ArUco detector, or a fixed camera rig
//!         Some(FiducialCorners::new([
//!             Point::new(10.0, 10.0),
//!             Point::new(110.0, 10.0),
//!             Point::new(110.0, 110.0),
//!             Point::new(10.0, 110.0),
//!         ]))
//!     }
//! }
//!
//! let pipeline = MeasurementPipeline::with_locator(SheetCorners).with_marker_cm(3.6);
//! ```
//!
//! The color band and marker size are plain configuration values; nothing is
//! read from ambient state, so pipelines for different bands can coexist and
//! run in parallel.

mod annotate;
mod contour;
mod error;
mod fiducial;
mod pipeline;
mod scale;
mod segment;
mod types;

pub use annotate::{label_text, Annotator};
pub use contour::{enclosed_area, polygon_area, select_largest, Contour};
pub use error::{Error, MeasureFailure, Result};
pub use fiducial::{FiducialLocator, QrLocator};
pub use pipeline::{Measurement, MeasurementPipeline};
pub use scale::{ScaleEstimator, DEFAULT_MARKER_CM};
pub use segment::{hsv_from_rgb, RegionSegmenter};
pub use types::{ColorBand, FiducialCorners, Hsv, Point, ScaleFactor};

pub use image::{GrayImage, RgbImage};
