use serde::{Deserialize, Serialize};

/// A 2D point with floating-point pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// The four corner coordinates of one detected fiducial marker, in the
/// detector's native ordering.
///
/// Either all four corners are known or the marker was not detected at all;
/// there is no partial form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiducialCorners {
    pub points: [Point; 4],
}

impl FiducialCorners {
    pub const fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    /// Euclidean lengths of the quadrilateral's four edges, in pixels:
    /// 0→1, 1→2, 2→3, 3→0.
    pub fn edge_lengths(&self) -> [f32; 4] {
        let p = &self.points;
        [
            p[0].distance(&p[1]),
            p[1].distance(&p[2]),
            p[2].distance(&p[3]),
            p[3].distance(&p[0]),
        ]
    }
}

/// A color in 8-bit HSV, hue on the half-angle 0–180 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: u8,
    pub s: u8,
    pub v: u8,
}

impl Hsv {
    pub const fn new(h: u8, s: u8, v: u8) -> Self {
        Self { h, s, v }
    }
}

/// An inclusive HSV range classifying pixels as target-object color.
///
/// Process configuration, never derived from the image being measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorBand {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl ColorBand {
    pub const fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    /// The default band for healthy leaf green.
    pub const fn leaf_green() -> Self {
        Self::new(Hsv::new(35, 55, 50), Hsv::new(90, 255, 255))
    }

    /// True iff all three components fall inside the band, bounds included.
    pub fn contains(&self, color: Hsv) -> bool {
        self.lower.h <= color.h
            && color.h <= self.upper.h
            && self.lower.s <= color.s
            && color.s <= self.upper.s
            && self.lower.v <= color.v
            && color.v <= self.upper.v
    }
}

impl Default for ColorBand {
    fn default() -> Self {
        Self::leaf_green()
    }
}

/// Physical length per pixel, in centimeters. Derived per image; never
/// cached across images, since camera distance and zoom vary per photo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleFactor(pub f64);

impl ScaleFactor {
    pub fn cm_per_px(self) -> f64 {
        self.0
    }
}
