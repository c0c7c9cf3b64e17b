//! Contour extraction and enclosed-area measurement on binary masks.

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use log::debug;

use crate::types::Point;

/// The boundary of one connected foreground region, with its enclosed
/// pixel area.
#[derive(Debug, Clone)]
pub struct Contour {
    /// Boundary pixel coordinates, in traversal order.
    pub points: Vec<Point>,
    /// Number of pixels the boundary encloses, boundary included.
    pub area_px: f64,
}

/// Extract external contours from a mask and select the one with the
/// greatest enclosed pixel area.
///
/// Hole borders are ignored: only outer boundaries are candidates, so a
/// region's area includes any interior holes (the closing pass in
/// segmentation is expected to have filled them). Returns `None` when the
/// mask has no foreground at all. Ties keep the first contour in scan order.
pub fn select_largest(mask: &GrayImage) -> Option<Contour> {
    let mut candidates = 0usize;
    let mut best: Option<Contour> = None;

    for found in find_contours::<i32>(mask) {
        if !matches!(found.border_type, BorderType::Outer) {
            continue;
        }
        candidates += 1;

        let points: Vec<Point> = found
            .points
            .iter()
            .map(|p| Point::new(p.x as f32, p.y as f32))
            .collect();
        let area_px = enclosed_area(&points);

        let better = match best {
            Some(ref b) => area_px > b.area_px,
            None => true,
        };
        if better {
            best = Some(Contour { points, area_px });
        }
    }

    match best {
        Some(ref contour) => debug!(
            "{} outer contour(s); selected {} boundary points, {:.0} px enclosed",
            candidates,
            contour.points.len(),
            contour.area_px
        ),
        None => debug!("no outer contours in mask"),
    }

    best
}

/// Area of a polygon by the shoelace formula.
///
/// Winding direction does not matter; fewer than 3 points enclose nothing.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut area = 0.0f64;
    let n = points.len();

    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x as f64 * points[j].y as f64;
        area -= points[j].x as f64 * points[i].y as f64;
    }

    (area / 2.0).abs()
}

/// Pixel count enclosed by a digital boundary, boundary pixels included.
///
/// The boundary runs through pixel centers, so the raw shoelace area misses
/// the boundary ring: by Pick's theorem the pixel count for a simple boundary
/// is the polygon area plus half the boundary points plus one. A filled w×h
/// rectangle therefore measures exactly w·h.
pub fn enclosed_area(points: &[Point]) -> f64 {
    match points.len() {
        0 => 0.0,
        1 => 1.0,
        n => polygon_area(points) + n as f64 / 2.0 + 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn mask_with_rects(width: u32, height: u32, rects: &[(u32, u32, u32, u32)]) -> GrayImage {
        let mut mask = GrayImage::new(width, height);
        for &(x0, y0, w, h) in rects {
            for y in y0..y0 + h {
                for x in x0..x0 + w {
                    mask.put_pixel(x, y, Luma([255u8]));
                }
            }
        }
        mask
    }

    #[test]
    fn test_polygon_area_triangle() {
        let triangle = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 3.0),
        ];
        // Area = 0.5 * base * height = 0.5 * 4 * 3 = 6
        assert!((polygon_area(&triangle) - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_area_square() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        assert!((polygon_area(&square) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_area_degenerate() {
        assert_eq!(polygon_area(&[]), 0.0);
        assert_eq!(polygon_area(&[Point::new(1.0, 1.0)]), 0.0);
        assert_eq!(
            polygon_area(&[Point::new(1.0, 1.0), Point::new(5.0, 5.0)]),
            0.0
        );
    }

    #[test]
    fn enclosed_area_counts_boundary_pixels() {
        // Boundary ring of a filled 4x4 region: 12 points, shoelace 9.
        let mut ring = Vec::new();
        for x in 0..4 {
            ring.push(Point::new(x as f32, 0.0));
        }
        for y in 1..4 {
            ring.push(Point::new(3.0, y as f32));
        }
        for x in (0..3).rev() {
            ring.push(Point::new(x as f32, 3.0));
        }
        for y in (1..3).rev() {
            ring.push(Point::new(0.0, y as f32));
        }

        assert_eq!(ring.len(), 12);
        assert!((polygon_area(&ring) - 9.0).abs() < 1e-9);
        assert!((enclosed_area(&ring) - 16.0).abs() < 1e-9);
    }

    #[test]
    fn enclosed_area_of_tiny_regions() {
        assert_eq!(enclosed_area(&[]), 0.0);
        assert_eq!(enclosed_area(&[Point::new(7.0, 7.0)]), 1.0);
        assert_eq!(
            enclosed_area(&[Point::new(7.0, 7.0), Point::new(8.0, 7.0)]),
            2.0
        );
    }

    #[test]
    fn empty_mask_selects_nothing() {
        let mask = GrayImage::new(32, 32);
        assert!(select_largest(&mask).is_none());
    }

    #[test]
    fn single_blob_is_measured_exactly() {
        let mask = mask_with_rects(64, 64, &[(10, 12, 20, 15)]);
        let contour = select_largest(&mask).unwrap();
        assert!((contour.area_px - (20.0 * 15.0)).abs() < 1e-9);
    }

    #[test]
    fn test_larger_of_two_blobs_wins() {
        // A1 = 36 px, A2 = 100 px
        let mask = mask_with_rects(64, 64, &[(4, 4, 6, 6), (30, 30, 10, 10)]);
        let contour = select_largest(&mask).unwrap();
        assert!((contour.area_px - 100.0).abs() < 1e-9);

        // All selected boundary points belong to the larger blob.
        for p in &contour.points {
            assert!(p.x >= 30.0 && p.x <= 39.0, "point {:?} outside blob", p);
            assert!(p.y >= 30.0 && p.y <= 39.0, "point {:?} outside blob", p);
        }
    }
}
