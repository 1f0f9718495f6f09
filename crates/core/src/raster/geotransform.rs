//! Affine geotransformation for rasters

use crate::bounds::{BoundingBox, PixelWindow};
use serde::{Deserialize, Serialize};

/// Affine transformation coefficients for georeferencing rasters.
///
/// Converts between pixel coordinates (col, row) and geographic coordinates
/// (x, y):
/// ```text
/// x = origin_x + col * pixel_width + row * row_rotation
/// y = origin_y + col * col_rotation + row * pixel_height
/// ```
///
/// For north-up images, `row_rotation` and `col_rotation` are 0 and
/// `pixel_height` is negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    /// X coordinate of the upper-left corner
    pub origin_x: f64,
    /// Y coordinate of the upper-left corner
    pub origin_y: f64,
    /// Pixel width (cell size in X direction)
    pub pixel_width: f64,
    /// Pixel height (cell size in Y direction, usually negative)
    pub pixel_height: f64,
    /// Rotation about X axis (usually 0)
    pub row_rotation: f64,
    /// Rotation about Y axis (usually 0)
    pub col_rotation: f64,
}

impl GeoTransform {
    /// Create a new GeoTransform with no rotation (north-up image)
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
            row_rotation: 0.0,
            col_rotation: 0.0,
        }
    }

    /// Create from GDAL-style array
    /// `[origin_x, pixel_width, row_rotation, origin_y, col_rotation, pixel_height]`
    pub fn from_gdal(coeffs: [f64; 6]) -> Self {
        Self {
            origin_x: coeffs[0],
            pixel_width: coeffs[1],
            row_rotation: coeffs[2],
            origin_y: coeffs[3],
            col_rotation: coeffs[4],
            pixel_height: coeffs[5],
        }
    }

    /// Convert to GDAL-style array
    pub fn to_gdal(&self) -> [f64; 6] {
        [
            self.origin_x,
            self.pixel_width,
            self.row_rotation,
            self.origin_y,
            self.col_rotation,
            self.pixel_height,
        ]
    }

    /// Geographic coordinates of a pixel corner.
    ///
    /// Fractional `col`/`row` address positions between pixel corners.
    pub fn pixel_to_geo_corner(&self, col: f64, row: f64) -> (f64, f64) {
        let x = self.origin_x + col * self.pixel_width + row * self.row_rotation;
        let y = self.origin_y + col * self.col_rotation + row * self.pixel_height;
        (x, y)
    }

    /// Geographic coordinates of a pixel center
    pub fn pixel_to_geo(&self, col: usize, row: usize) -> (f64, f64) {
        self.pixel_to_geo_corner(col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Convert geographic coordinates to fractional pixel coordinates.
    ///
    /// Returns `(NAN, NAN)` when the transform is degenerate.
    pub fn geo_to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let det = self.pixel_width * self.pixel_height - self.row_rotation * self.col_rotation;

        if det.abs() < 1e-10 {
            return (f64::NAN, f64::NAN);
        }

        let dx = x - self.origin_x;
        let dy = y - self.origin_y;

        let col = (self.pixel_height * dx - self.row_rotation * dy) / det;
        let row = (-self.col_rotation * dx + self.pixel_width * dy) / det;

        (col, row)
    }

    /// Calculate the bounding box for a raster of given dimensions
    pub fn bounds(&self, cols: usize, rows: usize) -> BoundingBox {
        let (x0, y0) = self.pixel_to_geo_corner(0.0, 0.0);
        let (x1, y1) = self.pixel_to_geo_corner(cols as f64, 0.0);
        let (x2, y2) = self.pixel_to_geo_corner(0.0, rows as f64);
        let (x3, y3) = self.pixel_to_geo_corner(cols as f64, rows as f64);

        BoundingBox::new(
            x0.min(x1).min(x2).min(x3),
            y0.min(y1).min(y2).min(y3),
            x0.max(x1).max(x2).max(x3),
            y0.max(y1).max(y2).max(y3),
        )
    }

    /// Pixel window enclosing a bounding box.
    ///
    /// For a north-up transform, `(min_x, max_y)` maps to the upper-left and
    /// `(max_x, min_y)` to the lower-right window corner. Fractional edges
    /// are rounded outward to the enclosing pixel window. A box with swapped
    /// min/max yields a negative extent, which clamps to an empty window.
    ///
    /// The result is not clipped to any raster extent; callers pass it
    /// through [`PixelWindow::intersect_extent`] before reading.
    pub fn window_from_bounds(&self, bounds: &BoundingBox) -> PixelWindow {
        let (c0, r0) = self.geo_to_pixel(bounds.min_x, bounds.max_y);
        let (c1, r1) = self.geo_to_pixel(bounds.max_x, bounds.min_y);

        let col_off = c0.floor();
        let row_off = r0.floor();
        let cols = (c1.ceil() - col_off).max(0.0);
        let rows = (r1.ceil() - row_off).max(0.0);

        PixelWindow::new(col_off as isize, row_off as isize, cols as usize, rows as usize)
    }

    /// Transform for a window of this raster: same scale and rotation, with
    /// the origin moved to the window's upper-left corner.
    pub fn window_transform(&self, window: &PixelWindow) -> GeoTransform {
        let (origin_x, origin_y) =
            self.pixel_to_geo_corner(window.col_off as f64, window.row_off as f64);
        GeoTransform {
            origin_x,
            origin_y,
            ..*self
        }
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pixel_to_geo_roundtrip() {
        let gt = GeoTransform::new(100.0, 200.0, 10.0, -10.0);

        let (x, y) = gt.pixel_to_geo(5, 10);
        let (col, row) = gt.geo_to_pixel(x, y);

        assert_relative_eq!(col, 5.5, epsilon = 1e-10);
        assert_relative_eq!(row, 10.5, epsilon = 1e-10);
    }

    #[test]
    fn test_bounds() {
        let gt = GeoTransform::new(0.0, 100.0, 1.0, -1.0);
        let b = gt.bounds(100, 100);

        assert_relative_eq!(b.min_x, 0.0, epsilon = 1e-10);
        assert_relative_eq!(b.min_y, 0.0, epsilon = 1e-10);
        assert_relative_eq!(b.max_x, 100.0, epsilon = 1e-10);
        assert_relative_eq!(b.max_y, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_window_from_full_extent() {
        let gt = GeoTransform::new(0.0, 100.0, 1.0, -1.0);
        let b = gt.bounds(100, 80);
        let w = gt.window_from_bounds(&b);
        assert_eq!(w, PixelWindow::new(0, 0, 100, 80));
    }

    #[test]
    fn test_window_from_interior_box() {
        let gt = GeoTransform::new(0.0, 100.0, 1.0, -1.0);
        // x 10..20, y 70..90 -> rows 10..30, cols 10..20
        let w = gt.window_from_bounds(&BoundingBox::new(10.0, 70.0, 20.0, 90.0));
        assert_eq!(w, PixelWindow::new(10, 10, 10, 20));
    }

    #[test]
    fn test_window_rounds_outward() {
        let gt = GeoTransform::new(0.0, 100.0, 1.0, -1.0);
        let w = gt.window_from_bounds(&BoundingBox::new(10.4, 69.5, 20.6, 89.7));
        assert_eq!(w, PixelWindow::new(10, 10, 11, 21));
    }

    #[test]
    fn test_window_from_swapped_box_is_empty() {
        let gt = GeoTransform::new(0.0, 100.0, 1.0, -1.0);
        let w = gt.window_from_bounds(&BoundingBox::new(20.0, 90.0, 10.0, 70.0));
        assert!(w.is_empty());
    }

    #[test]
    fn test_window_transform_shifts_origin() {
        let gt = GeoTransform::new(500.0, 4000.0, 10.0, -10.0);
        let shifted = gt.window_transform(&PixelWindow::new(3, 2, 5, 5));

        assert_relative_eq!(shifted.origin_x, 530.0, epsilon = 1e-10);
        assert_relative_eq!(shifted.origin_y, 3980.0, epsilon = 1e-10);
        assert_relative_eq!(shifted.pixel_width, 10.0, epsilon = 1e-10);
        assert_relative_eq!(shifted.pixel_height, -10.0, epsilon = 1e-10);
    }
}
