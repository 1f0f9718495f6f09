//! Geographic bounding boxes and raster pixel windows

use serde::{Deserialize, Serialize};

/// Rectangular extent in a coordinate reference system.
///
/// Coordinates are interpreted in the CRS of the raster the box is applied
/// to. No `min < max` validation is performed; a malformed box propagates
/// into an empty pixel window downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Extent in the X direction
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent in the Y direction
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if two boxes overlap
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }
}

/// A rectangular region of a raster in pixel coordinates.
///
/// Offsets may be negative when the originating bounding box extends past
/// the raster origin; [`PixelWindow::intersect_extent`] clamps the window
/// to a raster's actual extent before any data access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    /// Column of the upper-left corner
    pub col_off: isize,
    /// Row of the upper-left corner
    pub row_off: isize,
    /// Width in pixels
    pub cols: usize,
    /// Height in pixels
    pub rows: usize,
}

impl PixelWindow {
    pub fn new(col_off: isize, row_off: isize, cols: usize, rows: usize) -> Self {
        Self {
            col_off,
            row_off,
            cols,
            rows,
        }
    }

    /// Window covering a full raster of the given dimensions
    pub fn full(cols: usize, rows: usize) -> Self {
        Self::new(0, 0, cols, rows)
    }

    /// Whether the window covers no pixels
    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Clamp the window to a raster extent of `cols` x `rows` pixels.
    ///
    /// A window that lies entirely outside the extent collapses to an
    /// empty window; no error is raised.
    pub fn intersect_extent(&self, cols: usize, rows: usize) -> PixelWindow {
        let col0 = self.col_off.max(0);
        let row0 = self.row_off.max(0);
        let col1 = self.col_off.saturating_add_unsigned(self.cols).min(cols as isize);
        let row1 = self.row_off.saturating_add_unsigned(self.rows).min(rows as isize);

        PixelWindow {
            col_off: col0,
            row_off: row0,
            cols: (col1 - col0).max(0) as usize,
            rows: (row1 - row0).max(0) as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_intersects() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        let c = BoundingBox::new(20.0, 20.0, 30.0, 30.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_window_intersect_inside() {
        let w = PixelWindow::new(2, 3, 4, 5);
        assert_eq!(w.intersect_extent(100, 100), w);
    }

    #[test]
    fn test_window_intersect_clamps_origin() {
        let w = PixelWindow::new(-3, -2, 10, 10);
        let clamped = w.intersect_extent(100, 100);
        assert_eq!(clamped, PixelWindow::new(0, 0, 7, 8));
    }

    #[test]
    fn test_window_intersect_clamps_far_edge() {
        let w = PixelWindow::new(95, 98, 10, 10);
        let clamped = w.intersect_extent(100, 100);
        assert_eq!(clamped, PixelWindow::new(95, 98, 5, 2));
    }

    #[test]
    fn test_window_outside_extent_is_empty() {
        let w = PixelWindow::new(200, 200, 10, 10);
        assert!(w.intersect_extent(100, 100).is_empty());
    }
}
