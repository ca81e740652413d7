//! Contains the GridMap struct, which relates a width x height pixel
//! rectangle, origin in the upper-left corner, to an axis-aligned
//! rectangle of the complex plane described by its lower-left and
//! upper-right corners.  The real part of a complex number is treated
//! as the x-component and the imaginary part as the y-component, so
//! the same mapping serves the Cartesian curves; a single Complex
//! number is a Point, and no separate Point type is needed.
//!
//! All parameter validation for a render happens here, once, before
//! any sample is evaluated.

use num::Complex;

use errors::ParameterError;

/// Maps between the integral pixel plane and a rectangle of the
/// complex plane.  Row 0 is the top of the image, at the maximum
/// imaginary part; column 0 is the left edge, at the minimum real
/// part.  Pixel (0,0) maps to the upper-left corner exactly.
#[derive(Clone, Debug)]
pub struct GridMap {
    width: usize,
    height: usize,
    /// Lower-left corner of the complex rectangle.
    leftlower: Complex<f64>,
    /// Upper-right corner of the complex rectangle.
    rightupper: Complex<f64>,
    /// Plane units covered by one pixel, horizontally and vertically.
    step: (f64, f64),
}

impl GridMap {
    /// Constructor.  Takes the pixel dimensions and the two corners of
    /// the complex rectangle, and rejects anything a later evaluation
    /// pass could not handle: zero-sized grids, non-finite corners,
    /// and corners in the wrong order.
    pub fn new(
        width: usize,
        height: usize,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<GridMap, ParameterError> {
        if width == 0 || height == 0 {
            return Err(ParameterError::EmptyGrid(width, height));
        }
        let coords = [leftlower.re, leftlower.im, rightupper.re, rightupper.im];
        if coords.iter().any(|c| !c.is_finite()) {
            return Err(ParameterError::NonFiniteCorner);
        }
        if rightupper.re <= leftlower.re || rightupper.im <= leftlower.im {
            return Err(ParameterError::InvertedCorners);
        }

        let step = (
            (rightupper.re - leftlower.re) / (width as f64),
            (rightupper.im - leftlower.im) / (height as f64),
        );

        Ok(GridMap {
            width,
            height,
            leftlower,
            rightupper,
            step,
        })
    }

    /// The number of pixels in the grid, which is also the length of
    /// every buffer mapped over it.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// A constructed GridMap always has at least one pixel.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Pixel columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pixel rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Plane units covered by one pixel, horizontally and vertically.
    pub fn step(&self) -> (f64, f64) {
        self.step
    }

    /// Given a pixel's column and row, the complex number at the
    /// upper-left corner of that pixel's cell.
    pub fn pixel_to_point(&self, column: usize, row: usize) -> Complex<f64> {
        Complex::new(
            self.leftlower.re + (column as f64) * self.step.0,
            self.rightupper.im - (row as f64) * self.step.1,
        )
    }

    /// Given a point on the complex plane, its fractional (column,
    /// row) pixel coordinates.  Unclamped: points outside the
    /// rectangle map to coordinates outside `0..width` / `0..height`.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> (f64, f64) {
        (
            (point.re - self.leftlower.re) / self.step.0,
            (self.rightupper.im - point.im) / self.step.1,
        )
    }

    /// Given a point on the complex plane, the row-major offset of the
    /// pixel it falls in, or None if it lies outside the rectangle.
    pub fn point_to_offset(&self, point: &Complex<f64>) -> Option<usize> {
        let (left, top) = self.point_to_pixel(point);
        // The positive form sends NaN coordinates to None.
        if left >= 0.0 && left < (self.width as f64) && top >= 0.0 && top < (self.height as f64) {
            Some((top as usize) * self.width + (left as usize))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gridmap_fails_on_bad_shape() {
        let gm = GridMap::new(4, 4, Complex::new(-1.0, 1.0), Complex::new(1.0, -1.0));
        assert_eq!(gm.unwrap_err(), ParameterError::InvertedCorners);
    }

    #[test]
    fn gridmap_fails_on_zero_size() {
        let gm = GridMap::new(0, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert_eq!(gm.unwrap_err(), ParameterError::EmptyGrid(0, 4));
    }

    #[test]
    fn gridmap_fails_on_non_finite_corner() {
        let gm = GridMap::new(
            4,
            4,
            Complex::new(::std::f64::NEG_INFINITY, -1.0),
            Complex::new(1.0, 1.0),
        );
        assert_eq!(gm.unwrap_err(), ParameterError::NonFiniteCorner);
    }

    #[test]
    fn gridmap_passes_on_good_shape() {
        let gm = GridMap::new(4, 4, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0));
        assert!(gm.is_ok());
    }

    #[test]
    fn pixel_to_point_walks_top_down() {
        let gm = GridMap::new(4, 4, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(gm.pixel_to_point(0, 0), Complex::new(-2.0, 2.0));
        assert_eq!(gm.pixel_to_point(2, 2), Complex::new(0.0, 0.0));
        assert_eq!(gm.pixel_to_point(4, 4), Complex::new(2.0, -2.0));
    }

    #[test]
    fn pixel_to_point_on_large_mixed_planes() {
        let gm = GridMap::new(640, 640, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(gm.pixel_to_point(320, 320), Complex::new(0.0, 0.0));
        assert_eq!(gm.pixel_to_point(480, 0), Complex::new(1.0, 2.0));
    }

    #[test]
    fn point_to_offset_round_trips_pixel_corners() {
        let gm = GridMap::new(8, 8, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        for row in 0..8 {
            for column in 0..8 {
                // Nudge inward so the corner lands inside its own cell.
                let p = gm.pixel_to_point(column, row) + Complex::new(0.01, -0.01);
                assert_eq!(gm.point_to_offset(&p), Some(row * 8 + column));
            }
        }
    }

    #[test]
    fn point_to_offset_rejects_points_outside() {
        let gm = GridMap::new(8, 8, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        assert_eq!(gm.point_to_offset(&Complex::new(-2.5, 0.0)), None);
        assert_eq!(gm.point_to_offset(&Complex::new(0.0, 2.5)), None);
        // The far corner itself is out: cells are half-open.
        assert_eq!(gm.point_to_offset(&Complex::new(2.0, -2.0)), None);
        // NaN is nowhere.
        assert_eq!(
            gm.point_to_offset(&Complex::new(::std::f64::NAN, 0.0)),
            None
        );
    }

    #[test]
    fn len_counts_every_pixel() {
        let gm = GridMap::new(5, 3, Complex::new(0.0, 0.0), Complex::new(1.0, 1.0)).unwrap();
        assert_eq!(gm.len(), 15);
        assert!(!gm.is_empty());
    }
}
