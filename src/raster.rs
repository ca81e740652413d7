//! Rasterizes the vector output of the curve generators onto a grid.
//!
//! A Canvas owns a GridMap and a buffer of u32 values shaped like it.
//! Segments are stepped at sub-pixel resolution and every touched cell
//! takes the given value; triangles are filled by scanning their
//! bounding box with an edge-function inside test.  The value written
//! is whatever the palette later gives meaning to, a flat intensity or
//! a color class.

use num::Complex;

use curves::{Segment, Triangle};
use grid::GridMap;

/// A value buffer shaped like a GridMap, with plotting operations.
pub struct Canvas {
    grid: GridMap,
    values: Vec<u32>,
}

impl Canvas {
    /// A cleared canvas over the given grid.
    pub fn new(grid: GridMap) -> Canvas {
        let values = vec![0 as u32; grid.len()];
        Canvas { grid, values }
    }

    /// The grid this canvas rasterizes onto.
    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    /// The raw value buffer, row-major.
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// Consumes the canvas, yielding the value buffer.
    pub fn into_values(self) -> Vec<u32> {
        self.values
    }

    /// Resets every cell to zero.
    pub fn clear(&mut self) {
        for v in self.values.iter_mut() {
            *v = 0;
        }
    }

    /// Writes `value` into the cell under `point`, if any.  Points
    /// outside the grid rectangle fall away silently, the same way an
    /// orbit wandering off a plot does.
    pub fn plot(&mut self, point: Complex<f64>, value: u32) {
        if let Some(offset) = self.grid.point_to_offset(&point) {
            self.values[offset] = value;
        }
    }

    /// Draws a segment by stepping it at half-pixel resolution and
    /// plotting every touched cell.
    pub fn draw_segment(&mut self, segment: &Segment, value: u32) {
        let Segment(a, b) = *segment;
        let span = b - a;
        let (hstep, vstep) = self.grid.step();
        let columns = (span.re / hstep).abs();
        let rows = (span.im / vstep).abs();
        // Twice the pixel span in the dominant direction, so no cell
        // on the way is skipped over.
        let steps = (columns.max(rows).ceil() as usize) * 2 + 1;
        for i in 0..=steps {
            let t = (i as f64) / (steps as f64);
            self.plot(a + span * t, value);
        }
    }

    /// Draws an open polyline through the given points.
    pub fn draw_polyline(&mut self, points: &[Complex<f64>], value: u32) {
        for pair in points.windows(2) {
            self.draw_segment(&Segment(pair[0], pair[1]), value);
        }
    }

    /// Fills a triangle: every cell whose center lies inside (or on
    /// the boundary of) the triangle takes `value`.  Only the
    /// triangle's bounding box is scanned, so a gasket of thousands of
    /// small triangles stays affordable.
    pub fn fill_triangle(&mut self, triangle: &Triangle, value: u32) {
        let Triangle(a, b, c) = *triangle;
        let (first_column, first_row, last_column, last_row) = match self.pixel_bounds(&[a, b, c])
        {
            Some(bounds) => bounds,
            None => return,
        };
        for row in first_row..=last_row {
            for column in first_column..=last_column {
                let corner = self.grid.pixel_to_point(column, row);
                let next = self.grid.pixel_to_point(column + 1, row + 1);
                let center = (corner + next) / 2.0;
                if inside(a, b, c, center) {
                    self.values[row * self.grid.width() + column] = value;
                }
            }
        }
    }

    /// The pixel bounding box of a point set, clamped to the grid, or
    /// None if the whole box lies outside.
    fn pixel_bounds(
        &self,
        points: &[Complex<f64>],
    ) -> Option<(usize, usize, usize, usize)> {
        let mut min = (::std::f64::INFINITY, ::std::f64::INFINITY);
        let mut max = (::std::f64::NEG_INFINITY, ::std::f64::NEG_INFINITY);
        for point in points {
            let (column, row) = self.grid.point_to_pixel(point);
            min = (min.0.min(column), min.1.min(row));
            max = (max.0.max(column), max.1.max(row));
        }
        let width = self.grid.width() as f64;
        let height = self.grid.height() as f64;
        if max.0 < 0.0 || max.1 < 0.0 || min.0 >= width || min.1 >= height {
            return None;
        }
        Some((
            min.0.max(0.0).floor() as usize,
            min.1.max(0.0).floor() as usize,
            (max.0.min(width - 1.0).floor() as usize).min(self.grid.width() - 1),
            (max.1.min(height - 1.0).floor() as usize).min(self.grid.height() - 1),
        ))
    }
}

/// Signed parallelogram area of (b - a) x (p - a); zero on the line
/// through a and b.
fn edge(a: Complex<f64>, b: Complex<f64>, p: Complex<f64>) -> f64 {
    (b.re - a.re) * (p.im - a.im) - (b.im - a.im) * (p.re - a.re)
}

fn inside(a: Complex<f64>, b: Complex<f64>, c: Complex<f64>, p: Complex<f64>) -> bool {
    let e1 = edge(a, b, p);
    let e2 = edge(b, c, p);
    let e3 = edge(c, a, p);
    (e1 >= 0.0 && e2 >= 0.0 && e3 >= 0.0) || (e1 <= 0.0 && e2 <= 0.0 && e3 <= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use curves::sierpinski_corners;
    use grid::GridMap;

    fn unit_canvas(side: usize) -> Canvas {
        Canvas::new(
            GridMap::new(side, side, Complex::new(0.0, 0.0), Complex::new(1.0, 1.0)).unwrap(),
        )
    }

    #[test]
    fn plot_lands_in_the_right_cell() {
        let mut canvas = unit_canvas(4);
        canvas.plot(Complex::new(0.1, 0.9), 7);
        // Top-left cell of a 4x4 grid.
        assert_eq!(canvas.values()[0], 7);
        assert_eq!(canvas.values().iter().filter(|&&v| v != 0).count(), 1);
    }

    #[test]
    fn plot_outside_is_silent() {
        let mut canvas = unit_canvas(4);
        canvas.plot(Complex::new(2.0, 2.0), 7);
        assert!(canvas.values().iter().all(|&v| v == 0));
    }

    #[test]
    fn segments_touch_both_endpoints_and_the_cells_between() {
        let mut canvas = unit_canvas(8);
        canvas.draw_segment(
            &Segment(Complex::new(0.05, 0.05), Complex::new(0.95, 0.05)),
            1,
        );
        // The entire bottom row is lit.
        let bottom = &canvas.values()[7 * 8..];
        assert!(bottom.iter().all(|&v| v == 1));
    }

    #[test]
    fn diagonal_segments_leave_no_gaps() {
        let mut canvas = unit_canvas(16);
        canvas.draw_segment(
            &Segment(Complex::new(0.01, 0.01), Complex::new(0.99, 0.99)),
            1,
        );
        // Every row and every column is touched at least once.
        for i in 0..16 {
            let row = &canvas.values()[i * 16..(i + 1) * 16];
            assert!(row.iter().any(|&v| v == 1), "row {} empty", i);
            assert!(canvas.values().iter().skip(i).step_by(16).any(|&v| v == 1));
        }
    }

    #[test]
    fn triangle_fill_covers_the_centroid_and_spares_the_corners() {
        let mut canvas = unit_canvas(16);
        let [a, b, c] = sierpinski_corners();
        canvas.fill_triangle(&Triangle(a, b, c), 1);
        let centroid = (a + b + c) / 3.0;
        let offset = canvas.grid().point_to_offset(&centroid).unwrap();
        assert_eq!(canvas.values()[offset], 1);
        // The top corners of the square grid lie outside the triangle.
        assert_eq!(canvas.values()[0], 0);
        assert_eq!(canvas.values()[15], 0);
    }

    #[test]
    fn clear_resets_every_cell() {
        let mut canvas = unit_canvas(4);
        canvas.draw_polyline(
            &[
                Complex::new(0.1, 0.1),
                Complex::new(0.9, 0.1),
                Complex::new(0.9, 0.9),
            ],
            3,
        );
        assert!(canvas.values().iter().any(|&v| v != 0));
        canvas.clear();
        assert!(canvas.values().iter().all(|&v| v == 0));
    }
}
