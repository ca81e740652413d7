// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Maps the escape-time evaluator over a pixel grid.
//!
//! Every sample is evaluated independently of every other, so the only
//! coordination the parallel path needs is handing out work: spawned
//! workers pull (row, slice) pairs off a shared queue and fill their
//! slice in place.  The slices are disjoint views into one buffer, so
//! there is nothing to merge afterward and any thread count produces
//! the same buffer as the sequential path.

extern crate crossbeam;

use itertools::iproduct;
use std::iter::Enumerate;
use std::slice::ChunksMut;
use std::sync::{Arc, Mutex};

use errors::ParameterError;
use escape::{escape_time, Recurrence};
use grid::GridMap;

type RowQueue<'a> = Arc<Mutex<Enumerate<ChunksMut<'a, u32>>>>;

/// Takes a grid, a recurrence, and an iteration budget, and renders
/// the iteration-count field for every pixel of the grid.  The counts
/// are what a palette turns into color; the sentinel value `limit`
/// marks the samples that never escaped.
#[derive(Debug)]
pub struct EscapeRenderer {
    grid: GridMap,
    rule: Recurrence,
    limit: usize,
    radius: f64,
}

impl EscapeRenderer {
    /// Requires a validated grid, the recurrence variant, the
    /// per-sample iteration budget, and the divergence radius.  The
    /// budget and radius are validated here, once, so the evaluation
    /// loops can assume them.
    pub fn new(
        grid: GridMap,
        rule: Recurrence,
        limit: usize,
        radius: f64,
    ) -> Result<Self, ParameterError> {
        if limit == 0 {
            return Err(ParameterError::ZeroIterationLimit);
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ParameterError::NonPositiveRadius(radius));
        }
        Ok(EscapeRenderer {
            grid,
            rule,
            limit,
            radius,
        })
    }

    /// The grid this renderer samples.
    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    /// The iteration budget, which is also the bounded-orbit sentinel.
    pub fn limit(&self) -> usize {
        self.limit
    }

    fn render_row(&self, row: usize, slice: &mut [u32]) {
        for (column, out) in slice.iter_mut().enumerate() {
            let sample = self.grid.pixel_to_point(column, row);
            *out = escape_time(self.rule, sample, self.limit, self.radius) as u32;
        }
    }

    /// The single-threaded reference implementation.
    pub fn render_single(&self) -> Vec<u32> {
        let mut buffer = vec![0 as u32; self.grid.len()];
        for (row, column) in iproduct!(0..self.grid.height(), 0..self.grid.width()) {
            let sample = self.grid.pixel_to_point(column, row);
            buffer[row * self.grid.width() + column] =
                escape_time(self.rule, sample, self.limit, self.radius) as u32;
        }
        buffer
    }

    /// The multi-threaded render.  Workers loop on a shared row queue
    /// until it runs dry; a thread count of zero is treated as one.
    pub fn render(&self, threads: usize) -> Vec<u32> {
        let threads = if threads == 0 { 1 } else { threads };
        let mut buffer = vec![0 as u32; self.grid.len()];
        {
            let rows: RowQueue =
                Arc::new(Mutex::new(buffer.chunks_mut(self.grid.width()).enumerate()));
            crossbeam::scope(|spawner| {
                for _ in 0..threads {
                    let rows = rows.clone();
                    spawner.spawn(move |_| loop {
                        let next = { rows.lock().unwrap().next() };
                        match next {
                            Some((row, slice)) => {
                                self.render_row(row, slice);
                            }
                            None => {
                                break;
                            }
                        }
                    });
                }
            })
            .unwrap();
        }
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;

    fn square_grid(side: usize) -> GridMap {
        GridMap::new(side, side, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap()
    }

    #[test]
    fn rejects_a_zero_iteration_budget() {
        let r = EscapeRenderer::new(square_grid(4), Recurrence::Mandelbrot, 0, 2.0);
        assert_eq!(r.unwrap_err(), ParameterError::ZeroIterationLimit);
    }

    #[test]
    fn rejects_a_non_positive_radius() {
        let r = EscapeRenderer::new(square_grid(4), Recurrence::Mandelbrot, 10, -2.0);
        assert_eq!(r.unwrap_err(), ParameterError::NonPositiveRadius(-2.0));
    }

    #[test]
    fn one_pixel_grid_renders_its_corner_sample() {
        // The single pixel samples the upper-left corner, -1+i, whose
        // orbit runs -1+i, -1-i, -1+3i and escapes on the third step.
        let grid = GridMap::new(1, 1, Complex::new(-1.0, -1.0), Complex::new(1.0, 1.0)).unwrap();
        let r = EscapeRenderer::new(grid, Recurrence::Mandelbrot, 50, 2.0).unwrap();
        assert_eq!(r.render_single(), vec![2]);
    }

    #[test]
    fn interior_window_is_all_sentinel() {
        let grid =
            GridMap::new(4, 4, Complex::new(-0.2, -0.2), Complex::new(0.2, 0.2)).unwrap();
        let r = EscapeRenderer::new(grid, Recurrence::Mandelbrot, 64, 2.0).unwrap();
        assert!(r.render_single().iter().all(|&n| n == 64));
    }

    #[test]
    fn threaded_render_matches_the_reference() {
        let r = EscapeRenderer::new(square_grid(16), Recurrence::Mandelbrot, 96, 2.0).unwrap();
        let reference = r.render_single();
        for threads in &[1usize, 2, 3, 8] {
            assert_eq!(r.render(*threads), reference);
        }
    }

    #[test]
    fn zero_threads_is_one_thread() {
        let r = EscapeRenderer::new(square_grid(8), Recurrence::Julia(Complex::new(-0.8, 0.156)), 40, 2.0)
            .unwrap();
        assert_eq!(r.render(0), r.render_single());
    }
}
