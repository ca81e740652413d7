#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Fractal image and animation renderer
//!
//! A small family of classic fractal and recursive curves, each computed
//! by a pure function and rasterized onto a pixel grid: the Mandelbrot
//! and Julia sets by escape-time iteration, the Koch snowflake and
//! Sierpinski triangle by geometric subdivision, and the Takagi,
//! Weierstrass, and polar "blossom" curves by direct evaluation.
//!
//! The escape-time evaluator is the heart of the crate.  A point on the
//! complex plane is fed through the quadratic recurrence z = z² + c
//! until its magnitude leaves a divergence radius; the number of steps
//! that took is the point's "velocity," and velocity is what gets
//! colored.  Points that never leave within the iteration budget are
//! reported with a sentinel equal to the budget itself.
//!
//! Every evaluation is independent of every other, so grids are mapped
//! in parallel with scoped threads pulling rows off a shared queue.
//! The resulting count buffers are pushed through a palette and encoded
//! as PNG or PNM stills, or as animated GIFs one pure frame at a time.

extern crate crossbeam;
extern crate failure;
extern crate gif;
extern crate image;
extern crate itertools;
extern crate num;
extern crate rand;

pub mod anim;
pub mod cli;
pub mod curves;
pub mod errors;
pub mod escape;
pub mod grid;
pub mod output;
pub mod palette;
pub mod raster;
pub mod render;

pub use errors::ParameterError;
pub use escape::{escape_time, Recurrence};
pub use grid::GridMap;
pub use render::EscapeRenderer;
