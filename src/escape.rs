// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time evaluator.
//!
//! Both the Mandelbrot and Julia sets are drawn by iterating the same
//! quadratic recurrence, z = z² + c, and counting the steps until the
//! orbit's magnitude leaves a divergence radius.  The two sets differ
//! only in where the orbit starts and what the constant is: for the
//! Mandelbrot the orbit starts at zero and the grid sample is the
//! constant; for a Julia the orbit starts at the grid sample and the
//! constant is fixed for the whole picture.
//!
//! Conventions, applied uniformly: escaped samples report the 0-based
//! count of completed steps, in `[0, limit)`; a sample whose orbit
//! never escapes within the budget reports `limit` itself.  The escape
//! test is strict, on squared magnitude: `z.norm_sqr() > radius²`.
//! The default radius is 2.0, the tight bound for this family; any
//! orbit that reaches magnitude 2 and is not exactly on the boundary
//! circle is gone for good, and a larger radius only shifts where in
//! the escape the count is taken.

use num::Complex;

/// The divergence radius used when nothing else is asked for.
pub const DEFAULT_RADIUS: f64 = 2.0;

/// Selects how a grid sample seeds the recurrence: which value the
/// orbit starts from, and which value is added back in each step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Recurrence {
    /// Orbit starts at zero; the sample is the additive constant.
    Mandelbrot,
    /// Orbit starts at the sample; the constant is fixed externally.
    Julia(Complex<f64>),
}

impl Recurrence {
    /// The (initial orbit value, additive constant) pair for a sample.
    pub fn seed(&self, sample: Complex<f64>) -> (Complex<f64>, Complex<f64>) {
        match *self {
            Recurrence::Mandelbrot => (Complex::new(0.0, 0.0), sample),
            Recurrence::Julia(c) => (sample, c),
        }
    }
}

/// Counts the iterations of z = z² + c needed for the orbit of `sample`
/// to exceed `radius` in magnitude, up to `limit`.  Returns the 0-based
/// step count if the orbit escaped, or `limit` if it never did.
///
/// Pure and total: a `limit` of zero returns the sentinel immediately,
/// and non-finite orbit values fail the bounded test and classify as
/// escaped, which is what an overflowed orbit is.
pub fn escape_time(rule: Recurrence, sample: Complex<f64>, limit: usize, radius: f64) -> usize {
    let (mut z, c) = rule.seed(sample);
    let bound = radius * radius;
    for i in 0..limit {
        z = z * z + c;
        if !(z.norm_sqr() <= bound) {
            return i;
        }
    }
    limit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mandelbrot_escapes_immediately_outside_the_radius() {
        // First step takes z from 0 to the sample itself, so anything
        // beyond the radius is counted out at step 0.
        for s in &[
            Complex::new(3.0, 0.0),
            Complex::new(0.0, -2.5),
            Complex::new(2.0, 2.0),
        ] {
            assert_eq!(escape_time(Recurrence::Mandelbrot, *s, 50, DEFAULT_RADIUS), 0);
        }
    }

    #[test]
    fn origin_never_escapes() {
        let origin = Complex::new(0.0, 0.0);
        assert_eq!(escape_time(Recurrence::Mandelbrot, origin, 1, DEFAULT_RADIUS), 1);
        assert_eq!(escape_time(Recurrence::Mandelbrot, origin, 1000, DEFAULT_RADIUS), 1000);
    }

    #[test]
    fn minus_one_is_in_the_set() {
        // -1 sits at the center of the period-2 bulb; its orbit cycles
        // 0, -1, 0, -1 forever.
        let s = Complex::new(-1.0, 0.0);
        assert_eq!(escape_time(Recurrence::Mandelbrot, s, 50, DEFAULT_RADIUS), 50);
    }

    #[test]
    fn one_plus_i_escapes_fast() {
        let s = Complex::new(1.0, 1.0);
        let n = escape_time(Recurrence::Mandelbrot, s, 50, DEFAULT_RADIUS);
        assert!(n <= 3, "expected a small count, got {}", n);
    }

    #[test]
    fn count_never_exceeds_the_limit() {
        for limit in &[1usize, 7, 64] {
            for re in -8i32..8 {
                for im in -8i32..8 {
                    let s = Complex::new(f64::from(re) * 0.33, f64::from(im) * 0.33);
                    assert!(escape_time(Recurrence::Mandelbrot, s, *limit, DEFAULT_RADIUS) <= *limit);
                }
            }
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let s = Complex::new(-0.743_643_887_037_151, 0.131_825_904_205_33);
        let first = escape_time(Recurrence::Mandelbrot, s, 500, DEFAULT_RADIUS);
        let second = escape_time(Recurrence::Mandelbrot, s, 500, DEFAULT_RADIUS);
        assert_eq!(first, second);
    }

    #[test]
    fn raising_the_limit_cannot_change_an_escaped_count() {
        let s = Complex::new(0.4, 0.4);
        let n = escape_time(Recurrence::Mandelbrot, s, 100, DEFAULT_RADIUS);
        assert!(n < 100, "sample must escape for this test to mean anything");
        assert_eq!(escape_time(Recurrence::Mandelbrot, s, 1000, DEFAULT_RADIUS), n);
    }

    #[test]
    fn raising_the_limit_keeps_a_bounded_sample_bounded() {
        let s = Complex::new(-0.1, 0.1);
        assert_eq!(escape_time(Recurrence::Mandelbrot, s, 100, DEFAULT_RADIUS), 100);
        assert_eq!(escape_time(Recurrence::Mandelbrot, s, 400, DEFAULT_RADIUS), 400);
    }

    #[test]
    fn julia_on_the_real_axis_stays_bounded() {
        // c = -0.8 has an attracting 2-cycle on the real axis, and the
        // seed -0.8 falls straight into its basin: the orbit oscillates
        // inside the unit interval and never reaches magnitude 4.
        let c = Complex::new(-0.8, 0.0);
        assert_eq!(escape_time(Recurrence::Julia(c), c, 100, 4.0), 100);
    }

    #[test]
    fn julia_seeds_the_orbit_at_the_sample() {
        // A sample already far outside dies on the first step even
        // though the constant is tame.
        let c = Complex::new(-0.8, 0.0);
        let s = Complex::new(8.0, 0.0);
        assert_eq!(escape_time(Recurrence::Julia(c), s, 100, 4.0), 0);
    }

    #[test]
    fn zero_limit_reports_the_sentinel_without_iterating() {
        let s = Complex::new(9.0, 9.0);
        assert_eq!(escape_time(Recurrence::Mandelbrot, s, 0, DEFAULT_RADIUS), 0);
    }

    #[test]
    fn nan_samples_classify_as_escaped() {
        let s = Complex::new(::std::f64::NAN, 0.0);
        assert_eq!(escape_time(Recurrence::Mandelbrot, s, 50, DEFAULT_RADIUS), 0);
    }
}
