//! Generators for the non-escape-time objects: the Koch snowflake, the
//! Sierpinski triangle, the Takagi and Weierstrass functions, and the
//! polar "blossom" curve.
//!
//! A complex number doubles as a 2-D point throughout, real part x and
//! imaginary part y.  The subdividing curves are expanded with an
//! explicit work list to a fixed depth rather than by call-stack
//! recursion, so a deep render costs heap, not stack.

use num::Complex;
use std::f64::consts::{FRAC_PI_3, PI};

/// A line segment between two points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Segment(pub Complex<f64>, pub Complex<f64>);

/// A filled triangle described by its three corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle(pub Complex<f64>, pub Complex<f64>, pub Complex<f64>);

/// `count` evenly spaced values from `start` to `stop`, both ends
/// included.  A count below 2 yields just `start`.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![start];
    }
    let step = (stop - start) / ((count - 1) as f64);
    (0..count).map(|i| start + (i as f64) * step).collect()
}

/// Splits a Koch edge into its four children: the first third, the two
/// sides of the bump, and the last third.  The bump apex sits 60
/// degrees clockwise off the edge direction, which points it outward
/// on a counterclockwise-wound snowflake.
pub fn koch_split(a: Complex<f64>, b: Complex<f64>) -> [Segment; 4] {
    let third = (b - a) / 3.0;
    let q = a + third;
    let r = a + third * 2.0;
    // Rotation by -60 degrees, as a unit complex factor.
    let turn = Complex::new(FRAC_PI_3.cos(), -FRAC_PI_3.sin());
    let peak = q + third * turn;
    [
        Segment(a, q),
        Segment(q, peak),
        Segment(peak, r),
        Segment(r, b),
    ]
}

/// Expands one edge of a Koch curve to `depth` subdivisions.  Yields
/// `4^depth` segments.
pub fn koch_segments(a: Complex<f64>, b: Complex<f64>, depth: usize) -> Vec<Segment> {
    let mut work = vec![(Segment(a, b), depth)];
    let mut out = vec![];
    while let Some((segment, d)) = work.pop() {
        if d == 0 {
            out.push(segment);
            continue;
        }
        for child in koch_split(segment.0, segment.1).iter() {
            work.push((*child, d - 1));
        }
    }
    out
}

/// Expands one Koch edge, tagging every emitted segment with a color
/// class.  Each subdivision mints a fresh class shared by its four
/// children, so sibling sub-edges agree and distant ones differ.
/// Classes start at 1 (0 is the background); the second value
/// returned is one past the largest class minted.
pub fn koch_colored(a: Complex<f64>, b: Complex<f64>, depth: usize) -> (Vec<(Segment, u32)>, u32) {
    let mut classes = 2;
    let mut work = vec![(Segment(a, b), depth, 1)];
    let mut out = vec![];
    while let Some((segment, d, class)) = work.pop() {
        if d == 0 {
            out.push((segment, class));
            continue;
        }
        let class = classes;
        classes += 1;
        for child in koch_split(segment.0, segment.1).iter() {
            work.push((*child, d - 1, class));
        }
    }
    (out, classes)
}

/// The three corners of the canonical snowflake triangle.
pub fn snowflake_corners() -> [Complex<f64>; 3] {
    [
        Complex::new(-0.5, -0.288),
        Complex::new(0.5, -0.288),
        Complex::new(0.0, 0.577),
    ]
}

/// The full Koch snowflake at a subdivision depth: the three triangle
/// edges expanded, `3 * 4^depth` segments in all.
pub fn snowflake(depth: usize) -> Vec<Segment> {
    let [p1, p2, p3] = snowflake_corners();
    let mut out = koch_segments(p1, p2, depth);
    out.extend(koch_segments(p2, p3, depth));
    out.extend(koch_segments(p3, p1, depth));
    out
}

/// The full snowflake with class-tagged segments: the three edges are
/// expanded independently and their class ranges concatenated, so no
/// two subdivisions anywhere on the flake share a class.
pub fn snowflake_colored(depth: usize) -> (Vec<(Segment, u32)>, u32) {
    let [p1, p2, p3] = snowflake_corners();
    let mut out = vec![];
    // One past the largest class used so far; 0 stays the background.
    let mut total = 1;
    for &(a, b) in &[(p1, p2), (p2, p3), (p3, p1)] {
        let (tagged, classes) = koch_colored(a, b, depth);
        let offset = total - 1;
        out.extend(tagged.into_iter().map(|(s, class)| (s, class + offset)));
        total += classes - 1;
    }
    (out, total)
}

/// Subdivides a triangle into the Sierpinski gasket at `depth`,
/// yielding the `3^depth` filled triangles that remain.
pub fn sierpinski(
    a: Complex<f64>,
    b: Complex<f64>,
    c: Complex<f64>,
    depth: usize,
) -> Vec<Triangle> {
    let mut work = vec![(Triangle(a, b, c), depth)];
    let mut out = vec![];
    while let Some((Triangle(a, b, c), d)) = work.pop() {
        if d == 0 {
            out.push(Triangle(a, b, c));
            continue;
        }
        let ab = (a + b) / 2.0;
        let bc = (b + c) / 2.0;
        let ca = (c + a) / 2.0;
        work.push((Triangle(a, ab, ca), d - 1));
        work.push((Triangle(ab, b, bc), d - 1));
        work.push((Triangle(ca, bc, c), d - 1));
    }
    out
}

/// The corners of the unit Sierpinski triangle.
pub fn sierpinski_corners() -> [Complex<f64>; 3] {
    [
        Complex::new(0.0, 0.0),
        Complex::new(0.5, 3.0_f64.sqrt() / 2.0),
        Complex::new(1.0, 0.0),
    ]
}

/// Distance from x to the nearest integer, the sawtooth the Takagi
/// function is built from.
pub fn takagi_tooth(x: f64) -> f64 {
    (x - (x + 0.5).floor()).abs()
}

/// The Takagi (blancmange) curve on [0, 1]: the partial sum
/// of tooth(2^i x) / 2^i for i = 0 through `terms` inclusive, sampled
/// at `samples` points.
pub fn takagi_curve(terms: usize, samples: usize) -> Vec<Complex<f64>> {
    linspace(0.0, 1.0, samples)
        .into_iter()
        .map(|x| {
            let mut y = 0.0;
            for i in 0..=terms {
                let scale = (2.0_f64).powi(i as i32);
                y += takagi_tooth(scale * x) / scale;
            }
            Complex::new(x, y)
        })
        .collect()
}

/// The Weierstrass curve on [x0, x1]: the partial sum of
/// cos(b^n pi x) / 2^n for n = 0 up to (not including) `terms`.
pub fn weierstrass_curve(
    b: f64,
    terms: usize,
    samples: usize,
    x0: f64,
    x1: f64,
) -> Vec<Complex<f64>> {
    linspace(x0, x1, samples)
        .into_iter()
        .map(|x| {
            let mut y = 0.0;
            for n in 0..terms {
                y += (b.powi(n as i32) * PI * x).cos() / (2.0_f64).powi(n as i32);
            }
            Complex::new(x, y)
        })
        .collect()
}

/// The two-dimensional Weierstrass field over the square [lo, hi]²:
/// the partial sum of 0.5^n sin(b^n pi x) sin(b^n pi y), sampled on a
/// width x height grid and returned row-major, top row first.
pub fn weierstrass_surface(
    b: f64,
    terms: usize,
    width: usize,
    height: usize,
    lo: f64,
    hi: f64,
) -> Vec<f64> {
    let xs = linspace(lo, hi, width);
    let ys = linspace(hi, lo, height);
    let mut out = Vec::with_capacity(width * height);
    for y in &ys {
        for x in &xs {
            let mut z = 0.0;
            for n in 0..terms {
                let freq = b.powi(n as i32) * PI;
                z += (0.5_f64).powi(n as i32) * (freq * x).sin() * (freq * y).sin();
            }
            out.push(z);
        }
    }
    out
}

/// The polar blossom r = sin(petals * theta * t) for theta in
/// [0, 2 pi], converted to Cartesian points.  The growth parameter `t`
/// runs from 0 (a bare point) to 1 (the full flower).
pub fn blossom_curve(petals: f64, t: f64, samples: usize) -> Vec<Complex<f64>> {
    linspace(0.0, 2.0 * PI, samples)
        .into_iter()
        .map(|theta| {
            let r = (petals * theta * t).sin();
            Complex::new(r * theta.cos(), r * theta.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn linspace_hits_both_ends() {
        let xs = linspace(-2.0, 2.0, 5);
        assert_eq!(xs, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(linspace(3.0, 9.0, 1), vec![3.0]);
    }

    #[test]
    fn koch_split_keeps_the_ends_and_thirds() {
        let [s1, s2, s3, s4] = koch_split(Complex::new(0.0, 0.0), Complex::new(3.0, 0.0));
        assert_eq!(s1.0, Complex::new(0.0, 0.0));
        assert_eq!(s1.1, Complex::new(1.0, 0.0));
        assert_eq!(s3.1, Complex::new(2.0, 0.0));
        assert_eq!(s4.1, Complex::new(3.0, 0.0));
        // The bump apex hangs below a left-to-right edge and each bump
        // side keeps the one-third length.
        assert!(s2.1.im < 0.0);
        assert!(close(s2.0.re, 1.0));
        assert!(close((s2.1 - s2.0).norm(), 1.0));
    }

    #[test]
    fn koch_segment_count_quadruples_per_depth() {
        let a = Complex::new(0.0, 0.0);
        let b = Complex::new(1.0, 0.0);
        assert_eq!(koch_segments(a, b, 0).len(), 1);
        assert_eq!(koch_segments(a, b, 1).len(), 4);
        assert_eq!(koch_segments(a, b, 4).len(), 256);
        assert_eq!(snowflake(3).len(), 3 * 64);
    }

    #[test]
    fn koch_colored_matches_the_plain_expansion() {
        let a = Complex::new(0.0, 0.0);
        let b = Complex::new(1.0, 0.0);
        let (tagged, classes) = koch_colored(a, b, 2);
        assert_eq!(tagged.len(), 16);
        // One class for the root split, one per depth-1 child, plus
        // the reserved background class.
        assert_eq!(classes, 7);
        // Every emitted class is positive and in range.
        assert!(tagged.iter().all(|&(_, class)| class > 0 && class < classes));
    }

    #[test]
    fn snowflake_colored_classes_do_not_collide_across_edges() {
        let (tagged, classes) = snowflake_colored(1);
        assert_eq!(tagged.len(), 12);
        assert_eq!(classes, 7);
        let mut seen: Vec<u32> = tagged.iter().map(|&(_, c)| c).collect();
        seen.sort();
        seen.dedup();
        // Three edges, one subdivision each, four siblings per class.
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|&c| c > 0 && c < classes));
    }

    #[test]
    fn sierpinski_triples_per_depth() {
        let [a, b, c] = sierpinski_corners();
        assert_eq!(sierpinski(a, b, c, 0).len(), 1);
        assert_eq!(sierpinski(a, b, c, 1).len(), 3);
        assert_eq!(sierpinski(a, b, c, 5).len(), 243);
    }

    #[test]
    fn sierpinski_children_keep_the_outer_corners() {
        let [a, b, c] = sierpinski_corners();
        let kids = sierpinski(a, b, c, 1);
        assert!(kids.iter().any(|t| t.0 == a));
        assert!(kids.iter().any(|t| t.1 == b));
        assert!(kids.iter().any(|t| t.2 == c));
    }

    #[test]
    fn takagi_tooth_is_distance_to_nearest_integer() {
        assert!(close(takagi_tooth(0.0), 0.0));
        assert!(close(takagi_tooth(0.25), 0.25));
        assert!(close(takagi_tooth(0.5), 0.5));
        assert!(close(takagi_tooth(1.75), 0.25));
        assert!(close(takagi_tooth(-0.25), 0.25));
    }

    #[test]
    fn takagi_fixed_points() {
        let curve = takagi_curve(12, 5);
        // x = 0: every tooth lands on an integer.
        assert!(close(curve[0].im, 0.0));
        // x = 1/2: only the first term survives.
        assert!(close(curve[2].im, 0.5));
        // x = 1: back to zero.
        assert!(close(curve[4].im, 0.0));
    }

    #[test]
    fn weierstrass_at_zero_sums_the_geometric_series() {
        let curve = weierstrass_curve(7.0, 10, 3, -1.0, 1.0);
        // cos(0) = 1 for every term: sum of 1/2^n, n in 0..10.
        let expected = 2.0 * (1.0 - (0.5_f64).powi(10));
        assert!(close(curve[1].im, expected));
    }

    #[test]
    fn weierstrass_surface_is_odd_in_x() {
        let z = weierstrass_surface(3.0, 8, 5, 5, -1.0, 1.0);
        // Row-major 5x5: mirror columns about the center flip sign.
        for row in 0..5 {
            assert!(close(z[row * 5], -z[row * 5 + 4]));
            assert!(close(z[row * 5 + 2], 0.0));
        }
    }

    #[test]
    fn blossom_stays_inside_the_unit_disc() {
        for p in blossom_curve(8.0, 1.0, 500) {
            assert!(p.norm() <= 1.0 + 1e-9);
        }
    }

    #[test]
    fn blossom_at_zero_growth_collapses_to_the_origin() {
        assert!(blossom_curve(8.0, 0.0, 16)
            .into_iter()
            .all(|p| close(p.norm(), 0.0)));
    }
}
