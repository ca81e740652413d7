//! Turns iteration counts and color classes into RGB.
//!
//! The gradient palettes are small anchor-stop approximations of the
//! colormaps these fractals are traditionally drawn with; values are
//! normalized against a caller-supplied maximum (for escape-time
//! fields, the iteration limit, so the bounded-orbit sentinel lands on
//! the gradient's top stop).

use num::clamp;
use rand::prelude::*;
use std::str::FromStr;

/// Anchor stops for the dark-purple-to-pale-yellow gradient.
const MAGMA_STOPS: [[u8; 3]; 5] = [
    [0, 0, 4],
    [81, 18, 124],
    [183, 55, 121],
    [252, 136, 97],
    [252, 253, 191],
];

/// Anchor stops for the blue-to-red rainbow gradient.
const JET_STOPS: [[u8; 3]; 6] = [
    [0, 0, 131],
    [0, 60, 255],
    [37, 255, 217],
    [255, 255, 0],
    [255, 60, 0],
    [128, 0, 0],
];

/// Anchor stops for the deep-purple-to-yellow gradient.
const VIRIDIS_STOPS: [[u8; 3]; 5] = [
    [68, 1, 84],
    [59, 82, 139],
    [33, 145, 140],
    [94, 201, 98],
    [253, 231, 37],
];

/// A rule for coloring a value buffer.
#[derive(Clone, Debug, PartialEq)]
pub enum Palette {
    /// Plain luminance ramp.
    Grayscale,
    /// Gradient echoing matplotlib's magma colormap.
    Magma,
    /// Gradient echoing the classic jet colormap.
    Jet,
    /// Gradient echoing matplotlib's viridis colormap.
    Viridis,
    /// One fixed color per class; zero stays black as the background
    /// and positive values index the table modulo its length.  Used
    /// for class-tagged geometry like the colored Koch.
    Indexed(Vec<[u8; 3]>),
}

impl Palette {
    /// An Indexed palette of `classes` random colors.
    pub fn random_indexed(classes: usize) -> Palette {
        let mut rng = thread_rng();
        Palette::Indexed(
            (0..classes.max(1))
                .map(|_| [rng.gen::<u8>(), rng.gen::<u8>(), rng.gen::<u8>()])
                .collect(),
        )
    }

    /// The RGB color for one value against a maximum.  `max` of zero
    /// is treated as one so a flat buffer still shades.
    pub fn shade(&self, value: u32, max: u32) -> [u8; 3] {
        let max = max.max(1);
        match *self {
            Palette::Grayscale => {
                let v = clamp(value * 255 / max, 0, 255) as u8;
                [v, v, v]
            }
            Palette::Magma => gradient(&MAGMA_STOPS, value, max),
            Palette::Jet => gradient(&JET_STOPS, value, max),
            Palette::Viridis => gradient(&VIRIDIS_STOPS, value, max),
            Palette::Indexed(ref colors) => {
                if value == 0 {
                    [0, 0, 0]
                } else {
                    colors[((value - 1) as usize) % colors.len()]
                }
            }
        }
    }

    /// Shades a whole buffer into packed RGB bytes.
    pub fn apply(&self, values: &[u32], max: u32) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(values.len() * 3);
        for value in values {
            let color = self.shade(*value, max);
            rgb.extend_from_slice(&color);
        }
        rgb
    }
}

impl FromStr for Palette {
    type Err = String;

    fn from_str(s: &str) -> Result<Palette, String> {
        match s {
            "gray" | "grey" | "grayscale" => Ok(Palette::Grayscale),
            "magma" => Ok(Palette::Magma),
            "jet" => Ok(Palette::Jet),
            "viridis" => Ok(Palette::Viridis),
            _ => Err(format!("unknown palette '{}'", s)),
        }
    }
}

/// Quantizes a field of real heights onto `levels` palette steps:
/// the minimum maps to 0, the maximum to `levels`.  A flat field maps
/// to all zeros.
pub fn quantize(heights: &[f64], levels: u32) -> Vec<u32> {
    let mut lo = ::std::f64::INFINITY;
    let mut hi = ::std::f64::NEG_INFINITY;
    for h in heights {
        lo = lo.min(*h);
        hi = hi.max(*h);
    }
    let span = hi - lo;
    heights
        .iter()
        .map(|h| {
            if span > 0.0 {
                (((h - lo) / span) * f64::from(levels)).round() as u32
            } else {
                0
            }
        })
        .collect()
}

/// Piecewise-linear interpolation through gradient stops.
fn gradient(stops: &[[u8; 3]], value: u32, max: u32) -> [u8; 3] {
    let t = clamp((value as f64) / (max as f64), 0.0, 1.0);
    let scaled = t * ((stops.len() - 1) as f64);
    let index = (scaled.floor() as usize).min(stops.len() - 2);
    let frac = scaled - (index as f64);
    let lo = stops[index];
    let hi = stops[index + 1];
    let mut out = [0; 3];
    for channel in 0..3 {
        let mixed =
            (f64::from(lo[channel])) * (1.0 - frac) + (f64::from(hi[channel])) * frac;
        out[channel] = mixed.round() as u8;
    }
    out
}
