//! Frame schedules and the animation driver.
//!
//! Each schedule is a pure function from a frame index to the
//! parameters that frame is rendered with; the driver below owns all
//! the mutable sink state.  Rendering a frame is therefore exactly as
//! repeatable as rendering a still.

use num::Complex;
use std::f64::consts::PI;
use std::io;
use std::path::{Path, PathBuf};

use output::{write_frame_png, GifWriter};

/// The Mandelbrot zoom window schedule: 82 frames that first pan right
/// while narrowing, then close in symmetrically at half the rate from
/// frame 36 on.  Returns the (lower-left, upper-right) corners; frames
/// past the 82nd eventually pinch the window shut and are rejected by
/// grid validation.
pub fn zoom_window(frame: usize) -> (Complex<f64>, Complex<f64>) {
    let i = frame as f64;
    let (xmin, xmax, ymin, ymax) = if frame < 36 {
        (
            -2.0 + 0.02 * i,
            -1.0 + 0.02 * i,
            -1.5 + 0.02 * i,
            1.5 - 0.02 * i,
        )
    } else {
        let closing = 0.01 * (i - 35.0);
        (
            -1.3 + closing,
            -0.3 - closing,
            -0.8 + closing,
            0.8 - closing,
        )
    };
    (Complex::new(xmin, ymin), Complex::new(xmax, ymax))
}

/// The deepening schedule: the iteration cap grows geometrically,
/// round(1.15^(frame+1)), so early frames show coarse escape bands
/// and later frames resolve the boundary.
pub fn deepening_limit(frame: usize) -> usize {
    let limit = (1.15_f64).powi((frame + 1) as i32).round();
    limit as usize
}

/// The Julia constant for a sweep frame: c = r e^(i theta) with theta
/// running once around the circle over the frame count.
pub fn julia_constant(orbit_radius: f64, frame: usize, frames: usize) -> Complex<f64> {
    let theta = if frames < 2 {
        0.0
    } else {
        2.0 * PI * (frame as f64) / ((frames - 1) as f64)
    };
    Complex::new(orbit_radius * theta.cos(), orbit_radius * theta.sin())
}

/// The subdivision-depth ramp: depth grows linearly with the frame
/// index and reaches the full `depth` on the final frame.
pub fn ramp_depth(depth: usize, frame: usize, frames: usize) -> usize {
    if frames == 0 {
        return depth;
    }
    (depth * (frame + 1)) / frames
}

/// Where rendered frames go: an animated GIF, a directory of numbered
/// PNGs, or both.
pub struct FrameSink {
    bounds: (usize, usize),
    gif: Option<GifWriter>,
    framedir: Option<PathBuf>,
}

impl FrameSink {
    /// A sink that discards frames until a destination is attached.
    pub fn new(bounds: (usize, usize)) -> FrameSink {
        FrameSink {
            bounds,
            gif: None,
            framedir: None,
        }
    }

    /// Attaches an animated-GIF destination.
    pub fn with_gif(mut self, filename: &str, delay: u16) -> Result<FrameSink, io::Error> {
        self.gif = Some(GifWriter::create(filename, self.bounds, delay)?);
        Ok(self)
    }

    /// Attaches a per-frame PNG directory.
    pub fn with_framedir(mut self, dir: &Path) -> FrameSink {
        self.framedir = Some(dir.to_path_buf());
        self
    }

    /// Accepts one packed-RGB frame.
    pub fn accept(&mut self, index: usize, rgb: &[u8]) -> Result<(), io::Error> {
        if let Some(ref mut gif) = self.gif {
            gif.add_frame(rgb)?;
        }
        if let Some(ref dir) = self.framedir {
            write_frame_png(dir, index, rgb, self.bounds)?;
        }
        Ok(())
    }
}

/// The animation driver: calls the pure per-frame renderer and hands
/// each frame to the sink.
pub fn drive<F>(frames: usize, mut sink: FrameSink, mut render: F) -> Result<(), io::Error>
where
    F: FnMut(usize) -> Vec<u8>,
{
    for frame in 0..frames {
        let rgb = render(frame);
        sink.accept(frame, &rgb)?;
    }
    Ok(())
}
