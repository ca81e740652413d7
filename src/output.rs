//! File encoding: PNG and PNM stills, animated GIFs, and per-frame
//! PNG dumps.
//!
//! The GIF path uses the gif crate directly rather than going through
//! the image crate's wrapper, which exposes neither looping nor
//! per-frame delay; it is the same encoder the image crate links
//! internally.

use gif::{Encoder, Frame, Repeat, SetParameter};
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::png::PNGEncoder;
use image::ColorType;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Collapses packed RGB to luminance with the usual Rec. 601 weights.
pub fn rgb_to_luma(rgb: &[u8]) -> Vec<u8> {
    rgb.chunks(3)
        .map(|p| {
            let y = 0.299 * f64::from(p[0]) + 0.587 * f64::from(p[1]) + 0.114 * f64::from(p[2]);
            y.round() as u8
        })
        .collect()
}

/// Writes a packed-RGB buffer as a still image.  Paths ending in
/// `.pnm` or `.pgm` get a binary graymap; everything else gets a PNG.
pub fn write_image(
    filename: &str,
    rgb: &[u8],
    bounds: (usize, usize),
) -> Result<(), io::Error> {
    let path = Path::new(filename);
    let output = File::create(path)?;
    let graymap = match path.extension().and_then(|e| e.to_str()) {
        Some("pnm") | Some("pgm") => true,
        _ => false,
    };
    if graymap {
        let luma = rgb_to_luma(rgb);
        let mut encoder =
            PNMEncoder::new(output).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
        encoder.encode(&luma[..], bounds.0 as u32, bounds.1 as u32, ColorType::Gray(8))?;
    } else {
        let encoder = PNGEncoder::new(output);
        encoder.encode(rgb, bounds.0 as u32, bounds.1 as u32, ColorType::RGB(8))?;
    }
    Ok(())
}

/// Writes one animation frame as `frame_NNN.png` under `dir`,
/// creating the directory on first use.  Returns the path written.
pub fn write_frame_png(
    dir: &Path,
    index: usize,
    rgb: &[u8],
    bounds: (usize, usize),
) -> Result<PathBuf, io::Error> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("frame_{:03}.png", index));
    let output = File::create(&path)?;
    PNGEncoder::new(output).encode(rgb, bounds.0 as u32, bounds.1 as u32, ColorType::RGB(8))?;
    Ok(path)
}

/// A streaming animated-GIF encoder: create it, feed it packed-RGB
/// frames, drop it.  The animation loops forever at a fixed per-frame
/// delay given in hundredths of a second.
pub struct GifWriter {
    encoder: Encoder<File>,
    width: u16,
    height: u16,
    delay: u16,
}

impl GifWriter {
    /// Opens `filename` for writing and emits the GIF header.
    pub fn create(
        filename: &str,
        bounds: (usize, usize),
        delay: u16,
    ) -> Result<GifWriter, io::Error> {
        let output = File::create(Path::new(filename))?;
        let width = bounds.0 as u16;
        let height = bounds.1 as u16;
        let mut encoder = Encoder::new(output, width, height, &[])?;
        encoder.set(Repeat::Infinite)?;
        Ok(GifWriter {
            encoder,
            width,
            height,
            delay,
        })
    }

    /// Quantizes and appends one packed-RGB frame.
    pub fn add_frame(&mut self, rgb: &[u8]) -> Result<(), io::Error> {
        let mut frame = Frame::from_rgb(self.width, self.height, rgb);
        frame.delay = self.delay;
        self.encoder.write_frame(&frame)?;
        Ok(())
    }
}
