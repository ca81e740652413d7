extern crate clap;
extern crate failure;
extern crate fractalis;
extern crate num;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use fractalis::anim::{self, FrameSink};
use fractalis::cli::{parse_complex, parse_size, validate_pair, validate_range};
use fractalis::curves::{linspace, weierstrass_curve, weierstrass_surface};
use fractalis::output::write_image;
use fractalis::palette::{quantize, Palette};
use fractalis::raster::Canvas;
use fractalis::GridMap;
use num::Complex;
use std::path::Path;
use std::str::FromStr;

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const MODE: &str = "mode";
const BASE: &str = "base";
const TERMS: &str = "terms";
const SAMPLES: &str = "samples";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const PALETTE: &str = "palette";
const ANIMATE: &str = "animate";
const FRAMES: &str = "frames";
const DELAY: &str = "delay";
const FRAMEDIR: &str = "framedir";

/// Palette steps the quantized surface heights spread over.
const SURFACE_LEVELS: u32 = 255;

fn args<'a>() -> ArgMatches<'a> {
    App::new("weierstrass")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Weierstrass function renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file: .png or .pnm for a still, .gif when animating"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("800x600")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(MODE)
                .required(false)
                .long(MODE)
                .short("m")
                .takes_value(true)
                .default_value("curve")
                .possible_values(&["curve", "surface"])
                .help("Draw the 1-D curve or the 2-D surface heightmap"),
        )
        .arg(
            Arg::with_name(BASE)
                .required(false)
                .long(BASE)
                .short("b")
                .takes_value(true)
                .default_value("7.0")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0.01,
                        100.0,
                        "Could not parse frequency base",
                        "Frequency base must be between 0.01 and 100",
                    )
                })
                .help("Frequency base b of the cosine sum"),
        )
        .arg(
            Arg::with_name(TERMS)
                .required(false)
                .long(TERMS)
                .short("n")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        10_000,
                        "Could not parse term count",
                        "Term count must be between 1 and 10000",
                    )
                })
                .help("Terms of the sum; defaults to 500 for the curve, 20 for the surface"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .required(false)
                .long(SAMPLES)
                .takes_value(true)
                .default_value("1000")
                .validator(move |s| {
                    validate_range(
                        &s,
                        2,
                        1_000_000,
                        "Could not parse sample count",
                        "Sample count must be at least 2",
                    )
                })
                .help("Number of points the curve is sampled at"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner; defaults to -3,-2.1 (curve) or -2,-2 (surface)"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner; defaults to 3,2.1 (curve) or 2,2 (surface)"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("viridis")
                .validator(|s| s.parse::<Palette>().map(|_| ()))
                .help("Color palette: gray, magma, jet, or viridis"),
        )
        .arg(
            Arg::with_name(ANIMATE)
                .required(false)
                .long(ANIMATE)
                .help("Sweep the base b over the frames and render a GIF"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .required(false)
                .long(FRAMES)
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        2,
                        100_000,
                        "Could not parse frame count",
                        "Frame count must be at least 2",
                    )
                })
                .help("Number of animation frames; defaults to 100 (curve) or 200 (surface)"),
        )
        .arg(
            Arg::with_name(DELAY)
                .required(false)
                .long(DELAY)
                .takes_value(true)
                .default_value("10")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        u16::max_value() as usize,
                        "Could not parse frame delay",
                        "Frame delay must fit in hundredths of a second",
                    )
                })
                .help("Delay between animation frames, hundredths of a second"),
        )
        .arg(
            Arg::with_name(FRAMEDIR)
                .required(false)
                .long(FRAMEDIR)
                .takes_value(true)
                .help("Also dump numbered frame PNGs into this directory"),
        )
        .get_matches()
}

fn render_surface(
    b: f64,
    terms: usize,
    size: (usize, usize),
    lo: f64,
    hi: f64,
    palette: &Palette,
) -> Vec<u8> {
    let heights = weierstrass_surface(b, terms, size.0, size.1, lo, hi);
    palette.apply(&quantize(&heights, SURFACE_LEVELS), SURFACE_LEVELS)
}

fn render_curve(
    canvas: &mut Canvas,
    b: f64,
    terms: usize,
    samples: usize,
    palette: &Palette,
) -> Vec<u8> {
    canvas.clear();
    let x0 = canvas.grid().pixel_to_point(0, 0).re;
    let x1 = canvas.grid().pixel_to_point(canvas.grid().width(), 0).re;
    canvas.draw_polyline(&weierstrass_curve(b, terms, samples, x0, x1), 1);
    palette.apply(canvas.values(), 1)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let output = matches.value_of(OUTPUT).unwrap();
    let size = parse_size(matches.value_of(SIZE).unwrap()).expect("Error parsing image dimensions");
    let surface = matches.value_of(MODE).unwrap() == "surface";
    let b = f64::from_str(matches.value_of(BASE).unwrap()).expect("Error parsing frequency base");
    let terms = match matches.value_of(TERMS) {
        Some(n) => usize::from_str(n).expect("Error parsing term count"),
        None => {
            if surface {
                20
            } else {
                500
            }
        }
    };
    let samples =
        usize::from_str(matches.value_of(SAMPLES).unwrap()).expect("Error parsing sample count");
    let leftlower = match matches.value_of(LEFTLOWER) {
        Some(s) => parse_complex(s).expect("Error parsing left lower point"),
        None => {
            if surface {
                Complex::new(-2.0, -2.0)
            } else {
                Complex::new(-3.0, -2.1)
            }
        }
    };
    let rightupper = match matches.value_of(RIGHTUPPER) {
        Some(s) => parse_complex(s).expect("Error parsing right upper point"),
        None => {
            if surface {
                Complex::new(2.0, 2.0)
            } else {
                Complex::new(3.0, 2.1)
            }
        }
    };
    let palette = matches
        .value_of(PALETTE)
        .unwrap()
        .parse::<Palette>()
        .expect("Error parsing palette");

    let grid = GridMap::new(size.0, size.1, leftlower, rightupper)?;

    if matches.is_present(ANIMATE) {
        let frames = match matches.value_of(FRAMES) {
            Some(f) => usize::from_str(f).expect("Error parsing frame count"),
            None => {
                if surface {
                    200
                } else {
                    100
                }
            }
        };
        let delay =
            u16::from_str(matches.value_of(DELAY).unwrap()).expect("Error parsing frame delay");
        let mut sink = FrameSink::new(size).with_gif(output, delay)?;
        if let Some(dir) = matches.value_of(FRAMEDIR) {
            sink = sink.with_framedir(Path::new(dir));
        }
        // The sweeps the original animations ran: b across 1..20 for
        // the surface, 0.1..4 for the curve.
        let sweep = if surface {
            linspace(1.0, 20.0, frames)
        } else {
            linspace(0.1, 4.0, frames)
        };
        if surface {
            anim::drive(frames, sink, |frame| {
                render_surface(sweep[frame], terms, size, leftlower.re, rightupper.re, &palette)
            })?;
        } else {
            let mut canvas = Canvas::new(grid);
            anim::drive(frames, sink, |frame| {
                render_curve(&mut canvas, sweep[frame], terms, samples, &palette)
            })?;
        }
    } else if surface {
        let rgb = render_surface(b, terms, size, leftlower.re, rightupper.re, &palette);
        write_image(output, &rgb, size)?;
    } else {
        let mut canvas = Canvas::new(grid);
        let rgb = render_curve(&mut canvas, b, terms, samples, &palette);
        write_image(output, &rgb, size)?;
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(&args()) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
