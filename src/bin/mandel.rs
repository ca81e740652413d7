extern crate clap;
#[macro_use]
extern crate failure;
extern crate fractalis;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use fractalis::anim::{self, FrameSink};
use fractalis::cli::{parse_complex, parse_size, validate_pair, validate_range};
use fractalis::output::write_image;
use fractalis::palette::Palette;
use fractalis::{EscapeRenderer, GridMap, Recurrence};
use std::path::Path;
use std::str::FromStr;

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const ITERATIONS: &str = "iterations";
const RADIUS: &str = "radius";
const THREADS: &str = "threads";
const PALETTE: &str = "palette";
const ANIMATE: &str = "animate";
const FRAMES: &str = "frames";
const DELAY: &str = "delay";
const FRAMEDIR: &str = "framedir";

/// The zoom schedule pinches the window shut past this many frames.
const ZOOM_FRAMES: usize = 82;
const DEEPEN_FRAMES: usize = 45;

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot set renderer")
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
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .default_value("-2.0,-1.5")
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the sampled plane"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .default_value("1.0,1.5")
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the sampled plane"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("256")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 200000",
                    )
                })
                .help("Iteration budget per sample"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .required(false)
                .long(RADIUS)
                .takes_value(true)
                .default_value("2.0")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1e-6,
                        1e6,
                        "Could not parse divergence radius",
                        "Divergence radius must be positive",
                    )
                })
                .help("Magnitude at which an orbit counts as escaped"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("magma")
                .validator(|s| s.parse::<Palette>().map(|_| ()))
                .help("Color palette: gray, magma, jet, or viridis"),
        )
        .arg(
            Arg::with_name(ANIMATE)
                .required(false)
                .long(ANIMATE)
                .takes_value(true)
                .possible_values(&["zoom", "deepen"])
                .help("Render an animation instead of a still"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .required(false)
                .long(FRAMES)
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse frame count",
                        "Frame count must be at least 1",
                    )
                })
                .help("Number of animation frames"),
        )
        .arg(
            Arg::with_name(DELAY)
                .required(false)
                .long(DELAY)
                .takes_value(true)
                .default_value("12")
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

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let output = matches.value_of(OUTPUT).unwrap();
    let size = parse_size(matches.value_of(SIZE).unwrap()).expect("Error parsing image dimensions");
    let leftlower = parse_complex(matches.value_of(LEFTLOWER).unwrap())
        .expect("Error parsing left lower point");
    let rightupper = parse_complex(matches.value_of(RIGHTUPPER).unwrap())
        .expect("Error parsing right upper point");
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Error parsing iteration count");
    let radius =
        f64::from_str(matches.value_of(RADIUS).unwrap()).expect("Error parsing divergence radius");
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Error parsing thread count");
    let palette = matches
        .value_of(PALETTE)
        .unwrap()
        .parse::<Palette>()
        .expect("Error parsing palette");

    match matches.value_of(ANIMATE) {
        None => {
            let grid = GridMap::new(size.0, size.1, leftlower, rightupper)?;
            let renderer = EscapeRenderer::new(grid, Recurrence::Mandelbrot, iterations, radius)?;
            let counts = renderer.render(threads);
            let rgb = palette.apply(&counts, iterations as u32);
            write_image(output, &rgb, size)?;
        }
        Some(mode) => {
            let frames = match matches.value_of(FRAMES) {
                Some(f) => usize::from_str(f).expect("Error parsing frame count"),
                None => {
                    if mode == "zoom" {
                        ZOOM_FRAMES
                    } else {
                        DEEPEN_FRAMES
                    }
                }
            };
            if mode == "zoom" && frames > ZOOM_FRAMES {
                return Err(format_err!(
                    "the zoom window closes after {} frames, got {}",
                    ZOOM_FRAMES,
                    frames
                ));
            }
            // 1.15^100 is already a million iterations per sample.
            if mode == "deepen" && frames > 100 {
                return Err(format_err!(
                    "the deepening schedule is unreasonable past 100 frames, got {}",
                    frames
                ));
            }
            let delay =
                u16::from_str(matches.value_of(DELAY).unwrap()).expect("Error parsing frame delay");
            let mut sink = FrameSink::new(size).with_gif(output, delay)?;
            if let Some(dir) = matches.value_of(FRAMEDIR) {
                sink = sink.with_framedir(Path::new(dir));
            }

            if mode == "zoom" {
                anim::drive(frames, sink, |frame| {
                    let (ll, ru) = anim::zoom_window(frame);
                    let grid =
                        GridMap::new(size.0, size.1, ll, ru).expect("zoom window out of range");
                    let renderer =
                        EscapeRenderer::new(grid, Recurrence::Mandelbrot, iterations, radius)
                            .expect("validated parameters");
                    palette.apply(&renderer.render(threads), iterations as u32)
                })?;
            } else {
                let grid = GridMap::new(size.0, size.1, leftlower, rightupper)?;
                anim::drive(frames, sink, |frame| {
                    let limit = anim::deepening_limit(frame);
                    let renderer =
                        EscapeRenderer::new(grid.clone(), Recurrence::Mandelbrot, limit, radius)
                            .expect("validated parameters");
                    palette.apply(&renderer.render(threads), limit as u32)
                })?;
            }
        }
    }
    Ok(())
}

fn main() {
    if let Err(e) = run(&args()) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
