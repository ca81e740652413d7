extern crate clap;
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
const CONSTANT: &str = "constant";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const ITERATIONS: &str = "iterations";
const RADIUS: &str = "radius";
const THREADS: &str = "threads";
const PALETTE: &str = "palette";
const ANIMATE: &str = "animate";
const ORBIT: &str = "orbit-radius";
const FRAMES: &str = "frames";
const DELAY: &str = "delay";
const FRAMEDIR: &str = "framedir";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("julia")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Julia set renderer")
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
                .default_value("800x800")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(CONSTANT)
                .required(false)
                .long(CONSTANT)
                .short("c")
                .takes_value(true)
                .default_value("-0.8,0.156")
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse the Julia constant"))
                .help("The fixed constant c of the Julia recurrence"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .default_value("-2.0,-2.0")
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
                .default_value("2.0,2.0")
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
                .default_value("100")
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
                .help("Sweep the constant once around a circle and render a GIF"),
        )
        .arg(
            Arg::with_name(ORBIT)
                .required(false)
                .long(ORBIT)
                .takes_value(true)
                .default_value("0.7885")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0.0,
                        2.0,
                        "Could not parse orbit radius",
                        "Orbit radius must be between 0 and 2",
                    )
                })
                .help("Radius of the circle the swept constant moves on"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .required(false)
                .long(FRAMES)
                .takes_value(true)
                .default_value("100")
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
                .default_value("5")
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
    let constant = parse_complex(matches.value_of(CONSTANT).unwrap())
        .expect("Error parsing the Julia constant");
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

    let grid = GridMap::new(size.0, size.1, leftlower, rightupper)?;

    if matches.is_present(ANIMATE) {
        let orbit_radius =
            f64::from_str(matches.value_of(ORBIT).unwrap()).expect("Error parsing orbit radius");
        let frames =
            usize::from_str(matches.value_of(FRAMES).unwrap()).expect("Error parsing frame count");
        let delay =
            u16::from_str(matches.value_of(DELAY).unwrap()).expect("Error parsing frame delay");
        let mut sink = FrameSink::new(size).with_gif(output, delay)?;
        if let Some(dir) = matches.value_of(FRAMEDIR) {
            sink = sink.with_framedir(Path::new(dir));
        }
        anim::drive(frames, sink, |frame| {
            let c = anim::julia_constant(orbit_radius, frame, frames);
            let renderer =
                EscapeRenderer::new(grid.clone(), Recurrence::Julia(c), iterations, radius)
                    .expect("validated parameters");
            palette.apply(&renderer.render(threads), iterations as u32)
        })?;
    } else {
        let renderer = EscapeRenderer::new(grid, Recurrence::Julia(constant), iterations, radius)?;
        let counts = renderer.render(threads);
        let rgb = palette.apply(&counts, iterations as u32);
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
