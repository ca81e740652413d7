extern crate clap;
extern crate failure;
extern crate fractalis;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use fractalis::anim::{self, FrameSink};
use fractalis::cli::{parse_complex, parse_size, validate_pair, validate_range};
use fractalis::curves::blossom_curve;
use fractalis::output::write_image;
use fractalis::palette::Palette;
use fractalis::raster::Canvas;
use fractalis::GridMap;
use std::path::Path;
use std::str::FromStr;

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const PETALS: &str = "petals";
const SAMPLES: &str = "samples";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const PALETTE: &str = "palette";
const ANIMATE: &str = "animate";
const FRAMES: &str = "frames";
const DELAY: &str = "delay";
const FRAMEDIR: &str = "framedir";

/// The color the original flower was drawn in, for when no palette is
/// asked for.
const DEEP_PINK: [u8; 3] = [255, 20, 147];

fn args<'a>() -> ArgMatches<'a> {
    App::new("blossom")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Polar blossom curve renderer")
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
            Arg::with_name(PETALS)
                .required(false)
                .long(PETALS)
                .short("k")
                .takes_value(true)
                .default_value("8")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0.5,
                        64.0,
                        "Could not parse petal count",
                        "Petal count must be between 0.5 and 64",
                    )
                })
                .help("Angular frequency of the rose, petals per turn"),
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
                .default_value("-1.0,-1.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the drawing plane"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .default_value("1.0,1.0")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the drawing plane"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .validator(|s| s.parse::<Palette>().map(|_| ()))
                .help("Color palette: gray, magma, jet, or viridis; defaults to deep pink"),
        )
        .arg(
            Arg::with_name(ANIMATE)
                .required(false)
                .long(ANIMATE)
                .help("Grow the blossom from the origin and render a GIF"),
        )
        .arg(
            Arg::with_name(FRAMES)
                .required(false)
                .long(FRAMES)
                .takes_value(true)
                .default_value("101")
                .validator(move |s| {
                    validate_range(
                        &s,
                        2,
                        100_000,
                        "Could not parse frame count",
                        "Frame count must be at least 2",
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

fn render_blossom(
    canvas: &mut Canvas,
    petals: f64,
    t: f64,
    samples: usize,
    palette: &Palette,
) -> Vec<u8> {
    canvas.clear();
    canvas.draw_polyline(&blossom_curve(petals, t, samples), 1);
    palette.apply(canvas.values(), 1)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let output = matches.value_of(OUTPUT).unwrap();
    let size = parse_size(matches.value_of(SIZE).unwrap()).expect("Error parsing image dimensions");
    let petals =
        f64::from_str(matches.value_of(PETALS).unwrap()).expect("Error parsing petal count");
    let samples =
        usize::from_str(matches.value_of(SAMPLES).unwrap()).expect("Error parsing sample count");
    let leftlower = parse_complex(matches.value_of(LEFTLOWER).unwrap())
        .expect("Error parsing left lower point");
    let rightupper = parse_complex(matches.value_of(RIGHTUPPER).unwrap())
        .expect("Error parsing right upper point");
    let palette = match matches.value_of(PALETTE) {
        Some(s) => s.parse::<Palette>().expect("Error parsing palette"),
        None => Palette::Indexed(vec![DEEP_PINK]),
    };

    let grid = GridMap::new(size.0, size.1, leftlower, rightupper)?;
    let mut canvas = Canvas::new(grid);

    if matches.is_present(ANIMATE) {
        let frames =
            usize::from_str(matches.value_of(FRAMES).unwrap()).expect("Error parsing frame count");
        let delay =
            u16::from_str(matches.value_of(DELAY).unwrap()).expect("Error parsing frame delay");
        let mut sink = FrameSink::new(size).with_gif(output, delay)?;
        if let Some(dir) = matches.value_of(FRAMEDIR) {
            sink = sink.with_framedir(Path::new(dir));
        }
        anim::drive(frames, sink, |frame| {
            // Growth runs 0 to 1 across the animation.
            let t = (frame as f64) / ((frames - 1) as f64);
            render_blossom(&mut canvas, petals, t, samples, &palette)
        })?;
    } else {
        let rgb = render_blossom(&mut canvas, petals, 1.0, samples, &palette);
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
