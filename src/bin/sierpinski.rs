extern crate clap;
extern crate failure;
extern crate fractalis;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use fractalis::anim::{self, FrameSink};
use fractalis::cli::{parse_complex, parse_size, validate_pair, validate_range};
use fractalis::curves::{sierpinski, sierpinski_corners};
use fractalis::output::write_image;
use fractalis::palette::Palette;
use fractalis::raster::Canvas;
use fractalis::GridMap;
use std::path::Path;
use std::str::FromStr;

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const DEPTH: &str = "depth";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const PALETTE: &str = "palette";
const ANIMATE: &str = "animate";
const FRAMES: &str = "frames";
const DELAY: &str = "delay";
const FRAMEDIR: &str = "framedir";

fn args<'a>() -> ArgMatches<'a> {
    App::new("sierpinski")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Sierpinski triangle renderer")
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
            Arg::with_name(DEPTH)
                .required(false)
                .long(DEPTH)
                .short("d")
                .takes_value(true)
                .default_value("7")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        11,
                        "Could not parse subdivision depth",
                        "Subdivision depth must be between 0 and 11",
                    )
                })
                .help("Subdivision depth of the gasket"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .default_value("-0.1,-0.1")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the drawing plane"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .default_value("1.1,1.1")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the drawing plane"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("gray")
                .validator(|s| s.parse::<Palette>().map(|_| ()))
                .help("Color palette: gray, magma, jet, or viridis"),
        )
        .arg(
            Arg::with_name(ANIMATE)
                .required(false)
                .long(ANIMATE)
                .help("Deepen the subdivision one level per frame and render a GIF"),
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
                        12,
                        "Could not parse frame count",
                        "Frame count must be between 1 and 12",
                    )
                })
                .help("Number of animation frames; defaults to the depth"),
        )
        .arg(
            Arg::with_name(DELAY)
                .required(false)
                .long(DELAY)
                .takes_value(true)
                .default_value("50")
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

fn render_gasket(canvas: &mut Canvas, depth: usize, palette: &Palette) -> Vec<u8> {
    canvas.clear();
    let [a, b, c] = sierpinski_corners();
    for triangle in sierpinski(a, b, c, depth) {
        canvas.fill_triangle(&triangle, 1);
    }
    palette.apply(canvas.values(), 1)
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let output = matches.value_of(OUTPUT).unwrap();
    let size = parse_size(matches.value_of(SIZE).unwrap()).expect("Error parsing image dimensions");
    let depth =
        usize::from_str(matches.value_of(DEPTH).unwrap()).expect("Error parsing subdivision depth");
    let leftlower = parse_complex(matches.value_of(LEFTLOWER).unwrap())
        .expect("Error parsing left lower point");
    let rightupper = parse_complex(matches.value_of(RIGHTUPPER).unwrap())
        .expect("Error parsing right upper point");
    let palette = matches
        .value_of(PALETTE)
        .unwrap()
        .parse::<Palette>()
        .expect("Error parsing palette");

    let grid = GridMap::new(size.0, size.1, leftlower, rightupper)?;
    let mut canvas = Canvas::new(grid);

    if matches.is_present(ANIMATE) {
        let frames = match matches.value_of(FRAMES) {
            Some(f) => usize::from_str(f).expect("Error parsing frame count"),
            None => depth.max(1),
        };
        let delay =
            u16::from_str(matches.value_of(DELAY).unwrap()).expect("Error parsing frame delay");
        let mut sink = FrameSink::new(size).with_gif(output, delay)?;
        if let Some(dir) = matches.value_of(FRAMEDIR) {
            sink = sink.with_framedir(Path::new(dir));
        }
        anim::drive(frames, sink, |frame| {
            // One more subdivision level per frame, as deep as asked.
            render_gasket(&mut canvas, (frame + 1).min(depth), &palette)
        })?;
    } else {
        let rgb = render_gasket(&mut canvas, depth, &palette);
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
