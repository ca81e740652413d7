extern crate clap;
extern crate failure;
extern crate fractalis;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use fractalis::anim::{self, FrameSink};
use fractalis::cli::{parse_complex, parse_size, validate_pair, validate_range};
use fractalis::curves::{snowflake, snowflake_colored};
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
const RANDOM_COLORS: &str = "random-colors";
const ANIMATE: &str = "animate";
const FRAMES: &str = "frames";
const DELAY: &str = "delay";
const FRAMEDIR: &str = "framedir";

fn args<'a>() -> ArgMatches<'a> {
    App::new("koch")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Koch snowflake renderer")
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
                .default_value("5")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        10,
                        "Could not parse subdivision depth",
                        "Subdivision depth must be between 0 and 10",
                    )
                })
                .help("Subdivision depth of the snowflake"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .default_value("-0.7,-0.7")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the drawing plane"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .default_value("0.7,0.7")
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
            Arg::with_name(RANDOM_COLORS)
                .required(false)
                .long(RANDOM_COLORS)
                .help("Color each subdivision with its own random color"),
        )
        .arg(
            Arg::with_name(ANIMATE)
                .required(false)
                .long(ANIMATE)
                .help("Ramp the depth up over the frames and render a GIF"),
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

/// Draws one fully expanded snowflake and returns the shaded frame.
fn render_flake(canvas: &mut Canvas, depth: usize, random_colors: bool, palette: &Palette) -> Vec<u8> {
    canvas.clear();
    if random_colors {
        let (tagged, classes) = snowflake_colored(depth);
        for (segment, class) in tagged {
            canvas.draw_segment(&segment, class);
        }
        let colors = Palette::random_indexed((classes - 1) as usize);
        colors.apply(canvas.values(), classes - 1)
    } else {
        for segment in snowflake(depth) {
            canvas.draw_segment(&segment, 1);
        }
        palette.apply(canvas.values(), 1)
    }
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
    let random_colors = matches.is_present(RANDOM_COLORS);

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
            let current = anim::ramp_depth(depth, frame, frames);
            render_flake(&mut canvas, current, random_colors, &palette)
        })?;
    } else {
        let rgb = render_flake(&mut canvas, depth, random_colors, &palette);
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
