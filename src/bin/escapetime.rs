extern crate clap;
extern crate env_logger;
extern crate escapetime;
extern crate failure;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use escapetime::escape::{escape_time, trace, TraceStep, LANDMARKS};
use escapetime::parse::{parse_complex, parse_range, validate_pair, validate_range};
use escapetime::{ColorRamp, GridSpec, Palette, Renderer};
use num::Complex;
use std::str::FromStr;

const OUTPUT: &str = "output";
const REAL: &str = "real";
const IMAG: &str = "imag";
const STEP: &str = "step";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const PALETTE: &str = "palette";
const TRACE: &str = "trace";
const CAP: &str = "cap";
const DEMO: &str = "demo";

// The iteration cap used to decide the fate of the narrated points.
const VERDICT_ITERATIONS: usize = 50;

fn args<'a>(default_threads: &'a str, max_threads: usize) -> ArgMatches<'a> {
    App::new("escapetime")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .required_unless_one(&[TRACE, DEMO])
                .help("Output image; the format follows the extension (png, ppm, ...)"),
        )
        .arg(
            Arg::with_name(REAL)
                .long(REAL)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2,2")
                .validator(|s| match parse_range(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse the real range".to_string()),
                })
                .help("Real range, inclusive, as LOW,HIGH"),
        )
        .arg(
            Arg::with_name(IMAG)
                .long(IMAG)
                .short("m")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2,2")
                .validator(|s| match parse_range(&s) {
                    Some(_) => Ok(()),
                    None => Err("Could not parse the imaginary range".to_string()),
                })
                .help("Imaginary range, inclusive, as LOW,HIGH"),
        )
        .arg(
            Arg::with_name(STEP)
                .long(STEP)
                .short("s")
                .takes_value(true)
                .default_value("0.01")
                .validator(|s| {
                    validate_range(
                        &s,
                        1e-9,
                        10.0,
                        "Could not parse step size",
                        "Step size must be between 1e-9 and 10",
                    )
                })
                .help("Distance between neighbouring samples"),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value(default_threads)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in the sweep"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("50")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 100000",
                    )
                })
                .help("Maximum number of iterations per sample"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .possible_values(&["classic", "fire", "ocean", "grayscale"])
                .default_value("classic")
                .help("Anchor colors of the gradient"),
        )
        .arg(
            Arg::with_name(TRACE)
                .long(TRACE)
                .takes_value(true)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse the point to trace"))
                .help("Print the first iterations of one point, given as RE,IM"),
        )
        .arg(
            Arg::with_name(CAP)
                .long(CAP)
                .takes_value(true)
                .default_value("10")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1000,
                        "Could not parse display cap",
                        "Display cap must be between 1 and 1000",
                    )
                })
                .help("Number of iterations shown by --trace and --demo"),
        )
        .arg(
            Arg::with_name(DEMO)
                .long(DEMO)
                .help("Walk through four sample points, two inside and two outside"),
        )
        .get_matches()
}

fn print_step(step: &TraceStep) {
    if step.escaped() {
        println!(
            "n={}: |z_{}| = {:.2} > 2 -> ESCAPES!",
            step.n, step.n, step.magnitude
        );
    } else {
        println!(
            "n={}: z_{} = {:.2} + {:.2}i, |z_{}| = {:.2}",
            step.n, step.n, step.z.re, step.z.im, step.n, step.magnitude
        );
    }
}

fn narrate(label: &str, c: Complex<f64>, cap: usize) -> Result<(), failure::Error> {
    println!("Calculating for point {}: c = {:.1} + {:.1}i", label, c.re, c.im);
    for step in trace(c, cap) {
        print_step(&step);
    }
    let escape = escape_time(c, VERDICT_ITERATIONS)?;
    if escape < VERDICT_ITERATIONS {
        println!("Point {}: ESCAPES at n={}", label, escape);
    } else {
        println!("Point {}: INSIDE SET", label);
    }
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let cap = usize::from_str(matches.value_of(CAP).unwrap_or("10"))?;

    if matches.is_present(DEMO) {
        for (i, landmark) in LANDMARKS.iter().enumerate() {
            if i > 0 {
                println!();
            }
            narrate(landmark.label, landmark.c, cap)?;
        }
    }

    if let Some(point) = matches.value_of(TRACE) {
        let c: Complex<f64> = parse_complex(point)
            .ok_or_else(|| failure::err_msg("Error parsing the point to trace"))?;
        narrate(point, c, cap)?;
    }

    if let Some(output) = matches.value_of(OUTPUT) {
        let real = matches
            .value_of(REAL)
            .and_then(parse_range)
            .ok_or_else(|| failure::err_msg("Error parsing the real range"))?;
        let imag = matches
            .value_of(IMAG)
            .and_then(parse_range)
            .ok_or_else(|| failure::err_msg("Error parsing the imaginary range"))?;
        let step = f64::from_str(matches.value_of(STEP).unwrap_or("0.01"))?;
        let threads = usize::from_str(matches.value_of(THREADS).unwrap_or("1"))?;
        let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap_or("50"))?;
        let palette = Palette::from_str(matches.value_of(PALETTE).unwrap_or("classic"))
            .map_err(failure::err_msg)?;

        let grid = GridSpec::new(real, imag, step)?;
        let ramp = ColorRamp::for_iterations(&palette.anchors(), iterations)?;
        let renderer = Renderer::new(grid, iterations)?;
        info!(
            "sweeping {}x{} samples, {} iterations, {} palette",
            grid.width(),
            grid.height(),
            iterations,
            palette.name()
        );
        let image = renderer.render(&ramp, threads)?;
        image.save(output)?;
        info!("wrote {}", output);
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let max_threads = num_cpus::get();
    let default_threads = max_threads.to_string();
    let matches = args(&default_threads, max_threads);

    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
