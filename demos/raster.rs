//! Runs JSON serialized clipping or rasterization job and prints the result as JSON
#![deny(warnings)]

use rasterclip::*;
use std::{
    env,
    fs::File,
    io::{BufReader, Read},
};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

type Error = Box<dyn std::error::Error>;

#[derive(Debug, Default)]
struct Args {
    input_file: String,
    trace: bool,
    region: Option<ClipRegion>,
    algorithm: ClipAlgorithm,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args::default();
        let mut positional = 0;
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "raster".to_owned());
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => {
                    positional = 0;
                    break;
                }
                "-t" => {
                    result.trace = true;
                }
                "-r" => {
                    let rect: Rect = args
                        .next()
                        .ok_or("-r requires \"xmin ymin xmax ymax\" argument")?
                        .parse()?;
                    result.region.replace(rect.into());
                }
                "-p" => {
                    let polygon: ConvexPolygon = args
                        .next()
                        .ok_or("-p requires \"x1 y1 x2 y2 ...\" argument")?
                        .parse()?;
                    result.region.replace(polygon.into());
                }
                "-m" => {
                    result.algorithm = ClipAlgorithm::Midpoint;
                }
                "-c" => {
                    result.algorithm = ClipAlgorithm::Parametric;
                }
                _ => {
                    positional += 1;
                    match positional {
                        1 => result.input_file = arg,
                        _ => return Err("unexpected positional argument".into()),
                    }
                }
            }
        }
        if positional < 1 {
            eprintln!("Runs clipping or rasterization job and prints the result as JSON");
            eprintln!("\nUSAGE:");
            eprintln!("    {} [-t] [-r <rect> | -p <polygon>] [-m | -c] <job.json | segments>", cmd);
            eprintln!("\nARGS:");
            eprintln!("    -t                 include step trace in the output");
            eprintln!("    -r <rect>          clip segment list against \"xmin ymin xmax ymax\"");
            eprintln!("    -p <polygon>       clip segment list against convex polygon");
            eprintln!("    -m                 use midpoint subdivision clipper for rectangles");
            eprintln!("    -c                 use parametric (Cyrus-Beck) clipper for rectangles");
            eprintln!("    <job.json>         JSON job, `-` reads from stdin");
            eprintln!("    <segments>         segment list when region is specified");
            std::process::exit(1);
        }
        Ok(result)
    }
}

fn read_input(path: &str) -> Result<String, Error> {
    let mut text = String::new();
    if path == "-" {
        std::io::stdin().read_to_string(&mut text)?;
    } else {
        BufReader::new(File::open(path)?).read_to_string(&mut text)?;
    }
    Ok(text)
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    let text = read_input(&args.input_file)?;
    let job = match args.region {
        // plain text segment list clipped against the region from the command line
        Some(region) => Job::Clip {
            segments: parse_segments(&text)?,
            region,
            algorithm: args.algorithm,
        },
        None => Job::from_json(&text)?,
    };
    tracing::debug!("[job] {}", job.name());

    let output = job.run(args.trace);
    println!("{}", output.to_json()?);
    Ok(())
}
