//! QuadMerge CLI - merge four quadrant captures into one scene.
//!
//! Takes four RGB images, four thermal images, and four point-annotation
//! XML files (all in quadrant order: top-left, top-right, bottom-left,
//! bottom-right) and writes the merged RGB mosaic, thermal mosaic, and
//! annotation document.

mod error;

use std::error::Error as _;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quadmerge::{run, ReconstructRequest};

use crate::error::CliError;

/// Stitch four quadrant captures back into one scene.
#[derive(Debug, Parser)]
#[command(name = "quadmerge", version, about)]
struct Cli {
    /// Four RGB quadrant images, in quadrant order
    /// (top-left, top-right, bottom-left, bottom-right)
    #[arg(long, num_args = 4, value_name = "PATH", required = true)]
    image: Vec<PathBuf>,

    /// Four thermal quadrant images, same order
    #[arg(long, num_args = 4, value_name = "PATH", required = true)]
    thermal: Vec<PathBuf>,

    /// Four annotation XML files, same order
    #[arg(long, num_args = 4, value_name = "PATH", required = true)]
    annotations: Vec<PathBuf>,

    /// Output path for the merged RGB mosaic
    #[arg(long, value_name = "PATH")]
    out_image: PathBuf,

    /// Output path for the merged thermal mosaic
    #[arg(long, value_name = "PATH")]
    out_thermal: PathBuf,

    /// Output path for the merged annotation XML
    #[arg(long, value_name = "PATH")]
    out_annotations: PathBuf,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "info",
        1 => "quadmerge=debug,info",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Convert a clap-collected path list into the fixed quadrant array.
fn quadrant_paths(paths: Vec<PathBuf>, flag: &str) -> Result<[PathBuf; 4], CliError> {
    let count = paths.len();
    paths
        .try_into()
        .map_err(|_| CliError::Args(format!("--{flag} takes exactly 4 paths, got {count}")))
}

fn execute(cli: Cli) -> Result<(), CliError> {
    let request = ReconstructRequest::new(
        quadrant_paths(cli.image, "image")?,
        quadrant_paths(cli.thermal, "thermal")?,
        quadrant_paths(cli.annotations, "annotations")?,
        cli.out_image,
        cli.out_thermal,
        cli.out_annotations,
    );

    let report = run(&request)?;
    println!("{report}");
    println!("  image:       {}", request.output_primary.display());
    println!("  thermal:     {}", request.output_thermal.display());
    println!("  annotations: {}", request.output_annotations.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(error) = execute(cli) {
        eprintln!("error: {error}");
        let mut source = error.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        process::exit(1);
    }
}
