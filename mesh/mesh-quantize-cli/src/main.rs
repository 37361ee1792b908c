//! meshq: mesh vertex statistics and quantization round-trip reports.
//!
//! # Commands
//!
//! - `meshq stats --mesh <PATH>` - Print vertex statistics and save a
//!   `<mesh>.stats.json` side-car
//! - `meshq roundtrip --mesh <PATH>` - Normalize, quantize and reconstruct
//!   the mesh with each method, export the meshes and record the error
//!
//! Logging goes to stderr and honors `RUST_LOG`.

mod logging;
mod report;
mod roundtrip;
mod stats;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Mesh quantization analysis
///
/// Measures how much geometry survives a fixed-width integer grid.
#[derive(Parser)]
#[command(name = "meshq")]
#[command(about = "Vertex statistics and quantization error for mesh files", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print vertex count, min, max, mean and std of a mesh
    Stats(stats::StatsArgs),

    /// Run the normalize/quantize/reconstruct round trip and report errors
    Roundtrip(roundtrip::RoundtripArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_subscriber(cli.verbose);

    match cli.command {
        Commands::Stats(args) => stats::run(&args),
        Commands::Roundtrip(args) => roundtrip::run(&args),
    }
}
