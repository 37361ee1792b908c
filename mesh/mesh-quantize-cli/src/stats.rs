//! `meshq stats`: descriptive statistics of a mesh's vertices.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use mesh_measure::{VertexStats, vertex_stats};
use owo_colors::OwoColorize;
use tracing::{info, warn};

use crate::report::write_json;

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Path to an .obj or .ply mesh
    #[arg(long)]
    pub mesh: PathBuf,

    /// Do not write the <mesh>.stats.json side-car
    #[arg(long)]
    pub no_save: bool,
}

pub fn run(args: &StatsArgs) -> Result<()> {
    let stats = compute(&args.mesh)?;
    print_stats(&args.mesh, &stats);

    if !args.no_save {
        let out_path = side_car_path(&args.mesh);
        match write_json(&stats, &out_path) {
            Ok(()) => println!("Saved stats -> {}", out_path.display()),
            Err(e) => warn!(path = %out_path.display(), error = %e, "Skipping stats side-car"),
        }
    }

    Ok(())
}

fn compute(mesh_path: &Path) -> Result<VertexStats> {
    let mesh = mesh_io::load_mesh(mesh_path)
        .with_context(|| format!("Failed to load mesh {}", mesh_path.display()))?;
    let stats = vertex_stats(&mesh.vertices)
        .with_context(|| format!("Cannot compute statistics of {}", mesh_path.display()))?;

    info!(vertices = stats.count, "Computed vertex statistics");
    Ok(stats)
}

/// `model.obj` -> `model.stats.json`, next to the mesh.
fn side_car_path(mesh_path: &Path) -> PathBuf {
    mesh_path.with_extension("stats.json")
}

fn print_stats(mesh_path: &Path, stats: &VertexStats) {
    println!("{} {}", "File:".bold(), mesh_path.display());
    println!("Number of vertices: {}", stats.count);
    println!("Min:  {}", fmt_triple(stats.min.iter()));
    println!("Max:  {}", fmt_triple(stats.max.iter()));
    println!("Mean: {}", fmt_triple(stats.mean.iter()));
    println!("Std:  {}", fmt_triple(stats.std.iter()));
}

pub fn fmt_triple<'a>(values: impl Iterator<Item = &'a f64>) -> String {
    let parts: Vec<_> = values.map(|v| format!("{v:.8}")).collect();
    format!("[{}]", parts.join(", "))
}
