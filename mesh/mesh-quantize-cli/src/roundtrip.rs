//! `meshq roundtrip`: quantize a mesh with each method and report the error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use mesh_io::save_ply;
use mesh_measure::{VertexStats, vertex_stats};
use mesh_quantize::{
    Bins, MethodReport, NormalizationMethod, PipelineConfig, RoundTrip, round_trip_all,
};
use mesh_types::{IndexedMesh, Point3};
use owo_colors::OwoColorize;
use tracing::{debug, info, warn};

use crate::report::{MethodEntry, MetricsFile, append_csv, write_json};

#[derive(Args, Debug)]
pub struct RoundtripArgs {
    /// Path to an .obj or .ply mesh
    #[arg(long)]
    pub mesh: PathBuf,

    /// Output directory for meshes and metrics
    #[arg(long, default_value = "outputs")]
    pub outdir: PathBuf,

    /// Quantization levels per axis (at least 2)
    #[arg(long, default_value = "1024", value_parser = parse_bins)]
    pub bins: Bins,

    /// Normalization method: minmax, unitsphere or all
    #[arg(long, default_value = "all", value_parser = parse_methods)]
    pub method: MethodSelection,

    /// Suffix for output file names (default: mesh file stem)
    #[arg(long)]
    pub tag: Option<String>,

    /// Write ASCII instead of binary PLY
    #[arg(long)]
    pub ascii: bool,
}

/// Methods chosen on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSelection(pub Vec<NormalizationMethod>);

fn parse_bins(s: &str) -> Result<Bins, String> {
    let n: u32 = s.parse().map_err(|e| format!("invalid bin count '{s}': {e}"))?;
    Bins::new(n).map_err(|e| e.to_string())
}

fn parse_methods(s: &str) -> Result<MethodSelection, String> {
    if s == "all" {
        return Ok(MethodSelection(NormalizationMethod::ALL.to_vec()));
    }
    s.parse::<NormalizationMethod>()
        .map(|m| MethodSelection(vec![m]))
        .map_err(|e| e.to_string())
}

pub fn run(args: &RoundtripArgs) -> Result<()> {
    let metrics = execute(args)?;
    print_summary(&metrics);
    Ok(())
}

/// Run the pipeline and write every output, returning what was recorded.
///
/// Only loading and the computation itself are fatal. Failed writes are
/// logged and leave the corresponding path out of the metrics.
fn execute(args: &RoundtripArgs) -> Result<MetricsFile> {
    let mesh = mesh_io::load_mesh(&args.mesh)
        .with_context(|| format!("Failed to load mesh {}", args.mesh.display()))?;

    let mesh_name = args
        .mesh
        .file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
    let tag = args.tag.clone().unwrap_or_else(|| {
        args.mesh
            .file_stem()
            .map_or_else(|| "mesh".to_string(), |s| s.to_string_lossy().into_owned())
    });

    println!("Loaded: {}", args.mesh.display());
    println!(
        "Vertices: {} | Faces: {}",
        mesh.vertices.len(),
        mesh.faces.len()
    );
    println!("Quantization bins: {}\n", args.bins);

    let config = PipelineConfig::default()
        .with_bins(args.bins)
        .with_methods(args.method.0.clone());
    let results = round_trip_all(&mesh.vertices, &config)
        .with_context(|| format!("Round trip failed for {}", args.mesh.display()))?;

    let metrics_dir = args.outdir.join("metrics");
    if let Err(e) = fs::create_dir_all(&metrics_dir) {
        warn!(path = %metrics_dir.display(), error = %e, "Cannot create output directory");
    }

    let mut methods = Vec::with_capacity(results.len());
    for rt in &results {
        let (report, normalized) = measure(rt, &mesh.vertices)?;

        let norm_path = output_path(&args.outdir, &tag, rt.method, "norm");
        let rec_path = output_path(&args.outdir, &tag, rt.method, "quant");
        let norm_mesh = export(&mesh, &rt.normalized, &norm_path, args.ascii);
        let rec_mesh = export(&mesh, &rt.reconstructed, &rec_path, args.ascii);

        log_round_trip(rt);
        methods.push(MethodEntry {
            report,
            normalized,
            norm_mesh,
            rec_mesh,
        });
    }

    let metrics = MetricsFile {
        mesh: mesh_name,
        tag: tag.clone(),
        bins: args.bins,
        faces: mesh.faces.len(),
        original: vertex_stats(&mesh.vertices)
            .with_context(|| format!("Cannot compute statistics of {}", args.mesh.display()))?,
        methods,
    };

    let json_path = metrics_dir.join(format!("{tag}_metrics.json"));
    match write_json(&metrics, &json_path) {
        Ok(()) => info!(path = %json_path.display(), "Wrote metrics JSON"),
        Err(e) => warn!(error = %e, "Skipping metrics JSON"),
    }

    let csv_path = metrics_dir.join("all_metrics.csv");
    match append_csv(&metrics, &csv_path) {
        Ok(()) => info!(path = %csv_path.display(), "Appended metrics CSV"),
        Err(e) => warn!(error = %e, "Skipping metrics CSV"),
    }

    Ok(metrics)
}

/// Error report and normalized-vertex statistics of one round trip.
fn measure(rt: &RoundTrip, original: &[Point3<f64>]) -> Result<(MethodReport, VertexStats)> {
    let report = rt
        .report(original)
        .with_context(|| format!("Cannot measure {} reconstruction", rt.method))?;
    let normalized = vertex_stats(&rt.normalized)
        .with_context(|| format!("Cannot compute {} normalized statistics", rt.method))?;

    info!(
        method = %rt.method,
        mse = report.errors.mse,
        mae = report.errors.mae,
        "Round trip complete"
    );
    Ok((report, normalized))
}

fn output_path(outdir: &Path, tag: &str, method: NormalizationMethod, kind: &str) -> PathBuf {
    outdir.join(format!("{tag}_{method}_{kind}.ply"))
}

/// Save `positions` with the original faces. Returns the path on success.
fn export(
    mesh: &IndexedMesh,
    positions: &[Point3<f64>],
    path: &Path,
    ascii: bool,
) -> Option<PathBuf> {
    let out = mesh.with_positions(positions.to_vec())?;
    match save_ply(&out, path, !ascii) {
        Ok(()) => {
            debug!(path = %path.display(), "Exported mesh");
            Some(path.to_path_buf())
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Skipping mesh export");
            None
        }
    }
}

fn log_round_trip(rt: &RoundTrip) {
    debug!(
        method = %rt.method,
        context = ?rt.context,
        "Normalization context"
    );
}

fn print_summary(metrics: &MetricsFile) {
    println!("{}", "Errors (lower is better):".bold());
    for entry in &metrics.methods {
        println!(
            " MSE  {:<11}: {:.8}",
            entry.report.method.to_string(),
            entry.report.errors.mse
        );
    }
    for entry in &metrics.methods {
        println!(
            " MAE  {:<11}: {:.8}",
            entry.report.method.to_string(),
            entry.report.errors.mae
        );
    }
    println!();

    println!("{}", "Saved:".bold());
    for entry in &metrics.methods {
        let method = entry.report.method;
        for (kind, path) in [
            ("normalized", &entry.norm_mesh),
            ("reconstructed", &entry.rec_mesh),
        ] {
            if let Some(path) = path {
                println!(" - {method}_{kind:<14} -> {}", path.display());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use mesh_types::unit_cube;
    use tempfile::tempdir;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: RoundtripArgs,
    }

    fn parse(argv: &[&str]) -> Result<RoundtripArgs, clap::Error> {
        let argv = std::iter::once("meshq").chain(argv.iter().copied());
        TestCli::try_parse_from(argv).map(|c| c.args)
    }

    fn sample_mesh(dir: &Path) -> PathBuf {
        let mut mesh = unit_cube();
        for v in &mut mesh.vertices {
            // stretch off the unit cube so min-max has something to rescale
            *v = Point3::new(v.x * 3.0 + 1.0, v.y * 0.5, v.z * 2.0 - 4.0);
        }
        let path = dir.join("box.obj");
        mesh_io::save_mesh(&mesh, &path).unwrap();
        path
    }

    #[test]
    fn defaults() {
        let args = parse(&["--mesh", "m.obj"]).unwrap();
        assert_eq!(args.outdir, PathBuf::from("outputs"));
        assert_eq!(args.bins, Bins::DEFAULT);
        assert_eq!(args.method.0, NormalizationMethod::ALL.to_vec());
        assert!(args.tag.is_none());
        assert!(!args.ascii);
    }

    #[test]
    fn single_method() {
        let args = parse(&["--mesh", "m.obj", "--method", "unitsphere"]).unwrap();
        assert_eq!(args.method.0, vec![NormalizationMethod::UnitSphere]);
    }

    #[test]
    fn invalid_arguments_are_rejected() {
        assert!(parse(&["--mesh", "m.obj", "--method", "pca"]).is_err());
        assert!(parse(&["--mesh", "m.obj", "--bins", "1"]).is_err());
        assert!(parse(&["--mesh", "m.obj", "--bins", "-4"]).is_err());
    }

    #[test]
    fn writes_meshes_and_metrics() {
        let dir = tempdir().unwrap();
        let mesh_path = sample_mesh(dir.path());
        let outdir = dir.path().join("out");

        let args = parse(&[
            "--mesh",
            mesh_path.to_str().unwrap(),
            "--outdir",
            outdir.to_str().unwrap(),
            "--bins",
            "256",
        ])
        .unwrap();
        let metrics = execute(&args).unwrap();

        assert_eq!(metrics.tag, "box");
        assert_eq!(metrics.mesh, "box.obj");
        assert_eq!(metrics.methods.len(), 2);
        for method in ["minmax", "unitsphere"] {
            for kind in ["norm", "quant"] {
                let path = outdir.join(format!("box_{method}_{kind}.ply"));
                assert!(path.exists(), "{} missing", path.display());
            }
        }
        assert!(outdir.join("metrics/box_metrics.json").exists());
        assert!(outdir.join("metrics/all_metrics.csv").exists());

        // the reconstructed mesh keeps the original connectivity
        let rec = mesh_io::load_mesh(outdir.join("box_unitsphere_quant.ply")).unwrap();
        assert_eq!(rec.faces, unit_cube().faces);
        assert_eq!(
            metrics.methods[1].rec_mesh.as_deref(),
            Some(outdir.join("box_unitsphere_quant.ply").as_path())
        );
    }

    #[test]
    fn custom_tag_and_ascii() {
        let dir = tempdir().unwrap();
        let mesh_path = sample_mesh(dir.path());
        let outdir = dir.path().join("out");

        let args = parse(&[
            "--mesh",
            mesh_path.to_str().unwrap(),
            "--outdir",
            outdir.to_str().unwrap(),
            "--method",
            "minmax",
            "--tag",
            "run1",
            "--ascii",
        ])
        .unwrap();
        let metrics = execute(&args).unwrap();

        assert_eq!(metrics.methods.len(), 1);
        let norm = fs::read_to_string(outdir.join("run1_minmax_norm.ply")).unwrap();
        assert!(norm.contains("format ascii 1.0"));
        assert!(!outdir.join("run1_unitsphere_norm.ply").exists());
    }

    #[test]
    fn unwritable_outputs_do_not_abort() {
        let dir = tempdir().unwrap();
        let mesh_path = sample_mesh(dir.path());
        // a regular file where the output directory should be
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "").unwrap();

        let args = parse(&[
            "--mesh",
            mesh_path.to_str().unwrap(),
            "--outdir",
            blocker.to_str().unwrap(),
        ])
        .unwrap();
        let metrics = execute(&args).unwrap();

        assert_eq!(metrics.methods.len(), 2);
        assert!(metrics.methods.iter().all(|m| m.norm_mesh.is_none()));
        assert!(metrics.methods.iter().all(|m| m.rec_mesh.is_none()));
    }

    #[test]
    fn measure_reports_the_round_trip_error() {
        let vertices = unit_cube().vertices;
        let rt = mesh_quantize::round_trip(
            &vertices,
            NormalizationMethod::UnitSphere,
            Bins::new(8).unwrap(),
        )
        .unwrap();

        let (report, normalized) = measure(&rt, &vertices).unwrap();
        assert_eq!(report.errors, rt.error_report(&vertices).unwrap());
        assert_eq!(normalized.count, vertices.len());

        let err = measure(&rt, &vertices[..4]).unwrap_err();
        assert!(
            err.to_string().contains("Cannot measure unitsphere reconstruction"),
            "{err}"
        );
    }

    #[test]
    fn missing_mesh_is_fatal() {
        let dir = tempdir().unwrap();
        let args = parse(&[
            "--mesh",
            dir.path().join("absent.obj").to_str().unwrap(),
        ])
        .unwrap();
        assert!(execute(&args).is_err());
    }
}
