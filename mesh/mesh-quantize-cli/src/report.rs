//! Metrics JSON and the append-only CSV ledger.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mesh_measure::VertexStats;
use mesh_quantize::{Bins, MethodReport, NormalizationMethod};
use serde::Serialize;

/// Everything recorded for one `roundtrip` run.
#[derive(Debug, Serialize)]
pub struct MetricsFile {
    /// File name of the input mesh.
    pub mesh: String,
    /// Tag used in output file names.
    pub tag: String,
    /// Quantization levels per axis.
    pub bins: Bins,
    /// Face count of the input mesh.
    pub faces: usize,
    /// Statistics of the input vertices.
    pub original: VertexStats,
    /// One entry per method, in run order.
    pub methods: Vec<MethodEntry>,
}

/// Per-method section of [`MetricsFile`].
#[derive(Debug, Serialize)]
pub struct MethodEntry {
    /// Method, bins, context and errors, inlined into the entry.
    #[serde(flatten)]
    pub report: MethodReport,
    /// Statistics of the normalized, unquantized vertices.
    pub normalized: VertexStats,
    /// Exported normalized mesh, if the write succeeded.
    pub norm_mesh: Option<PathBuf>,
    /// Exported reconstructed mesh, if the write succeeded.
    pub rec_mesh: Option<PathBuf>,
}

/// Write `value` as pretty-printed JSON.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Column names for a run over `methods`, in order.
pub fn csv_header(methods: &[NormalizationMethod]) -> Vec<String> {
    let mut header = vec!["mesh".to_string(), "tag".to_string(), "bins".to_string()];
    for method in methods {
        for column in [
            "mse", "mae", "mse_x", "mse_y", "mse_z", "mae_x", "mae_y", "mae_z",
        ] {
            header.push(format!("{column}_{method}"));
        }
    }
    header
}

/// One CSV row, matching [`csv_header`] for the same methods.
pub fn csv_row(metrics: &MetricsFile) -> Vec<String> {
    let mut row = vec![
        metrics.mesh.clone(),
        metrics.tag.clone(),
        metrics.bins.to_string(),
    ];
    for entry in &metrics.methods {
        let e = &entry.report.errors;
        row.extend(
            [e.mse, e.mae]
                .into_iter()
                .chain(e.mse_per_axis.iter().copied())
                .chain(e.mae_per_axis.iter().copied())
                .map(|v| v.to_string()),
        );
    }
    row
}

/// Append a row for `metrics` to the CSV at `path`.
///
/// The header is written only when the file does not exist yet.
pub fn append_csv(metrics: &MetricsFile, path: &Path) -> Result<()> {
    let write_header = !path.exists();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut out = String::new();
    if write_header {
        let methods: Vec<_> = metrics.methods.iter().map(|m| m.report.method).collect();
        out.push_str(&csv_line(&csv_header(&methods)));
    }
    out.push_str(&csv_line(&csv_row(metrics)));

    file.write_all(out.as_bytes())
        .with_context(|| format!("Failed to append to {}", path.display()))
}

fn csv_line(fields: &[String]) -> String {
    let mut line = fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push_str("\r\n");
    line
}

// Quote fields containing a separator, a quote or a line break
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_measure::vertex_stats;
    use mesh_quantize::{PipelineConfig, round_trip_all};
    use mesh_types::unit_cube;
    use tempfile::tempdir;

    fn sample_metrics(mesh: &str) -> MetricsFile {
        let cube = unit_cube();
        let config = PipelineConfig::default();
        let methods = round_trip_all(&cube.vertices, &config)
            .unwrap()
            .into_iter()
            .map(|rt| MethodEntry {
                report: rt.report(&cube.vertices).unwrap(),
                normalized: vertex_stats(&rt.normalized).unwrap(),
                norm_mesh: None,
                rec_mesh: None,
            })
            .collect();

        MetricsFile {
            mesh: mesh.to_string(),
            tag: "cube".to_string(),
            bins: config.bins,
            faces: cube.faces.len(),
            original: vertex_stats(&cube.vertices).unwrap(),
            methods,
        }
    }

    #[test]
    fn header_lists_columns_per_method() {
        let header = csv_header(&NormalizationMethod::ALL);
        assert_eq!(header.len(), 3 + 2 * 8);
        assert_eq!(&header[..4], ["mesh", "tag", "bins", "mse_minmax"]);
        assert_eq!(header[10], "mae_z_minmax");
        assert_eq!(header[11], "mse_unitsphere");
        assert_eq!(header[18], "mae_z_unitsphere");
    }

    #[test]
    fn row_matches_header() {
        let metrics = sample_metrics("cube.obj");
        let row = csv_row(&metrics);
        assert_eq!(row.len(), csv_header(&NormalizationMethod::ALL).len());
        assert_eq!(row[2], "1024");
        // corners of the cube sit exactly on the min-max grid
        assert_eq!(row[3], "0");
    }

    #[test]
    fn header_written_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("all_metrics.csv");
        let metrics = sample_metrics("cube.obj");

        append_csv(&metrics, &path).unwrap();
        append_csv(&metrics, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("mesh,tag,bins,"));
        assert!(lines[1].starts_with("cube.obj,cube,1024,"));
        assert_eq!(lines[1], lines[2]);
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");

        let row = csv_row(&sample_metrics("odd,name.obj"));
        assert!(csv_line(&row).starts_with("\"odd,name.obj\",cube,"));
    }

    #[test]
    fn json_flattens_method_reports() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cube_metrics.json");
        write_json(&sample_metrics("cube.obj"), &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["mesh"], "cube.obj");
        assert_eq!(value["bins"], 1024);
        assert_eq!(value["faces"], 12);
        assert_eq!(value["original"]["count"], 8);
        assert_eq!(value["methods"].as_array().map(Vec::len), Some(2));

        let first = &value["methods"][0];
        assert_eq!(first["method"], "minmax");
        assert_eq!(first["context"]["type"], "minmax");
        assert_eq!(first["errors"]["mse"], 0.0);
        assert!(first["norm_mesh"].is_null());
        assert_eq!(value["methods"][1]["method"], "unitsphere");
    }

    #[test]
    fn write_json_reports_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("out.json");
        let err = write_json(&1, &path).unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
