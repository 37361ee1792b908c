//! Per-axis descriptive statistics of a vertex array.

#![allow(clippy::cast_precision_loss)] // vertex counts stay far below 2^52

use mesh_types::{Aabb, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, MeasureResult};

/// Summary of a vertex array, computed independently per axis.
///
/// `std` is the population standard deviation (divides by `count`).
///
/// # Example
///
/// ```
/// use mesh_measure::vertex_stats;
/// use mesh_types::Point3;
///
/// let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 4.0, 6.0)];
/// let stats = vertex_stats(&points).unwrap();
///
/// assert_eq!(stats.count, 2);
/// assert_eq!(stats.mean, Point3::new(1.0, 2.0, 3.0));
/// assert_eq!(stats.std.x, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexStats {
    /// Number of vertices.
    pub count: usize,
    /// Per-axis minimum.
    pub min: Point3<f64>,
    /// Per-axis maximum.
    pub max: Point3<f64>,
    /// Per-axis mean (the centroid).
    pub mean: Point3<f64>,
    /// Per-axis population standard deviation.
    pub std: Vector3<f64>,
}

impl VertexStats {
    /// Extent per axis (`max - min`).
    #[must_use]
    pub fn span(&self) -> Vector3<f64> {
        self.max - self.min
    }
}

/// Compute count, min, max, mean and standard deviation per axis.
///
/// # Errors
///
/// Returns [`MeasureError::EmptyVertexSet`] if `points` is empty.
pub fn vertex_stats(points: &[Point3<f64>]) -> MeasureResult<VertexStats> {
    if points.is_empty() {
        return Err(MeasureError::EmptyVertexSet);
    }

    let n = points.len() as f64;
    let bounds = Aabb::from_points(points.iter());
    let mean = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords)
        / n;

    // Two-pass variance keeps precision for meshes far from the origin
    let variance = points.iter().fold(Vector3::zeros(), |acc, p| {
        let d = p.coords - mean;
        acc + d.component_mul(&d)
    }) / n;

    Ok(VertexStats {
        count: points.len(),
        min: bounds.min,
        max: bounds.max,
        mean: Point3::from(mean),
        std: variance.map(f64::sqrt),
    })
}
