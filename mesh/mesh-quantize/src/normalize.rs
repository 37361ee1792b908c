//! Min-max and unit-sphere normalization.

#![allow(clippy::cast_precision_loss)] // vertex counts stay far below 2^52

use mesh_types::{Aabb, Point3, Vector3};
use tracing::{debug, warn};

use crate::context::NormalizationContext;
use crate::error::{QuantizeError, QuantizeResult};

/// Floor applied to every normalization divisor.
///
/// A flat axis (or a single repeated point) would otherwise divide by zero.
pub const SPAN_EPSILON: f64 = 1e-12;

/// Map each axis independently onto `[0, 1]` using the vertex bounds.
///
/// `Vn = (V - vmin) / max(vmax - vmin, SPAN_EPSILON)`. A flat axis maps to
/// zero. The returned context keeps the un-floored bounds, so the inverse
/// restores a flat axis exactly.
///
/// # Errors
///
/// Returns [`QuantizeError::EmptyVertexSet`] for an empty array and
/// [`QuantizeError::NonFiniteCoordinate`] if any coordinate is NaN or
/// infinite.
///
/// # Example
///
/// ```
/// use mesh_quantize::{NormalizationContext, normalize_min_max};
/// use mesh_types::{Point3, Vector3};
///
/// let points = [Point3::new(0.0, 0.0, 5.0), Point3::new(4.0, 2.0, 5.0)];
/// let (normalized, ctx) = normalize_min_max(&points).unwrap();
///
/// assert_eq!(normalized[1], Point3::new(1.0, 1.0, 0.0));
/// assert_eq!(
///     ctx,
///     NormalizationContext::MinMax {
///         vmin: Vector3::new(0.0, 0.0, 5.0),
///         vmax: Vector3::new(4.0, 2.0, 5.0),
///     }
/// );
/// ```
pub fn normalize_min_max(
    vertices: &[Point3<f64>],
) -> QuantizeResult<(Vec<Point3<f64>>, NormalizationContext)> {
    check_vertices(vertices)?;

    let bounds = Aabb::from_points(vertices.iter());
    let vmin = bounds.min.coords;
    let vmax = bounds.max.coords;

    let flat = bounds.flat_axes();
    if flat.iter().any(|&f| f) {
        warn!(
            flat_x = flat[0],
            flat_y = flat[1],
            flat_z = flat[2],
            "Degenerate axis in min-max normalization, mapping it to 0"
        );
    }

    let span = (vmax - vmin).map(|s| s.max(SPAN_EPSILON));
    let normalized = vertices
        .iter()
        .map(|p| Point3::from((p.coords - vmin).component_div(&span)))
        .collect();

    debug!(
        vertices = vertices.len(),
        vmin = ?vmin.as_slice(),
        vmax = ?vmax.as_slice(),
        "Min-max normalized"
    );

    Ok((normalized, NormalizationContext::MinMax { vmin, vmax }))
}

/// Center on the centroid and scale so the farthest vertex lies on the unit
/// sphere.
///
/// Every output coordinate lies in `[-1, 1]`. The radius is floored at
/// [`SPAN_EPSILON`] and the floored value is what the context stores.
///
/// # Errors
///
/// Same as [`normalize_min_max`].
///
/// # Example
///
/// ```
/// use mesh_quantize::normalize_unit_sphere;
/// use mesh_types::Point3;
///
/// let points = [Point3::new(-2.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0)];
/// let (normalized, _) = normalize_unit_sphere(&points).unwrap();
///
/// assert_eq!(normalized[0], Point3::new(-1.0, 0.0, 0.0));
/// assert_eq!(normalized[1], Point3::new(1.0, 0.0, 0.0));
/// ```
pub fn normalize_unit_sphere(
    vertices: &[Point3<f64>],
) -> QuantizeResult<(Vec<Point3<f64>>, NormalizationContext)> {
    check_vertices(vertices)?;

    let n = vertices.len() as f64;
    let center = vertices
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords)
        / n;

    let max_distance = vertices
        .iter()
        .map(|p| (p.coords - center).norm())
        .fold(0.0, f64::max);

    if max_distance < SPAN_EPSILON {
        warn!(
            max_distance,
            "All vertices coincide in unit-sphere normalization, radius floored"
        );
    }
    let radius = max_distance.max(SPAN_EPSILON);

    let normalized = vertices
        .iter()
        .map(|p| Point3::from((p.coords - center) / radius))
        .collect();

    debug!(
        vertices = vertices.len(),
        center = ?center.as_slice(),
        radius,
        "Unit-sphere normalized"
    );

    Ok((normalized, NormalizationContext::UnitSphere { center, radius }))
}

fn check_vertices(vertices: &[Point3<f64>]) -> QuantizeResult<()> {
    if vertices.is_empty() {
        return Err(QuantizeError::EmptyVertexSet);
    }
    match vertices
        .iter()
        .position(|p| !p.coords.iter().all(|c| c.is_finite()))
    {
        Some(index) => Err(QuantizeError::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}
