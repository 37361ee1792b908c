//! Parameters captured by normalization and the matching inverse.

use mesh_types::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::method::NormalizationMethod;

/// What a normalizer measured, enough to undo it.
///
/// The variant selects the inverse transform, so a context can only ever
/// be applied with the inverse of the method that produced it.
///
/// Serializes with a `type` tag:
///
/// ```
/// use mesh_quantize::NormalizationContext;
/// use mesh_types::Vector3;
///
/// let ctx = NormalizationContext::UnitSphere {
///     center: Vector3::new(0.5, 1.0, 2.0),
///     radius: 4.0,
/// };
/// let json = serde_json::to_string(&ctx).unwrap();
/// assert_eq!(json, r#"{"type":"unitsphere","center":[0.5,1.0,2.0],"radius":4.0}"#);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NormalizationContext {
    /// Per-axis bounds of the original vertices.
    MinMax {
        /// Per-axis minimum.
        vmin: Vector3<f64>,
        /// Per-axis maximum, before any divisor floor.
        vmax: Vector3<f64>,
    },
    /// Centroid and enclosing radius of the original vertices.
    UnitSphere {
        /// Centroid (per-axis mean).
        center: Vector3<f64>,
        /// Largest centroid distance, floored at
        /// [`SPAN_EPSILON`](crate::SPAN_EPSILON).
        radius: f64,
    },
}

impl NormalizationContext {
    /// The method that produced this context.
    #[must_use]
    pub const fn method(&self) -> NormalizationMethod {
        match self {
            Self::MinMax { .. } => NormalizationMethod::MinMax,
            Self::UnitSphere { .. } => NormalizationMethod::UnitSphere,
        }
    }

    /// Map one normalized point back into the original coordinate frame.
    #[must_use]
    pub fn denormalize_point(&self, p: &Point3<f64>) -> Point3<f64> {
        match *self {
            Self::MinMax { vmin, vmax } => {
                Point3::from(p.coords.component_mul(&(vmax - vmin)) + vmin)
            }
            Self::UnitSphere { center, radius } => Point3::from(p.coords * radius + center),
        }
    }

    /// Map a normalized point array back into the original coordinate frame.
    #[must_use]
    pub fn denormalize(&self, points: &[Point3<f64>]) -> Vec<Point3<f64>> {
        points.iter().map(|p| self.denormalize_point(p)).collect()
    }
}

/// Invert a normalization, dispatching on the context variant.
///
/// # Example
///
/// ```
/// use mesh_quantize::{NormalizationMethod, denormalize};
/// use mesh_types::Point3;
///
/// let points = [Point3::new(1.0, 2.0, 3.0), Point3::new(3.0, 6.0, 3.0)];
/// let (normalized, ctx) = NormalizationMethod::MinMax.normalize(&points).unwrap();
/// assert_eq!(denormalize(&normalized, &ctx), points);
/// ```
#[must_use]
pub fn denormalize(points: &[Point3<f64>], context: &NormalizationContext) -> Vec<Point3<f64>> {
    context.denormalize(points)
}
