//! Normalization method selection and the quantization-range remap.

use std::fmt;
use std::str::FromStr;

use mesh_types::Point3;
use serde::{Deserialize, Serialize};

use crate::context::NormalizationContext;
use crate::error::{QuantizeError, QuantizeResult};
use crate::normalize::{normalize_min_max, normalize_unit_sphere};

/// The two supported normalization conventions.
///
/// # Example
///
/// ```
/// use mesh_quantize::NormalizationMethod;
///
/// let method: NormalizationMethod = "unitsphere".parse().unwrap();
/// assert_eq!(method, NormalizationMethod::UnitSphere);
/// assert_eq!(method.to_string(), "unitsphere");
/// assert!("pca".parse::<NormalizationMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMethod {
    /// Per-axis bounding box mapped onto `[0, 1]`.
    MinMax,
    /// Centroid-centered, scaled so the farthest vertex lies on the unit
    /// sphere.
    UnitSphere,
}

impl NormalizationMethod {
    /// Every method, in reporting order.
    pub const ALL: [Self; 2] = [Self::MinMax, Self::UnitSphere];

    /// Canonical name used on the command line, in file names and reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MinMax => "minmax",
            Self::UnitSphere => "unitsphere",
        }
    }

    /// Normalize a vertex array with this method.
    ///
    /// # Errors
    ///
    /// Fails on an empty array or non-finite coordinates.
    pub fn normalize(
        self,
        vertices: &[Point3<f64>],
    ) -> QuantizeResult<(Vec<Point3<f64>>, NormalizationContext)> {
        match self {
            Self::MinMax => normalize_min_max(vertices),
            Self::UnitSphere => normalize_unit_sphere(vertices),
        }
    }

    /// Bring normalized points into the `[0, 1]` range the quantizer expects.
    ///
    /// Identity for min-max; the affine map `(v + 1) / 2` for unit-sphere.
    #[must_use]
    pub fn remap_to_unit_interval(self, points: Vec<Point3<f64>>) -> Vec<Point3<f64>> {
        match self {
            Self::MinMax => points,
            Self::UnitSphere => remap(points, unit_ball_to_unit_interval),
        }
    }

    /// Undo [`NormalizationMethod::remap_to_unit_interval`].
    ///
    /// Identity for min-max; `v * 2 - 1` for unit-sphere.
    #[must_use]
    pub fn remap_from_unit_interval(self, points: Vec<Point3<f64>>) -> Vec<Point3<f64>> {
        match self {
            Self::MinMax => points,
            Self::UnitSphere => remap(points, unit_interval_to_unit_ball),
        }
    }
}

/// Map a unit-ball coordinate from `[-1, 1]` onto `[0, 1]`.
///
/// No clamping happens here; the quantizer clamps.
#[inline]
#[must_use]
pub fn unit_ball_to_unit_interval(v: f64) -> f64 {
    (v + 1.0) / 2.0
}

/// Map a `[0, 1]` coordinate back onto `[-1, 1]`.
#[inline]
#[must_use]
pub fn unit_interval_to_unit_ball(v: f64) -> f64 {
    v * 2.0 - 1.0
}

fn remap(mut points: Vec<Point3<f64>>, f: fn(f64) -> f64) -> Vec<Point3<f64>> {
    for p in &mut points {
        p.coords.apply(|c| *c = f(*c));
    }
    points
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NormalizationMethod {
    type Err = QuantizeError;

    fn from_str(s: &str) -> QuantizeResult<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| QuantizeError::UnsupportedMethod {
                name: s.to_string(),
            })
    }
}
