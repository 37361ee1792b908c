//! Reconstruction error between an original and a reconstructed array.

#![allow(clippy::cast_precision_loss)] // vertex counts stay far below 2^52

use mesh_types::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::context::NormalizationContext;
use crate::error::{QuantizeError, QuantizeResult};
use crate::method::NormalizationMethod;
use crate::quantize::Bins;

/// Mean squared and mean absolute error, overall and per axis.
///
/// Overall values average over all `3N` components; per-axis values
/// average over the `N` vertices. The overall value is therefore the mean
/// of the three per-axis values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Mean squared error over every coordinate.
    pub mse: f64,
    /// Mean squared error of each axis.
    pub mse_per_axis: Vector3<f64>,
    /// Mean absolute error over every coordinate.
    pub mae: f64,
    /// Mean absolute error of each axis.
    pub mae_per_axis: Vector3<f64>,
}

/// Everything reported for one method on one mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodReport {
    /// Normalization method.
    pub method: NormalizationMethod,
    /// Quantization levels per axis.
    pub bins: Bins,
    /// Parameters needed to invert the normalization.
    pub context: NormalizationContext,
    /// Reconstruction error against the original vertices.
    pub errors: ErrorReport,
}

/// Mean squared error over all coordinates.
///
/// # Errors
///
/// See [`error_report`].
pub fn mse(original: &[Point3<f64>], reconstructed: &[Point3<f64>]) -> QuantizeResult<f64> {
    error_report(original, reconstructed).map(|r| r.mse)
}

/// Mean absolute error over all coordinates.
///
/// # Errors
///
/// See [`error_report`].
pub fn mae(original: &[Point3<f64>], reconstructed: &[Point3<f64>]) -> QuantizeResult<f64> {
    error_report(original, reconstructed).map(|r| r.mae)
}

/// Compute MSE and MAE, overall and per axis, in one pass.
///
/// # Errors
///
/// Returns [`QuantizeError::ShapeMismatch`] if the arrays differ in length
/// and [`QuantizeError::EmptyVertexSet`] if both are empty.
///
/// # Example
///
/// ```
/// use mesh_quantize::error_report;
/// use mesh_types::{Point3, Vector3};
///
/// let a = [Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)];
/// let b = [Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 1.0, 3.0)];
/// let report = error_report(&a, &b).unwrap();
///
/// assert_eq!(report.mse_per_axis, Vector3::new(0.5, 0.0, 2.0));
/// assert_eq!(report.mae_per_axis, Vector3::new(0.5, 0.0, 1.0));
/// assert_eq!(report.mse, 2.5 / 3.0);
/// assert_eq!(report.mae, 0.5);
/// ```
pub fn error_report(
    original: &[Point3<f64>],
    reconstructed: &[Point3<f64>],
) -> QuantizeResult<ErrorReport> {
    if original.len() != reconstructed.len() {
        return Err(QuantizeError::ShapeMismatch {
            expected: original.len(),
            actual: reconstructed.len(),
        });
    }
    if original.is_empty() {
        return Err(QuantizeError::EmptyVertexSet);
    }

    let (sq, abs) = original.iter().zip(reconstructed).fold(
        (Vector3::zeros(), Vector3::zeros()),
        |(sq, abs): (Vector3<f64>, Vector3<f64>), (a, b)| {
            let d = a - b;
            (sq + d.component_mul(&d), abs + d.abs())
        },
    );

    let n = original.len() as f64;
    let mse_per_axis = sq / n;
    let mae_per_axis = abs / n;

    Ok(ErrorReport {
        mse: sq.sum() / (3.0 * n),
        mse_per_axis,
        mae: abs.sum() / (3.0 * n),
        mae_per_axis,
    })
}
