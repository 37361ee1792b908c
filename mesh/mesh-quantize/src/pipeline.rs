//! The normalize, quantize, dequantize, denormalize round trip.

use mesh_types::Point3;
use tracing::{debug, info};

use crate::context::NormalizationContext;
use crate::error::QuantizeResult;
use crate::method::NormalizationMethod;
use crate::metrics::{ErrorReport, MethodReport, error_report};
use crate::quantize::{Bins, dequantize, quantize};

/// Which methods to run and at what resolution.
///
/// # Example
///
/// ```
/// use mesh_quantize::{Bins, NormalizationMethod, PipelineConfig};
///
/// let config = PipelineConfig::default()
///     .with_bins(Bins::new(256).unwrap())
///     .with_methods(vec![NormalizationMethod::UnitSphere]);
///
/// assert_eq!(config.bins.get(), 256);
/// assert_eq!(config.methods, vec![NormalizationMethod::UnitSphere]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Quantization levels per axis.
    pub bins: Bins,
    /// Methods to run, in order.
    pub methods: Vec<NormalizationMethod>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bins: Bins::default(),
            methods: NormalizationMethod::ALL.to_vec(),
        }
    }
}

impl PipelineConfig {
    /// Set the bin count.
    #[must_use]
    pub fn with_bins(mut self, bins: Bins) -> Self {
        self.bins = bins;
        self
    }

    /// Set the methods to run.
    #[must_use]
    pub fn with_methods(mut self, methods: Vec<NormalizationMethod>) -> Self {
        self.methods = methods;
        self
    }
}

/// Output of one round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTrip {
    /// Method used.
    pub method: NormalizationMethod,
    /// Quantization levels per axis.
    pub bins: Bins,
    /// Parameters of the forward normalization.
    pub context: NormalizationContext,
    /// Normalized but unquantized vertices (`[0, 1]` for min-max, unit ball
    /// for unit-sphere).
    pub normalized: Vec<Point3<f64>>,
    /// Vertices after quantization and the inverse transform, in the
    /// original frame.
    pub reconstructed: Vec<Point3<f64>>,
}

impl RoundTrip {
    /// Error of the reconstruction against `original`.
    ///
    /// # Errors
    ///
    /// Fails if `original` is not the array this round trip was run on
    /// (length mismatch).
    pub fn error_report(&self, original: &[Point3<f64>]) -> QuantizeResult<ErrorReport> {
        error_report(original, &self.reconstructed)
    }

    /// Bundle the error with the method, bins and context for reporting.
    ///
    /// # Errors
    ///
    /// See [`RoundTrip::error_report`].
    pub fn report(&self, original: &[Point3<f64>]) -> QuantizeResult<MethodReport> {
        Ok(MethodReport {
            method: self.method,
            bins: self.bins,
            context: self.context,
            errors: self.error_report(original)?,
        })
    }
}

/// Run the full round trip for one method.
///
/// # Errors
///
/// Returns [`QuantizeError::EmptyVertexSet`](crate::QuantizeError::EmptyVertexSet)
/// or [`QuantizeError::NonFiniteCoordinate`](crate::QuantizeError::NonFiniteCoordinate)
/// from normalization.
///
/// # Example
///
/// ```
/// use mesh_quantize::{Bins, NormalizationMethod, round_trip};
/// use mesh_types::Point3;
///
/// let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 5.0, 1.0)];
/// let rt = round_trip(&points, NormalizationMethod::MinMax, Bins::default()).unwrap();
///
/// assert_eq!(rt.reconstructed, points);
/// assert_eq!(rt.error_report(&points).unwrap().mse, 0.0);
/// ```
pub fn round_trip(
    vertices: &[Point3<f64>],
    method: NormalizationMethod,
    bins: Bins,
) -> QuantizeResult<RoundTrip> {
    let (normalized, context) = method.normalize(vertices)?;

    let unit = method.remap_to_unit_interval(normalized.clone());
    let quantized = quantize(&unit, bins);
    debug!(
        method = %method,
        bins = bins.get(),
        vertices = quantized.len(),
        "Quantized"
    );

    let restored = method.remap_from_unit_interval(dequantize(&quantized, bins));
    let reconstructed = context.denormalize(&restored);

    Ok(RoundTrip {
        method,
        bins,
        context,
        normalized,
        reconstructed,
    })
}

/// Run the round trip for every configured method, in order.
///
/// # Errors
///
/// Stops at the first failing method; see [`round_trip`].
pub fn round_trip_all(
    vertices: &[Point3<f64>],
    config: &PipelineConfig,
) -> QuantizeResult<Vec<RoundTrip>> {
    info!(
        vertices = vertices.len(),
        bins = config.bins.get(),
        methods = config.methods.len(),
        "Starting quantization round trip"
    );

    config
        .methods
        .iter()
        .map(|&method| {
            let rt = round_trip(vertices, method, config.bins)?;
            debug!(method = %method, "Round trip complete");
            Ok(rt)
        })
        .collect()
}
