//! Uniform grid quantization of unit-interval coordinates.
//!
//! A coordinate `v` in `[0, 1]` maps to the lattice index
//! `floor(v * (bins - 1) + ROUNDING_BIAS)`, and an index `q` maps back to
//! `q / (bins - 1)`. The grid therefore includes both endpoints and has a
//! step of `1 / (bins - 1)`; flooring means the reconstruction error of a
//! single coordinate is at most one step.

// Lattice indices are bounded by `bins - 1 <= u32::MAX`, and levels are
// clamped to `[0, bins - 1]` before the float-to-int cast.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use std::fmt;

use mesh_types::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{QuantizeError, QuantizeResult};

/// Bias added before flooring.
///
/// Counteracts representation error that would otherwise push a value
/// meant to sit exactly on a level (for example `2/3 * 3`) just below it.
pub const ROUNDING_BIAS: f64 = 1e-9;

/// Three lattice indices, one per axis, each in `[0, bins - 1]`.
pub type QuantizedVertex = [u32; 3];

/// Number of quantization levels per axis.
///
/// Always at least 2, so the grid has a non-zero step.
///
/// # Example
///
/// ```
/// use mesh_quantize::Bins;
///
/// let bins = Bins::new(1024).unwrap();
/// assert_eq!(bins.max_level(), 1023);
/// assert!(Bins::new(1).is_err());
/// assert_eq!(Bins::default(), bins);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Bins(u32);

impl Bins {
    /// Default resolution: 1024 levels (10 bits) per axis.
    pub const DEFAULT: Self = Self(1024);

    /// Validate a bin count.
    ///
    /// # Errors
    ///
    /// Returns [`QuantizeError::InvalidBins`] if `bins < 2`.
    pub const fn new(bins: u32) -> QuantizeResult<Self> {
        if bins < 2 {
            Err(QuantizeError::InvalidBins { bins })
        } else {
            Ok(Self(bins))
        }
    }

    /// The number of levels.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The highest lattice index, `bins - 1`.
    #[must_use]
    pub const fn max_level(self) -> u32 {
        self.0 - 1
    }

    /// Distance between adjacent levels in the unit interval.
    #[must_use]
    pub fn step(self) -> f64 {
        1.0 / f64::from(self.max_level())
    }
}

impl Default for Bins {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Bins {
    type Error = QuantizeError;

    fn try_from(bins: u32) -> QuantizeResult<Self> {
        Self::new(bins)
    }
}

impl From<Bins> for u32 {
    fn from(bins: Bins) -> Self {
        bins.0
    }
}

impl fmt::Display for Bins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantize one coordinate.
///
/// Values outside `[0, 1]` are clamped, so every input yields a valid
/// lattice index. NaN maps to 0.
///
/// # Example
///
/// ```
/// use mesh_quantize::{Bins, quantize_value};
///
/// let bins = Bins::new(4).unwrap();
/// assert_eq!(quantize_value(0.0, bins), 0);
/// assert_eq!(quantize_value(2.0 / 3.0, bins), 2);
/// assert_eq!(quantize_value(0.99, bins), 2);
/// assert_eq!(quantize_value(1.0, bins), 3);
/// assert_eq!(quantize_value(7.5, bins), 3);
/// assert_eq!(quantize_value(-0.2, bins), 0);
/// ```
#[must_use]
pub fn quantize_value(v: f64, bins: Bins) -> u32 {
    let levels = f64::from(bins.max_level());
    let q = (v.clamp(0.0, 1.0) * levels + ROUNDING_BIAS).floor();
    q.clamp(0.0, levels) as u32
}

/// Map a lattice index back to the unit interval.
///
/// Indices produced by [`quantize_value`] land in `[0, 1]`.
#[must_use]
pub fn dequantize_value(q: u32, bins: Bins) -> f64 {
    f64::from(q) / f64::from(bins.max_level())
}

/// Quantize every coordinate of a unit-interval point array.
#[must_use]
pub fn quantize(points: &[Point3<f64>], bins: Bins) -> Vec<QuantizedVertex> {
    points
        .iter()
        .map(|p| {
            [
                quantize_value(p.x, bins),
                quantize_value(p.y, bins),
                quantize_value(p.z, bins),
            ]
        })
        .collect()
}

/// Reconstruct unit-interval points from lattice indices.
#[must_use]
pub fn dequantize(quantized: &[QuantizedVertex], bins: Bins) -> Vec<Point3<f64>> {
    quantized
        .iter()
        .map(|&[x, y, z]| {
            Point3::new(
                dequantize_value(x, bins),
                dequantize_value(y, bins),
                dequantize_value(z, bins),
            )
        })
        .collect()
}
