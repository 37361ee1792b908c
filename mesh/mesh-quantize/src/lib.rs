//! Vertex normalization, grid quantization and reconstruction error.
//!
//! This crate measures how much geometric detail survives when mesh
//! coordinates are squeezed onto a fixed-width integer grid. A vertex array
//! goes through four stages:
//!
//! 1. **Normalize** into a bounded range, recording a [`NormalizationContext`]
//! 2. **Quantize** each coordinate to one of `bins` levels
//! 3. **Dequantize** the levels back to floating point
//! 4. **Denormalize** with the recorded context
//!
//! and the result is compared against the input with MSE and MAE.
//!
//! # Normalization methods
//!
//! - **Min-max**: each axis is mapped onto `[0, 1]` by its own bounds. The
//!   aspect ratio is not preserved but every level of the grid is used.
//! - **Unit-sphere**: vertices are centered on the centroid and scaled by
//!   the largest centroid distance, so they fit inside the unit ball. The
//!   aspect ratio is preserved; coordinates are remapped from `[-1, 1]` to
//!   `[0, 1]` before quantization.
//!
//! Faces are never touched; a transformed vertex array pairs with the
//! original faces through [`mesh_types::IndexedMesh::with_positions`].
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_quantize::{PipelineConfig, round_trip_all};
//!
//! let cube = unit_cube();
//! let results = round_trip_all(&cube.vertices, &PipelineConfig::default()).unwrap();
//!
//! for rt in &results {
//!     let report = rt.error_report(&cube.vertices).unwrap();
//!     println!("{}: mse={:.8} mae={:.8}", rt.method, report.mse, report.mae);
//! }
//! ```
//!
//! # Determinism
//!
//! Every function is pure and sequential. Identical inputs give
//! bit-identical outputs.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod context;
mod error;
mod method;
mod metrics;
mod normalize;
mod pipeline;
mod quantize;

pub use context::{NormalizationContext, denormalize};
pub use error::{QuantizeError, QuantizeResult};
pub use method::{NormalizationMethod, unit_ball_to_unit_interval, unit_interval_to_unit_ball};
pub use metrics::{ErrorReport, MethodReport, error_report, mae, mse};
pub use normalize::{SPAN_EPSILON, normalize_min_max, normalize_unit_sphere};
pub use pipeline::{PipelineConfig, RoundTrip, round_trip, round_trip_all};
pub use quantize::{
    Bins, QuantizedVertex, ROUNDING_BIAS, dequantize, dequantize_value, quantize, quantize_value,
};
