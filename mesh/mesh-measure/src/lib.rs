//! Measurement tools for mesh vertex data.
//!
//! Computes the per-axis descriptive statistics (count, min, max, mean and
//! standard deviation) reported for original and normalized geometry.
//!
//! # Example
//!
//! ```
//! use mesh_types::unit_cube;
//! use mesh_measure::vertex_stats;
//!
//! let cube = unit_cube();
//! let stats = vertex_stats(&cube.vertices).unwrap();
//!
//! assert_eq!(stats.count, 8);
//! assert!((stats.mean.x - 0.5).abs() < 1e-12);
//! assert!((stats.std.z - 0.5).abs() < 1e-12);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod stats;

pub use error::{MeasureError, MeasureResult};
pub use stats::{VertexStats, vertex_stats};
