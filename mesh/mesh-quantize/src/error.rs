//! Error types for the quantization pipeline.

use thiserror::Error;

/// Result type for quantization operations.
pub type QuantizeResult<T> = Result<T, QuantizeError>;

/// Errors that can occur while normalizing, quantizing or comparing
/// vertex arrays.
///
/// Degenerate geometry (flat axes, coincident points) is not an error; it
/// is absorbed by the divisor floor in the normalizers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantizeError {
    /// The vertex array has no vertices.
    #[error("empty vertex set")]
    EmptyVertexSet,

    /// A vertex has a NaN or infinite coordinate.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the first offending vertex.
        index: usize,
    },

    /// Fewer than two quantization levels were requested.
    #[error("bins must be at least 2, got {bins}")]
    InvalidBins {
        /// The rejected bin count.
        bins: u32,
    },

    /// The normalization method name is not recognized.
    #[error("unsupported normalization method: '{name}' (expected 'minmax' or 'unitsphere')")]
    UnsupportedMethod {
        /// The rejected name.
        name: String,
    },

    /// Two arrays that must be compared element-wise differ in length.
    #[error("shape mismatch: expected {expected} vertices, got {actual}")]
    ShapeMismatch {
        /// Length of the reference array.
        expected: usize,
        /// Length of the compared array.
        actual: usize,
    },
}
