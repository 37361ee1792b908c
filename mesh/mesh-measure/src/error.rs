//! Error types for measurement operations.

use thiserror::Error;

/// Result type alias for measurement operations.
pub type MeasureResult<T> = Result<T, MeasureError>;

/// Errors that can occur during measurement operations.
#[derive(Debug, Error)]
pub enum MeasureError {
    /// Input has no vertices.
    #[error("cannot compute statistics of an empty vertex set")]
    EmptyVertexSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeasureError::EmptyVertexSet;
        assert!(format!("{err}").contains("empty"));
    }
}
