//! Mesh quantization toolkit.
//!
//! This umbrella crate re-exports the mesh-* crates behind one dependency,
//! providing a unified API for loading meshes, describing their vertices and
//! measuring how well they survive grid quantization.
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh::prelude::*;
//!
//! // Load a mesh
//! let mesh = load_mesh("model.obj").unwrap();
//!
//! // Describe it
//! let stats = vertex_stats(&mesh.vertices).unwrap();
//! println!("{} vertices, centroid {:?}", stats.count, stats.mean);
//!
//! // Quantize with every method and compare
//! for rt in round_trip_all(&mesh.vertices, &PipelineConfig::default()).unwrap() {
//!     let errors = rt.error_report(&mesh.vertices).unwrap();
//!     println!("{}: mse={:.8}", rt.method, errors.mse);
//!
//!     // Keep the connectivity, swap in the reconstructed positions
//!     let out = mesh.with_positions(rt.reconstructed).unwrap();
//!     save_mesh(&out, format!("model_{}_quant.ply", rt.method)).unwrap();
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `IndexedMesh`, `Aabb`
//! - [`io`] - File I/O for OBJ and PLY formats
//! - [`measure`] - Vertex statistics
//! - [`quantize`] - Normalization, quantization and reconstruction error

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![doc(html_root_url = "https://docs.rs/mesh/0.7.0")]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Aabb`.
pub use mesh_types as types;

/// File I/O for OBJ and PLY formats.
pub use mesh_io as io;

/// Vertex statistics.
pub use mesh_measure as measure;

/// Normalization, quantization and reconstruction error.
pub use mesh_quantize as quantize;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh quantization.
///
/// This module re-exports the most commonly used types and traits.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, IndexedMesh, MeshBounds, MeshTopology, Point3, Vector3};

    // I/O
    pub use mesh_io::{MeshFormat, load_mesh, save_mesh};

    // Measurement
    pub use mesh_measure::{VertexStats, vertex_stats};

    // Quantization round trip
    pub use mesh_quantize::{
        Bins, ErrorReport, NormalizationContext, NormalizationMethod, PipelineConfig, RoundTrip,
        round_trip, round_trip_all,
    };
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        // Verify prelude types are accessible
        use prelude::*;

        let mesh = IndexedMesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(PipelineConfig::default().bins, Bins::DEFAULT);
    }

    #[test]
    fn test_module_reexports() {
        // Verify all modules are accessible
        let _ = types::IndexedMesh::new();
        let _ = quantize::PipelineConfig::default();
        assert!(measure::vertex_stats(&[]).is_err());
        assert_eq!(io::MeshFormat::Ply.extension(), "ply");
    }
}
