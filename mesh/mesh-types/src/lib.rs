//! Core mesh types for the quantization toolkit.
//!
//! This crate provides the foundational types shared by every other crate
//! in the workspace:
//!
//! - [`IndexedMesh`] - Vertex positions plus triangle faces that index them
//! - [`Aabb`] - Axis-aligned bounding box
//! - [`MeshTopology`] / [`MeshBounds`] - Minimal read-only mesh interface
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, Point3, MeshTopology};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod traits;

pub use bounds::Aabb;
pub use mesh::{IndexedMesh, unit_cube};
pub use traits::{MeshBounds, MeshTopology};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
