//! Mesh file I/O.
//!
//! This crate provides loading and saving of triangle meshes:
//!
//! - **OBJ** (Wavefront) - ASCII, geometry only
//! - **PLY** (Polygon File Format) - Binary and ASCII
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_mesh, save_mesh};
//!
//! // Format detected from the .obj extension
//! let mesh = load_mesh("model.obj").unwrap();
//!
//! // Save to a different format
//! save_mesh(&mesh, "model.ply").unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod obj;
mod ply;

pub use error::{IoError, IoResult};
pub use obj::{load_obj, parse_obj, save_obj};
pub use ply::{load_ply, save_ply};

use std::path::Path;

use mesh_types::{IndexedMesh, MeshBounds, MeshTopology};
use tracing::{debug, info};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// OBJ (Wavefront) format.
    Obj,
    /// PLY (Polygon File Format).
    Ply,
}

impl MeshFormat {
    /// Detect format from file extension (case-insensitive).
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "obj" => Some(Self::Obj),
            "ply" => Some(Self::Ply),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Obj => "obj",
            Self::Ply => "ply",
        }
    }

    fn detect(path: &Path) -> IoResult<Self> {
        Self::from_path(path).ok_or_else(|| IoError::UnknownFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("(none)")
                .to_string(),
        })
    }
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be read
/// - The file content is invalid for the detected format
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let mesh = match MeshFormat::detect(path)? {
        MeshFormat::Obj => load_obj(path)?,
        MeshFormat::Ply => load_ply(path)?,
    };

    info!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "Loaded mesh"
    );
    let bounds = mesh.bounds();
    debug!(min = ?bounds.min, max = ?bounds.max, "Mesh bounds");

    Ok(mesh)
}

/// Save a mesh to a file, detecting format from extension.
///
/// PLY files are written as binary little-endian.
///
/// # Errors
///
/// Returns an error if:
/// - The file format cannot be determined from the extension
/// - The file cannot be written
pub fn save_mesh<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> IoResult<()> {
    let path = path.as_ref();
    match MeshFormat::detect(path)? {
        MeshFormat::Obj => save_obj(mesh, path),
        MeshFormat::Ply => save_ply(mesh, path, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::unit_cube;

    #[test]
    fn format_from_path_obj() {
        assert_eq!(MeshFormat::from_path("model.obj"), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_path("model.OBJ"), Some(MeshFormat::Obj));
    }

    #[test]
    fn format_from_path_ply() {
        assert_eq!(MeshFormat::from_path("model.ply"), Some(MeshFormat::Ply));
        assert_eq!(
            MeshFormat::from_path("/path/to/model.PLY"),
            Some(MeshFormat::Ply)
        );
    }

    #[test]
    fn format_from_path_unknown() {
        assert_eq!(MeshFormat::from_path("model.stl"), None);
        assert_eq!(MeshFormat::from_path("model"), None);
        assert_eq!(MeshFormat::from_path(""), None);
    }

    #[test]
    fn format_extension() {
        assert_eq!(MeshFormat::Obj.extension(), "obj");
        assert_eq!(MeshFormat::Ply.extension(), "ply");
    }

    #[test]
    fn load_unknown_extension() {
        let err = load_mesh("model.xyz").unwrap_err();
        assert!(matches!(err, IoError::UnknownFormat { extension } if extension == "xyz"));
    }

    #[test]
    fn save_and_load_by_extension() {
        let cube = unit_cube();
        let dir = tempfile::tempdir().unwrap();

        for name in ["cube.obj", "cube.ply"] {
            let path = dir.path().join(name);
            save_mesh(&cube, &path).unwrap();
            let loaded = load_mesh(&path).unwrap();
            assert_eq!(loaded, cube, "{name} did not round-trip");
        }
    }
}
