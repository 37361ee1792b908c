//! PLY (Polygon File Format) support.
//!
//! # Supported Properties
//!
//! - Vertex positions (x, y, z) as `float` or `double` - required
//! - Face vertex indices (`vertex_indices` or `vertex_index`) - optional
//!
//! Meshes are written with `double` coordinates so normalized and
//! reconstructed geometry survives export bit-for-bit.
//!
//! # Format Variants
//!
//! - **ASCII** - Human-readable, larger files
//! - **Binary Little Endian** - Compact, fast to read/write
//! - **Binary Big Endian** - Read only
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_ply, save_ply};
//!
//! let mesh = load_ply("model.ply").unwrap();
//! save_ply(&mesh, "output.ply", true).unwrap(); // Binary
//! ```

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use mesh_types::{IndexedMesh, Point3};
use ply_rs::parser::Parser;
use ply_rs::ply::{
    Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType,
    ScalarType,
};
use ply_rs::writer::Writer;

use crate::error::{IoError, IoResult};

/// Load a mesh from a PLY file.
///
/// Supports ASCII, binary little-endian, and binary big-endian formats.
/// Polygonal faces are fan-triangulated.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The file is not valid PLY format
/// - A vertex lacks an x, y or z property
/// - A face references a vertex that does not exist
/// - A face has fewer than three vertices
pub fn load_ply<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::from_open(path, e))?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();

    let header = parser
        .read_header(&mut reader)
        .map_err(|e| IoError::invalid_content(format!("failed to parse PLY header: {e}")))?;

    let payload = parser
        .read_payload(&mut reader, &header)
        .map_err(|e| IoError::invalid_content(format!("failed to read PLY payload: {e}")))?;

    let mut mesh = IndexedMesh::new();

    if let Some(vertex_elements) = payload.get("vertex") {
        mesh.vertices.reserve(vertex_elements.len());
        for (i, element) in vertex_elements.iter().enumerate() {
            let coord = |key: &str| {
                get_float_property(element, key).ok_or_else(|| {
                    IoError::invalid_content(format!("vertex {i} has no numeric '{key}' property"))
                })
            };
            mesh.vertices
                .push(Point3::new(coord("x")?, coord("y")?, coord("z")?));
        }
    }

    let vertex_count = mesh.vertices.len();
    if let Some(face_elements) = payload.get("face") {
        mesh.faces.reserve(face_elements.len());
        for (face_no, element) in face_elements.iter().enumerate() {
            let indices = get_index_list(element);
            if indices.len() < 3 {
                return Err(IoError::invalid_content(format!(
                    "face {face_no} needs at least three vertices, got {}",
                    indices.len()
                )));
            }
            for &index in &indices {
                if usize::try_from(index).map_or(true, |i| i >= vertex_count) {
                    return Err(IoError::FaceIndexOutOfRange {
                        face: mesh.faces.len(),
                        index,
                        vertex_count,
                    });
                }
            }
            // Range-checked above, so the casts are lossless
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            for i in 1..indices.len() - 1 {
                mesh.faces.push([
                    indices[0] as u32,
                    indices[i] as u32,
                    indices[i + 1] as u32,
                ]);
            }
        }
    }

    Ok(mesh)
}

/// Extract a coordinate property from a PLY element.
fn get_float_property(element: &DefaultElement, key: &str) -> Option<f64> {
    match element.get(key)? {
        Property::Float(v) => Some(f64::from(*v)),
        Property::Double(v) => Some(*v),
        Property::Int(v) => Some(f64::from(*v)),
        Property::Short(v) => Some(f64::from(*v)),
        _ => None,
    }
}

/// Extract vertex index list from a face element.
fn get_index_list(element: &DefaultElement) -> Vec<i64> {
    for key in &["vertex_indices", "vertex_index"] {
        if let Some(prop) = element.get(*key) {
            return match prop {
                Property::ListInt(v) => v.iter().map(|&i| i64::from(i)).collect(),
                Property::ListUInt(v) => v.iter().map(|&i| i64::from(i)).collect(),
                Property::ListUChar(v) => v.iter().map(|&i| i64::from(i)).collect(),
                Property::ListChar(v) => v.iter().map(|&i| i64::from(i)).collect(),
                Property::ListShort(v) => v.iter().map(|&i| i64::from(i)).collect(),
                Property::ListUShort(v) => v.iter().map(|&i| i64::from(i)).collect(),
                _ => continue,
            };
        }
    }
    Vec::new()
}

/// Save a mesh to a PLY file.
///
/// # Arguments
///
/// * `mesh` - The mesh to save
/// * `path` - Output file path
/// * `binary` - If true, save as binary little-endian; if false, save as ASCII
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_ply<P: AsRef<Path>>(mesh: &IndexedMesh, path: P, binary: bool) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    if binary {
        save_ply_binary(mesh, &mut writer)?;
    } else {
        save_ply_ascii(mesh, &mut writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save mesh as binary PLY (little-endian).
///
/// Written by hand: ply-rs emits the element count instead of the list
/// length for binary list properties.
fn save_ply_binary<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "ply")?;
    writeln!(writer, "format binary_little_endian 1.0")?;
    writeln!(writer, "comment Generated by mesh-io")?;
    writeln!(writer, "element vertex {}", mesh.vertices.len())?;
    writeln!(writer, "property double x")?;
    writeln!(writer, "property double y")?;
    writeln!(writer, "property double z")?;
    writeln!(writer, "element face {}", mesh.faces.len())?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;

    for p in &mesh.vertices {
        writer.write_all(&p.x.to_le_bytes())?;
        writer.write_all(&p.y.to_le_bytes())?;
        writer.write_all(&p.z.to_le_bytes())?;
    }

    for face in &mesh.faces {
        writer.write_all(&[3u8])?;
        for &i in face {
            let i = i32::try_from(i).map_err(|_| {
                IoError::invalid_content(format!("vertex index {i} does not fit a PLY int"))
            })?;
            writer.write_all(&i.to_le_bytes())?;
        }
    }

    Ok(())
}

/// Save mesh as ASCII PLY using ply-rs.
fn save_ply_ascii<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    let mut ply = Ply::<DefaultElement>::new();
    ply.header.encoding = Encoding::Ascii;
    ply.header
        .comments
        .push("Generated by mesh-io".to_string());

    let mut vertex_def = ElementDef::new("vertex".to_string());
    for axis in ["x", "y", "z"] {
        vertex_def.properties.add(PropertyDef::new(
            axis.to_string(),
            PropertyType::Scalar(ScalarType::Double),
        ));
    }
    vertex_def.count = mesh.vertices.len();
    ply.header.elements.add(vertex_def);

    let mut face_def = ElementDef::new("face".to_string());
    face_def.properties.add(PropertyDef::new(
        "vertex_indices".to_string(),
        PropertyType::List(ScalarType::UChar, ScalarType::Int),
    ));
    face_def.count = mesh.faces.len();
    ply.header.elements.add(face_def);

    let vertex_elements = mesh
        .vertices
        .iter()
        .map(|p| {
            let mut element = DefaultElement::new();
            element.insert("x".to_string(), Property::Double(p.x));
            element.insert("y".to_string(), Property::Double(p.y));
            element.insert("z".to_string(), Property::Double(p.z));
            element
        })
        .collect();
    ply.payload.insert("vertex".to_string(), vertex_elements);

    let face_elements = mesh
        .faces
        .iter()
        .map(|face| {
            let indices = face
                .iter()
                .map(|&i| {
                    i32::try_from(i).map_err(|_| {
                        IoError::invalid_content(format!(
                            "vertex index {i} does not fit a PLY int"
                        ))
                    })
                })
                .collect::<IoResult<Vec<_>>>()?;
            let mut element = DefaultElement::new();
            element.insert("vertex_indices".to_string(), Property::ListInt(indices));
            Ok(element)
        })
        .collect::<IoResult<Vec<_>>>()?;
    ply.payload.insert("face".to_string(), face_elements);

    Writer::new()
        .write_ply(writer, &mut ply)
        .map_err(|e| IoError::invalid_content(format!("failed to write PLY: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::{MeshTopology, unit_cube};

    fn create_test_triangle() -> IndexedMesh {
        IndexedMesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0 / 3.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 1e-12),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn roundtrip_binary_is_exact() {
        let original = create_test_triangle();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.ply");

        save_ply(&original, &path, true).unwrap();
        let loaded = load_ply(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn roundtrip_ascii() {
        let original = create_test_triangle();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_ascii.ply");

        save_ply(&original, &path, false).unwrap();
        let loaded = load_ply(&path).unwrap();

        assert_eq!(loaded.face_count(), original.face_count());
        assert_eq!(loaded.vertex_count(), original.vertex_count());
        for (orig, load) in original.vertices.iter().zip(&loaded.vertices) {
            approx::assert_relative_eq!(*orig, *load, epsilon = 1e-12);
        }
    }

    #[test]
    fn roundtrip_cube_binary() {
        let original = unit_cube();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.ply");

        save_ply(&original, &path, true).unwrap();
        let loaded = load_ply(&path).unwrap();

        assert_eq!(loaded.faces, original.faces);
    }

    #[test]
    fn point_cloud_without_faces() {
        let cloud = IndexedMesh::from_parts(vec![Point3::new(1.0, 2.0, 3.0)], Vec::new());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cloud.ply");

        save_ply(&cloud, &path, true).unwrap();
        let loaded = load_ply(&path).unwrap();

        assert_eq!(loaded.vertices, cloud.vertices);
        assert!(loaded.faces.is_empty());
    }

    #[test]
    fn quad_face_is_triangulated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.ply");
        let src = "ply\nformat ascii 1.0\nelement vertex 4\nproperty float x\n\
                   property float y\nproperty float z\nelement face 1\n\
                   property list uchar int vertex_indices\nend_header\n\
                   0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n";
        std::fs::write(&path, src).unwrap();

        let loaded = load_ply(&path).unwrap();
        assert_eq!(loaded.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn rejects_out_of_range_face() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.ply");
        let src = "ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\n\
                   property float y\nproperty float z\nelement face 1\n\
                   property list uchar int vertex_indices\nend_header\n\
                   0 0 0\n1 0 0\n1 1 0\n3 0 1 7\n";
        std::fs::write(&path, src).unwrap();

        assert!(matches!(
            load_ply(&path),
            Err(IoError::FaceIndexOutOfRange { index: 7, .. })
        ));
    }

    #[test]
    fn rejects_face_with_two_vertices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edge.ply");
        let src = "ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\n\
                   property float y\nproperty float z\nelement face 2\n\
                   property list uchar int vertex_indices\nend_header\n\
                   0 0 0\n1 0 0\n1 1 0\n3 0 1 2\n2 0 1\n";
        std::fs::write(&path, src).unwrap();

        let err = load_ply(&path).unwrap_err();
        assert!(matches!(err, IoError::InvalidContent { .. }));
        assert!(err.to_string().contains("face 1"), "{err}");
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_ply("nonexistent_file_12345.ply");
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }
}
