//! OBJ (Wavefront) file format support.
//!
//! Only geometry is read: `v` records become vertex positions and `f`
//! records become faces. Texture coordinates, normals, groups and material
//! statements are skipped.
//!
//! # Face Records
//!
//! ```text
//! f 1 2 3            # plain indices
//! f 1/1/1 2/2/2 3/3/3  # position/texture/normal, only position is used
//! f -3 -2 -1         # negative indices count back from the latest vertex
//! f 1 2 3 4          # polygons are fan-triangulated
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use mesh_types::{IndexedMesh, Point3};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// Load a mesh from an OBJ file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - A `v` or `f` record is malformed
/// - A face references a vertex that does not exist
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_obj;
///
/// let mesh = load_obj("bunny.obj").unwrap();
/// println!("Loaded {} vertices", mesh.vertices.len());
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IoError::from_open(path, e))?;
    parse_obj(BufReader::new(file))
}

/// Parse OBJ content from any buffered reader.
///
/// # Errors
///
/// Same conditions as [`load_obj`], minus file access.
///
/// # Example
///
/// ```
/// use mesh_io::parse_obj;
///
/// let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nf 1 2 4 3\n";
/// let mesh = parse_obj(src.as_bytes()).unwrap();
/// assert_eq!(mesh.vertices.len(), 4);
/// assert_eq!(mesh.faces, vec![[0, 1, 3], [0, 3, 2]]);
/// ```
pub fn parse_obj<R: BufRead>(reader: R) -> IoResult<IndexedMesh> {
    let mut vertices: Vec<Point3<f64>> = Vec::new();
    // Resolved zero-based indices, checked once all vertices are known
    let mut faces: Vec<[i64; 3]> = Vec::new();
    let mut polygon: Vec<i64> = Vec::with_capacity(4);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let mut parts = line.split_whitespace();

        match parts.next() {
            Some("v") => {
                let mut coord = [0.0_f64; 3];
                for c in &mut coord {
                    let token = parts.next().ok_or_else(|| {
                        IoError::invalid_content(format!(
                            "line {}: vertex needs three coordinates",
                            line_no + 1
                        ))
                    })?;
                    *c = token.parse()?;
                }
                vertices.push(Point3::new(coord[0], coord[1], coord[2]));
            }
            Some("f") => {
                polygon.clear();
                for token in parts {
                    polygon.push(resolve_index(token, vertices.len(), line_no + 1)?);
                }
                if polygon.len() < 3 {
                    return Err(IoError::invalid_content(format!(
                        "line {}: face needs at least three vertices, got {}",
                        line_no + 1,
                        polygon.len()
                    )));
                }
                for i in 1..polygon.len() - 1 {
                    faces.push([polygon[0], polygon[i], polygon[i + 1]]);
                }
            }
            _ => {}
        }
    }

    let vertex_count = vertices.len();
    let faces = faces
        .into_iter()
        .enumerate()
        .map(|(face, indices)| {
            let mut out = [0u32; 3];
            for (slot, &index) in out.iter_mut().zip(indices.iter()) {
                *slot = u32::try_from(index)
                    .ok()
                    .filter(|&i| (i as usize) < vertex_count)
                    .ok_or(IoError::FaceIndexOutOfRange {
                        face,
                        index,
                        vertex_count,
                    })?;
            }
            Ok(out)
        })
        .collect::<IoResult<Vec<_>>>()?;

    debug!(
        vertices = vertex_count,
        faces = faces.len(),
        "Parsed OBJ geometry"
    );

    Ok(IndexedMesh::from_parts(vertices, faces))
}

/// Turn an OBJ face token into a zero-based vertex index.
fn resolve_index(token: &str, vertices_so_far: usize, line_no: usize) -> IoResult<i64> {
    let position = token.split('/').next().unwrap_or(token);
    let raw: i64 = position.parse()?;
    #[allow(clippy::cast_possible_wrap)]
    let resolved = match raw {
        0 => {
            return Err(IoError::invalid_content(format!(
                "line {line_no}: OBJ indices are 1-based, found 0"
            )));
        }
        i if i > 0 => i - 1,
        i => vertices_so_far as i64 + i,
    };
    Ok(resolved)
}

/// Save a mesh to an OBJ file.
///
/// Coordinates are written with full `f64` precision.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_obj<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_obj<W: Write>(mesh: &IndexedMesh, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "# Generated by mesh-io")?;
    for p in &mesh.vertices {
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }
    for &[a, b, c] in &mesh.faces {
        writeln!(writer, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::MeshTopology;

    #[test]
    fn parses_plain_triangle() {
        let src = "# comment\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = parse_obj(src.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn parses_slash_tokens_and_skips_attributes() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\n\
                   usemtl skin\nf 1/1/1 2/1/1 3//1\n";
        let mesh = parse_obj(src.as_bytes()).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn resolves_negative_indices() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = parse_obj(src.as_bytes()).unwrap();
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn ignores_homogeneous_weight() {
        let src = "v 1.5 -2 3e2 1.0\n";
        let mesh = parse_obj(src.as_bytes()).unwrap();
        assert_eq!(mesh.vertices, vec![Point3::new(1.5, -2.0, 300.0)]);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn rejects_out_of_range_face() {
        let src = "v 0 0 0\nv 1 0 0\nf 1 2 3\n";
        let err = parse_obj(src.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            IoError::FaceIndexOutOfRange {
                face: 0,
                index: 2,
                vertex_count: 2
            }
        ));
    }

    #[test]
    fn rejects_zero_index() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        assert!(parse_obj(src.as_bytes()).is_err());
    }

    #[test]
    fn rejects_short_vertex() {
        let src = "v 0 0\n";
        assert!(matches!(
            parse_obj(src.as_bytes()),
            Err(IoError::InvalidContent { .. })
        ));
    }

    #[test]
    fn rejects_degenerate_face_record() {
        let src = "v 0 0 0\nv 1 0 0\nf 1 2\n";
        assert!(parse_obj(src.as_bytes()).is_err());
    }

    #[test]
    fn write_then_parse_keeps_full_precision() {
        let original = IndexedMesh::from_parts(
            vec![
                Point3::new(0.1, 0.2, 0.3),
                Point3::new(1.0 / 3.0, 0.0, -7.25),
                Point3::new(0.0, 1e-13, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let mut buf = Vec::new();
        write_obj(&original, &mut buf).unwrap();
        let parsed = parse_obj(buf.as_slice()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_obj("nonexistent_file_12345.obj");
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }
}
