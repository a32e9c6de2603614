use std::fs::{self, File};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use serde::{Deserialize, Serialize};
use stl_io::{Normal, Vertex, write_stl};

use ambivox_geom::{Triangle, Vec3};
use ambivox_mesh::Mesh;

use crate::error::IoError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    #[default]
    Binary,
    Ascii,
}

fn solid_name(mesh: &Mesh) -> &str {
    if mesh.name().is_empty() { "ambivox" } else { mesh.name() }
}

/// ASCII STL text for `mesh`; facet normals follow the vertex winding.
pub fn to_stl_ascii(mesh: &Mesh) -> String {
    let name = solid_name(mesh);
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));
    for tri in mesh.triangles() {
        let n = tri.unit_normal();
        out.push_str(&format!("  facet normal {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for p in &tri.vertices {
            out.push_str(&format!("      vertex {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    out.push_str(&format!("endsolid {name}\n"));
    out
}

pub fn to_stl_binary(mesh: &Mesh) -> std::io::Result<Vec<u8>> {
    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles()
        .iter()
        .map(|tri| {
            let n = tri.unit_normal();
            stl_io::Triangle {
                normal: Normal::new(n.to_array()),
                vertices: tri.vertices.map(|p| Vertex::new(p.to_array())),
            }
        })
        .collect();
    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

pub fn save_mesh(mesh: &Mesh, path: &Path, format: StlFormat) -> Result<(), IoError> {
    let bytes = match format {
        StlFormat::Ascii => to_stl_ascii(mesh).into_bytes(),
        StlFormat::Binary => to_stl_binary(mesh).map_err(|source| IoError::Write {
            path: path.to_path_buf(),
            source,
        })?,
    };
    fs::write(path, bytes).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Saved: {}", path.display());
    Ok(())
}

/// Reads ASCII or binary STL. Stored normals are ignored; winding is kept.
pub fn read_stl<R: Read + Seek>(reader: &mut R) -> std::io::Result<Vec<Triangle>> {
    let indexed = stl_io::read_stl(reader)?;
    let vertex = |i: usize| {
        indexed
            .vertices
            .get(i)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("face references missing vertex {i}"),
                )
            })
    };
    indexed
        .faces
        .iter()
        .map(|f| {
            Ok(Triangle::new(
                vertex(f.vertices[0])?,
                vertex(f.vertices[1])?,
                vertex(f.vertices[2])?,
            ))
        })
        .collect()
}

/// Loads an STL file as a mesh named after the file stem.
pub fn load_mesh(path: &Path) -> Result<Mesh, IoError> {
    let mut file = File::open(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let triangles = read_stl(&mut file).map_err(|source| IoError::Stl {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Mesh::from_triangles(triangles).with_name(name))
}
