//! Fixed-point C header emission.
//!
//! This module renders a [`TriangleMesh`] into the header layout consumed by
//! the firmware-side renderer: `nodes`, `faces` and `normals` arrays behind
//! `NODE`/`EDGE`/`NORMAL` accessor macros, wrapped in a `MESH_H` guard.
//! Coordinates are stored as `(long)(<value>*PRES)` fixed-point expressions;
//! `PRES` itself is defined by the consuming firmware.

use crate::mesh::TriangleMesh;
use crate::{CoordF, Error, Result};
use std::io::Write;
use std::path::Path;

/// Options controlling header emission.
#[derive(Debug, Clone)]
pub struct HeaderOptions {
    /// Scale ratio applied to vertex coordinates. Normals are never scaled.
    pub scale: CoordF,
    /// Exact invocation recorded in the leading comment.
    pub invocation: String,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            invocation: String::new(),
        }
    }
}

/// Number of vertices the `unsigned char` face table can index.
const MAX_NODES: usize = u8::MAX as usize + 1;

/// Render the header text for a mesh.
///
/// Vertex coordinates are rounded to 5 decimal digits, then multiplied by
/// the scale factor. Normals get the same rounding but no scale. Array rows
/// follow vertex-table order and input triangle order; an empty mesh renders
/// zero counts and empty array bodies.
pub fn render_header(mesh: &TriangleMesh, options: &HeaderOptions) -> Result<String> {
    if mesh.vertex_count() > MAX_NODES {
        return Err(Error::Unrepresentable(format!(
            "{} unique vertices exceed the {} the byte face table can index",
            mesh.vertex_count(),
            MAX_NODES
        )));
    }

    let mut data = String::new();
    data.push_str("// exported with stl2h\n");
    data.push_str(&format!("// {}\n", options.invocation));
    data.push_str("#ifndef MESH_H\n");
    data.push_str("#define MESH_H\n");
    data.push('\n');
    data.push_str(&format!("#define NODECOUNT {}\n", mesh.vertex_count()));
    data.push_str(&format!("#define TRICOUNT {}\n", mesh.triangle_count()));
    data.push('\n');
    data.push_str("#define NODE(a, b) (long)(pgm_read_dword(&nodes[a][b]))\n");
    data.push_str("#define EDGE(a, b) pgm_read_byte(&faces[a][b])\n");
    data.push_str("#define NORMAL(a, b) (long)(pgm_read_dword(&normals[a][b]))\n");
    data.push('\n');

    data.push_str("const long nodes[NODECOUNT][3] PROGMEM = {\n");
    for node in mesh.vertices() {
        data.push_str(&format!(
            "  {{(long)({}*PRES), (long)({}*PRES), (long)({}*PRES)}},\n",
            round5(node.x) * options.scale,
            round5(node.y) * options.scale,
            round5(node.z) * options.scale,
        ));
    }
    data.push_str("};\n\n");

    data.push_str("const unsigned char faces[TRICOUNT][3] PROGMEM = {\n");
    for tri in mesh.triangles() {
        data.push_str(&format!(
            "  {{{}, {}, {}}},\n",
            tri.vertex(0),
            tri.vertex(1),
            tri.vertex(2)
        ));
    }
    data.push_str("};\n\n");

    data.push_str("const long normals[TRICOUNT][3] PROGMEM = {\n");
    for normal in mesh.normals() {
        data.push_str(&format!(
            "  {{(long)({}*PRES), (long)({}*PRES), (long)({}*PRES)}},\n",
            round5(normal.x),
            round5(normal.y),
            round5(normal.z),
        ));
    }
    data.push_str("};\n\n");

    data.push_str("#endif // MESH_H\n");
    Ok(data)
}

/// Write rendered header text to `path`.
///
/// The text goes to a temporary file in the destination directory which is
/// then renamed onto `path`, so a failed write never leaves a partial
/// header behind.
pub fn write_header<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Round to 5 decimal digits, the precision recorded in the header.
#[inline]
fn round5(v: CoordF) -> CoordF {
    (v * 100_000.0).round() / 100_000.0
}
