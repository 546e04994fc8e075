//! Convert ASCII STL meshes into fixed-point C header arrays.
//!
//! This crate implements the conversion pipeline behind the `stl2h` tool:
//! - [`mesh`] - STL parsing and vertex deduplication
//! - [`geometry`] - the point type and its exact-equality key
//! - [`header`] - rendering and writing the generated C header
//!
//! The [`convert`] function runs the whole pipeline: parse the triangle soup,
//! collapse equal corners into a shared vertex table, render the `nodes`,
//! `faces` and `normals` arrays, and write the header file.

pub mod geometry;
pub mod header;
pub mod mesh;

pub use header::{render_header, write_header, HeaderOptions};
pub use mesh::{load_stl, Facet, Triangle, TriangleMesh};

use std::path::Path;

/// Floating-point coordinate type used throughout the crate.
pub type CoordF = f64;

/// Error type for the conversion pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("STL format error: {0}")]
    Format(String),

    #[error("mesh consistency error: {0}")]
    Consistency(String),

    #[error("mesh not representable: {0}")]
    Unrepresentable(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Summary of a completed conversion.
#[derive(Debug, Clone)]
pub struct ConvertSummary {
    /// Number of entries in the deduplicated vertex table.
    pub unique_vertices: usize,

    /// Number of triangles (and normals) in the output.
    pub triangles: usize,

    /// The rendered header text, as written to the output file.
    pub header: String,
}

/// Run the full conversion pipeline.
///
/// Parses the ASCII STL file at `input`, deduplicates its vertices, renders
/// the header and writes it to `output`. On any error before the final write
/// the output path is left untouched; the write itself goes through a
/// temporary file, so a partial header is never left behind.
pub fn convert<P, Q>(input: P, output: Q, options: &HeaderOptions) -> Result<ConvertSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let facets = mesh::load_stl(input)?;
    let mesh = TriangleMesh::index_facets(&facets)?;
    mesh.validate()?;

    let header = render_header(&mesh, options)?;
    write_header(output, &header)?;

    Ok(ConvertSummary {
        unique_vertices: mesh.vertex_count(),
        triangles: mesh.triangle_count(),
        header,
    })
}
