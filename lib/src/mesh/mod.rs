//! Mesh loading and indexing.
//!
//! This module turns STL triangle soup into an indexed mesh:
//! - [`Facet`] - one parsed STL facet (a normal and three corner positions)
//! - [`Triangle`] - three indices into the deduplicated vertex table
//! - [`TriangleMesh`] - the deduplicated, indexed mesh
//! - ASCII STL file loading

mod stl;
mod triangle_mesh;

pub use stl::{load_stl, parse_stl};
pub use triangle_mesh::{Facet, Triangle, TriangleMesh};
