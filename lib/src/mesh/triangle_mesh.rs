//! Triangle mesh data structures.
//!
//! STL stores a triangle soup: every facet repeats its own corner
//! coordinates. [`TriangleMesh::index_facets`] collapses corners with equal
//! coordinates into a shared vertex table and rewrites each facet as three
//! indices into it, keeping the per-facet normals alongside.

use crate::geometry::{Point3F, PointKey};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One STL facet as parsed from the input file: a normal vector and three
/// corner positions in file order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub normal: Point3F,
    pub vertices: [Point3F; 3],
}

/// A single triangle defined by three vertex indices.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triangle {
    /// Indices into the vertex table for the three corners.
    pub indices: [u32; 3],
}

impl Triangle {
    /// Create a new triangle from vertex indices.
    #[inline]
    pub const fn new(v0: u32, v1: u32, v2: u32) -> Self {
        Self {
            indices: [v0, v1, v2],
        }
    }

    /// Get the vertex index at position i (0, 1, or 2).
    #[inline]
    pub fn vertex(&self, i: usize) -> u32 {
        self.indices[i]
    }

    /// Check if this triangle is degenerate (has duplicate vertices).
    ///
    /// Degenerate triangles are kept in the mesh; two corners with equal
    /// coordinates simply resolve to the same index.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.indices[0] == self.indices[1]
            || self.indices[1] == self.indices[2]
            || self.indices[2] == self.indices[0]
    }
}

impl fmt::Debug for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Triangle({}, {}, {})",
            self.indices[0], self.indices[1], self.indices[2]
        )
    }
}

impl From<[u32; 3]> for Triangle {
    #[inline]
    fn from(indices: [u32; 3]) -> Self {
        Self { indices }
    }
}

impl From<Triangle> for [u32; 3] {
    #[inline]
    fn from(tri: Triangle) -> Self {
        tri.indices
    }
}

/// A deduplicated, indexed triangle mesh with per-triangle normals.
///
/// The vertex table is in first-occurrence order, so the same input always
/// produces the same table. Triangles and normals stay in input order and
/// correspond positionally.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Unique vertex positions, in first-occurrence order.
    vertices: Vec<Point3F>,
    /// Triangle indices into the vertex table, in input order.
    triangles: Vec<Triangle>,
    /// Per-triangle normals, positionally matching `triangles`.
    normals: Vec<Point3F>,
}

impl TriangleMesh {
    /// Create a new empty mesh.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from already-indexed parts.
    pub fn from_parts(
        vertices: Vec<Point3F>,
        triangles: Vec<Triangle>,
        normals: Vec<Point3F>,
    ) -> Self {
        Self {
            vertices,
            triangles,
            normals,
        }
    }

    /// Build an indexed mesh from a sequence of facets.
    ///
    /// Corners are identified by exact coordinate equality. The unique
    /// vertex table is built first from all corners; every corner is then
    /// resolved against that table. A resolve miss cannot happen for a table
    /// built from the same corners, so one is reported as a consistency
    /// error rather than papered over.
    pub fn index_facets(facets: &[Facet]) -> Result<Self> {
        let mut index_of: HashMap<PointKey, u32> = HashMap::with_capacity(facets.len() * 3);
        let mut vertices: Vec<Point3F> = Vec::new();

        for facet in facets {
            for corner in &facet.vertices {
                let key = corner.key();
                if !index_of.contains_key(&key) {
                    index_of.insert(key, vertices.len() as u32);
                    vertices.push(*corner);
                }
            }
        }

        let mut triangles = Vec::with_capacity(facets.len());
        let mut normals = Vec::with_capacity(facets.len());

        for (facet_idx, facet) in facets.iter().enumerate() {
            let mut indices = [0u32; 3];
            for (slot, corner) in facet.vertices.iter().enumerate() {
                indices[slot] = *index_of.get(&corner.key()).ok_or_else(|| {
                    Error::Consistency(format!(
                        "corner {slot} of facet {facet_idx} is missing from the vertex table"
                    ))
                })?;
            }
            triangles.push(Triangle::from(indices));
            normals.push(facet.normal);
        }

        Ok(Self {
            vertices,
            triangles,
            normals,
        })
    }

    /// Get the unique vertices of the mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point3F] {
        &self.vertices
    }

    /// Get the triangle index list.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Get the per-triangle normals.
    #[inline]
    pub fn normals(&self) -> &[Point3F] {
        &self.normals
    }

    /// Get a vertex by index.
    #[inline]
    pub fn vertex(&self, idx: u32) -> Point3F {
        self.vertices[idx as usize]
    }

    /// Get the number of unique vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Check if the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Validate the mesh: every triangle index must point into the vertex
    /// table, and normals must correspond 1:1 with triangles.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertices.len() as u32;
        for (i, tri) in self.triangles.iter().enumerate() {
            for &idx in &tri.indices {
                if idx >= vertex_count {
                    return Err(Error::Consistency(format!(
                        "triangle {} has invalid vertex index {} (only {} vertices)",
                        i, idx, vertex_count
                    )));
                }
            }
        }
        if self.normals.len() != self.triangles.len() {
            return Err(Error::Consistency(format!(
                "{} normals for {} triangles",
                self.normals.len(),
                self.triangles.len()
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for TriangleMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TriangleMesh({} vertices, {} triangles)",
            self.vertices.len(),
            self.triangles.len()
        )
    }
}

impl fmt::Display for TriangleMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TriangleMesh: {} vertices, {} triangles",
            self.vertices.len(),
            self.triangles.len()
        )
    }
}
