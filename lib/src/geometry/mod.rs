//! Geometry primitives.
//!
//! This module provides the point type used for vertex and normal data:
//! - [`Point3F`] - a 3D floating-point point
//! - [`PointKey`] - exact-equality key used for vertex deduplication

mod point;

pub use point::{Point3F, PointKey};
