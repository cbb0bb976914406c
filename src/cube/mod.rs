//! Cube geometry.
//!
//! This module provides:
//! - [`Vertex`] - Interleaved position, color and texture coordinate
//! - [`CubeMesh`] - The fixed 24-vertex unit cube with triangle and edge indices

pub mod mesh;

pub use mesh::{CubeMesh, Vertex};
