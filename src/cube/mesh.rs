use std::collections::BTreeSet;

use bytemuck::{Pod, Zeroable};

/// Vertex data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    const fn new(position: [f32; 3], color: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            color,
            uv,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

const RED: [f32; 3] = [1.0, 0.0, 0.0];
const GREEN: [f32; 3] = [0.0, 1.0, 0.0];

/// Four corners per face, counter-clockwise from bottom-left in UV space.
const CUBE_VERTICES: [Vertex; 24] = [
    // Front
    Vertex::new([-0.5, -0.5, 0.5], GREEN, [0.0, 0.0]),
    Vertex::new([0.5, -0.5, 0.5], GREEN, [1.0, 0.0]),
    Vertex::new([0.5, 0.5, 0.5], GREEN, [1.0, 1.0]),
    Vertex::new([-0.5, 0.5, 0.5], GREEN, [0.0, 1.0]),
    // Back
    Vertex::new([-0.5, -0.5, -0.5], RED, [0.0, 0.0]),
    Vertex::new([0.5, -0.5, -0.5], RED, [1.0, 0.0]),
    Vertex::new([0.5, 0.5, -0.5], RED, [1.0, 1.0]),
    Vertex::new([-0.5, 0.5, -0.5], RED, [0.0, 1.0]),
    // Left
    Vertex::new([-0.5, -0.5, -0.5], RED, [0.0, 0.0]),
    Vertex::new([-0.5, -0.5, 0.5], GREEN, [1.0, 0.0]),
    Vertex::new([-0.5, 0.5, 0.5], GREEN, [1.0, 1.0]),
    Vertex::new([-0.5, 0.5, -0.5], RED, [0.0, 1.0]),
    // Right
    Vertex::new([0.5, -0.5, -0.5], RED, [0.0, 0.0]),
    Vertex::new([0.5, -0.5, 0.5], GREEN, [1.0, 0.0]),
    Vertex::new([0.5, 0.5, 0.5], GREEN, [1.0, 1.0]),
    Vertex::new([0.5, 0.5, -0.5], RED, [0.0, 1.0]),
    // Top
    Vertex::new([-0.5, 0.5, -0.5], RED, [0.0, 0.0]),
    Vertex::new([0.5, 0.5, -0.5], RED, [1.0, 0.0]),
    Vertex::new([0.5, 0.5, 0.5], GREEN, [1.0, 1.0]),
    Vertex::new([-0.5, 0.5, 0.5], GREEN, [0.0, 1.0]),
    // Bottom
    Vertex::new([-0.5, -0.5, -0.5], RED, [0.0, 0.0]),
    Vertex::new([0.5, -0.5, -0.5], RED, [1.0, 0.0]),
    Vertex::new([0.5, -0.5, 0.5], GREEN, [1.0, 1.0]),
    Vertex::new([-0.5, -0.5, 0.5], GREEN, [0.0, 1.0]),
];

/// Number of faces in [`CUBE_VERTICES`].
const FACES: u32 = 6;

/// Generated mesh ready for GPU upload
#[derive(Debug, Clone)]
pub struct CubeMesh {
    pub vertices: Vec<Vertex>,
    /// Triangle list, two triangles per face
    pub indices: Vec<u32>,
}

impl CubeMesh {
    pub fn new() -> Self {
        let indices = (0..FACES)
            .flat_map(|face| {
                let i = face * 4;
                [i, i + 1, i + 2, i + 2, i + 3, i]
            })
            .collect();

        Self {
            vertices: CUBE_VERTICES.to_vec(),
            indices,
        }
    }

    /// Line-list indices covering every triangle edge exactly once.
    ///
    /// Drawing these with a line topology gives the same picture as
    /// rasterizing the triangles in line polygon mode, including the face
    /// diagonals.
    pub fn edge_indices(&self) -> Vec<u32> {
        let mut edges = BTreeSet::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                edges.insert((a.min(b), a.max(b)));
            }
        }

        edges.into_iter().flat_map(|(a, b)| [a, b]).collect()
    }
}

impl Default for CubeMesh {
    fn default() -> Self {
        Self::new()
    }
}
