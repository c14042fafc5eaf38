/// Indexed triangle meshes
use nalgebra::{Point3, Vector3};

use crate::error::MeshError;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Face normal from the counter-clockwise winding.
    ///
    /// Zero for degenerate triangles, such as the ones at sphere poles.
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1
            .cross(&edge2)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vector3::zeros)
    }
}

/// Flat vertex buffers of an indexed triangle mesh, in the layout a GPU
/// upload expects: `xyz` triples for positions and normals, `u16` indices in
/// groups of three.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u16>,
}

impl Mesh {
    pub fn new(positions: Vec<f32>, normals: Vec<f32>, indices: Vec<u16>) -> Self {
        Self {
            positions,
            normals,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn position(&self, index: usize) -> Point3<f32> {
        Point3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    pub fn normal(&self, index: usize) -> Vector3<f32> {
        Vector3::from_column_slice(&self.normals[index * 3..index * 3 + 3])
    }

    pub fn vertex(&self, index: usize) -> Vertex {
        Vertex {
            position: self.position(index),
            normal: self.normal(index),
        }
    }

    /// Check that buffers line up and every index refers to an existing vertex
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.positions.len() % 3 != 0 || self.normals.len() != self.positions.len() {
            return Err(MeshError::MismatchedBuffers {
                positions: self.positions.len(),
                normals: self.normals.len(),
            });
        }

        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(self.indices.len()));
        }

        let vertex_count = self.vertex_count();
        match self.indices.iter().find(|&&i| usize::from(i) >= vertex_count) {
            Some(&index) => Err(MeshError::IndexOutOfRange {
                index: usize::from(index),
                vertex_count,
            }),
            None => Ok(()),
        }
    }

    /// Expand the index buffer into triangles
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(move |face| {
            Triangle::new(
                self.vertex(usize::from(face[0])),
                self.vertex(usize::from(face[1])),
                self.vertex(usize::from(face[2])),
            )
        })
    }
}
