//! Procedural mesh generation.
//!
//! Every generator is deterministic and produces a [`Mesh`] ready for a single
//! draw call. Planes, cubes and cube-projected spheres are emitted as one
//! continuous triangle strip; consecutive rows and faces are stitched with
//! duplicated vertices that form zero-area triangles.
//!
//! # Module overview
//!
//! - [`vertex`] -- Vertex formats and their attribute layouts.
//! - [`plane`] -- Subdivided parallelogram, the building block for the rest.
//! - [`cube`] -- Six planes joined into one strip.
//! - [`sphere`] -- Cube-projected sphere (default) and latitude/longitude sphere.
//! - [`skybox`] -- The fixed 36-vertex skybox cube.

pub mod cube;
pub mod plane;
pub mod skybox;
pub mod sphere;
pub mod vertex;

pub use cube::{cube_vertex_count, generate_cube, CubeFace};
pub use plane::{generate_plane, plane_vertex_count};
pub use skybox::skybox_cube;
pub use sphere::{generate_sphere, generate_uv_sphere};
pub use vertex::{MeshVertex, PositionVertex, TexturedVertex, Vertex, VertexAttribute};

use crate::error::MeshError;

/// How consecutive vertices of a mesh form triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Each vertex after the second closes a triangle with the previous two.
    TriangleStrip,
    /// Every three vertices form an independent triangle.
    Triangles,
}

/// An immutable, generated vertex sequence.
///
/// Ownership moves into the GPU buffer at upload time; the CPU copy is not
/// kept around after that.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<V> {
    vertices: Vec<V>,
    topology: Topology,
}

impl<V: MeshVertex> Mesh<V> {
    pub(crate) fn new(vertices: Vec<V>, topology: Topology) -> Self {
        Self { vertices, topology }
    }

    /// The vertices in draw order.
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Triangle assembly mode for drawing.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Raw bytes for buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub(crate) fn into_vertices(self) -> Vec<V> {
        self.vertices
    }
}

pub(crate) fn require_resolution(resolution: u32) -> Result<(), MeshError> {
    if resolution == 0 {
        return Err(MeshError::invalid("resolution", "must be at least 1"));
    }
    Ok(())
}

pub(crate) fn require_positive(name: &'static str, value: f32) -> Result<(), MeshError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MeshError::invalid(
            name,
            format!("must be positive and finite, got {value}"),
        ));
    }
    Ok(())
}
