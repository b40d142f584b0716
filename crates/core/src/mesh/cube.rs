//! Axis-aligned cube built from six planes and drawn as one strip.

use glam::Vec3;

use super::plane::{generate_plane, plane_vertex_count};
use super::{require_positive, require_resolution, Mesh, MeshVertex, Topology};
use crate::error::MeshError;

/// Vertices inserted between two consecutive faces.
const BRIDGE_VERTICES: usize = 2;

/// One face of the cube, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl CubeFace {
    /// All faces in the order they are emitted.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Outward unit normal.
    pub fn normal(self) -> Vec3 {
        match self {
            CubeFace::PosX => Vec3::X,
            CubeFace::NegX => Vec3::NEG_X,
            CubeFace::PosY => Vec3::Y,
            CubeFace::NegY => Vec3::NEG_Y,
            CubeFace::PosZ => Vec3::Z,
            CubeFace::NegZ => Vec3::NEG_Z,
        }
    }

    /// Returns `(corner, u, v)` for a cube of edge `size` centered on the origin.
    ///
    /// `cross(u, v)` points outward for every face. Negative faces mirror
    /// both the face center and `u` of their positive partner.
    pub fn basis(self, size: f32) -> (Vec3, Vec3, Vec3) {
        let half = size * 0.5;
        let (center, u, v) = match self {
            CubeFace::PosX | CubeFace::NegX => (
                Vec3::new(half, 0.0, 0.0),
                Vec3::new(0.0, 0.0, -size),
                Vec3::new(0.0, size, 0.0),
            ),
            CubeFace::PosY | CubeFace::NegY => (
                Vec3::new(0.0, half, 0.0),
                Vec3::new(size, 0.0, 0.0),
                Vec3::new(0.0, 0.0, -size),
            ),
            CubeFace::PosZ | CubeFace::NegZ => (
                Vec3::new(0.0, 0.0, half),
                Vec3::new(size, 0.0, 0.0),
                Vec3::new(0.0, size, 0.0),
            ),
        };
        let (center, u) = match self {
            CubeFace::NegX | CubeFace::NegY | CubeFace::NegZ => (-center, -u),
            _ => (center, u),
        };
        (center - (u + v) * 0.5, u, v)
    }
}

/// Number of vertices [`generate_cube`] emits for `resolution`.
pub fn cube_vertex_count(resolution: u32) -> usize {
    if resolution == 0 {
        return 0;
    }
    CubeFace::ALL.len() * plane_vertex_count(resolution)
        + BRIDGE_VERTICES * (CubeFace::ALL.len() - 1)
}

/// Generates a cube of edge `size`, each face subdivided `resolution` times,
/// centered at `offset`.
///
/// Faces are joined by repeating the previous face's last vertex and the next
/// face's first vertex, so the whole cube is one strip draw.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] for zero resolution or a size that
/// is not positive and finite.
pub fn generate_cube<V: MeshVertex>(
    size: f32,
    resolution: u32,
    offset: Vec3,
) -> Result<Mesh<V>, MeshError> {
    require_resolution(resolution)?;
    require_positive("size", size)?;
    if !offset.is_finite() {
        return Err(MeshError::invalid("offset", "must be finite"));
    }

    let mut vertices: Vec<V> = Vec::with_capacity(cube_vertex_count(resolution));
    for face in CubeFace::ALL {
        let (corner, u, v) = face.basis(size);
        let plane = generate_plane::<V>(u, v, corner + offset, resolution)?.into_vertices();

        if let (Some(&last), Some(&first)) = (vertices.last(), plane.first()) {
            vertices.push(last);
            vertices.push(first);
        }
        vertices.extend(plane);
    }

    Ok(Mesh::new(vertices, Topology::TriangleStrip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Vertex;

    #[test]
    fn vertex_count_is_six_faces_plus_five_bridges() {
        for r in 1..=6u32 {
            let mesh: Mesh<Vertex> = generate_cube(1.0, r, Vec3::ZERO).unwrap();
            assert_eq!(mesh.len(), 6 * plane_vertex_count(r) + 2 * 5, "r = {r}");
            assert_eq!(mesh.len(), cube_vertex_count(r));
        }
    }

    #[test]
    fn face_basis_crosses_outward() {
        for face in CubeFace::ALL {
            let (_, u, v) = face.basis(2.0);
            let n = u.cross(v).normalize();
            assert!(
                (n - face.normal()).length() < 1e-6,
                "{face:?} winds inward: {n}"
            );
        }
    }

    #[test]
    fn face_vertices_lie_on_their_face() {
        let size = 0.5;
        let r = 3;
        let mesh: Mesh<Vertex> = generate_cube(size, r, Vec3::ZERO).unwrap();
        let per_face = plane_vertex_count(r);
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            let start = i * (per_face + BRIDGE_VERTICES);
            for v in &mesh.vertices()[start..start + per_face] {
                let along = v.position().dot(face.normal());
                assert!(
                    (along - size * 0.5).abs() < 1e-6,
                    "{face:?} vertex {} off face",
                    v.position()
                );
                assert!((v.normal() - face.normal()).length() < 1e-6);
            }
        }
    }

    #[test]
    fn bridges_repeat_neighbouring_face_vertices() {
        let r = 2;
        let mesh: Mesh<Vertex> = generate_cube(1.0, r, Vec3::ZERO).unwrap();
        let per_face = plane_vertex_count(r);
        let verts = mesh.vertices();
        for boundary in 0..5 {
            let last_of_face = boundary * (per_face + 2) + per_face - 1;
            assert_eq!(verts[last_of_face + 1], verts[last_of_face]);
            assert_eq!(verts[last_of_face + 2], verts[last_of_face + 3]);
        }
    }

    #[test]
    fn offset_moves_the_center() {
        let offset = Vec3::new(1.0, -2.0, 3.0);
        let mesh: Mesh<Vertex> = generate_cube(1.0, 2, offset).unwrap();
        let sum: Vec3 = mesh.vertices().iter().map(|v| v.position()).sum();
        let plain: Mesh<Vertex> = generate_cube(1.0, 2, Vec3::ZERO).unwrap();
        let plain_sum: Vec3 = plain.vertices().iter().map(|v| v.position()).sum();
        let shift = (sum - plain_sum) / mesh.len() as f32;
        assert!((shift - offset).length() < 1e-4, "shift was {shift}");
    }

    #[test]
    fn all_vertices_within_half_extent() {
        let mesh: Mesh<Vertex> = generate_cube(0.5, 4, Vec3::ZERO).unwrap();
        for v in mesh.vertices() {
            assert!(v.position().abs().max_element() <= 0.25 + 1e-6);
        }
    }

    #[test]
    fn invalid_size_is_rejected() {
        assert!(generate_cube::<Vertex>(0.0, 2, Vec3::ZERO).is_err());
        assert!(generate_cube::<Vertex>(-1.0, 2, Vec3::ZERO).is_err());
        assert!(generate_cube::<Vertex>(f32::INFINITY, 2, Vec3::ZERO).is_err());
    }

    #[test]
    fn zero_resolution_is_rejected() {
        assert!(generate_cube::<Vertex>(1.0, 0, Vec3::ZERO).is_err());
        assert_eq!(cube_vertex_count(0), 0);
    }
}
