//! Sphere generators.
//!
//! [`generate_sphere`] projects a subdivided cube onto the sphere and is the
//! one the scenes use: cells stay close to uniform in area and there are no
//! pole singularities. [`generate_uv_sphere`] is the classic
//! latitude/longitude tessellation, kept as an alternative.

use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use super::cube::generate_cube;
use super::{require_positive, require_resolution, Mesh, MeshVertex, Topology};
use crate::error::MeshError;

/// Generates a sphere by pushing every vertex of a unit cube out to
/// `radius`, then translating by `offset`.
///
/// `resolution` is the per-face subdivision of the underlying cube, so the
/// vertex count equals [`cube_vertex_count`](super::cube_vertex_count).
/// Normals are the outward radial directions.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] for zero resolution or a radius
/// that is not positive and finite.
pub fn generate_sphere<V: MeshVertex>(
    radius: f32,
    resolution: u32,
    offset: Vec3,
) -> Result<Mesh<V>, MeshError> {
    require_positive("radius", radius)?;
    if !offset.is_finite() {
        return Err(MeshError::invalid("offset", "must be finite"));
    }

    let cube = generate_cube::<V>(1.0, resolution, Vec3::ZERO)?;
    let vertices = cube
        .into_vertices()
        .into_iter()
        .map(|v| {
            let direction = v.position().normalize();
            v.with_position_normal(offset + direction * radius, direction)
        })
        .collect();

    Ok(Mesh::new(vertices, Topology::TriangleStrip))
}

fn lat_long_point(azimuth: f32, polar: f32, radius: f32) -> (Vec3, Vec3) {
    let direction = Vec3::new(
        azimuth.cos() * polar.sin(),
        polar.cos(),
        azimuth.sin() * polar.sin(),
    );
    (direction * radius, direction)
}

/// Generates a latitude/longitude sphere as an independent triangle list,
/// two triangles (six vertices) per cell.
///
/// The texture coordinate of each vertex is `(azimuth / 2pi, polar / pi)`.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] if `lats` or `longs` is zero or
/// the radius is not positive and finite.
pub fn generate_uv_sphere<V: MeshVertex>(
    radius: f32,
    lats: u32,
    longs: u32,
) -> Result<Mesh<V>, MeshError> {
    require_positive("radius", radius)?;
    require_resolution(lats).map_err(|_| MeshError::invalid("lats", "must be at least 1"))?;
    require_resolution(longs).map_err(|_| MeshError::invalid("longs", "must be at least 1"))?;

    let full_turn = 2.0 * PI;
    let step_u = full_turn / longs as f32;
    let step_v = PI / lats as f32;

    let vertex = |i: u32, j: u32| -> V {
        // Snap the last column/row onto the seam and pole exactly.
        let azimuth = if i == longs { full_turn } else { i as f32 * step_u };
        let polar = if j == lats { PI } else { j as f32 * step_v };
        let (position, normal) = lat_long_point(azimuth, polar, radius);
        V::from_parts(
            position,
            normal,
            Vec2::new(azimuth / full_turn, polar / PI),
        )
    };

    let mut vertices = Vec::with_capacity((lats * longs * 6) as usize);
    for i in 0..longs {
        for j in 0..lats {
            let p0 = vertex(i, j);
            let p1 = vertex(i, j + 1);
            let p2 = vertex(i + 1, j);
            let p3 = vertex(i + 1, j + 1);
            vertices.extend([p0, p2, p1, p3, p1, p2]);
        }
    }

    Ok(Mesh::new(vertices, Topology::Triangles))
}
