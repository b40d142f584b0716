//! Subdivided parallelogram emitted as a single triangle strip.

use glam::{Vec2, Vec3};

use super::{require_resolution, Mesh, MeshVertex, Topology};
use crate::error::MeshError;

/// Number of vertices [`generate_plane`] emits for `resolution`.
///
/// Each row holds `2 * (resolution + 1)` vertices; every row boundary adds a
/// degenerate pair (the previous row's last vertex repeated, and the next
/// row's first vertex repeated).
pub fn plane_vertex_count(resolution: u32) -> usize {
    let r = resolution as usize;
    if r == 0 {
        return 0;
    }
    r * (2 * r + 2) + 2 * (r - 1)
}

/// Generates the parallelogram `corner + s*u + t*v` (s, t in [0, 1]) as a
/// `resolution x resolution` grid.
///
/// Rows run along `v`, columns along `u`. Within a row the strip zig-zags
/// between the upper and lower edge of the row, column by column. Between
/// rows the strip repeats the last vertex of the finished row and the first
/// vertex of the next one, which keeps the winding parity intact and turns
/// the connecting triangles into zero-area ones.
///
/// The normal is `normalize(cross(u, v))` everywhere. Texture coordinates are
/// `(col / resolution, row / resolution)`; the far edge is exactly 1.0.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] if `resolution` is zero, if the
/// edge vectors are parallel or zero-length, or if any input is not finite.
pub fn generate_plane<V: MeshVertex>(
    u: Vec3,
    v: Vec3,
    corner: Vec3,
    resolution: u32,
) -> Result<Mesh<V>, MeshError> {
    require_resolution(resolution)?;
    if !(u.is_finite() && v.is_finite() && corner.is_finite()) {
        return Err(MeshError::invalid("edges", "plane vectors must be finite"));
    }

    let cross = u.cross(v);
    if cross.length_squared() <= f32::EPSILON * f32::EPSILON {
        return Err(MeshError::invalid(
            "edges",
            "edge vectors are parallel or zero-length",
        ));
    }
    let normal = cross.normalize();

    let res = resolution as f32;
    let du = u / res;
    let dv = v / res;
    let coord = |i: u32| -> f32 {
        if i == resolution {
            1.0
        } else {
            i as f32 / res
        }
    };
    let point = |col: u32, row: u32| -> V {
        let position = corner + du * col as f32 + dv * row as f32;
        V::from_parts(position, normal, Vec2::new(coord(col), coord(row)))
    };

    let mut vertices = Vec::with_capacity(plane_vertex_count(resolution));
    for row in 0..resolution {
        if row != 0 {
            vertices.push(point(0, row + 1));
        }
        for col in 0..=resolution {
            vertices.push(point(col, row + 1));
            vertices.push(point(col, row));
        }
        if row + 1 != resolution {
            if let Some(&last) = vertices.last() {
                vertices.push(last);
            }
        }
    }

    Ok(Mesh::new(vertices, Topology::TriangleStrip))
}
