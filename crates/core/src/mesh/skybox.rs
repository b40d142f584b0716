//! The skybox: a unit cube seen from the inside, drawn as a triangle list.

use super::{Mesh, PositionVertex, Topology};

#[rustfmt::skip]
const SKYBOX_POSITIONS: [[f32; 3]; 36] = [
    [-1.0,  1.0, -1.0], [-1.0, -1.0, -1.0], [ 1.0, -1.0, -1.0],
    [ 1.0, -1.0, -1.0], [ 1.0,  1.0, -1.0], [-1.0,  1.0, -1.0],

    [-1.0, -1.0,  1.0], [-1.0, -1.0, -1.0], [-1.0,  1.0, -1.0],
    [-1.0,  1.0, -1.0], [-1.0,  1.0,  1.0], [-1.0, -1.0,  1.0],

    [ 1.0, -1.0, -1.0], [ 1.0, -1.0,  1.0], [ 1.0,  1.0,  1.0],
    [ 1.0,  1.0,  1.0], [ 1.0,  1.0, -1.0], [ 1.0, -1.0, -1.0],

    [-1.0, -1.0,  1.0], [-1.0,  1.0,  1.0], [ 1.0,  1.0,  1.0],
    [ 1.0,  1.0,  1.0], [ 1.0, -1.0,  1.0], [-1.0, -1.0,  1.0],

    [-1.0,  1.0, -1.0], [ 1.0,  1.0, -1.0], [ 1.0,  1.0,  1.0],
    [ 1.0,  1.0,  1.0], [-1.0,  1.0,  1.0], [-1.0,  1.0, -1.0],

    [-1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0, -1.0],
    [ 1.0, -1.0, -1.0], [-1.0, -1.0,  1.0], [ 1.0, -1.0,  1.0],
];

/// Returns the 36-vertex skybox cube spanning [-1, 1] on every axis.
///
/// Triangles wind counter-clockwise when seen from inside the cube.
pub fn skybox_cube() -> Mesh<PositionVertex> {
    let vertices = SKYBOX_POSITIONS
        .iter()
        .map(|&position| PositionVertex { position })
        .collect();
    Mesh::new(vertices, Topology::Triangles)
}
