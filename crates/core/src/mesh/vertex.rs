//! Vertex formats and the attribute layout each one uploads with.
//!
//! All vertex types are `#[repr(C)]` plain-old-data so a mesh can be handed
//! to the GPU as a byte slice without copying.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// One float attribute of a vertex, as seen by the vertex shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location (`layout(location = N)`).
    pub location: u32,
    /// Number of `f32` components (1..=4).
    pub components: i32,
    /// Byte offset from the start of the vertex.
    pub offset: i32,
}

/// A vertex type the mesh generators can emit.
///
/// The generators compute position, normal and texture coordinate for every
/// vertex; each implementation keeps the parts it has room for.
pub trait MeshVertex: Pod {
    /// Attribute layout in location order.
    const ATTRIBUTES: &'static [VertexAttribute];

    /// Builds a vertex from its full attribute set.
    fn from_parts(position: Vec3, normal: Vec3, uv: Vec2) -> Self;

    /// Position in model space.
    fn position(&self) -> Vec3;

    /// Returns a copy with position and normal replaced.
    fn with_position_normal(self, position: Vec3, normal: Vec3) -> Self;

    /// Size of one vertex in bytes, used as the buffer stride.
    fn stride() -> i32 {
        std::mem::size_of::<Self>() as i32
    }
}

/// Position + normal, for lit opaque geometry.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    /// Normal as a `Vec3`.
    pub fn normal(&self) -> Vec3 {
        Vec3::from(self.normal)
    }
}

impl MeshVertex for Vertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute {
            location: 0,
            components: 3,
            offset: 0,
        },
        VertexAttribute {
            location: 1,
            components: 3,
            offset: 12,
        },
    ];

    fn from_parts(position: Vec3, normal: Vec3, _uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }

    fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    fn with_position_normal(self, position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Position + normal + texture coordinate, for surfaces that sample images.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl TexturedVertex {
    /// Normal as a `Vec3`.
    pub fn normal(&self) -> Vec3 {
        Vec3::from(self.normal)
    }

    /// Texture coordinate as a `Vec2`.
    pub fn uv(&self) -> Vec2 {
        Vec2::from(self.uv)
    }
}

impl MeshVertex for TexturedVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute {
            location: 0,
            components: 3,
            offset: 0,
        },
        VertexAttribute {
            location: 1,
            components: 3,
            offset: 12,
        },
        VertexAttribute {
            location: 2,
            components: 2,
            offset: 24,
        },
    ];

    fn from_parts(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }

    fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    fn with_position_normal(self, position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: self.uv,
        }
    }
}

/// Position only. Used by the skybox, whose direction is its position.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PositionVertex {
    pub position: [f32; 3],
}

impl MeshVertex for PositionVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[VertexAttribute {
        location: 0,
        components: 3,
        offset: 0,
    }];

    fn from_parts(position: Vec3, _normal: Vec3, _uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
        }
    }

    fn position(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    fn with_position_normal(self, position: Vec3, _normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_layout_fits<V: MeshVertex>() {
        let stride = V::stride();
        for attr in V::ATTRIBUTES {
            let end = attr.offset + attr.components * 4;
            assert!(
                end <= stride,
                "attribute {} ends at {end}, past stride {stride}",
                attr.location
            );
        }
    }

    #[test]
    fn strides_match_packed_float_counts() {
        assert_eq!(Vertex::stride(), 24);
        assert_eq!(TexturedVertex::stride(), 32);
        assert_eq!(PositionVertex::stride(), 12);
    }

    #[test]
    fn attribute_layouts_fit_inside_stride() {
        assert_layout_fits::<Vertex>();
        assert_layout_fits::<TexturedVertex>();
        assert_layout_fits::<PositionVertex>();
    }

    #[test]
    fn attribute_locations_are_sequential() {
        for (i, attr) in TexturedVertex::ATTRIBUTES.iter().enumerate() {
            assert_eq!(attr.location as usize, i);
        }
    }

    #[test]
    fn textured_vertex_keeps_uv_when_moved() {
        let v = TexturedVertex::from_parts(Vec3::X, Vec3::Y, Vec2::new(0.25, 0.75));
        let moved = v.with_position_normal(Vec3::Z, Vec3::Z);
        assert_eq!(moved.position(), Vec3::Z);
        assert_eq!(moved.normal(), Vec3::Z);
        assert_eq!(moved.uv(), Vec2::new(0.25, 0.75));
    }

    #[test]
    fn vertex_casts_to_bytes() {
        let verts = [Vertex::from_parts(Vec3::ONE, Vec3::Y, Vec2::ZERO); 2];
        let bytes: &[u8] = bytemuck::cast_slice(&verts);
        assert_eq!(bytes.len(), 48);
    }
}
