//! Vertex arrays built from generated meshes.

use super::fullscreen::FULLSCREEN_VERTEX_COUNT;
use super::RenderError;
use crate::mesh::{Mesh, MeshVertex, Topology};
use crate::pipeline::SceneMesh;

/// GL primitive mode for a mesh topology.
pub fn primitive_mode(topology: Topology) -> u32 {
    match topology {
        Topology::TriangleStrip => glow::TRIANGLE_STRIP,
        Topology::Triangles => glow::TRIANGLES,
    }
}

/// A vertex array and its buffer, ready to draw.
pub struct GpuMesh {
    vao: glow::VertexArray,
    vbo: Option<glow::Buffer>,
    mode: u32,
    count: i32,
}

impl GpuMesh {
    /// Uploads `mesh` into a new static buffer. The CPU copy is dropped once
    /// the data is on the GPU.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Gl`] if the VAO or buffer cannot be created.
    #[allow(unsafe_code)]
    pub fn upload<V: MeshVertex>(gl: &glow::Context, mesh: Mesh<V>) -> Result<Self, RenderError> {
        use glow::HasContext;

        let mode = primitive_mode(mesh.topology());
        let count = mesh.len() as i32;
        let vertices = mesh.into_vertices();

        // SAFETY: the buffer data is a Pod slice and every attribute lies
        // inside the vertex stride.
        let vao = unsafe { gl.create_vertex_array()? };
        let vbo = match unsafe { gl.create_buffer() } {
            Ok(vbo) => vbo,
            Err(e) => {
                unsafe { gl.delete_vertex_array(vao) };
                return Err(e.into());
            }
        };

        unsafe {
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&vertices),
                glow::STATIC_DRAW,
            );
            for attr in V::ATTRIBUTES {
                gl.vertex_attrib_pointer_f32(
                    attr.location,
                    attr.components,
                    glow::FLOAT,
                    false,
                    V::stride(),
                    attr.offset,
                );
                gl.enable_vertex_attrib_array(attr.location);
            }
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }

        Ok(Self {
            vao,
            vbo: Some(vbo),
            mode,
            count,
        })
    }

    /// Uploads whichever vertex format a scene mesh uses.
    pub fn upload_scene_mesh(gl: &glow::Context, mesh: SceneMesh) -> Result<Self, RenderError> {
        match mesh {
            SceneMesh::Plain(m) => Self::upload(gl, m),
            SceneMesh::Textured(m) => Self::upload(gl, m),
            SceneMesh::Position(m) => Self::upload(gl, m),
        }
    }

    /// An empty VAO for the `gl_VertexID` full-screen quad.
    #[allow(unsafe_code)]
    pub fn fullscreen_quad(gl: &glow::Context) -> Result<Self, RenderError> {
        use glow::HasContext;

        // SAFETY: core profile requires a bound VAO even with no attributes.
        let vao = unsafe { gl.create_vertex_array()? };
        Ok(Self {
            vao,
            vbo: None,
            mode: glow::TRIANGLE_STRIP,
            count: FULLSCREEN_VERTEX_COUNT,
        })
    }

    pub fn vertex_count(&self) -> i32 {
        self.count
    }

    #[allow(unsafe_code)]
    pub fn draw(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: vao is valid and count matches the uploaded buffer.
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(self.mode, 0, self.count);
        }
    }

    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: handles were created in upload() or fullscreen_quad().
        unsafe {
            gl.delete_vertex_array(self.vao);
            if let Some(vbo) = self.vbo {
                gl.delete_buffer(vbo);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topology_maps_to_gl_mode() {
        assert_eq!(primitive_mode(Topology::TriangleStrip), glow::TRIANGLE_STRIP);
        assert_eq!(primitive_mode(Topology::Triangles), glow::TRIANGLES);
    }

    #[test]
    #[ignore = "requires GL context"]
    fn upload_keeps_vertex_count() {
        // Would test: GpuMesh::upload(gl, plane).vertex_count() == plane.len().
    }
}
