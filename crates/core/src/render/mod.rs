//! OpenGL 3.3 rendering.
//!
//! This module is only available when the `render` feature is enabled.
//! It owns every GPU resource and executes the [`FramePlan`]s built by
//! [`crate::pipeline`].
//!
//! # Module overview
//!
//! - [`context`] -- GPU context wrapper with version check and base state.
//! - [`shader`] -- Shader sources, compilation, linking, and error formatting.
//! - [`program`] -- Linked programs with resolved uniform tables.
//! - [`fullscreen`] -- Full-screen quad vertex shader constant.
//! - [`texture`] -- Texture configuration, allocation and image upload.
//! - [`target`] -- FBO + color/depth texture render targets.
//! - [`targets`] -- The set of targets a frame renders through.
//! - [`gpu_mesh`] -- Vertex arrays built from generated meshes.
//! - [`renderer`] -- Executes frame plans.
//!
//! [`FramePlan`]: crate::pipeline::FramePlan

pub mod context;
pub mod fullscreen;
pub mod gpu_mesh;
pub mod program;
pub mod renderer;
pub mod shader;
pub mod target;
pub mod targets;
pub mod texture;

pub use context::GpuContext;
pub use fullscreen::FULLSCREEN_VERTEX_SHADER;
pub use gpu_mesh::GpuMesh;
pub use program::{Program, ProgramSet};
pub use renderer::Renderer;
pub use shader::{
    compile_program, compile_shader, format_shader_error, link_program, referenced_lines,
    ShaderError, ShaderSource,
};
pub use target::{RenderTarget, TargetSpec};
pub use targets::RenderTargets;
pub use texture::{create_texture, upload_cubemap, upload_texture_2d, TextureConfig};

use thiserror::Error;

/// Errors raised while creating or using GPU resources.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A framebuffer did not report `FRAMEBUFFER_COMPLETE`.
    #[error("framebuffer '{target}' incomplete: status 0x{status:04X}")]
    IncompleteFramebuffer { target: String, status: u32 },

    #[error(transparent)]
    Shader(#[from] ShaderError),

    /// A GL object could not be created.
    #[error("GL error: {0}")]
    Gl(String),

    /// The context is older than OpenGL 3.3 core.
    #[error("OpenGL 3.3 or newer required, context is {major}.{minor}")]
    UnsupportedContext { major: u32, minor: u32 },

    /// A draw set a uniform its program was not loaded with.
    #[error("program '{program}' has no uniform '{name}'")]
    MissingUniform { program: String, name: String },

    /// A plan referenced a mesh, program or texture that was never created.
    #[error("missing {kind} '{name}'")]
    MissingResource { kind: &'static str, name: String },
}

impl From<String> for RenderError {
    fn from(message: String) -> Self {
        RenderError::Gl(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_framebuffer_shows_target_and_hex_status() {
        let err = RenderError::IncompleteFramebuffer {
            target: "scene".into(),
            status: glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT,
        };
        let msg = err.to_string();
        assert!(msg.contains("scene"), "missing target in: {msg}");
        assert!(msg.contains("0x8CD6"), "missing status in: {msg}");
    }

    #[test]
    fn unsupported_context_shows_version() {
        let err = RenderError::UnsupportedContext { major: 2, minor: 1 };
        assert!(err.to_string().contains("2.1"));
    }

    #[test]
    fn shader_error_converts_transparently() {
        let err: RenderError = ShaderError::LinkError("bad varying".into()).into();
        assert!(err.to_string().contains("bad varying"));
    }

    #[test]
    fn render_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RenderError>();
    }
}
