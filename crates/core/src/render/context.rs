//! GPU context wrapper with version detection.
//!
//! `GpuContext` wraps a `glow::Context`, checks it is at least OpenGL 3.3
//! and applies the fixed state every pass relies on: depth testing and
//! back-face culling with counter-clockwise front faces.

use super::RenderError;

/// Minimum context version: 3.3 brings `gl_ClipDistance` with core profile
/// VAOs and `#version 330` shaders.
pub const REQUIRED_VERSION: (u32, u32) = (3, 3);

/// A `glow::Context` known to meet [`REQUIRED_VERSION`].
pub struct GpuContext {
    gl: glow::Context,
    version: (u32, u32),
}

impl GpuContext {
    /// Wraps `gl`, checks its version, and sets the base pipeline state.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnsupportedContext`] for anything older than
    /// OpenGL 3.3 or for an embedded (ES) context.
    #[allow(unsafe_code)]
    pub fn new(gl: glow::Context) -> Result<Self, RenderError> {
        use glow::HasContext;

        let v = gl.version();
        let version = (v.major, v.minor);
        if v.is_embedded || !version_supported(version) {
            return Err(RenderError::UnsupportedContext {
                major: v.major,
                minor: v.minor,
            });
        }
        log::info!("OpenGL {}.{} ({})", v.major, v.minor, v.vendor_info);

        // SAFETY: plain state setters on a current context.
        unsafe {
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);
            gl.enable(glow::CULL_FACE);
            gl.cull_face(glow::BACK);
            gl.front_face(glow::CCW);
        }

        Ok(Self { gl, version })
    }

    /// Returns a reference to the underlying `glow::Context`.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// `(major, minor)` reported by the driver.
    pub fn version(&self) -> (u32, u32) {
        self.version
    }
}

/// Whether `(major, minor)` meets [`REQUIRED_VERSION`].
pub fn version_supported(version: (u32, u32)) -> bool {
    version >= REQUIRED_VERSION
}
