//! Render target (FBO + textures) for off-screen rendering.
//!
//! A `RenderTarget` pairs a framebuffer object with an RGBA8 color
//! attachment and, when requested, a sampleable depth attachment.

use super::texture::{create_texture, TextureConfig};
use super::RenderError;

/// Size and attachments of a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    /// Name used in logs and errors.
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    /// Attach a depth texture instead of rendering without depth.
    pub depth: bool,
}

impl TargetSpec {
    pub fn color(name: &'static str, width: u32, height: u32) -> Self {
        Self {
            name,
            width,
            height,
            depth: false,
        }
    }

    pub fn color_depth(name: &'static str, width: u32, height: u32) -> Self {
        Self {
            depth: true,
            ..Self::color(name, width, height)
        }
    }

    /// Rejects sizes GL would report as an incomplete attachment, before any
    /// GL object is created.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::IncompleteFramebuffer {
                target: self.name.to_string(),
                status: glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT,
            });
        }
        Ok(())
    }
}

/// An off-screen render target.
pub struct RenderTarget {
    name: &'static str,
    fbo: glow::Framebuffer,
    color: glow::Texture,
    depth: Option<glow::Texture>,
    width: u32,
    height: u32,
}

impl RenderTarget {
    /// Creates the framebuffer and its attachments, then verifies
    /// completeness.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::IncompleteFramebuffer`] if `spec` is invalid
    /// or the framebuffer is not complete (all created objects are released
    /// first), or [`RenderError::Gl`] if an object cannot be created.
    #[allow(unsafe_code)]
    pub fn new(gl: &glow::Context, spec: &TargetSpec) -> Result<Self, RenderError> {
        use glow::HasContext;

        spec.validate()?;

        let color = create_texture(gl, &TextureConfig::rgba8(spec.width, spec.height))?;
        let depth = if spec.depth {
            match create_texture(gl, &TextureConfig::depth24(spec.width, spec.height)) {
                Ok(t) => Some(t),
                Err(e) => {
                    // SAFETY: color is a valid handle created above.
                    unsafe { gl.delete_texture(color) };
                    return Err(e.into());
                }
            }
        } else {
            None
        };

        // SAFETY: glow wraps raw GL calls as unsafe. We create, configure,
        // and verify a framebuffer using valid texture handles.
        let fbo = match unsafe { gl.create_framebuffer() } {
            Ok(fbo) => fbo,
            Err(e) => {
                unsafe { delete_textures(gl, color, depth) };
                return Err(e.into());
            }
        };

        let status = unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(color),
                0,
            );
            if let Some(depth) = depth {
                gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    glow::DEPTH_ATTACHMENT,
                    glow::TEXTURE_2D,
                    Some(depth),
                    0,
                );
            }
            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            status
        };

        if status != glow::FRAMEBUFFER_COMPLETE {
            unsafe {
                gl.delete_framebuffer(fbo);
                delete_textures(gl, color, depth);
            }
            return Err(RenderError::IncompleteFramebuffer {
                target: spec.name.to_string(),
                status,
            });
        }

        log::debug!(
            "created target '{}' {}x{}{}",
            spec.name,
            spec.width,
            spec.height,
            if spec.depth { " with depth" } else { "" }
        );

        Ok(Self {
            name: spec.name,
            fbo,
            color,
            depth,
            width: spec.width,
            height: spec.height,
        })
    }

    /// Binds this render target's framebuffer as the active draw target
    /// and sets the viewport to match the texture dimensions.
    #[allow(unsafe_code)]
    pub fn bind(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: self.fbo is a valid framebuffer handle created in new().
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            gl.viewport(0, 0, self.width as i32, self.height as i32);
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The color texture, for sampling in later passes.
    pub fn color(&self) -> glow::Texture {
        self.color
    }

    /// The depth texture, if the target has one.
    pub fn depth(&self) -> Option<glow::Texture> {
        self.depth
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Deletes the framebuffer and its textures.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: all handles are valid objects created in new().
        unsafe {
            gl.delete_framebuffer(self.fbo);
            delete_textures(gl, self.color, self.depth);
        }
    }
}

#[allow(unsafe_code)]
unsafe fn delete_textures(gl: &glow::Context, color: glow::Texture, depth: Option<glow::Texture>) {
    use glow::HasContext;

    gl.delete_texture(color);
    if let Some(depth) = depth {
        gl.delete_texture(depth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_spec_is_incomplete() {
        for (w, h) in [(0, 0), (0, 10), (10, 0)] {
            let err = TargetSpec::color("blur-ping", w, h).validate().unwrap_err();
            match err {
                RenderError::IncompleteFramebuffer { target, status } => {
                    assert_eq!(target, "blur-ping");
                    assert_eq!(status, glow::FRAMEBUFFER_INCOMPLETE_ATTACHMENT);
                }
                other => panic!("expected IncompleteFramebuffer, got {other:?}"),
            }
        }
    }

    #[test]
    fn non_zero_spec_validates() {
        assert!(TargetSpec::color_depth("scene", 1000, 1000).validate().is_ok());
    }

    #[test]
    fn color_depth_requests_depth() {
        assert!(TargetSpec::color_depth("scene", 4, 4).depth);
        assert!(!TargetSpec::color("blur", 4, 4).depth);
    }

    #[test]
    #[ignore = "requires GL context"]
    fn new_creates_complete_target_with_depth() {
        // Would test: RenderTarget::new(gl, &TargetSpec::color_depth(..))
        // succeeds and depth() is Some.
    }
}
