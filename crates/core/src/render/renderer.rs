//! Executes frame plans against GL.
//!
//! The renderer owns every GPU resource for a run: programs, meshes,
//! render targets and sampled textures. Everything is created in
//! [`Renderer::new`] and released in [`Renderer::destroy`]; a frame only
//! binds and draws.

use std::collections::HashMap;

use super::gpu_mesh::GpuMesh;
use super::program::ProgramSet;
use super::targets::RenderTargets;
use super::texture::{upload_cubemap, upload_texture_2d};
use super::RenderError;
use crate::assets::{
    decode_cubemap, decode_image, AssetPaths, DecodedImage, DUDV_TEXTURE, POOL_TEXTURE,
};
use crate::config::{Config, SceneKind};
use crate::pipeline::{
    DepthFunc, DrawCommand, FramePlan, MeshId, Pass, SceneGeometry, TextureSlot, Winding,
};

/// Neutral distortion: decodes to a zero offset in the water shader.
const FLAT_DUDV: [u8; 4] = [128, 128, 255, 255];
const PLACEHOLDER_GREY: [u8; 4] = [128, 128, 128, 255];

/// Image textures sampled by the scene (as opposed to target attachments).
struct SceneTextures {
    slots: HashMap<TextureSlot, glow::Texture>,
}

impl SceneTextures {
    fn load(
        gl: &glow::Context,
        assets: &AssetPaths,
        scene: SceneKind,
    ) -> Result<Self, RenderError> {
        let mut slots = HashMap::new();

        let faces = decode_cubemap(&assets.cubemap_faces()).unwrap_or_else(|e| {
            log::warn!("{e}; using a placeholder skybox");
            std::array::from_fn(|_| DecodedImage::placeholder(PLACEHOLDER_GREY))
        });
        slots.insert(TextureSlot::Cubemap, upload_cubemap(gl, &faces)?);

        if scene == SceneKind::Pool {
            let images = [
                (TextureSlot::Distortion, DUDV_TEXTURE, FLAT_DUDV),
                (TextureSlot::PoolSurface, POOL_TEXTURE, PLACEHOLDER_GREY),
            ];
            for (slot, file, fallback) in images {
                let image = decode_image(&assets.texture(file)).unwrap_or_else(|e| {
                    log::warn!("{e}; using a placeholder for {slot}");
                    DecodedImage::placeholder(fallback)
                });
                slots.insert(slot, upload_texture_2d(gl, &image)?);
            }
        }
        Ok(Self { slots })
    }

    #[allow(unsafe_code)]
    fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        for &texture in self.slots.values() {
            // SAFETY: every texture was created in load().
            unsafe { gl.delete_texture(texture) };
        }
    }
}

/// All GPU state for one run of the demo.
pub struct Renderer {
    programs: ProgramSet,
    meshes: HashMap<MeshId, GpuMesh>,
    targets: RenderTargets,
    textures: SceneTextures,
    width: u32,
    height: u32,
}

impl Renderer {
    /// Builds programs, uploads `geometry`, allocates targets at the
    /// configured size and loads textures.
    ///
    /// Program and framebuffer failures are returned; texture decode
    /// failures only log a warning and fall back to a placeholder.
    pub fn new(
        gl: &glow::Context,
        config: &Config,
        geometry: SceneGeometry,
    ) -> Result<Self, RenderError> {
        let assets = AssetPaths::new(config.asset_dir.clone());
        let programs = ProgramSet::build(gl, &assets, config.scene)?;

        let mut meshes = HashMap::new();
        meshes.insert(MeshId::FullscreenQuad, GpuMesh::fullscreen_quad(gl)?);
        for (id, mesh) in geometry.into_meshes() {
            let gpu = GpuMesh::upload_scene_mesh(gl, mesh)?;
            log::debug!("uploaded mesh '{id}' ({} vertices)", gpu.vertex_count());
            meshes.insert(id, gpu);
        }

        let targets = RenderTargets::new(
            gl,
            config.width,
            config.height,
            config.scene.has_refraction_pass(),
        )?;
        let textures = SceneTextures::load(gl, &assets, config.scene)?;

        log::info!(
            "renderer ready: {} scene at {}x{}",
            config.scene,
            config.width,
            config.height
        );
        Ok(Self {
            programs,
            meshes,
            targets,
            textures,
            width: config.width,
            height: config.height,
        })
    }

    /// Runs every pass of `plan` in order.
    pub fn render(&self, gl: &glow::Context, plan: &FramePlan) -> Result<(), RenderError> {
        for pass in &plan.passes {
            self.run_pass(gl, pass)?;
        }
        if cfg!(debug_assertions) {
            log_gl_error(gl);
        }
        Ok(())
    }

    #[allow(unsafe_code)]
    fn run_pass(&self, gl: &glow::Context, pass: &Pass) -> Result<(), RenderError> {
        use glow::HasContext;

        match self.targets.target(pass.target)? {
            Some(target) => target.bind(gl),
            // SAFETY: binding the default framebuffer is always valid.
            None => unsafe {
                gl.bind_framebuffer(glow::FRAMEBUFFER, None);
                gl.viewport(0, 0, self.width as i32, self.height as i32);
            },
        }

        // SAFETY: state setters on the current context.
        unsafe {
            if pass.depth_test {
                gl.enable(glow::DEPTH_TEST);
            } else {
                gl.disable(glow::DEPTH_TEST);
            }
            if let Some(clear) = pass.clear {
                let [r, g, b, a] = clear.color;
                gl.clear_color(r, g, b, a);
                let mut mask = glow::COLOR_BUFFER_BIT;
                if clear.depth {
                    mask |= glow::DEPTH_BUFFER_BIT;
                }
                gl.clear(mask);
            }
        }

        for &slot in &pass.bindings {
            self.bind_slot(gl, slot)?;
        }
        for draw in &pass.draws {
            self.run_draw(gl, draw)?;
        }
        Ok(())
    }

    #[allow(unsafe_code)]
    fn bind_slot(&self, gl: &glow::Context, slot: TextureSlot) -> Result<(), RenderError> {
        use glow::HasContext;

        let texture = self
            .targets
            .texture(slot)
            .or_else(|| self.textures.slots.get(&slot).copied())
            .ok_or_else(|| RenderError::MissingResource {
                kind: "texture",
                name: slot.to_string(),
            })?;
        let kind = if slot.is_cubemap() {
            glow::TEXTURE_CUBE_MAP
        } else {
            glow::TEXTURE_2D
        };
        // SAFETY: texture is a live texture of the matching kind.
        unsafe {
            gl.active_texture(glow::TEXTURE0 + slot.unit());
            gl.bind_texture(kind, Some(texture));
        }
        Ok(())
    }

    #[allow(unsafe_code)]
    fn run_draw(&self, gl: &glow::Context, draw: &DrawCommand) -> Result<(), RenderError> {
        use glow::HasContext;

        let program = self.programs.get(draw.program)?;
        let mesh = self
            .meshes
            .get(&draw.mesh)
            .ok_or_else(|| RenderError::MissingResource {
                kind: "mesh",
                name: draw.mesh.to_string(),
            })?;

        program.use_program(gl);
        for (name, value) in &draw.uniforms {
            program.set(gl, name, value)?;
        }

        // SAFETY: state setters on the current context; every change is
        // reverted after the draw.
        unsafe {
            if draw.winding == Winding::Clockwise {
                gl.front_face(glow::CW);
            }
            if draw.depth_func == DepthFunc::LessEqual {
                gl.depth_func(glow::LEQUAL);
            }
            if draw.clip_plane.is_some() {
                gl.enable(glow::CLIP_DISTANCE0);
            }
        }

        mesh.draw(gl);

        // SAFETY: restores the base state set by GpuContext::new.
        unsafe {
            gl.front_face(glow::CCW);
            gl.depth_func(glow::LESS);
            gl.disable(glow::CLIP_DISTANCE0);
        }
        Ok(())
    }

    /// Releases every GPU resource.
    pub fn destroy(&self, gl: &glow::Context) {
        self.programs.destroy(gl);
        for mesh in self.meshes.values() {
            mesh.destroy(gl);
        }
        self.targets.destroy(gl);
        self.textures.destroy(gl);
    }
}

#[allow(unsafe_code)]
fn log_gl_error(gl: &glow::Context) {
    use glow::HasContext;

    // SAFETY: get_error has no preconditions.
    let err = unsafe { gl.get_error() };
    if err != glow::NO_ERROR {
        log::trace!("GL error 0x{err:04X} during frame");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_dudv_decodes_to_zero_offset() {
        // The water shader maps a channel c to c / 255 * 2 - 1.
        let offset = |c: u8| f32::from(c) / 255.0 * 2.0 - 1.0;
        assert!(offset(FLAT_DUDV[0]).abs() < 0.01);
        assert!(offset(FLAT_DUDV[1]).abs() < 0.01);
    }

    #[test]
    #[ignore = "requires GL context"]
    fn render_executes_pool_plan() {
        // Would test: Renderer::new + render(plan) leaves no GL error.
    }
}
