//! Linked programs with their uniform tables.
//!
//! Uniform locations are resolved once at load time. Setting a uniform the
//! program was not loaded with is an error; a declared uniform the driver
//! optimized away is skipped silently.

use std::collections::HashMap;

use super::fullscreen::fullscreen_vertex_source;
use super::shader::{compile_program, ShaderSource};
use super::RenderError;
use crate::assets::AssetPaths;
use crate::config::SceneKind;
use crate::pipeline::{ProgramId, UniformValue};

/// A linked program and its resolved uniforms.
pub struct Program {
    name: String,
    handle: glow::Program,
    uniforms: HashMap<&'static str, Option<glow::UniformLocation>>,
}

impl Program {
    /// Compiles and links `vertex` + `fragment` and resolves `uniforms`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Shader`] if a source cannot be read, compiled
    /// or linked.
    #[allow(unsafe_code)]
    pub fn load(
        gl: &glow::Context,
        name: &str,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
        uniforms: &[&'static str],
    ) -> Result<Self, RenderError> {
        use glow::HasContext;

        let handle = compile_program(gl, vertex, fragment)?;
        let uniforms = uniforms
            .iter()
            .map(|&u| {
                // SAFETY: handle is a successfully linked program.
                let loc = unsafe { gl.get_uniform_location(handle, u) };
                if loc.is_none() {
                    log::warn!("program '{name}': uniform '{u}' is not active");
                }
                (u, loc)
            })
            .collect();
        log::debug!("loaded program '{name}' ({vertex} + {fragment})");
        Ok(Self {
            name: name.to_string(),
            handle,
            uniforms,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[allow(unsafe_code)]
    pub fn use_program(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: handle is a valid linked program.
        unsafe { gl.use_program(Some(self.handle)) };
    }

    /// Sets one uniform on this program, which must be in use.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingUniform`] if `name` was not part of
    /// the uniform list given to [`Program::load`].
    #[allow(unsafe_code)]
    pub fn set(
        &self,
        gl: &glow::Context,
        name: &str,
        value: &UniformValue,
    ) -> Result<(), RenderError> {
        use glow::HasContext;

        let Some(slot) = self.uniforms.get(name) else {
            return Err(RenderError::MissingUniform {
                program: self.name.clone(),
                name: name.to_string(),
            });
        };
        let Some(loc) = slot.as_ref() else {
            return Ok(());
        };

        // SAFETY: loc belongs to this program, which the caller has bound.
        unsafe {
            match value {
                UniformValue::F32(v) => gl.uniform_1_f32(Some(loc), *v),
                UniformValue::I32(v) => gl.uniform_1_i32(Some(loc), *v),
                UniformValue::Vec2([x, y]) => gl.uniform_2_f32(Some(loc), *x, *y),
                UniformValue::Vec3(v) => gl.uniform_3_f32(Some(loc), v.x, v.y, v.z),
                UniformValue::Vec4(v) => gl.uniform_4_f32(Some(loc), v.x, v.y, v.z, v.w),
                UniformValue::Mat4(m) => {
                    gl.uniform_matrix_4_f32_slice(Some(loc), false, &m.to_cols_array())
                }
                UniformValue::Sampler(slot) => gl.uniform_1_i32(Some(loc), slot.sampler_value()),
            }
        }
        Ok(())
    }

    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        // SAFETY: handle was created in load().
        unsafe { gl.delete_program(self.handle) };
    }
}

/// Vertex and fragment sources for a program.
pub fn program_sources(assets: &AssetPaths, id: ProgramId) -> (ShaderSource, ShaderSource) {
    let vertex = match id.vertex_file() {
        Some(file) => ShaderSource::File(assets.shader(&file)),
        None => fullscreen_vertex_source(),
    };
    let fragment = ShaderSource::File(assets.shader(&id.fragment_file()));
    (vertex, fragment)
}

/// Every program a scene draws with.
pub struct ProgramSet {
    programs: HashMap<ProgramId, Program>,
}

impl ProgramSet {
    /// Builds each program [`ProgramId::for_scene`] lists. The first failure
    /// releases the programs already linked and is returned.
    pub fn build(
        gl: &glow::Context,
        assets: &AssetPaths,
        scene: SceneKind,
    ) -> Result<Self, RenderError> {
        let mut programs = HashMap::new();
        for &id in ProgramId::for_scene(scene) {
            let (vertex, fragment) = program_sources(assets, id);
            match Program::load(gl, id.name(), &vertex, &fragment, id.uniforms()) {
                Ok(program) => {
                    programs.insert(id, program);
                }
                Err(e) => {
                    for program in programs.values() {
                        program.destroy(gl);
                    }
                    return Err(e);
                }
            }
        }
        log::info!("built {} programs for the {scene} scene", programs.len());
        Ok(Self { programs })
    }

    pub fn get(&self, id: ProgramId) -> Result<&Program, RenderError> {
        self.programs
            .get(&id)
            .ok_or_else(|| RenderError::MissingResource {
                kind: "program",
                name: id.name().to_string(),
            })
    }

    pub fn destroy(&self, gl: &glow::Context) {
        for program in self.programs.values() {
            program.destroy(gl);
        }
    }
}
