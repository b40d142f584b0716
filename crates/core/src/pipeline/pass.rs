//! Render pass descriptions.
//!
//! A [`Pass`] is plain data: where to render, what to clear, which textures
//! to bind, and the ordered draws. The GL executor walks it without making
//! any decisions of its own.

use std::fmt;

use glam::{Mat4, Vec3, Vec4};
use serde::Serialize;

use super::scene::{MeshId, ProgramId};
use super::slots::TextureSlot;

/// Which stage of the frame a pass belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PassKind {
    RefractionCapture,
    MainScene,
    Blur,
    Combine,
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PassKind::RefractionCapture => "refraction-capture",
            PassKind::MainScene => "main-scene",
            PassKind::Blur => "blur",
            PassKind::Combine => "combine",
        })
    }
}

/// Framebuffer a pass renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetId {
    Refraction,
    Scene,
    Blur(usize),
    /// The window's default framebuffer.
    Screen,
}

impl TargetId {
    /// Texture slots backed by this target's attachments. A pass must never
    /// sample these while rendering into the target.
    pub fn attachments(self) -> &'static [TextureSlot] {
        match self {
            TargetId::Refraction => &[TextureSlot::Refraction],
            TargetId::Scene => &[TextureSlot::SceneColor, TextureSlot::SceneDepth],
            TargetId::Blur(0) => &[TextureSlot::BlurPing],
            TargetId::Blur(_) => &[TextureSlot::BlurPong],
            TargetId::Screen => &[],
        }
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetId::Refraction => f.write_str("refraction"),
            TargetId::Scene => f.write_str("scene"),
            TargetId::Blur(index) => write!(f, "blur-{index}"),
            TargetId::Screen => f.write_str("screen"),
        }
    }
}

/// Front-face winding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Winding {
    #[default]
    CounterClockwise,
    /// Used to view a closed mesh from the inside.
    Clockwise,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepthFunc {
    #[default]
    Less,
    /// Lets the skybox pass at the far plane.
    LessEqual,
}

/// A value for one uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    F32(f32),
    I32(i32),
    Vec2([f32; 2]),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    /// A sampler reading the given slot.
    Sampler(TextureSlot),
}

/// Clear operation at the start of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Clear {
    pub color: [f32; 4],
    pub depth: bool,
}

/// One draw call with all of its state.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshId,
    pub program: ProgramId,
    pub uniforms: Vec<(&'static str, UniformValue)>,
    pub winding: Winding,
    pub depth_func: DepthFunc,
    /// Plane for `gl_ClipDistance[0]`; `None` leaves clipping disabled.
    pub clip_plane: Option<Vec4>,
}

impl DrawCommand {
    pub fn new(mesh: MeshId, program: ProgramId) -> Self {
        Self {
            mesh,
            program,
            uniforms: Vec::new(),
            winding: Winding::default(),
            depth_func: DepthFunc::default(),
            clip_plane: None,
        }
    }

    pub fn uniform(mut self, name: &'static str, value: UniformValue) -> Self {
        self.uniforms.push((name, value));
        self
    }

    pub fn winding(mut self, winding: Winding) -> Self {
        self.winding = winding;
        self
    }

    pub fn depth_func(mut self, depth_func: DepthFunc) -> Self {
        self.depth_func = depth_func;
        self
    }

    /// Sets the clip plane and the `clipping_plane` uniform that feeds it.
    pub fn clip_plane(mut self, plane: Vec4) -> Self {
        self.clip_plane = Some(plane);
        self.uniform("clipping_plane", UniformValue::Vec4(plane))
    }

    /// Slots read by this draw's samplers, in uniform order.
    pub fn sampled_slots(&self) -> impl Iterator<Item = TextureSlot> + '_ {
        self.uniforms.iter().filter_map(|(_, v)| match v {
            UniformValue::Sampler(slot) => Some(*slot),
            _ => None,
        })
    }

    /// Looks up a uniform by name.
    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }
}

/// One render pass of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub kind: PassKind,
    pub target: TargetId,
    pub clear: Option<Clear>,
    pub depth_test: bool,
    /// Every slot the pass samples. Bound before the first draw.
    pub bindings: Vec<TextureSlot>,
    pub draws: Vec<DrawCommand>,
}

impl Pass {
    /// Builds a pass whose bindings are the union of its draws' samplers.
    pub fn new(
        kind: PassKind,
        target: TargetId,
        clear: Option<Clear>,
        depth_test: bool,
        draws: Vec<DrawCommand>,
    ) -> Self {
        let mut bindings = Vec::new();
        for slot in draws.iter().flat_map(DrawCommand::sampled_slots) {
            if !bindings.contains(&slot) {
                bindings.push(slot);
            }
        }
        Self {
            kind,
            target,
            clear,
            depth_test,
            bindings,
            draws,
        }
    }
}

/// Ordered passes for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FramePlan {
    pub passes: Vec<Pass>,
}

impl FramePlan {
    pub fn kinds(&self) -> Vec<PassKind> {
        self.passes.iter().map(|p| p.kind).collect()
    }

    pub fn pass(&self, kind: PassKind) -> Option<&Pass> {
        self.passes.iter().find(|p| p.kind == kind)
    }

    pub fn draw_count(&self) -> usize {
        self.passes.iter().map(|p| p.draws.len()).sum()
    }
}
