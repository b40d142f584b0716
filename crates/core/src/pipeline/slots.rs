//! Fixed texture unit assignments.
//!
//! Every texture the pipeline samples lives in exactly one slot for the whole
//! run. Passes name slots, and the executor binds the slot's texture to the
//! slot's unit, so sampler uniforms never need to change between frames.

use std::fmt;

/// A logical texture and the texture unit it is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Skybox cubemap, used for the sky and for reflections.
    Cubemap,
    /// Unblurred main pass color.
    SceneColor,
    /// Main pass depth, read by the combine pass.
    SceneDepth,
    /// Blur buffer 0.
    BlurPing,
    /// Blur buffer 1.
    BlurPong,
    /// What lies below the water, captured before the main pass.
    Refraction,
    /// Water distortion (du/dv) map.
    Distortion,
    /// Pool wall and floor tiles.
    PoolSurface,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 8] = [
        TextureSlot::Cubemap,
        TextureSlot::SceneColor,
        TextureSlot::SceneDepth,
        TextureSlot::BlurPing,
        TextureSlot::BlurPong,
        TextureSlot::Refraction,
        TextureSlot::Distortion,
        TextureSlot::PoolSurface,
    ];

    /// Zero-based texture unit (`GL_TEXTURE0 + unit`).
    pub fn unit(self) -> u32 {
        match self {
            TextureSlot::Cubemap => 0,
            TextureSlot::SceneColor => 1,
            TextureSlot::SceneDepth => 2,
            TextureSlot::BlurPing => 3,
            TextureSlot::BlurPong => 4,
            TextureSlot::Refraction => 5,
            TextureSlot::Distortion => 6,
            TextureSlot::PoolSurface => 7,
        }
    }

    /// The value to store in a `sampler*` uniform reading this slot.
    pub fn sampler_value(self) -> i32 {
        self.unit() as i32
    }

    /// The blur buffer slot for ping-pong index 0 or 1.
    pub fn blur(index: usize) -> TextureSlot {
        if index % 2 == 0 {
            TextureSlot::BlurPing
        } else {
            TextureSlot::BlurPong
        }
    }

    /// Whether the texture is a cubemap rather than a 2D texture.
    pub fn is_cubemap(self) -> bool {
        matches!(self, TextureSlot::Cubemap)
    }

    pub fn name(self) -> &'static str {
        match self {
            TextureSlot::Cubemap => "cubemap",
            TextureSlot::SceneColor => "scene-color",
            TextureSlot::SceneDepth => "scene-depth",
            TextureSlot::BlurPing => "blur-ping",
            TextureSlot::BlurPong => "blur-pong",
            TextureSlot::Refraction => "refraction",
            TextureSlot::Distortion => "distortion",
            TextureSlot::PoolSurface => "pool-surface",
        }
    }
}

impl fmt::Display for TextureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
