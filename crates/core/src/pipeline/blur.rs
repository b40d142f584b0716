//! Blur pass scheduling.
//!
//! The first pass reads the unblurred scene color and writes buffer 0. Every
//! later pass `i` writes buffer `i % 2` and reads buffer `(i + 1) % 2`, so
//! after `n` passes the result sits in buffer [`final_blur_index`]`(n)`.
//! Passes alternate horizontal and vertical taps.

use super::ping_pong::PingPong;
use super::slots::TextureSlot;

/// Where a blur pass reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlurSource {
    Scene,
    Buffer(usize),
}

impl BlurSource {
    pub fn slot(self) -> TextureSlot {
        match self {
            BlurSource::Scene => TextureSlot::SceneColor,
            BlurSource::Buffer(index) => TextureSlot::blur(index),
        }
    }
}

/// One iteration of the blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurStep {
    pub pass: u32,
    pub source: BlurSource,
    /// Blur buffer index written by this pass.
    pub target: usize,
    pub horizontal: bool,
}

impl BlurStep {
    /// Unit sampling direction for the blur shader.
    pub fn direction(&self) -> [f32; 2] {
        if self.horizontal {
            [1.0, 0.0]
        } else {
            [0.0, 1.0]
        }
    }
}

/// Index of the blur buffer holding the final result after `passes` passes.
pub fn final_blur_index(passes: u32) -> usize {
    ((passes + 1) % 2) as usize
}

/// Builds the ordered steps for `passes` blur iterations.
///
/// Zero passes yields an empty schedule; config validation rejects that
/// value before it reaches the planner.
pub fn blur_schedule(passes: u32) -> Vec<BlurStep> {
    let mut pp = PingPong::new();
    let mut steps = Vec::with_capacity(passes as usize);
    for pass in 0..passes {
        let source = if pass == 0 {
            BlurSource::Scene
        } else {
            BlurSource::Buffer(pp.read_index())
        };
        steps.push(BlurStep {
            pass,
            source,
            target: pp.write_index(),
            horizontal: pass % 2 == 0,
        });
        pp.swap();
    }
    steps
}
