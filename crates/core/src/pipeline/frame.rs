//! Per-frame inputs to the pass planner.

use glam::Mat4;

use crate::camera::CameraSnapshot;
use crate::input::Selection;

/// Angular speed of the focus sweep, in radians per second.
const FOCUS_RATE: f32 = 0.75;
/// Offset added to the focus sine wave.
const FOCUS_BIAS: f32 = 0.5;

/// Focus value passed to the combine pass at `elapsed` seconds.
///
/// Sweeps between -0.5 and 1.5 with a period of `2π / 0.75` seconds.
pub fn focus_at(elapsed: f32) -> f32 {
    (FOCUS_RATE * elapsed).sin() + FOCUS_BIAS
}

/// Everything that changes from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    pub camera: CameraSnapshot,
    pub projection: Mat4,
    /// Seconds since start.
    pub elapsed: f32,
    pub selection: Selection,
}

impl FrameInputs {
    pub fn focus(&self) -> f32 {
        focus_at(self.elapsed)
    }
}
