//! Frame timing.
//!
//! The clock is fed absolute timestamps (seconds since start) by the window
//! layer rather than reading a system clock itself, so frame timing is
//! deterministic under test.

/// Timing snapshot for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started. Drives water animation and focus.
    pub elapsed: f32,
    /// Seconds since the previous tick.
    pub delta: f32,
    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Produces [`FrameTime`]s from a monotonically increasing time source.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<f64>,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances to `now` (seconds since start).
    ///
    /// The first tick has zero delta. A timestamp earlier than the previous
    /// one yields zero delta instead of a negative one.
    pub fn tick(&mut self, now: f64) -> FrameTime {
        let delta = self.last.map_or(0.0, |last| (now - last).max(0.0));
        self.last = Some(now);

        let ft = FrameTime {
            elapsed: now as f32,
            delta: delta as f32,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}
