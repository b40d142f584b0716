//! GL-free frame planning.
//!
//! The planner turns a [`FrameInputs`] snapshot into a [`FramePlan`]: an
//! ordered list of passes, each naming its target, clears, texture bindings
//! and draws. The `render` module executes plans; everything here is plain
//! data and testable without a GPU.
//!
//! # Module overview
//!
//! - [`slots`] -- Fixed texture unit table.
//! - [`ping_pong`] -- Read/write index tracking for the blur buffers.
//! - [`blur`] -- Blur pass schedule and final buffer parity.
//! - [`frame`] -- Per-frame inputs and the focus sweep.
//! - [`pass`] -- Pass, draw and uniform descriptions.
//! - [`scene`] -- Mesh and program identifiers, scene layout and geometry.
//! - [`sequencer`] -- Builds the frame plan.

pub mod blur;
pub mod frame;
pub mod pass;
pub mod ping_pong;
pub mod scene;
pub mod sequencer;
pub mod slots;

pub use blur::{blur_schedule, final_blur_index, BlurSource, BlurStep};
pub use frame::{focus_at, FrameInputs};
pub use pass::{
    Clear, DepthFunc, DrawCommand, FramePlan, Pass, PassKind, TargetId, UniformValue, Winding,
};
pub use ping_pong::PingPong;
pub use scene::{gallery_objects, MeshId, ProgramId, SceneGeometry, SceneMesh, SceneObject};
pub use sequencer::PassSequencer;
pub use slots::TextureSlot;
