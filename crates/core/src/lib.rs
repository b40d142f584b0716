#![deny(unsafe_code)]
//! Core of the depthfield demo: a real-time scene rendered through a
//! refraction capture, a main pass, an iterative blur and a depth-of-field
//! combine.
//!
//! Provides procedural meshes (`mesh`), the orbit camera, keyboard selection
//! and frame clock, run configuration, image decoding, and the GL-free frame
//! planner (`pipeline`). The OpenGL executor lives in `render` behind the
//! `render` feature.

pub mod assets;
pub mod camera;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod mesh;
pub mod pipeline;

#[cfg(feature = "render")]
pub mod render;

pub use camera::{CameraSnapshot, CameraState, Projection};
pub use clock::{FrameClock, FrameTime};
pub use config::{Config, SceneKind};
pub use error::{AssetError, ConfigError, MeshError};
pub use input::{InputCommand, InputState, Selection};
pub use mesh::{Mesh, Topology};
pub use pipeline::{FrameInputs, FramePlan, PassSequencer, SceneGeometry};
