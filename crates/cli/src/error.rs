//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: setup error (window, GL context, framebuffer)
//! - 11: asset error (shader read/compile/link, missing GPU resource)
//! - 12: input error (bad config file or value, unknown scene)
//! - 13: serialization error

use depthfield_core::render::RenderError;
use depthfield_core::{ConfigError, MeshError};
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// The window, GL context or a render target could not be set up.
    Setup(String),
    /// A shader or other asset the renderer needs is unusable.
    Asset(String),
    /// A user input error (config file, flag value).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Setup(_) => 10,
            CliError::Asset(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Setup(msg) => write!(f, "setup failed: {msg}"),
            CliError::Asset(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<RenderError> for CliError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Shader(_)
            | RenderError::MissingUniform { .. }
            | RenderError::MissingResource { .. } => CliError::Asset(e.to_string()),
            RenderError::IncompleteFramebuffer { .. }
            | RenderError::Gl(_)
            | RenderError::UnsupportedContext { .. } => CliError::Setup(e.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Input(e.to_string())
    }
}

impl From<MeshError> for CliError {
    fn from(e: MeshError) -> Self {
        CliError::Input(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
