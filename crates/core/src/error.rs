//! Error types for the depthfield core.
//!
//! Setup is the only phase that can fail: mesh generation, configuration
//! loading, and asset decoding all report through the enums below. GPU-side
//! failures live in [`crate::render::RenderError`] behind the `render` feature.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the procedural mesh generators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    /// A shape parameter was out of range (zero resolution, non-positive
    /// size, degenerate edge vectors, ...).
    #[error("invalid mesh parameter '{name}': {reason}")]
    InvalidParameter {
        /// The offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl MeshError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        MeshError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Errors produced while loading or validating a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A field held a value the demo cannot run with.
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },

    /// The config file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file was not valid JSON for a `Config`.
    #[error("cannot parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A scene name did not match any known scene.
    #[error("unknown scene: {0}")]
    UnknownScene(String),
}

/// Errors produced while decoding image assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The file could not be opened or decoded as an image.
    #[error("cannot decode image {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Cubemap faces must be square and all the same size.
    #[error("cubemap face {path} is {width}x{height}, expected {expected}x{expected}")]
    CubemapFaceMismatch {
        path: PathBuf,
        width: u32,
        height: u32,
        expected: u32,
    },
}
