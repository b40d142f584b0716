//! Run configuration.
//!
//! A [`Config`] is built from defaults, optionally overlaid by a JSON file,
//! then by command-line flags. Missing JSON keys keep their defaults.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::camera::Projection;
use crate::error::ConfigError;

/// Which set of objects the main pass draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    /// Reflective and refractive spheres and cubes under a skybox.
    Gallery,
    /// Animated water over a tiled pool, with a refraction capture pass.
    #[default]
    Pool,
}

impl SceneKind {
    pub const ALL: [SceneKind; 2] = [SceneKind::Gallery, SceneKind::Pool];

    pub fn name(self) -> &'static str {
        match self {
            SceneKind::Gallery => "gallery",
            SceneKind::Pool => "pool",
        }
    }

    /// Whether the scene needs the refraction capture pass and target.
    pub fn has_refraction_pass(self) -> bool {
        matches!(self, SceneKind::Pool)
    }
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SceneKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| ConfigError::UnknownScene(s.to_string()))
    }
}

/// Everything needed to start the demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window and render-target width in pixels.
    pub width: u32,
    /// Window and render-target height in pixels.
    pub height: u32,
    pub title: String,
    pub scene: SceneKind,
    /// Number of blur iterations before the combine pass.
    pub blur_passes: u32,
    /// Height of the water surface; the refraction capture clips above it.
    pub water_height: f32,
    /// Root directory holding `shaders/` and `textures/`.
    pub asset_dir: PathBuf,
    /// Degrees of rotation per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Distance of the camera from the origin.
    pub orbit_radius: f32,
    pub fov_degrees: f32,
    pub vsync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            title: "depthfield".to_string(),
            scene: SceneKind::default(),
            blur_passes: 10,
            water_height: 0.2,
            asset_dir: PathBuf::from("assets"),
            mouse_sensitivity: 1.0,
            orbit_radius: 1.0,
            fov_degrees: 45.0,
            vsync: true,
        }
    }
}

impl Config {
    /// Reads a JSON config file. Keys not present keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not a valid config object.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks every field is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(invalid("width/height", "must be non-zero"));
        }
        if self.blur_passes == 0 {
            return Err(invalid("blur_passes", "must be at least 1"));
        }
        if !self.water_height.is_finite() {
            return Err(invalid("water_height", "must be finite"));
        }
        if !(self.mouse_sensitivity.is_finite() && self.mouse_sensitivity > 0.0) {
            return Err(invalid("mouse_sensitivity", "must be positive"));
        }
        if !(self.orbit_radius.is_finite() && self.orbit_radius > 0.0) {
            return Err(invalid("orbit_radius", "must be positive"));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(invalid("fov_degrees", "must be between 0 and 180"));
        }
        Ok(())
    }

    /// Width over height of the render targets.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn projection(&self) -> Projection {
        Projection {
            fov_y_degrees: self.fov_degrees,
            ..Projection::default()
        }
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.blur_passes, 10);
        assert_eq!(cfg.scene, SceneKind::Pool);
        assert!((cfg.water_height - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_dimensions_fail_validation() {
        let cfg = Config {
            width: 0,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_blur_passes_fail_validation() {
        let cfg = Config {
            blur_passes: 0,
            ..Config::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("blur_passes"));
    }

    #[test]
    fn bad_fov_fails_validation() {
        for fov in [0.0, 180.0, f32::NAN] {
            let cfg = Config {
                fov_degrees: fov,
                ..Config::default()
            };
            assert!(cfg.validate().is_err(), "fov {fov} accepted");
        }
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "scene": "gallery", "blur_passes": 4 }}"#).unwrap();

        let cfg = Config::from_file(file.path()).unwrap();
        assert_eq!(cfg.scene, SceneKind::Gallery);
        assert_eq!(cfg.blur_passes, 4);
        assert_eq!(cfg.width, 1000);
        assert_eq!(cfg.title, "depthfield");
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn scene_kind_parses_names() {
        assert_eq!("pool".parse::<SceneKind>().unwrap(), SceneKind::Pool);
        assert_eq!("gallery".parse::<SceneKind>().unwrap(), SceneKind::Gallery);
        assert!("ocean".parse::<SceneKind>().is_err());
    }

    #[test]
    fn only_pool_has_refraction_pass() {
        assert!(SceneKind::Pool.has_refraction_pass());
        assert!(!SceneKind::Gallery.has_refraction_pass());
    }

    #[test]
    fn aspect_is_width_over_height() {
        let cfg = Config {
            width: 1600,
            height: 900,
            ..Config::default()
        };
        assert!((cfg.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn config_json_round_trip() {
        let cfg = Config {
            scene: SceneKind::Gallery,
            blur_passes: 3,
            ..Config::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
