//! GL-free summary of what a run would do.

use std::fmt;

use depthfield_core::{CameraState, Config, FrameInputs, InputState, PassSequencer, SceneGeometry};

use crate::error::CliError;

/// One pass of the first frame's plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PassSummary {
    pub kind: String,
    pub target: String,
    pub bindings: Vec<String>,
    /// `(mesh, program)` per draw, in order.
    pub draws: Vec<(String, String)>,
}

/// Scene geometry sizes and the frame plan for a configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub scene: String,
    pub width: u32,
    pub height: u32,
    pub blur_passes: u32,
    pub final_blur_index: usize,
    pub draw_count: usize,
    pub meshes: Vec<(String, usize)>,
    pub passes: Vec<PassSummary>,
}

impl Report {
    /// Generates geometry and plans the first frame of `config`.
    pub fn build(config: &Config) -> Result<Self, CliError> {
        let geometry = SceneGeometry::generate(config.scene, config.water_height)?;
        let sequencer = PassSequencer::from_config(config);

        let inputs = FrameInputs {
            camera: CameraState::new(config.mouse_sensitivity, config.orbit_radius).snapshot(),
            projection: config.projection().matrix(config.aspect()),
            elapsed: 0.0,
            selection: InputState::new().selection(),
        };
        let plan = sequencer.plan(&inputs);

        let passes = plan
            .passes
            .iter()
            .map(|pass| PassSummary {
                kind: pass.kind.to_string(),
                target: pass.target.to_string(),
                bindings: pass.bindings.iter().map(|s| s.to_string()).collect(),
                draws: pass
                    .draws
                    .iter()
                    .map(|d| (d.mesh.to_string(), d.program.to_string()))
                    .collect(),
            })
            .collect();

        Ok(Self {
            scene: config.scene.to_string(),
            width: config.width,
            height: config.height,
            blur_passes: config.blur_passes,
            final_blur_index: sequencer.final_blur_index(),
            draw_count: plan.draw_count(),
            meshes: geometry
                .vertex_counts()
                .into_iter()
                .map(|(id, count)| (id.to_string(), count))
                .collect(),
            passes,
        })
    }

    pub fn to_json(&self) -> serde_json::Value {
        let meshes: serde_json::Map<String, serde_json::Value> = self
            .meshes
            .iter()
            .map(|(name, count)| (name.clone(), serde_json::json!(count)))
            .collect();
        let passes: Vec<serde_json::Value> = self
            .passes
            .iter()
            .map(|p| {
                serde_json::json!({
                    "kind": p.kind,
                    "target": p.target,
                    "bindings": p.bindings,
                    "draws": p
                        .draws
                        .iter()
                        .map(|(mesh, program)| serde_json::json!({"mesh": mesh, "program": program}))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        serde_json::json!({
            "scene": self.scene,
            "width": self.width,
            "height": self.height,
            "blur_passes": self.blur_passes,
            "final_blur_index": self.final_blur_index,
            "draw_count": self.draw_count,
            "meshes": meshes,
            "passes": passes,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "scene {} at {}x{}, {} blur passes (final buffer {})",
            self.scene, self.width, self.height, self.blur_passes, self.final_blur_index
        )?;
        writeln!(f, "Meshes:")?;
        for (name, count) in &self.meshes {
            writeln!(f, "  {name:<16} {count} vertices")?;
        }
        writeln!(f, "Passes ({} draws):", self.draw_count)?;
        for (i, pass) in self.passes.iter().enumerate() {
            writeln!(f, "  {i:>2}. {} -> {}", pass.kind, pass.target)?;
            if !pass.bindings.is_empty() {
                writeln!(f, "      binds {}", pass.bindings.join(", "))?;
            }
            for (mesh, program) in &pass.draws {
                writeln!(f, "      draw {mesh} with {program}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depthfield_core::SceneKind;

    fn report(scene: SceneKind, blur_passes: u32) -> Report {
        let config = Config {
            scene,
            blur_passes,
            ..Config::default()
        };
        Report::build(&config).unwrap()
    }

    #[test]
    fn pool_report_lists_every_stage_in_order() {
        let r = report(SceneKind::Pool, 3);
        let kinds: Vec<&str> = r.passes.iter().map(|p| p.kind.as_str()).collect();
        assert_eq!(
            kinds,
            ["refraction-capture", "main-scene", "blur", "blur", "blur", "combine"]
        );
        assert_eq!(r.passes.last().unwrap().target, "screen");
    }

    #[test]
    fn gallery_report_has_no_capture() {
        let r = report(SceneKind::Gallery, 2);
        assert_eq!(r.passes[0].kind, "main-scene");
        assert!(r.passes.iter().all(|p| p.target != "refraction"));
    }

    #[test]
    fn final_blur_index_follows_parity() {
        assert_eq!(report(SceneKind::Pool, 10).final_blur_index, 1);
        assert_eq!(report(SceneKind::Pool, 3).final_blur_index, 0);
    }

    #[test]
    fn meshes_report_nonzero_vertex_counts() {
        let r = report(SceneKind::Pool, 1);
        assert!(!r.meshes.is_empty());
        assert!(r.meshes.iter().all(|(_, count)| *count > 0));
    }

    #[test]
    fn json_has_expected_shape() {
        let j = report(SceneKind::Gallery, 4).to_json();
        assert_eq!(j["scene"], "gallery");
        assert_eq!(j["blur_passes"], 4);
        let passes = j["passes"].as_array().unwrap();
        assert_eq!(passes.len(), 6);
        assert_eq!(passes[5]["kind"], "combine");
        // 5 objects and the skybox, 4 blurs, 1 combine
        assert_eq!(j["draw_count"], 11);
        assert!(passes[5]["draws"][0]["program"].is_string());
    }

    #[test]
    fn text_output_names_each_pass() {
        let text = report(SceneKind::Pool, 1).to_string();
        assert!(text.contains("refraction-capture -> refraction"));
        assert!(text.contains("combine -> screen"));
    }

    #[test]
    fn invalid_water_height_is_reported_as_input_error() {
        let config = Config {
            scene: SceneKind::Pool,
            water_height: f32::NAN,
            ..Config::default()
        };
        let err = Report::build(&config).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }
}
