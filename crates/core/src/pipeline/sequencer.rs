//! Builds the ordered pass list for a frame.
//!
//! Frame order is fixed: refraction capture (pool scene only), main scene,
//! `blur_passes` blur iterations, then the depth-of-field combine onto the
//! screen.

use glam::{Mat4, Vec4};

use super::blur::{blur_schedule, final_blur_index, BlurStep};
use super::frame::FrameInputs;
use super::pass::{
    Clear, DepthFunc, DrawCommand, FramePlan, Pass, PassKind, TargetId, UniformValue, Winding,
};
use super::scene::{
    gallery_objects, MeshId, ProgramId, GALLERY_CLEAR_COLOR, POOL_CLEAR_COLOR,
};
use super::slots::TextureSlot;
use crate::config::{Config, SceneKind};

/// Clip plane that keeps every fragment.
const NO_CLIP: Vec4 = Vec4::ZERO;

/// Plans frames for one scene configuration.
#[derive(Debug, Clone)]
pub struct PassSequencer {
    scene: SceneKind,
    blur_steps: Vec<BlurStep>,
    blur_passes: u32,
    water_height: f32,
}

impl PassSequencer {
    pub fn new(scene: SceneKind, blur_passes: u32, water_height: f32) -> Self {
        Self {
            scene,
            blur_steps: blur_schedule(blur_passes),
            blur_passes,
            water_height,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.scene, config.blur_passes, config.water_height)
    }

    pub fn scene(&self) -> SceneKind {
        self.scene
    }

    /// Blur buffer the combine pass reads.
    pub fn final_blur_index(&self) -> usize {
        final_blur_index(self.blur_passes)
    }

    /// Plans every pass for one frame.
    pub fn plan(&self, inputs: &FrameInputs) -> FramePlan {
        let mut passes = Vec::with_capacity(self.blur_steps.len() + 3);
        if self.scene.has_refraction_pass() {
            passes.push(self.refraction_pass(inputs));
        }
        passes.push(self.main_pass(inputs));
        passes.extend(self.blur_steps.iter().map(blur_pass));
        passes.push(self.combine_pass(inputs));
        FramePlan { passes }
    }

    fn clear_color(&self) -> [f32; 4] {
        match self.scene {
            SceneKind::Gallery => GALLERY_CLEAR_COLOR,
            SceneKind::Pool => POOL_CLEAR_COLOR,
        }
    }

    fn clear(&self) -> Option<Clear> {
        Some(Clear {
            color: self.clear_color(),
            depth: true,
        })
    }

    /// The pool seen from inside, with everything above the water clipped.
    fn refraction_pass(&self, inputs: &FrameInputs) -> Pass {
        let below_water = Vec4::new(0.0, -1.0, 0.0, self.water_height);
        Pass::new(
            PassKind::RefractionCapture,
            TargetId::Refraction,
            self.clear(),
            true,
            vec![pool_draw(inputs, below_water)],
        )
    }

    fn main_pass(&self, inputs: &FrameInputs) -> Pass {
        let mut draws = Vec::new();
        match self.scene {
            SceneKind::Pool => {
                draws.push(water_draw(inputs));
                draws.push(pool_draw(inputs, NO_CLIP));
            }
            SceneKind::Gallery => {
                draws.extend(gallery_objects().into_iter().map(|obj| {
                    object_draw(inputs, obj.mesh, obj.program, obj.model)
                }));
            }
        }
        draws.push(skybox_draw(inputs));
        Pass::new(
            PassKind::MainScene,
            TargetId::Scene,
            self.clear(),
            true,
            draws,
        )
    }

    fn combine_pass(&self, inputs: &FrameInputs) -> Pass {
        let draw = DrawCommand::new(MeshId::FullscreenQuad, ProgramId::Combine)
            .uniform("pristine", UniformValue::Sampler(TextureSlot::SceneColor))
            .uniform(
                "blurred",
                UniformValue::Sampler(TextureSlot::blur(self.final_blur_index())),
            )
            .uniform("depth", UniformValue::Sampler(TextureSlot::SceneDepth))
            .uniform("focus", UniformValue::F32(inputs.focus()))
            .uniform("selection", UniformValue::I32(inputs.selection.as_uniform()));
        Pass::new(
            PassKind::Combine,
            TargetId::Screen,
            Some(Clear {
                color: [0.0, 0.0, 0.0, 1.0],
                depth: false,
            }),
            false,
            vec![draw],
        )
    }
}

fn blur_pass(step: &BlurStep) -> Pass {
    let draw = DrawCommand::new(MeshId::FullscreenQuad, ProgramId::Blur)
        .uniform("source", UniformValue::Sampler(step.source.slot()))
        .uniform("direction", UniformValue::Vec2(step.direction()));
    Pass::new(
        PassKind::Blur,
        TargetId::Blur(step.target),
        None,
        false,
        vec![draw],
    )
}

fn camera_uniforms(draw: DrawCommand, inputs: &FrameInputs, model: Mat4) -> DrawCommand {
    draw.uniform("model", UniformValue::Mat4(model))
        .uniform("view", UniformValue::Mat4(inputs.camera.view_matrix()))
        .uniform("projection", UniformValue::Mat4(inputs.projection))
}

/// Clockwise winding culls the outside of the pool box so its interior shows.
fn pool_draw(inputs: &FrameInputs, plane: Vec4) -> DrawCommand {
    camera_uniforms(DrawCommand::new(MeshId::Pool, ProgramId::Pool), inputs, Mat4::IDENTITY)
        .uniform("pool_texture", UniformValue::Sampler(TextureSlot::PoolSurface))
        .clip_plane(plane)
        .winding(Winding::Clockwise)
}

fn water_draw(inputs: &FrameInputs) -> DrawCommand {
    camera_uniforms(DrawCommand::new(MeshId::Water, ProgramId::Water), inputs, Mat4::IDENTITY)
        .uniform("eye_pos", UniformValue::Vec3(inputs.camera.position))
        .uniform("time", UniformValue::F32(inputs.elapsed))
        .uniform("skybox", UniformValue::Sampler(TextureSlot::Cubemap))
        .uniform("dudv", UniformValue::Sampler(TextureSlot::Distortion))
        .uniform("refraction", UniformValue::Sampler(TextureSlot::Refraction))
}

fn object_draw(inputs: &FrameInputs, mesh: MeshId, program: ProgramId, model: Mat4) -> DrawCommand {
    camera_uniforms(DrawCommand::new(mesh, program), inputs, model)
        .uniform("eye_pos", UniformValue::Vec3(inputs.camera.position))
        .uniform("skybox", UniformValue::Sampler(TextureSlot::Cubemap))
}

/// Drawn last with `LEQUAL` so it only fills pixels nothing else covered.
fn skybox_draw(inputs: &FrameInputs) -> DrawCommand {
    DrawCommand::new(MeshId::Skybox, ProgramId::Skybox)
        .uniform("view", UniformValue::Mat4(inputs.camera.skybox_view_matrix()))
        .uniform("projection", UniformValue::Mat4(inputs.projection))
        .uniform("skybox", UniformValue::Sampler(TextureSlot::Cubemap))
        .depth_func(DepthFunc::LessEqual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{CameraState, Projection};
    use crate::input::Selection;

    fn inputs(elapsed: f32, selection: u8) -> FrameInputs {
        FrameInputs {
            camera: CameraState::new(1.0, 1.0).snapshot(),
            projection: Projection::default().matrix(1.0),
            elapsed,
            selection: Selection::new(selection).unwrap(),
        }
    }

    fn plan(scene: SceneKind, blur_passes: u32) -> FramePlan {
        PassSequencer::new(scene, blur_passes, 0.2).plan(&inputs(0.0, 1))
    }

    #[test]
    fn pool_plan_order() {
        let kinds = plan(SceneKind::Pool, 3).kinds();
        assert_eq!(
            kinds,
            vec![
                PassKind::RefractionCapture,
                PassKind::MainScene,
                PassKind::Blur,
                PassKind::Blur,
                PassKind::Blur,
                PassKind::Combine,
            ]
        );
    }

    #[test]
    fn gallery_plan_skips_refraction_capture() {
        let kinds = plan(SceneKind::Gallery, 2).kinds();
        assert_eq!(
            kinds,
            vec![PassKind::MainScene, PassKind::Blur, PassKind::Blur, PassKind::Combine]
        );
    }

    #[test]
    fn skybox_is_last_draw_of_main_pass() {
        for scene in SceneKind::ALL {
            let plan = plan(scene, 1);
            let main = plan.pass(PassKind::MainScene).unwrap();
            let last = main.draws.last().unwrap();
            assert_eq!(last.mesh, MeshId::Skybox, "{scene}");
            assert_eq!(last.depth_func, DepthFunc::LessEqual);
            assert!(main.draws[..main.draws.len() - 1]
                .iter()
                .all(|d| d.depth_func == DepthFunc::Less));
        }
    }

    #[test]
    fn skybox_view_has_no_translation() {
        let plan = plan(SceneKind::Pool, 1);
        let sky = plan.pass(PassKind::MainScene).unwrap().draws.last().unwrap();
        let Some(UniformValue::Mat4(view)) = sky.get("view") else {
            panic!("skybox draw has no view matrix");
        };
        assert_eq!(view.w_axis, glam::Vec4::W);
    }

    #[test]
    fn pool_draws_flip_winding() {
        let plan = plan(SceneKind::Pool, 1);
        let pool_draws: Vec<_> = plan
            .passes
            .iter()
            .flat_map(|p| &p.draws)
            .filter(|d| d.mesh == MeshId::Pool)
            .collect();
        assert_eq!(pool_draws.len(), 2, "pool drawn in capture and main pass");
        assert!(pool_draws.iter().all(|d| d.winding == Winding::Clockwise));
        let others = plan.passes.iter().flat_map(|p| &p.draws).filter(|d| d.mesh != MeshId::Pool);
        assert!(others.into_iter().all(|d| d.winding == Winding::CounterClockwise));
    }

    #[test]
    fn refraction_capture_clips_above_water() {
        let plan = PassSequencer::new(SceneKind::Pool, 1, 0.3).plan(&inputs(0.0, 1));
        let capture = plan.pass(PassKind::RefractionCapture).unwrap();
        assert_eq!(capture.draws[0].clip_plane, Some(Vec4::new(0.0, -1.0, 0.0, 0.3)));
        let main = plan.pass(PassKind::MainScene).unwrap();
        let pool = main.draws.iter().find(|d| d.mesh == MeshId::Pool).unwrap();
        assert_eq!(pool.clip_plane, Some(Vec4::ZERO));
    }

    #[test]
    fn water_is_drawn_before_pool() {
        let plan = plan(SceneKind::Pool, 1);
        let meshes: Vec<_> = plan.pass(PassKind::MainScene).unwrap().draws.iter().map(|d| d.mesh).collect();
        assert_eq!(meshes, vec![MeshId::Water, MeshId::Pool, MeshId::Skybox]);
    }

    #[test]
    fn gallery_main_pass_draws_five_objects_and_skybox() {
        let plan = plan(SceneKind::Gallery, 1);
        let main = plan.pass(PassKind::MainScene).unwrap();
        assert_eq!(main.draws.len(), 6);
        assert!(main.draws.iter().all(|d| d.clip_plane.is_none()));
    }

    #[test]
    fn combine_reads_final_blur_buffer() {
        for (n, expected) in [(1, TextureSlot::BlurPing), (10, TextureSlot::BlurPong)] {
            let plan = plan(SceneKind::Pool, n);
            let combine = plan.pass(PassKind::Combine).unwrap();
            assert_eq!(
                combine.draws[0].get("blurred"),
                Some(&UniformValue::Sampler(expected)),
                "blur passes = {n}"
            );
            let last_blur = plan.passes.iter().rev().find(|p| p.kind == PassKind::Blur).unwrap();
            assert_eq!(last_blur.target.attachments(), &[expected]);
        }
    }

    #[test]
    fn combine_forwards_selection_and_focus() {
        let seq = PassSequencer::new(SceneKind::Gallery, 2, 0.2);
        for sel in 1..=4u8 {
            let plan = seq.plan(&inputs(1.0, sel));
            let draw = &plan.pass(PassKind::Combine).unwrap().draws[0];
            assert_eq!(draw.get("selection"), Some(&UniformValue::I32(i32::from(sel))));
            let Some(UniformValue::F32(focus)) = draw.get("focus") else {
                panic!("combine has no focus");
            };
            assert!((focus - ((0.75f32).sin() + 0.5)).abs() < 1e-6);
        }
    }

    #[test]
    fn every_pass_binds_every_texture_it_samples() {
        for scene in SceneKind::ALL {
            for pass in plan(scene, 4).passes {
                for slot in pass.draws.iter().flat_map(DrawCommand::sampled_slots) {
                    assert!(
                        pass.bindings.contains(&slot),
                        "{} samples {slot} without binding it",
                        pass.kind
                    );
                }
            }
        }
    }

    #[test]
    fn no_pass_samples_its_own_target() {
        for scene in SceneKind::ALL {
            for pass in plan(scene, 5).passes {
                for slot in &pass.bindings {
                    assert!(
                        !pass.target.attachments().contains(slot),
                        "{} samples {slot} while rendering into it",
                        pass.kind
                    );
                }
            }
        }
    }

    #[test]
    fn only_scene_passes_depth_test() {
        for pass in plan(SceneKind::Pool, 3).passes {
            let expected = matches!(pass.kind, PassKind::RefractionCapture | PassKind::MainScene);
            assert_eq!(pass.depth_test, expected, "{}", pass.kind);
        }
    }

    #[test]
    fn water_receives_elapsed_time() {
        let plan = PassSequencer::new(SceneKind::Pool, 1, 0.2).plan(&inputs(4.5, 1));
        let water = &plan.pass(PassKind::MainScene).unwrap().draws[0];
        assert_eq!(water.get("time"), Some(&UniformValue::F32(4.5)));
    }

    #[test]
    fn uniforms_are_declared_by_their_program() {
        for scene in SceneKind::ALL {
            for pass in plan(scene, 2).passes {
                for draw in &pass.draws {
                    for (name, _) in &draw.uniforms {
                        assert!(
                            draw.program.uniforms().contains(name),
                            "{} does not declare {name}",
                            draw.program
                        );
                    }
                }
            }
        }
    }
}
