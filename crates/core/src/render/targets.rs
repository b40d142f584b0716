//! The set of off-screen targets a frame renders through.

use super::target::{RenderTarget, TargetSpec};
use super::RenderError;
use crate::pipeline::{TargetId, TextureSlot};

/// Scene, blur and (for the pool scene) refraction targets, all at the
/// window size.
pub struct RenderTargets {
    scene: RenderTarget,
    blur: [RenderTarget; 2],
    refraction: Option<RenderTarget>,
}

impl RenderTargets {
    /// Builds every target. Any failure releases the targets already made.
    pub fn new(
        gl: &glow::Context,
        width: u32,
        height: u32,
        with_refraction: bool,
    ) -> Result<Self, RenderError> {
        let specs = specs(width, height, with_refraction);
        let mut made = Vec::with_capacity(specs.len());
        for spec in &specs {
            match RenderTarget::new(gl, spec) {
                Ok(target) => made.push(target),
                Err(e) => {
                    for target in &made {
                        target.destroy(gl);
                    }
                    return Err(e);
                }
            }
        }

        let mut made = made.into_iter();
        let (Some(scene), Some(ping), Some(pong)) = (made.next(), made.next(), made.next()) else {
            return Err(RenderError::MissingResource {
                kind: "target",
                name: "scene/blur".to_string(),
            });
        };
        Ok(Self {
            scene,
            blur: [ping, pong],
            refraction: made.next(),
        })
    }

    /// The target a pass renders into, or `None` for the screen.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingResource`] for an off-screen id this
    /// set does not hold.
    pub fn target(&self, id: TargetId) -> Result<Option<&RenderTarget>, RenderError> {
        resolve(id, &self.scene, &self.blur, self.refraction.as_ref())
    }

    /// The attachment texture behind a slot, if a target owns it.
    pub fn texture(&self, slot: TextureSlot) -> Option<glow::Texture> {
        match slot {
            TextureSlot::SceneColor => Some(self.scene.color()),
            TextureSlot::SceneDepth => self.scene.depth(),
            TextureSlot::BlurPing => Some(self.blur[0].color()),
            TextureSlot::BlurPong => Some(self.blur[1].color()),
            TextureSlot::Refraction => self.refraction.as_ref().map(RenderTarget::color),
            TextureSlot::Cubemap | TextureSlot::Distortion | TextureSlot::PoolSurface => None,
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        self.scene.destroy(gl);
        for target in &self.blur {
            target.destroy(gl);
        }
        if let Some(target) = &self.refraction {
            target.destroy(gl);
        }
    }
}

/// Picks the target for `id` out of a target set; `Screen` is `None`.
fn resolve<'a, T>(
    id: TargetId,
    scene: &'a T,
    blur: &'a [T; 2],
    refraction: Option<&'a T>,
) -> Result<Option<&'a T>, RenderError> {
    let found = match id {
        TargetId::Screen => return Ok(None),
        TargetId::Scene => Some(scene),
        TargetId::Blur(i) => blur.get(i),
        TargetId::Refraction => refraction,
    };
    found.map(Some).ok_or_else(|| RenderError::MissingResource {
        kind: "target",
        name: id.to_string(),
    })
}

/// Specs in construction order: scene, blur ping, blur pong, refraction.
pub fn specs(width: u32, height: u32, with_refraction: bool) -> Vec<TargetSpec> {
    let mut specs = vec![
        TargetSpec::color_depth("scene", width, height),
        TargetSpec::color("blur-ping", width, height),
        TargetSpec::color("blur-pong", width, height),
    ];
    if with_refraction {
        specs.push(TargetSpec::color_depth("refraction", width, height));
    }
    specs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specs_include_refraction_only_when_asked() {
        assert_eq!(specs(8, 8, false).len(), 3);
        let with = specs(8, 8, true);
        assert_eq!(with.len(), 4);
        assert_eq!(with[3].name, "refraction");
        assert!(with[3].depth);
    }

    #[test]
    fn only_scene_and_refraction_have_depth() {
        for spec in specs(8, 8, true) {
            let expect_depth = matches!(spec.name, "scene" | "refraction");
            assert_eq!(spec.depth, expect_depth, "{}", spec.name);
        }
    }

    #[test]
    fn screen_resolves_to_default_framebuffer() {
        let r = resolve(TargetId::Screen, &0, &[1, 2], Some(&3));
        assert!(matches!(r, Ok(None)));
    }

    #[test]
    fn offscreen_ids_resolve_to_their_target() {
        let blur = [1, 2];
        assert_eq!(resolve(TargetId::Scene, &0, &blur, Some(&3)).unwrap(), Some(&0));
        assert_eq!(resolve(TargetId::Blur(0), &0, &blur, Some(&3)).unwrap(), Some(&1));
        assert_eq!(resolve(TargetId::Blur(1), &0, &blur, Some(&3)).unwrap(), Some(&2));
        assert_eq!(resolve(TargetId::Refraction, &0, &blur, Some(&3)).unwrap(), Some(&3));
    }

    #[test]
    fn missing_targets_are_errors_not_the_screen() {
        let blur = [1, 2];
        for id in [TargetId::Refraction, TargetId::Blur(2)] {
            match resolve(id, &0, &blur, None) {
                Err(RenderError::MissingResource { kind, name }) => {
                    assert_eq!(kind, "target");
                    assert_eq!(name, id.to_string());
                }
                other => panic!("{id}: expected MissingResource, got {other:?}"),
            }
        }
    }

    #[test]
    fn specs_use_window_size() {
        assert!(specs(640, 480, true)
            .iter()
            .all(|s| s.width == 640 && s.height == 480));
    }

    #[test]
    #[ignore = "requires GL context"]
    fn texture_lookup_covers_target_slots() {
        // Would test: every slot in TargetId::attachments() resolves to Some.
    }
}
