//! Scene contents: which meshes exist, which programs draw them, and where
//! the objects sit.
//!
//! Both scenes share one pipeline. [`SceneKind`] decides what the main pass
//! draws and whether the refraction capture runs at all.

use std::fmt;

use glam::{Mat4, Vec3};

use crate::config::SceneKind;
use crate::error::MeshError;
use crate::mesh::{
    generate_cube, generate_plane, generate_sphere, skybox_cube, Mesh, PositionVertex,
    TexturedVertex, Vertex,
};

/// Tessellation of the water surface.
pub const WATER_RESOLUTION: u32 = 100;
/// Edge length of the water surface.
pub const WATER_EXTENT: f32 = 0.5;
/// Edge length of the pool box.
pub const POOL_SIZE: f32 = 0.5;
/// Radius of the gallery spheres before scaling.
pub const GALLERY_OBJECT_SIZE: f32 = 0.1125;
/// Tessellation of gallery spheres and cubes.
pub const GALLERY_RESOLUTION: u32 = 50;
/// Distance of the satellite objects from the origin.
const SATELLITE_OFFSET: f32 = 0.2;
const SATELLITE_SCALE: f32 = 0.5;

/// Clear color of the pool scene's offscreen passes.
pub const POOL_CLEAR_COLOR: [f32; 4] = [0.1, 0.3, 0.5, 1.0];
/// Clear color of the gallery scene.
pub const GALLERY_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Identifies an uploaded mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshId {
    Water,
    Pool,
    Sphere,
    Cube,
    Skybox,
    /// Generated in the vertex shader from `gl_VertexID`; has no buffer.
    FullscreenQuad,
}

impl MeshId {
    pub fn name(self) -> &'static str {
        match self {
            MeshId::Water => "water",
            MeshId::Pool => "pool",
            MeshId::Sphere => "sphere",
            MeshId::Cube => "cube",
            MeshId::Skybox => "skybox",
            MeshId::FullscreenQuad => "fullscreen-quad",
        }
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifies a linked shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramId {
    Skybox,
    /// Mirror-like environment reflection.
    Reflect,
    /// Glass-like environment refraction.
    Refract,
    /// Animated water with reflection, refraction and distortion.
    Water,
    /// Textured pool interior, clipped by a plane.
    Pool,
    Blur,
    Combine,
}

impl ProgramId {
    pub fn name(self) -> &'static str {
        match self {
            ProgramId::Skybox => "skybox",
            ProgramId::Reflect => "reflect",
            ProgramId::Refract => "refract",
            ProgramId::Water => "water",
            ProgramId::Pool => "pool",
            ProgramId::Blur => "blur",
            ProgramId::Combine => "combine",
        }
    }

    /// Vertex shader file under `shaders/`, or `None` for the built-in
    /// full-screen quad stage.
    pub fn vertex_file(self) -> Option<String> {
        match self {
            ProgramId::Blur | ProgramId::Combine => None,
            other => Some(format!("{}.vert", other.name())),
        }
    }

    /// Fragment shader file under `shaders/`.
    pub fn fragment_file(self) -> String {
        format!("{}.frag", self.name())
    }

    /// Every uniform the program is expected to declare.
    pub fn uniforms(self) -> &'static [&'static str] {
        match self {
            ProgramId::Skybox => &["view", "projection", "skybox"],
            ProgramId::Reflect | ProgramId::Refract => {
                &["model", "view", "projection", "eye_pos", "skybox"]
            }
            ProgramId::Water => &[
                "model",
                "view",
                "projection",
                "eye_pos",
                "time",
                "skybox",
                "dudv",
                "refraction",
            ],
            ProgramId::Pool => &[
                "model",
                "view",
                "projection",
                "clipping_plane",
                "pool_texture",
            ],
            ProgramId::Blur => &["source", "direction"],
            ProgramId::Combine => &["pristine", "blurred", "depth", "focus", "selection"],
        }
    }

    /// Programs a scene needs, in build order.
    pub fn for_scene(scene: SceneKind) -> &'static [ProgramId] {
        match scene {
            SceneKind::Gallery => &[
                ProgramId::Skybox,
                ProgramId::Reflect,
                ProgramId::Refract,
                ProgramId::Blur,
                ProgramId::Combine,
            ],
            SceneKind::Pool => &[
                ProgramId::Skybox,
                ProgramId::Water,
                ProgramId::Pool,
                ProgramId::Blur,
                ProgramId::Combine,
            ],
        }
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One object drawn by the gallery's main pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub mesh: MeshId,
    pub program: ProgramId,
    pub model: Mat4,
}

/// A reflective sphere at the origin ringed by four smaller objects:
/// refractive spheres above and below, reflective cubes left and right.
pub fn gallery_objects() -> [SceneObject; 5] {
    let satellite = |mesh, program, offset: Vec3| SceneObject {
        mesh,
        program,
        model: Mat4::from_translation(offset) * Mat4::from_scale(Vec3::splat(SATELLITE_SCALE)),
    };
    [
        SceneObject {
            mesh: MeshId::Sphere,
            program: ProgramId::Reflect,
            model: Mat4::IDENTITY,
        },
        satellite(MeshId::Sphere, ProgramId::Refract, Vec3::Y * SATELLITE_OFFSET),
        satellite(MeshId::Sphere, ProgramId::Refract, Vec3::NEG_Y * SATELLITE_OFFSET),
        satellite(MeshId::Cube, ProgramId::Reflect, Vec3::NEG_X * SATELLITE_OFFSET),
        satellite(MeshId::Cube, ProgramId::Reflect, Vec3::X * SATELLITE_OFFSET),
    ]
}

/// CPU-side mesh in one of the supported vertex formats.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneMesh {
    Plain(Mesh<Vertex>),
    Textured(Mesh<TexturedVertex>),
    Position(Mesh<PositionVertex>),
}

impl SceneMesh {
    pub fn len(&self) -> usize {
        match self {
            SceneMesh::Plain(m) => m.len(),
            SceneMesh::Textured(m) => m.len(),
            SceneMesh::Position(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Every mesh a scene draws, generated once at setup.
#[derive(Debug, Clone)]
pub struct SceneGeometry {
    meshes: Vec<(MeshId, SceneMesh)>,
}

impl SceneGeometry {
    /// Generates the meshes for `scene`. The water surface sits at
    /// `water_height`.
    pub fn generate(scene: SceneKind, water_height: f32) -> Result<Self, MeshError> {
        let mut meshes = Vec::new();
        match scene {
            SceneKind::Gallery => {
                meshes.push((
                    MeshId::Sphere,
                    SceneMesh::Plain(generate_sphere(
                        GALLERY_OBJECT_SIZE,
                        GALLERY_RESOLUTION,
                        Vec3::ZERO,
                    )?),
                ));
                meshes.push((
                    MeshId::Cube,
                    SceneMesh::Plain(generate_cube(
                        GALLERY_OBJECT_SIZE,
                        GALLERY_RESOLUTION,
                        Vec3::ZERO,
                    )?),
                ));
            }
            SceneKind::Pool => {
                let half = WATER_EXTENT / 2.0;
                meshes.push((
                    MeshId::Water,
                    SceneMesh::Textured(generate_plane(
                        Vec3::new(0.0, 0.0, WATER_EXTENT),
                        Vec3::new(WATER_EXTENT, 0.0, 0.0),
                        Vec3::new(-half, water_height, -half),
                        WATER_RESOLUTION,
                    )?),
                ));
                meshes.push((
                    MeshId::Pool,
                    SceneMesh::Textured(generate_cube(POOL_SIZE, 1, Vec3::ZERO)?),
                ));
            }
        }
        meshes.push((MeshId::Skybox, SceneMesh::Position(skybox_cube())));
        Ok(Self { meshes })
    }

    pub fn meshes(&self) -> &[(MeshId, SceneMesh)] {
        &self.meshes
    }

    pub fn into_meshes(self) -> Vec<(MeshId, SceneMesh)> {
        self.meshes
    }

    /// Vertex count per mesh, in generation order.
    pub fn vertex_counts(&self) -> Vec<(MeshId, usize)> {
        self.meshes.iter().map(|(id, m)| (*id, m.len())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{cube_vertex_count, plane_vertex_count, MeshVertex};

    #[test]
    fn pool_geometry_has_water_pool_and_skybox() {
        let geo = SceneGeometry::generate(SceneKind::Pool, 0.2).unwrap();
        let counts = geo.vertex_counts();
        assert_eq!(
            counts,
            vec![
                (MeshId::Water, plane_vertex_count(WATER_RESOLUTION)),
                (MeshId::Pool, cube_vertex_count(1)),
                (MeshId::Skybox, 36),
            ]
        );
    }

    #[test]
    fn gallery_geometry_has_sphere_cube_and_skybox() {
        let geo = SceneGeometry::generate(SceneKind::Gallery, 0.2).unwrap();
        let ids: Vec<_> = geo.meshes().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![MeshId::Sphere, MeshId::Cube, MeshId::Skybox]);
        assert!(geo.meshes().iter().all(|(_, m)| !m.is_empty()));
    }

    #[test]
    fn water_surface_sits_at_water_height() {
        let geo = SceneGeometry::generate(SceneKind::Pool, 0.15).unwrap();
        let (_, water) = &geo.meshes()[0];
        let SceneMesh::Textured(mesh) = water else {
            panic!("water should be textured");
        };
        for v in mesh.vertices() {
            assert!((v.position().y - 0.15).abs() < 1e-6);
            assert!(v.normal().y > 0.99, "water should face up");
        }
    }

    #[test]
    fn gallery_layout_matches_scene() {
        let objects = gallery_objects();
        assert_eq!(objects[0].program, ProgramId::Reflect);
        assert_eq!(objects[0].model, Mat4::IDENTITY);
        for obj in &objects[1..] {
            let center = obj.model.transform_point3(Vec3::ZERO);
            assert!((center.length() - SATELLITE_OFFSET).abs() < 1e-6);
        }
        let cubes = objects.iter().filter(|o| o.mesh == MeshId::Cube).count();
        assert_eq!(cubes, 2);
    }

    #[test]
    fn gallery_spheres_refract_and_cubes_reflect() {
        for obj in &gallery_objects()[1..] {
            let expected = match obj.mesh {
                MeshId::Sphere => ProgramId::Refract,
                _ => ProgramId::Reflect,
            };
            assert_eq!(obj.program, expected, "{:?}", obj.mesh);
        }
    }

    #[test]
    fn blur_and_combine_use_builtin_vertex_stage() {
        assert_eq!(ProgramId::Blur.vertex_file(), None);
        assert_eq!(ProgramId::Combine.vertex_file(), None);
        assert_eq!(ProgramId::Water.vertex_file().as_deref(), Some("water.vert"));
        assert_eq!(ProgramId::Combine.fragment_file(), "combine.frag");
    }

    #[test]
    fn every_scene_builds_blur_and_combine() {
        for scene in SceneKind::ALL {
            let programs = ProgramId::for_scene(scene);
            assert!(programs.contains(&ProgramId::Blur));
            assert!(programs.contains(&ProgramId::Combine));
            assert!(programs.contains(&ProgramId::Skybox));
        }
    }
}
