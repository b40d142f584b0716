//! Mouse-look orbit camera.
//!
//! [`CameraState`] is owned and mutated by the input adapter; the render
//! pipeline only ever sees an immutable [`CameraSnapshot`] taken once per
//! frame.

use glam::{Mat3, Mat4, Vec3};

/// Pitch is clamped to this many degrees either side of the horizon so the
/// view never flips over the pole.
pub const PITCH_LIMIT_DEGREES: f32 = 89.0;

/// Initial yaw: looking down -Z.
const INITIAL_YAW_DEGREES: f32 = -90.0;

/// Unit view direction for the given yaw and pitch (degrees).
pub fn front_from_angles(yaw_degrees: f32, pitch_degrees: f32) -> Vec3 {
    let (yaw, pitch) = (yaw_degrees.to_radians(), pitch_degrees.to_radians());
    Vec3::new(
        pitch.cos() * yaw.cos(),
        pitch.sin(),
        pitch.cos() * yaw.sin(),
    )
    .normalize()
}

/// Mutable camera pose driven by mouse motion.
///
/// The camera orbits the origin: it always sits `orbit_radius` behind its own
/// view direction, so looking around swings it around the scene.
#[derive(Debug, Clone)]
pub struct CameraState {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    yaw: f32,
    pitch: f32,
    sensitivity: f32,
    orbit_radius: f32,
    last_cursor: Option<(f64, f64)>,
}

impl CameraState {
    /// Creates a camera looking down -Z from `orbit_radius` units away.
    pub fn new(sensitivity: f32, orbit_radius: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            yaw: INITIAL_YAW_DEGREES,
            pitch: 0.0,
            sensitivity,
            orbit_radius,
            last_cursor: None,
        };
        camera.update_pose();
        camera
    }

    /// Feeds an absolute cursor position in window coordinates.
    ///
    /// The first call only records the position, so the camera does not jump
    /// when the window first gains the cursor. Screen y grows downward, so a
    /// cursor moving up pitches the view up.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let Some((last_x, last_y)) = self.last_cursor.replace((x, y)) else {
            return;
        };
        let dx = (x - last_x) as f32 * self.sensitivity;
        let dy = (last_y - y) as f32 * self.sensitivity;
        self.rotate(dx, dy);
    }

    /// Adds the given yaw and pitch deltas (degrees), clamping pitch.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES);
        self.update_pose();
    }

    fn update_pose(&mut self) {
        self.front = front_from_angles(self.yaw, self.pitch);
        self.position = -self.front * self.orbit_radius;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Copies the current pose for one frame of rendering.
    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            position: self.position,
            front: self.front,
            up: self.up,
        }
    }
}

/// Immutable camera pose for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
}

impl CameraSnapshot {
    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// View transform with the translation stripped, for drawing the skybox
    /// around the eye.
    pub fn skybox_view_matrix(&self) -> Mat4 {
        Mat4::from_mat3(Mat3::from_mat4(self.view_matrix()))
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    /// OpenGL clip-space projection matrix for the given aspect ratio.
    pub fn matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }
}
