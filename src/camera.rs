use glam::{Mat4, Vec3};

pub const DEFAULT_MOVEMENT_SPEED: f32 = 2.5;
pub const DEFAULT_MOUSE_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_ZOOM: f32 = 45.0;

const PITCH_LIMIT: f32 = 89.0;
const ZOOM_MIN: f32 = 1.0;
const ZOOM_MAX: f32 = 45.0;
const WORLD_UP: Vec3 = Vec3::Y;

/// Discrete movement commands issued by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Free-flying camera.
///
/// Orientation is yaw/pitch in degrees; the orthonormal basis is re-derived
/// on every orientation change so `view_matrix` is always built from fresh
/// vectors. Zoom is the projection field of view in degrees, an optical
/// zoom rather than a dolly.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        let mut camera = Self {
            position,
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            mouse_sensitivity: DEFAULT_MOUSE_SENSITIVITY,
            yaw: DEFAULT_YAW,
            pitch: 0.0,
            zoom: DEFAULT_ZOOM,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: WORLD_UP,
        };
        camera.update_basis();
        camera
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Field of view in degrees.
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Move along the forward/right basis. No bounds: the camera may fly
    /// arbitrarily far from the scene.
    pub fn process_movement(&mut self, direction: MoveDirection, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            MoveDirection::Forward => self.position += self.forward * velocity,
            MoveDirection::Backward => self.position -= self.forward * velocity,
            MoveDirection::Left => self.position -= self.right * velocity,
            MoveDirection::Right => self.position += self.right * velocity,
        }
    }

    /// Apply a pointer delta in pixels. Yaw is unbounded and wraps
    /// naturally; pitch is clamped short of the poles to avoid flipping.
    pub fn process_mouse_delta(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch += dy * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_basis();
    }

    /// Apply a scroll step to the field of view.
    pub fn process_scroll(&mut self, dy: f32) {
        self.zoom = (self.zoom - dy).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Look-at view transform from current state. Pure; repeated calls in
    /// the same frame return identical matrices.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }

    /// Perspective projection from the current field of view.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, 0.1, 100.0)
    }

    fn update_basis(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();

        self.forward = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.right = self.forward.cross(WORLD_UP).normalize();
        self.up = self.right.cross(self.forward).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}
