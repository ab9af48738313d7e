use glam::{Mat4, Vec3};

use crate::config::manifest::CameraDescriptor;

/// Size of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite in either dimension.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    /// Width over height, 1.0 for a degenerate viewport.
    pub fn aspect(&self) -> f32 {
        if self.is_degenerate() {
            1.0
        } else {
            self.width / self.height
        }
    }
}

/// Perspective camera for the 3D scene.
/// Right-handed, Y-up, OpenGL clip depth (matches the WebGL host).
#[derive(Debug, Clone)]
pub struct Camera3D {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub look_at: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: Viewport,
}

impl Camera3D {
    pub fn new(position: Vec3, look_at: Vec3, viewport: Viewport) -> Self {
        Self {
            position,
            look_at,
            fov_y: 75f32.to_radians(),
            near: 0.1,
            far: 2000.0,
            viewport,
        }
    }

    pub fn from_descriptor(desc: &CameraDescriptor, viewport: Viewport) -> Self {
        let mut camera = Self::new(Vec3::from(desc.position), Vec3::from(desc.look_at), viewport);
        camera.fov_y = desc.fov_y_degrees.to_radians();
        camera.near = desc.near;
        camera.far = desc.far;
        camera
    }

    /// Move the eye and look target together.
    pub fn set_pose(&mut self, position: Vec3, look_at: Vec3) {
        self.position = position;
        self.look_at = look_at;
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.viewport.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
