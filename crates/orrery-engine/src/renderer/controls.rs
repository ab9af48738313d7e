use std::f32::consts::TAU;

use glam::Vec3;

use crate::config::manifest::{CameraDescriptor, InteractionDescriptor};
use crate::renderer::camera::Camera3D;

/// User-driven orbit camera: drag to orbit, wheel to zoom, optional slow
/// auto-rotation around the look target.
///
/// Holds spherical coordinates around `target` and writes them back into a
/// `Camera3D` with `apply`. While a focus transition owns the camera the
/// scheduler stops calling `update`/`apply`, then re-reads the final pose
/// with `sync_from`.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    /// Rotation around Y (radians).
    pub azimuth: f32,
    /// Angle above the XZ plane (radians), clamped short of the poles.
    pub elevation: f32,
    pub distance: f32,
    pub auto_rotate: bool,
    /// 1.0 is one full turn per minute.
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Distance factor per wheel tick.
    pub zoom_step: f32,
    changed: bool,
}

impl OrbitControls {
    const ORBIT_SENSITIVITY: f32 = 0.008;
    const MAX_ELEVATION: f32 = 1.5; // ~86 degrees

    pub fn new(camera: &Camera3D, desc: &CameraDescriptor, interaction: &InteractionDescriptor) -> Self {
        let min_distance = desc.min_distance.max(1e-3);
        let mut controls = Self {
            target: camera.look_at,
            azimuth: 0.0,
            elevation: 0.0,
            distance: 1.0,
            auto_rotate: desc.auto_rotate,
            auto_rotate_speed: desc.auto_rotate_speed,
            min_distance,
            max_distance: desc.max_distance.max(min_distance),
            zoom_step: if interaction.zoom_step > 1.0 { interaction.zoom_step } else { 1.05 },
            changed: false,
        };
        controls.sync_from(camera);
        controls
    }

    /// Re-read spherical coordinates from the camera's current pose.
    pub fn sync_from(&mut self, camera: &Camera3D) {
        self.target = camera.look_at;
        let offset = camera.position - camera.look_at;
        let distance = offset.length();
        if distance > 1e-6 {
            self.distance = distance;
            self.elevation = (offset.y / distance)
                .clamp(-1.0, 1.0)
                .asin()
                .clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
            self.azimuth = offset.x.atan2(offset.z);
        }
        self.changed = false;
    }

    /// True if the pose moved since the last call. The scheduler only
    /// rewrites the camera when this is set, so a resting camera stays
    /// bit-for-bit where a focus transition left it.
    pub fn take_changed(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Orbit by a pointer drag in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * Self::ORBIT_SENSITIVITY;
        self.elevation += dy * Self::ORBIT_SENSITIVITY;
        self.elevation = self.elevation.clamp(-Self::MAX_ELEVATION, Self::MAX_ELEVATION);
        self.changed = true;
    }

    /// Zoom by a wheel delta: positive moves away, negative moves closer.
    pub fn zoom(&mut self, delta: f32) {
        if delta > 0.0 {
            self.distance *= self.zoom_step;
        } else if delta < 0.0 {
            self.distance /= self.zoom_step;
        }
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
        self.changed = true;
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    /// Advance auto-rotation by `real_dt` seconds.
    pub fn update(&mut self, real_dt: f32) {
        if self.auto_rotate && real_dt.is_finite() && real_dt > 0.0 {
            self.azimuth = (self.azimuth + TAU / 60.0 * self.auto_rotate_speed * real_dt).rem_euclid(TAU);
            self.changed = true;
        }
    }

    /// Eye position for the current spherical coordinates.
    pub fn position(&self) -> Vec3 {
        let (sin_el, cos_el) = self.elevation.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target + Vec3::new(cos_el * sin_az, sin_el, cos_el * cos_az) * self.distance
    }

    pub fn apply(&self, camera: &mut Camera3D) {
        camera.set_pose(self.position(), self.target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::Viewport;

    fn controls_at(position: Vec3) -> (OrbitControls, Camera3D) {
        let camera = Camera3D::new(position, Vec3::ZERO, Viewport::new(800.0, 600.0));
        let controls = OrbitControls::new(&camera, &CameraDescriptor::default(), &InteractionDescriptor::default());
        (controls, camera)
    }

    #[test]
    fn sync_then_apply_keeps_the_pose() {
        let (controls, mut camera) = controls_at(Vec3::new(3.0, 4.0, 12.0));
        let before = camera.position;
        controls.apply(&mut camera);
        assert!((camera.position - before).length() < 1e-4, "{:?}", camera.position);
    }

    #[test]
    fn zoom_is_clamped() {
        let (mut controls, _) = controls_at(Vec3::new(0.0, 0.0, 10.0));
        controls.zoom(1.0);
        assert!((controls.distance - 10.5).abs() < 1e-4);
        for _ in 0..1000 {
            controls.zoom(-1.0);
        }
        assert_eq!(controls.distance, controls.min_distance);
    }

    #[test]
    fn auto_rotate_turns_once_per_minute_at_speed_one() {
        let (mut controls, _) = controls_at(Vec3::new(0.0, 0.0, 10.0));
        controls.auto_rotate = true;
        controls.auto_rotate_speed = 1.0;
        controls.update(15.0);
        assert!((controls.azimuth - TAU / 4.0).abs() < 1e-4);
        controls.toggle_auto_rotate();
        controls.update(15.0);
        assert!((controls.azimuth - TAU / 4.0).abs() < 1e-4);
    }

    #[test]
    fn resting_controls_report_no_change() {
        let (mut controls, camera) = controls_at(Vec3::new(0.0, 3.0, 10.0));
        controls.auto_rotate = false;
        controls.update(1.0);
        assert!(!controls.take_changed());
        controls.zoom(-1.0);
        assert!(controls.take_changed());
        assert!(!controls.take_changed());
        controls.orbit(4.0, 0.0);
        controls.sync_from(&camera);
        assert!(!controls.take_changed());
    }

    #[test]
    fn orbit_elevation_stays_off_the_poles() {
        let (mut controls, _) = controls_at(Vec3::new(0.0, 0.0, 10.0));
        controls.orbit(0.0, 10_000.0);
        assert_eq!(controls.elevation, OrbitControls::MAX_ELEVATION);
        assert!(controls.position().is_finite());
    }
}
