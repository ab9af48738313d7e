// extensions/focus.rs
//
// Camera focus transitions: move the camera to a fixed offset from a
// selected body over a fixed real-time duration.
//
// Usage:
//   let mut focus = FocusAnimator::from_descriptor(&manifest.camera);
//   focus.begin_focus(&camera, body_position, clock.real_time());
//   focus.advance(&mut camera, clock.real_time());  // every frame

use glam::Vec3;

use super::easing::{ease_vec3, Easing};
use crate::config::manifest::CameraDescriptor;
use crate::renderer::camera::Camera3D;

/// One camera move. Times are real seconds, independent of the
/// simulation speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransition {
    pub start_position: Vec3,
    pub target_position: Vec3,
    pub start_look: Vec3,
    pub target_look: Vec3,
    pub start_time: f64,
    /// Always > 0.
    pub duration: f64,
    pub easing: Easing,
}

impl CameraTransition {
    /// `min(1, elapsed / duration)`, never negative.
    pub fn progress(&self, now: f64) -> f64 {
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    /// Compares against the deadline directly; `progress` can round to
    /// just under 1 at exactly `start_time + duration`.
    pub fn is_finished(&self, now: f64) -> bool {
        now >= self.start_time + self.duration
    }

    /// Camera position and look target at `now`.
    /// At completion these are exactly the targets, not an interpolation.
    pub fn sample(&self, now: f64) -> (Vec3, Vec3) {
        if self.is_finished(now) {
            return (self.target_position, self.target_look);
        }
        let t = self.progress(now);
        let t = t as f32;
        (
            ease_vec3(self.start_position, self.target_position, t, self.easing),
            ease_vec3(self.start_look, self.target_look, t, self.easing),
        )
    }
}

/// Outcome of advancing the animator for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusStep {
    /// No transition; user controls own the camera.
    Idle,
    /// The transition wrote the camera this frame and is still running.
    Moving,
    /// The transition wrote its final pose this frame and ended.
    Finished,
}

/// Runs at most one camera transition at a time.
#[derive(Debug, Clone)]
pub struct FocusAnimator {
    /// Camera position relative to the focused body.
    pub offset: Vec3,
    pub duration: f64,
    pub easing: Easing,
    active: Option<CameraTransition>,
}

impl FocusAnimator {
    pub const DEFAULT_DURATION: f64 = 1.0;

    pub fn new(offset: Vec3, duration: f64, easing: Easing) -> Self {
        let duration = if duration.is_finite() && duration > 0.0 {
            duration
        } else {
            log::warn!("invalid focus duration {duration}, using {}", Self::DEFAULT_DURATION);
            Self::DEFAULT_DURATION
        };
        Self {
            offset,
            duration,
            easing,
            active: None,
        }
    }

    pub fn from_descriptor(desc: &CameraDescriptor) -> Self {
        Self::new(Vec3::from(desc.focus_offset), desc.focus_duration, desc.focus_easing)
    }

    /// Start moving towards `body_position + offset`, looking at the body.
    ///
    /// Replaces any running transition. The new one starts from the camera's
    /// current pose, which is the old transition's last interpolated pose.
    pub fn begin_focus(&mut self, camera: &Camera3D, body_position: Vec3, now: f64) -> CameraTransition {
        let transition = CameraTransition {
            start_position: camera.position,
            target_position: body_position + self.offset,
            start_look: camera.look_at,
            target_look: body_position,
            start_time: now,
            duration: self.duration,
            easing: self.easing,
        };
        if self.active.is_some() {
            log::debug!("focus transition replaced");
        }
        self.active = Some(transition);
        transition
    }

    /// Write the camera for this frame, if a transition is running.
    pub fn advance(&mut self, camera: &mut Camera3D, now: f64) -> FocusStep {
        let Some(transition) = self.active else {
            return FocusStep::Idle;
        };
        let (position, look) = transition.sample(now);
        camera.set_pose(position, look);
        if transition.is_finished(now) {
            self.active = None;
            FocusStep::Finished
        } else {
            FocusStep::Moving
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&CameraTransition> {
        self.active.as_ref()
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::Viewport;

    fn camera() -> Camera3D {
        Camera3D::new(Vec3::new(0.0, 40.0, 90.0), Vec3::ZERO, Viewport::new(800.0, 600.0))
    }

    fn animator() -> FocusAnimator {
        FocusAnimator::new(Vec3::new(0.0, 2.0, 5.0), 1.0, Easing::Linear)
    }

    #[test]
    fn converges_exactly_and_stays() {
        let mut cam = camera();
        let mut focus = animator();
        let body = Vec3::new(50.0, 0.0, 0.0);
        focus.begin_focus(&cam, body, 10.0);

        let mut now = 10.0;
        let mut step = FocusStep::Moving;
        while step == FocusStep::Moving {
            now += 1.0 / 60.0;
            step = focus.advance(&mut cam, now);
        }
        assert_eq!(step, FocusStep::Finished);
        assert_eq!(cam.position, Vec3::new(50.0, 2.0, 5.0));
        assert_eq!(cam.look_at, body);

        assert_eq!(focus.advance(&mut cam, now + 5.0), FocusStep::Idle);
        assert_eq!(cam.position, Vec3::new(50.0, 2.0, 5.0));
    }

    #[test]
    fn halfway_is_linear() {
        let mut cam = camera();
        let mut focus = animator();
        focus.begin_focus(&cam, Vec3::ZERO, 0.0);
        focus.advance(&mut cam, 0.5);
        assert!((cam.position - Vec3::new(0.0, 21.0, 47.5)).length() < 1e-4, "{:?}", cam.position);
    }

    #[test]
    fn new_request_restarts_from_interpolated_pose() {
        let mut cam = camera();
        let mut focus = animator();
        focus.begin_focus(&cam, Vec3::new(100.0, 0.0, 0.0), 0.0);
        focus.advance(&mut cam, 0.25);
        let midway = cam.position;

        let t = focus.begin_focus(&cam, Vec3::new(-20.0, 0.0, 0.0), 0.25);
        assert_eq!(t.start_position, midway);
        assert_eq!(t.start_time, 0.25);
        assert_eq!(t.target_position, Vec3::new(-20.0, 2.0, 5.0));

        // The first transition would have finished at t = 1; the second still runs.
        assert_eq!(focus.active().map(|a| a.start_time), Some(0.25));
        assert_eq!(focus.advance(&mut cam, 1.0), FocusStep::Moving);
        assert_eq!(focus.advance(&mut cam, 1.25), FocusStep::Finished);
        assert_eq!(cam.position, Vec3::new(-20.0, 2.0, 5.0));
    }

    #[test]
    fn bad_duration_falls_back() {
        let focus = FocusAnimator::new(Vec3::ZERO, 0.0, Easing::Linear);
        assert_eq!(focus.duration, FocusAnimator::DEFAULT_DURATION);
        let focus = FocusAnimator::new(Vec3::ZERO, f64::NAN, Easing::Linear);
        assert_eq!(focus.duration, FocusAnimator::DEFAULT_DURATION);
    }

    #[test]
    fn eased_transition_keeps_endpoints() {
        let mut cam = camera();
        let mut focus = FocusAnimator::new(Vec3::new(0.0, 2.0, 5.0), 2.0, Easing::SineInOut);
        focus.begin_focus(&cam, Vec3::ONE, 3.0);
        focus.advance(&mut cam, 3.0);
        assert_eq!(cam.position, Vec3::new(0.0, 40.0, 90.0));
        focus.advance(&mut cam, 5.0);
        assert_eq!(cam.position, Vec3::new(1.0, 3.0, 6.0));
        assert!(!focus.is_active());
    }

    #[test]
    fn finishes_exactly_at_the_deadline() {
        let focus = FocusAnimator::new(Vec3::new(0.0, 2.0, 5.0), 1.0, Easing::Linear);
        for i in 1..2000 {
            let start = i as f64 * 0.0137;
            let mut cam = camera();
            let mut focus = focus.clone();
            let t = focus.begin_focus(&cam, Vec3::X, start);
            let deadline = t.start_time + t.duration;
            assert_eq!(focus.advance(&mut cam, deadline), FocusStep::Finished, "start {start}");
            assert_eq!(cam.position, Vec3::new(1.0, 2.0, 5.0));
        }
    }

    #[test]
    fn cancel_leaves_the_camera_where_it_is() {
        let mut cam = camera();
        let mut focus = animator();
        focus.begin_focus(&cam, Vec3::ZERO, 0.0);
        focus.advance(&mut cam, 0.5);
        let here = cam.position;
        focus.cancel();
        assert_eq!(focus.advance(&mut cam, 2.0), FocusStep::Idle);
        assert_eq!(cam.position, here);
    }
}
