//! Orbital kinematics: pure functions of simulated time.
//!
//! Uses f64 throughout; positions are converted to f32 only when they are
//! handed to picking and the render buffers.
//!
//! The orbit angle is always `phase + sim_time × angular_speed`. Nothing here
//! keeps per-frame state, so the same simulated time always yields the same
//! positions.

use std::f64::consts::TAU;

use glam::DVec3;

use crate::api::types::BodyId;
use crate::core::scene::SceneGraph;

/// Eccentricities are clamped to this value so the ellipse denominator
/// `1 + e·cos θ` never gets close to zero.
pub const MAX_ECCENTRICITY: f64 = 0.99;

/// Shape of an orbit relative to the parent body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    /// Semi-major axis in configured distance units. Zero pins the body to its parent.
    pub a: f64,
    /// Eccentricity, 0 = circle.
    pub e: f64,
}

impl OrbitalElements {
    /// Fallback used when a body's configuration is unusable.
    pub const FALLBACK: Self = Self { a: 1.0, e: 0.0 };
    /// A body sitting exactly on its parent (the star at the origin).
    pub const PINNED: Self = Self { a: 0.0, e: 0.0 };

    pub fn new(a: f64, e: f64) -> Self {
        Self { a, e }
    }

    /// Eccentricity clamped to `[0, MAX_ECCENTRICITY]`.
    #[inline]
    pub fn clamped_e(&self) -> f64 {
        if self.e.is_finite() {
            self.e.clamp(0.0, MAX_ECCENTRICITY)
        } else {
            0.0
        }
    }

    /// Distance from the parent at orbit angle `theta`:
    /// `r(θ) = a(1 − e²) / (1 + e·cos θ)`.
    pub fn radius_at(&self, theta: f64) -> f64 {
        if self.a <= 0.0 {
            return 0.0;
        }
        let e = self.clamped_e();
        self.a * (1.0 - e * e) / (1.0 + e * theta.cos())
    }
}

/// How a body's orbit angle maps to a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionModel {
    /// `x = a·cos θ`, `z = a·sin θ`, plus a small vertical wobble.
    Circular {
        angular_speed: f64,
        inclination_amplitude: f64,
    },
    /// Orbit equation with the focus at the parent.
    Elliptical { angular_speed: f64 },
}

impl MotionModel {
    /// A body that never moves relative to its parent.
    pub const STILL: Self = MotionModel::Circular {
        angular_speed: 0.0,
        inclination_amplitude: 0.0,
    };

    /// Angular speed in radians per simulated second.
    pub fn angular_speed(&self) -> f64 {
        match *self {
            MotionModel::Circular { angular_speed, .. } => angular_speed,
            MotionModel::Elliptical { angular_speed } => angular_speed,
        }
    }

    /// Simulated seconds per revolution, `None` for a non-moving body.
    pub fn period(&self) -> Option<f64> {
        let w = self.angular_speed().abs();
        if w > 0.0 && w.is_finite() {
            Some(TAU / w)
        } else {
            None
        }
    }

    /// Speed convention used when a body has no explicit motion: closer bodies
    /// move faster, following `a^-1.5` scaled so that `a = 1` turns at 0.3 rad/s.
    pub fn default_for(elements: &OrbitalElements) -> Self {
        let angular_speed = if elements.a > 0.0 {
            DEFAULT_ANGULAR_SPEED / elements.a.powf(1.5)
        } else {
            0.0
        };
        MotionModel::Circular {
            angular_speed,
            inclination_amplitude: 0.0,
        }
    }
}

/// Angular speed at `a = 1` for bodies without an explicit motion model.
pub const DEFAULT_ANGULAR_SPEED: f64 = 0.3;

/// Orbit angle θ at `sim_time`.
#[inline]
pub fn orbit_angle(model: &MotionModel, phase: f64, sim_time: f64) -> f64 {
    phase + sim_time * model.angular_speed()
}

/// Position relative to the parent at `sim_time`, in world units.
/// `scale` converts configured distance units to world units.
pub fn relative_position(
    elements: &OrbitalElements,
    model: &MotionModel,
    phase: f64,
    scale: f64,
    sim_time: f64,
) -> DVec3 {
    if elements.a <= 0.0 || !elements.a.is_finite() {
        return DVec3::ZERO;
    }
    let theta = orbit_angle(model, phase, sim_time);
    position_at_angle(elements, model, scale, theta)
}

fn position_at_angle(elements: &OrbitalElements, model: &MotionModel, scale: f64, theta: f64) -> DVec3 {
    let (sin, cos) = theta.sin_cos();
    match *model {
        MotionModel::Circular {
            inclination_amplitude,
            ..
        } => {
            let r = elements.a * scale;
            DVec3::new(r * cos, sin * inclination_amplitude, r * sin)
        }
        MotionModel::Elliptical { .. } => {
            let r = elements.radius_at(theta) * scale;
            DVec3::new(r * cos, 0.0, r * sin)
        }
    }
}

/// Self-rotation angle in `[0, 2π)`.
///
/// Spin accumulates `real_dt × multiplier × spin_rate` per frame, which is
/// exactly `sim_time × spin_rate`, so it is computed from the clock directly.
#[inline]
pub fn spin_angle(spin_rate: f64, sim_time: f64) -> f64 {
    (sim_time * spin_rate).rem_euclid(TAU)
}

/// Sample one full revolution, relative to the parent, for orbit guide lines.
pub fn orbit_path(elements: &OrbitalElements, model: &MotionModel, scale: f64, samples: usize) -> Vec<DVec3> {
    if elements.a <= 0.0 || samples == 0 {
        return Vec::new();
    }
    (0..samples)
        .map(|i| {
            let theta = (i as f64 / samples as f64) * TAU;
            position_at_angle(elements, model, scale, theta)
        })
        .collect()
}

/// World-space transforms for every body at one simulated instant.
/// Indexed by `BodyId`.
#[derive(Debug, Clone, Default)]
pub struct FrameTransforms {
    positions: Vec<DVec3>,
    spins: Vec<f64>,
    sim_time: f64,
}

impl FrameTransforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute all transforms at `sim_time`.
    ///
    /// Bodies are stored parent-before-child, so one forward pass sees each
    /// parent's position for this frame before its satellites are placed.
    pub fn solve(&mut self, graph: &SceneGraph, sim_time: f64) {
        let count = graph.len();
        self.positions.clear();
        self.positions.resize(count, DVec3::ZERO);
        self.spins.clear();
        self.spins.resize(count, 0.0);
        self.sim_time = sim_time;

        for body in graph.bodies() {
            let origin = body
                .parent
                .and_then(|p| self.positions.get(p.index()).copied())
                .unwrap_or(DVec3::ZERO);
            let offset = relative_position(&body.elements, &body.motion, body.phase, body.orbit_scale, sim_time);
            let i = body.id.index();
            self.positions[i] = origin + offset;
            self.spins[i] = spin_angle(body.spin_rate, sim_time);
        }
    }

    /// Simulated time these transforms were solved for.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn position(&self, id: BodyId) -> Option<DVec3> {
        self.positions.get(id.index()).copied()
    }

    pub fn spin(&self, id: BodyId) -> Option<f64> {
        self.spins.get(id.index()).copied()
    }

    pub fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn circular(speed: f64) -> MotionModel {
        MotionModel::Circular {
            angular_speed: speed,
            inclination_amplitude: 0.0,
        }
    }

    #[test]
    fn terre_starts_on_x_axis_and_returns_after_one_period() {
        let terre = OrbitalElements::new(1.0, 0.017);
        let model = circular(0.3);
        let p0 = relative_position(&terre, &model, 0.0, 1.0, 0.0);
        assert!((p0 - DVec3::new(1.0, 0.0, 0.0)).length() < EPS, "p0 = {p0:?}");

        let period = model.period().unwrap();
        assert!((period - TAU / 0.3).abs() < EPS);
        let p1 = relative_position(&terre, &model, 0.0, 1.0, period);
        assert!((p1 - DVec3::new(1.0, 0.0, 0.0)).length() < 1e-9, "p1 = {p1:?}");
    }

    #[test]
    fn circular_orbits_are_periodic() {
        let elements = OrbitalElements::new(5.203, 0.049);
        let model = MotionModel::Circular {
            angular_speed: 0.07,
            inclination_amplitude: 0.2,
        };
        let period = model.period().unwrap();
        for &t in &[0.0, 1.3, 17.0, 250.5] {
            let a = relative_position(&elements, &model, 0.4, 50.0, t);
            let b = relative_position(&elements, &model, 0.4, 50.0, t + period);
            assert!((a - b).length() < 1e-6, "t={t}: {a:?} vs {b:?}");
        }
    }

    #[test]
    fn inclination_wobbles_y() {
        let elements = OrbitalElements::new(2.0, 0.0);
        let model = MotionModel::Circular {
            angular_speed: 1.0,
            inclination_amplitude: 0.5,
        };
        let p = relative_position(&elements, &model, 0.0, 1.0, std::f64::consts::FRAC_PI_2);
        assert!((p.y - 0.5).abs() < EPS);
        assert!(p.x.abs() < EPS);
        assert!((p.z - 2.0).abs() < EPS);
    }

    #[test]
    fn ellipse_follows_orbit_equation() {
        let mars = OrbitalElements::new(1.524, 0.093);
        let model = MotionModel::Elliptical { angular_speed: 1.0 };
        // θ = 0: perihelion on +x
        let p = relative_position(&mars, &model, 0.0, 1.0, 0.0);
        assert!((p.x - 1.524 * (1.0 - 0.093)).abs() < 1e-9, "p = {p:?}");
        // θ = π: aphelion on −x
        let q = relative_position(&mars, &model, 0.0, 1.0, std::f64::consts::PI);
        assert!((q.x + 1.524 * (1.0 + 0.093)).abs() < 1e-9, "q = {q:?}");
    }

    #[test]
    fn eccentricity_is_clamped_before_division() {
        let wild = OrbitalElements::new(1.0, 1.5);
        assert_eq!(wild.clamped_e(), MAX_ECCENTRICITY);
        let r = wild.radius_at(std::f64::consts::PI);
        assert!(r.is_finite() && r > 0.0, "r = {r}");

        let nan = OrbitalElements::new(1.0, f64::NAN);
        assert_eq!(nan.clamped_e(), 0.0);
        assert!((nan.radius_at(0.3) - 1.0).abs() < EPS);
    }

    #[test]
    fn zero_axis_pins_body_to_parent() {
        let pinned = OrbitalElements::PINNED;
        let model = MotionModel::Circular {
            angular_speed: 2.0,
            inclination_amplitude: 1.0,
        };
        for &t in &[0.0, 0.7, 100.0] {
            assert_eq!(relative_position(&pinned, &model, 0.0, 50.0, t), DVec3::ZERO);
        }
        assert!(orbit_path(&pinned, &model, 1.0, 16).is_empty());
    }

    #[test]
    fn angle_is_deterministic() {
        let elements = OrbitalElements::new(0.387, 0.206);
        let model = MotionModel::Elliptical { angular_speed: 1.2 };
        let a = relative_position(&elements, &model, 0.0, 50.0, 12.5);
        let b = relative_position(&elements, &model, 0.0, 50.0, 12.5);
        assert_eq!(a, b);
    }

    #[test]
    fn spin_wraps_into_one_turn() {
        let s = spin_angle(1.0, 3.0 * TAU + 0.25);
        assert!((s - 0.25).abs() < 1e-9);
        assert_eq!(spin_angle(0.0, 99.0), 0.0);
        assert!(spin_angle(-1.0, 0.5) >= 0.0);
    }

    #[test]
    fn default_motion_is_faster_closer_in() {
        let inner = MotionModel::default_for(&OrbitalElements::new(0.387, 0.0));
        let outer = MotionModel::default_for(&OrbitalElements::new(30.0, 0.0));
        assert!(inner.angular_speed() > outer.angular_speed());
        let earth = MotionModel::default_for(&OrbitalElements::new(1.0, 0.0));
        assert!((earth.angular_speed() - DEFAULT_ANGULAR_SPEED).abs() < EPS);
        assert_eq!(MotionModel::STILL.period(), None);
    }

    #[test]
    fn orbit_path_samples_full_turn() {
        let elements = OrbitalElements::new(2.0, 0.0);
        let path = orbit_path(&elements, &circular(1.0), 10.0, 64);
        assert_eq!(path.len(), 64);
        for p in &path {
            assert!((p.length() - 20.0).abs() < 1e-9);
        }
    }
}
