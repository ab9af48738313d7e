use crate::api::types::{BodyId, BodyKind};
use crate::components::ring::RingSpec;
use crate::core::kinematics::{MotionModel, OrbitalElements};

/// A celestial body as built from configuration.
/// Immutable once the scene graph is constructed.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    /// Stable identifier (also the index in the scene graph).
    pub id: BodyId,
    /// Configuration key. Unique in a well-formed manifest.
    pub key: String,
    /// Display name; may repeat across bodies.
    pub name: String,
    pub kind: BodyKind,
    /// Body this one orbits. `None` only for the star.
    pub parent: Option<BodyId>,
    /// Orbit shape relative to the parent, in configured distance units.
    pub elements: OrbitalElements,
    /// World units per configured distance unit.
    pub orbit_scale: f64,
    pub motion: MotionModel,
    /// Orbit angle at simulated time zero.
    pub phase: f64,
    /// Self-rotation in radians per simulated second.
    pub spin_rate: f64,
    /// Rendering and picking radius in world units.
    pub visual_radius: f32,
    pub color: [f32; 3],
    /// Ring owned by this body. Always drawn at the body's position.
    pub ring: Option<RingSpec>,
    /// Direct satellites, in configuration order.
    pub satellites: Vec<BodyId>,
}

impl CelestialBody {
    /// Create a body that sits still at its parent's position.
    pub fn new(id: BodyId, key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            key: key.into(),
            name: name.into(),
            kind: BodyKind::Planet,
            parent: None,
            elements: OrbitalElements::PINNED,
            orbit_scale: 1.0,
            motion: MotionModel::STILL,
            phase: 0.0,
            spin_rate: 0.0,
            visual_radius: 1.0,
            color: [1.0, 1.0, 1.0],
            ring: None,
            satellites: Vec::new(),
        }
    }

    // -- Builder pattern --

    pub fn with_kind(mut self, kind: BodyKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_parent(mut self, parent: BodyId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_orbit(mut self, elements: OrbitalElements, orbit_scale: f64) -> Self {
        self.elements = elements;
        self.orbit_scale = orbit_scale;
        self
    }

    pub fn with_motion(mut self, motion: MotionModel) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_spin_rate(mut self, spin_rate: f64) -> Self {
        self.spin_rate = spin_rate;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.visual_radius = radius;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_ring(mut self, ring: RingSpec) -> Self {
        self.ring = Some(ring);
        self
    }

    pub fn has_rings(&self) -> bool {
        self.ring.is_some()
    }

    pub fn is_star(&self) -> bool {
        self.kind == BodyKind::Star
    }

    /// Visual diameter in world units.
    pub fn diameter(&self) -> f32 {
        self.visual_radius * 2.0
    }
}
