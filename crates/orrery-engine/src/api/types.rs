/// Unique identifier for a body in the scene graph.
/// Assigned in build order (parents before satellites), so it doubles as
/// the body's index. Display names are never used as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl BodyId {
    /// Wire value written into f32 protocol slots when no body is referenced.
    pub const NONE_WIRE: f32 = -1.0;

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Encode an optional id for the shared frame buffer.
    pub fn to_wire(id: Option<BodyId>) -> f32 {
        id.map(|b| b.0 as f32).unwrap_or(Self::NONE_WIRE)
    }
}

/// Which part of the hierarchy a body belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// The root of the scene, pinned at the origin.
    Star,
    /// Orbits the star.
    Planet,
    /// Orbits another non-star body (e.g. a moon).
    Satellite,
}

impl BodyKind {
    /// Numeric tag used in render instances.
    pub fn wire(self) -> f32 {
        match self {
            BodyKind::Star => 0.0,
            BodyKind::Planet => 1.0,
            BodyKind::Satellite => 2.0,
        }
    }
}
