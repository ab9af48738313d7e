/// Planetary ring, owned by its body.
/// Has no position of its own: it is drawn centred on the owner every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingSpec {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub tint: [f32; 3],
    pub opacity: f32,
    /// Rotation about the X axis in radians.
    pub tilt: f32,
}

impl RingSpec {
    pub fn new(inner_radius: f32, outer_radius: f32) -> Self {
        Self {
            inner_radius,
            outer_radius,
            tint: [0.5, 0.5, 0.5],
            opacity: 1.0,
            tilt: 0.0,
        }
    }

    /// Ring used when a body is flagged with rings but its spec is missing
    /// or unusable: a band from `radius + 2` to `radius + 5`.
    pub fn fallback_for(body_radius: f32) -> Self {
        Self::new(body_radius + 2.0, body_radius + 5.0)
    }

    pub fn with_tint(mut self, tint: [f32; 3]) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_tilt(mut self, tilt: f32) -> Self {
        self.tilt = tilt;
        self
    }

    /// Radii are finite, positive and ordered.
    pub fn is_valid(&self) -> bool {
        self.inner_radius.is_finite()
            && self.outer_radius.is_finite()
            && self.inner_radius >= 0.0
            && self.outer_radius > self.inner_radius
    }
}
