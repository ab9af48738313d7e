use thiserror::Error;

/// Problems found while loading or building a scene.
///
/// Only `Parse` is fatal. Every other variant is reported alongside a
/// scene that was built with a safe fallback for the offending value.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse scene manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("body `{key}` is not a valid body description: {source}")]
    InvalidBody {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("body `{key}` has no orbital elements")]
    MissingOrbit { key: String },

    #[error("body `{key}` has invalid semi-major axis {value}")]
    InvalidSemiMajorAxis { key: String, value: f64 },

    #[error("body `{key}` has eccentricity {value} outside [0, 1)")]
    InvalidEccentricity { key: String, value: f64 },

    #[error("body `{key}` has invalid visual radius {value}")]
    InvalidRadius { key: String, value: f32 },

    #[error("body `{key}` has invalid angular speed {value}")]
    InvalidMotion { key: String, value: f64 },

    #[error("body `{key}` is flagged with rings but has no ring spec")]
    MissingRingSpec { key: String },

    #[error("body `{key}` has invalid ring radii {inner}..{outer}")]
    InvalidRing { key: String, inner: f32, outer: f32 },

    #[error("starfield count {count} exceeds {max}, clamped")]
    TooManyStars { count: u32, max: u32 },

    #[error("duplicate body id `{key}`")]
    DuplicateKey { key: String },
}

impl ConfigError {
    /// Whether the scene could still be built with a fallback value.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ConfigError::Parse(_))
    }
}
