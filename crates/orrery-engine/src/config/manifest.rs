use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::error::ConfigError;
use crate::extensions::easing::Easing;

/// Scene manifest describing the star, its bodies and the camera setup.
/// Loaded once from JSON at mount time. Everything is optional; a body entry
/// that does not describe a body is kept raw and reported when the scene is
/// built, so one bad entry never rejects the whole manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneManifest {
    #[serde(default)]
    pub star: StarDescriptor,
    /// Bodies orbiting the star, in display order.
    #[serde(default)]
    pub bodies: Vec<BodyEntry>,
    #[serde(default)]
    pub background: BackgroundDescriptor,
    #[serde(default)]
    pub camera: CameraDescriptor,
    #[serde(default)]
    pub interaction: InteractionDescriptor,
    #[serde(default)]
    pub units: UnitsDescriptor,
    #[serde(default)]
    pub labels: LabelsDescriptor,
    /// World units per configured distance unit for orbits around the star.
    #[serde(default = "default_distance_scale")]
    pub distance_scale: f64,
}

/// The root body. Always pinned at the origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarDescriptor {
    #[serde(default = "default_star_id")]
    pub id: String,
    #[serde(default = "default_star_name")]
    pub name: String,
    #[serde(default = "default_radius")]
    pub visual_radius: f32,
    #[serde(default)]
    pub spin_rate: f64,
    #[serde(default = "default_star_color")]
    pub color: [f32; 3],
}

/// One orbiting body and, recursively, its satellites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub id: String,
    pub name: String,
    /// Orbital elements relative to the parent. Missing elements are a
    /// configuration error and fall back to `a = 1, e = 0`.
    #[serde(default)]
    pub orbit: Option<OrbitDescriptor>,
    /// Motion model. When absent, a circular orbit whose speed falls off
    /// with `a^1.5` is used.
    #[serde(default)]
    pub motion: Option<MotionDescriptor>,
    #[serde(default = "default_radius")]
    pub visual_radius: f32,
    #[serde(default)]
    pub has_rings: bool,
    #[serde(default)]
    pub ring: Option<RingDescriptor>,
    /// Self-rotation in radians per simulated second.
    #[serde(default)]
    pub spin_rate: f64,
    /// Orbit angle at simulated time zero.
    #[serde(default)]
    pub phase: f64,
    #[serde(default = "default_body_color")]
    pub color: [f32; 3],
    /// Overrides the manifest `distance_scale` for this body's orbit.
    /// Useful for moons whose real distances would sit inside the parent.
    #[serde(default)]
    pub orbit_scale: Option<f64>,
    #[serde(default)]
    pub satellites: Vec<BodyEntry>,
}

/// A body list entry as it appeared in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BodyEntry {
    Valid(BodyDescriptor),
    /// Anything that failed to deserialize as a body.
    Invalid(Value),
}

impl BodyEntry {
    pub fn valid(&self) -> Option<&BodyDescriptor> {
        match self {
            BodyEntry::Valid(desc) => Some(desc),
            BodyEntry::Invalid(_) => None,
        }
    }
}

impl From<BodyDescriptor> for BodyEntry {
    fn from(desc: BodyDescriptor) -> Self {
        BodyEntry::Valid(desc)
    }
}

/// Orbital elements. A value that is not a number reads as NaN so the
/// scene builder reports it and falls back, instead of rejecting the body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrbitDescriptor {
    #[serde(default, deserialize_with = "lenient_number")]
    pub a: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub e: Option<f64>,
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.map(|v| v.as_f64().unwrap_or(f64::NAN)))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum MotionDescriptor {
    Circular {
        angular_speed: f64,
        #[serde(default)]
        inclination_amplitude: f64,
    },
    Elliptical {
        angular_speed: f64,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RingDescriptor {
    pub inner_radius: f32,
    pub outer_radius: f32,
    #[serde(default = "default_ring_tint")]
    pub tint: [f32; 3],
    #[serde(default = "default_ring_opacity")]
    pub opacity: f32,
    /// Rotation about the X axis, radians. Zero keeps the ring in the orbital plane.
    #[serde(default)]
    pub tilt: f32,
}

/// Decorative backdrop. Never interactive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackgroundDescriptor {
    /// Large inverted sphere (textured by the host).
    Sphere {
        radius: f32,
        #[serde(default)]
        texture: Option<String>,
    },
    /// Deterministic point starfield on a sphere shell.
    Starfield {
        radius: f32,
        count: u32,
        #[serde(default)]
        seed: u32,
    },
    None,
}

impl Default for BackgroundDescriptor {
    fn default() -> Self {
        BackgroundDescriptor::Sphere {
            radius: 500.0,
            texture: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraDescriptor {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub look_at: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov_y_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    /// Constant offset from a focused body to the camera.
    #[serde(default = "default_focus_offset")]
    pub focus_offset: [f32; 3],
    /// Focus transition length in real seconds.
    #[serde(default = "default_focus_duration")]
    pub focus_duration: f64,
    #[serde(default)]
    pub focus_easing: Easing,
    #[serde(default = "default_true")]
    pub auto_rotate: bool,
    /// Same convention as three.js OrbitControls: 1.0 is one turn per minute.
    #[serde(default = "default_auto_rotate_speed")]
    pub auto_rotate_speed: f32,
    #[serde(default = "default_min_distance")]
    pub min_distance: f32,
    #[serde(default = "default_max_distance")]
    pub max_distance: f32,
}

impl Default for CameraDescriptor {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            look_at: [0.0; 3],
            fov_y_degrees: default_fov(),
            near: default_near(),
            far: default_far(),
            focus_offset: default_focus_offset(),
            focus_duration: default_focus_duration(),
            focus_easing: Easing::Linear,
            auto_rotate: true,
            auto_rotate_speed: default_auto_rotate_speed(),
            min_distance: default_min_distance(),
            max_distance: default_max_distance(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionDescriptor {
    /// Multiplier applied to visual radii for hit testing.
    #[serde(default = "default_pick_scale")]
    pub pick_scale: f32,
    /// Pixel distance before a press becomes a drag instead of a click.
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f32,
    /// Rotation-speed multiplier at mount, in [0, 1].
    #[serde(default = "default_initial_speed")]
    pub initial_speed: f64,
    /// Multiplicative zoom per wheel tick.
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
}

impl Default for InteractionDescriptor {
    fn default() -> Self {
        Self {
            pick_scale: default_pick_scale(),
            drag_threshold: default_drag_threshold(),
            initial_speed: default_initial_speed(),
            zoom_step: default_zoom_step(),
        }
    }
}

/// Unit suffixes appended to info panel values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitsDescriptor {
    #[serde(default = "default_distance_unit")]
    pub distance: String,
    #[serde(default)]
    pub size: String,
    #[serde(default = "default_time_unit")]
    pub time: String,
}

impl Default for UnitsDescriptor {
    fn default() -> Self {
        Self {
            distance: default_distance_unit(),
            size: String::new(),
            time: default_time_unit(),
        }
    }
}

/// Info panel labels, so scenes can ship in any language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsDescriptor {
    #[serde(default = "default_label_distance_star")]
    pub distance_from_star: String,
    #[serde(default = "default_label_distance_parent")]
    pub distance_from_parent: String,
    #[serde(default = "default_label_diameter")]
    pub diameter: String,
    #[serde(default = "default_label_period")]
    pub period: String,
    #[serde(default = "default_label_eccentricity")]
    pub eccentricity: String,
}

impl Default for LabelsDescriptor {
    fn default() -> Self {
        Self {
            distance_from_star: default_label_distance_star(),
            distance_from_parent: default_label_distance_parent(),
            diameter: default_label_diameter(),
            period: default_label_period(),
            eccentricity: default_label_eccentricity(),
        }
    }
}

impl Default for StarDescriptor {
    fn default() -> Self {
        Self {
            id: default_star_id(),
            name: default_star_name(),
            visual_radius: default_radius(),
            spin_rate: 0.0,
            color: default_star_color(),
        }
    }
}

impl Default for SceneManifest {
    fn default() -> Self {
        Self {
            star: StarDescriptor::default(),
            bodies: Vec::new(),
            background: BackgroundDescriptor::default(),
            camera: CameraDescriptor::default(),
            interaction: InteractionDescriptor::default(),
            units: UnitsDescriptor::default(),
            labels: LabelsDescriptor::default(),
            distance_scale: default_distance_scale(),
        }
    }
}

impl SceneManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn default_distance_scale() -> f64 {
    1.0
}
fn default_star_id() -> String {
    "star".to_string()
}
fn default_star_name() -> String {
    "Star".to_string()
}
fn default_radius() -> f32 {
    1.0
}
fn default_star_color() -> [f32; 3] {
    [1.0, 0.9, 0.5]
}
fn default_body_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_ring_tint() -> [f32; 3] {
    [0.5, 0.5, 0.5]
}
fn default_ring_opacity() -> f32 {
    1.0
}
fn default_camera_position() -> [f32; 3] {
    [0.0, 5.0, 10.0]
}
fn default_fov() -> f32 {
    75.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    2000.0
}
fn default_focus_offset() -> [f32; 3] {
    [0.0, 2.0, 5.0]
}
fn default_focus_duration() -> f64 {
    1.0
}
fn default_true() -> bool {
    true
}
fn default_auto_rotate_speed() -> f32 {
    0.5
}
fn default_min_distance() -> f32 {
    0.5
}
fn default_max_distance() -> f32 {
    1500.0
}
fn default_pick_scale() -> f32 {
    1.0
}
fn default_drag_threshold() -> f32 {
    5.0
}
fn default_initial_speed() -> f64 {
    1.0
}
fn default_zoom_step() -> f32 {
    1.05
}
fn default_distance_unit() -> String {
    "AU".to_string()
}
fn default_time_unit() -> String {
    "s".to_string()
}
fn default_label_distance_star() -> String {
    "Distance from star".to_string()
}
fn default_label_distance_parent() -> String {
    "Distance from parent".to_string()
}
fn default_label_diameter() -> String {
    "Diameter".to_string()
}
fn default_label_period() -> String {
    "Orbital period".to_string()
}
fn default_label_eccentricity() -> String {
    "Eccentricity".to_string()
}
