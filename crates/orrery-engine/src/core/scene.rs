use std::collections::HashSet;

use glam::Vec3;
use serde::Deserialize;
use serde_json::Value;

use crate::api::types::{BodyId, BodyKind};
use crate::components::background::Background;
use crate::components::body::CelestialBody;
use crate::components::ring::RingSpec;
use crate::config::error::ConfigError;
use crate::config::manifest::{
    BackgroundDescriptor, BodyDescriptor, BodyEntry, LabelsDescriptor, MotionDescriptor, RingDescriptor, SceneManifest, UnitsDescriptor,
};
use crate::core::kinematics::{self, MotionModel, OrbitalElements};

/// Points per orbit guide line.
pub const ORBIT_GUIDE_SAMPLES: usize = 96;

/// Immutable hierarchy of the scene: star → planets → satellites.
///
/// Bodies live in a flat Vec in parent-before-child order, and each body's
/// `BodyId` is its index, so lookups are O(1) and one forward pass over
/// `bodies()` always visits a parent before any of its satellites.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    bodies: Vec<CelestialBody>,
    background: Background,
    units: UnitsDescriptor,
    labels: LabelsDescriptor,
}

/// Result of building a scene: the graph plus every recoverable problem
/// that was patched over with a fallback.
#[derive(Debug)]
pub struct SceneBuild {
    pub graph: SceneGraph,
    pub errors: Vec<ConfigError>,
}

/// A sampled orbit path, relative to the parent's position.
#[derive(Debug, Clone)]
pub struct OrbitGuide {
    pub body: BodyId,
    pub parent: BodyId,
    pub path: Vec<Vec3>,
}

impl SceneGraph {
    /// The star's id. Always the first body.
    pub const ROOT: BodyId = BodyId(0);

    /// Build the hierarchy from a manifest.
    ///
    /// Invalid values never abort the build: each one is replaced with a safe
    /// default, logged, and reported in `SceneBuild::errors`.
    pub fn build(manifest: &SceneManifest) -> SceneBuild {
        let mut builder = GraphBuilder::default();

        let star_desc = &manifest.star;
        builder.claim_key(&star_desc.id);
        let star_radius = builder.radius_for(&star_desc.id, star_desc.visual_radius);
        builder.bodies.push(
            CelestialBody::new(Self::ROOT, star_desc.id.clone(), star_desc.name.clone())
                .with_kind(BodyKind::Star)
                .with_radius(star_radius)
                .with_spin_rate(finite_or_zero(star_desc.spin_rate))
                .with_color(star_desc.color),
        );

        let scale = if manifest.distance_scale.is_finite() && manifest.distance_scale > 0.0 {
            manifest.distance_scale
        } else {
            log::warn!("invalid distance_scale {}, using 1.0", manifest.distance_scale);
            1.0
        };

        for entry in &manifest.bodies {
            builder.add_entry(entry, Self::ROOT, BodyKind::Planet, scale);
        }

        if let BackgroundDescriptor::Starfield { count, .. } = manifest.background {
            if count > Background::MAX_STARS {
                builder.errors.push(ConfigError::TooManyStars {
                    count,
                    max: Background::MAX_STARS,
                });
            }
        }

        for err in &builder.errors {
            log::warn!("scene config: {err}");
        }

        SceneBuild {
            graph: SceneGraph {
                bodies: builder.bodies,
                background: Background::from_descriptor(&manifest.background),
                units: manifest.units.clone(),
                labels: manifest.labels.clone(),
            },
            errors: builder.errors,
        }
    }

    /// All bodies, parent before child.
    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    /// Bodies that take part in picking (everything except background and rings,
    /// which are not bodies at all).
    pub fn interactive_bodies(&self) -> impl Iterator<Item = &CelestialBody> {
        self.bodies.iter()
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.index())
    }

    pub fn star(&self) -> &CelestialBody {
        &self.bodies[Self::ROOT.index()]
    }

    /// First body with the given configuration key.
    pub fn find_by_key(&self, key: &str) -> Option<&CelestialBody> {
        self.bodies.iter().find(|b| b.key == key)
    }

    pub fn parent_of(&self, id: BodyId) -> Option<&CelestialBody> {
        self.body(id)?.parent.and_then(|p| self.body(p))
    }

    /// Direct satellites of a body, in configuration order.
    pub fn satellites_of(&self, id: BodyId) -> impl Iterator<Item = &CelestialBody> {
        self.body(id)
            .map(|b| b.satellites.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|s| self.body(*s))
    }

    /// Ring owned by a body, looked up by id only.
    pub fn ring_of(&self, id: BodyId) -> Option<&RingSpec> {
        self.body(id)?.ring.as_ref()
    }

    /// Bodies that own a ring, with the ring.
    pub fn rings(&self) -> impl Iterator<Item = (BodyId, &RingSpec)> {
        self.bodies.iter().filter_map(|b| b.ring.as_ref().map(|r| (b.id, r)))
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn units(&self) -> &UnitsDescriptor {
        &self.units
    }

    pub fn labels(&self) -> &LabelsDescriptor {
        &self.labels
    }

    /// Orbit guide lines for every moving body.
    pub fn orbit_guides(&self, samples: usize) -> Vec<OrbitGuide> {
        self.bodies
            .iter()
            .filter_map(|b| {
                let parent = b.parent?;
                let path = kinematics::orbit_path(&b.elements, &b.motion, b.orbit_scale, samples);
                if path.is_empty() {
                    return None;
                }
                Some(OrbitGuide {
                    body: b.id,
                    parent,
                    path: path.into_iter().map(|p| p.as_vec3()).collect(),
                })
            })
            .collect()
    }

    /// Number of bodies including the star.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false: a graph has at least its star.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

#[derive(Default)]
struct GraphBuilder {
    bodies: Vec<CelestialBody>,
    errors: Vec<ConfigError>,
    keys: HashSet<String>,
}

impl GraphBuilder {
    /// Add a body from a manifest entry. An entry that is not a body is
    /// reported and skipped together with anything nested in it.
    fn add_entry(&mut self, entry: &BodyEntry, parent: BodyId, kind: BodyKind, scale: f64) -> Option<BodyId> {
        match entry {
            BodyEntry::Valid(desc) => Some(self.add(desc, parent, kind, scale)),
            BodyEntry::Invalid(value) => match BodyDescriptor::deserialize(value) {
                Ok(desc) => Some(self.add(&desc, parent, kind, scale)),
                Err(source) => {
                    self.errors.push(ConfigError::InvalidBody {
                        key: entry_key(value),
                        source,
                    });
                    None
                }
            },
        }
    }

    fn add(&mut self, desc: &BodyDescriptor, parent: BodyId, kind: BodyKind, scale: f64) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.claim_key(&desc.id);

        let elements = self.elements_for(desc);
        let motion = self.motion_for(desc, &elements);
        let radius = self.radius_for(&desc.id, desc.visual_radius);
        let orbit_scale = desc
            .orbit_scale
            .filter(|s| s.is_finite() && *s > 0.0)
            .unwrap_or(scale);

        let mut body = CelestialBody::new(id, desc.id.clone(), desc.name.clone())
            .with_kind(kind)
            .with_parent(parent)
            .with_orbit(elements, orbit_scale)
            .with_motion(motion)
            .with_phase(finite_or_zero(desc.phase))
            .with_spin_rate(finite_or_zero(desc.spin_rate))
            .with_radius(radius)
            .with_color(desc.color);
        if let Some(ring) = self.ring_for(desc, radius) {
            body = body.with_ring(ring);
        }

        self.bodies.push(body);
        if let Some(p) = self.bodies.get_mut(parent.index()) {
            p.satellites.push(id);
        }

        for sat in &desc.satellites {
            self.add_entry(sat, id, BodyKind::Satellite, scale);
        }
        id
    }

    fn claim_key(&mut self, key: &str) {
        if !self.keys.insert(key.to_string()) {
            self.errors.push(ConfigError::DuplicateKey { key: key.to_string() });
        }
    }

    fn elements_for(&mut self, desc: &BodyDescriptor) -> OrbitalElements {
        let key = desc.id.clone();
        let Some(orbit) = desc.orbit else {
            self.errors.push(ConfigError::MissingOrbit { key });
            return OrbitalElements::FALLBACK;
        };
        let (Some(a), Some(e)) = (orbit.a, orbit.e) else {
            self.errors.push(ConfigError::MissingOrbit { key });
            return OrbitalElements::FALLBACK;
        };
        if !a.is_finite() || a < 0.0 {
            self.errors.push(ConfigError::InvalidSemiMajorAxis { key, value: a });
            return OrbitalElements::FALLBACK;
        }
        if !e.is_finite() || !(0.0..1.0).contains(&e) {
            self.errors.push(ConfigError::InvalidEccentricity { key, value: e });
            return OrbitalElements::FALLBACK;
        }
        OrbitalElements::new(a, e)
    }

    fn motion_for(&mut self, desc: &BodyDescriptor, elements: &OrbitalElements) -> MotionModel {
        let motion = match desc.motion {
            None => return MotionModel::default_for(elements),
            Some(MotionDescriptor::Circular {
                angular_speed,
                inclination_amplitude,
            }) => MotionModel::Circular {
                angular_speed,
                inclination_amplitude: finite_or_zero(inclination_amplitude),
            },
            Some(MotionDescriptor::Elliptical { angular_speed }) => MotionModel::Elliptical { angular_speed },
        };
        let speed = motion.angular_speed();
        if speed.is_finite() {
            motion
        } else {
            self.errors.push(ConfigError::InvalidMotion {
                key: desc.id.clone(),
                value: speed,
            });
            MotionModel::default_for(elements)
        }
    }

    fn radius_for(&mut self, key: &str, radius: f32) -> f32 {
        if radius.is_finite() && radius > 0.0 {
            radius
        } else {
            self.errors.push(ConfigError::InvalidRadius {
                key: key.to_string(),
                value: radius,
            });
            1.0
        }
    }

    fn ring_for(&mut self, desc: &BodyDescriptor, body_radius: f32) -> Option<RingSpec> {
        if !desc.has_rings {
            if desc.ring.is_some() {
                log::debug!("body `{}` has a ring spec but has_rings is false; ignoring it", desc.id);
            }
            return None;
        }
        let Some(spec) = desc.ring else {
            self.errors.push(ConfigError::MissingRingSpec { key: desc.id.clone() });
            return Some(RingSpec::fallback_for(body_radius));
        };
        let ring = ring_from_descriptor(&spec);
        if ring.is_valid() {
            Some(ring)
        } else {
            self.errors.push(ConfigError::InvalidRing {
                key: desc.id.clone(),
                inner: spec.inner_radius,
                outer: spec.outer_radius,
            });
            Some(RingSpec::fallback_for(body_radius))
        }
    }
}

fn ring_from_descriptor(desc: &RingDescriptor) -> RingSpec {
    RingSpec::new(desc.inner_radius, desc.outer_radius)
        .with_tint(desc.tint)
        .with_opacity(desc.opacity)
        .with_tilt(desc.tilt)
}

fn entry_key(value: &Value) -> String {
    value
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>")
        .to_string()
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SYSTEM: &str = r#"{
        "star": { "id": "soleil", "name": "Soleil", "visual_radius": 4.0 },
        "bodies": [
            { "id": "terre", "name": "Terre", "orbit": { "a": 1.0, "e": 0.017 },
              "motion": { "model": "circular", "angular_speed": 0.3 },
              "satellites": [
                  { "id": "lune", "name": "Lune", "orbit": { "a": 0.00257, "e": 0.054 }, "orbit_scale": 1000.0 }
              ] },
            { "id": "saturne", "name": "Saturne", "orbit": { "a": 9.537, "e": 0.054 },
              "visual_radius": 11.646, "has_rings": true,
              "ring": { "inner_radius": 13.646, "outer_radius": 16.646 } },
            { "id": "uranus", "name": "Uranus", "orbit": { "a": 19.191, "e": 0.047 },
              "visual_radius": 5.072, "has_rings": true }
        ],
        "distance_scale": 50.0
    }"#;

    fn build(json: &str) -> SceneBuild {
        SceneGraph::build(&SceneManifest::from_json(json).unwrap())
    }

    #[test]
    fn hierarchy_is_parent_before_child() {
        let SceneBuild { graph, .. } = build(SYSTEM);
        assert_eq!(graph.len(), 5);
        assert!(graph.star().is_star());
        for body in graph.bodies() {
            if let Some(parent) = body.parent {
                assert!(parent < body.id, "{} listed before its parent", body.key);
            }
        }
        let lune = graph.find_by_key("lune").unwrap();
        assert_eq!(lune.kind, BodyKind::Satellite);
        assert_eq!(graph.parent_of(lune.id).unwrap().key, "terre");
        assert_eq!(lune.orbit_scale, 1000.0);
        let planets: Vec<_> = graph.satellites_of(SceneGraph::ROOT).map(|b| b.key.as_str()).collect();
        assert_eq!(planets, ["terre", "saturne", "uranus"]);
    }

    #[test]
    fn rings_are_owned_by_their_body() {
        let SceneBuild { graph, errors } = build(SYSTEM);
        let saturne = graph.find_by_key("saturne").unwrap();
        let ring = graph.ring_of(saturne.id).unwrap();
        assert_eq!(ring.inner_radius, 13.646);
        assert!(graph.ring_of(graph.find_by_key("terre").unwrap().id).is_none());

        // Uranus is flagged but has no spec: fallback ring, reported.
        let uranus = graph.find_by_key("uranus").unwrap();
        assert!(graph.ring_of(uranus.id).unwrap().is_valid());
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingRingSpec { key } if key == "uranus")));
        assert_eq!(graph.rings().count(), 2);
    }

    #[test]
    fn invalid_elements_fall_back_without_aborting() {
        let SceneBuild { graph, errors } = build(
            r#"{ "bodies": [
                { "id": "a", "name": "Bad e", "orbit": { "a": 2.0, "e": 1.2 } },
                { "id": "b", "name": "No orbit" },
                { "id": "c", "name": "Negative a", "orbit": { "a": -3.0, "e": 0.1 } },
                { "id": "d", "name": "Fine", "orbit": { "a": 2.0, "e": 0.5 }, "visual_radius": -1.0 }
            ] }"#,
        );
        assert_eq!(graph.len(), 5);
        for key in ["a", "b", "c"] {
            assert_eq!(graph.find_by_key(key).unwrap().elements, OrbitalElements::FALLBACK, "{key}");
        }
        let d = graph.find_by_key("d").unwrap();
        assert_eq!(d.elements, OrbitalElements::new(2.0, 0.5));
        assert_eq!(d.visual_radius, 1.0);
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(ConfigError::is_recoverable));
    }

    #[test]
    fn one_bad_body_never_drops_the_others() {
        let SceneBuild { graph, errors } = build(
            r#"{ "bodies": [
                { "id": "terre", "name": "Terre", "orbit": { "a": 1.0, "e": 0.017 },
                  "satellites": [ { "id": "lune", "orbit": { "a": 0.1, "e": 0.0 } } ] },
                { "id": "mars", "name": "Mars", "orbit": { "a": 1.524, "e": "0.093" } },
                { "id": "x", "name": "X", "motion": { "model": "spiral", "angular_speed": 1.0 } }
            ] }"#,
        );
        // Star, Terre, Mars. The nameless moon and the unknown model are skipped.
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.find_by_key("terre").unwrap().elements, OrbitalElements::new(1.0, 0.017));
        assert_eq!(graph.find_by_key("mars").unwrap().elements, OrbitalElements::FALLBACK);
        assert!(graph.find_by_key("lune").is_none());
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidEccentricity { key, .. } if key == "mars")));
        let skipped: Vec<_> = errors
            .iter()
            .filter_map(|e| match e {
                ConfigError::InvalidBody { key, .. } => Some(key.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(skipped, ["lune", "x"]);
        assert!(errors.iter().all(ConfigError::is_recoverable));
    }

    #[test]
    fn oversized_starfield_is_reported() {
        let SceneBuild { graph, errors } =
            build(r#"{ "background": { "kind": "starfield", "radius": 100.0, "count": 4000000000 } }"#);
        assert_eq!(graph.background().stars().len(), Background::MAX_STARS as usize);
        assert!(matches!(&errors[..], [ConfigError::TooManyStars { count: 4_000_000_000, .. }]));
    }

    #[test]
    fn duplicate_names_and_keys_keep_distinct_ids() {
        let SceneBuild { graph, errors } = build(
            r#"{ "bodies": [
                { "id": "x", "name": "Twin", "orbit": { "a": 1.0, "e": 0.0 } },
                { "id": "x", "name": "Twin", "orbit": { "a": 2.0, "e": 0.0 } }
            ] }"#,
        );
        let ids: Vec<_> = graph.bodies().iter().map(|b| b.id).collect();
        assert_eq!(ids, [BodyId(0), BodyId(1), BodyId(2)]);
        assert!(matches!(&errors[..], [ConfigError::DuplicateKey { key }] if key == "x"));
    }

    #[test]
    fn orbit_guides_skip_the_star() {
        let SceneBuild { graph, .. } = build(SYSTEM);
        let guides = graph.orbit_guides(32);
        assert_eq!(guides.len(), 4);
        assert!(guides.iter().all(|g| g.body != SceneGraph::ROOT && g.path.len() == 32));
        let terre = graph.find_by_key("terre").unwrap().id;
        let guide = guides.iter().find(|g| g.body == terre).unwrap();
        assert!((guide.path[0].length() - 50.0).abs() < 1e-3);
    }
}
