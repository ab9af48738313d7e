//! Bundled scene presets.

const SOLAR_SYSTEM: &str = include_str!("../scenes/solar_system.json");
const EARTH_MOON: &str = include_str!("../scenes/earth_moon.json");

/// Manifest JSON for a preset name, or `None` if it is unknown.
pub fn manifest(name: &str) -> Option<&'static str> {
    match name {
        "solar_system" => Some(SOLAR_SYSTEM),
        "earth_moon" => Some(EARTH_MOON),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{FrameScheduler, Viewport};

    fn mount(name: &str) -> FrameScheduler {
        let json = manifest(name).unwrap();
        FrameScheduler::from_json(json, Viewport::new(1280.0, 720.0)).unwrap()
    }

    #[test]
    fn presets_load_without_config_errors() {
        for name in ["solar_system", "earth_moon"] {
            let scheduler = mount(name);
            assert!(scheduler.config_errors().is_empty(), "{name}: {:?}", scheduler.config_errors());
        }
    }

    #[test]
    fn solar_system_has_eight_planets_and_the_moon() {
        let scheduler = mount("solar_system");
        let graph = &scheduler.context().unwrap().graph;
        assert_eq!(graph.len(), 10);
        assert_eq!(graph.rings().count(), 2);
        let earth = graph.find_by_key("terre").unwrap().id;
        let moon = graph.find_by_key("lune").unwrap().id;
        assert_eq!(graph.parent_of(moon).map(|b| b.id), Some(earth));
    }

    #[test]
    fn earth_moon_keeps_the_moon_still() {
        let mut scheduler = mount("earth_moon");
        scheduler.start();
        scheduler.tick(1.0);
        scheduler.tick(1.0);
        let ctx = scheduler.context().unwrap();
        let moon = ctx.graph.find_by_key("lune").unwrap().id;
        let p = ctx.transforms.position(moon).unwrap();
        assert!((p.x - 2.0).abs() < 1e-9 && p.z.abs() < 1e-9, "{p:?}");
    }

    #[test]
    fn unknown_preset() {
        assert!(manifest("pluton").is_none());
    }
}
