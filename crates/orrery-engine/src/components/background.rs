use glam::Vec3;

use crate::config::manifest::BackgroundDescriptor;

/// Decorative backdrop. Never part of picking.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// Inverted sphere surrounding the scene, textured by the host.
    Sphere { radius: f32, texture: Option<String> },
    /// Fixed points on a sphere shell.
    Starfield { radius: f32, stars: Vec<Vec3> },
    None,
}

impl Background {
    /// Upper bound on starfield points. Larger counts are clamped.
    pub const MAX_STARS: u32 = 100_000;

    pub fn from_descriptor(desc: &BackgroundDescriptor) -> Self {
        match desc {
            BackgroundDescriptor::Sphere { radius, texture } => Background::Sphere {
                radius: *radius,
                texture: texture.clone(),
            },
            BackgroundDescriptor::Starfield { radius, count, seed } => Background::Starfield {
                radius: *radius,
                stars: starfield(*radius, (*count).min(Self::MAX_STARS), *seed),
            },
            BackgroundDescriptor::None => Background::None,
        }
    }

    /// Radius of the backdrop shell, zero when there is none.
    pub fn radius(&self) -> f32 {
        match self {
            Background::Sphere { radius, .. } | Background::Starfield { radius, .. } => *radius,
            Background::None => 0.0,
        }
    }

    pub fn stars(&self) -> &[Vec3] {
        match self {
            Background::Starfield { stars, .. } => stars,
            _ => &[],
        }
    }
}

/// Deterministic hash for starfield generation (no external rand crate).
pub fn star_hash(seed: u32) -> u32 {
    let mut n = seed;
    n = n.wrapping_mul(2654435761);
    n ^= n >> 16;
    n = n.wrapping_mul(2246822519);
    n ^= n >> 13;
    n
}

/// `count` points spread uniformly over a sphere of `radius`.
pub fn starfield(radius: f32, count: u32, seed: u32) -> Vec<Vec3> {
    let frac = |h: u32| (h as f32) / (u32::MAX as f32);
    (0..count)
        .map(|i| {
            let base = seed.wrapping_add(i.wrapping_mul(7919));
            let z = frac(star_hash(base.wrapping_mul(13).wrapping_add(97))) * 2.0 - 1.0;
            let phi = frac(star_hash(base.wrapping_mul(19).wrapping_add(151))) * std::f32::consts::TAU;
            let ring = (1.0 - z * z).max(0.0).sqrt();
            Vec3::new(ring * phi.cos(), z, ring * phi.sin()) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starfield_is_deterministic_and_on_shell() {
        let a = starfield(400.0, 64, 7);
        let b = starfield(400.0, 64, 7);
        assert_eq!(a, b);
        for star in &a {
            assert!((star.length() - 400.0).abs() < 0.1, "star at {star:?}");
        }
        assert_ne!(starfield(400.0, 8, 1), starfield(400.0, 8, 2));
    }

    #[test]
    fn descriptor_conversion() {
        let bg = Background::from_descriptor(&BackgroundDescriptor::default());
        assert_eq!(bg.radius(), 500.0);
        assert!(bg.stars().is_empty());
        assert_eq!(Background::from_descriptor(&BackgroundDescriptor::None).radius(), 0.0);
    }

    #[test]
    fn starfield_count_is_clamped() {
        let bg = Background::from_descriptor(&BackgroundDescriptor::Starfield {
            radius: 100.0,
            count: 4_000_000_000,
            seed: 1,
        });
        assert_eq!(bg.stars().len(), Background::MAX_STARS as usize);
    }
}
