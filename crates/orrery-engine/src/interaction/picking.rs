//! Pointer picking: screen point → ray → nearest body.
//!
//! Everything here is a pure function of the frame's transforms and camera,
//! so the scheduler can evaluate it every frame for hover and again on each
//! click.

use glam::{Vec2, Vec3};

use crate::api::types::BodyId;
use crate::core::kinematics::FrameTransforms;
use crate::core::scene::SceneGraph;
use crate::renderer::camera::{Camera3D, Viewport};

/// Half-line `origin + t·direction`, `t ≥ 0`. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Bounding sphere of one interactive body for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickTarget {
    pub id: BodyId,
    pub center: Vec3,
    pub radius: f32,
}

/// Bounding spheres for every interactive body, in scene order.
/// Radii are the visual radius times `pick_scale`.
pub fn pick_targets(graph: &SceneGraph, transforms: &FrameTransforms, pick_scale: f32) -> Vec<PickTarget> {
    let scale = if pick_scale.is_finite() && pick_scale > 0.0 { pick_scale } else { 1.0 };
    graph
        .interactive_bodies()
        .filter_map(|body| {
            let center = transforms.position(body.id)?.as_vec3();
            Some(PickTarget {
                id: body.id,
                center,
                radius: body.visual_radius * scale,
            })
        })
        .collect()
}

/// Viewport pixels to normalized device coordinates.
/// `None` for a degenerate viewport.
pub fn pointer_to_ndc(x: f32, y: f32, viewport: Viewport) -> Option<Vec2> {
    if viewport.is_degenerate() || !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Vec2::new(
        (x / viewport.width) * 2.0 - 1.0,
        -(y / viewport.height) * 2.0 + 1.0,
    ))
}

/// Ray from the camera eye through an NDC point.
pub fn pick_ray(ndc: Vec2, camera: &Camera3D) -> Option<Ray> {
    let inverse = camera.view_projection().inverse();
    if !inverse.is_finite() {
        return None;
    }
    let near = inverse.project_point3(ndc.extend(-1.0));
    let far = inverse.project_point3(ndc.extend(1.0));
    let direction = (far - near).normalize_or_zero();
    if direction == Vec3::ZERO || !direction.is_finite() {
        return None;
    }
    Some(Ray {
        origin: camera.position,
        direction,
    })
}

/// Ray parameter of the first hit with a sphere, if any.
/// A ray starting inside the sphere hits its far side.
pub fn intersect_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let root = disc.sqrt();
    let t1 = -b - root;
    let t2 = -b + root;
    if t1 >= 0.0 {
        Some(t1)
    } else if t2 >= 0.0 {
        Some(t2)
    } else {
        None
    }
}

/// Nearest target hit by `ray`. Exact ties keep the earlier target.
pub fn nearest_hit(ray: &Ray, targets: &[PickTarget]) -> Option<BodyId> {
    let mut best: Option<(f32, BodyId)> = None;
    for target in targets {
        let Some(t) = intersect_sphere(ray, target.center, target.radius) else {
            continue;
        };
        match best {
            Some((best_t, _)) if t >= best_t => {}
            _ => best = Some((t, target.id)),
        }
    }
    best.map(|(_, id)| id)
}

/// Body under the pointer at (x, y) viewport pixels, nearest to the camera.
pub fn pick(x: f32, y: f32, viewport: Viewport, camera: &Camera3D, targets: &[PickTarget]) -> Option<BodyId> {
    let ndc = pointer_to_ndc(x, y, viewport)?;
    let ray = pick_ray(ndc, camera)?;
    nearest_hit(&ray, targets)
}
