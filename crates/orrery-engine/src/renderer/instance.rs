use bytemuck::{Pod, Zeroable};

use crate::api::types::BodyId;
use crate::core::kinematics::FrameTransforms;
use crate::core::scene::{OrbitGuide, SceneGraph};

/// Highlight bit set on the hovered body.
pub const HIGHLIGHT_HOVERED: u32 = 1;
/// Highlight bit set on the selected body.
pub const HIGHLIGHT_SELECTED: u32 = 2;

/// Per-body render data. 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub radius: f32,
    /// Self-rotation in radians, `[0, 2π)`.
    pub spin: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// `HIGHLIGHT_*` bits, stored as a float.
    pub highlight: f32,
    pub body_id: f32,
    /// `BodyKind::wire()`.
    pub kind: f32,
    pub _pad: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Per-ring render data. Position is always the owner's position for the
/// same frame. 12 floats = 48 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RingInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub tilt: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub opacity: f32,
    /// Owner body.
    pub body_id: f32,
    pub _pad: f32,
}

impl RingInstance {
    pub const FLOATS: usize = 12;
}

/// One point of an orbit guide line. Consecutive vertices with the same
/// `body_id` form one closed loop.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GuideVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub body_id: f32,
}

impl GuideVertex {
    pub const FLOATS: usize = 4;
}

/// Render data for one frame, rebuilt after kinematics and picking.
#[derive(Debug, Clone)]
pub struct RenderBuffer {
    pub bodies: Vec<BodyInstance>,
    pub rings: Vec<RingInstance>,
    pub guides: Vec<GuideVertex>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(16),
            rings: Vec::with_capacity(4),
            guides: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.rings.clear();
        self.guides.clear();
    }

    /// Fill the buffer from the frame's transforms.
    pub fn rebuild(
        &mut self,
        graph: &SceneGraph,
        transforms: &FrameTransforms,
        guides: &[OrbitGuide],
        hovered: Option<BodyId>,
        selected: Option<BodyId>,
    ) {
        self.clear();

        for body in graph.bodies() {
            let Some(pos) = transforms.position(body.id) else {
                continue;
            };
            let pos = pos.as_vec3();
            let mut highlight = 0;
            if hovered == Some(body.id) {
                highlight |= HIGHLIGHT_HOVERED;
            }
            if selected == Some(body.id) {
                highlight |= HIGHLIGHT_SELECTED;
            }
            self.bodies.push(BodyInstance {
                x: pos.x,
                y: pos.y,
                z: pos.z,
                radius: body.visual_radius,
                spin: transforms.spin(body.id).unwrap_or(0.0) as f32,
                r: body.color[0],
                g: body.color[1],
                b: body.color[2],
                highlight: highlight as f32,
                body_id: body.id.0 as f32,
                kind: body.kind.wire(),
                _pad: 0.0,
            });

            if let Some(ring) = &body.ring {
                self.rings.push(RingInstance {
                    x: pos.x,
                    y: pos.y,
                    z: pos.z,
                    inner_radius: ring.inner_radius,
                    outer_radius: ring.outer_radius,
                    tilt: ring.tilt,
                    r: ring.tint[0],
                    g: ring.tint[1],
                    b: ring.tint[2],
                    opacity: ring.opacity,
                    body_id: body.id.0 as f32,
                    _pad: 0.0,
                });
            }
        }

        for guide in guides {
            let Some(origin) = transforms.position(guide.parent) else {
                continue;
            };
            let origin = origin.as_vec3();
            let id = guide.body.0 as f32;
            self.guides.extend(guide.path.iter().map(|p| {
                let w = origin + *p;
                GuideVertex {
                    x: w.x,
                    y: w.y,
                    z: w.z,
                    body_id: id,
                }
            }));
        }
    }

    pub fn body_count(&self) -> u32 {
        self.bodies.len() as u32
    }

    pub fn ring_count(&self) -> u32 {
        self.rings.len() as u32
    }

    pub fn guide_vertex_count(&self) -> u32 {
        self.guides.len() as u32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
