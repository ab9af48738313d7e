//! Frame buffer layout shared with the host renderer.
//! Must stay in sync with the host's `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [View-projection matrix: 16 floats, column-major]
//! [Bodies: body_count × 12 floats]
//! [Rings: ring_count × 12 floats]
//! [Guides: guide_vertex_count × 4 floats]
//! [Stars: star_count × 3 floats]
//! ```
//!
//! Counts are written into the header every frame; the host computes
//! section offsets from them.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use crate::api::types::BodyId;
use crate::components::background::Background;
use crate::core::scheduler::SceneContext;
use crate::renderer::instance::{BodyInstance, GuideVertex, RingInstance};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;
/// Floats in the view-projection section.
pub const MATRIX_FLOATS: usize = 16;
/// Floats per background star: x, y, z.
pub const STAR_FLOATS: usize = 3;

/// The header's frame counter wraps here. f32 holds every integer below 2^24
/// exactly, so the host sees a strictly increasing value for ~77 h at 60 fps.
pub const FRAME_WRAP: u64 = 1 << 24;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Background kind tags.
pub const BACKGROUND_NONE: f32 = 0.0;
pub const BACKGROUND_SPHERE: f32 = 1.0;
pub const BACKGROUND_STARFIELD: f32 = 2.0;

/// Frame header. Field order is the wire order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameHeader {
    pub protocol_version: f32,
    /// Frame number modulo `FRAME_WRAP`.
    pub frame: f32,
    pub body_count: f32,
    pub ring_count: f32,
    pub guide_vertex_count: f32,
    pub star_count: f32,
    /// `BodyId::NONE_WIRE` when nothing is selected.
    pub selected: f32,
    pub hovered: f32,
    pub sim_time: f32,
    pub multiplier: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub background_kind: f32,
    pub background_radius: f32,
    /// 1.0 while a focus transition owns the camera.
    pub transitioning: f32,
    pub _pad: f32,
}

const _: () = assert!(std::mem::size_of::<FrameHeader>() == HEADER_FLOATS * 4);

/// Offsets of each section, in floats, for a given header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameLayout {
    pub matrix_offset: usize,
    pub bodies_offset: usize,
    pub rings_offset: usize,
    pub guides_offset: usize,
    pub stars_offset: usize,
    pub total_floats: usize,
}

impl FrameLayout {
    pub fn new(bodies: usize, rings: usize, guide_vertices: usize, stars: usize) -> Self {
        let matrix_offset = HEADER_FLOATS;
        let bodies_offset = matrix_offset + MATRIX_FLOATS;
        let rings_offset = bodies_offset + bodies * BodyInstance::FLOATS;
        let guides_offset = rings_offset + rings * RingInstance::FLOATS;
        let stars_offset = guides_offset + guide_vertices * GuideVertex::FLOATS;
        let total_floats = stars_offset + stars * STAR_FLOATS;
        Self {
            matrix_offset,
            bodies_offset,
            rings_offset,
            guides_offset,
            stars_offset,
            total_floats,
        }
    }
}

/// Serialize the context's current frame into `out` (cleared first).
pub fn pack_frame(ctx: &SceneContext, out: &mut Vec<f32>) -> FrameLayout {
    let buffer = &ctx.buffer;
    let background = ctx.graph.background();
    let stars = background.stars();
    let layout = FrameLayout::new(buffer.bodies.len(), buffer.rings.len(), buffer.guides.len(), stars.len());

    let header = FrameHeader {
        protocol_version: PROTOCOL_VERSION,
        frame: frame_wire(ctx.clock.frame()),
        body_count: buffer.bodies.len() as f32,
        ring_count: buffer.rings.len() as f32,
        guide_vertex_count: buffer.guides.len() as f32,
        star_count: stars.len() as f32,
        selected: BodyId::to_wire(ctx.selection.selected()),
        hovered: BodyId::to_wire(ctx.selection.hovered()),
        sim_time: ctx.clock.sim_time() as f32,
        multiplier: ctx.clock.multiplier() as f32,
        viewport_width: ctx.camera.viewport.width,
        viewport_height: ctx.camera.viewport.height,
        background_kind: background_kind(background),
        background_radius: background.radius(),
        transitioning: if ctx.focus.is_active() { 1.0 } else { 0.0 },
        _pad: 0.0,
    };

    out.clear();
    out.reserve(layout.total_floats);
    out.extend_from_slice(bytemuck::cast_slice(&[header]));
    out.extend_from_slice(&view_proj_floats(ctx.camera.view_projection()));
    out.extend_from_slice(bytemuck::cast_slice(&buffer.bodies));
    out.extend_from_slice(bytemuck::cast_slice(&buffer.rings));
    out.extend_from_slice(bytemuck::cast_slice(&buffer.guides));
    for star in stars {
        out.extend_from_slice(&star.to_array());
    }
    layout
}

fn frame_wire(frame: u64) -> f32 {
    (frame % FRAME_WRAP) as f32
}

fn view_proj_floats(m: Mat4) -> [f32; MATRIX_FLOATS] {
    m.to_cols_array()
}

fn background_kind(bg: &Background) -> f32 {
    match bg {
        Background::None => BACKGROUND_NONE,
        Background::Sphere { .. } => BACKGROUND_SPHERE,
        Background::Starfield { .. } => BACKGROUND_STARFIELD,
    }
}
