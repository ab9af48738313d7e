use glam::Vec3;
use serde::Serialize;

use crate::api::types::{BodyId, BodyKind};
use crate::core::kinematics::FrameTransforms;
use crate::core::scene::SceneGraph;

/// Click-driven selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected(BodyId),
}

impl Selection {
    /// Next state after a click that hit `hit` (or nothing).
    ///
    /// Clicking the selected body toggles it off, clicking another body
    /// replaces it in one step, and clicking empty space clears.
    pub fn on_click(self, hit: Option<BodyId>) -> Selection {
        match (self, hit) {
            (Selection::Selected(current), Some(id)) if current == id => Selection::Idle,
            (_, Some(id)) => Selection::Selected(id),
            (_, None) => Selection::Idle,
        }
    }

    pub fn selected(self) -> Option<BodyId> {
        match self {
            Selection::Selected(id) => Some(id),
            Selection::Idle => None,
        }
    }
}

/// Payload for the host's info overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoPanel {
    pub visible: bool,
    pub title: String,
    /// Ordered `(label, value)` pairs.
    pub fields: Vec<(String, String)>,
}

impl InfoPanel {
    pub fn hidden() -> Self {
        Self {
            visible: false,
            title: String::new(),
            fields: Vec::new(),
        }
    }

    /// Facts about a body, taken from its configuration only, so they read
    /// the same wherever the body is on its orbit.
    pub fn for_body(graph: &SceneGraph, id: BodyId) -> Self {
        let Some(body) = graph.body(id) else {
            return Self::hidden();
        };
        let units = graph.units();
        let labels = graph.labels();
        let mut fields = Vec::with_capacity(4);

        match body.kind {
            BodyKind::Star => {}
            BodyKind::Planet => fields.push((
                labels.distance_from_star.clone(),
                with_unit(body.elements.a, &units.distance),
            )),
            BodyKind::Satellite => fields.push((
                labels.distance_from_parent.clone(),
                with_unit(body.elements.a, &units.distance),
            )),
        }
        fields.push((labels.diameter.clone(), with_unit(body.diameter() as f64, &units.size)));
        if let Some(period) = body.motion.period() {
            fields.push((labels.period.clone(), with_unit(period, &units.time)));
        }
        let e = body.elements.clamped_e();
        if e > 0.0 {
            fields.push((labels.eccentricity.clone(), format_number(e)));
        }

        Self {
            visible: true,
            title: body.name.clone(),
            fields,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Camera focus request emitted when a body becomes selected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusRequest {
    pub body: BodyId,
    /// World position of the body at the moment of selection.
    pub position: Vec3,
}

/// What a selection change produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionChange {
    pub selection: Selection,
    pub panel: InfoPanel,
    pub focus: Option<FocusRequest>,
}

/// Selection plus the independently tracked hover.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selection: Selection,
    hovered: Option<BodyId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selection.selected()
    }

    pub fn hovered(&self) -> Option<BodyId> {
        self.hovered
    }

    /// Apply a click. Returns `None` when the state did not change
    /// (a click on empty space while idle).
    pub fn click(
        &mut self,
        hit: Option<BodyId>,
        graph: &SceneGraph,
        transforms: &FrameTransforms,
    ) -> Option<SelectionChange> {
        let next = self.selection.on_click(hit);
        if next == self.selection {
            return None;
        }
        self.selection = next;
        log::debug!("selection: {next:?}");
        let change = match next {
            Selection::Idle => SelectionChange {
                selection: next,
                panel: InfoPanel::hidden(),
                focus: None,
            },
            Selection::Selected(id) => SelectionChange {
                selection: next,
                panel: InfoPanel::for_body(graph, id),
                focus: transforms.position(id).map(|p| FocusRequest {
                    body: id,
                    position: p.as_vec3(),
                }),
            },
        };
        Some(change)
    }

    /// Update hover. Returns true if it changed.
    pub fn set_hover(&mut self, hovered: Option<BodyId>) -> bool {
        let changed = self.hovered != hovered;
        self.hovered = hovered;
        changed
    }
}

fn with_unit(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format_number(value)
    } else {
        format!("{} {}", format_number(value), unit)
    }
}

/// Up to three decimals, trailing zeros dropped.
fn format_number(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
