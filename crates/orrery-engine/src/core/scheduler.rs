use glam::Vec2;

use crate::api::types::BodyId;
use crate::config::error::ConfigError;
use crate::config::manifest::SceneManifest;
use crate::core::clock::SimulationClock;
use crate::core::kinematics::FrameTransforms;
use crate::core::scene::{OrbitGuide, SceneGraph, ORBIT_GUIDE_SAMPLES};
use crate::extensions::focus::{FocusAnimator, FocusStep};
use crate::input::queue::{InputEvent, InputQueue};
use crate::interaction::picking::{self, PickTarget};
use crate::interaction::selection::{InfoPanel, SelectionState};
use crate::renderer::camera::{Camera3D, Viewport};
use crate::renderer::controls::OrbitControls;
use crate::renderer::instance::RenderBuffer;

/// Lifecycle of a mounted scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Mounted, loop not started.
    Idle,
    Running,
    Stopped,
    /// Torn down. Terminal.
    Disposed,
}

/// What a call to `tick` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Rendered { frame: u64 },
    /// Not running; nothing changed.
    Skipped,
    Disposed,
}

/// Everything a mounted scene owns. Dropped as a whole on dispose.
pub struct SceneContext {
    pub graph: SceneGraph,
    pub transforms: FrameTransforms,
    pub clock: SimulationClock,
    pub camera: Camera3D,
    pub controls: OrbitControls,
    pub focus: FocusAnimator,
    pub selection: SelectionState,
    pub buffer: RenderBuffer,
    pub guides: Vec<OrbitGuide>,
    pub pick_scale: f32,
    pub drag_threshold: f32,
}

impl SceneContext {
    fn new(manifest: &SceneManifest, viewport: Viewport) -> (Self, Vec<ConfigError>) {
        let build = SceneGraph::build(manifest);
        let graph = build.graph;
        let camera = Camera3D::from_descriptor(&manifest.camera, viewport);
        let controls = OrbitControls::new(&camera, &manifest.camera, &manifest.interaction);
        let guides = graph.orbit_guides(ORBIT_GUIDE_SAMPLES);

        let mut ctx = Self {
            transforms: FrameTransforms::new(),
            clock: SimulationClock::new(manifest.interaction.initial_speed),
            camera,
            controls,
            focus: FocusAnimator::from_descriptor(&manifest.camera),
            selection: SelectionState::new(),
            buffer: RenderBuffer::new(),
            guides,
            pick_scale: manifest.interaction.pick_scale,
            drag_threshold: manifest.interaction.drag_threshold.max(0.0),
            graph,
        };
        ctx.transforms.solve(&ctx.graph, 0.0);
        ctx.rebuild_buffer();
        (ctx, build.errors)
    }

    fn pick_targets(&self) -> Vec<PickTarget> {
        picking::pick_targets(&self.graph, &self.transforms, self.pick_scale)
    }

    fn pick_at(&self, at: Vec2, targets: &[PickTarget]) -> Option<BodyId> {
        picking::pick(at.x, at.y, self.camera.viewport, &self.camera, targets)
    }

    fn rebuild_buffer(&mut self) {
        self.buffer.rebuild(
            &self.graph,
            &self.transforms,
            &self.guides,
            self.selection.hovered(),
            self.selection.selected(),
        );
    }
}

/// Press/drag/click tracking for the pointer.
#[derive(Debug, Clone, Copy, Default)]
struct PointerTracker {
    down_at: Option<Vec2>,
    last: Option<Vec2>,
    dragging: bool,
}

/// Drives the per-frame update for one mounted scene.
///
/// The host calls `tick(real_dt)` once per animation frame. Each tick:
/// 1. applies queued control events (speed, auto-rotate, resize)
/// 2. advances the clock and solves every body's transform
/// 3. handles queued pointer events (click → pick → select → focus, drag, wheel)
/// 4. re-evaluates hover at the last pointer position
/// 5. moves the camera (focus transition, else orbit controls)
/// 6. rebuilds the render buffers
///
/// After `dispose` the context is dropped, the input queue is closed and
/// every method is a no-op.
pub struct FrameScheduler {
    state: RunState,
    context: Option<SceneContext>,
    input: InputQueue,
    pointer: PointerTracker,
    overlay: Option<InfoPanel>,
    config_errors: Vec<ConfigError>,
}

impl FrameScheduler {
    /// Build the scene and solve frame zero. The loop starts `Idle`.
    pub fn mount(manifest: &SceneManifest, viewport: Viewport) -> Self {
        let (context, config_errors) = SceneContext::new(manifest, viewport);
        log::info!(
            "scene mounted: {} bodies, {} config errors",
            context.graph.len(),
            config_errors.len()
        );
        Self {
            state: RunState::Idle,
            context: Some(context),
            input: InputQueue::new(),
            pointer: PointerTracker::default(),
            overlay: None,
            config_errors,
        }
    }

    /// Parse a JSON manifest and mount it.
    pub fn from_json(json: &str, viewport: Viewport) -> Result<Self, ConfigError> {
        let manifest = SceneManifest::from_json(json)?;
        Ok(Self::mount(&manifest, viewport))
    }

    pub fn start(&mut self) {
        match self.state {
            RunState::Idle | RunState::Stopped => {
                self.state = RunState::Running;
                log::debug!("frame loop started");
            }
            RunState::Running | RunState::Disposed => {}
        }
    }

    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Stopped;
            log::debug!("frame loop stopped");
        }
    }

    /// Tear down: stop the loop, close input and release the scene.
    pub fn dispose(&mut self) {
        if self.state == RunState::Disposed {
            return;
        }
        self.state = RunState::Disposed;
        self.input.close();
        self.context = None;
        self.overlay = None;
        self.pointer = PointerTracker::default();
        log::info!("scene disposed");
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Queue an input event for the next tick. False once disposed.
    pub fn push_input(&mut self, event: InputEvent) -> bool {
        self.input.push(event)
    }

    /// Recoverable problems found while building the scene.
    pub fn config_errors(&self) -> &[ConfigError] {
        &self.config_errors
    }

    pub fn context(&self) -> Option<&SceneContext> {
        self.context.as_ref()
    }

    /// Overlay payload from the latest selection change, if not yet taken.
    pub fn take_overlay(&mut self) -> Option<InfoPanel> {
        self.overlay.take()
    }

    /// Advance one frame by `real_dt` seconds.
    pub fn tick(&mut self, real_dt: f64) -> FrameStatus {
        match self.state {
            RunState::Disposed => return FrameStatus::Disposed,
            RunState::Idle | RunState::Stopped => return FrameStatus::Skipped,
            RunState::Running => {}
        }
        let Some(ctx) = self.context.as_mut() else {
            return FrameStatus::Disposed;
        };

        let (controls, pointer_events): (Vec<InputEvent>, Vec<InputEvent>) =
            self.input.drain().into_iter().partition(InputEvent::is_control);

        for event in controls {
            apply_control(ctx, event);
        }

        ctx.clock.advance(real_dt);
        ctx.transforms.solve(&ctx.graph, ctx.clock.sim_time());

        let targets = ctx.pick_targets();
        for event in pointer_events {
            if let Some(panel) = handle_pointer(ctx, &mut self.pointer, event, &targets) {
                self.overlay = Some(panel);
            }
        }

        let hovered = self.pointer.last.and_then(|at| ctx.pick_at(at, &targets));
        ctx.selection.set_hover(hovered);

        match ctx.focus.advance(&mut ctx.camera, ctx.clock.real_time()) {
            FocusStep::Idle => {
                ctx.controls.update(real_dt as f32);
                if ctx.controls.take_changed() {
                    ctx.controls.apply(&mut ctx.camera);
                }
            }
            FocusStep::Moving => {}
            FocusStep::Finished => ctx.controls.sync_from(&ctx.camera),
        }

        ctx.rebuild_buffer();
        FrameStatus::Rendered {
            frame: ctx.clock.frame(),
        }
    }
}

impl Drop for FrameScheduler {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn apply_control(ctx: &mut SceneContext, event: InputEvent) {
    match event {
        InputEvent::SetRotationSpeed { value } => ctx.clock.set_multiplier(value),
        InputEvent::ToggleAutoRotate => ctx.controls.toggle_auto_rotate(),
        InputEvent::Resize { width, height } => ctx.camera.resize(width, height),
        _ => {}
    }
}

/// Returns the new overlay payload when a click changed the selection.
fn handle_pointer(
    ctx: &mut SceneContext,
    pointer: &mut PointerTracker,
    event: InputEvent,
    targets: &[PickTarget],
) -> Option<InfoPanel> {
    let transitioning = ctx.focus.is_active();
    match event {
        InputEvent::PointerDown { x, y } => {
            let at = Vec2::new(x, y);
            pointer.down_at = Some(at);
            pointer.last = Some(at);
            pointer.dragging = false;
            None
        }
        InputEvent::PointerMove { x, y } => {
            let at = Vec2::new(x, y);
            if let Some(start) = pointer.down_at {
                if !pointer.dragging && at.distance(start) > ctx.drag_threshold {
                    pointer.dragging = true;
                }
                if pointer.dragging && !transitioning {
                    let delta = at - pointer.last.unwrap_or(start);
                    ctx.controls.orbit(delta.x, delta.y);
                }
            }
            pointer.last = Some(at);
            None
        }
        InputEvent::PointerUp { x, y } => {
            let at = Vec2::new(x, y);
            let was_click = pointer.down_at.take().is_some() && !pointer.dragging;
            pointer.dragging = false;
            pointer.last = Some(at);
            if !was_click {
                return None;
            }
            let hit = ctx.pick_at(at, targets);
            let change = ctx.selection.click(hit, &ctx.graph, &ctx.transforms)?;
            if let Some(request) = change.focus {
                ctx.focus.begin_focus(&ctx.camera, request.position, ctx.clock.real_time());
            }
            Some(change.panel)
        }
        InputEvent::PointerLeave => {
            *pointer = PointerTracker::default();
            None
        }
        InputEvent::Wheel { delta } => {
            if !transitioning {
                ctx.controls.zoom(delta);
            }
            None
        }
        InputEvent::SetRotationSpeed { .. } | InputEvent::ToggleAutoRotate | InputEvent::Resize { .. } => None,
    }
}
