use orrery_engine::{
    pack_frame, FrameLayout, FrameScheduler, FrameStatus, InputEvent, RunState, SceneManifest, Viewport,
};

/// Wires a `FrameScheduler` to the browser.
///
/// Each demo keeps one `SceneRunner` in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]` (see `export_scene!`). After every tick
/// the frame is packed into a flat f32 buffer the host reads by pointer.
pub struct SceneRunner {
    scheduler: FrameScheduler,
    frame: Vec<f32>,
    layout: Option<FrameLayout>,
    /// Latest overlay payload as JSON, until the host takes it.
    overlay_json: Option<String>,
}

impl SceneRunner {
    pub fn new(scheduler: FrameScheduler) -> Self {
        let mut runner = Self {
            scheduler,
            frame: Vec::new(),
            layout: None,
            overlay_json: None,
        };
        runner.repack();
        runner
    }

    /// Mount a scene from manifest JSON.
    ///
    /// A manifest that does not parse still mounts: the error is logged and
    /// an empty scene with just a default star is shown instead.
    pub fn from_manifest_json(json: &str, width: f32, height: f32) -> Self {
        let viewport = Viewport::new(width, height);
        let scheduler = match FrameScheduler::from_json(json, viewport) {
            Ok(scheduler) => scheduler,
            Err(err) => {
                log::error!("{err}; mounting an empty scene");
                FrameScheduler::mount(&SceneManifest::default(), viewport)
            }
        };
        for err in scheduler.config_errors() {
            log::warn!("{err}");
        }
        Self::new(scheduler)
    }

    pub fn start(&mut self) {
        self.scheduler.start();
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Release the scene. The frame buffer is emptied.
    pub fn dispose(&mut self) {
        self.scheduler.dispose();
        self.frame.clear();
        self.layout = None;
        self.overlay_json = None;
    }

    pub fn state(&self) -> RunState {
        self.scheduler.state()
    }

    pub fn push_input(&mut self, event: InputEvent) -> bool {
        self.scheduler.push_input(event)
    }

    /// Run one frame and repack the shared buffer.
    pub fn tick(&mut self, dt: f64) -> FrameStatus {
        let status = self.scheduler.tick(dt);
        if let FrameStatus::Rendered { .. } = status {
            self.repack();
            if let Some(panel) = self.scheduler.take_overlay() {
                self.overlay_json = Some(panel.to_json());
            }
        }
        status
    }

    pub fn take_overlay_json(&mut self) -> Option<String> {
        self.overlay_json.take()
    }

    fn repack(&mut self) {
        self.layout = self.scheduler.context().map(|ctx| pack_frame(ctx, &mut self.frame));
    }

    // ---- Pointer accessors for host buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame.len() as u32
    }

    pub fn layout(&self) -> Option<FrameLayout> {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparsable_manifest_mounts_default_star() {
        let mut runner = SceneRunner::from_manifest_json("{ not json", 800.0, 600.0);
        assert_eq!(runner.state(), RunState::Idle);
        let layout = runner.layout().unwrap();
        assert_eq!(runner.frame_len() as usize, layout.total_floats);
        // One body: the star.
        assert_eq!(layout.rings_offset - layout.bodies_offset, 12);
        runner.start();
        assert!(matches!(runner.tick(0.016), FrameStatus::Rendered { .. }));
    }

    #[test]
    fn click_on_star_publishes_overlay_json() {
        let json = r#"{ "star": { "name": "Soleil", "visual_radius": 3.0 },
                        "camera": { "position": [0, 0, 20], "auto_rotate": false } }"#;
        let mut runner = SceneRunner::from_manifest_json(json, 800.0, 600.0);
        runner.start();
        runner.push_input(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        runner.push_input(InputEvent::PointerUp { x: 400.0, y: 300.0 });
        runner.tick(0.016);
        let overlay = runner.take_overlay_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&overlay).unwrap();
        assert_eq!(value["visible"], true);
        assert_eq!(value["title"], "Soleil");
        assert_eq!(value["fields"][0][0], "Diameter");
        assert!(runner.take_overlay_json().is_none());
    }

    #[test]
    fn dispose_empties_the_frame() {
        let mut runner = SceneRunner::from_manifest_json("{}", 800.0, 600.0);
        runner.start();
        runner.tick(0.016);
        runner.dispose();
        assert_eq!(runner.frame_len(), 0);
        assert!(!runner.push_input(InputEvent::PointerLeave));
        assert_eq!(runner.tick(0.016), FrameStatus::Disposed);
        assert!(runner.layout().is_none());
    }
}
