pub mod runner;

pub use orrery_engine;
pub use runner::SceneRunner;

/// Generate all `#[wasm_bindgen]` exports for a scene demo.
///
/// Generates:
/// - `thread_local!` storage for the SceneRunner
/// - `with_runner()`, which is a no-op returning `None` when nothing is mounted
/// - lifecycle exports (`scene_mount`, `scene_start`, `scene_stop`, `scene_dispose`, `scene_tick`)
/// - input exports (pointer, wheel, rotation speed, auto-rotate, resize)
/// - frame and overlay accessors
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod scenes;
///
/// orrery_web::export_scene!("solar-system", scenes::manifest);
/// ```
///
/// # Arguments
///
/// - `$scene_name`: A string literal used in log messages
/// - `$manifests`: A `fn(&str) -> Option<&'static str>` resolving a preset name to manifest JSON
#[macro_export]
macro_rules! export_scene {
    ($scene_name:literal, $manifests:path) => {
        use std::cell::RefCell;
        use $crate::orrery_engine::InputEvent;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SceneRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SceneRunner) -> R) -> Option<R> {
            RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
        }

        /// Mount a preset. Replaces (and disposes) any mounted scene.
        /// Returns false if the preset name is unknown.
        #[wasm_bindgen]
        pub fn scene_mount(preset: &str, width: f32, height: f32) -> bool {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let Some(json) = $manifests(preset) else {
                log::error!("{}: unknown preset `{}`", $scene_name, preset);
                return false;
            };
            let runner = $crate::SceneRunner::from_manifest_json(json, width, height);

            RUNNER.with(|cell| {
                let mut slot = cell.borrow_mut();
                if let Some(old) = slot.as_mut() {
                    old.dispose();
                }
                *slot = Some(runner);
            });
            log::info!("{}: mounted `{}`", $scene_name, preset);
            true
        }

        #[wasm_bindgen]
        pub fn scene_start() {
            with_runner(|r| r.start());
        }

        #[wasm_bindgen]
        pub fn scene_stop() {
            with_runner(|r| r.stop());
        }

        /// Tear down the scene. Later calls to any export are no-ops.
        #[wasm_bindgen]
        pub fn scene_dispose() {
            RUNNER.with(|cell| {
                if let Some(mut runner) = cell.borrow_mut().take() {
                    runner.dispose();
                }
            });
        }

        #[wasm_bindgen]
        pub fn scene_tick(dt: f64) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_leave() {
            with_runner(|r| r.push_input(InputEvent::PointerLeave));
        }

        #[wasm_bindgen]
        pub fn scene_wheel(delta: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta }));
        }

        /// Rotation-speed slider, 0..=1.
        #[wasm_bindgen]
        pub fn scene_set_rotation_speed(value: f64) {
            with_runner(|r| r.push_input(InputEvent::SetRotationSpeed { value }));
        }

        #[wasm_bindgen]
        pub fn scene_toggle_auto_rotate() {
            with_runner(|r| r.push_input(InputEvent::ToggleAutoRotate));
        }

        #[wasm_bindgen]
        pub fn scene_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_frame_len() -> u32 {
            with_runner(|r| r.frame_len()).unwrap_or(0)
        }

        /// Overlay JSON from the latest selection change, once.
        #[wasm_bindgen]
        pub fn scene_take_overlay() -> Option<String> {
            with_runner(|r| r.take_overlay_json()).flatten()
        }
    };
}
