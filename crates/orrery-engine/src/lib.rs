pub mod api;
pub mod core;
pub mod components;
pub mod config;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod interaction;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::types::{BodyId, BodyKind};
pub use components::{Background, CelestialBody, RingSpec};
pub use config::{ConfigError, SceneManifest};
pub use core::clock::SimulationClock;
pub use core::kinematics::{FrameTransforms, MotionModel, OrbitalElements};
pub use core::scene::{SceneBuild, SceneGraph};
pub use core::scheduler::{FrameScheduler, FrameStatus, RunState, SceneContext};
pub use input::queue::{InputEvent, InputQueue};
pub use interaction::selection::{InfoPanel, Selection, SelectionState};
pub use renderer::camera::{Camera3D, Viewport};
pub use renderer::controls::OrbitControls;
pub use renderer::instance::{BodyInstance, RenderBuffer, RingInstance};
pub use bridge::protocol::{pack_frame, FrameHeader, FrameLayout};
pub use extensions::{Easing, FocusAnimator};
