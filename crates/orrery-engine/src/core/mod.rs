pub mod clock;
pub mod kinematics;
pub mod scene;
pub mod scheduler;

pub use clock::SimulationClock;
pub use kinematics::{FrameTransforms, MotionModel, OrbitalElements};
pub use scene::{OrbitGuide, SceneBuild, SceneGraph};
pub use scheduler::{FrameScheduler, FrameStatus, RunState, SceneContext};
