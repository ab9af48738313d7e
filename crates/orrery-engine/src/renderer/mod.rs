pub mod camera;
pub mod controls;
pub mod instance;

// Re-export key types for convenient access
pub use camera::{Camera3D, Viewport};
pub use controls::OrbitControls;
pub use instance::{BodyInstance, GuideVertex, RenderBuffer, RingInstance};
