// extensions/mod.rs
//
// Camera animation helpers, kept apart from the scene graph.
// The scheduler opts in by owning a FocusAnimator.

pub mod easing;
pub mod focus;

pub use easing::{ease_vec3, lerp, lerp_vec3, Easing};
pub use focus::{CameraTransition, FocusAnimator, FocusStep};
