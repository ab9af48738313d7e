pub mod error;
pub mod manifest;

pub use error::ConfigError;
pub use manifest::{
    SceneManifest, StarDescriptor, BodyDescriptor, BodyEntry, OrbitDescriptor, MotionDescriptor,
    RingDescriptor, BackgroundDescriptor, CameraDescriptor, InteractionDescriptor,
    UnitsDescriptor, LabelsDescriptor,
};
