pub mod background;
pub mod body;
pub mod ring;

pub use background::Background;
pub use body::CelestialBody;
pub use ring::RingSpec;
