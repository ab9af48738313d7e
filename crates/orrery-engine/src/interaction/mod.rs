pub mod picking;
pub mod selection;

pub use picking::{pick, PickTarget, Ray};
pub use selection::{FocusRequest, InfoPanel, Selection, SelectionChange, SelectionState};
