//! Click-to-reveal: the pick controller, its state and its timeline.

mod context;
mod controller;
mod state;
mod timeline;

pub use context::SceneContext;
pub use controller::{PickController, PickOutcome};
pub use state::{RevealPhase, RevealState};
pub use timeline::{Step, Timeline};
