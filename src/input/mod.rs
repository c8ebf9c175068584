//! Input handling: event types, drag detection, and the input processor
//! that converts raw window/DOM events into controller commands.

/// Platform-agnostic input events.
pub mod event;
/// Key-bindable actions.
pub mod keyboard;
/// Press/drag state machine and mouse position tracking.
pub(crate) mod mouse;
/// Converts raw events into controller commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
