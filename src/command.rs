//! The controller's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a mouse
//! gesture, or a scripted session, is represented as a `VitrineCommand`.
//! Consumers pass commands to
//! [`PickController::execute`](crate::reveal::PickController::execute).

use glam::Vec2;

use crate::scene::Viewport;

/// A discrete operation on the scene or the reveal overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VitrineCommand {
    /// Primary click at a screen position, in viewport pixels.
    Pick {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Dismiss the overlay if it is shown.
    Cancel,
    /// Orbit the camera by a drag delta.
    RotateCamera {
        /// Screen-space drag delta in pixels.
        delta: Vec2,
    },
    /// Pan the orbit target by a drag delta.
    PanCamera {
        /// Screen-space drag delta in pixels.
        delta: Vec2,
    },
    /// Dolly the camera (positive = toward the target).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },
    /// Put the camera back at the preset position.
    ResetCamera,
    /// The output surface changed size or density.
    Resize(Viewport),
}
