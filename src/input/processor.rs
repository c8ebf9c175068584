//! Converts raw platform events into controller commands.
//!
//! The `InputProcessor` owns all transient input state (mouse tracking,
//! drag detection, modifier keys) and the key-binding map. It is the only
//! thing that sits between raw window/DOM events and
//! [`PickController::execute`](crate::reveal::PickController::execute).

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use super::mouse::{ClickResult, InputState};
use crate::command::VitrineCommand;
use crate::options::KeybindingOptions;
use crate::scene::Viewport;

/// Converts raw input events into [`VitrineCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     controller.execute(cmd, now);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("Escape") {
///     controller.execute(cmd, now);
/// }
/// ```
#[derive(Debug)]
pub struct InputProcessor {
    /// Mouse tracking and drag detection.
    state: InputState,
    /// Whether the primary mouse button is currently held.
    mouse_pressed: bool,
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            state: InputState::new(),
            mouse_pressed: false,
            shift_pressed: false,
            key_bindings,
        }
    }

    /// Current cursor position in viewport pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> (f32, f32) {
        self.state.mouse_pos
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Look up a key press and return the corresponding command, if bound.
    ///
    /// Key strings use the DOM `KeyboardEvent.code` format: `"Escape"`,
    /// `"KeyQ"`, etc.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<VitrineCommand> {
        self.key_bindings.lookup(key).map(KeyAction::to_command)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<VitrineCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => Some(VitrineCommand::Zoom { delta }),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
            InputEvent::Resized {
                width,
                height,
                scale_factor,
            } => Some(VitrineCommand::Resize(Viewport::new(
                width,
                height,
                scale_factor,
            ))),
        }
    }

    /// Cursor moved: compute delta, possibly produce a camera command.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<VitrineCommand> {
        let (delta_x, delta_y) = self.state.handle_mouse_position(x, y);

        if !self.mouse_pressed || !self.state.is_dragging() {
            return None;
        }
        let delta = Vec2::new(delta_x, delta_y);
        if self.shift_pressed {
            Some(VitrineCommand::PanCamera { delta })
        } else {
            Some(VitrineCommand::RotateCamera { delta })
        }
    }

    /// Mouse button press/release: a release without a drag is a pick.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<VitrineCommand> {
        if button != MouseButton::Left {
            return None;
        }

        if pressed {
            self.state.handle_mouse_down();
            self.mouse_pressed = true;
            return None;
        }

        self.mouse_pressed = false;
        match self.state.process_mouse_up() {
            ClickResult::NoAction => None,
            ClickResult::Click { x, y } => Some(VitrineCommand::Pick { x, y }),
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(processor: &mut InputProcessor, x: f32, y: f32) -> Option<VitrineCommand> {
        let _ = processor.handle_event(InputEvent::CursorMoved { x, y });
        let _ = processor.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        processor.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        })
    }

    #[test]
    fn click_becomes_pick() {
        let mut processor = InputProcessor::new();
        assert_eq!(
            click(&mut processor, 960.0, 540.0),
            Some(VitrineCommand::Pick { x: 960.0, y: 540.0 })
        );
    }

    #[test]
    fn right_click_is_ignored() {
        let mut processor = InputProcessor::new();
        let cmd = processor.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: false,
        });
        assert_eq!(cmd, None);
    }

    #[test]
    fn drag_rotates_and_suppresses_pick() {
        let mut processor = InputProcessor::new();
        let _ = processor.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 });
        let _ = processor.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        let cmd = processor.handle_event(InputEvent::CursorMoved { x: 30.0, y: 0.0 });
        assert_eq!(
            cmd,
            Some(VitrineCommand::RotateCamera {
                delta: Vec2::new(30.0, 0.0)
            })
        );
        let up = processor.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        });
        assert_eq!(up, None);
    }

    #[test]
    fn shift_drag_pans() {
        let mut processor = InputProcessor::new();
        let _ = processor.handle_event(InputEvent::ModifiersChanged { shift: true });
        let _ = processor.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        let cmd = processor.handle_event(InputEvent::CursorMoved { x: 0.0, y: 20.0 });
        assert!(matches!(cmd, Some(VitrineCommand::PanCamera { .. })));
    }

    #[test]
    fn escape_maps_to_cancel() {
        let processor = InputProcessor::new();
        assert_eq!(
            processor.handle_key_press("Escape"),
            Some(VitrineCommand::Cancel)
        );
        assert_eq!(processor.handle_key_press("Enter"), None);
    }

    #[test]
    fn resize_carries_viewport() {
        let mut processor = InputProcessor::new();
        let cmd = processor.handle_event(InputEvent::Resized {
            width: 800,
            height: 600,
            scale_factor: 3.0,
        });
        assert_eq!(
            cmd,
            Some(VitrineCommand::Resize(Viewport::new(800, 600, 3.0)))
        );
    }
}
