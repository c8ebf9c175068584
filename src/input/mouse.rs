/// Pointer travel (squared pixels) beyond which a press becomes a drag.
const DRAG_THRESHOLD_SQ: f32 = 9.0;

/// Result of processing a mouse-up event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ClickResult {
    /// The press turned into a drag, or there was no matching press.
    NoAction,
    /// Press and release without significant movement.
    Click {
        /// Release position, horizontal.
        x: f32,
        /// Release position, vertical.
        y: f32,
    },
}

/// Tracks mouse position and press/drag state for the primary button.
#[derive(Debug, Default)]
pub(crate) struct InputState {
    pub(crate) mouse_pos: (f32, f32),
    press_pos: Option<(f32, f32)>,
    is_dragging: bool,
}

impl InputState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Update cursor position and return the delta since the last one.
    pub(crate) fn handle_mouse_position(&mut self, x: f32, y: f32) -> (f32, f32) {
        let delta = (x - self.mouse_pos.0, y - self.mouse_pos.1);
        self.mouse_pos = (x, y);

        if let Some((px, py)) = self.press_pos {
            let (dx, dy) = (x - px, y - py);
            if dx * dx + dy * dy > DRAG_THRESHOLD_SQ {
                self.is_dragging = true;
            }
        }
        delta
    }

    /// Record where the primary button went down.
    pub(crate) fn handle_mouse_down(&mut self) {
        self.press_pos = Some(self.mouse_pos);
        self.is_dragging = false;
    }

    /// Whether the current press has moved far enough to count as a drag.
    pub(crate) fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Process a mouse-up event and return what kind of click happened.
    pub(crate) fn process_mouse_up(&mut self) -> ClickResult {
        let pressed = self.press_pos.take();
        let was_dragging = std::mem::take(&mut self.is_dragging);

        match pressed {
            Some(_) if !was_dragging => ClickResult::Click {
                x: self.mouse_pos.0,
                y: self.mouse_pos.1,
            },
            _ => ClickResult::NoAction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_release_in_place_is_a_click() {
        let mut state = InputState::new();
        let _ = state.handle_mouse_position(100.0, 50.0);
        state.handle_mouse_down();
        let _ = state.handle_mouse_position(101.0, 51.0);
        assert_eq!(
            state.process_mouse_up(),
            ClickResult::Click { x: 101.0, y: 51.0 }
        );
    }

    #[test]
    fn drag_is_not_a_click() {
        let mut state = InputState::new();
        state.handle_mouse_down();
        let _ = state.handle_mouse_position(40.0, 0.0);
        assert!(state.is_dragging());
        assert_eq!(state.process_mouse_up(), ClickResult::NoAction);
        assert!(!state.is_dragging());
    }

    #[test]
    fn release_without_press_does_nothing() {
        let mut state = InputState::new();
        assert_eq!(state.process_mouse_up(), ClickResult::NoAction);
    }
}
