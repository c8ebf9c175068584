use serde::{Deserialize, Serialize};

use crate::command::VitrineCommand;

/// Actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// cancel = "Escape"
/// reset_camera = "KeyQ"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Dismiss the reveal overlay.
    Cancel,
    /// Return the camera to the preset position.
    ResetCamera,
}

impl KeyAction {
    /// The parameterless command this action stands for.
    #[must_use]
    pub fn to_command(self) -> VitrineCommand {
        match self {
            Self::Cancel => VitrineCommand::Cancel,
            Self::ResetCamera => VitrineCommand::ResetCamera,
        }
    }
}
