/// Where the overlay is in its show/hide lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealPhase {
    /// Overlay hidden, camera free.
    #[default]
    Idle,
    /// Panels displayed and fading in.
    Showing,
    /// Fully shown.
    Shown,
    /// Fading out; panels leave the render tree on their own schedule.
    Hiding,
}

impl RevealPhase {
    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Showing | Self::Hiding)
    }
}

/// The controller's view of the reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealState {
    /// The overlay is shown or on its way to shown.
    pub is_revealed: bool,
    /// Name of the node whose pick opens the overlay.
    pub target_name: String,
    /// Mirror of the provider's orbit controls switch.
    pub camera_control_enabled: bool,
    /// Lifecycle phase.
    pub phase: RevealPhase,
}

impl RevealState {
    /// Unrevealed state for `target_name`.
    #[must_use]
    pub fn new(target_name: impl Into<String>) -> Self {
        Self {
            is_revealed: false,
            target_name: target_name.into(),
            camera_control_enabled: true,
            phase: RevealPhase::Idle,
        }
    }
}
