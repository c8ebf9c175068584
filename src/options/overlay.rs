use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

/// When camera controls come back after the overlay is dismissed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ControlRestore {
    /// Re-enable as soon as the hide transition starts.
    #[default]
    OnHideStart,
    /// Re-enable once both panels have left the render tree.
    OnHideComplete,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Overlay", inline)]
#[serde(default)]
/// Pick target and reveal-overlay timing.
pub struct OverlayOptions {
    /// Name of the mesh node that opens the overlay when clicked.
    #[schemars(skip)]
    pub target_name: String,
    /// Page shown in the overlay iframe.
    #[schemars(skip)]
    pub iframe_url: String,
    /// Background dimmer opacity transition, in milliseconds.
    #[schemars(title = "Background Fade (ms)", range(min = 0, max = 2000))]
    pub background_fade_ms: u64,
    /// Content panel opacity/scale transition, in milliseconds.
    #[schemars(title = "Content Fade (ms)", range(min = 0, max = 2000))]
    pub content_fade_ms: u64,
    /// Delay before the content panel leaves the render tree on hide.
    #[schemars(skip)]
    pub content_hide_ms: u64,
    /// Delay before the background leaves the render tree on hide.
    #[schemars(skip)]
    pub background_hide_ms: u64,
    /// Delay between displaying the panels and starting their fade-in.
    #[schemars(skip)]
    pub show_delay_ms: u64,
    /// Content panel scale while hidden.
    #[schemars(title = "Content Start Scale", range(min = 0.5, max = 1.0), extend("step" = 0.01))]
    pub content_start_scale: f32,
    /// Timing curve for both panels.
    #[schemars(skip)]
    pub easing: EasingFunction,
    /// When camera controls are re-enabled after a dismiss.
    #[schemars(title = "Restore Controls")]
    pub restore_controls: ControlRestore,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            target_name: "scheibe".into(),
            iframe_url: "portfolio/index.html".into(),
            background_fade_ms: 500,
            content_fade_ms: 400,
            content_hide_ms: 300,
            background_hide_ms: 500,
            show_delay_ms: 0,
            content_start_scale: 0.9,
            easing: EasingFunction::Ease,
            restore_controls: ControlRestore::OnHideStart,
        }
    }
}

impl OverlayOptions {
    /// Background fade duration.
    #[must_use]
    pub fn background_fade(&self) -> Duration {
        Duration::from_millis(self.background_fade_ms)
    }

    /// Content fade duration.
    #[must_use]
    pub fn content_fade(&self) -> Duration {
        Duration::from_millis(self.content_fade_ms)
    }

    /// Time from hide start until the content panel is removed.
    #[must_use]
    pub fn content_hide(&self) -> Duration {
        Duration::from_millis(self.content_hide_ms)
    }

    /// Time from hide start until the background panel is removed.
    #[must_use]
    pub fn background_hide(&self) -> Duration {
        Duration::from_millis(self.background_hide_ms)
    }

    /// Time from show start until the fade-in targets are applied.
    #[must_use]
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }

    /// Time from fade-in start until both panels have settled.
    #[must_use]
    pub fn show_settle(&self) -> Duration {
        self.background_fade().max(self.content_fade())
    }

    /// Time from hide start until both panels are gone.
    #[must_use]
    pub fn hide_settle(&self) -> Duration {
        self.background_hide().max(self.content_hide())
    }
}
