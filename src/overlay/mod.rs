//! The overlay that frames the portfolio page above the scene.
//!
//! Two stacked panels: a full-screen background dimmer and a centered
//! content frame. The pick controller drives them through [`OverlayView`];
//! [`OverlayPanels`] is the headless implementation that tracks the
//! transitions on the logical clock, and the `web` feature adds a DOM one.

mod panels;

use std::time::Duration;

pub use panels::{OverlayPanels, PanelSample};

/// One of the two overlay layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Full-screen dimmer behind the content.
    Background,
    /// Centered frame hosting the page.
    Content,
}

impl Panel {
    /// Both panels, back to front.
    pub const ALL: [Panel; 2] = [Panel::Background, Panel::Content];

    /// Lower-case name used in logs and element ids.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Content => "content",
        }
    }
}

/// Transform applied to a panel around its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelTransform {
    /// Uniform scale factor.
    pub scale: f32,
}

impl PanelTransform {
    /// The untransformed panel.
    pub const IDENTITY: Self = Self { scale: 1.0 };

    /// Uniform scale by `scale`.
    #[must_use]
    pub fn scale(scale: f32) -> Self {
        Self { scale }
    }
}

impl Default for PanelTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Sink for overlay changes.
///
/// Each call is stamped with the logical time it takes effect. Opacity and
/// transform changes transition over the panel's configured duration;
/// visibility changes (joining or leaving the render tree) are immediate.
pub trait OverlayView {
    /// Add `panel` to (or remove it from) the render tree.
    fn set_visible(&mut self, panel: Panel, visible: bool, at: Duration);

    /// Start transitioning `panel` toward `opacity`.
    fn set_opacity(&mut self, panel: Panel, opacity: f32, at: Duration);

    /// Start transitioning `panel` toward `transform`.
    fn set_transform(
        &mut self,
        panel: Panel,
        transform: PanelTransform,
        at: Duration,
    );
}
