use std::time::Duration;

use super::{OverlayView, Panel, PanelTransform};
use crate::options::OverlayOptions;
use crate::util::easing::EasingFunction;

/// A scalar property moving from one value to another.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween {
    from: f32,
    to: f32,
    start: Duration,
    duration: Duration,
    easing: EasingFunction,
}

impl Tween {
    fn fixed(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            start: Duration::ZERO,
            duration: Duration::ZERO,
            easing: EasingFunction::Linear,
        }
    }

    /// Linear progress in 0..=1 at `now`.
    #[inline]
    fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return if now >= self.start { 1.0 } else { 0.0 };
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn value_at(&self, now: Duration) -> f32 {
        let progress = self.progress(now);
        if progress >= 1.0 {
            return self.to;
        }
        let t = self.easing.evaluate(progress);
        self.from + (self.to - self.from) * t
    }

    /// Head for `to`, starting from wherever the property is at `at`.
    fn retarget(&mut self, to: f32, at: Duration, duration: Duration) {
        *self = Self {
            from: self.value_at(at),
            to,
            start: at,
            duration,
            easing: self.easing,
        };
    }
}

#[derive(Debug, Clone)]
struct PanelState {
    displayed: bool,
    display_changed: Duration,
    duration: Duration,
    opacity: Tween,
    scale: Tween,
}

impl PanelState {
    fn new(duration: Duration, scale: f32, easing: EasingFunction) -> Self {
        let mut opacity = Tween::fixed(0.0);
        opacity.easing = easing;
        let mut scale = Tween::fixed(scale);
        scale.easing = easing;
        Self {
            displayed: false,
            display_changed: Duration::ZERO,
            duration,
            opacity,
            scale,
        }
    }
}

/// What a panel looks like at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSample {
    /// Part of the render tree (`display: block`).
    pub displayed: bool,
    /// Current opacity.
    pub opacity: f32,
    /// Current scale.
    pub scale: f32,
}

/// Headless overlay: both panels with their in-flight transitions.
///
/// Sampling at any logical time yields what a browser would paint with the
/// same CSS transitions. The background fades over
/// [`OverlayOptions::background_fade`], the content panel over
/// [`OverlayOptions::content_fade`], independently of each other.
#[derive(Debug, Clone)]
pub struct OverlayPanels {
    background: PanelState,
    content: PanelState,
}

impl OverlayPanels {
    /// Hidden panels configured from `options`.
    #[must_use]
    pub fn new(options: &OverlayOptions) -> Self {
        Self {
            background: PanelState::new(
                options.background_fade(),
                1.0,
                options.easing,
            ),
            content: PanelState::new(
                options.content_fade(),
                options.content_start_scale,
                options.easing,
            ),
        }
    }

    fn state(&self, panel: Panel) -> &PanelState {
        match panel {
            Panel::Background => &self.background,
            Panel::Content => &self.content,
        }
    }

    fn state_mut(&mut self, panel: Panel) -> &mut PanelState {
        match panel {
            Panel::Background => &mut self.background,
            Panel::Content => &mut self.content,
        }
    }

    /// Sample `panel` at `now`.
    #[must_use]
    pub fn sample(&self, panel: Panel, now: Duration) -> PanelSample {
        let state = self.state(panel);
        PanelSample {
            displayed: state.displayed,
            opacity: state.opacity.value_at(now),
            scale: state.scale.value_at(now),
        }
    }

    /// Whether `panel` is in the render tree.
    #[must_use]
    pub fn is_displayed(&self, panel: Panel) -> bool {
        self.state(panel).displayed
    }

    /// When `panel` last joined or left the render tree.
    #[must_use]
    pub fn display_changed_at(&self, panel: Panel) -> Duration {
        self.state(panel).display_changed
    }

    /// Whether any transition is still running at `now`.
    #[must_use]
    pub fn is_animating(&self, now: Duration) -> bool {
        Panel::ALL.iter().any(|&panel| {
            let state = self.state(panel);
            state.opacity.progress(now) < 1.0 || state.scale.progress(now) < 1.0
        })
    }
}

impl OverlayView for OverlayPanels {
    fn set_visible(&mut self, panel: Panel, visible: bool, at: Duration) {
        let state = self.state_mut(panel);
        if state.displayed != visible {
            state.displayed = visible;
            state.display_changed = at;
            log::debug!(
                "{} panel {} at {}ms",
                panel.name(),
                if visible { "displayed" } else { "removed" },
                at.as_millis()
            );
        }
    }

    fn set_opacity(&mut self, panel: Panel, opacity: f32, at: Duration) {
        let state = self.state_mut(panel);
        let duration = state.duration;
        state.opacity.retarget(opacity.clamp(0.0, 1.0), at, duration);
    }

    fn set_transform(
        &mut self,
        panel: Panel,
        transform: PanelTransform,
        at: Duration,
    ) {
        let state = self.state_mut(panel);
        let duration = state.duration;
        state.scale.retarget(transform.scale, at, duration);
    }
}
