//! Scripted input sessions.
//!
//! A session is a viewport plus a list of timestamped platform events. The
//! runner replays them against a [`PickController`] frame by frame, the
//! way the browser event loop would deliver them, and reports what each
//! click did and where the overlay ended up.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::VitrineError;
use crate::input::{InputEvent, MouseButton};
use crate::overlay::OverlayView;
use crate::reveal::{PickController, PickOutcome, RevealPhase};
use crate::scene::{SceneProvider, Viewport};

/// Frame interval of the replay clock.
pub const FRAME: Duration = Duration::from_millis(16);

/// One scripted platform event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Primary click (press and release in place).
    Click {
        /// Horizontal position in viewport pixels.
        x: f32,
        /// Vertical position in viewport pixels.
        y: f32,
    },
    /// Key press, as a DOM `KeyboardEvent.code`.
    Key {
        /// Key code, e.g. `"Escape"`.
        code: String,
    },
    /// Window resize.
    Resize {
        /// New width in logical pixels.
        width: u32,
        /// New height in logical pixels.
        height: u32,
        /// Device pixel ratio.
        scale_factor: f32,
    },
}

/// An event and when it happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    /// Milliseconds since session start.
    pub at_ms: u64,
    /// The event.
    pub event: SessionEvent,
}

impl TimedEvent {
    /// Event time on the logical clock.
    #[must_use]
    pub fn at(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }
}

/// A replayable input script.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    /// Viewport the session starts with.
    pub viewport: Viewport,
    /// Events in time order.
    pub events: Vec<TimedEvent>,
}

impl Session {
    /// Parse a session from JSON. Events are sorted by time.
    pub fn from_json(text: &str) -> Result<Self, VitrineError> {
        let mut session: Self = serde_json::from_str(text)?;
        session.events.sort_by_key(|e| e.at_ms);
        Ok(session)
    }

    /// Load a session from a JSON file.
    pub fn load(path: &Path) -> Result<Self, VitrineError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Time of the last event.
    #[must_use]
    pub fn end(&self) -> Duration {
        self.events.last().map_or(Duration::ZERO, TimedEvent::at)
    }
}

/// What a replay produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionReport {
    /// Outcome of every click, with its time in milliseconds.
    pub picks: Vec<(u64, PickOutcome)>,
    /// Every phase change, with its time in milliseconds.
    pub phases: Vec<(u64, RevealPhase)>,
    /// Whether the overlay was revealed when the replay stopped.
    pub revealed: bool,
}

/// Replay `session` against `controller`, then keep ticking for `tail` so
/// the last transition can finish.
pub fn run_session<S: SceneProvider, O: OverlayView>(
    controller: &mut PickController<S, O>,
    session: &Session,
    tail: Duration,
) -> SessionReport {
    let mut report = SessionReport::default();
    let mut phase = controller.phase();
    let mut frame = Duration::ZERO;

    let mut tick = |controller: &mut PickController<S, O>,
                    report: &mut SessionReport,
                    now: Duration| {
        if controller.phase() != phase {
            phase = controller.phase();
            log::info!("{:>6}ms  phase {phase:?}", now.as_millis());
            report.phases.push((now.as_millis() as u64, phase));
        }
    };

    for timed in &session.events {
        let at = timed.at();
        while frame < at {
            controller.advance(frame);
            tick(controller, &mut report, frame);
            frame += FRAME;
        }

        if let Some(outcome) = dispatch(controller, &timed.event, at) {
            log::info!("{:>6}ms  click -> {outcome:?}", timed.at_ms);
            report.picks.push((timed.at_ms, outcome));
        }
        tick(controller, &mut report, at);
    }

    let end = session.end() + tail;
    while frame <= end {
        controller.advance(frame);
        tick(controller, &mut report, frame);
        frame += FRAME;
    }

    report.revealed = controller.is_revealed();
    report
}

fn dispatch<S: SceneProvider, O: OverlayView>(
    controller: &mut PickController<S, O>,
    event: &SessionEvent,
    at: Duration,
) -> Option<PickOutcome> {
    match *event {
        SessionEvent::Click { x, y } => {
            let _ = controller.handle_input(InputEvent::CursorMoved { x, y }, at);
            let _ = controller.handle_input(
                InputEvent::MouseButton {
                    button: MouseButton::Left,
                    pressed: true,
                },
                at,
            );
            controller.handle_input(
                InputEvent::MouseButton {
                    button: MouseButton::Left,
                    pressed: false,
                },
                at,
            )
        }
        SessionEvent::Key { ref code } => {
            log::debug!("{:>6}ms  key {code}", at.as_millis());
            controller.handle_key(code, at)
        }
        SessionEvent::Resize {
            width,
            height,
            scale_factor,
        } => controller.handle_input(
            InputEvent::Resized {
                width,
                height,
                scale_factor,
            },
            at,
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::assets::{AssetRegistry, FileLoader};
    use crate::options::ScenePreset;
    use crate::overlay::{OverlayPanels, Panel};
    use crate::reveal::SceneContext;
    use crate::scene::Stage;

    fn assets_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
    }

    #[test]
    fn parses_tagged_events() {
        let session = Session::from_json(
            r#"{
                "viewport": { "width": 800, "height": 600, "scale_factor": 2.0 },
                "events": [
                    { "at_ms": 50, "event": { "type": "key", "code": "Escape" } },
                    { "at_ms": 10, "event": { "type": "click", "x": 1.0, "y": 2.0 } }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(session.viewport, Viewport::new(800, 600, 2.0));
        assert_eq!(session.events[0].event, SessionEvent::Click { x: 1.0, y: 2.0 });
        assert_eq!(session.end(), Duration::from_millis(50));
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let err = Session::from_json(
            r#"{ "events": [ { "at_ms": 0, "event": { "type": "swipe" } } ] }"#,
        );
        assert!(matches!(err, Err(VitrineError::Description(_))));
    }

    #[test]
    fn showcase_session_replays() {
        let root = assets_dir();
        let session = Session::load(&root.join("sessions/showcase.json")).unwrap();
        let options = ScenePreset::Showcase.options();
        let registry = AssetRegistry::new(FileLoader::new(root.clone()));

        let context = SceneContext::new(
            Stage::new(&options, session.viewport),
            registry.load_model(&options.scene.model_url),
            OverlayPanels::new(&options.overlay),
        );
        let mut controller = PickController::new(context, &options);
        let report = run_session(&mut controller, &session, Duration::from_secs(1));

        assert_eq!(
            report.picks,
            vec![
                (100, PickOutcome::Miss),
                (400, PickOutcome::Revealed),
                (1350, PickOutcome::Revealed),
            ]
        );
        assert_eq!(
            report.phases.first(),
            Some(&(400, RevealPhase::Showing))
        );
        assert!(report.phases.contains(&(1200, RevealPhase::Hiding)));
        assert_eq!(report.phases.last().map(|p| p.1), Some(RevealPhase::Idle));
        assert!(!report.revealed);

        let stage = controller.scene();
        assert_eq!(stage.surface().pixel_ratio(), 2.0);
        assert_eq!(stage.viewport().width, 1280);
        assert!(stage.controls().enabled());
        assert!(!controller.overlay().is_displayed(Panel::Background));
    }
}
