use std::time::Duration;

use glam::Vec2;

use super::context::SceneContext;
use super::state::{RevealPhase, RevealState};
use super::timeline::{Step, Timeline};
use crate::assets::LoadStatus;
use crate::command::VitrineCommand;
use crate::input::{InputEvent, InputProcessor};
use crate::options::{ControlRestore, Options, OverlayOptions};
use crate::overlay::{OverlayView, Panel, PanelTransform};
use crate::scene::{OrbitGesture, SceneProvider};

/// What a pointer click amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// This scene does not react to clicks.
    Disabled,
    /// The model has not loaded (or never will).
    NotLoaded,
    /// Nothing named like the target is under the pointer.
    Miss,
    /// The target was hit but the overlay is already up.
    AlreadyRevealed,
    /// The target was hit and the overlay is on its way in.
    Revealed,
}

/// Click-to-reveal controller.
///
/// Resolves clicks against the loaded model and drives the overlay through
/// `Idle → Showing → Shown → Hiding → Idle`. All deferred work runs from
/// [`advance`](Self::advance) on the caller's logical clock; each
/// transition opens a new timeline generation so leftovers from an
/// interrupted one are dropped instead of applied.
#[derive(Debug)]
pub struct PickController<S, O> {
    context: SceneContext<S, O>,
    state: RevealState,
    timeline: Timeline,
    options: OverlayOptions,
    input: InputProcessor,
    picking: bool,
    model_attached: bool,
}

// ── Construction ─────────────────────────────────────────────────────────

impl<S: SceneProvider, O: OverlayView> PickController<S, O> {
    /// Controller for the scene described by `options`.
    #[must_use]
    pub fn new(context: SceneContext<S, O>, options: &Options) -> Self {
        let mut controller = Self::with_overlay_options(
            context,
            options.overlay.clone(),
            options.scene.picking,
        );
        controller.input =
            InputProcessor::with_key_bindings(options.keybindings.clone());
        controller
    }

    /// Controller with explicit overlay options and default key bindings.
    #[must_use]
    pub fn with_overlay_options(
        context: SceneContext<S, O>,
        options: OverlayOptions,
        picking: bool,
    ) -> Self {
        let mut state = RevealState::new(options.target_name.clone());
        state.camera_control_enabled = context.scene.controls_enabled();
        Self {
            context,
            state,
            timeline: Timeline::new(),
            options,
            input: InputProcessor::new(),
            picking,
            model_attached: false,
        }
    }
}

// ── Accessors ────────────────────────────────────────────────────────────

impl<S, O> PickController<S, O> {
    /// Current reveal state.
    #[must_use]
    pub fn state(&self) -> &RevealState {
        &self.state
    }

    /// Whether the overlay is shown or on its way in.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.state.is_revealed
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> RevealPhase {
        self.state.phase
    }

    /// Whether clicks are resolved at all.
    #[must_use]
    pub fn picking(&self) -> bool {
        self.picking
    }

    /// The collaborators.
    #[must_use]
    pub fn context(&self) -> &SceneContext<S, O> {
        &self.context
    }

    /// The scene provider.
    #[must_use]
    pub fn scene(&self) -> &S {
        &self.context.scene
    }

    /// Mutable access to the scene provider.
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.context.scene
    }

    /// The overlay view.
    #[must_use]
    pub fn overlay(&self) -> &O {
        &self.context.overlay
    }

    /// When the next deferred step comes due, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.timeline.next_due()
    }
}

// ── Event handling ───────────────────────────────────────────────────────

impl<S: SceneProvider, O: OverlayView> PickController<S, O> {
    /// Resolve a primary click at (`client_x`, `client_y`) in a viewport of
    /// `width` × `height` pixels.
    pub fn handle_pointer_click(
        &mut self,
        client_x: f32,
        client_y: f32,
        width: f32,
        height: f32,
        now: Duration,
    ) -> PickOutcome {
        self.advance(now);

        let outcome = self.resolve_click(client_x, client_y, width, height);
        if outcome == PickOutcome::Revealed {
            self.begin_show(now);
        }
        log::debug!("click at ({client_x}, {client_y}): {outcome:?}");
        outcome
    }

    fn resolve_click(
        &self,
        client_x: f32,
        client_y: f32,
        width: f32,
        height: f32,
    ) -> PickOutcome {
        if !self.picking {
            return PickOutcome::Disabled;
        }
        let Some(model) = self.context.model.get() else {
            return PickOutcome::NotLoaded;
        };
        if !(width > 0.0 && height > 0.0) {
            return PickOutcome::Miss;
        }

        let ndc = Vec2::new(
            (client_x / width) * 2.0 - 1.0,
            -(client_y / height) * 2.0 + 1.0,
        );
        let scene = &self.context.scene;
        let ray = scene.cast_ray(ndc, scene.camera());
        let hit = scene
            .intersect(&ray, &model, true)
            .into_iter()
            .find(|hit| hit.name == self.state.target_name);

        match hit {
            None => PickOutcome::Miss,
            Some(_) if self.state.is_revealed => PickOutcome::AlreadyRevealed,
            Some(hit) => {
                log::info!(
                    "picked '{}' at distance {:.3}",
                    hit.name,
                    hit.distance
                );
                PickOutcome::Revealed
            }
        }
    }

    /// Dismiss the overlay. Returns whether a hide transition started.
    pub fn handle_cancel_key(&mut self, now: Duration) -> bool {
        self.advance(now);

        if !self.state.is_revealed {
            log::trace!("cancel ignored in {:?}", self.state.phase);
            return false;
        }
        self.begin_hide(now);
        true
    }

    /// Route a raw input event through the input processor.
    pub fn handle_input(
        &mut self,
        event: InputEvent,
        now: Duration,
    ) -> Option<PickOutcome> {
        let command = self.input.handle_event(event)?;
        self.execute(command, now)
    }

    /// Route a key press (DOM `KeyboardEvent.code`) through the bindings.
    pub fn handle_key(&mut self, code: &str, now: Duration) -> Option<PickOutcome> {
        match self.input.handle_key_press(code) {
            Some(command) => self.execute(command, now),
            None => {
                log::trace!("unbound key {code}");
                None
            }
        }
    }

    /// Apply one command. Returns the pick outcome for [`VitrineCommand::Pick`].
    pub fn execute(
        &mut self,
        command: VitrineCommand,
        now: Duration,
    ) -> Option<PickOutcome> {
        match command {
            VitrineCommand::Pick { x, y } => {
                let viewport = self.context.scene.viewport();
                return Some(self.handle_pointer_click(
                    x,
                    y,
                    viewport.width as f32,
                    viewport.height as f32,
                    now,
                ));
            }
            VitrineCommand::Cancel => {
                let _ = self.handle_cancel_key(now);
            }
            VitrineCommand::RotateCamera { delta } => {
                self.context.scene.orbit(OrbitGesture::Rotate(delta));
            }
            VitrineCommand::PanCamera { delta } => {
                self.context.scene.orbit(OrbitGesture::Pan(delta));
            }
            VitrineCommand::Zoom { delta } => {
                self.context.scene.orbit(OrbitGesture::Zoom(delta));
            }
            VitrineCommand::ResetCamera => {
                self.context.scene.orbit(OrbitGesture::Reset);
            }
            VitrineCommand::Resize(viewport) => {
                self.context.scene.resize(viewport);
            }
        }
        None
    }
}

// ── Clock ────────────────────────────────────────────────────────────────

impl<S: SceneProvider, O: OverlayView> PickController<S, O> {
    /// Move the logical clock to `now`.
    ///
    /// Hands a freshly loaded model to the scene and runs every step that
    /// has come due, each stamped with its own due time.
    pub fn advance(&mut self, now: Duration) {
        self.sync_model();
        while let Some((at, step)) = self.timeline.pop_due(now) {
            self.run(step, at);
        }
    }

    fn sync_model(&mut self) {
        if self.model_attached {
            return;
        }
        match self.context.model.status() {
            LoadStatus::Loaded => {
                if let Some(model) = self.context.model.get() {
                    self.context.scene.attach_model(model);
                    self.model_attached = true;
                }
            }
            LoadStatus::Pending => {}
            LoadStatus::Failed | LoadStatus::Cancelled => {
                // Logged by the handle; the scene stays without a target.
                self.model_attached = true;
            }
        }
    }

    fn run(&mut self, step: Step, at: Duration) {
        log::trace!("{step:?} at {}ms", at.as_millis());
        let overlay = &mut self.context.overlay;
        match step {
            Step::ApplyShown => {
                overlay.set_opacity(Panel::Background, 1.0, at);
                overlay.set_opacity(Panel::Content, 1.0, at);
                overlay.set_transform(Panel::Content, PanelTransform::IDENTITY, at);
                self.timeline
                    .schedule(at + self.options.show_settle(), Step::SettleShown);
            }
            Step::SettleShown => {
                self.state.phase = RevealPhase::Shown;
                log::info!("overlay shown");
            }
            Step::RemoveContent => {
                overlay.set_visible(Panel::Content, false, at);
            }
            Step::RemoveBackground => {
                overlay.set_visible(Panel::Background, false, at);
                self.state.phase = RevealPhase::Idle;
                log::info!("overlay hidden");
            }
            Step::RestoreControls => self.set_controls(true),
        }
    }
}

// ── Transitions ──────────────────────────────────────────────────────────

impl<S: SceneProvider, O: OverlayView> PickController<S, O> {
    fn begin_show(&mut self, now: Duration) {
        let generation = self.timeline.begin();
        self.state.is_revealed = true;
        self.state.phase = RevealPhase::Showing;
        self.set_controls(false);

        let overlay = &mut self.context.overlay;
        overlay.set_visible(Panel::Background, true, now);
        overlay.set_visible(Panel::Content, true, now);
        // Targets go in on the next tick so the fade starts from the
        // displayed, transparent state.
        self.timeline
            .schedule(now + self.options.show_delay(), Step::ApplyShown);

        log::info!("showing overlay (generation {generation})");
    }

    fn begin_hide(&mut self, now: Duration) {
        let generation = self.timeline.begin();
        self.state.is_revealed = false;
        self.state.phase = RevealPhase::Hiding;

        let overlay = &mut self.context.overlay;
        overlay.set_opacity(Panel::Background, 0.0, now);
        overlay.set_opacity(Panel::Content, 0.0, now);
        overlay.set_transform(
            Panel::Content,
            PanelTransform::scale(self.options.content_start_scale),
            now,
        );
        self.timeline
            .schedule(now + self.options.content_hide(), Step::RemoveContent);
        self.timeline
            .schedule(now + self.options.background_hide(), Step::RemoveBackground);

        match self.options.restore_controls {
            ControlRestore::OnHideStart => self.set_controls(true),
            ControlRestore::OnHideComplete => self
                .timeline
                .schedule(now + self.options.hide_settle(), Step::RestoreControls),
        }

        log::info!("hiding overlay (generation {generation})");
    }

    fn set_controls(&mut self, enabled: bool) {
        self.context.scene.set_controls_enabled(enabled);
        self.state.camera_control_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use glam::Vec3;

    use super::*;
    use crate::assets::{AssetHandle, AssetRegistry, MemoryLoader};
    use crate::camera::Camera;
    use crate::options::{CameraOptions, ScenePreset};
    use crate::overlay::OverlayPanels;
    use crate::scene::{
        Aabb, Intersection, Ray, SceneNode, Stage, Viewport,
    };

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    /// Provider that reports scripted hits for every ray.
    #[derive(Debug)]
    struct ScriptedScene {
        camera: Camera,
        hits: Vec<Intersection>,
        controls: bool,
        last_ndc: Cell<Option<Vec2>>,
        attached: Option<Rc<SceneNode>>,
    }

    impl ScriptedScene {
        fn new(hits: &[&str]) -> Self {
            Self {
                camera: Camera::from_options(&CameraOptions::default(), 16.0 / 9.0),
                hits: hits
                    .iter()
                    .enumerate()
                    .map(|(i, name)| Intersection {
                        name: (*name).to_owned(),
                        distance: 1.0 + i as f32,
                        point: Vec3::ZERO,
                    })
                    .collect(),
                controls: true,
                last_ndc: Cell::new(None),
                attached: None,
            }
        }
    }

    impl SceneProvider for ScriptedScene {
        fn camera(&self) -> &Camera {
            &self.camera
        }

        fn viewport(&self) -> Viewport {
            Viewport::new(1920, 1080, 1.0)
        }

        fn controls_enabled(&self) -> bool {
            self.controls
        }

        fn set_controls_enabled(&mut self, enabled: bool) {
            self.controls = enabled;
        }

        fn cast_ray(&self, ndc: Vec2, camera: &Camera) -> Ray {
            self.last_ndc.set(Some(ndc));
            camera.ray_from_ndc(ndc)
        }

        fn intersect(
            &self,
            _ray: &Ray,
            _root: &SceneNode,
            _recursive: bool,
        ) -> Vec<Intersection> {
            self.hits.clone()
        }

        fn attach_model(&mut self, model: Rc<SceneNode>) {
            self.attached = Some(model);
        }
    }

    type Scripted = PickController<ScriptedScene, OverlayPanels>;

    fn scripted(hits: &[&str]) -> Scripted {
        scripted_with(hits, OverlayOptions::default())
    }

    fn scripted_with(hits: &[&str], options: OverlayOptions) -> Scripted {
        let overlay = OverlayPanels::new(&options);
        let context = SceneContext::new(
            ScriptedScene::new(hits),
            AssetHandle::ready("models/test.json", SceneNode::group("model")),
            overlay,
        );
        PickController::with_overlay_options(context, options, true)
    }

    fn click_center(controller: &mut Scripted, now: Duration) -> PickOutcome {
        controller.handle_pointer_click(960.0, 540.0, 1920.0, 1080.0, now)
    }

    fn sample(controller: &Scripted, panel: Panel, now: Duration) -> (bool, f32, f32) {
        let s = controller.overlay().sample(panel, now);
        (s.displayed, s.opacity, s.scale)
    }

    // ── Picking ──────────────────────────────────────────────────────────

    #[test]
    fn miss_leaves_state_and_overlay_untouched() {
        let mut controller = scripted(&["desk", "back_wall"]);
        assert_eq!(click_center(&mut controller, ms(0)), PickOutcome::Miss);
        controller.advance(ms(1000));

        assert!(!controller.is_revealed());
        assert!(controller.state().camera_control_enabled);
        assert!(!controller.overlay().is_displayed(Panel::Background));
        assert!(!controller.overlay().is_displayed(Panel::Content));
    }

    #[test]
    fn empty_hit_list_is_a_miss() {
        let mut controller = scripted(&[]);
        assert_eq!(click_center(&mut controller, ms(0)), PickOutcome::Miss);
        assert_eq!(controller.phase(), RevealPhase::Idle);
    }

    #[test]
    fn target_behind_other_geometry_still_counts() {
        let mut controller = scripted(&["desk", "scheibe"]);
        assert_eq!(click_center(&mut controller, ms(0)), PickOutcome::Revealed);
    }

    #[test]
    fn overlapping_target_hits_reveal_once() {
        let mut controller = scripted(&["scheibe", "scheibe", "scheibe"]);
        assert_eq!(click_center(&mut controller, ms(0)), PickOutcome::Revealed);
        let generation = controller.timeline.generation();

        assert_eq!(
            click_center(&mut controller, ms(50)),
            PickOutcome::AlreadyRevealed
        );
        assert_eq!(controller.timeline.generation(), generation);
        assert!(controller.is_revealed());
    }

    #[test]
    fn click_maps_to_ndc() {
        let mut controller = scripted(&[]);
        let _ = controller.handle_pointer_click(0.0, 0.0, 1920.0, 1080.0, ms(0));
        assert_eq!(controller.scene().last_ndc.get(), Some(Vec2::new(-1.0, 1.0)));

        let _ = controller.handle_pointer_click(1440.0, 810.0, 1920.0, 1080.0, ms(0));
        assert_eq!(controller.scene().last_ndc.get(), Some(Vec2::new(0.5, -0.5)));
    }

    #[test]
    fn zero_size_viewport_is_a_miss() {
        let mut controller = scripted(&["scheibe"]);
        let outcome = controller.handle_pointer_click(10.0, 10.0, 0.0, 1080.0, ms(0));
        assert_eq!(outcome, PickOutcome::Miss);
        assert_eq!(controller.scene().last_ndc.get(), None);
    }

    #[test]
    fn clicks_before_load_are_ignored() {
        let options = OverlayOptions::default();
        let model = AssetHandle::new("models/showcase.json");
        let context = SceneContext::new(
            ScriptedScene::new(&["scheibe"]),
            model.clone(),
            OverlayPanels::new(&options),
        );
        let mut controller = PickController::with_overlay_options(context, options, true);

        assert_eq!(click_center(&mut controller, ms(0)), PickOutcome::NotLoaded);
        assert!(controller.scene().attached.is_none());

        model.resolve(SceneNode::group("model"));
        assert_eq!(click_center(&mut controller, ms(10)), PickOutcome::Revealed);
        assert!(controller.scene().attached.is_some());
    }

    #[test]
    fn failed_model_is_never_pickable() {
        let options = OverlayOptions::default();
        let registry = AssetRegistry::new(MemoryLoader::new());
        let context = SceneContext::new(
            ScriptedScene::new(&["scheibe"]),
            registry.load_model("models/missing.json"),
            OverlayPanels::new(&options),
        );
        let mut controller = PickController::with_overlay_options(context, options, true);

        assert_eq!(click_center(&mut controller, ms(0)), PickOutcome::NotLoaded);
        controller.advance(ms(1000));
        assert!(controller.scene().attached.is_none());
        assert!(!controller.is_revealed());
    }

    #[test]
    fn scenes_without_picking_ignore_clicks() {
        let options = OverlayOptions::default();
        let context = SceneContext::new(
            ScriptedScene::new(&["scheibe"]),
            AssetHandle::ready("models/test.json", SceneNode::group("model")),
            OverlayPanels::new(&options),
        );
        let mut controller = PickController::with_overlay_options(context, options, false);
        assert_eq!(click_center(&mut controller, ms(0)), PickOutcome::Disabled);
        assert!(!controller.is_revealed());
    }

    // ── Show ─────────────────────────────────────────────────────────────

    #[test]
    fn show_displays_then_fades_in() {
        let mut controller = scripted(&["scheibe"]);
        let _ = click_center(&mut controller, ms(1000));

        assert!(controller.is_revealed());
        assert_eq!(controller.phase(), RevealPhase::Showing);
        assert!(!controller.state().camera_control_enabled);
        assert!(!controller.scene().controls);

        // displayed right away, well inside 10ms
        assert!(controller.overlay().is_displayed(Panel::Background));
        assert!(controller.overlay().display_changed_at(Panel::Background) <= ms(1010));
        assert_eq!(sample(&controller, Panel::Background, ms(1000)).1, 0.0);

        controller.advance(ms(1016));
        let (_, content_opacity, content_scale) = sample(&controller, Panel::Content, ms(1200));
        assert!(content_opacity > 0.0 && content_opacity < 1.0);
        assert!(content_scale > 0.9 && content_scale < 1.0);

        // content settles at 400ms, background at 500ms
        assert_eq!(sample(&controller, Panel::Content, ms(1400)), (true, 1.0, 1.0));
        assert!(sample(&controller, Panel::Background, ms(1400)).1 < 1.0);
        assert_eq!(sample(&controller, Panel::Background, ms(1500)), (true, 1.0, 1.0));

        controller.advance(ms(1499));
        assert_eq!(controller.phase(), RevealPhase::Showing);
        controller.advance(ms(1500));
        assert_eq!(controller.phase(), RevealPhase::Shown);
        assert!(!controller.state().camera_control_enabled);
    }

    #[test]
    fn show_delay_postpones_fade() {
        let options = OverlayOptions {
            show_delay_ms: 20,
            ..OverlayOptions::default()
        };
        let mut controller = scripted_with(&["scheibe"], options);
        let _ = click_center(&mut controller, ms(0));

        controller.advance(ms(10));
        assert_eq!(sample(&controller, Panel::Background, ms(10)).1, 0.0);
        controller.advance(ms(20));
        assert_eq!(sample(&controller, Panel::Background, ms(520)).1, 1.0);
        assert!(sample(&controller, Panel::Background, ms(500)).1 < 1.0);
    }

    // ── Hide ─────────────────────────────────────────────────────────────

    #[test]
    fn cancel_while_hidden_does_nothing() {
        let mut controller = scripted(&["scheibe"]);
        assert!(!controller.handle_cancel_key(ms(0)));
        assert_eq!(controller.phase(), RevealPhase::Idle);
        assert_eq!(controller.timeline.pending_len(), 0);
        assert_eq!(controller.timeline.generation(), 0);
        assert!(controller.state().camera_control_enabled);
    }

    #[test]
    fn escape_removes_panels_on_schedule() {
        let mut controller = scripted(&["scheibe"]);
        let _ = click_center(&mut controller, ms(0));
        controller.advance(ms(600));
        assert_eq!(controller.phase(), RevealPhase::Shown);

        assert_eq!(controller.handle_key("Escape", ms(1000)), None);
        assert!(!controller.is_revealed());
        assert_eq!(controller.phase(), RevealPhase::Hiding);
        // controls come back as soon as the hide starts
        assert!(controller.state().camera_control_enabled);
        assert!(controller.scene().controls);

        controller.advance(ms(1299));
        assert!(controller.overlay().is_displayed(Panel::Content));
        controller.advance(ms(1300));
        assert!(!controller.overlay().is_displayed(Panel::Content));
        assert_eq!(controller.overlay().display_changed_at(Panel::Content), ms(1300));
        assert!(controller.overlay().is_displayed(Panel::Background));

        controller.advance(ms(1520));
        assert!(!controller.overlay().is_displayed(Panel::Background));
        assert_eq!(
            controller.overlay().display_changed_at(Panel::Background),
            ms(1500)
        );
        assert_eq!(controller.phase(), RevealPhase::Idle);

        let content = controller.overlay().sample(Panel::Content, ms(1500));
        assert_eq!((content.opacity, content.scale), (0.0, 0.9));
    }

    #[test]
    fn controls_can_wait_for_hide_to_finish() {
        let options = OverlayOptions {
            restore_controls: ControlRestore::OnHideComplete,
            ..OverlayOptions::default()
        };
        let mut controller = scripted_with(&["scheibe"], options);
        let _ = click_center(&mut controller, ms(0));
        controller.advance(ms(600));

        assert!(controller.handle_cancel_key(ms(1000)));
        assert!(!controller.state().camera_control_enabled);
        controller.advance(ms(1499));
        assert!(!controller.scene().controls);
        controller.advance(ms(1500));
        assert!(controller.scene().controls);
        assert!(controller.state().camera_control_enabled);
    }

    // ── Interleaving ─────────────────────────────────────────────────────

    #[test]
    fn cancel_during_show_drops_pending_steps() {
        let mut controller = scripted(&["scheibe"]);
        let _ = click_center(&mut controller, ms(0));
        controller.advance(ms(16));

        assert!(controller.handle_cancel_key(ms(100)));
        // the show's SettleShown (due at 500) must not flip us back to Shown
        controller.advance(ms(2000));
        assert_eq!(controller.phase(), RevealPhase::Idle);
        assert!(!controller.is_revealed());
        assert!(!controller.overlay().is_displayed(Panel::Background));
        assert_eq!(sample(&controller, Panel::Background, ms(2000)).1, 0.0);
        assert_eq!(controller.timeline.pending_len(), 0);
    }

    #[test]
    fn cancel_before_first_tick_never_fades_in() {
        let mut controller = scripted(&["scheibe"]);
        let _ = click_center(&mut controller, ms(0));
        let _ = controller.handle_cancel_key(ms(0));

        controller.advance(ms(1000));
        for now in [0, 100, 250, 500, 1000] {
            assert!(sample(&controller, Panel::Background, ms(now)).1 <= f32::EPSILON);
        }
    }

    #[test]
    fn show_hide_show_ends_fully_shown() {
        let mut single = scripted(&["scheibe"]);
        let _ = click_center(&mut single, ms(0));
        single.advance(ms(5000));

        let mut controller = scripted(&["scheibe"]);
        let _ = click_center(&mut controller, ms(0));
        controller.advance(ms(16));
        let _ = controller.handle_cancel_key(ms(200));
        controller.advance(ms(250));
        assert_eq!(click_center(&mut controller, ms(320)), PickOutcome::Revealed);
        // the hide's removals (due at 500 and 700) are stale by now
        controller.advance(ms(5000));

        for panel in Panel::ALL {
            assert_eq!(
                sample(&controller, panel, ms(5000)),
                sample(&single, panel, ms(5000))
            );
            assert_eq!(sample(&controller, panel, ms(5000)), (true, 1.0, 1.0));
        }
        assert_eq!(controller.phase(), RevealPhase::Shown);
        assert!(!controller.scene().controls);
    }

    #[test]
    fn reveal_after_full_hide_repeats() {
        let mut controller = scripted(&["scheibe"]);
        for round in 0..3u64 {
            let start = ms(round * 2000);
            assert_eq!(click_center(&mut controller, start), PickOutcome::Revealed);
            controller.advance(start + ms(600));
            assert_eq!(controller.phase(), RevealPhase::Shown);
            assert!(controller.handle_cancel_key(start + ms(1000)));
            controller.advance(start + ms(1600));
            assert_eq!(controller.phase(), RevealPhase::Idle);
        }
    }

    // ── Commands ─────────────────────────────────────────────────────────

    #[test]
    fn input_events_route_to_pick() {
        let mut controller = scripted(&["scheibe"]);
        let _ = controller.handle_input(
            InputEvent::CursorMoved { x: 960.0, y: 540.0 },
            ms(0),
        );
        let _ = controller.handle_input(
            InputEvent::MouseButton {
                button: crate::input::MouseButton::Left,
                pressed: true,
            },
            ms(0),
        );
        let outcome = controller.handle_input(
            InputEvent::MouseButton {
                button: crate::input::MouseButton::Left,
                pressed: false,
            },
            ms(5),
        );
        assert_eq!(outcome, Some(PickOutcome::Revealed));
        assert_eq!(controller.scene().last_ndc.get(), Some(Vec2::ZERO));
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mut controller = scripted(&["scheibe"]);
        let _ = click_center(&mut controller, ms(0));
        assert_eq!(controller.handle_key("KeyX", ms(10)), None);
        assert!(controller.is_revealed());
    }

    // ── Stage ────────────────────────────────────────────────────────────

    fn showcase_stage() -> PickController<Stage, OverlayPanels> {
        let options = ScenePreset::Showcase.options();
        let target = SceneNode::mesh(
            "scheibe",
            Aabb::from_center(Vec3::ZERO, Vec3::new(0.6, 0.4, 0.05)),
        )
        .with_translation(options.camera.target);
        let decoy = SceneNode::mesh(
            "decoy",
            Aabb::from_center(Vec3::ZERO, Vec3::splat(0.5)),
        )
        .with_translation(Vec3::new(20.0, 0.0, 20.0));
        let registry = AssetRegistry::new(MemoryLoader::new().with_mesh(
            options.scene.model_url.clone(),
            SceneNode::group("room").with_child(target).with_child(decoy),
        ));

        let context = SceneContext::new(
            Stage::new(&options, Viewport::new(1920, 1080, 1.0)),
            registry.load_model(&options.scene.model_url),
            OverlayPanels::new(&options.overlay),
        );
        PickController::new(context, &options)
    }

    #[test]
    fn center_click_reveals_target_on_stage() {
        let mut controller = showcase_stage();
        let outcome = controller.handle_pointer_click(960.0, 540.0, 1920.0, 1080.0, ms(0));
        assert_eq!(outcome, PickOutcome::Revealed);
        assert!(controller.scene().model().is_some());
        assert!(!controller.scene().controls().enabled());

        assert!(controller.overlay().is_displayed(Panel::Background));
        controller.advance(ms(16));
        assert_eq!(controller.overlay().sample(Panel::Background, ms(500)).opacity, 1.0);
    }

    #[test]
    fn corner_click_misses_on_stage() {
        let mut controller = showcase_stage();
        let outcome = controller.handle_pointer_click(5.0, 5.0, 1920.0, 1080.0, ms(0));
        assert_eq!(outcome, PickOutcome::Miss);
    }

    #[test]
    fn camera_is_frozen_while_revealed() {
        let mut controller = showcase_stage();
        let _ = controller.execute(VitrineCommand::Pick { x: 960.0, y: 540.0 }, ms(0));
        let frozen = controller.scene().camera().clone();

        let _ = controller.execute(
            VitrineCommand::RotateCamera {
                delta: Vec2::new(40.0, 10.0),
            },
            ms(100),
        );
        assert_eq!(controller.scene().camera(), &frozen);

        let _ = controller.execute(VitrineCommand::Cancel, ms(700));
        let _ = controller.execute(
            VitrineCommand::RotateCamera {
                delta: Vec2::new(40.0, 10.0),
            },
            ms(710),
        );
        assert_ne!(controller.scene().camera(), &frozen);
    }

    #[test]
    fn resize_command_reaches_stage() {
        let mut controller = showcase_stage();
        let _ = controller.execute(
            VitrineCommand::Resize(Viewport::new(800, 800, 2.5)),
            ms(0),
        );
        assert_eq!(controller.scene().camera().aspect, 1.0);
        assert_eq!(controller.scene().surface().pixel_ratio(), 2.0);
        assert_eq!(controller.scene().viewport().width, 800);
    }
}
