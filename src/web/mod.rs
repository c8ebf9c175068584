//! Browser binding (feature `web`).
//!
//! Wires DOM events and `requestAnimationFrame` to a [`PickController`]
//! driving a [`Stage`] and a [`DomOverlay`]. Assets are fetched relative to
//! the page.

mod dom;
mod fetch;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Event, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent,
    WheelEvent, Window,
};

pub use self::dom::DomOverlay;
pub use self::fetch::FetchLoader;
use crate::assets::AssetRegistry;
use crate::input::{InputEvent, MouseButton};
use crate::options::{css_hex, Options};
use crate::reveal::{PickController, SceneContext};
use crate::scene::{Stage, Viewport};
use crate::util::clock::SceneClock;

/// Wheel pixels per zoom step.
const WHEEL_STEP: f64 = 100.0;

struct App {
    controller: PickController<Stage, DomOverlay>,
    clock: SceneClock,
    canvas: HtmlCanvasElement,
}

type Shared = Rc<RefCell<App>>;

impl App {
    fn input(&mut self, event: InputEvent) {
        let now = self.clock.now();
        if let Some(outcome) = self.controller.handle_input(event, now) {
            log::debug!("pick: {outcome:?}");
        }
    }

    fn key(&mut self, code: &str) {
        let now = self.clock.now();
        let _ = self.controller.handle_key(code, now);
    }

    fn frame(&mut self) {
        let now = self.clock.frame();
        self.controller.advance(now);
    }

    /// Match the canvas drawing buffer to the stage's output size.
    fn sync_canvas(&self) {
        let (width, height) = self.controller.scene().surface().physical_size();
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

/// Start the scene for `preset` (a built-in name) on the canvas with id
/// `canvas_id`.
#[wasm_bindgen]
pub fn start(preset: &str, canvas_id: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already installed");
    }

    let options = Options::resolve(preset)?;
    let window =
        web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas
        .style()
        .set_property("background", &css_hex(options.environment.background))?;

    let registry = AssetRegistry::new(FetchLoader::default());
    let model = registry.load_model(&options.scene.model_url);
    let environment = registry.load_environment(&options.environment.hdri_url);

    let stage = Stage::new(&options, viewport_of(&window));
    let overlay = DomOverlay::create(&document, &options.overlay)?;
    let controller =
        PickController::new(SceneContext::new(stage, model, overlay), &options);

    let app: Shared = Rc::new(RefCell::new(App {
        controller,
        clock: SceneClock::start(),
        canvas,
    }));
    app.borrow().sync_canvas();

    {
        let app = Rc::clone(&app);
        spawn_local(async move {
            match environment.await {
                Ok(map) => app.borrow_mut().controller.scene_mut().set_environment(map),
                Err(e) => log::warn!("continuing without environment lighting: {e}"),
            }
        });
    }

    bind_listeners(&window, &app)?;
    run_frames(window, app);
    log::info!("scene '{}' started", options.scene.name);
    Ok(())
}

fn viewport_of(window: &Window) -> Viewport {
    let dimension = |value: Result<JsValue, JsValue>, fallback: f64| {
        value.as_ref().ok().and_then(JsValue::as_f64).unwrap_or(fallback)
    };
    Viewport::new(
        dimension(window.inner_width(), 1280.0) as u32,
        dimension(window.inner_height(), 720.0) as u32,
        window.device_pixel_ratio() as f32,
    )
}

fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn pointer(app: &Shared, event: &MouseEvent) {
    let mut app = app.borrow_mut();
    app.input(InputEvent::ModifiersChanged {
        shift: event.shift_key(),
    });
    app.input(InputEvent::CursorMoved {
        x: event.client_x() as f32,
        y: event.client_y() as f32,
    });
}

fn bind_listeners(window: &Window, app: &Shared) -> Result<(), JsValue> {
    let canvas: EventTarget = app.borrow().canvas.clone().into();

    let shared = Rc::clone(app);
    listen(&canvas, "mousedown", move |event| {
        let event: MouseEvent = event.unchecked_into();
        pointer(&shared, &event);
        shared.borrow_mut().input(InputEvent::MouseButton {
            button: MouseButton::from_dom(event.button()),
            pressed: true,
        });
    })?;

    let shared = Rc::clone(app);
    listen(window, "mousemove", move |event| {
        let event: MouseEvent = event.unchecked_into();
        pointer(&shared, &event);
    })?;

    let shared = Rc::clone(app);
    listen(window, "mouseup", move |event| {
        let event: MouseEvent = event.unchecked_into();
        pointer(&shared, &event);
        shared.borrow_mut().input(InputEvent::MouseButton {
            button: MouseButton::from_dom(event.button()),
            pressed: false,
        });
    })?;

    let shared = Rc::clone(app);
    listen(&canvas, "wheel", move |event| {
        event.prevent_default();
        let event: WheelEvent = event.unchecked_into();
        shared.borrow_mut().input(InputEvent::Scroll {
            delta: (-event.delta_y() / WHEEL_STEP) as f32,
        });
    })?;

    let shared = Rc::clone(app);
    listen(window, "keydown", move |event| {
        let event: KeyboardEvent = event.unchecked_into();
        shared.borrow_mut().key(&event.code());
    })?;

    let shared = Rc::clone(app);
    let target = window.clone();
    listen(window, "resize", move |_| {
        let viewport = viewport_of(&target);
        let mut app = shared.borrow_mut();
        app.input(InputEvent::Resized {
            width: viewport.width,
            height: viewport.height,
            scale_factor: viewport.scale_factor,
        });
        app.sync_canvas();
    })?;

    Ok(())
}

fn request_frame(window: &Window, callback: &Closure<dyn FnMut()>) {
    if let Err(e) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {e:?}");
    }
}

fn run_frames(window: Window, app: Shared) {
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = Rc::clone(&slot);
    let target = window.clone();

    *slot.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        app.borrow_mut().frame();
        if let Some(callback) = next.borrow().as_ref() {
            request_frame(&target, callback);
        }
    }));

    if let Some(callback) = slot.borrow().as_ref() {
        request_frame(&window, callback);
    }
}
