use std::time::Duration;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlIFrameElement};

use crate::error::VitrineError;
use crate::options::OverlayOptions;
use crate::overlay::{OverlayView, Panel, PanelTransform};

/// Overlay made of two fixed-position `div`s and an `iframe`.
///
/// The browser runs the transitions: each panel carries a CSS `transition`
/// built from the overlay options, so setting a target opacity or scale
/// is all the controller has to do. The `at` stamps are ignored; changes
/// apply on the next paint. Showing a panel forces a style flush so a fade
/// requested in the same frame still animates from transparent.
#[derive(Debug)]
pub struct DomOverlay {
    background: HtmlElement,
    content: HtmlElement,
}

impl DomOverlay {
    /// Build the panels and append them to `document.body`.
    pub fn create(
        document: &Document,
        options: &OverlayOptions,
    ) -> Result<Self, VitrineError> {
        let body = document
            .body()
            .ok_or_else(|| VitrineError::Web("document has no body".into()))?;

        let easing = options.easing.css_keyword();
        let background_transition =
            format!("opacity {}ms {easing}", options.background_fade_ms);
        let content_transition = format!(
            "opacity {ms}ms {easing}, transform {ms}ms {easing}",
            ms = options.content_fade_ms
        );
        let start_transform = content_transform(options.content_start_scale);

        let background = create_div(document, "vitrine-overlay-background")?;
        set_styles(
            &background,
            &[
                ("position", "fixed"),
                ("inset", "0"),
                ("background", "rgba(0, 0, 0, 0.6)"),
                ("z-index", "10"),
                ("display", "none"),
                ("opacity", "0"),
                ("transition", background_transition.as_str()),
            ],
        );

        let content = create_div(document, "vitrine-overlay-content")?;
        set_styles(
            &content,
            &[
                ("position", "fixed"),
                ("top", "50%"),
                ("left", "50%"),
                ("width", "80vw"),
                ("height", "80vh"),
                ("z-index", "11"),
                ("display", "none"),
                ("opacity", "0"),
                ("transform", start_transform.as_str()),
                ("transition", content_transition.as_str()),
            ],
        );

        let frame = document
            .create_element("iframe")?
            .dyn_into::<HtmlIFrameElement>()
            .map_err(|_| VitrineError::Web("iframe element expected".into()))?;
        frame.set_src(&options.iframe_url);
        set_styles(
            &frame,
            &[("width", "100%"), ("height", "100%"), ("border", "0")],
        );

        let _ = content.append_child(&frame)?;
        let _ = body.append_child(&background)?;
        let _ = body.append_child(&content)?;

        Ok(Self {
            background,
            content,
        })
    }

    fn element(&self, panel: Panel) -> &HtmlElement {
        match panel {
            Panel::Background => &self.background,
            Panel::Content => &self.content,
        }
    }
}

impl OverlayView for DomOverlay {
    fn set_visible(&mut self, panel: Panel, visible: bool, _at: Duration) {
        let display = if visible { "block" } else { "none" };
        let element = self.element(panel);
        set_styles(element, &[("display", display)]);
        if visible {
            // Flush styles so the fade starts from the displayed,
            // transparent state.
            let _ = element.offset_width();
        }
        log::debug!("{} panel display: {display}", panel.name());
    }

    fn set_opacity(&mut self, panel: Panel, opacity: f32, _at: Duration) {
        let value = opacity.clamp(0.0, 1.0).to_string();
        set_styles(self.element(panel), &[("opacity", value.as_str())]);
    }

    fn set_transform(
        &mut self,
        panel: Panel,
        transform: PanelTransform,
        _at: Duration,
    ) {
        let value = match panel {
            Panel::Content => content_transform(transform.scale),
            Panel::Background => format!("scale({})", transform.scale),
        };
        set_styles(self.element(panel), &[("transform", value.as_str())]);
    }
}

/// The content panel stays centered on the viewport while it scales.
fn content_transform(scale: f32) -> String {
    format!("translate(-50%, -50%) scale({scale})")
}

fn create_div(document: &Document, id: &str) -> Result<HtmlElement, VitrineError> {
    let div = document
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| VitrineError::Web("div element expected".into()))?;
    div.set_id(id);
    Ok(div)
}

fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in styles {
        if let Err(e) = style.set_property(property, value) {
            log::warn!("failed to set {property}: {e:?}");
        }
    }
}
