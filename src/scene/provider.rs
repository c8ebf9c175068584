use std::rc::Rc;

use glam::{Affine3A, Vec2};

use super::bounds::Ray;
use super::node::{Intersection, SceneNode};
use super::surface::Viewport;
use crate::camera::Camera;

/// Camera gestures a provider's orbit controls understand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitGesture {
    /// Orbit by a drag delta in pixels.
    Rotate(Vec2),
    /// Pan by a drag delta in pixels.
    Pan(Vec2),
    /// Dolly by a scroll amount.
    Zoom(f32),
    /// Return to the preset camera placement.
    Reset,
}

/// The scene-graph side of the pick controller.
///
/// Owns the camera and its controls. The controller only needs ray
/// projection, subtree intersection and the controls switch; the provided
/// methods cover providers that keep no state for the rest.
pub trait SceneProvider {
    /// The camera rays are cast from.
    fn camera(&self) -> &Camera;

    /// Current output viewport.
    fn viewport(&self) -> Viewport;

    /// Whether orbit controls currently respond to input.
    fn controls_enabled(&self) -> bool;

    /// Enable or disable orbit controls.
    fn set_controls_enabled(&mut self, enabled: bool);

    /// Project a point in normalized device coordinates into a world ray.
    fn cast_ray(&self, ndc: Vec2, camera: &Camera) -> Ray {
        camera.ray_from_ndc(ndc)
    }

    /// Intersect `ray` with `root` (placed at the scene origin), nearest
    /// hit first.
    fn intersect(
        &self,
        ray: &Ray,
        root: &SceneNode,
        recursive: bool,
    ) -> Vec<Intersection> {
        root.intersect(ray, &Affine3A::IDENTITY, recursive)
    }

    /// React to a new viewport.
    fn resize(&mut self, _viewport: Viewport) {}

    /// Apply a camera gesture. Ignored while controls are disabled.
    fn orbit(&mut self, _gesture: OrbitGesture) {}

    /// The model finished loading and joins the scene.
    fn attach_model(&mut self, _model: Rc<SceneNode>) {}
}
