use std::rc::Rc;

use glam::Vec3;

use super::bounds::Aabb;
use super::node::SceneNode;
use super::provider::{OrbitGesture, SceneProvider};
use super::surface::{RenderSurface, Viewport};
use crate::assets::EnvironmentMap;
use crate::camera::{Camera, OrbitControls};
use crate::options::{rgb, CameraOptions, EnvironmentOptions, Options};

/// Name of the invisible ground plane node.
pub const GROUND_NODE: &str = "ground";
/// Name of the helper grid node.
pub const GRID_NODE: &str = "grid";

/// Headless scene provider shared by every scene preset.
///
/// Holds the environment nodes (ground plane and grid), the loaded model,
/// the camera with its orbit controls, and the render surface. Drawing is
/// left to the rendering engine; the stage is what it draws from.
#[derive(Debug)]
pub struct Stage {
    root: SceneNode,
    model: Option<Rc<SceneNode>>,
    environment: Option<Rc<EnvironmentMap>>,
    environment_options: EnvironmentOptions,
    camera_options: CameraOptions,
    camera: Camera,
    controls: OrbitControls,
    surface: RenderSurface,
}

impl Stage {
    /// Build the stage for a preset at the given viewport.
    #[must_use]
    pub fn new(options: &Options, viewport: Viewport) -> Self {
        let camera = Camera::from_options(&options.camera, viewport.aspect());
        let controls = OrbitControls::new(&options.camera);
        let surface =
            RenderSurface::new(viewport, options.renderer.max_pixel_ratio);

        log::debug!(
            "stage '{}' at {}x{} (pixel ratio {})",
            options.scene.name,
            viewport.width,
            viewport.height,
            surface.pixel_ratio()
        );

        Self {
            root: build_environment(&options.environment),
            model: None,
            environment: None,
            environment_options: options.environment.clone(),
            camera_options: options.camera.clone(),
            camera,
            controls,
            surface,
        }
    }

    /// Environment nodes (ground and grid).
    #[must_use]
    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    /// The loaded model, once attached.
    #[must_use]
    pub fn model(&self) -> Option<&SceneNode> {
        self.model.as_deref()
    }

    /// Use `map` for image-based lighting.
    pub fn set_environment(&mut self, map: Rc<EnvironmentMap>) {
        log::info!("environment map {}", map.source);
        self.environment = Some(map);
    }

    /// The environment map, once loaded.
    #[must_use]
    pub fn environment(&self) -> Option<&EnvironmentMap> {
        self.environment.as_deref()
    }

    /// Background clear color as linear-agnostic RGB in 0..=1.
    #[must_use]
    pub fn background(&self) -> [f32; 3] {
        rgb(self.environment_options.background)
    }

    /// The output surface.
    #[must_use]
    pub fn surface(&self) -> &RenderSurface {
        &self.surface
    }

    /// The orbit controls.
    #[must_use]
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }
}

/// Invisible ground plane plus the helper grid just above it.
fn build_environment(options: &EnvironmentOptions) -> SceneNode {
    let half = options.grid.size * 0.5;
    let root = SceneNode::group("scene").with_child(SceneNode::mesh(
        GROUND_NODE,
        Aabb::new(Vec3::new(-half, 0.0, -half), Vec3::new(half, 0.0, half)),
    ));
    if !options.grid.enabled {
        return root;
    }
    // Lifted off the ground to avoid z-fighting.
    root.with_child(
        SceneNode::group(GRID_NODE).with_translation(Vec3::new(0.0, 0.001, 0.0)),
    )
}

impl SceneProvider for Stage {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn viewport(&self) -> Viewport {
        let (width, height) = self.surface.size();
        Viewport::new(width, height, self.surface.pixel_ratio())
    }

    fn controls_enabled(&self) -> bool {
        self.controls.enabled()
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls.set_enabled(enabled);
    }

    fn resize(&mut self, viewport: Viewport) {
        self.surface.resize(viewport);
        self.camera.aspect = viewport.aspect();
        log::debug!(
            "resized to {:?} (pixel ratio {})",
            self.surface.size(),
            self.surface.pixel_ratio()
        );
    }

    fn orbit(&mut self, gesture: OrbitGesture) {
        match gesture {
            OrbitGesture::Rotate(delta) => {
                self.controls.rotate(&mut self.camera, delta);
            }
            OrbitGesture::Pan(delta) => {
                self.controls.pan(&mut self.camera, delta);
            }
            OrbitGesture::Zoom(delta) => {
                self.controls.zoom(&mut self.camera, delta);
            }
            OrbitGesture::Reset => {
                if self.controls.enabled() {
                    self.controls = OrbitControls::new(&self.camera_options);
                    self.controls.apply(&mut self.camera);
                }
            }
        }
    }

    fn attach_model(&mut self, model: Rc<SceneNode>) {
        log::info!(
            "model '{}' attached ({} nodes)",
            model.name,
            model.node_count()
        );
        self.model = Some(model);
    }
}
