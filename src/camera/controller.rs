use glam::{Vec2, Vec3};

use crate::camera::core::Camera;
use crate::options::CameraOptions;

/// Orbit-style camera controls around a target point.
///
/// Tracks spherical coordinates of the eye relative to the target. Every
/// gesture is ignored while the controls are disabled, which is how the
/// reveal overlay freezes the view.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    enabled: bool,
    target: Vec3,
    /// Azimuth around +Y, radians.
    theta: f32,
    /// Polar angle from +Y, radians.
    phi: f32,
    distance: f32,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

const MIN_POLAR: f32 = 0.01;

impl OrbitControls {
    /// Controls orbiting the preset target from the preset position.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        let mut controls = Self {
            enabled: true,
            target: options.target,
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,
            distance: 1.0,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            min_distance: options.min_distance,
            max_distance: options.max_distance,
        };
        controls.look_from(options.position);
        controls
    }

    /// Reset spherical state so the eye sits at `eye`.
    pub fn look_from(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        self.distance = offset
            .length()
            .clamp(self.min_distance, self.max_distance);
        if offset.length_squared() > 0.0 {
            self.theta = offset.x.atan2(offset.z);
            self.phi = (offset.y / offset.length()).clamp(-1.0, 1.0).acos();
        }
    }

    /// Whether gestures currently move the camera.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable gesture handling.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::debug!("orbit controls enabled: {enabled}");
        }
        self.enabled = enabled;
    }

    /// Current orbit target.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Eye position implied by the current spherical state.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + Vec3::new(
                sin_phi * sin_theta,
                cos_phi,
                sin_phi * cos_theta,
            ) * self.distance
    }

    /// Orbit by a drag delta in pixels.
    pub fn rotate(&mut self, camera: &mut Camera, delta: Vec2) {
        if !self.enabled {
            return;
        }
        let step = self.rotate_speed * 0.01;
        self.theta -= delta.x * step;
        self.phi = (self.phi - delta.y * step)
            .clamp(MIN_POLAR, std::f32::consts::PI - MIN_POLAR);
        self.apply(camera);
    }

    /// Move the target in the view plane by a drag delta in pixels.
    pub fn pan(&mut self, camera: &mut Camera, delta: Vec2) {
        if !self.enabled {
            return;
        }
        let forward = camera.forward();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);
        // Scale with distance so a drag feels the same near and far.
        let scale = self.pan_speed * self.distance * 0.002;
        self.target += (-right * delta.x + up * delta.y) * scale;
        self.apply(camera);
    }

    /// Dolly toward (positive) or away from the target.
    pub fn zoom(&mut self, camera: &mut Camera, delta: f32) {
        if !self.enabled {
            return;
        }
        self.distance = (self.distance * (1.0 - delta * self.zoom_speed))
            .clamp(self.min_distance, self.max_distance);
        self.apply(camera);
    }

    /// Write the orbit state into `camera`.
    pub fn apply(&self, camera: &mut Camera) {
        camera.eye = self.eye();
        camera.target = self.target;
        log::debug!("camera: {:?} target: {:?}", camera.eye, camera.target);
    }
}
