use serde::{Deserialize, Serialize};

/// Size and density of the output surface as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in logical pixels.
    pub width: u32,
    /// Height in logical pixels.
    pub height: u32,
    /// Device pixel ratio.
    pub scale_factor: f32,
}

impl Viewport {
    /// A viewport of `width` × `height` at `scale_factor`.
    #[must_use]
    pub fn new(width: u32, height: u32, scale_factor: f32) -> Self {
        Self {
            width,
            height,
            scale_factor,
        }
    }

    /// Width over height, or 1.0 for a degenerate viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280, 720, 1.0)
    }
}

/// Output size handed to the rendering engine.
///
/// Tracks the logical size and a device pixel ratio clamped to
/// `max_pixel_ratio`, so high-density displays do not multiply the
/// fragment load without bound.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSurface {
    width: u32,
    height: u32,
    pixel_ratio: f32,
    max_pixel_ratio: f32,
}

impl RenderSurface {
    /// Surface sized for `viewport`.
    #[must_use]
    pub fn new(viewport: Viewport, max_pixel_ratio: f32) -> Self {
        let mut surface = Self {
            width: 1,
            height: 1,
            pixel_ratio: 1.0,
            max_pixel_ratio: max_pixel_ratio.max(1.0),
        };
        surface.resize(viewport);
        surface
    }

    /// Apply a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.width = viewport.width.max(1);
        self.height = viewport.height.max(1);
        self.set_pixel_ratio(viewport.scale_factor);
    }

    /// Set the device pixel ratio, clamped to the configured maximum.
    pub fn set_pixel_ratio(&mut self, ratio: f32) {
        self.pixel_ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        };
    }

    /// Logical size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Effective pixel ratio.
    #[must_use]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Drawing-buffer size in physical pixels.
    #[must_use]
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width as f32 * self.pixel_ratio).round() as u32,
            (self.height as f32 * self.pixel_ratio).round() as u32,
        )
    }
}
