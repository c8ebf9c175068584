use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tone-mapping operator requested from the rendering engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ToneMapping {
    /// No tone mapping.
    None,
    /// Linear exposure scaling.
    Linear,
    /// Reinhard operator.
    Reinhard,
    /// ACES filmic curve.
    #[default]
    AcesFilmic,
}

/// Output color space requested from the rendering engine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// sRGB output encoding.
    #[default]
    Srgb,
    /// Linear output.
    Linear,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Renderer", inline)]
#[serde(default)]
/// Render surface parameters handed to the external engine.
pub struct RendererOptions {
    /// Multisample anti-aliasing on the output surface.
    #[schemars(title = "Anti-aliasing")]
    pub antialias: bool,
    /// Upper bound applied to the device pixel ratio.
    #[schemars(title = "Max Pixel Ratio", range(min = 1.0, max = 4.0), extend("step" = 0.5))]
    pub max_pixel_ratio: f32,
    /// Tone-mapping operator.
    #[schemars(title = "Tone Mapping")]
    pub tone_mapping: ToneMapping,
    /// Tone-mapping exposure.
    #[schemars(title = "Exposure", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub exposure: f32,
    /// Output color space.
    #[schemars(skip)]
    pub output_color_space: ColorSpace,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            antialias: true,
            max_pixel_ratio: 2.0,
            tone_mapping: ToneMapping::AcesFilmic,
            exposure: 1.2,
            output_color_space: ColorSpace::Srgb,
        }
    }
}
