use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Background color shared by the clear color, fog and ground plane.
const SAGE: u32 = 0x00C5_DBA7;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Environment", inline)]
#[serde(default)]
/// HDRI, background, fog and ground grid settings.
pub struct EnvironmentOptions {
    /// URL of the equirectangular HDR environment map.
    #[schemars(skip)]
    pub hdri_url: String,
    /// Background clear color as `0xRRGGBB`.
    #[schemars(skip)]
    pub background: u32,
    /// Distance fog.
    pub fog: FogOptions,
    /// Ground plane and helper grid.
    pub grid: GridOptions,
}

impl Default for EnvironmentOptions {
    fn default() -> Self {
        Self {
            hdri_url: "hdri/brown_photostudio_02_4k.hdr".into(),
            background: SAGE,
            fog: FogOptions::default(),
            grid: GridOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Fog", inline)]
#[serde(default)]
/// Linear distance fog.
pub struct FogOptions {
    /// Whether fog is applied.
    #[schemars(title = "Fog")]
    pub enabled: bool,
    /// Fog color as `0xRRGGBB`.
    #[schemars(skip)]
    pub color: u32,
    /// Distance where fog starts.
    #[schemars(title = "Fog Near", range(min = 0.0, max = 100.0), extend("step" = 1.0))]
    pub near: f32,
    /// Distance where fog is opaque.
    #[schemars(title = "Fog Far", range(min = 1.0, max = 500.0), extend("step" = 1.0))]
    pub far: f32,
}

impl Default for FogOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            color: SAGE,
            near: 10.0,
            far: 60.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Grid", inline)]
#[serde(default)]
/// Invisible ground plane with a helper grid drawn over it.
pub struct GridOptions {
    /// Whether the ground and grid are added to the scene.
    #[schemars(title = "Grid")]
    pub enabled: bool,
    /// Edge length of the square ground.
    #[schemars(skip)]
    pub size: f32,
    /// Grid line count per side.
    #[schemars(skip)]
    pub divisions: u32,
    /// Grid line opacity.
    #[schemars(title = "Grid Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub opacity: f32,
    /// Center line color as `0xRRGGBB`.
    #[schemars(skip)]
    pub center_color: u32,
    /// Regular line color as `0xRRGGBB`.
    #[schemars(skip)]
    pub line_color: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            size: 200.0,
            divisions: 200,
            opacity: 0.35,
            center_color: 0x008C_8C7A,
            line_color: 0x00A0_A084,
        }
    }
}

/// Split `0xRRGGBB` into `[r, g, b]` channels in 0..=1.
#[must_use]
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// Format `0xRRGGBB` as a CSS hex color.
#[must_use]
pub fn css_hex(hex: u32) -> String {
    format!("#{:06x}", hex & 0x00FF_FFFF)
}
