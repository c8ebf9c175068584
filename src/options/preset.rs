use std::fmt;
use std::str::FromStr;

use glam::Vec3;

use super::Options;
use crate::error::VitrineError;

/// Built-in scene variants.
///
/// All three share one scene provider; they differ only in asset URLs,
/// camera placement, fog and whether the overlay target is pickable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScenePreset {
    /// Portfolio room with fog and grid, no picking.
    Portfolio,
    /// Studio turntable: closer camera, no fog.
    Studio,
    /// Portfolio room where clicking `scheibe` opens the iframe overlay.
    Showcase,
}

impl ScenePreset {
    /// Every built-in preset.
    pub const ALL: [Self; 3] = [Self::Portfolio, Self::Studio, Self::Showcase];

    /// Preset name as used on the command line and in file stems.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Portfolio => "portfolio",
            Self::Studio => "studio",
            Self::Showcase => "showcase",
        }
    }

    /// Comma-separated names of every built-in preset.
    #[must_use]
    pub fn list() -> String {
        Self::ALL.map(Self::name).join(", ")
    }

    /// Full options for this variant.
    #[must_use]
    pub fn options(self) -> Options {
        let mut opts = Options::default();
        opts.scene.name = self.name().into();
        match self {
            Self::Portfolio => {}
            Self::Studio => {
                opts.scene.model_url = "models/studio.json".into();
                opts.camera.position = Vec3::new(3.5, 2.2, 4.0);
                opts.camera.target = Vec3::new(0.0, 1.0, 0.0);
                opts.environment.fog.enabled = false;
                opts.renderer.exposure = 1.0;
            }
            Self::Showcase => {
                opts.scene.model_url = "models/showcase.json".into();
                opts.scene.picking = true;
            }
        }
        opts
    }
}

impl fmt::Display for ScenePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenePreset {
    type Err = VitrineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| VitrineError::UnknownPreset(s.to_owned()))
    }
}
