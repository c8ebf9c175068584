//! Centralized scene options with TOML preset support.
//!
//! All tweakable settings (scene variant, camera, renderer, environment,
//! overlay timing, keybindings) are consolidated here. Options serialize
//! to/from TOML for the scene presets stored in `assets/scene_presets/`.

mod camera;
mod environment;
mod keybindings;
mod overlay;
mod preset;
mod renderer;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use environment::{
    css_hex, rgb, EnvironmentOptions, FogOptions, GridOptions,
};
pub use keybindings::KeybindingOptions;
pub use overlay::{ControlRestore, OverlayOptions};
pub use preset::ScenePreset;
pub use renderer::{ColorSpace, RendererOptions, ToneMapping};
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::VitrineError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[overlay]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Scene variant: model and picking switch.
    pub scene: SceneOptions,
    /// Camera placement and control parameters.
    pub camera: CameraOptions,
    /// Render surface parameters.
    pub renderer: RendererOptions,
    /// HDRI, background, fog and grid.
    pub environment: EnvironmentOptions,
    /// Pick target and overlay timing.
    pub overlay: OverlayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, VitrineError> {
        let mut opts: Self = toml::from_str(content)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VitrineError> {
        let content = std::fs::read_to_string(path).map_err(VitrineError::Io)?;
        Self::from_toml(&content)
    }

    /// Resolve a preset argument: a path to a TOML file if one exists,
    /// otherwise the name of a built-in [`ScenePreset`].
    pub fn resolve(arg: &str) -> Result<Self, VitrineError> {
        let path = Path::new(arg);
        if path.is_file() {
            return Self::load(path);
        }
        arg.parse::<ScenePreset>().map(ScenePreset::options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VitrineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VitrineError::Io)?;
        }
        std::fs::write(path, content).map_err(VitrineError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(std::ffi::OsStr::to_str)
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
