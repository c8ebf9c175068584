use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Which model a scene variant loads and whether it is pickable.
pub struct SceneOptions {
    /// Human-readable variant name.
    #[schemars(skip)]
    pub name: String,
    /// URL of the ground-truth model's node description.
    #[schemars(skip)]
    pub model_url: String,
    /// Whether clicking the overlay target reveals the iframe overlay.
    #[schemars(title = "Picking")]
    pub picking: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            name: "portfolio".into(),
            model_url: "models/portfolio.json".into(),
            picking: false,
        }
    }
}
