use crate::assets::AssetHandle;
use crate::scene::SceneNode;

/// Everything the pick controller talks to, handed over at construction.
///
/// Holds the scene provider, the pending model (as returned by the asset
/// registry) and the overlay view. Swapping any of them for a test double
/// is a matter of picking different type parameters.
#[derive(Debug)]
pub struct SceneContext<S, O> {
    /// Camera, controls and ray casting.
    pub scene: S,
    /// The mesh hierarchy holding the pick target.
    pub model: AssetHandle<SceneNode>,
    /// The overlay panels.
    pub overlay: O,
}

impl<S, O> SceneContext<S, O> {
    /// Bundle the collaborators.
    #[must_use]
    pub fn new(scene: S, model: AssetHandle<SceneNode>, overlay: O) -> Self {
        Self {
            scene,
            model,
            overlay,
        }
    }
}
