//! Asset loading: single-resolution handles and pluggable loaders.
//!
//! Loading is fire-and-forget. A request returns an [`AssetHandle`] right
//! away; the loader settles it once with the asset or a failure
//! description. Failures are logged and never retried, so a scene whose
//! model fails to load keeps rendering with nothing pickable.

mod handle;
mod loader;

pub use handle::{AssetHandle, LoadStatus};
pub use loader::{
    parse_description, EnvironmentLoader, EnvironmentMap, FileLoader,
    MemoryLoader, MeshLoader, TextureMapping,
};

use crate::scene::SceneNode;

/// Front door for asset requests, parameterized by the loader backend.
#[derive(Debug, Clone)]
pub struct AssetRegistry<L> {
    loader: L,
}

impl<L> AssetRegistry<L> {
    /// Registry backed by `loader`.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self { loader }
    }

    /// The loader backend.
    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl<L: MeshLoader> AssetRegistry<L> {
    /// Request the model at `url`.
    #[must_use]
    pub fn load_model(&self, url: &str) -> AssetHandle<SceneNode> {
        log::info!("requesting model {url}");
        let handle = AssetHandle::new(url);
        self.loader.load_mesh(url, handle.clone());
        handle
    }
}

impl<L: EnvironmentLoader> AssetRegistry<L> {
    /// Request the environment map at `url`.
    #[must_use]
    pub fn load_environment(&self, url: &str) -> AssetHandle<EnvironmentMap> {
        log::info!("requesting environment {url}");
        let handle = AssetHandle::new(url);
        self.loader.load_environment(url, handle.clone());
        handle
    }
}
