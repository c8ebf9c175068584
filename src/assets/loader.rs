use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;

use super::handle::AssetHandle;
use crate::error::VitrineError;
use crate::scene::{NodeDescription, SceneNode};

/// How an environment texture is wrapped around the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureMapping {
    /// Equirectangular map used for image-based reflections.
    #[default]
    EquirectangularReflection,
}

/// An HDR environment map, validated but not decoded.
///
/// Decoding stays with the rendering engine; this records which image the
/// scene uses and how it is mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentMap {
    /// Where the image came from.
    pub source: String,
    /// Encoded size in bytes.
    pub byte_len: usize,
    /// Texture mapping mode.
    pub mapping: TextureMapping,
}

/// Radiance HDR files start with one of these magic lines.
const RADIANCE_MAGIC: [&[u8]; 2] = [b"#?RADIANCE", b"#?RGBE"];

impl EnvironmentMap {
    /// Validate a Radiance `.hdr` payload.
    pub fn from_radiance(
        source: impl Into<String>,
        bytes: &[u8],
    ) -> Result<Self, VitrineError> {
        let source = source.into();
        if !RADIANCE_MAGIC.iter().any(|magic| bytes.starts_with(magic)) {
            return Err(VitrineError::AssetLoad(format!(
                "{source} is not a Radiance HDR image"
            )));
        }
        Ok(Self {
            source,
            byte_len: bytes.len(),
            mapping: TextureMapping::EquirectangularReflection,
        })
    }
}

/// Parse a JSON node description into a mesh hierarchy.
pub fn parse_description(text: &str) -> Result<SceneNode, VitrineError> {
    let desc: NodeDescription = serde_json::from_str(text)?;
    Ok(SceneNode::from(desc))
}

/// Loads mesh hierarchies.
///
/// Implementations settle `handle` exactly once, either before returning or
/// later from the event loop.
pub trait MeshLoader {
    /// Start loading the mesh at `url`.
    fn load_mesh(&self, url: &str, handle: AssetHandle<SceneNode>);
}

/// Loads HDR environment maps.
pub trait EnvironmentLoader {
    /// Start loading the environment map at `url`.
    fn load_environment(&self, url: &str, handle: AssetHandle<EnvironmentMap>);
}

/// Loads assets from a directory on disk, resolving synchronously.
///
/// URLs are resolved relative to `root`; a leading `/` is ignored so
/// browser-style absolute paths work unchanged.
#[derive(Debug, Clone)]
pub struct FileLoader {
    root: PathBuf,
}

impl FileLoader {
    /// Loader rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute path for `url`.
    #[must_use]
    pub fn path_for(&self, url: &str) -> PathBuf {
        self.root.join(Path::new(url.trim_start_matches('/')))
    }

    /// Read the file behind `url`, reporting progress on `handle` per chunk.
    fn read<T>(
        &self,
        url: &str,
        handle: &AssetHandle<T>,
    ) -> Result<Vec<u8>, VitrineError> {
        let mut file = File::open(self.path_for(url))?;
        let total = file.metadata()?.len();
        let mut bytes = Vec::with_capacity(total as usize);
        let mut chunk = [0_u8; READ_CHUNK];
        loop {
            let n = file.read(&mut chunk)?;
            if n == 0 {
                break;
            }
            bytes.extend_from_slice(&chunk[..n]);
            handle.progress(bytes.len() as u64, total);
        }
        Ok(bytes)
    }
}

/// Bytes read between progress reports.
const READ_CHUNK: usize = 64 * 1024;

impl MeshLoader for FileLoader {
    fn load_mesh(&self, url: &str, handle: AssetHandle<SceneNode>) {
        let result = self.read(url, &handle).and_then(|bytes| {
            let text = String::from_utf8(bytes).map_err(|e| {
                VitrineError::AssetLoad(format!("{url} is not UTF-8: {e}"))
            })?;
            parse_description(&text)
        });
        match result {
            Ok(node) => handle.resolve(node),
            Err(e) => handle.fail(e.to_string()),
        }
    }
}

impl EnvironmentLoader for FileLoader {
    fn load_environment(&self, url: &str, handle: AssetHandle<EnvironmentMap>) {
        let result = self
            .read(url, &handle)
            .and_then(|bytes| EnvironmentMap::from_radiance(url, &bytes));
        match result {
            Ok(map) => handle.resolve(map),
            Err(e) => handle.fail(e.to_string()),
        }
    }
}

/// Serves meshes registered in memory. Unknown URLs fail.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    meshes: FxHashMap<String, SceneNode>,
    environments: FxHashMap<String, EnvironmentMap>,
}

impl MemoryLoader {
    /// Empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh under `url`.
    #[must_use]
    pub fn with_mesh(mut self, url: impl Into<String>, node: SceneNode) -> Self {
        let _ = self.meshes.insert(url.into(), node);
        self
    }

    /// Register an environment map under its source URL.
    #[must_use]
    pub fn with_environment(mut self, map: EnvironmentMap) -> Self {
        let _ = self.environments.insert(map.source.clone(), map);
        self
    }
}

impl MeshLoader for MemoryLoader {
    fn load_mesh(&self, url: &str, handle: AssetHandle<SceneNode>) {
        match self.meshes.get(url) {
            Some(node) => handle.resolve(node.clone()),
            None => handle.fail(format!("no mesh registered at {url}")),
        }
    }
}

impl EnvironmentLoader for MemoryLoader {
    fn load_environment(&self, url: &str, handle: AssetHandle<EnvironmentMap>) {
        match self.environments.get(url) {
            Some(map) => handle.resolve(map.clone()),
            None => handle.fail(format!("no environment registered at {url}")),
        }
    }
}
