use js_sys::Uint8Array;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::Response;

use crate::assets::{
    parse_description, AssetHandle, EnvironmentLoader, EnvironmentMap,
    MeshLoader,
};
use crate::error::VitrineError;
use crate::scene::SceneNode;

/// Loads assets over HTTP with `window.fetch`.
///
/// Requests run on the browser event loop; each handle settles when its
/// response has been read and parsed.
#[derive(Debug, Clone, Default)]
pub struct FetchLoader {
    base: String,
}

impl FetchLoader {
    /// Loader resolving URLs against `base` (may be empty).
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url_for(&self, url: &str) -> String {
        if self.base.is_empty() {
            url.to_owned()
        } else {
            format!(
                "{}/{}",
                self.base.trim_end_matches('/'),
                url.trim_start_matches('/')
            )
        }
    }
}

async fn fetch(url: &str) -> Result<Response, VitrineError> {
    let window = web_sys::window()
        .ok_or_else(|| VitrineError::Web("no window".into()))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await?
        .dyn_into::<Response>()
        .map_err(|_| VitrineError::Web("fetch did not return a Response".into()))?;
    if !response.ok() {
        return Err(VitrineError::AssetLoad(format!(
            "{url}: HTTP {}",
            response.status()
        )));
    }
    Ok(response)
}

/// Body size announced by the server, 0 when unknown.
fn content_length(response: &Response) -> u64 {
    response
        .headers()
        .get("content-length")
        .ok()
        .flatten()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

async fn fetch_bytes<T>(
    url: &str,
    handle: &AssetHandle<T>,
) -> Result<Vec<u8>, VitrineError> {
    let response = fetch(url).await?;
    let total = content_length(&response);
    handle.progress(0, total);
    let buffer = JsFuture::from(response.array_buffer()?).await?;
    let bytes = Uint8Array::new(&buffer).to_vec();
    let loaded = bytes.len() as u64;
    handle.progress(loaded, total.max(loaded));
    Ok(bytes)
}

async fn fetch_text<T>(
    url: &str,
    handle: &AssetHandle<T>,
) -> Result<String, VitrineError> {
    let bytes = fetch_bytes(url, handle).await?;
    String::from_utf8(bytes)
        .map_err(|e| VitrineError::AssetLoad(format!("{url}: body is not UTF-8: {e}")))
}

impl MeshLoader for FetchLoader {
    fn load_mesh(&self, url: &str, handle: AssetHandle<SceneNode>) {
        let url = self.url_for(url);
        spawn_local(async move {
            let result = fetch_text(&url, &handle)
                .await
                .and_then(|text| parse_description(&text));
            match result {
                Ok(node) => handle.resolve(node),
                Err(e) => handle.fail(e.to_string()),
            }
        });
    }
}

impl EnvironmentLoader for FetchLoader {
    fn load_environment(&self, url: &str, handle: AssetHandle<EnvironmentMap>) {
        let source = url.to_owned();
        let url = self.url_for(url);
        spawn_local(async move {
            let result = fetch_bytes(&url, &handle)
                .await
                .and_then(|bytes| EnvironmentMap::from_radiance(source, &bytes));
            match result {
                Ok(map) => handle.resolve(map),
                Err(e) => handle.fail(e.to_string()),
            }
        });
    }
}
