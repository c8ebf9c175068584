//! Crate-level error types.

use std::fmt;

/// Errors produced by the vitrine crate.
#[derive(Debug)]
pub enum VitrineError {
    /// An asset (mesh or environment map) failed to load. The payload is
    /// the loader's description of the failure.
    AssetLoad(String),
    /// An asset load was cancelled before it resolved.
    AssetCancelled,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Malformed mesh description or session script.
    Description(serde_json::Error),
    /// Unknown built-in scene preset name.
    UnknownPreset(String),
    /// Browser API failure (only produced with the `web` feature).
    Web(String),
}

impl fmt::Display for VitrineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AssetLoad(msg) => write!(f, "asset load error: {msg}"),
            Self::AssetCancelled => f.write_str("asset load cancelled"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Description(e) => write!(f, "description error: {e}"),
            Self::UnknownPreset(name) => {
                write!(f, "unknown scene preset: {name}")
            }
            Self::Web(msg) => write!(f, "web error: {msg}"),
        }
    }
}

impl std::error::Error for VitrineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Description(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VitrineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for VitrineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Description(e)
    }
}

#[cfg(feature = "web")]
impl From<wasm_bindgen::JsValue> for VitrineError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Web(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(feature = "web")]
impl From<VitrineError> for wasm_bindgen::JsValue {
    fn from(e: VitrineError) -> Self {
        Self::from_str(&e.to_string())
    }
}
