//! Backend address resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! One external setting, `VISION_API_URL`, selects the analysis backend. The
//! host renders it into a `<meta>` tag so a single WASM bundle can be pointed
//! at different backends at deploy time; the build-time value and a local
//! development address act as fallbacks.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Name of the `<meta>` tag carrying the backend address.
pub const API_URL_META: &str = "vision-api-url";

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

const BUILD_API_URL: Option<&str> = option_env!("VISION_API_URL");

const SOCKET_PATH: &str = "/socket.io/?EIO=4&transport=websocket";

/// Resolved backend base address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::resolve(None, BUILD_API_URL)
    }
}

impl ApiConfig {
    /// Build from an explicit base address. Blank input falls back to
    /// [`DEFAULT_API_URL`]; trailing slashes are trimmed.
    pub fn new(base_url: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() { DEFAULT_API_URL } else { trimmed };
        Self { base_url: base_url.to_owned() }
    }

    /// First non-blank of the runtime value and the build-time value.
    pub fn resolve(runtime: Option<&str>, build: Option<&str>) -> Self {
        let chosen = [runtime, build]
            .into_iter()
            .flatten()
            .find(|value| !value.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL);
        Self::new(chosen)
    }

    /// Read the address the host rendered into the document head.
    #[cfg(feature = "hydrate")]
    pub fn from_document() -> Self {
        let runtime = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|doc| doc.query_selector(&format!("meta[name=\"{API_URL_META}\"]")).ok().flatten())
            .and_then(|el| el.get_attribute("content"));
        Self::resolve(runtime.as_deref(), BUILD_API_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST` target for file analysis.
    pub fn analyze_url(&self) -> String {
        format!("{}/analyze", self.base_url)
    }

    /// WebSocket address of the realtime channel.
    pub fn socket_url(&self) -> String {
        let base = &self.base_url;
        let ws_base = if let Some(rest) = base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else if base.starts_with("ws://") || base.starts_with("wss://") {
            base.clone()
        } else {
            format!("ws://{base}")
        };
        format!("{ws_base}{SOCKET_PATH}")
    }
}
