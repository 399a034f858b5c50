//! HTTP client for the `/analyze` endpoint.
//!
//! Client-side (hydrate): a multipart `POST` via `gloo-net`.
//! Server-side (SSR): a stub returning a connectivity error, since uploads
//! only make sense in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures become [`AppError::Connectivity`]; any non-success
//! status becomes [`AppError::Backend`] carrying the server's `error` text
//! verbatim, or a generic message when the body is unusable.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use wire::{AnalysisResponse, ErrorResponse};

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::state::upload::LocalFile;
use crate::util::media::BrowserBlob;

/// Shown when a failed response carries no usable `error` field.
pub const GENERIC_FAILURE: &str = "Failed to process file";

/// Multipart field name the backend reads the upload from.
#[cfg(any(test, feature = "hydrate"))]
const FILE_FIELD: &str = "file";

/// Message for a non-success response body.
pub fn backend_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|resp| resp.error)
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_owned())
}

#[cfg(any(test, feature = "hydrate"))]
fn transport_error_message(detail: &str) -> String {
    format!("Could not reach the analysis server: {detail}")
}

/// Interpret a finished `/analyze` exchange.
///
/// # Errors
///
/// [`AppError::Backend`] for a non-success status or an unreadable success
/// body.
pub fn parse_analysis_reply(ok: bool, body: &str) -> Result<AnalysisResponse, AppError> {
    if !ok {
        return Err(AppError::Backend(backend_error_message(body)));
    }
    serde_json::from_str(body)
        .map_err(|e| AppError::Backend(format!("Unexpected response from the analysis server: {e}")))
}

/// Upload `file` for analysis and wait for the result.
///
/// # Errors
///
/// [`AppError::Connectivity`] when the request cannot be sent or read,
/// [`AppError::Backend`] when the server rejects it.
pub async fn analyze(config: &ApiConfig, file: &LocalFile<BrowserBlob>) -> Result<AnalysisResponse, AppError> {
    #[cfg(feature = "hydrate")]
    {
        use crate::util::media::js_error_message;

        let connectivity = |detail: String| AppError::Connectivity(transport_error_message(&detail));

        let form = web_sys::FormData::new().map_err(|e| connectivity(js_error_message(&e)))?;
        form.append_with_blob_and_filename(FILE_FIELD, &file.blob, &file.name)
            .map_err(|e| connectivity(js_error_message(&e)))?;

        let url = config.analyze_url();
        leptos::logging::log!("uploading {} ({} bytes) to {url}", file.name, file.size);
        let resp = gloo_net::http::Request::post(&url)
            .body(form)
            .map_err(|e| connectivity(e.to_string()))?
            .send()
            .await
            .map_err(|e| connectivity(e.to_string()))?;
        let body = resp.text().await.map_err(|e| connectivity(e.to_string()))?;
        if !resp.ok() {
            leptos::logging::warn!("analysis failed with status {}", resp.status());
        }
        parse_analysis_reply(resp.ok(), &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, file);
        Err(AppError::Connectivity("analysis is only available in the browser".to_owned()))
    }
}
