//! Browser media glue: object URLs, data-URL decoding and downloads.
//!
//! SYSTEM CONTEXT
//! ==============
//! The upload state machine only sees [`ObjectHandles`]; this module is the
//! browser implementation. Backend media arrives as `data:` URLs, which are
//! decoded into an in-memory blob so the `<video>` element and the download
//! link both work from a revocable `blob:` URL.
//!
//! Outside the browser there is no blob to point at, so [`BrowserHandles`]
//! refuses to create preview handles and passes media references through.

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

use crate::state::upload::{LocalFile, ObjectHandles};

/// File name offered when saving a processed video.
pub const DOWNLOAD_FILENAME: &str = "processed_video.mp4";

/// Browser file object carried by [`LocalFile`].
#[cfg(feature = "hydrate")]
pub type BrowserBlob = web_sys::File;
#[cfg(not(feature = "hydrate"))]
pub type BrowserBlob = ();

/// Parts of a `data:` URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataUrl<'a> {
    pub media_type: &'a str,
    pub base64: bool,
    pub data: &'a str,
}

/// Split a `data:[<type>][;base64],<data>` reference. Returns `None` for
/// anything that is not a data URL.
pub fn parse_data_url(url: &str) -> Option<DataUrl<'_>> {
    let rest = url.strip_prefix("data:")?;
    let (header, data) = rest.split_once(',')?;
    let mut params = header.split(';');
    let media_type = params.next().unwrap_or_default();
    let base64 = params.any(|p| p.eq_ignore_ascii_case("base64"));
    Some(DataUrl { media_type, base64, data })
}

/// Bytes of a binary string as produced by `atob` (one char per byte).
pub fn latin1_bytes(binary: &str) -> Option<Vec<u8>> {
    binary.chars().map(|c| u8::try_from(c).ok()).collect()
}

/// Browser file sizes arrive as `f64`; clamp into a byte count.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn byte_len(size: f64) -> u64 {
    if size.is_finite() && size > 0.0 { size as u64 } else { 0 }
}

/// Whether `url` is a revocable object URL.
pub fn is_object_url(url: &str) -> bool {
    url.starts_with("blob:")
}

/// [`ObjectHandles`] backed by `URL.createObjectURL` / `URL.revokeObjectURL`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHandles;

#[cfg(feature = "hydrate")]
impl ObjectHandles<BrowserBlob> for BrowserHandles {
    fn create_from_file(&mut self, file: &LocalFile<BrowserBlob>) -> Result<String, String> {
        web_sys::Url::create_object_url_with_blob(&file.blob).map_err(|e| js_error_message(&e))
    }

    fn create_from_media(&mut self, media: &str) -> Result<String, String> {
        let Some(data_url) = parse_data_url(media).filter(|d| d.base64) else {
            return Ok(media.to_owned());
        };
        let blob = decode_base64_blob(&data_url)?;
        web_sys::Url::create_object_url_with_blob(&blob).map_err(|e| js_error_message(&e))
    }

    fn release(&mut self, url: &str) {
        if is_object_url(url) {
            if let Err(e) = web_sys::Url::revoke_object_url(url) {
                leptos::logging::warn!("revoke object url failed: {}", js_error_message(&e));
            }
        }
    }
}

#[cfg(not(feature = "hydrate"))]
impl ObjectHandles<BrowserBlob> for BrowserHandles {
    fn create_from_file(&mut self, _file: &LocalFile<BrowserBlob>) -> Result<String, String> {
        Err("object URLs are only available in the browser".to_owned())
    }

    fn create_from_media(&mut self, media: &str) -> Result<String, String> {
        Ok(media.to_owned())
    }

    fn release(&mut self, _url: &str) {}
}

#[cfg(feature = "hydrate")]
fn decode_base64_blob(data_url: &DataUrl<'_>) -> Result<web_sys::Blob, String> {
    let window = web_sys::window().ok_or("no window")?;
    let binary = window.atob(data_url.data).map_err(|e| js_error_message(&e))?;
    let bytes = latin1_bytes(&binary).ok_or("media is not valid base64")?;

    let array = js_sys::Uint8Array::from(bytes.as_slice());
    let parts = js_sys::Array::of1(&array);
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(data_url.media_type);
    web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(|e| js_error_message(&e))
}

/// Best-effort text for a thrown JS value.
#[cfg(feature = "hydrate")]
pub fn js_error_message(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

/// Save `url` through a temporary `<a download>` link.
///
/// # Errors
///
/// Returns a message when the document or anchor element is unavailable.
#[cfg(feature = "hydrate")]
pub fn trigger_download(url: &str, file_name: &str) -> Result<(), String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window().and_then(|w| w.document()).ok_or("no document")?;
    let body = document.body().ok_or("no document body")?;
    let anchor = document
        .create_element("a")
        .map_err(|e| js_error_message(&e))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "anchor element unavailable".to_owned())?;
    anchor.set_href(url);
    anchor.set_download(file_name);
    body.append_child(&anchor).map_err(|e| js_error_message(&e))?;
    anchor.click();
    anchor.remove();
    Ok(())
}
