//! # client
//!
//! Leptos + WASM frontend for Vision Hub, a dashboard plus a face and emotion
//! recognition tool backed by a remote analysis service.
//!
//! This crate contains pages, components, application state, the `/analyze`
//! HTTP client and the realtime channel client. Rendering happens on the host
//! (SSR) and is hydrated in the browser through [`hydrate`].

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Debug).is_err() {
        leptos::logging::warn!("console logger already installed");
    }
    leptos::mount::hydrate_body(app::App);
}
