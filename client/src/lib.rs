//! # dermai-client
//!
//! Leptos + WASM frontend for DermAI: upload a skin-lesion photo, send it to
//! the analysis endpoint, and read or export the educational result.
//!
//! This crate contains pages, components, application state, network
//! helpers, markdown stripping, and PDF report generation. The host server
//! depends on it with `ssr` to render the shell; the browser bundle is built
//! with `hydrate`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
