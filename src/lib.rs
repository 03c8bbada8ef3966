//! Authgate - browser-side session layer
//!
//! Determines whether a visitor is signed in, keeps that across reloads,
//! and gates protected views, built with Leptos and WebAssembly.

pub mod app;
pub mod core;
#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod logging;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    use crate::core::AuthConfig;
    use leptos::prelude::*;

    console_error_panic_hook::set_once();
    crate::logging::init_browser_logging();

    // Refuse to start with an ambiguous override flag
    let config = match AuthConfig::from_build_env() {
        Ok(config) => config,
        Err(err) => panic!("Invalid auth configuration: {}", err),
    };
    leptos::mount::hydrate_body(move || view! { <App config/> });
}
