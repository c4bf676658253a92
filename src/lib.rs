#[cfg(any(feature = "ssr", feature = "hydrate"))]
pub mod app;
pub mod content;
pub mod interaction;
pub mod motion;
pub mod viewport;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;

    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    // a second init (hot reload) is harmless
    let _ = console_log::init_with_level(level);
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
