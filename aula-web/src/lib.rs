#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod bootstrap;
pub mod controls;
pub mod dom;
pub mod listeners;
pub mod logger;
pub mod paths;
pub mod speech;
pub mod storage;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(logger::default_level());
    // Saved preferences must be on the page before the first input event.
    if let Err(err) = bootstrap::boot() {
        log::error!("accessibility widget failed to start: {err:#}");
    }
}
