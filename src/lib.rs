//! Be Mine core crate.
//!
//! A single-page "will you be my Valentine?" widget. The Yes button grows each
//! time the visitor looks for another option, the No button jumps between safe
//! spots whenever a pointer or finger gets close, and accepting sets off an
//! arpeggio plus a few seconds of confetti.
//!
//! The state machine (`widget`), placement (`positions`), decoration
//! (`decor`), sound (`audio`) and particle scheduling (`burst`, `celebrate`)
//! are plain Rust and run under `cargo test` on the host. `view` and `web` are
//! the browser shell.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod burst;
pub mod celebrate;
pub mod config;
pub mod decor;
mod diag;
pub mod error;
pub mod positions;
mod view;
pub mod web;
pub mod widget;

pub use config::DeviceClass;
pub use error::Error;
pub use positions::{SAFE_POSITIONS, SafePosition};
pub use widget::{Phase, Widget};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Build the widget inside the element with id `root_id`, or `<body>` when
/// omitted.
#[wasm_bindgen]
pub fn mount(root_id: Option<String>) -> Result<(), JsValue> {
    view::mount(root_id.as_deref())?;
    Ok(())
}

/// Whether the visitor has said yes.
#[wasm_bindgen]
pub fn is_accepted() -> bool {
    view::is_accepted()
}
