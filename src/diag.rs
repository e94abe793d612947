//! Console diagnostics. Browser builds go through `gloo::console`; native
//! builds (unit tests) fall back to stderr since the JS console imports are
//! not callable off wasm.

#[cfg(target_arch = "wasm32")]
pub(crate) fn info(msg: &str) {
    gloo::console::log!(msg);
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn debug(msg: &str) {
    gloo::console::debug!(msg);
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn warn(msg: &str) {
    gloo::console::warn!(msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn info(msg: &str) {
    eprintln!("[info] {msg}");
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn debug(msg: &str) {
    eprintln!("[debug] {msg}");
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn warn(msg: &str) {
    eprintln!("[warn] {msg}");
}
