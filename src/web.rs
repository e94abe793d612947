//! Browser-side collaborators: clock / frame scheduling, the `window.confetti`
//! particle renderer and the viewport width lookup.

use std::cell::RefCell;

use gloo::timers::callback::Timeout;
use js_sys::{Function, JSON, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::burst::{BurstConfig, ParticleSink, Scheduler};
use crate::error::{Error, Result, describe};

pub(crate) fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

/// `window.innerWidth` in CSS px. Falls back to a desktop width when the
/// value is unavailable.
pub(crate) fn viewport_width() -> f64 {
    window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(1024.0)
}

/// requestAnimationFrame / setTimeout on the page's event loop.
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn now(&self) -> f64 {
        performance_now()
    }

    fn request_frame(&self, cb: Box<dyn FnOnce()>) {
        let Some(w) = window() else {
            return;
        };
        let js_cb = Closure::once_into_js(move |_ts: f64| cb());
        if let Err(e) = w.request_animation_frame(js_cb.unchecked_ref()) {
            crate::diag::warn(&format!("requestAnimationFrame failed: {}", describe(&e)));
        }
    }

    fn after(&self, delay_ms: u32, cb: Box<dyn FnOnce()>) {
        Timeout::new(delay_ms, cb).forget();
    }
}

/// Particle renderer exposed by the host page as `window.confetti`
/// (canvas-confetti). The function is looked up on first use and kept.
#[derive(Default)]
pub struct ConfettiSink {
    func: RefCell<Option<Function>>,
}

impl ConfettiSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn function(&self) -> Result<Function> {
        if let Some(func) = self.func.borrow().as_ref() {
            return Ok(func.clone());
        }
        let w = window().ok_or(Error::NoWindow)?;
        let value = Reflect::get(&w, &JsValue::from_str("confetti"))
            .map_err(|e| Error::Particles(describe(&e)))?;
        let func = value
            .dyn_into::<Function>()
            .map_err(|_| Error::Particles("window.confetti is not a function".into()))?;
        *self.func.borrow_mut() = Some(func.clone());
        Ok(func)
    }
}

impl ParticleSink for ConfettiSink {
    fn fire(&self, config: &BurstConfig) -> Result<()> {
        let func = self.function()?;
        let text = serde_json::to_string(config)?;
        let opts = JSON::parse(&text).map_err(|e| Error::Particles(describe(&e)))?;
        func.call1(&JsValue::NULL, &opts)
            .map_err(|e| Error::Particles(describe(&e)))?;
        Ok(())
    }
}
