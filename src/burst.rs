//! Particle bursts and the time-boxed loop that re-fires them every frame.
//!
//! Rendering is delegated to an external particle library; this module only
//! builds option objects (`BurstConfig`) and decides when to send them.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use crate::config::{
    Budget, CONFETTI_COLORS, HEART_BURST_COLORS, HEART_BURST_SPREAD, SIDE_BURST_SPREAD,
};
use crate::error::Result;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Origin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Options for one burst, serialized with the renderer's camelCase keys.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurstConfig {
    pub particle_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    pub spread: f64,
    pub origin: Origin,
    pub colors: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shapes: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalar: Option<f64>,
}

/// Left and right corner cannons fired on every frame of the loop.
pub fn side_bursts(budget: &Budget) -> [BurstConfig; 2] {
    let side = |angle: f64, x: f64| BurstConfig {
        particle_count: budget.side_burst_particles,
        angle: Some(angle),
        spread: SIDE_BURST_SPREAD,
        origin: Origin {
            x: Some(x),
            y: None,
        },
        colors: CONFETTI_COLORS.to_vec(),
        shapes: Vec::new(),
        scalar: None,
    };
    [side(60.0, 0.0), side(120.0, 1.0)]
}

/// The single large burst from the lower centre after a short delay.
pub fn heart_burst(budget: &Budget) -> BurstConfig {
    BurstConfig {
        particle_count: budget.heart_burst_particles,
        angle: None,
        spread: HEART_BURST_SPREAD,
        origin: Origin {
            x: None,
            y: Some(0.6),
        },
        colors: HEART_BURST_COLORS.to_vec(),
        shapes: vec!["circle"],
        scalar: Some(budget.heart_burst_scalar),
    }
}

/// External particle renderer.
pub trait ParticleSink {
    fn fire(&self, config: &BurstConfig) -> Result<()>;
}

pub fn fire_best_effort(sink: &dyn ParticleSink, config: &BurstConfig) {
    if let Err(e) = sink.fire(config) {
        crate::diag::debug(&format!("burst skipped: {e}"));
    }
}

/// Host event loop. Both callbacks run on the same thread as the caller.
pub trait Scheduler {
    /// Milliseconds on the same clock as deadlines passed to `BurstLoop`.
    fn now(&self) -> f64;
    /// Run `cb` before the next repaint.
    fn request_frame(&self, cb: Box<dyn FnOnce()>);
    /// Run `cb` once after `delay_ms`.
    fn after(&self, delay_ms: u32, cb: Box<dyn FnOnce()>);
}

/// Shared flag that stops a `BurstLoop` at its next frame.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn cancel(&self) {
        self.0.set(true);
    }
    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Whether a loop wants another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Again,
    Done,
}

/// Fires a fixed set of bursts once per frame until `deadline_ms`.
///
/// The first frame fires unconditionally at start; a frame observed at or
/// after the deadline (or after cancellation) fires nothing further. Sink
/// failures are counted but only the first one is logged.
pub struct BurstLoop {
    configs: Vec<BurstConfig>,
    deadline_ms: f64,
    cancel: CancelToken,
    frames: u32,
    failures: u32,
}

impl BurstLoop {
    pub fn new(configs: Vec<BurstConfig>, deadline_ms: f64, cancel: CancelToken) -> Self {
        Self {
            configs,
            deadline_ms,
            cancel,
            frames: 0,
            failures: 0,
        }
    }

    pub fn deadline_ms(&self) -> f64 {
        self.deadline_ms
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    /// Bursts the sink rejected so far.
    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// Fire this frame's bursts and report whether to reschedule.
    pub fn tick(&mut self, now_ms: f64, sink: &dyn ParticleSink) -> Step {
        if self.cancel.is_cancelled() {
            return Step::Done;
        }
        for cfg in &self.configs {
            if let Err(e) = sink.fire(cfg) {
                if self.failures == 0 {
                    crate::diag::debug(&format!("bursts skipped: {e}"));
                }
                self.failures += 1;
            }
        }
        self.frames += 1;
        if now_ms < self.deadline_ms && !self.cancel.is_cancelled() {
            Step::Again
        } else {
            Step::Done
        }
    }
}

/// Drive `lp` on `scheduler` frames: tick now, then resubmit while it asks
/// for more.
pub fn run_loop(mut lp: BurstLoop, sink: Rc<dyn ParticleSink>, scheduler: Rc<dyn Scheduler>) {
    if lp.tick(scheduler.now(), sink.as_ref()) == Step::Done {
        return;
    }
    let next = scheduler.clone();
    scheduler.request_frame(Box::new(move || run_loop(lp, sink, next)));
}
