//! Synthesized sound effects.
//!
//! Tones are described as plain data (`Tone`) and handed to a `ToneSink`. The
//! browser sink (`WebAudio`) owns one lazily created `AudioContext` that is
//! reused for every tone of the session. Callers treat every sink error as
//! non-fatal: sound is decoration.

use std::cell::RefCell;

use web_sys::{AudioContext, OscillatorType};

use crate::config::POP_COOLDOWN_MS;
use crate::error::{Error, Result, describe};

/// C major arpeggio played on acceptance (C5 E5 G5 C6).
pub const CELEBRATION_NOTES_HZ: [f64; 4] = [523.25, 659.25, 783.99, 1046.5];
pub const CELEBRATION_NOTE_STAGGER_S: f64 = 0.1;

/// Gain shape of a single tone. Times are relative to the tone's own start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Envelope {
    /// Start at `peak`, decay exponentially to `floor` by the end of the tone.
    Decay { peak: f64, floor: f64 },
    /// Linear rise from silence to `peak` over `attack_s`, then exponential
    /// decay to `floor` by the end of the tone.
    AttackDecay { attack_s: f64, peak: f64, floor: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub freq_hz: f64,
    /// When set, the pitch glides exponentially to this frequency.
    pub glide_to_hz: Option<f64>,
    /// Offset from "now" on the audio clock.
    pub offset_s: f64,
    pub duration_s: f64,
    pub envelope: Envelope,
}

pub fn celebration_tones() -> Vec<Tone> {
    CELEBRATION_NOTES_HZ
        .iter()
        .enumerate()
        .map(|(i, &freq_hz)| Tone {
            freq_hz,
            glide_to_hz: None,
            offset_s: i as f64 * CELEBRATION_NOTE_STAGGER_S,
            duration_s: 0.5,
            envelope: Envelope::AttackDecay {
                attack_s: 0.05,
                peak: 0.15,
                floor: 0.01,
            },
        })
        .collect()
}

/// Short descending "pop" played when the No button escapes.
pub fn pop_tone() -> Tone {
    Tone {
        freq_hz: 800.0,
        glide_to_hz: Some(400.0),
        offset_s: 0.0,
        duration_s: 0.1,
        envelope: Envelope::Decay {
            peak: 0.2,
            floor: 0.01,
        },
    }
}

/// Anything that can schedule tones. All tones in one call share a time base.
pub trait ToneSink {
    fn play(&self, tones: &[Tone]) -> Result<()>;
}

/// Play `tones`, logging and discarding any failure.
pub fn play_best_effort(sink: &dyn ToneSink, tones: &[Tone]) {
    if let Err(e) = sink.play(tones) {
        crate::diag::debug(&format!("sound skipped: {e}"));
    }
}

/// Rate limiter for the pop sound so rapid pointer / touch events do not
/// flood the audio graph.
#[derive(Clone, Debug)]
pub struct PopLimiter {
    cooldown_ms: f64,
    last_played_ms: Option<f64>,
}

impl Default for PopLimiter {
    fn default() -> Self {
        Self::new(POP_COOLDOWN_MS)
    }
}

impl PopLimiter {
    pub fn new(cooldown_ms: f64) -> Self {
        Self {
            cooldown_ms,
            last_played_ms: None,
        }
    }

    /// Returns true (and records `now_ms`) when a pop may sound.
    pub fn try_acquire(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last_played_ms {
            if now_ms - last < self.cooldown_ms {
                return false;
            }
        }
        self.last_played_ms = Some(now_ms);
        true
    }
}

// --- Web Audio ----------------------------------------------------------------

/// Builds the per-session audio handle.
pub trait ContextFactory {
    type Handle: Clone;
    fn create(&self) -> Result<Self::Handle>;
}

/// Once-initialised handle: built on the first `get`, handed out again on
/// every later call. A failed build is not cached, so the next `get` retries.
pub struct SessionContext<F: ContextFactory> {
    factory: F,
    slot: RefCell<Option<F::Handle>>,
}

impl<F: ContextFactory> SessionContext<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            slot: RefCell::new(None),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.slot.borrow().is_some()
    }

    pub fn get(&self) -> Result<F::Handle> {
        let mut slot = self.slot.borrow_mut();
        if let Some(handle) = slot.as_ref() {
            return Ok(handle.clone());
        }
        let handle = self.factory.create()?;
        *slot = Some(handle.clone());
        Ok(handle)
    }
}

/// `new AudioContext()`; fails under strict autoplay policies or when the
/// API is missing.
pub struct BrowserAudio;

impl ContextFactory for BrowserAudio {
    type Handle = AudioContext;

    fn create(&self) -> Result<AudioContext> {
        AudioContext::new().map_err(|e| Error::Audio(describe(&e)))
    }
}

/// Web Audio backed sink sharing one `AudioContext` for the session.
pub struct WebAudio {
    ctx: SessionContext<BrowserAudio>,
}

impl Default for WebAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudio {
    pub fn new() -> Self {
        Self {
            ctx: SessionContext::new(BrowserAudio),
        }
    }

    fn schedule(
        ctx: &AudioContext,
        tone: &Tone,
    ) -> std::result::Result<(), wasm_bindgen::JsValue> {
        let osc = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;
        osc.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        let now = ctx.current_time();
        let start = now + tone.offset_s;
        let end = start + tone.duration_s;

        osc.set_type(OscillatorType::Sine);
        let freq = osc.frequency();
        freq.set_value_at_time(tone.freq_hz as f32, now)?;
        if let Some(target) = tone.glide_to_hz {
            freq.exponential_ramp_to_value_at_time(target as f32, end)?;
        }

        let g = gain.gain();
        match tone.envelope {
            Envelope::Decay { peak, floor } => {
                g.set_value_at_time(peak as f32, start)?;
                g.exponential_ramp_to_value_at_time(floor as f32, end)?;
            }
            Envelope::AttackDecay {
                attack_s,
                peak,
                floor,
            } => {
                g.set_value_at_time(0.0, start)?;
                g.linear_ramp_to_value_at_time(peak as f32, start + attack_s)?;
                g.exponential_ramp_to_value_at_time(floor as f32, end)?;
            }
        }

        osc.start_with_when(start)?;
        osc.stop_with_when(end)?;
        Ok(())
    }
}

impl ToneSink for WebAudio {
    fn play(&self, tones: &[Tone]) -> Result<()> {
        let ctx = self.ctx.get()?;
        for tone in tones {
            Self::schedule(&ctx, tone).map_err(|e| Error::Audio(describe(&e)))?;
        }
        Ok(())
    }
}
