//! Framework-free state of the greeting widget.
//!
//! `Widget` holds everything the page shows and exposes one method per user
//! interaction. The DOM shell in `view` forwards events here and re-renders
//! from the getters; nothing in this module touches the browser directly.

use std::rc::Rc;

use rand::Rng;

use crate::audio::{PopLimiter, ToneSink, play_best_effort, pop_tone};
use crate::burst::{CancelToken, ParticleSink, Scheduler};
use crate::celebrate::celebrate;
use crate::config::{AFFECTION_STEP, DeviceClass};
use crate::decor::Decorations;
use crate::positions::{Evader, SafePosition};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Asking. `evading` once the No button has been revealed.
    Prompt { evading: bool },
    /// Terminal.
    Accepted,
}

pub struct Widget {
    device: DeviceClass,
    accepted: bool,
    evader: Evader,
    affection: f64,
    pop: PopLimiter,
    decorations: Decorations,
    cancel: CancelToken,
}

impl Widget {
    pub fn new<R: Rng + ?Sized>(device: DeviceClass, rng: &mut R) -> Self {
        Self {
            device,
            accepted: false,
            evader: Evader::default(),
            affection: 1.0,
            pop: PopLimiter::default(),
            decorations: Decorations::generate(device, rng),
            cancel: CancelToken::new(),
        }
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    pub fn phase(&self) -> Phase {
        if self.accepted {
            Phase::Accepted
        } else {
            Phase::Prompt {
                evading: self.evader.is_visible(),
            }
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Scale applied to the Yes button; grows each time the user looks for
    /// another option.
    pub fn affection(&self) -> f64 {
        self.affection
    }

    pub fn dismiss_position(&self) -> Option<SafePosition> {
        self.evader.position()
    }

    pub fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    /// Token for the celebration loop. Nothing in the page cancels it.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// "Try other option": reveal the No button somewhere safe and make Yes
    /// a little bigger.
    pub fn try_other_option<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SafePosition> {
        if self.accepted {
            return None;
        }
        self.affection += AFFECTION_STEP;
        self.evader.reveal(rng)
    }

    /// Pointer or finger got near the No button: move it and maybe pop.
    pub fn dismiss_approached<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        rng: &mut R,
        tones: &dyn ToneSink,
    ) -> Option<SafePosition> {
        if self.accepted || !self.evader.is_visible() {
            return None;
        }
        if self.pop.try_acquire(now_ms) {
            play_best_effort(tones, &[pop_tone()]);
        }
        self.evader.evade(rng)
    }

    /// Yes was clicked. Returns true only for the transition into `Accepted`;
    /// the celebration runs on that call alone.
    pub fn accept(
        &mut self,
        tones: &dyn ToneSink,
        particles: Rc<dyn ParticleSink>,
        scheduler: Rc<dyn Scheduler>,
    ) -> bool {
        if self.accepted {
            return false;
        }
        self.accepted = true;
        celebrate(
            &self.device.budget(),
            tones,
            particles,
            scheduler,
            self.cancel.clone(),
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Tone;
    use crate::error::Result;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingTones(Cell<usize>);

    impl ToneSink for CountingTones {
        fn play(&self, tones: &[Tone]) -> Result<()> {
            self.0.set(self.0.get() + tones.len());
            Ok(())
        }
    }

    #[test]
    fn test_initial_phase() {
        let mut rng = StdRng::seed_from_u64(1);
        let w = Widget::new(DeviceClass::Wide, &mut rng);
        assert_eq!(w.phase(), Phase::Prompt { evading: false });
        assert_eq!(w.affection(), 1.0);
        assert!(w.dismiss_position().is_none());
    }

    #[test]
    fn test_approach_ignored_while_hidden() {
        let mut rng = StdRng::seed_from_u64(2);
        let tones = CountingTones::default();
        let mut w = Widget::new(DeviceClass::Wide, &mut rng);
        assert!(w.dismiss_approached(0.0, &mut rng, &tones).is_none());
        assert_eq!(tones.0.get(), 0);
    }

    #[test]
    fn test_reveal_grows_affection() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut w = Widget::new(DeviceClass::Compact, &mut rng);
        w.try_other_option(&mut rng).unwrap();
        assert_eq!(w.phase(), Phase::Prompt { evading: true });
        assert!((w.affection() - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_pops_are_rate_limited() {
        let mut rng = StdRng::seed_from_u64(4);
        let tones = CountingTones::default();
        let mut w = Widget::new(DeviceClass::Wide, &mut rng);
        w.try_other_option(&mut rng);
        for t in [0.0, 20.0, 40.0, 60.0] {
            w.dismiss_approached(t, &mut rng, &tones).unwrap();
        }
        assert_eq!(tones.0.get(), 1);
        w.dismiss_approached(300.0, &mut rng, &tones).unwrap();
        assert_eq!(tones.0.get(), 2);
    }
}
