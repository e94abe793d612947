//! Acceptance choreography: arpeggio, corner cannons for a few seconds, and one
//! delayed heart burst.

use std::rc::Rc;

use crate::audio::{ToneSink, celebration_tones, play_best_effort};
use crate::burst::{
    BurstLoop, CancelToken, ParticleSink, Scheduler, fire_best_effort, heart_burst, run_loop,
    side_bursts,
};
use crate::config::{Budget, HEART_BURST_DELAY_MS, SIDE_BURST_WINDOW_MS};

/// Start the celebration. Sound failures are swallowed before any visual work
/// is scheduled, so the bursts always run.
pub fn celebrate(
    budget: &Budget,
    tones: &dyn ToneSink,
    particles: Rc<dyn ParticleSink>,
    scheduler: Rc<dyn Scheduler>,
    cancel: CancelToken,
) {
    play_best_effort(tones, &celebration_tones());

    let deadline = scheduler.now() + SIDE_BURST_WINDOW_MS;
    let cannons = BurstLoop::new(side_bursts(budget).to_vec(), deadline, cancel);
    run_loop(cannons, particles.clone(), scheduler.clone());

    let finale = heart_burst(budget);
    scheduler.after(
        HEART_BURST_DELAY_MS,
        Box::new(move || fire_best_effort(particles.as_ref(), &finale)),
    );
}
