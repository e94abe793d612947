//! Randomized background decoration: drifting orbs, rising hearts, and the
//! hearts that float up from the accepted view.
//!
//! Everything here is generated once at mount and never mutated afterwards.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{
    Budget, CELEBRATION_HEART_GLYPHS, CELEBRATION_HEART_STAGGER_S, CELEBRATION_REPEAT_DELAY_S,
    DeviceClass, FLOATING_HEART_GLYPHS,
};

/// Soft blurred circle drifting behind the content.
#[derive(Clone, Debug, PartialEq)]
pub struct Orb {
    pub id: usize,
    pub size_px: f64,
    pub left_pct: f64,
    pub top_pct: f64,
    pub duration_s: f64,
    pub delay_s: f64,
    pub opacity: f64,
}

/// Heart glyph rising from the bottom edge on a CSS loop.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingHeart {
    pub id: usize,
    pub glyph: &'static str,
    pub left_pct: f64,
    pub delay_s: f64,
    pub size_px: f64,
    pub duration_s: f64,
}

/// Heart released by the accepted view; delays are staggered by index.
#[derive(Clone, Debug, PartialEq)]
pub struct CelebrationHeart {
    pub id: usize,
    pub glyph: &'static str,
    pub left_pct: f64,
    pub size_rem: f64,
    pub delay_s: f64,
    pub duration_s: f64,
    pub drift_px: f64,
    /// +1 clockwise, -1 counter-clockwise
    pub spin: f64,
}

impl CelebrationHeart {
    /// One loop: the rise plus the pause before the next one.
    pub fn cycle_s(&self) -> f64 {
        self.duration_s + CELEBRATION_REPEAT_DELAY_S
    }

    /// Share of the cycle spent moving, in percent. The rest is the pause.
    pub fn active_pct(&self) -> f64 {
        self.duration_s / self.cycle_s() * 100.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct Decorations {
    pub orbs: Vec<Orb>,
    pub hearts: Vec<FloatingHeart>,
    pub celebration: Vec<CelebrationHeart>,
}

impl Decorations {
    pub fn generate<R: Rng + ?Sized>(device: DeviceClass, rng: &mut R) -> Self {
        let budget = device.budget();
        Self {
            orbs: orbs(&budget, rng),
            hearts: floating_hearts(&budget, rng),
            celebration: celebration_hearts(device, &budget, rng),
        }
    }
}

fn pick_glyph<R: Rng + ?Sized>(set: &'static [&'static str], rng: &mut R) -> &'static str {
    set.choose(rng).copied().unwrap_or("❤️")
}

pub fn orbs<R: Rng + ?Sized>(budget: &Budget, rng: &mut R) -> Vec<Orb> {
    (0..budget.orbs)
        .map(|id| Orb {
            id,
            size_px: rng.gen_range(100.0..350.0),
            left_pct: rng.gen_range(0.0..100.0),
            top_pct: rng.gen_range(0.0..100.0),
            duration_s: rng.gen_range(10.0..25.0),
            delay_s: rng.gen_range(0.0..5.0),
            opacity: rng.gen_range(0.15..0.30),
        })
        .collect()
}

pub fn floating_hearts<R: Rng + ?Sized>(budget: &Budget, rng: &mut R) -> Vec<FloatingHeart> {
    (0..budget.floating_hearts)
        .map(|id| FloatingHeart {
            id,
            glyph: pick_glyph(FLOATING_HEART_GLYPHS, rng),
            left_pct: rng.gen_range(0.0..100.0),
            delay_s: rng.gen_range(0.0..8.0),
            size_px: rng.gen_range(15.0..50.0),
            duration_s: rng.gen_range(6.0..12.0),
        })
        .collect()
}

pub fn celebration_hearts<R: Rng + ?Sized>(
    device: DeviceClass,
    budget: &Budget,
    rng: &mut R,
) -> Vec<CelebrationHeart> {
    (0..budget.celebration_hearts)
        .map(|id| {
            // Phones get a fixed, shorter rise without sideways drift.
            let (duration_s, drift_px) = if device.is_compact() {
                (2.5, 0.0)
            } else {
                (rng.gen_range(3.0..5.0), rng.gen_range(-50.0..50.0))
            };
            CelebrationHeart {
                id,
                glyph: pick_glyph(CELEBRATION_HEART_GLYPHS, rng),
                left_pct: rng.gen_range(0.0..100.0),
                size_rem: rng.gen_range(1.5..2.5),
                delay_s: id as f64 * CELEBRATION_HEART_STAGGER_S,
                duration_s,
                drift_px,
                spin: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_counts_follow_budget() {
        let mut rng = StdRng::seed_from_u64(1);
        let compact = Decorations::generate(DeviceClass::Compact, &mut rng);
        assert_eq!(compact.hearts.len(), 12);
        assert_eq!(compact.orbs.len(), 4);
        assert_eq!(compact.celebration.len(), 10);

        let wide = Decorations::generate(DeviceClass::Wide, &mut rng);
        assert_eq!(wide.hearts.len(), 25);
        assert_eq!(wide.orbs.len(), 8);
        assert_eq!(wide.celebration.len(), 30);
    }

    #[test]
    fn test_fields_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            let d = Decorations::generate(DeviceClass::Wide, &mut rng);
            for o in &d.orbs {
                assert!((100.0..350.0).contains(&o.size_px));
                assert!((0.0..100.0).contains(&o.left_pct));
                assert!((0.0..100.0).contains(&o.top_pct));
                assert!((10.0..25.0).contains(&o.duration_s));
                assert!((0.0..5.0).contains(&o.delay_s));
                assert!((0.15..0.30).contains(&o.opacity));
            }
            for h in &d.hearts {
                assert!(FLOATING_HEART_GLYPHS.contains(&h.glyph));
                assert!((15.0..50.0).contains(&h.size_px));
                assert!((6.0..12.0).contains(&h.duration_s));
                assert!((0.0..8.0).contains(&h.delay_s));
            }
            for c in &d.celebration {
                assert!((3.0..5.0).contains(&c.duration_s));
                assert!((-50.0..50.0).contains(&c.drift_px));
                assert!(c.spin == 1.0 || c.spin == -1.0);
            }
        }
    }

    #[test]
    fn test_celebration_delays_are_staggered() {
        let mut rng = StdRng::seed_from_u64(4);
        let budget = DeviceClass::Compact.budget();
        let hearts = celebration_hearts(DeviceClass::Compact, &budget, &mut rng);
        for pair in hearts.windows(2) {
            assert!(pair[1].delay_s > pair[0].delay_s);
        }
        assert!(hearts.iter().all(|h| h.duration_s == 2.5 && h.drift_px == 0.0));
        assert!((hearts[5].delay_s - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_celebration_cycle_includes_pause() {
        let mut rng = StdRng::seed_from_u64(6);
        let budget = DeviceClass::Compact.budget();
        let heart = &celebration_hearts(DeviceClass::Compact, &budget, &mut rng)[0];
        assert!((heart.cycle_s() - 3.5).abs() < 1e-9);
        assert!((heart.active_pct() - 2.5 / 3.5 * 100.0).abs() < 1e-9);

        let wide = DeviceClass::Wide.budget();
        for h in celebration_hearts(DeviceClass::Wide, &wide, &mut rng) {
            assert!((h.cycle_s() - h.duration_s - 1.0).abs() < 1e-9);
            assert!(h.active_pct() > 0.0 && h.active_pct() < 100.0);
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let mut rng = StdRng::seed_from_u64(8);
        let d = Decorations::generate(DeviceClass::Compact, &mut rng);
        for (i, h) in d.hearts.iter().enumerate() {
            assert_eq!(h.id, i);
        }
        for (i, o) in d.orbs.iter().enumerate() {
            assert_eq!(o.id, i);
        }
    }
}
