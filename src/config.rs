//! Compiled-in tuning constants and the per-session device budget.
//!
//! The viewport is classified exactly once at mount (see `DeviceClass::from_width`)
//! and the resulting `Budget` is threaded through every generator that needs it.

/// Viewports narrower than this (CSS px) are treated as phones.
pub const COMPACT_MAX_WIDTH: f64 = 768.0;

// --- Evasion / pop sound ----------------------------------------------------

pub const POP_COOLDOWN_MS: f64 = 150.0;
pub const AFFECTION_STEP: f64 = 0.1;

// --- Celebration timing -----------------------------------------------------

pub const SIDE_BURST_WINDOW_MS: f64 = 3000.0;
pub const HEART_BURST_DELAY_MS: u32 = 300;
pub const CELEBRATION_HEART_STAGGER_S: f64 = 0.08;
/// Pause between a celebration heart's rises.
pub const CELEBRATION_REPEAT_DELAY_S: f64 = 1.0;

pub const SIDE_BURST_SPREAD: f64 = 55.0;
pub const HEART_BURST_SPREAD: f64 = 70.0;

pub const CONFETTI_COLORS: &[&str] = &["#ff69b4", "#ff1493", "#ff6b9d", "#ffc0cb"];
pub const HEART_BURST_COLORS: &[&str] =
    &["#ff69b4", "#ff1493", "#ff6b9d", "#ffc0cb", "#ff0000"];

// --- Glyphs -----------------------------------------------------------------

pub const FLOATING_HEART_GLYPHS: &[&str] = &["💕", "💖", "💗", "💓", "💝", "❤️", "💘"];
pub const CELEBRATION_HEART_GLYPHS: &[&str] = &["❤️", "💕", "💖", "💗", "💓", "💝"];

/// Binary viewport category fixed for the lifetime of the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Compact,
    Wide,
}

impl DeviceClass {
    pub fn from_width(width_px: f64) -> Self {
        if width_px < COMPACT_MAX_WIDTH {
            DeviceClass::Compact
        } else {
            DeviceClass::Wide
        }
    }

    pub fn is_compact(self) -> bool {
        matches!(self, DeviceClass::Compact)
    }

    pub fn budget(self) -> Budget {
        match self {
            DeviceClass::Compact => Budget {
                floating_hearts: 12,
                orbs: 4,
                celebration_hearts: 10,
                side_burst_particles: 3,
                heart_burst_particles: 50,
                heart_burst_scalar: 1.5,
            },
            DeviceClass::Wide => Budget {
                floating_hearts: 25,
                orbs: 8,
                celebration_hearts: 30,
                side_burst_particles: 5,
                heart_burst_particles: 100,
                heart_burst_scalar: 2.0,
            },
        }
    }
}

/// Rendering cost caps derived from the device class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Budget {
    pub floating_hearts: usize,
    pub orbs: usize,
    pub celebration_hearts: usize,
    pub side_burst_particles: u32,
    pub heart_burst_particles: u32,
    pub heart_burst_scalar: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_threshold() {
        assert_eq!(DeviceClass::from_width(375.0), DeviceClass::Compact);
        assert_eq!(DeviceClass::from_width(767.9), DeviceClass::Compact);
        assert_eq!(DeviceClass::from_width(768.0), DeviceClass::Wide);
        assert_eq!(DeviceClass::from_width(1920.0), DeviceClass::Wide);
    }

    #[test]
    fn test_compact_budget_is_smaller() {
        let c = DeviceClass::Compact.budget();
        let w = DeviceClass::Wide.budget();
        assert!(c.floating_hearts < w.floating_hearts);
        assert!(c.orbs < w.orbs);
        assert!(c.side_burst_particles < w.side_burst_particles);
        assert!(c.heart_burst_particles < w.heart_burst_particles);
        assert!(c.heart_burst_scalar < w.heart_burst_scalar);
    }
}
