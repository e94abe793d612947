//! Safe on-screen placements for the "No" control and the picker that hops
//! between them.

use rand::Rng;
use rand::seq::SliceRandom;

/// Percentage coordinates of the control's centre (it is rendered with
/// `translate(-50%, -50%)`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SafePosition {
    pub x_pct: f64,
    pub y_pct: f64,
}

impl SafePosition {
    pub const fn new(x_pct: f64, y_pct: f64) -> Self {
        Self { x_pct, y_pct }
    }
}

/// Hand-placed points that keep the control fully visible on any viewport.
pub const SAFE_POSITIONS: [SafePosition; 12] = [
    SafePosition::new(15.0, 15.0),
    SafePosition::new(50.0, 15.0),
    SafePosition::new(75.0, 15.0),
    SafePosition::new(15.0, 40.0),
    SafePosition::new(75.0, 40.0),
    SafePosition::new(15.0, 65.0),
    SafePosition::new(50.0, 65.0),
    SafePosition::new(75.0, 65.0),
    SafePosition::new(30.0, 30.0),
    SafePosition::new(60.0, 30.0),
    SafePosition::new(30.0, 80.0),
    SafePosition::new(60.0, 80.0),
];

/// Pick uniformly from `catalog`, skipping entries equal to `exclude`.
///
/// If the exclusion would leave nothing to choose from (a single-entry catalog,
/// or one made only of duplicates of `exclude`) the repeat is allowed instead.
/// Returns `None` only for an empty catalog.
pub fn pick_position<R: Rng + ?Sized>(
    catalog: &[SafePosition],
    exclude: Option<SafePosition>,
    rng: &mut R,
) -> Option<SafePosition> {
    let candidates: Vec<&SafePosition> = catalog
        .iter()
        .filter(|p| Some(**p) != exclude)
        .collect();
    match candidates.choose(rng) {
        Some(p) => Some(**p),
        None => catalog.choose(rng).copied(),
    }
}

/// State of the dismiss control: hidden until the first decline attempt, then
/// hopping between safe positions.
#[derive(Clone, Debug)]
pub struct Evader {
    catalog: &'static [SafePosition],
    current: Option<SafePosition>,
    visible: bool,
}

impl Default for Evader {
    fn default() -> Self {
        Self::new(&SAFE_POSITIONS)
    }
}

impl Evader {
    pub fn new(catalog: &'static [SafePosition]) -> Self {
        Self {
            catalog,
            current: None,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Option<SafePosition> {
        self.current
    }

    /// First appearance: any catalog entry, no exclusion.
    pub fn reveal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SafePosition> {
        self.visible = true;
        self.current = pick_position(self.catalog, None, rng);
        self.current
    }

    /// Hop away from the current spot.
    pub fn evade<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SafePosition> {
        self.current = pick_position(self.catalog, self.current, rng);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pick_never_returns_excluded() {
        let mut rng = StdRng::seed_from_u64(7);
        for excluded in SAFE_POSITIONS.iter() {
            for _ in 0..50 {
                let p = pick_position(&SAFE_POSITIONS, Some(*excluded), &mut rng).unwrap();
                assert_ne!(p, *excluded);
            }
        }
    }

    #[test]
    fn test_pick_covers_catalog() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 12];
        for _ in 0..2000 {
            let p = pick_position(&SAFE_POSITIONS, None, &mut rng).unwrap();
            let idx = SAFE_POSITIONS.iter().position(|q| *q == p).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_single_entry_catalog_allows_repeat() {
        let mut rng = StdRng::seed_from_u64(3);
        let only = [SafePosition::new(50.0, 50.0)];
        assert_eq!(pick_position(&only, Some(only[0]), &mut rng), Some(only[0]));
        assert_eq!(pick_position(&[], None, &mut rng), None);
    }

    #[test]
    fn test_evader_hidden_until_revealed() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut ev = Evader::default();
        assert!(!ev.is_visible());
        assert!(ev.position().is_none());
        let p0 = ev.reveal(&mut rng).unwrap();
        assert!(ev.is_visible());
        let p1 = ev.evade(&mut rng).unwrap();
        assert_ne!(p0, p1);
        assert_eq!(ev.position(), Some(p1));
    }
}
