//! Vertical scale control.
//!
//! The scale (latency mapped to the top of the graph) follows the worst
//! visible sample asymmetrically: it snaps up immediately so spikes are
//! never clipped, and glides back down exponentially so a brief drop does
//! not make the axis jitter.

/// Headroom kept above the largest visible sample or guide level.
const HEADROOM: f64 = 1.2;

/// Starting scale relative to the top guide level.
const INITIAL_HEADROOM: f64 = 1.5;

/// Current and target vertical scale.
///
/// Both values never drop below `max(guide_levels) * 1.2`, so the axis
/// always spans the reference guide lines.
#[derive(Debug, Clone, Copy)]
pub struct ScaleState {
    current_max: f64,
    target_max: f64,
}

impl ScaleState {
    pub fn new(guide_levels: &[u32]) -> Self {
        let start = top_guide(guide_levels) * INITIAL_HEADROOM;
        Self {
            current_max: start,
            target_max: start,
        }
    }

    /// Advance the scale one frame.
    ///
    /// `global_max` is the largest sample across all enabled targets this
    /// frame. Upward adjustments are immediate; downward ones multiply by
    /// `decay_rate` per frame, clamped so the scale never undershoots the
    /// target.
    pub fn tick(&mut self, global_max: u64, guide_levels: &[u32], decay_rate: f64) {
        let floor = top_guide(guide_levels) * HEADROOM;
        self.target_max = (global_max as f64 * HEADROOM).max(floor);

        if self.current_max < self.target_max {
            self.current_max = self.target_max;
        } else {
            self.current_max = self.target_max.max(self.current_max * decay_rate);
        }
    }

    /// The latency value mapped to the top of the graph this frame.
    pub fn current_max(&self) -> f64 {
        self.current_max
    }

    pub fn target_max(&self) -> f64 {
        self.target_max
    }
}

fn top_guide(guide_levels: &[u32]) -> f64 {
    guide_levels.iter().copied().max().unwrap_or(0) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUIDES: [u32; 3] = [50, 100, 150];
    const FLOOR: f64 = 150.0 * 1.2;
    const DECAY: f64 = 0.95;

    #[test]
    fn starts_above_the_guide_floor() {
        let scale = ScaleState::new(&GUIDES);
        assert_eq!(scale.current_max(), 225.0);
        assert!(scale.current_max() >= FLOOR);
    }

    #[test]
    fn snaps_up_immediately() {
        let mut scale = ScaleState::new(&GUIDES);
        scale.tick(500, &GUIDES, DECAY);
        assert_eq!(scale.target_max(), 600.0);
        assert_eq!(scale.current_max(), 600.0);

        // A further increase snaps again with no lag
        scale.tick(1000, &GUIDES, DECAY);
        assert_eq!(scale.current_max(), 1200.0);
    }

    #[test]
    fn decays_exponentially_down_to_the_floor() {
        let mut scale = ScaleState::new(&GUIDES);
        scale.tick(500, &GUIDES, DECAY);
        let start = scale.current_max();

        for k in 1..=100 {
            scale.tick(0, &GUIDES, DECAY);
            let expected = (start * DECAY.powi(k)).max(FLOOR);
            assert!(
                (scale.current_max() - expected).abs() < 1e-9,
                "tick {k}: {} != {expected}",
                scale.current_max()
            );
            assert!(scale.current_max() >= FLOOR);
        }

        // Converged onto the floor
        assert_eq!(scale.current_max(), FLOOR);
    }

    #[test]
    fn never_undershoots_the_target() {
        let mut scale = ScaleState::new(&GUIDES);
        scale.tick(1000, &GUIDES, DECAY);

        // Target drops but stays above the floor; decay must stop there
        for _ in 0..500 {
            scale.tick(400, &GUIDES, DECAY);
            assert!(scale.current_max() >= scale.target_max());
        }
        assert_eq!(scale.current_max(), 480.0);
    }

    #[test]
    fn flat_zero_input_rests_on_the_floor() {
        let mut scale = ScaleState::new(&GUIDES);
        for _ in 0..200 {
            scale.tick(0, &GUIDES, DECAY);
        }
        assert_eq!(scale.current_max(), FLOOR);
        assert_eq!(scale.target_max(), FLOOR);
    }
}
