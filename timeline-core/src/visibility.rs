//! Entrance visibility: one-way latch fed by scroll math or intersection.

use serde::{Deserialize, Serialize};

/// How far (in normalized progress) before an entry's expected position the
/// entrance fires.
pub const VISIBILITY_LEAD: f64 = 0.1;

/// Fraction of a card that must intersect the viewport on mobile.
pub const MOBILE_VISIBILITY_RATIO: f64 = 0.2;

/// Observer thresholds; several steps keep the trigger smooth.
pub const INTERSECTION_THRESHOLDS: [f64; 4] = [0.0, 0.2, 0.5, 1.0];

/// Negative root margin so the entrance fires slightly before full entry.
pub const INTERSECTION_ROOT_MARGIN: &str = "-50px 0px -50px 0px";

/// Entrance transition timing (presentation constants).
pub const ENTRANCE_DURATION_SECS: f64 = 0.6;
pub const ENTRANCE_STAGGER_SECS: f64 = 0.1;
pub const ENTRANCE_OFFSET_PX: f64 = 50.0;

/// Normalized expected position of an entry: `i / (total - 1)`, 0 for lists
/// of one (or zero) entries.
pub fn expected_position(index: usize, total: usize) -> f64 {
    if total <= 1 {
        return 0.0;
    }
    index as f64 / (total - 1) as f64
}

/// Progress at which an entry's entrance fires on the desktop path.
pub fn visibility_threshold(index: usize, total: usize) -> f64 {
    expected_position(index, total) - VISIBILITY_LEAD
}

/// Per-entry visibility flags, latched for the lifetime of one mount.
///
/// Once an entry has fired it never un-fires, even when scroll reverses.
/// The flags reset only by building a fresh latch (a remount).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntranceLatch {
    visible: Vec<bool>,
}

impl EntranceLatch {
    pub fn new(total: usize) -> Self {
        Self {
            visible: vec![false; total],
        }
    }

    /// Desktop path: latch every entry whose threshold the progress has reached.
    pub fn observe_progress(&mut self, progress: f64) {
        let total = self.visible.len();
        for (index, flag) in self.visible.iter_mut().enumerate() {
            if !*flag && progress >= visibility_threshold(index, total) {
                *flag = true;
            }
        }
    }

    /// Mobile path: latch one entry once it intersects enough of the viewport.
    pub fn observe_intersection(&mut self, index: usize, ratio: f64) {
        if ratio >= MOBILE_VISIBILITY_RATIO {
            if let Some(flag) = self.visible.get_mut(index) {
                *flag = true;
            }
        }
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    pub fn flags(&self) -> &[bool] {
        &self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entry_expected_position_is_zero() {
        assert_eq!(expected_position(0, 1), 0.0);
        assert_eq!(expected_position(0, 0), 0.0);
    }

    #[test]
    fn thresholds_lead_expected_positions() {
        assert!((visibility_threshold(0, 5) - (-0.1)).abs() < 1e-12);
        assert!((visibility_threshold(4, 5) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn latch_does_not_revert_when_scroll_reverses() {
        let mut latch = EntranceLatch::new(5);
        latch.observe_progress(0.6);
        let fired: Vec<bool> = latch.flags().to_vec();
        assert!(fired[0] && fired[1] && fired[2]);
        assert!(!fired[4]);

        latch.observe_progress(0.0);
        assert_eq!(latch.flags(), fired.as_slice());
    }

    #[test]
    fn intersection_latches_at_twenty_percent() {
        let mut latch = EntranceLatch::new(2);
        latch.observe_intersection(0, 0.1);
        assert!(!latch.is_visible(0));
        latch.observe_intersection(0, 0.2);
        assert!(latch.is_visible(0));
        // Leaving the viewport must not reset the flag.
        latch.observe_intersection(0, 0.0);
        assert!(latch.is_visible(0));
    }

    #[test]
    fn out_of_range_intersection_is_ignored() {
        let mut latch = EntranceLatch::new(1);
        latch.observe_intersection(7, 1.0);
        assert!(!latch.is_visible(7));
    }
}
