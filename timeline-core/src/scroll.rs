//! Normalized scroll progress and listener bookkeeping.

use serde::{Deserialize, Serialize};

/// Where the scroll position is read from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// A dedicated scrollable container (desktop layout).
    ContainerRelative,
    /// The whole document/viewport (mobile layout).
    WindowGlobal,
}

impl SourceMode {
    /// Pure breakpoint decision: widths below the breakpoint scroll the window.
    pub fn for_viewport_width(width: f64, breakpoint_px: f64) -> Self {
        if width < breakpoint_px {
            SourceMode::WindowGlobal
        } else {
            SourceMode::ContainerRelative
        }
    }
}

/// `scroll_top / scroll_extent` clamped to `[0, 1]`.
///
/// `scroll_extent` is `scroll_height - client_height` (container mode) or
/// `document_height - viewport_height` (window mode). Non-positive extents
/// mean there is nothing to scroll and yield 0 rather than NaN.
pub fn scroll_progress(scroll_top: f64, scroll_extent: f64) -> f64 {
    if scroll_extent <= 0.0 {
        return 0.0;
    }
    (scroll_top / scroll_extent).clamp(0.0, 1.0)
}

/// Per-mount scroll state: last known progress and the active source mode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScrollState {
    pub progress: f64,
    pub mode: SourceMode,
}

impl ScrollState {
    pub fn new(mode: SourceMode) -> Self {
        Self {
            progress: 0.0,
            mode,
        }
    }

    /// Switch source mode. Progress is kept; the caller is responsible for
    /// detaching the old mode's listeners and attaching the new mode's.
    pub fn switch_mode(&mut self, mode: SourceMode) {
        self.mode = mode;
    }
}

/// Counts of live platform listeners, kept by the host so teardown can be
/// asserted (all counts must return to zero after unmount).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerLedger {
    pub scroll: u32,
    pub resize: u32,
    pub intersection: u32,
}

impl ListenerLedger {
    pub fn attach_scroll(&mut self) {
        self.scroll += 1;
    }

    pub fn detach_scroll(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn attach_resize(&mut self) {
        self.resize += 1;
    }

    pub fn detach_resize(&mut self) {
        self.resize = self.resize.saturating_sub(1);
    }

    pub fn attach_intersection(&mut self) {
        self.intersection += 1;
    }

    pub fn detach_intersection(&mut self) {
        self.intersection = self.intersection.saturating_sub(1);
    }

    /// True once every listener registered through this ledger is gone.
    pub fn is_empty(&self) -> bool {
        self.scroll == 0 && self.resize == 0 && self.intersection == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_selects_mode() {
        assert_eq!(
            SourceMode::for_viewport_width(375.0, 768.0),
            SourceMode::WindowGlobal
        );
        assert_eq!(
            SourceMode::for_viewport_width(768.0, 768.0),
            SourceMode::ContainerRelative
        );
        assert_eq!(
            SourceMode::for_viewport_width(1440.0, 768.0),
            SourceMode::ContainerRelative
        );
    }

    #[test]
    fn no_overflow_yields_zero_progress() {
        assert_eq!(scroll_progress(0.0, 0.0), 0.0);
        assert_eq!(scroll_progress(120.0, -40.0), 0.0);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(scroll_progress(900.0, 600.0), 1.0);
        assert_eq!(scroll_progress(-20.0, 600.0), 0.0);
        assert!((scroll_progress(300.0, 600.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn ledger_balances_to_empty() {
        let mut ledger = ListenerLedger::default();
        ledger.attach_scroll();
        ledger.attach_resize();
        ledger.attach_intersection();
        assert!(!ledger.is_empty());
        ledger.detach_scroll();
        ledger.detach_resize();
        ledger.detach_intersection();
        assert!(ledger.is_empty());
    }
}
