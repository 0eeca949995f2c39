//! Per-mount timeline state machine driving repaint frames.

use serde::{Deserialize, Serialize};

use crate::fill::compute_fill_levels;
use crate::scroll::{ScrollState, SourceMode};
use crate::visibility::EntranceLatch;
use crate::TimelineConfig;

/// Lifecycle of one mounted timeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimelinePhase {
    /// Mounted, geometry not yet measured.
    Initializing,
    /// First forced recomputation done; layout has settled.
    Settled,
    /// Every subsequent scroll/resize recomputes.
    Live,
    /// Unmounted; further updates are ignored.
    TornDown,
}

/// Live layout measurement taken immediately before a recomputation.
///
/// Ephemeral by design: built fresh for each update because layout can
/// shift between scroll events. `None` centers mean a marker is not yet
/// measurable and fill degrades to 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimelineGeometry {
    pub bar_total_height: f64,
    pub bar_top_offset: f64,
    pub marker_centers: Vec<Option<f64>>,
}

/// One repaint's worth of derived state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineFrame {
    pub progress: f64,
    pub fill_levels: Vec<f64>,
    pub visible: Vec<bool>,
}

/// Scroll progress, fill levels and the entrance latch for one mount.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineState {
    config: TimelineConfig,
    scroll: ScrollState,
    latch: EntranceLatch,
    fill_levels: Vec<f64>,
    phase: TimelinePhase,
}

impl TimelineState {
    pub fn new(entry_count: usize, mode: SourceMode, config: TimelineConfig) -> Self {
        Self {
            config,
            scroll: ScrollState::new(mode),
            latch: EntranceLatch::new(entry_count),
            fill_levels: vec![0.0; entry_count],
            phase: TimelinePhase::Initializing,
        }
    }

    /// Build a state from the current viewport width, picking the source
    /// mode against the configured breakpoint.
    pub fn for_viewport(entry_count: usize, viewport_width: f64, config: TimelineConfig) -> Self {
        let mode = SourceMode::for_viewport_width(viewport_width, config.mobile_breakpoint_px);
        Self::new(entry_count, mode, config)
    }

    pub fn mode(&self) -> SourceMode {
        self.scroll.mode
    }

    pub fn phase(&self) -> TimelinePhase {
        self.phase
    }

    /// Fold a scroll observation plus freshly measured geometry into the
    /// state. The first call settles the layout; later calls run live.
    /// After teardown this is a no-op.
    pub fn on_scroll(&mut self, progress: f64, geometry: &TimelineGeometry) {
        if self.phase == TimelinePhase::TornDown {
            return;
        }

        self.scroll.progress = progress.clamp(0.0, 1.0);
        self.fill_levels = compute_fill_levels(
            self.scroll.progress,
            geometry.bar_total_height,
            geometry.bar_top_offset,
            &geometry.marker_centers,
            self.config.fill_distance_px,
        );

        // Desktop entrances come from scroll math; mobile entrances come
        // from intersection observations instead.
        if self.scroll.mode == SourceMode::ContainerRelative {
            self.latch.observe_progress(self.scroll.progress);
        }

        self.phase = match self.phase {
            TimelinePhase::Initializing => TimelinePhase::Settled,
            TimelinePhase::Settled | TimelinePhase::Live => TimelinePhase::Live,
            TimelinePhase::TornDown => TimelinePhase::TornDown,
        };
    }

    /// Intersection observation for one entry (mobile path).
    pub fn observe_intersection(&mut self, index: usize, ratio: f64) {
        if self.phase == TimelinePhase::TornDown {
            return;
        }
        self.latch.observe_intersection(index, ratio);
    }

    /// Viewport-class change. Returns the new mode when the breakpoint was
    /// crossed so the host can re-subscribe its listeners; the latch and
    /// progress survive the switch.
    pub fn set_viewport_width(&mut self, width: f64) -> Option<SourceMode> {
        let next = SourceMode::for_viewport_width(width, self.config.mobile_breakpoint_px);
        if next == self.scroll.mode {
            return None;
        }
        self.scroll.switch_mode(next);
        Some(next)
    }

    /// Unmount: no state mutation after this.
    pub fn teardown(&mut self) {
        self.phase = TimelinePhase::TornDown;
    }

    pub fn fill_level(&self, index: usize) -> f64 {
        self.fill_levels.get(index).copied().unwrap_or(0.0)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.latch.is_visible(index)
    }

    pub fn frame(&self) -> TimelineFrame {
        TimelineFrame {
            progress: self.scroll.progress,
            fill_levels: self.fill_levels.clone(),
            visible: self.latch.flags().to_vec(),
        }
    }
}
