//! Core logic mapping scroll progress to timeline fill and visibility state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod fill;
mod layout;
mod scroll;
mod state;
mod visibility;

pub use fill::{bar_bottom, compute_fill_levels, DEFAULT_FILL_DISTANCE_PX};
pub use layout::{desktop_side, side_for, slot_content, Side, SlotContent};
pub use scroll::{scroll_progress, ListenerLedger, ScrollState, SourceMode};
pub use state::{TimelineFrame, TimelineGeometry, TimelinePhase, TimelineState};
pub use visibility::{
    expected_position, visibility_threshold, EntranceLatch, ENTRANCE_DURATION_SECS,
    ENTRANCE_OFFSET_PX, ENTRANCE_STAGGER_SECS, INTERSECTION_ROOT_MARGIN, INTERSECTION_THRESHOLDS,
    MOBILE_VISIBILITY_RATIO, VISIBILITY_LEAD,
};

/// Tuning knobs for one mounted timeline.
///
/// Deserializes from partial objects; omitted fields keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimelineConfig {
    /// Distance (logical px) before a marker at which its fill ramp starts.
    pub fill_distance_px: f64,
    /// Viewport widths below this switch to the window-scroll mobile layout.
    pub mobile_breakpoint_px: f64,
    /// Which side cards are pinned to in the single-column mobile layout.
    pub mobile_side: Side,
    /// Whether the heading block is rendered above the timeline.
    pub show_header: bool,
    /// Heading text shown when `show_header` is set.
    pub header_text: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            fill_distance_px: fill::DEFAULT_FILL_DISTANCE_PX,
            mobile_breakpoint_px: 768.0,
            mobile_side: Side::Right,
            show_header: true,
            header_text: "Timeline".to_string(),
        }
    }
}

/// One displayable unit on the timeline.
///
/// The ordinal index is never stored; it is the entry's position in the
/// ordered slice handed to the engine. The producing collaborator sorts
/// (date descending); the engine never resorts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    pub id: String,
    pub title: String,
    pub text: String,
    pub image: Option<String>,
    pub occurred_at: Option<DateTime<Utc>>,
}

impl Default for TimelineEntry {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            text: String::new(),
            image: None,
            occurred_at: None,
        }
    }
}

/// Errors raised while preparing timeline input.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("input is missing required data")]
    MissingData,
    #[error("could not parse input: {0}")]
    Parse(String),
    #[error("timeline error: {0}")]
    Other(String),
}

/// Empty frame helper (used by mocks and tests).
pub fn empty_frame() -> TimelineFrame {
    TimelineFrame {
        progress: 0.0,
        fill_levels: Vec::new(),
        visible: Vec::new(),
    }
}
