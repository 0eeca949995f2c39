//! Framework-neutral WASM <-> JavaScript bridge for the timeline engine.

use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use timeline_core::{Side, TimelineConfig, TimelineError, TimelineGeometry, TimelineState};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsTimelineConfig {
    #[serde(default)]
    fill_distance_px: Option<f64>,
    #[serde(default)]
    mobile_breakpoint_px: Option<f64>,
    #[serde(default)]
    mobile_side: Option<String>,
    #[serde(default)]
    show_header: Option<bool>,
    #[serde(default)]
    header_text: Option<String>,
}

impl From<JsTimelineConfig> for TimelineConfig {
    fn from(cfg: JsTimelineConfig) -> Self {
        let mut base = TimelineConfig::default();
        if let Some(distance) = cfg.fill_distance_px {
            base.fill_distance_px = distance;
        }
        if let Some(breakpoint) = cfg.mobile_breakpoint_px {
            base.mobile_breakpoint_px = breakpoint;
        }
        if let Some(side) = cfg.mobile_side.as_deref() {
            base.mobile_side = match side {
                "left" => Side::Left,
                _ => Side::Right,
            };
        }
        if let Some(show) = cfg.show_header {
            base.show_header = show;
        }
        if let Some(text) = cfg.header_text {
            base.header_text = text;
        }
        base
    }
}

fn config_from_js(config: Option<JsValue>) -> Result<TimelineConfig, JsValue> {
    match config {
        Some(js_cfg) => {
            let cfg: JsTimelineConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("could not read config: {err}")))?;
            Ok(TimelineConfig::from(cfg))
        }
        None => Ok(TimelineConfig::default()),
    }
}

/// Convert a CMS achievements export to ordered timeline entries.
#[wasm_bindgen]
pub fn prepare_entries(docs: JsValue) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let docs_value = from_value::<serde_json::Value>(docs)
        .map_err(|err| JsValue::from_str(&format!("could not read docs JSON: {err}")))?;

    let entries = timeline_cms::entries_from_docs_value(&docs_value)
        .map_err(|err| JsValue::from_str(&format_timeline_error(err)))?;

    to_value(&entries).map_err(|err| JsValue::from_str(&format!("could not serialize: {err}")))
}

/// Stateless fill computation for hosts that keep their own state.
#[wasm_bindgen]
pub fn compute_fill_levels(
    progress: f64,
    bar_total_height: f64,
    bar_top_offset: f64,
    marker_centers: JsValue,
) -> Result<JsValue, JsValue> {
    let centers: Vec<Option<f64>> = from_value(marker_centers)
        .map_err(|err| JsValue::from_str(&format!("could not read marker centers: {err}")))?;

    let levels = timeline_core::compute_fill_levels(
        progress,
        bar_total_height,
        bar_top_offset,
        &centers,
        timeline_core::DEFAULT_FILL_DISTANCE_PX,
    );

    to_value(&levels).map_err(|err| JsValue::from_str(&format!("could not serialize: {err}")))
}

/// Stateful engine handle; keeps the entrance latch across frames so
/// visibility never flickers when the host re-queries.
#[wasm_bindgen]
pub struct TimelineEngine {
    inner: TimelineState,
}

#[wasm_bindgen]
impl TimelineEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(
        entry_count: usize,
        viewport_width: f64,
        config: Option<JsValue>,
    ) -> Result<TimelineEngine, JsValue> {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        let config = config_from_js(config)?;
        Ok(TimelineEngine {
            inner: TimelineState::for_viewport(entry_count, viewport_width, config),
        })
    }

    /// Fold one scroll observation and freshly measured geometry, returning
    /// the repaint frame `{ progress, fill_levels, visible }`.
    pub fn on_scroll(&mut self, progress: f64, geometry: JsValue) -> Result<JsValue, JsValue> {
        let geometry: TimelineGeometry = from_value(geometry)
            .map_err(|err| JsValue::from_str(&format!("could not read geometry: {err}")))?;
        self.inner.on_scroll(progress, &geometry);
        to_value(&self.inner.frame())
            .map_err(|err| JsValue::from_str(&format!("could not serialize: {err}")))
    }

    /// Intersection observation for one entry (mobile entrances).
    pub fn observe_intersection(&mut self, index: usize, ratio: f64) {
        self.inner.observe_intersection(index, ratio);
    }

    /// Viewport-class change; returns `"container_relative"` or
    /// `"window_global"` when the breakpoint was crossed, otherwise `null`.
    pub fn set_viewport_width(&mut self, width: f64) -> Option<String> {
        self.inner.set_viewport_width(width).map(|mode| {
            match mode {
                timeline_core::SourceMode::ContainerRelative => "container_relative",
                timeline_core::SourceMode::WindowGlobal => "window_global",
            }
            .to_string()
        })
    }

    pub fn teardown(&mut self) {
        self.inner.teardown();
    }
}

fn format_timeline_error(err: TimelineError) -> String {
    format!("Timeline error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_merges_over_defaults() {
        let cfg = TimelineConfig::from(JsTimelineConfig {
            fill_distance_px: Some(60.0),
            mobile_breakpoint_px: None,
            mobile_side: Some("left".to_string()),
            show_header: None,
            header_text: None,
        });

        assert_eq!(cfg.fill_distance_px, 60.0);
        assert_eq!(cfg.mobile_breakpoint_px, 768.0);
        assert_eq!(cfg.mobile_side, Side::Left);
        assert!(cfg.show_header);
        assert_eq!(cfg.header_text, "Timeline");
    }

    #[test]
    fn unknown_side_falls_back_to_right() {
        let cfg = TimelineConfig::from(JsTimelineConfig {
            fill_distance_px: None,
            mobile_breakpoint_px: None,
            mobile_side: Some("center".to_string()),
            show_header: None,
            header_text: None,
        });
        assert_eq!(cfg.mobile_side, Side::Right);
    }
}
