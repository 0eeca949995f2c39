//! Node fill: distance from the growing bar's bottom edge to each marker.

/// Ramp width (logical px) before a marker at which filling begins.
pub const DEFAULT_FILL_DISTANCE_PX: f64 = 100.0;

/// Bottom edge of the fill bar for a given progress.
///
/// The bar grows from `bar_top_offset` down to
/// `bar_top_offset + bar_total_height` as progress runs 0 to 1.
pub fn bar_bottom(progress: f64, bar_top_offset: f64, bar_total_height: f64) -> f64 {
    bar_top_offset + progress.clamp(0.0, 1.0) * bar_total_height.max(0.0)
}

/// Per-marker fill levels in `[0, 1]` for the current bar position.
///
/// Markers without a measured center (not yet mounted) stay at 0 rather
/// than erroring. Pure in its inputs; callers re-measure geometry before
/// every call because layout can shift between scroll events.
pub fn compute_fill_levels(
    progress: f64,
    bar_total_height: f64,
    bar_top_offset: f64,
    marker_centers: &[Option<f64>],
    fill_distance_px: f64,
) -> Vec<f64> {
    let bottom = bar_bottom(progress, bar_top_offset, bar_total_height);
    marker_centers
        .iter()
        .map(|center| match center {
            Some(center) => marker_fill(center - bottom, fill_distance_px),
            None => 0.0,
        })
        .collect()
}

fn marker_fill(distance: f64, fill_distance_px: f64) -> f64 {
    if distance <= 0.0 {
        return 1.0;
    }
    // Degenerate ramp widths collapse to a hard step at the marker center.
    if fill_distance_px <= 0.0 {
        return 0.0;
    }
    if distance <= fill_distance_px {
        1.0 - distance / fill_distance_px
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_passed_marker_is_full() {
        assert_eq!(marker_fill(-30.0, 100.0), 1.0);
        assert_eq!(marker_fill(0.0, 100.0), 1.0);
    }

    #[test]
    fn ramp_is_linear_inside_fill_distance() {
        assert!((marker_fill(20.0, 100.0) - 0.8).abs() < 1e-12);
        assert!((marker_fill(50.0, 100.0) - 0.5).abs() < 1e-12);
        assert_eq!(marker_fill(150.0, 100.0), 0.0);
    }

    #[test]
    fn unmeasured_markers_stay_empty() {
        let levels = compute_fill_levels(1.0, 1000.0, 0.0, &[None, Some(10.0)], 100.0);
        assert_eq!(levels, vec![0.0, 1.0]);
    }

    #[test]
    fn zero_fill_distance_is_a_step() {
        assert_eq!(marker_fill(0.5, 0.0), 0.0);
        assert_eq!(marker_fill(-0.5, 0.0), 1.0);
    }
}
