use timeline_core::{
    compute_fill_levels, desktop_side, expected_position, side_for, ListenerLedger, Side,
    SourceMode, TimelineConfig, TimelineGeometry, TimelineState,
};

fn measured(centers: &[f64]) -> Vec<Option<f64>> {
    centers.iter().copied().map(Some).collect()
}

#[test]
fn fill_is_monotone_and_bounded() {
    let centers = measured(&[120.0, 360.0, 600.0, 840.0, 1080.0]);
    let mut previous = vec![0.0; centers.len()];

    for step in 0..=100 {
        let progress = step as f64 / 100.0;
        let levels = compute_fill_levels(progress, 1200.0, 0.0, &centers, 100.0);
        for (level, prev) in levels.iter().zip(&previous) {
            assert!((0.0..=1.0).contains(level));
            assert!(level + 1e-12 >= *prev, "fill regressed as progress grew");
        }
        previous = levels;
    }
}

#[test]
fn fill_computation_is_idempotent() {
    let centers = measured(&[100.0, 300.0, 777.0]);
    let first = compute_fill_levels(0.42, 900.0, 64.0, &centers, 100.0);
    let second = compute_fill_levels(0.42, 900.0, 64.0, &centers, 100.0);
    assert_eq!(first, second);
}

#[test]
fn progress_boundaries_empty_and_full() {
    // Every marker sits below the bar start and above its end.
    let centers = measured(&[150.0, 450.0, 750.0]);
    let at_start = compute_fill_levels(0.0, 1000.0, 0.0, &centers, 100.0);
    assert!(at_start.iter().all(|level| *level == 0.0));

    let at_end = compute_fill_levels(1.0, 1000.0, 0.0, &centers, 100.0);
    assert!(at_end.iter().all(|level| *level == 1.0));
}

#[test]
fn desktop_alternates_and_mobile_pins() {
    for index in 0..12 {
        assert_ne!(desktop_side(index), desktop_side(index + 1));
    }

    let config = TimelineConfig::default();
    for index in 0..12 {
        assert_eq!(
            side_for(index, SourceMode::WindowGlobal, config.mobile_side),
            config.mobile_side,
        );
    }
    assert_eq!(
        side_for(0, SourceMode::WindowGlobal, Side::Left),
        Side::Left
    );
}

#[test]
fn visibility_latch_survives_scroll_reversal() {
    let mut state = TimelineState::new(5, SourceMode::ContainerRelative, TimelineConfig::default());
    let geometry = TimelineGeometry {
        bar_total_height: 1000.0,
        bar_top_offset: 0.0,
        marker_centers: measured(&[100.0, 300.0, 500.0, 700.0, 900.0]),
    };

    state.on_scroll(0.65, &geometry);
    let fired: Vec<bool> = (0..5).map(|i| state.is_visible(i)).collect();
    assert!(fired[0] && fired[1] && fired[2]);

    // Drive progress back down; no flag may revert.
    state.on_scroll(0.0, &geometry);
    for (index, was_fired) in fired.iter().enumerate() {
        if *was_fired {
            assert!(state.is_visible(index), "entry {index} flickered off");
        }
    }
}

#[test]
fn scenario_a_reference_fill_values() {
    // Bar 1000 px at progress 0.5: bottom edge at 500 px.
    assert_eq!(timeline_core::bar_bottom(0.5, 0.0, 1000.0), 500.0);

    let centers = measured(&[480.0, 650.0]);
    let levels = compute_fill_levels(0.5, 1000.0, 0.0, &centers, 100.0);
    assert!((levels[0] - 0.8).abs() < 1e-12, "marker 20 px ahead fills 0.8");
    assert_eq!(levels[1], 0.0, "marker 150 px ahead is untouched");
}

#[test]
fn scenario_b_empty_entry_list() {
    let mut state = TimelineState::new(0, SourceMode::ContainerRelative, TimelineConfig::default());
    state.on_scroll(0.5, &TimelineGeometry::default());
    let frame = state.frame();
    assert!(frame.fill_levels.is_empty());
    assert!(frame.visible.is_empty());
}

#[test]
fn scenario_c_single_entry_guard() {
    assert_eq!(expected_position(0, 1), 0.0);

    let mut state = TimelineState::new(1, SourceMode::ContainerRelative, TimelineConfig::default());
    state.on_scroll(0.0, &TimelineGeometry {
        bar_total_height: 400.0,
        bar_top_offset: 0.0,
        marker_centers: measured(&[200.0]),
    });
    // Threshold is -0.1, so the only entry is visible from the start.
    assert!(state.is_visible(0));
}

#[test]
fn scenario_d_mode_switch_leaks_no_listeners() {
    let mut state = TimelineState::for_viewport(4, 1024.0, TimelineConfig::default());
    let mut ledger = ListenerLedger::default();

    // Mount in container mode: container scroll + window resize.
    ledger.attach_scroll();
    ledger.attach_resize();

    // Resize crosses the breakpoint: detach the old mode's listeners,
    // attach the new mode's.
    let switched = state.set_viewport_width(375.0);
    assert_eq!(switched, Some(SourceMode::WindowGlobal));
    ledger.detach_scroll();
    ledger.detach_resize();
    ledger.attach_scroll();
    ledger.attach_resize();
    ledger.attach_intersection();

    // Unmount: everything must come back down to zero.
    state.teardown();
    ledger.detach_scroll();
    ledger.detach_resize();
    ledger.detach_intersection();
    assert!(ledger.is_empty());
}
