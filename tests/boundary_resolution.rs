mod fixtures;

use assert_matches::assert_matches;
use fixtures::sample_timelines::{columns_of_200, create_linked_shrink_scenario, create_shrink_scenario};
use plot_timeline::{
    BoundaryConflict, BoundaryResolver, Resolution, SettingsChange, Timeline, TimelineChange,
};
use pretty_assertions::assert_eq;

fn request_shrink(timeline: &mut Timeline, count: usize) -> BoundaryConflict {
    let change = timeline
        .request_settings_change(columns_of_200(count), &BoundaryResolver::default())
        .unwrap();
    match change {
        SettingsChange::NeedsResolution(conflict) => conflict,
        SettingsChange::Committed => panic!("expected a boundary conflict"),
    }
}

fn assert_in_bounds(timeline: &Timeline) {
    for event in timeline.events().values() {
        assert!(event.x >= 0.0 && event.x <= timeline.boundary(), "{} out of bounds", event.title);
        assert!(event.y >= 0.0 && event.y <= timeline.vertical_extent());
        assert!(timeline.settings().column(event.column_id).is_some());
    }
    assert!(timeline.dangling_edges().is_empty());
}

#[test]
fn test_shrink_flags_only_events_past_margin() {
    let (mut timeline, near, far) = create_shrink_scenario();
    let conflict = request_shrink(&mut timeline, 8);

    assert_eq!(conflict.new_boundary, 1600.0);
    assert_eq!(conflict.limit_x, 1500.0);
    assert_eq!(conflict.out_of_bounds, vec![far]);
    assert!(!conflict.out_of_bounds.contains(&near));

    // Nothing is committed until a resolution is chosen
    assert_eq!(timeline.boundary(), 2000.0);
}

#[test]
fn test_shrink_without_stranded_events_commits() {
    let (mut timeline, _, _) = create_shrink_scenario();
    let change = timeline
        .request_settings_change(columns_of_200(10), &BoundaryResolver::default())
        .unwrap();
    assert_eq!(change, SettingsChange::Committed);

    // Boundary 1900 puts the limit at 1800, which is not past it
    let change = timeline
        .request_settings_change(
            timeline.settings().resized(10, 190.0).unwrap(),
            &BoundaryResolver::default(),
        )
        .unwrap();
    assert_eq!(change, SettingsChange::Committed);
    assert_eq!(timeline.boundary(), 1900.0);
}

#[test]
fn test_relocate_moves_to_last_valid_position() {
    let (mut timeline, near, far) = create_shrink_scenario();
    let conflict = request_shrink(&mut timeline, 8);

    let report = timeline.apply_resolution(&conflict, Resolution::Relocate).unwrap();

    assert!(report.committed);
    assert_eq!(report.affected_events, vec![far]);
    assert_eq!(timeline.boundary(), 1600.0);

    let far_event = timeline.get_event(far).unwrap();
    assert_eq!(far_event.x, 1500.0);
    assert_eq!(far_event.y, 400.0);
    assert_eq!(
        Some(far_event.column_id),
        timeline.settings().last_column().map(|c| c.id)
    );
    assert_eq!(timeline.get_event(near).unwrap().x, 100.0);
    assert_in_bounds(&timeline);
}

#[test]
fn test_compress_scales_every_event() {
    let (mut timeline, near, far) = create_shrink_scenario();
    let conflict = request_shrink(&mut timeline, 8);

    let report = timeline.apply_resolution(&conflict, Resolution::Compress).unwrap();

    assert_eq!(report.affected_events.len(), 2);
    assert_eq!(timeline.get_event(far).unwrap().x, 1500.0);
    let near_x = timeline.get_event(near).unwrap().x;
    assert!((near_x - 83.333).abs() < 0.01, "near_x = {}", near_x);
    assert_in_bounds(&timeline);
}

#[test]
fn test_delete_removes_events_and_incident_edges() {
    let (mut timeline, near, far, middle) = create_linked_shrink_scenario();
    let conflict = request_shrink(&mut timeline, 8);

    let report = timeline.apply_resolution(&conflict, Resolution::Delete).unwrap();

    assert_eq!(report.affected_events, vec![far]);
    assert_eq!(report.removed_edges.len(), 2);
    assert!(timeline.get_event(far).is_none());
    assert_eq!(timeline.event_count(), 2);
    assert_eq!(timeline.edge_count(), 1);
    let survivor = timeline.edges_sorted()[0].clone();
    assert_eq!((survivor.source, survivor.target), (near, middle));
    assert!(timeline.events_in_z_order().iter().all(|e| e.id != far));
    assert_in_bounds(&timeline);
}

#[test]
fn test_cancel_leaves_everything_untouched() {
    let (mut timeline, _, _, _) = create_linked_shrink_scenario();
    let before = timeline.clone();
    let conflict = request_shrink(&mut timeline, 8);

    let report = timeline.apply_resolution(&conflict, Resolution::Cancel).unwrap();

    assert!(!report.committed);
    assert_eq!(timeline.events(), before.events());
    assert_eq!(timeline.edges(), before.edges());
    assert_eq!(timeline.settings(), before.settings());
    assert_eq!(timeline.revision(), before.revision());
    assert_eq!(timeline.history().len(), before.history().len());
}

#[test]
fn test_stale_conflict_is_rejected() {
    let (mut timeline, near, _) = create_shrink_scenario();
    let conflict = request_shrink(&mut timeline, 8);

    // The timeline moves on before the user answers the dialog
    timeline.move_event(near, 300.0, 100.0).unwrap();
    let events = timeline.events().clone();

    assert!(timeline.apply_resolution(&conflict, Resolution::Delete).is_err());
    assert_eq!(timeline.events(), &events);
    assert_eq!(timeline.boundary(), 2000.0);
}

#[test]
fn test_resolution_is_logged_before_settings_commit() {
    let (mut timeline, _, far) = create_shrink_scenario();
    timeline.clear_history();
    let conflict = request_shrink(&mut timeline, 8);

    timeline.apply_resolution(&conflict, Resolution::Relocate).unwrap();

    let changes: Vec<&TimelineChange> = timeline.history().iter().map(|h| &h.change).collect();
    assert_eq!(changes.len(), 2);
    assert_matches!(
        changes[0],
        TimelineChange::BoundaryResolved { resolution: Resolution::Relocate, affected_events, .. }
            if affected_events == &vec![far]
    );
    assert_matches!(
        changes[1],
        TimelineChange::SettingsCommitted { column_count: 8, .. }
    );
}

#[test]
fn test_every_policy_keeps_invariants() {
    for resolution in [Resolution::Relocate, Resolution::Compress, Resolution::Delete] {
        let (mut timeline, _, _, _) = create_linked_shrink_scenario();
        let conflict = request_shrink(&mut timeline, 3);
        timeline.apply_resolution(&conflict, resolution).unwrap();

        assert_eq!(timeline.boundary(), 600.0);
        assert_in_bounds(&timeline);
    }
}
