//! Controller-level behavior: the checkbox and slider event surface of
//! `CyprusMap`, command ordering toward the widget host, and input
//! rejection.

use fire_map_core::{CyprusMap, Hours, MapCommand, MapError, SurfaceKind};

#[test]
fn initial_state_queues_one_draw_per_group() {
    let mut map = CyprusMap::new();
    let commands = map.drain_commands();

    // Cities, boundary, forests, grass, roads; all visible, no fire yet.
    assert_eq!(commands.len(), 5);
    for command in commands {
        match command {
            MapCommand::AddLayer(id) => {
                assert!(map.view().group(id).is_some(), "dangling id {id}");
            }
            MapCommand::RemoveLayer(id) => panic!("unexpected remove of {id}"),
        }
    }
}

#[test]
fn slider_replaces_old_overlay_before_adding_new() {
    let mut map = CyprusMap::new();
    map.drain_commands();

    map.set_fire_hours(5.0).unwrap();
    let first = map.view().fire_overlay().unwrap();
    assert_eq!(map.drain_commands(), vec![MapCommand::AddLayer(first)]);

    map.set_fire_hours(8.0).unwrap();
    let second = map.view().fire_overlay().unwrap();
    assert_eq!(
        map.drain_commands(),
        vec![MapCommand::RemoveLayer(first), MapCommand::AddLayer(second)]
    );
}

#[test]
fn zero_hours_leaves_no_fire_overlay() {
    let mut map = CyprusMap::new();
    map.drain_commands();

    // Moving the slider to zero from the start draws nothing at all.
    map.set_fire_hours(0.0).unwrap();
    assert!(map.fire_polygon().is_none());
    assert!(map.view().fire_overlay().is_none());
    assert!(map.drain_commands().is_empty());

    // And moving back to zero erases the overlay that was there.
    map.set_fire_hours(6.0).unwrap();
    let drawn = map.view().fire_overlay().unwrap();
    map.drain_commands();
    map.set_fire_hours(0.0).unwrap();
    assert_eq!(map.drain_commands(), vec![MapCommand::RemoveLayer(drawn)]);
    assert!(map.fire_polygon().is_none());
}

#[test]
fn negative_hours_are_rejected_without_side_effects() {
    let mut map = CyprusMap::new();
    map.set_fire_hours(4.0).unwrap();
    map.drain_commands();

    let err = map.set_fire_hours(-1.0).unwrap_err();
    assert_eq!(err, MapError::InvalidHours { value: -1.0 });

    // Nothing moved: same elapsed time, same overlay, no commands.
    assert_eq!(map.fire_hours(), Hours::new(4.0));
    assert!(map.fire_polygon().is_some());
    assert!(map.drain_commands().is_empty());
}

#[test]
fn fire_polygon_tracks_slider_value() {
    let mut map = CyprusMap::new();
    map.set_fire_hours(10.0).unwrap();

    let polygon = map.fire_polygon().unwrap();
    assert_eq!(polygon.len(), 32);

    let expected = map
        .spread_model()
        .compute_spread(Hours::new(10.0));
    assert_eq!(polygon.vertices(), expected.vertices());
}

#[test]
fn checkbox_events_only_emit_on_transitions() {
    let mut map = CyprusMap::new();
    map.drain_commands();

    assert!(map.set_surface_visible(SurfaceKind::Forests, false));
    assert!(!map.set_surface_visible(SurfaceKind::Forests, false));
    assert!(map.set_surface_visible(SurfaceKind::Roads, false));
    assert!(map.set_surface_visible(SurfaceKind::Forests, true));

    let commands = map.drain_commands();
    assert_eq!(commands.len(), 3);
    assert!(matches!(commands[0], MapCommand::RemoveLayer(_)));
    assert!(matches!(commands[1], MapCommand::RemoveLayer(_)));
    assert!(matches!(commands[2], MapCommand::AddLayer(_)));
}

#[test]
fn toggles_do_not_disturb_the_fire_overlay() {
    let mut map = CyprusMap::new();
    map.set_fire_hours(3.0).unwrap();
    let fire = map.view().fire_overlay().unwrap();
    map.drain_commands();

    map.set_surface_visible(SurfaceKind::Grass, false);
    map.set_surface_visible(SurfaceKind::Grass, true);

    assert_eq!(map.view().fire_overlay(), Some(fire));
    assert_eq!(map.fire_hours(), Hours::new(3.0));
}
