//! Validation of the fire-spread polygon generator: vertex count, worked
//! hand-computed values, directional anisotropy, growth monotonicity, and
//! determinism.

use approx::assert_relative_eq;
use fire_map_core::{Hours, LatLng, SpreadModel, SpreadProfile};

fn model() -> SpreadModel {
    SpreadModel::new(LatLng::new(34.75, 32.95), SpreadProfile::limassol())
}

fn radii(model: &SpreadModel, hours: f64) -> Vec<f64> {
    model
        .compute_spread(Hours::new(hours))
        .vertices()
        .iter()
        .map(|v| v.offset_from(model.origin()).norm())
        .collect()
}

#[test]
fn every_positive_time_yields_32_vertices() {
    let model = model();
    for hours in [0.1, 1.0, 6.0, 12.0, 24.0, 72.0] {
        assert_eq!(
            model.compute_spread(Hours::new(hours)).len(),
            32,
            "vertex count changed at {hours} hours"
        );
    }
}

#[test]
fn ten_hour_example_matches_hand_computation() {
    // base radius 10 * 0.015 = 0.15
    // north 0.195, east 0.18, south 0.135, west 0.12
    // vertex at angle 0: (north + east)/2 = 0.1875, ripple factor exactly 1,
    // displacement entirely on the latitude axis.
    let polygon = model().compute_spread(Hours::new(10.0));
    let first = polygon.vertices()[0];
    assert_relative_eq!(*first.lat, 34.9375, max_relative = 1e-12);
    assert_relative_eq!(*first.lng, 32.95, max_relative = 1e-12);
}

#[test]
fn quadrant_pairs_average_exactly() {
    let model = model();
    let radii = radii(&model, 10.0);

    // Angle 0 (index 0): (north + east)/2; the ripple term sin(0) vanishes.
    assert_relative_eq!(radii[0], 0.1875, max_relative = 1e-12);
    // Angle pi (index 16): (south + west)/2; sin(3*pi) is zero up to
    // floating-point residue.
    assert_relative_eq!(radii[16], 0.1275, max_relative = 1e-9);
}

#[test]
fn growth_is_monotonic_at_every_angle() {
    let model = model();
    for (h1, h2) in [(0.5, 1.0), (1.0, 2.0), (2.0, 5.5), (5.5, 24.0), (24.0, 96.0)] {
        let before = radii(&model, h1);
        let after = radii(&model, h2);
        for (i, (b, a)) in before.iter().zip(&after).enumerate() {
            assert!(
                a >= b,
                "radius shrank from {b} to {a} at vertex {i} going {h1} -> {h2} hours"
            );
        }
    }
}

#[test]
fn identical_hours_are_bit_identical() {
    let model = model();
    let a = model.compute_spread(Hours::new(13.0));
    let b = model.compute_spread(Hours::new(13.0));
    assert_eq!(a.vertices(), b.vertices());

    // And through serde, byte for byte.
    let ja = serde_json::to_string(&a).unwrap();
    let jb = serde_json::to_string(&b).unwrap();
    assert_eq!(ja, jb);
}

#[test]
fn north_and_east_outrun_south_and_west() {
    // The profile biases spread toward the forested north/east, so
    // northeast-quadrant radii must strictly exceed the southwest ones at
    // diametrically opposite vertices.
    let model = model();
    let radii = radii(&model, 12.0);
    assert!(radii[0] > radii[16]);
    assert!(radii[4] > radii[20]);
}

#[test]
fn profile_round_trips_through_serde() {
    let profile = SpreadProfile::limassol();
    let json = serde_json::to_string(&profile).unwrap();
    let back: SpreadProfile = serde_json::from_str(&json).unwrap();
    assert_eq!(back, profile);
}
