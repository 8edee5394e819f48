//! Fire-spread geometry.
//!
//! Maps elapsed time to a closed polygon approximating fire extent around a
//! fixed ignition point. The shape is anisotropic by compass quadrant: the
//! perimeter reaches further toward the forested north and east than toward
//! the coast in the south and west. A fixed sinusoidal ripple roughens the
//! outline; the whole construction is deterministic, so identical inputs
//! produce bit-identical polygons.
//!
//! The rates and multipliers here are tuned presentation constants, not a
//! fitted fire-behavior model.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::core_types::{Degrees, Hours, LatLng, Vec2};

/// Spread-rate configuration for one region.
///
/// All distances are planar map degrees. The four directional factors scale
/// the shared base radius; each polygon vertex averages the two factors of
/// its compass quadrant, so the outline transitions at the quadrant
/// boundaries rather than jumping per-vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadProfile {
    /// Region name (e.g., "Limassol hinterland")
    pub name: String,

    /// Radius gained per elapsed hour, in map degrees
    pub spread_rate: Degrees,

    /// Multiplier applied toward north
    pub north_factor: f64,
    /// Multiplier applied toward east
    pub east_factor: f64,
    /// Multiplier applied toward south
    pub south_factor: f64,
    /// Multiplier applied toward west
    pub west_factor: f64,

    /// Amplitude of the cosmetic perimeter ripple, as a fraction of the
    /// directional radius
    pub ripple_amplitude: f64,
    /// Number of ripple lobes around the full perimeter
    pub ripple_lobes: f64,

    /// Number of perimeter vertices; the ring is implicitly closed
    pub vertices: u32,
}

impl SpreadProfile {
    /// Profile for the Limassol hinterland ignition scenario: faster spread
    /// north and east toward the Troodos and northern forests, slower south
    /// and west toward the coast.
    #[must_use]
    pub fn limassol() -> Self {
        SpreadProfile {
            name: "Limassol hinterland".to_string(),
            spread_rate: Degrees::new(0.015),
            north_factor: 1.3,
            east_factor: 1.2,
            south_factor: 0.9,
            west_factor: 0.8,
            ripple_amplitude: 0.1,
            ripple_lobes: 3.0,
            vertices: 32,
        }
    }

    /// Round profile with no directional bias and no ripple. Mostly useful
    /// in tests, where isolating one effect at a time keeps assertions
    /// readable.
    #[must_use]
    pub fn uniform(spread_rate: Degrees, vertices: u32) -> Self {
        SpreadProfile {
            name: "uniform".to_string(),
            spread_rate,
            north_factor: 1.0,
            east_factor: 1.0,
            south_factor: 1.0,
            west_factor: 1.0,
            ripple_amplitude: 0.0,
            ripple_lobes: 0.0,
            vertices,
        }
    }
}

/// The closed ring approximating fire extent at one elapsed time.
///
/// Vertices are ordered counter-clockwise starting due east of the origin;
/// the first vertex is not repeated at the end (consumers close the ring).
/// A new polygon is computed for every slider change; instances are never
/// mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadPolygon(Vec<LatLng>);

impl SpreadPolygon {
    /// Perimeter vertices in ring order.
    #[must_use]
    pub fn vertices(&self) -> &[LatLng] {
        &self.0
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a vertex-free polygon (never produced by [`SpreadModel`]).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ring with the first vertex repeated at the end, as GeoJSON and most
    /// geometry consumers expect.
    #[must_use]
    pub fn closed_ring(&self) -> Vec<LatLng> {
        let mut ring = self.0.clone();
        if let Some(&first) = ring.first() {
            ring.push(first);
        }
        ring
    }

    /// Consume the polygon, yielding its vertices.
    #[must_use]
    pub fn into_vertices(self) -> Vec<LatLng> {
        self.0
    }
}

impl<'a> IntoIterator for &'a SpreadPolygon {
    type Item = &'a LatLng;
    type IntoIter = std::slice::Iter<'a, LatLng>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Fire-spread generator: a fixed ignition origin plus a [`SpreadProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadModel {
    origin: LatLng,
    profile: SpreadProfile,
}

impl SpreadModel {
    /// Model spreading from `origin` under `profile`.
    #[must_use]
    pub fn new(origin: LatLng, profile: SpreadProfile) -> Self {
        SpreadModel { origin, profile }
    }

    /// Ignition origin.
    #[must_use]
    pub fn origin(&self) -> LatLng {
        self.origin
    }

    /// Spread-rate configuration.
    #[must_use]
    pub fn profile(&self) -> &SpreadProfile {
        &self.profile
    }

    /// Compute the spread polygon after `hours` of elapsed time.
    ///
    /// Defined for all non-negative elapsed times, including zero, where
    /// every vertex collapses onto the origin. Callers rendering the result
    /// must suppress the overlay entirely at zero hours instead of drawing
    /// the degenerate ring; [`crate::cyprus::CyprusMap`] does exactly that.
    ///
    /// For each of the `vertices` perimeter points at angle
    /// `theta = 2*pi*i/vertices` (0 = east, counter-clockwise):
    /// 1. the base radius `hours * spread_rate` is scaled by the average of
    ///    the two directional factors of the quadrant `theta` falls in
    ///    (half-open ranges, so a boundary angle belongs to the upper
    ///    quadrant), then
    /// 2. roughened by the ripple factor
    ///    `1 + ripple_amplitude * sin(ripple_lobes * theta)`, and
    /// 3. added to the origin componentwise:
    ///    `lat += r*cos(theta)`, `lng += r*sin(theta)` (no projection).
    #[must_use]
    pub fn compute_spread(&self, hours: Hours) -> SpreadPolygon {
        let p = &self.profile;
        assert!(
            p.vertices >= 3,
            "SpreadProfile::vertices must be at least 3, got {}",
            p.vertices
        );

        let base_radius = *p.spread_rate * hours.value();
        let north = base_radius * p.north_factor;
        let east = base_radius * p.east_factor;
        let south = base_radius * p.south_factor;
        let west = base_radius * p.west_factor;

        let count = p.vertices as usize;
        let mut ring = Vec::with_capacity(count);
        for i in 0..count {
            let theta = (i as f64) / (count as f64) * TAU;

            let directional = if theta < FRAC_PI_2 {
                (north + east) / 2.0
            } else if theta < PI {
                (north + west) / 2.0
            } else if theta < 3.0 * FRAC_PI_2 {
                (south + west) / 2.0
            } else {
                (south + east) / 2.0
            };

            let ripple = 1.0 + p.ripple_amplitude * (p.ripple_lobes * theta).sin();
            let radius = directional * ripple;

            ring.push(
                self.origin
                    .offset(Vec2::new(theta.cos(), theta.sin()) * radius),
            );
        }

        SpreadPolygon(ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn limassol_model() -> SpreadModel {
        SpreadModel::new(LatLng::new(34.75, 32.95), SpreadProfile::limassol())
    }

    #[test]
    fn ten_hours_first_vertex_matches_hand_computation() {
        // base 0.15; (north + east)/2 = (0.195 + 0.18)/2 = 0.1875; ripple at
        // angle 0 is exactly 1. Angle 0 displaces latitude only (lat gets
        // r*cos, lng gets r*sin), so the first vertex is 0.1875 degrees of
        // latitude from the origin, on the origin's longitude.
        let polygon = limassol_model().compute_spread(Hours::new(10.0));
        let first = polygon.vertices()[0];
        assert_relative_eq!(*first.lat, 34.9375, max_relative = 1e-12);
        assert_relative_eq!(*first.lng, 32.95, max_relative = 1e-12);
    }

    #[test]
    fn vertex_count_matches_profile() {
        let polygon = limassol_model().compute_spread(Hours::new(0.25));
        assert_eq!(polygon.len(), 32);

        let five = SpreadModel::new(
            LatLng::new(0.0, 0.0),
            SpreadProfile::uniform(Degrees::new(0.01), 5),
        )
        .compute_spread(Hours::new(1.0));
        assert_eq!(five.len(), 5);
    }

    #[test]
    fn opposite_quadrants_average_their_own_factors() {
        // Index 16 of 32 is the western vertex (angle pi), which belongs to
        // the southwest quadrant: (south + west)/2 = (0.135 + 0.12)/2.
        let polygon = limassol_model().compute_spread(Hours::new(10.0));
        let origin = limassol_model().origin();
        let opposite = polygon.vertices()[16];
        let radius = opposite.offset_from(origin).norm();
        assert_relative_eq!(radius, 0.1275, max_relative = 1e-9);
    }

    #[test]
    fn quadrant_boundary_belongs_to_upper_quadrant() {
        // With 4 vertices, index 1 lands exactly on angle pi/2, which the
        // half-open ranges assign to the northwest pair.
        let mut profile = SpreadProfile::limassol();
        profile.vertices = 4;
        profile.ripple_amplitude = 0.0;
        let model = SpreadModel::new(LatLng::new(0.0, 0.0), profile);

        let polygon = model.compute_spread(Hours::new(10.0));
        let boundary_vertex = polygon.vertices()[1];
        // (north + west)/2 = (0.195 + 0.12)/2 = 0.1575; at angle pi/2 the
        // whole radius lands on the longitude component.
        assert_relative_eq!(*boundary_vertex.lng, 0.1575, max_relative = 1e-9);
    }

    #[test]
    fn zero_hours_collapses_onto_origin() {
        let model = limassol_model();
        let polygon = model.compute_spread(Hours::ZERO);
        assert_eq!(polygon.len(), 32);
        for vertex in &polygon {
            assert_eq!(*vertex, model.origin());
        }
    }

    #[test]
    fn identical_input_is_bit_identical() {
        let model = limassol_model();
        let a = model.compute_spread(Hours::new(7.0));
        let b = model.compute_spread(Hours::new(7.0));
        assert_eq!(a, b);
    }

    #[test]
    fn ripple_has_configured_lobe_count() {
        // With the ripple on and directional factors flattened, local maxima
        // of the radius appear once per lobe.
        let mut profile = SpreadProfile::uniform(Degrees::new(0.015), 96);
        profile.ripple_amplitude = 0.1;
        profile.ripple_lobes = 3.0;
        let model = SpreadModel::new(LatLng::new(0.0, 0.0), profile);
        let polygon = model.compute_spread(Hours::new(10.0));

        let radii: Vec<f64> = polygon
            .vertices()
            .iter()
            .map(|v| v.offset_from(model.origin()).norm())
            .collect();
        let n = radii.len();
        let maxima = (0..n)
            .filter(|&i| {
                radii[i] > radii[(i + n - 1) % n] && radii[i] > radii[(i + 1) % n]
            })
            .count();
        assert_eq!(maxima, 3);
    }

    #[test]
    fn closed_ring_repeats_first_vertex() {
        let polygon = limassol_model().compute_spread(Hours::new(2.0));
        let ring = polygon.closed_ring();
        assert_eq!(ring.len(), 33);
        assert_eq!(ring[0], ring[32]);
    }
}
