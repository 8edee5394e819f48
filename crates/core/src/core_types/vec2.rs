//! Vector type alias for planar offsets.

use nalgebra::Vector2;

/// Planar offset in map degrees: `x` is the latitude component, `y` the
/// longitude component, matching the polar convention used by the spread
/// geometry (angle 0 points east, `lat += r*cos`, `lng += r*sin`).
///
/// This is a simple alias for `nalgebra::Vector2<f64>`.
pub type Vec2 = Vector2<f64>;
