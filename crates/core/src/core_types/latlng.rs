//! Geographic coordinate type.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core_types::units::Degrees;
use crate::core_types::vec2::Vec2;
use crate::error::MapError;

/// A geographic position as a (latitude, longitude) pair in decimal degrees.
///
/// No projection is applied anywhere in this crate: offsets are added to
/// latitude and longitude independently (flat-earth approximation), which is
/// adequate at the island scale the map covers.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in decimal degrees, north positive
    pub lat: Degrees,
    /// Longitude in decimal degrees, east positive
    pub lng: Degrees,
}

impl LatLng {
    /// Create a coordinate. Asserts both components are finite.
    #[inline]
    #[must_use]
    #[track_caller]
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng {
            lat: Degrees::new(lat),
            lng: Degrees::new(lng),
        }
    }

    /// Fallible constructor for coordinates arriving from outside the crate.
    ///
    /// # Errors
    /// Returns [`MapError::NonFiniteCoordinate`] if either component is NaN
    /// or infinite.
    #[inline]
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, MapError> {
        Ok(LatLng {
            lat: Degrees::try_new(lat)?,
            lng: Degrees::try_new(lng)?,
        })
    }

    /// Displace this coordinate by a planar offset in map degrees
    /// (`delta.x` applied to latitude, `delta.y` to longitude).
    #[inline]
    #[must_use]
    pub fn offset(self, delta: Vec2) -> LatLng {
        LatLng {
            lat: self.lat + delta.x,
            lng: self.lng + delta.y,
        }
    }

    /// Planar offset from `origin` to this coordinate, in map degrees.
    #[inline]
    #[must_use]
    pub fn offset_from(self, origin: LatLng) -> Vec2 {
        Vec2::new(*(self.lat - origin.lat), *(self.lng - origin.lng))
    }
}

impl From<LatLng> for (f64, f64) {
    fn from(p: LatLng) -> (f64, f64) {
        (*p.lat, *p.lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn offset_is_componentwise() {
        let origin = LatLng::new(34.75, 32.95);
        let moved = origin.offset(Vec2::new(0.1875, 0.0));
        assert_eq!(*moved.lat, 34.9375);
        assert_eq!(*moved.lng, 32.95);
    }

    #[test]
    fn offset_from_inverts_offset() {
        let origin = LatLng::new(35.0, 33.0);
        let delta = Vec2::new(-0.02, 0.13);
        let back = origin.offset(delta).offset_from(origin);
        assert_relative_eq!(back.x, delta.x, max_relative = 1e-12);
        assert_relative_eq!(back.y, delta.y, max_relative = 1e-12);
    }

    #[test]
    fn rejects_non_finite_components() {
        assert!(LatLng::try_new(f64::NAN, 33.0).is_err());
        assert!(LatLng::try_new(35.0, f64::NEG_INFINITY).is_err());
    }
}
