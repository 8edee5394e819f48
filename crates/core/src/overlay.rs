//! Vector overlays and their styling.
//!
//! An overlay is the unit the widget host draws and removes: a marker, a
//! filled polygon, or a stroked polyline, each with optional popup text.
//! Styling mirrors the path options of web map widgets (stroke color and
//! opacity, stroke weight in pixels, fill color and opacity) so a host can
//! pass the values through unchanged.

use serde::{Deserialize, Serialize};

use crate::core_types::LatLng;
use crate::error::MapError;

/// Default stroke/fill color of web map vector layers.
pub const DEFAULT_PATH_COLOR: &str = "#3388ff";

/// Visual style of a polygon or polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathStyle {
    /// Stroke color as a CSS hex string
    pub color: String,
    /// Stroke opacity in `[0, 1]`
    pub opacity: f64,
    /// Stroke width in pixels
    pub weight: f64,
    /// Fill color as a CSS hex string
    pub fill_color: String,
    /// Fill opacity in `[0, 1]`; zero means unfilled
    pub fill_opacity: f64,
}

impl Default for PathStyle {
    fn default() -> Self {
        PathStyle {
            color: DEFAULT_PATH_COLOR.to_string(),
            opacity: 1.0,
            weight: 3.0,
            fill_color: DEFAULT_PATH_COLOR.to_string(),
            fill_opacity: 0.2,
        }
    }
}

impl PathStyle {
    /// Filled shape: stroke and fill share one color, full stroke opacity.
    #[must_use]
    pub fn filled(color: &str, weight: f64, fill_opacity: f64) -> Self {
        PathStyle {
            color: color.to_string(),
            opacity: 1.0,
            weight,
            fill_color: color.to_string(),
            fill_opacity,
        }
    }

    /// Unfilled stroke, for polylines.
    #[must_use]
    pub fn stroke(color: &str, weight: f64, opacity: f64) -> Self {
        PathStyle {
            color: color.to_string(),
            opacity,
            weight,
            fill_color: color.to_string(),
            fill_opacity: 0.0,
        }
    }
}

/// A single vector shape the widget host renders and removes as a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Overlay {
    /// Point marker with the host's default icon
    Marker {
        /// Anchor position
        position: LatLng,
        /// Popup text shown when the marker is clicked
        popup: Option<String>,
    },
    /// Closed region; the ring is implicitly closed (first vertex not
    /// repeated at the end)
    Polygon {
        /// Ring vertices, at least three
        ring: Vec<LatLng>,
        /// Path styling
        style: PathStyle,
        /// Popup text shown when the shape is clicked
        popup: Option<String>,
    },
    /// Open path
    Polyline {
        /// Path vertices, at least two
        path: Vec<LatLng>,
        /// Path styling
        style: PathStyle,
        /// Popup text shown when the shape is clicked
        popup: Option<String>,
    },
}

impl Overlay {
    /// Point marker at `position`.
    #[must_use]
    pub fn marker(position: LatLng) -> Self {
        Overlay::Marker {
            position,
            popup: None,
        }
    }

    /// Closed polygon from an implicit ring.
    ///
    /// # Errors
    /// Returns [`MapError::DegeneratePolygon`] for rings with fewer than
    /// three vertices.
    pub fn polygon(ring: Vec<LatLng>, style: PathStyle) -> Result<Self, MapError> {
        if ring.len() < 3 {
            return Err(MapError::DegeneratePolygon(ring.len()));
        }
        Ok(Overlay::Polygon {
            ring,
            style,
            popup: None,
        })
    }

    /// Open polyline.
    ///
    /// # Errors
    /// Returns [`MapError::DegeneratePolyline`] for paths with fewer than
    /// two vertices.
    pub fn polyline(path: Vec<LatLng>, style: PathStyle) -> Result<Self, MapError> {
        if path.len() < 2 {
            return Err(MapError::DegeneratePolyline(path.len()));
        }
        Ok(Overlay::Polyline {
            path,
            style,
            popup: None,
        })
    }

    /// Attach popup text.
    #[must_use]
    pub fn with_popup(mut self, text: impl Into<String>) -> Self {
        let slot = match &mut self {
            Overlay::Marker { popup, .. }
            | Overlay::Polygon { popup, .. }
            | Overlay::Polyline { popup, .. } => popup,
        };
        *slot = Some(text.into());
        self
    }

    /// Popup text, if any.
    #[must_use]
    pub fn popup(&self) -> Option<&str> {
        match self {
            Overlay::Marker { popup, .. }
            | Overlay::Polygon { popup, .. }
            | Overlay::Polyline { popup, .. } => popup.as_deref(),
        }
    }

    /// Number of coordinates the shape carries.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        match self {
            Overlay::Marker { .. } => 1,
            Overlay::Polygon { ring, .. } => ring.len(),
            Overlay::Polyline { path, .. } => path.len(),
        }
    }
}

/// A named set of overlays added to and removed from the map as one unit,
/// like a checkbox-controlled layer group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerGroup {
    /// Group name, for logs and host-side debugging
    pub name: String,
    overlays: Vec<Overlay>,
}

impl LayerGroup {
    /// Empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        LayerGroup {
            name: name.into(),
            overlays: Vec::new(),
        }
    }

    /// Group from existing overlays.
    #[must_use]
    pub fn with_overlays(name: impl Into<String>, overlays: Vec<Overlay>) -> Self {
        LayerGroup {
            name: name.into(),
            overlays,
        }
    }

    /// Append an overlay.
    pub fn push(&mut self, overlay: Overlay) {
        self.overlays.push(overlay);
    }

    /// Overlays in insertion order.
    #[must_use]
    pub fn overlays(&self) -> &[Overlay] {
        &self.overlays
    }

    /// Number of overlays in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    /// True when the group holds no overlays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<LatLng> {
        vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
            LatLng::new(1.0, 0.0),
        ]
    }

    #[test]
    fn polygon_requires_three_vertices() {
        let short = vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)];
        assert_eq!(
            Overlay::polygon(short, PathStyle::default()),
            Err(MapError::DegeneratePolygon(2))
        );
        assert!(Overlay::polygon(square(), PathStyle::default()).is_ok());
    }

    #[test]
    fn polyline_requires_two_vertices() {
        let short = vec![LatLng::new(0.0, 0.0)];
        assert_eq!(
            Overlay::polyline(short, PathStyle::default()),
            Err(MapError::DegeneratePolyline(1))
        );
    }

    #[test]
    fn popup_attaches_to_any_shape() {
        let marker = Overlay::marker(LatLng::new(35.0, 33.0)).with_popup("Nicosia");
        assert_eq!(marker.popup(), Some("Nicosia"));

        let poly = Overlay::polygon(square(), PathStyle::default())
            .unwrap()
            .with_popup("Forest Area");
        assert_eq!(poly.popup(), Some("Forest Area"));
    }

    #[test]
    fn stroke_style_is_unfilled() {
        let style = PathStyle::stroke("#666", 4.0, 0.8);
        assert_eq!(style.fill_opacity, 0.0);
        assert_eq!(style.weight, 4.0);
    }
}
