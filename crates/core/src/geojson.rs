//! GeoJSON export of overlays and spread polygons.
//!
//! For widget hosts that would rather ingest a standard document than walk
//! the overlay model. Output follows RFC 7946: positions are
//! `[longitude, latitude]`, polygon rings are explicitly closed. Styling
//! and popup text ride along as foreign members under `properties`, using
//! the camelCase keys web map widgets take as path options.

use serde_json::{json, Value};

use crate::core_types::{Hours, LatLng};
use crate::overlay::{LayerGroup, Overlay, PathStyle};
use crate::spread::SpreadPolygon;
use crate::view::MapView;

fn position(p: LatLng) -> Value {
    json!([*p.lng, *p.lat])
}

fn closed_ring(ring: &[LatLng]) -> Value {
    let mut positions: Vec<Value> = ring.iter().map(|&p| position(p)).collect();
    if let Some(&first) = ring.first() {
        positions.push(position(first));
    }
    Value::Array(positions)
}

fn style_properties(style: &PathStyle) -> Value {
    json!({
        "color": style.color,
        "opacity": style.opacity,
        "weight": style.weight,
        "fillColor": style.fill_color,
        "fillOpacity": style.fill_opacity,
    })
}

/// One overlay as a GeoJSON Feature.
#[must_use]
pub fn overlay_feature(overlay: &Overlay) -> Value {
    let (geometry, properties) = match overlay {
        Overlay::Marker { position: p, popup } => (
            json!({ "type": "Point", "coordinates": position(*p) }),
            json!({ "popup": popup }),
        ),
        Overlay::Polygon { ring, style, popup } => (
            json!({ "type": "Polygon", "coordinates": [closed_ring(ring)] }),
            json!({ "popup": popup, "style": style_properties(style) }),
        ),
        Overlay::Polyline { path, style, popup } => (
            json!({
                "type": "LineString",
                "coordinates": path.iter().map(|&p| position(p)).collect::<Vec<_>>(),
            }),
            json!({ "popup": popup, "style": style_properties(style) }),
        ),
    };
    json!({ "type": "Feature", "geometry": geometry, "properties": properties })
}

/// One layer group as a GeoJSON FeatureCollection.
#[must_use]
pub fn group_feature_collection(group: &LayerGroup) -> Value {
    let features: Vec<Value> = group.overlays().iter().map(overlay_feature).collect();
    json!({
        "type": "FeatureCollection",
        "name": group.name,
        "features": features,
    })
}

/// A spread polygon as a standalone Feature tagged with its elapsed time.
#[must_use]
pub fn spread_feature(polygon: &SpreadPolygon, hours: Hours) -> Value {
    json!({
        "type": "Feature",
        "geometry": {
            "type": "Polygon",
            "coordinates": [closed_ring(polygon.vertices())],
        },
        "properties": { "kind": "fire-spread", "hours": hours.value() },
    })
}

/// Every visible group of a view, flattened into one FeatureCollection.
///
/// Each feature carries a `layer` property naming its source group, so a
/// host can still style or filter per group after the flatten.
#[must_use]
pub fn view_feature_collection(view: &MapView) -> Value {
    let mut features = Vec::new();
    for id in view.layer_ids() {
        if view.is_visible(id) != Ok(true) {
            continue;
        }
        let Some(group) = view.group(id) else { continue };
        for overlay in group.overlays() {
            let mut feature = overlay_feature(overlay);
            feature["properties"]["layer"] = json!(group.name);
            features.push(feature);
        }
    }
    json!({ "type": "FeatureCollection", "features": features })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cyprus;

    #[test]
    fn marker_positions_are_lng_lat() {
        let marker = Overlay::marker(LatLng::new(35.1856, 33.3823));
        let feature = overlay_feature(&marker);
        assert_eq!(
            feature["geometry"]["coordinates"],
            json!([33.3823, 35.1856])
        );
    }

    #[test]
    fn exported_rings_are_closed() {
        let overlay = Overlay::polygon(
            vec![
                LatLng::new(0.0, 0.0),
                LatLng::new(0.0, 1.0),
                LatLng::new(1.0, 0.0),
            ],
            PathStyle::default(),
        )
        .unwrap();
        let feature = overlay_feature(&overlay);
        let ring = feature["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring[0], ring[3]);
    }

    #[test]
    fn group_collection_carries_every_overlay() {
        let collection = group_feature_collection(&cyprus::road_group());
        assert_eq!(collection["features"].as_array().unwrap().len(), 4);
        assert_eq!(collection["name"], "roads");
    }

    #[test]
    fn view_collection_skips_hidden_groups() {
        let mut map = cyprus::CyprusMap::new();
        let all = view_feature_collection(map.view());
        map.set_surface_visible(cyprus::SurfaceKind::Roads, false);
        let trimmed = view_feature_collection(map.view());

        let count = |v: &Value| v["features"].as_array().unwrap().len();
        assert_eq!(count(&all) - count(&trimmed), 4);
    }

    #[test]
    fn spread_feature_tags_elapsed_time() {
        let model = crate::spread::SpreadModel::new(
            cyprus::fire_origin(),
            crate::spread::SpreadProfile::limassol(),
        );
        let polygon = model.compute_spread(Hours::new(6.0));
        let feature = spread_feature(&polygon, Hours::new(6.0));
        assert_eq!(feature["properties"]["hours"], json!(6.0));
        assert_eq!(
            feature["geometry"]["coordinates"][0].as_array().unwrap().len(),
            33
        );
    }
}
