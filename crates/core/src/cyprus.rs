//! The Cyprus fire-risk map: static datasets and the assembled controller.
//!
//! Everything geographic lives here: the six city markers, the hand-drawn
//! Limassol boundary, the three terrain-risk layer groups, and the fixed
//! ignition origin in the hills behind Limassol. [`CyprusMap`] wires those
//! datasets and a [`SpreadModel`] into a [`MapView`] and exposes the two UI
//! entry points the widget host forwards events to: surface-layer checkbox
//! toggles and the elapsed-time slider.

use rustc_hash::FxHashMap;
use serde::Serialize;
use tracing::info;

use crate::core_types::{Hours, LatLng};
use crate::error::MapError;
use crate::overlay::{LayerGroup, Overlay, PathStyle};
use crate::spread::{SpreadModel, SpreadPolygon, SpreadProfile};
use crate::view::{LayerId, MapCommand, MapView};

/// Initial map center, roughly the middle of the island.
#[must_use]
pub fn map_center() -> LatLng {
    LatLng::new(35.0, 33.0)
}

/// Initial zoom level.
pub const MAP_ZOOM: u8 = 9;

/// Fixed ignition origin: forested terrain in the hills behind Limassol.
#[must_use]
pub fn fire_origin() -> LatLng {
    LatLng::new(34.75, 32.95)
}

const BOUNDARY_COLOR: &str = "#3388ff";
const FOREST_COLOR: &str = "#dc3545";
const GRASS_COLOR: &str = "#8fbc8f";
const HIGHWAY_COLOR: &str = "#666";
const COASTAL_ROAD_COLOR: &str = "#999";
const FIRE_COLOR: &str = "#ff4500";

// ============================================================================
// STATIC DATASETS
// ============================================================================

/// A major city shown as a marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct City {
    /// City name
    pub name: &'static str,
    /// Marker position
    pub position: LatLng,
    /// One-line description shown in the marker popup
    pub description: &'static str,
}

/// The six cities marked on the map.
#[must_use]
pub fn cities() -> [City; 6] {
    [
        City {
            name: "Nicosia",
            position: LatLng::new(35.1856, 33.3823),
            description: "Capital of Cyprus",
        },
        City {
            name: "Limassol",
            position: LatLng::new(34.7071, 33.0226),
            description: "Second largest city",
        },
        City {
            name: "Larnaca",
            position: LatLng::new(34.9167, 33.6333),
            description: "City on the south coast",
        },
        City {
            name: "Paphos",
            position: LatLng::new(34.7766, 32.4245),
            description: "City on the west coast",
        },
        City {
            name: "Ayia Napa",
            position: LatLng::new(34.9861, 34.0014),
            description: "Resort town",
        },
        City {
            name: "Protaras",
            position: LatLng::new(35.0125, 34.0583),
            description: "Resort area",
        },
    ]
}

fn ring(points: &[(f64, f64)]) -> Vec<LatLng> {
    points.iter().map(|&(lat, lng)| LatLng::new(lat, lng)).collect()
}

// Dataset rings are hand-drawn constants with well over 3 vertices, so the
// degenerate-geometry errors cannot fire here.
fn dataset_polygon(points: &[(f64, f64)], style: PathStyle, popup: &str) -> Overlay {
    Overlay::polygon(ring(points), style)
        .expect("dataset rings have at least 3 vertices")
        .with_popup(popup)
}

fn dataset_polyline(points: &[(f64, f64)], style: PathStyle, popup: &str) -> Overlay {
    Overlay::polyline(ring(points), style)
        .expect("dataset paths have at least 2 vertices")
        .with_popup(popup)
}

/// City markers as one layer group.
#[must_use]
pub fn city_group() -> LayerGroup {
    let overlays = cities()
        .iter()
        .map(|city| {
            Overlay::marker(city.position)
                .with_popup(format!("{}: {}", city.name, city.description))
        })
        .collect();
    LayerGroup::with_overlays("cities", overlays)
}

/// Hand-drawn Limassol city boundary.
#[must_use]
pub fn limassol_boundary_group() -> LayerGroup {
    let boundary = dataset_polygon(
        &[
            (34.78, 32.85), // west, inland
            (34.80, 32.90),
            (34.82, 32.95),
            (34.82, 33.05),
            (34.80, 33.10),
            (34.75, 33.12),
            (34.70, 33.08),
            (34.68, 33.00),
            (34.68, 32.95),
            (34.70, 32.90),
            (34.72, 32.88),
            (34.75, 32.87), // back along the coast
        ],
        PathStyle {
            color: BOUNDARY_COLOR.to_string(),
            opacity: 1.0,
            weight: 2.0,
            fill_color: BOUNDARY_COLOR.to_string(),
            fill_opacity: 0.3,
        },
        "Limassol: city boundaries",
    );
    LayerGroup::with_overlays("limassol-boundary", vec![boundary])
}

/// Dense-vegetation regions, the highest-risk surface type.
#[must_use]
pub fn forest_group() -> LayerGroup {
    let style = || PathStyle::filled(FOREST_COLOR, 1.0, 0.5);
    let popup = "Forest area: high fire risk";
    LayerGroup::with_overlays(
        "forests",
        vec![
            // Troodos mountains, the main forest region
            dataset_polygon(
                &[
                    (34.95, 32.70),
                    (35.05, 32.75),
                    (35.10, 32.85),
                    (35.08, 32.95),
                    (35.00, 33.05),
                    (34.90, 33.00),
                    (34.85, 32.90),
                    (34.88, 32.80),
                ],
                style(),
                popup,
            ),
            // Paphos forest
            dataset_polygon(
                &[
                    (34.85, 32.40),
                    (34.90, 32.50),
                    (34.88, 32.60),
                    (34.80, 32.55),
                    (34.75, 32.45),
                ],
                style(),
                popup,
            ),
            // Northern forests
            dataset_polygon(
                &[
                    (35.15, 33.20),
                    (35.25, 33.30),
                    (35.20, 33.40),
                    (35.10, 33.35),
                    (35.08, 33.25),
                ],
                style(),
                popup,
            ),
        ],
    )
}

/// Grass and scrubland regions, medium risk.
#[must_use]
pub fn grass_group() -> LayerGroup {
    let style = || PathStyle::filled(GRASS_COLOR, 1.0, 0.4);
    let popup = "Grass/scrubland: medium fire risk";
    LayerGroup::with_overlays(
        "grass",
        vec![
            // Central plains
            dataset_polygon(
                &[
                    (34.90, 33.00),
                    (35.00, 33.10),
                    (35.05, 33.20),
                    (35.00, 33.30),
                    (34.90, 33.25),
                    (34.85, 33.15),
                    (34.88, 33.05),
                ],
                style(),
                popup,
            ),
            // Around Limassol
            dataset_polygon(
                &[
                    (34.65, 32.90),
                    (34.75, 32.95),
                    (34.78, 33.05),
                    (34.72, 33.10),
                    (34.65, 33.05),
                    (34.60, 32.98),
                ],
                style(),
                popup,
            ),
            // Eastern areas
            dataset_polygon(
                &[
                    (34.95, 33.50),
                    (35.05, 33.60),
                    (35.00, 33.70),
                    (34.90, 33.65),
                    (34.88, 33.55),
                ],
                style(),
                popup,
            ),
        ],
    )
}

/// Main roads, which act as firebreaks.
#[must_use]
pub fn road_group() -> LayerGroup {
    let highway = || PathStyle::stroke(HIGHWAY_COLOR, 4.0, 0.8);
    let popup = "Main road: fire barrier";
    LayerGroup::with_overlays(
        "roads",
        vec![
            // A1 Nicosia-Limassol
            dataset_polyline(
                &[
                    (35.1856, 33.3823),
                    (35.10, 33.30),
                    (35.00, 33.20),
                    (34.90, 33.10),
                    (34.80, 33.05),
                    (34.7071, 33.0226),
                ],
                highway(),
                popup,
            ),
            // A6 Limassol-Paphos
            dataset_polyline(
                &[
                    (34.7071, 33.0226),
                    (34.75, 32.90),
                    (34.78, 32.70),
                    (34.7766, 32.4245),
                ],
                highway(),
                popup,
            ),
            // A3 Larnaca-Nicosia
            dataset_polyline(
                &[
                    (34.9167, 33.6333),
                    (34.95, 33.50),
                    (35.05, 33.40),
                    (35.1856, 33.3823),
                ],
                highway(),
                popup,
            ),
            // Coastal road
            dataset_polyline(
                &[
                    (34.7766, 32.4245),
                    (34.70, 32.60),
                    (34.7071, 33.0226),
                    (34.75, 33.20),
                    (34.9167, 33.6333),
                ],
                PathStyle::stroke(COASTAL_ROAD_COLOR, 3.0, 0.7),
                "Coastal road: fire barrier",
            ),
        ],
    )
}

// ============================================================================
// CONTROLLER
// ============================================================================

/// The three checkbox-controlled surface-type layer groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SurfaceKind {
    /// Dense vegetation, high fire risk
    Forests,
    /// Grass and scrubland, medium fire risk
    Grass,
    /// Roads acting as firebreaks
    Roads,
}

impl SurfaceKind {
    /// All kinds, in display order.
    pub const ALL: [SurfaceKind; 3] = [SurfaceKind::Forests, SurfaceKind::Grass, SurfaceKind::Roads];

    /// Stable lowercase label, also accepted by [`SurfaceKind::parse`].
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SurfaceKind::Forests => "forests",
            SurfaceKind::Grass => "grass",
            SurfaceKind::Roads => "roads",
        }
    }

    /// Risk description shown next to the label in UIs.
    #[must_use]
    pub fn risk(self) -> &'static str {
        match self {
            SurfaceKind::Forests => "high fire risk",
            SurfaceKind::Grass => "medium fire risk",
            SurfaceKind::Roads => "fire barrier",
        }
    }

    /// Parse a label produced by [`SurfaceKind::label`].
    #[must_use]
    pub fn parse(label: &str) -> Option<SurfaceKind> {
        SurfaceKind::ALL
            .into_iter()
            .find(|kind| kind.label() == label)
    }
}

impl std::fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Stroke/fill style of the fire overlay; fill opacity deepens with elapsed
/// time, saturating after a day.
#[must_use]
fn fire_style(hours: Hours) -> PathStyle {
    let intensity = (hours.value() / 24.0).min(1.0);
    PathStyle {
        color: FIRE_COLOR.to_string(),
        opacity: 1.0,
        weight: 2.0,
        fill_color: FIRE_COLOR.to_string(),
        fill_opacity: 0.3 + intensity * 0.4,
    }
}

/// The assembled Cyprus map controller.
///
/// Owns a [`MapView`] seeded with the full dataset, plus the spread model
/// and the current elapsed time. The host forwards its two UI events here
/// ([`CyprusMap::set_surface_visible`], [`CyprusMap::set_fire_hours`]) and
/// drains the resulting [`MapCommand`]s.
pub struct CyprusMap {
    view: MapView,
    spread: SpreadModel,
    hours: Hours,
    fire_polygon: Option<SpreadPolygon>,
    surfaces: FxHashMap<SurfaceKind, LayerId>,
}

impl CyprusMap {
    /// Controller with the default dataset and the Limassol spread profile,
    /// in the initial UI state: cities, boundary, and all three surface
    /// groups visible; no fire drawn.
    #[must_use]
    pub fn new() -> Self {
        Self::with_spread_model(SpreadModel::new(fire_origin(), SpreadProfile::limassol()))
    }

    /// Controller with the default dataset but a custom spread model.
    #[must_use]
    pub fn with_spread_model(spread: SpreadModel) -> Self {
        let mut view = MapView::new(map_center(), MAP_ZOOM);
        view.add_group(city_group(), true);
        view.add_group(limassol_boundary_group(), true);

        let mut surfaces = FxHashMap::default();
        surfaces.insert(SurfaceKind::Forests, view.add_group(forest_group(), true));
        surfaces.insert(SurfaceKind::Grass, view.add_group(grass_group(), true));
        surfaces.insert(SurfaceKind::Roads, view.add_group(road_group(), true));

        info!(origin = %spread.origin(), profile = %spread.profile().name, "cyprus map assembled");
        CyprusMap {
            view,
            spread,
            hours: Hours::ZERO,
            fire_polygon: None,
            surfaces,
        }
    }

    fn surface_id(&self, kind: SurfaceKind) -> LayerId {
        // Populated in the constructor for every kind and never removed.
        *self
            .surfaces
            .get(&kind)
            .expect("surface groups are registered for the lifetime of the map")
    }

    /// Checkbox handler: show or hide one surface-type group.
    ///
    /// Idempotent. Returns whether visibility actually changed.
    pub fn set_surface_visible(&mut self, kind: SurfaceKind, visible: bool) -> bool {
        let id = self.surface_id(kind);
        self.view
            .set_visible(id, visible)
            .expect("surface groups are registered for the lifetime of the map")
    }

    /// Whether a surface-type group is currently shown.
    #[must_use]
    pub fn is_surface_visible(&self, kind: SurfaceKind) -> bool {
        let id = self.surface_id(kind);
        self.view
            .is_visible(id)
            .expect("surface groups are registered for the lifetime of the map")
    }

    /// Slider handler: recompute the fire overlay for a new elapsed time.
    ///
    /// The previous fire overlay is always removed first; a fresh polygon is
    /// computed and added only when `hours > 0`, so zero elapsed time leaves
    /// no fire on the map. The replacement completes within this call.
    ///
    /// # Errors
    /// Returns [`MapError::InvalidHours`] for negative or non-finite input;
    /// the map state is left untouched in that case.
    pub fn set_fire_hours(&mut self, hours: f64) -> Result<Hours, MapError> {
        let hours = Hours::try_new(hours)?;
        self.hours = hours;

        if hours.is_zero() {
            self.fire_polygon = None;
            self.view.replace_fire_overlay(None);
        } else {
            let polygon = self.spread.compute_spread(hours);
            let overlay =
                Overlay::polygon(polygon.vertices().to_vec(), fire_style(hours))
                    .expect("spread polygons always have at least 3 vertices")
                    .with_popup(format!("Fire spread: area reached after {hours}"));
            self.fire_polygon = Some(polygon);
            self.view.replace_fire_overlay(Some(overlay));
        }
        info!(%hours, drawn = self.fire_polygon.is_some(), "fire spread updated");
        Ok(hours)
    }

    /// Current elapsed time.
    #[must_use]
    pub fn fire_hours(&self) -> Hours {
        self.hours
    }

    /// The spread polygon currently drawn, if any.
    #[must_use]
    pub fn fire_polygon(&self) -> Option<&SpreadPolygon> {
        self.fire_polygon.as_ref()
    }

    /// The spread model in use.
    #[must_use]
    pub fn spread_model(&self) -> &SpreadModel {
        &self.spread
    }

    /// The underlying view, for group lookups and host-side inspection.
    #[must_use]
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Pop the oldest pending command for the widget host.
    pub fn poll_command(&mut self) -> Option<MapCommand> {
        self.view.poll_command()
    }

    /// Drain every pending command, oldest first.
    pub fn drain_commands(&mut self) -> Vec<MapCommand> {
        self.view.drain_commands()
    }
}

impl Default for CyprusMap {
    fn default() -> Self {
        CyprusMap::new()
    }
}
