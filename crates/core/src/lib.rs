//! Cyprus Fire-Risk Map Model
//!
//! The data and state model behind an interactive fire-risk map of Cyprus:
//! city markers, the Limassol boundary, terrain-risk overlay groups
//! (forest / grass / roads), and a deterministic fire-spread polygon whose
//! extent grows with an elapsed-hours input.
//!
//! The crate owns geometry and overlay state only. A widget host (web map,
//! game engine, TUI) renders the tiles and pixels, forwards its checkbox and
//! slider events to [`CyprusMap`], and applies the add/remove layer commands
//! the controller queues in response.

// Core types and utilities
pub mod core_types;

pub mod cyprus;
pub mod error;
pub mod geojson;
pub mod overlay;
pub mod spread;
pub mod view;

// Re-export core types
pub use core_types::{Degrees, Hours, LatLng, Vec2};

pub use cyprus::{City, CyprusMap, SurfaceKind};
pub use error::MapError;
pub use overlay::{LayerGroup, Overlay, PathStyle};
pub use spread::{SpreadModel, SpreadPolygon, SpreadProfile};
pub use view::{LayerId, MapCommand, MapView};
