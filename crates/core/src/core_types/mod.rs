//! Core types and utilities

pub mod latlng;
pub mod units;
pub mod vec2;

pub use latlng::LatLng;
pub use units::{Degrees, Hours};
pub use vec2::Vec2;
