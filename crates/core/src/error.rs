//! Error type shared across the map model.

use thiserror::Error;

use crate::view::LayerId;

/// Errors produced by the map model.
///
/// Everything here is a caller mistake: the model itself has no fallible
/// I/O. Geometry and elapsed-time validation reject bad input instead of
/// drawing degenerate shapes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Elapsed time was negative, NaN, or infinite.
    #[error("elapsed time must be a finite, non-negative number of hours, got {value}")]
    InvalidHours {
        /// The rejected raw input
        value: f64,
    },

    /// A coordinate component was NaN or infinite.
    #[error("coordinate component must be finite, got {value}")]
    NonFiniteCoordinate {
        /// The rejected raw input
        value: f64,
    },

    /// A layer id that the view has never issued, or whose group was removed.
    #[error("no layer group registered under {0}")]
    UnknownLayer(LayerId),

    /// A polygon ring with fewer than three vertices.
    #[error("polygon ring needs at least 3 vertices, got {0}")]
    DegeneratePolygon(usize),

    /// A polyline with fewer than two vertices.
    #[error("polyline needs at least 2 vertices, got {0}")]
    DegeneratePolyline(usize),
}
