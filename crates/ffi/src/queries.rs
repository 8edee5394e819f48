//! Event entry points and state queries on a map instance.
//!
//! The host forwards its two UI events (`fire_map_set_surface_visible`,
//! `fire_map_set_fire_hours`), then drains the command queue with
//! `fire_map_poll_command` and pulls the geometry it needs to draw.

use std::os::raw::c_char;

use fire_map_core::{geojson, MapCommand, SurfaceKind};

use crate::error::{clear_last_error, track_error, DefaultFireMapError, FireMapErrorCode};
use crate::instance::{with_map_read, with_map_write};

/// Discriminant values of [`FireMapCommand::kind`].
pub const FIRE_MAP_COMMAND_NONE: u8 = 0;
/// Draw the layer group addressed by `layer_id`.
pub const FIRE_MAP_COMMAND_ADD_LAYER: u8 = 1;
/// Erase the layer group addressed by `layer_id`.
pub const FIRE_MAP_COMMAND_REMOVE_LAYER: u8 = 2;

/// One queued map operation in C-compatible form.
#[repr(C)]
pub struct FireMapCommand {
    /// One of the `FIRE_MAP_COMMAND_*` values
    pub kind: u8,
    /// Layer group the operation addresses; zero when `kind` is `NONE`
    pub layer_id: u64,
}

fn surface_from_raw(raw: u8) -> Option<SurfaceKind> {
    match raw {
        0 => Some(SurfaceKind::Forests),
        1 => Some(SurfaceKind::Grass),
        2 => Some(SurfaceKind::Roads),
        _ => None,
    }
}

/// Show or hide one surface-type layer group.
///
/// `surface` is 0 (forests), 1 (grass), or 2 (roads). Idempotent: repeating
/// the current state queues no command.
///
/// # Returns
/// - `Ok` on success
/// - `InvalidSurface` if `surface` is out of range
/// - `UnknownInstance` if `id` is not a live instance
#[no_mangle]
pub extern "C" fn fire_map_set_surface_visible(
    id: usize,
    surface: u8,
    visible: bool,
) -> FireMapErrorCode {
    let Some(kind) = surface_from_raw(surface) else {
        return track_error(&DefaultFireMapError::invalid_surface(surface));
    };
    match with_map_write(id, |map| map.set_surface_visible(kind, visible)) {
        Some(_) => clear_last_error(),
        None => track_error(&DefaultFireMapError::unknown_instance(id)),
    }
}

/// Update the fire overlay for a new elapsed time.
///
/// Zero hours erases the overlay; any positive value replaces it with a
/// freshly computed polygon. Negative or non-finite input is rejected and
/// leaves the instance untouched.
///
/// # Returns
/// - `Ok` on success
/// - `InvalidHours` for negative, NaN, or infinite `hours`
/// - `UnknownInstance` if `id` is not a live instance
#[no_mangle]
pub extern "C" fn fire_map_set_fire_hours(id: usize, hours: f64) -> FireMapErrorCode {
    match with_map_write(id, |map| map.set_fire_hours(hours)) {
        Some(Ok(_)) => clear_last_error(),
        Some(Err(err)) => track_error(&DefaultFireMapError::from(err)),
        None => track_error(&DefaultFireMapError::unknown_instance(id)),
    }
}

/// Pop the oldest pending command into `out_command`.
///
/// When the queue is empty, succeeds with `kind` set to
/// [`FIRE_MAP_COMMAND_NONE`].
///
/// # Returns
/// - `Ok` on success, with `out_command` filled
/// - `NullPointer` if `out_command` is null
/// - `UnknownInstance` if `id` is not a live instance
///
/// # Safety
/// `out_command` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn fire_map_poll_command(
    id: usize,
    out_command: *mut FireMapCommand,
) -> FireMapErrorCode {
    if out_command.is_null() {
        return track_error(&DefaultFireMapError::null_pointer("out_command"));
    }
    match with_map_write(id, fire_map_core::CyprusMap::poll_command) {
        Some(command) => {
            let (kind, layer_id) = match command {
                Some(MapCommand::AddLayer(layer)) => (FIRE_MAP_COMMAND_ADD_LAYER, layer.raw()),
                Some(MapCommand::RemoveLayer(layer)) => {
                    (FIRE_MAP_COMMAND_REMOVE_LAYER, layer.raw())
                }
                None => (FIRE_MAP_COMMAND_NONE, 0),
            };
            *out_command = FireMapCommand { kind, layer_id };
            clear_last_error()
        }
        None => track_error(&DefaultFireMapError::unknown_instance(id)),
    }
}

/// Number of vertices in the current fire polygon, zero when no fire is
/// drawn.
///
/// # Returns
/// - `Ok` on success, with `out_count` set
/// - `NullPointer` if `out_count` is null
/// - `UnknownInstance` if `id` is not a live instance
///
/// # Safety
/// `out_count` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn fire_map_fire_vertex_count(
    id: usize,
    out_count: *mut usize,
) -> FireMapErrorCode {
    if out_count.is_null() {
        return track_error(&DefaultFireMapError::null_pointer("out_count"));
    }
    match with_map_read(id, |map| map.fire_polygon().map_or(0, |p| p.len())) {
        Some(count) => {
            *out_count = count;
            clear_last_error()
        }
        None => track_error(&DefaultFireMapError::unknown_instance(id)),
    }
}

/// Copy the current fire polygon into `out_coords` as interleaved
/// `lat, lng` pairs (ring order, not closed).
///
/// `capacity` counts f64 elements, so it must be at least twice the vertex
/// count reported by [`fire_map_fire_vertex_count`]. With no fire drawn,
/// succeeds writing zero elements.
///
/// # Returns
/// - `Ok` on success, with `out_written` set to the element count written
/// - `NullPointer` if `out_coords` or `out_written` is null
/// - `BufferTooSmall` if `capacity` cannot hold the polygon
/// - `UnknownInstance` if `id` is not a live instance
///
/// # Safety
/// `out_coords` must point to at least `capacity` writable f64 elements and
/// `out_written` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn fire_map_copy_fire_polygon(
    id: usize,
    out_coords: *mut f64,
    capacity: usize,
    out_written: *mut usize,
) -> FireMapErrorCode {
    if out_coords.is_null() {
        return track_error(&DefaultFireMapError::null_pointer("out_coords"));
    }
    if out_written.is_null() {
        return track_error(&DefaultFireMapError::null_pointer("out_written"));
    }

    let result = with_map_read(id, |map| {
        map.fire_polygon().map(|polygon| {
            polygon
                .vertices()
                .iter()
                .flat_map(|v| [*v.lat, *v.lng])
                .collect::<Vec<f64>>()
        })
    });

    match result {
        Some(Some(coords)) => {
            if coords.len() > capacity {
                return track_error(&DefaultFireMapError::buffer_too_small(
                    coords.len(),
                    capacity,
                ));
            }
            std::ptr::copy_nonoverlapping(coords.as_ptr(), out_coords, coords.len());
            *out_written = coords.len();
            clear_last_error()
        }
        Some(None) => {
            *out_written = 0;
            clear_last_error()
        }
        None => track_error(&DefaultFireMapError::unknown_instance(id)),
    }
}

/// Serialize every visible layer group to a GeoJSON FeatureCollection.
///
/// Writes a NUL-terminated UTF-8 string into `buffer` and stores the string
/// length (excluding the NUL) in `out_len`. Call with a null `buffer` to
/// query the required length first; `BufferTooSmall` also stores the
/// required length.
///
/// # Returns
/// - `Ok` on success
/// - `NullPointer` if `out_len` is null
/// - `BufferTooSmall` if `capacity` is less than the length plus the NUL
/// - `UnknownInstance` if `id` is not a live instance
///
/// # Safety
/// `buffer`, when non-null, must point to at least `capacity` writable
/// bytes; `out_len` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn fire_map_visible_geojson(
    id: usize,
    buffer: *mut c_char,
    capacity: usize,
    out_len: *mut usize,
) -> FireMapErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultFireMapError::null_pointer("out_len"));
    }

    let document = with_map_read(id, |map| {
        geojson::view_feature_collection(map.view()).to_string()
    });
    let Some(document) = document else {
        return track_error(&DefaultFireMapError::unknown_instance(id));
    };

    *out_len = document.len();
    if buffer.is_null() {
        // Length-query calling convention, not a failure.
        return clear_last_error();
    }
    if capacity < document.len() + 1 {
        return track_error(&DefaultFireMapError::buffer_too_small(
            document.len() + 1,
            capacity,
        ));
    }

    std::ptr::copy_nonoverlapping(document.as_ptr().cast::<c_char>(), buffer, document.len());
    *buffer.add(document.len()) = 0;
    clear_last_error()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::{fire_map_create, fire_map_destroy};

    fn create() -> usize {
        let mut id = 0usize;
        assert_eq!(unsafe { fire_map_create(&mut id) }, FireMapErrorCode::Ok);
        id
    }

    fn drain(id: usize) -> Vec<(u8, u64)> {
        let mut drained = Vec::new();
        loop {
            let mut command = FireMapCommand {
                kind: FIRE_MAP_COMMAND_NONE,
                layer_id: 0,
            };
            assert_eq!(
                unsafe { fire_map_poll_command(id, &mut command) },
                FireMapErrorCode::Ok
            );
            if command.kind == FIRE_MAP_COMMAND_NONE {
                return drained;
            }
            drained.push((command.kind, command.layer_id));
        }
    }

    #[test]
    fn slider_sequence_over_the_c_surface() {
        let id = create();
        assert_eq!(drain(id).len(), 5); // initial dataset draws

        assert_eq!(fire_map_set_fire_hours(id, 10.0), FireMapErrorCode::Ok);
        let mut count = 0usize;
        assert_eq!(
            unsafe { fire_map_fire_vertex_count(id, &mut count) },
            FireMapErrorCode::Ok
        );
        assert_eq!(count, 32);

        let mut coords = vec![0.0f64; 64];
        let mut written = 0usize;
        assert_eq!(
            unsafe { fire_map_copy_fire_polygon(id, coords.as_mut_ptr(), 64, &mut written) },
            FireMapErrorCode::Ok
        );
        assert_eq!(written, 64);
        // First vertex from the worked example: lat 34.9375, lng 32.95.
        assert!((coords[0] - 34.9375).abs() < 1e-9);
        assert!((coords[1] - 32.95).abs() < 1e-9);

        assert_eq!(
            fire_map_set_fire_hours(id, -2.0),
            FireMapErrorCode::InvalidHours
        );

        assert_eq!(fire_map_destroy(id), FireMapErrorCode::Ok);
    }

    #[test]
    fn toggle_validates_surface_discriminant() {
        let id = create();
        drain(id);

        assert_eq!(
            fire_map_set_surface_visible(id, 1, false),
            FireMapErrorCode::Ok
        );
        assert_eq!(drain(id).len(), 1);
        assert_eq!(
            fire_map_set_surface_visible(id, 7, false),
            FireMapErrorCode::InvalidSurface
        );

        fire_map_destroy(id);
    }

    #[test]
    fn geojson_length_negotiation() {
        let id = create();

        let mut len = 0usize;
        assert_eq!(
            unsafe { fire_map_visible_geojson(id, std::ptr::null_mut(), 0, &mut len) },
            FireMapErrorCode::Ok
        );
        assert!(len > 0);

        let mut buffer = vec![0 as c_char; len + 1];
        assert_eq!(
            unsafe { fire_map_visible_geojson(id, buffer.as_mut_ptr(), len + 1, &mut len) },
            FireMapErrorCode::Ok
        );
        assert_eq!(buffer[len], 0);

        fire_map_destroy(id);
    }
}
