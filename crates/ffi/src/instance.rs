//! Instance registry: opaque integer handles to [`CyprusMap`] controllers.
//!
//! Handles are plain `usize` ids rather than raw pointers so a stale or
//! forged handle from the host degrades into an error code instead of
//! undefined behavior. Each instance sits behind its own `RwLock`; hosts
//! with a render thread and a UI thread can query and update concurrently
//! without observing a half-replaced fire overlay.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex, PoisonError, RwLock};

use fire_map_core::CyprusMap;

use crate::error::{clear_last_error, track_error, DefaultFireMapError, FireMapErrorCode};

static MAPS: LazyLock<Mutex<HashMap<usize, Arc<RwLock<CyprusMap>>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

static NEXT_MAP_ID: AtomicUsize = AtomicUsize::new(1);

/// Run `func` against the map behind `id` with shared access.
pub(crate) fn with_map_read<F, T>(id: usize, func: F) -> Option<T>
where
    F: FnOnce(&CyprusMap) -> T,
{
    let map = {
        let maps = MAPS.lock().unwrap_or_else(PoisonError::into_inner);
        maps.get(&id)?.clone()
    };
    let map = map.read().unwrap_or_else(PoisonError::into_inner);
    Some(func(&map))
}

/// Run `func` against the map behind `id` with exclusive access.
pub(crate) fn with_map_write<F, T>(id: usize, func: F) -> Option<T>
where
    F: FnOnce(&mut CyprusMap) -> T,
{
    let map = {
        let maps = MAPS.lock().unwrap_or_else(PoisonError::into_inner);
        maps.get(&id)?.clone()
    };
    let mut map = map.write().unwrap_or_else(PoisonError::into_inner);
    Some(func(&mut map))
}

/// Create a map instance with the default Cyprus dataset and write its
/// handle to `out_id`.
///
/// The new instance starts in the initial UI state (all dataset groups
/// visible, no fire), with the corresponding draw commands already queued.
///
/// # Returns
/// - `Ok` on success, with `out_id` set
/// - `NullPointer` if `out_id` is null
///
/// # Safety
/// `out_id` must be a valid, non-null pointer.
#[no_mangle]
pub unsafe extern "C" fn fire_map_create(out_id: *mut usize) -> FireMapErrorCode {
    if out_id.is_null() {
        return track_error(&DefaultFireMapError::null_pointer("out_id"));
    }

    let id = NEXT_MAP_ID.fetch_add(1, Ordering::Relaxed);
    let map = Arc::new(RwLock::new(CyprusMap::new()));
    MAPS.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(id, map);

    *out_id = id;
    clear_last_error()
}

/// Destroy a map instance and release its resources.
///
/// # Returns
/// - `Ok` on success
/// - `UnknownInstance` if `id` was never issued or already destroyed
#[no_mangle]
pub extern "C" fn fire_map_destroy(id: usize) -> FireMapErrorCode {
    let removed = MAPS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(&id);
    match removed {
        Some(_) => clear_last_error(),
        None => track_error(&DefaultFireMapError::unknown_instance(id)),
    }
}
