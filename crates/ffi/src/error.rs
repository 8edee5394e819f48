//! FFI error codes and thread-local error detail.
//!
//! Every exported function returns a [`FireMapErrorCode`]; on failure a
//! human-readable message is stored thread-locally and can be fetched with
//! [`fire_map_last_error_message`] before the next call on the same thread.

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use fire_map_core::MapError;

/// Result codes returned across the FFI boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireMapErrorCode {
    /// Success
    Ok = 0,
    /// A required pointer parameter was null
    NullPointer = -1,
    /// The instance id was never issued or already destroyed
    UnknownInstance = -2,
    /// Elapsed hours were negative, NaN, or infinite
    InvalidHours = -3,
    /// The surface-kind discriminant was out of range
    InvalidSurface = -4,
    /// The caller-provided buffer cannot hold the result
    BufferTooSmall = -5,
}

impl std::fmt::Display for FireMapErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            FireMapErrorCode::Ok => "ok",
            FireMapErrorCode::NullPointer => "null pointer",
            FireMapErrorCode::UnknownInstance => "unknown instance",
            FireMapErrorCode::InvalidHours => "invalid hours",
            FireMapErrorCode::InvalidSurface => "invalid surface kind",
            FireMapErrorCode::BufferTooSmall => "buffer too small",
        };
        f.write_str(text)
    }
}

/// Common interface for FFI error values: a code for the return channel and
/// a message for the thread-local detail slot.
pub(crate) trait FireMapError {
    /// Code returned across the FFI boundary.
    fn code(&self) -> FireMapErrorCode;

    /// Human-readable message.
    fn msg(&self) -> &str;
}

/// Default implementation covering every failure the surface can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFireMapError {
    code: FireMapErrorCode,
    msg: String,
}

impl DefaultFireMapError {
    /// Null pointer passed where non-null is required.
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FireMapErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Instance id not present in the registry.
    pub fn unknown_instance(id: usize) -> Self {
        Self {
            code: FireMapErrorCode::UnknownInstance,
            msg: format!("No map instance registered under id {id}"),
        }
    }

    /// Surface-kind discriminant outside the documented range.
    pub fn invalid_surface(raw: u8) -> Self {
        Self {
            code: FireMapErrorCode::InvalidSurface,
            msg: format!("Surface kind must be 0 (forests), 1 (grass), or 2 (roads), got {raw}"),
        }
    }

    /// Output buffer smaller than the payload.
    pub fn buffer_too_small(needed: usize, capacity: usize) -> Self {
        Self {
            code: FireMapErrorCode::BufferTooSmall,
            msg: format!("Buffer holds {capacity} elements but {needed} are required"),
        }
    }
}

impl FireMapError for DefaultFireMapError {
    fn code(&self) -> FireMapErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<MapError> for DefaultFireMapError {
    fn from(err: MapError) -> Self {
        let code = match err {
            MapError::InvalidHours { .. } | MapError::NonFiniteCoordinate { .. } => {
                FireMapErrorCode::InvalidHours
            }
            MapError::UnknownLayer(_) => FireMapErrorCode::UnknownInstance,
            MapError::DegeneratePolygon(_) | MapError::DegeneratePolyline(_) => {
                FireMapErrorCode::InvalidSurface
            }
        };
        Self {
            code,
            msg: err.to_string(),
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<(Option<CString>, FireMapErrorCode)> =
        const { RefCell::new((None, FireMapErrorCode::Ok)) };
}

pub(crate) fn with_last_error_mut<F, T>(func: F) -> T
where
    F: FnOnce(&mut (Option<CString>, FireMapErrorCode)) -> T,
{
    LAST_ERROR.with(|slot| func(&mut slot.borrow_mut()))
}

/// Record a failure and hand back its code, for `return track_error(..)`
/// call sites.
#[inline]
pub(crate) fn track_error(error: &impl FireMapError) -> FireMapErrorCode {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
    error.code()
}

/// Clear the thread-local detail; called on every successful operation so a
/// stale message cannot outlive the failure it described.
#[inline]
pub(crate) fn clear_last_error() -> FireMapErrorCode {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FireMapErrorCode::Ok;
    });
    FireMapErrorCode::Ok
}

/// Message describing the most recent failure on this thread, or null when
/// the last call succeeded.
///
/// The pointer stays valid until the next FFI call on the same thread; the
/// caller must not free it.
#[no_mangle]
pub extern "C" fn fire_map_last_error_message() -> *const c_char {
    with_last_error_mut(|(cstring, _)| {
        cstring.as_ref().map_or(ptr::null(), |msg| msg.as_ptr())
    })
}

/// Code of the most recent failure on this thread, `Ok` after a success.
#[no_mangle]
pub extern "C" fn fire_map_last_error_code() -> FireMapErrorCode {
    with_last_error_mut(|(_, code)| *code)
}
