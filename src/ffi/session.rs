use std::ffi::c_char;
use std::ptr;

use lipi_core::document::Point;
use lipi_core::render::render_html;
use lipi_core::settings;
use lipi_core::storage::{FileStorage, MemoryStorage, Storage};
use lipi_session::{EditingSession, KeyEvent, Modifiers};
use tracing::debug;

use super::{cptr_to_str, ffi_close, ffi_guard, into_c_string, owned_new};

pub const LIPI_FLAG_SHIFT: u8 = 1 << 0;
pub const LIPI_FLAG_CTRL: u8 = 1 << 1;
pub const LIPI_FLAG_ALT: u8 = 1 << 2;
pub const LIPI_FLAG_META: u8 = 1 << 3;

/// Opaque editing session handed to the host.
pub struct LipiSession {
    inner: EditingSession<Box<dyn Storage>>,
}

#[repr(C)]
pub struct LipiKeyResponse {
    /// 1 = the host must suppress the key's default action.
    pub consumed: u8,
    pub changed: u8,
}

impl LipiKeyResponse {
    fn empty() -> Self {
        Self {
            consumed: 0,
            changed: 0,
        }
    }
}

/// Open a session. `store_dir` is a directory for the stored document;
/// null keeps the document in memory.
#[no_mangle]
pub extern "C" fn lipi_session_new(store_dir: *const c_char) -> *mut LipiSession {
    let storage: Box<dyn Storage> = match unsafe { cptr_to_str(store_dir) } {
        Some(dir) => Box::new(FileStorage::new(dir)),
        None if store_dir.is_null() => Box::new(MemoryStorage::new()),
        None => return ptr::null_mut(),
    };
    debug!(persistent = !store_dir.is_null(), "session opened");
    let inner = EditingSession::open(storage, settings::settings().clone());
    owned_new(LipiSession { inner })
}

ffi_close!(lipi_session_free, LipiSession);

/// Feed a DOM `KeyboardEvent.key` value with `LIPI_FLAG_*` modifiers.
#[no_mangle]
pub extern "C" fn lipi_session_handle_key(
    session: *mut LipiSession,
    key: *const c_char,
    flags: u8,
) -> LipiKeyResponse {
    ffi_guard!(LipiKeyResponse::empty();
        mut: session = session,
        str: key_str = key,
    );
    let modifiers = Modifiers {
        shift: flags & LIPI_FLAG_SHIFT != 0,
        ctrl: flags & LIPI_FLAG_CTRL != 0,
        alt: flags & LIPI_FLAG_ALT != 0,
        meta: flags & LIPI_FLAG_META != 0,
    };
    let r = session
        .inner
        .handle_key(KeyEvent::from_dom(key_str, modifiers));
    LipiKeyResponse {
        consumed: r.consumed as u8,
        changed: r.changed as u8,
    }
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn lipi_session_select(session: *mut LipiSession, block: u32, offset: u32) {
    ffi_guard!(();
        mut: session = session,
    );
    session
        .inner
        .select(Point::new(block as usize, offset as usize));
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn lipi_session_blur(session: *mut LipiSession) {
    ffi_guard!(();
        mut: session = session,
    );
    session.inner.blur();
}

#[no_mangle]
pub extern "C" fn lipi_session_is_transliterating(session: *const LipiSession) -> u8 {
    ffi_guard!(0;
        ref: session = session,
    );
    session.inner.input().is_transliterating() as u8
}

/// Document JSON. Free with `lipi_string_free`.
#[no_mangle]
pub extern "C" fn lipi_session_document_json(session: *const LipiSession) -> *mut c_char {
    ffi_guard!(ptr::null_mut();
        ref: session = session,
    );
    match session.inner.document().to_json() {
        Ok(json) => into_c_string(json),
        Err(_) => ptr::null_mut(),
    }
}

/// Rendered HTML. Free with `lipi_string_free`.
#[no_mangle]
pub extern "C" fn lipi_session_render_html(session: *const LipiSession) -> *mut c_char {
    ffi_guard!(ptr::null_mut();
        ref: session = session,
    );
    into_c_string(render_html(session.inner.document()))
}
