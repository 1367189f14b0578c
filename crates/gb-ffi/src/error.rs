use std::cell::RefCell;
use std::ffi::CString;
use std::fmt::Display;

use crate::types::GbStatus;

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Store an error message for later retrieval via `gb_last_error`.
///
/// Interior NUL bytes are replaced so the message is never dropped.
pub fn set_last_error(msg: String) {
    let msg = CString::new(msg.replace('\0', "\u{FFFD}")).ok();
    LAST_ERROR.with(|e| *e.borrow_mut() = msg);
}

/// Take the last error message, leaving `None` in its place.
pub fn take_last_error() -> Option<CString> {
    LAST_ERROR.with(|e| e.borrow_mut().take())
}

/// Record `err` as this thread's last error and return its status code.
pub(crate) fn report<E>(err: &E) -> GbStatus
where
    E: Display,
    for<'a> GbStatus: From<&'a E>,
{
    set_last_error(err.to_string());
    GbStatus::from(err)
}
