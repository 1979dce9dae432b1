use std::ffi::{c_char, CString};
use std::ptr;

use lipi_core::romaji::{convert, RomanTable, TableLookup, TokenKind};

use super::{ffi_guard, into_c_string};

/// Convert a romanized word. Returns null on invalid input.
#[no_mangle]
pub extern "C" fn lipi_convert(raw: *const c_char) -> *mut c_char {
    ffi_guard!(ptr::null_mut();
        str: raw_str = raw,
    );
    into_c_string(convert(raw_str))
}

/// Result of a romanization table lookup.
/// tag: 0=none, 1=prefix, 2=exact, 3=exactAndPrefix
#[repr(C)]
pub struct LipiLookupResult {
    pub tag: u8,
    /// Devanagari for an exact match (independent form for vowels).
    pub text: *const c_char,
    _owned: *mut CString,
}

impl LipiLookupResult {
    fn with_tag(tag: u8) -> Self {
        Self {
            tag,
            text: ptr::null(),
            _owned: ptr::null_mut(),
        }
    }

    fn exact(tag: u8, kind: &TokenKind) -> Self {
        let text = match kind {
            TokenKind::Consonant(s) | TokenKind::Mark(s) | TokenKind::Symbol(s) => s,
            TokenKind::Vowel { independent, .. } => independent,
        };
        let Ok(cs) = CString::new(text.as_str()) else {
            return Self::with_tag(0);
        };
        let text = cs.as_ptr();
        Self {
            tag,
            text,
            _owned: Box::into_raw(Box::new(cs)),
        }
    }
}

#[no_mangle]
pub extern "C" fn lipi_lookup(roman: *const c_char) -> LipiLookupResult {
    ffi_guard!(LipiLookupResult::with_tag(0);
        str: roman_str = roman,
    );
    match RomanTable::global().lookup(roman_str) {
        TableLookup::None => LipiLookupResult::with_tag(0),
        TableLookup::Prefix => LipiLookupResult::with_tag(1),
        TableLookup::Exact(entry) => LipiLookupResult::exact(2, &entry.kind),
        TableLookup::ExactAndPrefix(entry) => LipiLookupResult::exact(3, &entry.kind),
    }
}

#[no_mangle]
pub extern "C" fn lipi_lookup_free(result: LipiLookupResult) {
    if !result._owned.is_null() {
        unsafe {
            drop(Box::from_raw(result._owned));
        }
    }
}
