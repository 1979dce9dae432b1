// FFI functions perform null checks before dereferencing raw pointers.
// Clippy cannot verify this statically, so we allow it at crate level.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

pub use lipi_core;
pub use lipi_session;

mod ffi;
pub mod trace_init;

pub use ffi::*;
