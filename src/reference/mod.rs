//! Static neighborhood reference table.
//!
//! Pure data: built once at startup and only read afterwards.

mod builtin;
pub mod table;

pub use table::*;
