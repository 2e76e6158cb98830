//! Input/output helpers.
//!
//! - estimate exports (JSON) (`export`)
//!
//! Artifact files have their own reader/writer in `artifacts`.

pub mod export;

pub use export::*;
