//! Plain-text reports for the CLI, the prompt wizard and the TUI.
//!
//! Formatting lives in one place so the estimator stays free of presentation
//! and all front-ends print the same numbers the same way.

pub mod format;

pub use format::*;
