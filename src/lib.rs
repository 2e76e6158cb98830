//! `price-estimator` library crate.
//!
//! The binary (`pe`) is a thin wrapper around this library so that:
//!
//! - the estimator core is testable without spawning processes
//! - the presentation layers (CLI, prompt wizard, TUI) share one pipeline
//! - artifacts and reference data are plain values injected at startup

pub mod app;
pub mod artifacts;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod estimator;
pub mod io;
pub mod logging;
pub mod math;
pub mod reference;
pub mod report;
pub mod tui;
