//! heapdash: live JVM heap and thread metrics in the terminal
//!
//! The core is a small widget that polls `/api/metrics` and writes derived
//! values into named elements of a host page. The terminal dashboard hosts
//! that page and redraws from it.

pub mod cli;
pub mod core;
pub mod report;
pub mod utils;

#[cfg(feature = "tui")]
pub mod app;
#[cfg(feature = "tui")]
pub mod screens;
