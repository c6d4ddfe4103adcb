//! bakrot command-line support
//!
//! Configuration loading, logging setup, the debug-mode data generator,
//! and the cleanup pass that drives the `retention` crate.

pub mod logging;
pub mod populate;
pub mod run;
pub mod system_config;
