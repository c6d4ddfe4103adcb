//! Workflow integration tests
//!
//! End-to-end runs of the `bakrot` binary against temporary backup
//! directories.

pub mod rotation;
