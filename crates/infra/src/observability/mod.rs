//! Observability infrastructure
//!
//! Log output is produced with `tracing` throughout the workspace; this
//! module installs the subscriber that renders it.

pub mod logging;

pub use logging::init_tracing;
