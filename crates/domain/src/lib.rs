//! # LedgerLink Domain
//!
//! Business domain types for the LedgerLink ERP integration.
//!
//! This crate contains:
//! - The workspace error type and `Result` alias
//! - Request descriptors and API domain catalogue
//! - Host-facing record types
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other LedgerLink crates
//! - Pure data, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
