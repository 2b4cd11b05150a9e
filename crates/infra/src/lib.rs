//! # LedgerLink Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The HTTP [`ApiSender`](ledgerlink_core::ApiSender) for every API domain
//! - Fetch transports: host callback primitive, reqwest, synthetic responses
//! - Configuration loading and tracing setup
//!
//! ## Architecture
//! - Implements traits defined in `ledgerlink-core`
//! - Contains all "impure" code (network, files, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::HttpApiSender;
pub use errors::InfraError;
pub use http::{
    fetch_from_callback, CallbackFetch, DirectFetch, Fetch, FetchRequest, HeaderInput,
    RequestTarget, SyntheticResponse, Transport,
};
pub use observability::init_tracing;
