//! # LedgerLink Core
//!
//! Resource dispatch for the ERP integration, free of any HTTP code.
//!
//! This crate contains:
//! - Port interfaces for the host, the per-domain senders and the host's
//!   request primitive
//! - The resource catalogue and its request builders
//! - The dispatcher and success/error normalization
//!
//! ## Architecture Principles
//! - Only depends on `ledgerlink-domain`
//! - All network access goes through [`ApiSender`]

pub mod api_ports;
pub mod auth;
pub mod dispatch;
pub mod normalize;
pub mod params;
pub mod resources;
pub mod transport_ports;

pub use api_ports::{ApiSender, ExecutionHost};
pub use auth::AuthContext;
pub use dispatch::Dispatcher;
pub use normalize::{normalize, to_error_record};
pub use params::ParameterReader;
pub use resources::ResourceKind;
pub use transport_ports::{
    HeaderPairs, PrimitiveError, PrimitiveRequest, PrimitiveResponse, RawBody, RequestPrimitive,
};
