//! Domain types shared across the workspace

pub mod api;
pub mod operation;

pub use api::{ApiDomain, ApiReply, HttpMethod, SendRequest, JSON_MEDIA_TYPE, SCIM_MEDIA_TYPE};
pub use operation::{ErrorRecord, OperationRequest, OutputRecord};
