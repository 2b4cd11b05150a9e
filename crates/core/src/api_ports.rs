//! Port interfaces for the per-domain REST senders and the workflow host

use async_trait::async_trait;
use ledgerlink_domain::{ApiDomain, ApiReply, Result, SendRequest};
use serde_json::Value;

use crate::auth::AuthContext;

/// Issues one request against an API domain and interprets the response.
///
/// Implementations raise exactly one error for any network failure or
/// non-2xx status and never retry.
#[async_trait]
pub trait ApiSender: Send + Sync {
    async fn send(
        &self,
        auth: &AuthContext,
        domain: ApiDomain,
        request: SendRequest,
    ) -> Result<ApiReply>;
}

/// Capabilities the workflow host exposes to the dispatcher.
pub trait ExecutionHost: Send + Sync {
    /// Raw value of a node parameter for one input item.
    fn parameter(&self, name: &str, item_index: usize) -> Option<Value>;

    /// Whether per-item failures become `{error}` records instead of
    /// aborting the run.
    fn continue_on_fail(&self) -> bool;
}
