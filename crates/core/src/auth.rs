//! Authentication context shared by every request of a run.

use std::fmt;
use std::sync::Arc;

use ledgerlink_domain::{LedgerLinkError, Result};

use crate::transport_ports::RequestPrimitive;

/// Host, bearer token and tenant identifier obtained after login.
///
/// Built once per host execution and reused, read-only, for every item and
/// every resource.
#[derive(Clone)]
pub struct AuthContext {
    pub host: String,
    pub token: String,
    pub tenant_id: String,
    /// Host transport to route requests through, if the host provides one.
    pub primitive: Option<Arc<dyn RequestPrimitive>>,
}

impl AuthContext {
    pub fn new(
        host: impl Into<String>,
        token: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self { host: host.into(), token: token.into(), tenant_id: tenant_id.into(), primitive: None }
    }

    pub fn with_primitive(mut self, primitive: Arc<dyn RequestPrimitive>) -> Self {
        self.primitive = Some(primitive);
        self
    }

    /// Require host, token and tenant to be present.
    pub fn validate(&self) -> Result<()> {
        let complete = [&self.host, &self.token, &self.tenant_id]
            .iter()
            .all(|field| !field.trim().is_empty());

        if complete {
            Ok(())
        } else {
            Err(LedgerLinkError::operation("Authentication context is incomplete"))
        }
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .field("primitive", &self.primitive.is_some())
            .finish()
    }
}
