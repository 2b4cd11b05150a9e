//! Resource catalogue
//!
//! A closed set of resource kinds. Each kind is bound to one API domain and a
//! static table of operation names; its handler only builds requests from
//! parameters and returns the raw API result. Validation, error capture and
//! normalization live in [`crate::dispatch`], once for all kinds.

mod accounting;
mod documents;
mod identity;
mod orders;

use std::fmt;

use ledgerlink_domain::{ApiDomain, ApiReply, LedgerLinkError, Result, SendRequest};
use serde_json::{json, Value};

use crate::api_ports::ApiSender;
use crate::auth::AuthContext;
use crate::params::ParameterReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Client,
    FiscalYear,
    AccountPosting,
    Document,
    StructureItem,
    User,
    Group,
    Order,
    OrderType,
}

impl ResourceKind {
    pub const ALL: [Self; 9] = [
        Self::Client,
        Self::FiscalYear,
        Self::AccountPosting,
        Self::Document,
        Self::StructureItem,
        Self::User,
        Self::Group,
        Self::Order,
        Self::OrderType,
    ];

    /// Resource name as used by the host.
    pub fn name(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::FiscalYear => "fiscalYear",
            Self::AccountPosting => "accountPosting",
            Self::Document => "document",
            Self::StructureItem => "structureItem",
            Self::User => "user",
            Self::Group => "group",
            Self::Order => "order",
            Self::OrderType => "orderType",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn domain(self) -> ApiDomain {
        match self {
            Self::Client | Self::FiscalYear | Self::AccountPosting => ApiDomain::Accounting,
            Self::Document | Self::StructureItem => ApiDomain::Documents,
            Self::User | Self::Group => ApiDomain::Identity,
            Self::Order | Self::OrderType => ApiDomain::Orders,
        }
    }

    /// Operation names this resource accepts.
    pub fn operations(self) -> &'static [&'static str] {
        match self {
            Self::Client | Self::FiscalYear | Self::AccountPosting => &["get", "getAll"],
            Self::Document => &["get", "getAll", "create", "update", "delete"],
            Self::StructureItem => &["get", "getAll", "create"],
            Self::User => &["get", "getAll", "create", "update", "delete", "getMe"],
            Self::Group => &["get", "getAll", "create", "update", "delete"],
            Self::Order => &["get", "getAll", "update", "getCostItems"],
            Self::OrderType => &["getAll"],
        }
    }

    pub fn supports(self, operation: &str) -> bool {
        self.operations().contains(&operation)
    }

    /// Run one operation and return the raw API result.
    pub(crate) async fn execute(
        self,
        operation: &str,
        params: &ParameterReader<'_>,
        api: &ApiCall<'_>,
    ) -> Result<Option<Value>> {
        match self {
            Self::Client => accounting::client(operation, params, api).await,
            Self::FiscalYear => accounting::fiscal_year(operation, params, api).await,
            Self::AccountPosting => accounting::account_posting(operation, params, api).await,
            Self::Document => documents::document(operation, params, api).await,
            Self::StructureItem => documents::structure_item(operation, params, api).await,
            Self::User => identity::user(operation, params, api).await,
            Self::Group => identity::group(operation, params, api).await,
            Self::Order => orders::order(operation, params, api).await,
            Self::OrderType => orders::order_type(operation, params, api).await,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sender bound to the run's credentials and one API domain.
pub(crate) struct ApiCall<'a> {
    pub sender: &'a dyn ApiSender,
    pub auth: &'a AuthContext,
    pub domain: ApiDomain,
}

impl ApiCall<'_> {
    pub async fn send(&self, request: SendRequest) -> Result<ApiReply> {
        self.sender.send(self.auth, self.domain, request).await
    }
}

/// Percent-encode an identifier for use as a path segment.
fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Result of a delete: the body if the server sent one, else a marker.
fn deleted(reply: ApiReply) -> Option<Value> {
    reply.into_body().or_else(|| Some(json!({ "success": true })))
}

fn unsupported(kind: ResourceKind, operation: &str) -> LedgerLinkError {
    LedgerLinkError::unsupported(kind.name(), operation)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_the_catalogue() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ResourceKind::from_name("invoice"), None);
    }

    #[test]
    fn client_does_not_support_delete() {
        assert!(ResourceKind::Client.supports("getAll"));
        assert!(!ResourceKind::Client.supports("delete"));
    }

    #[test]
    fn resources_map_to_their_domain() {
        assert_eq!(ResourceKind::AccountPosting.domain(), ApiDomain::Accounting);
        assert_eq!(ResourceKind::StructureItem.domain(), ApiDomain::Documents);
        assert_eq!(ResourceKind::Group.domain(), ApiDomain::Identity);
        assert_eq!(ResourceKind::OrderType.domain(), ApiDomain::Orders);
    }

    #[test]
    fn identifiers_are_encoded_as_path_segments() {
        assert_eq!(segment("a b/c"), "a%20b%2Fc");
    }
}
