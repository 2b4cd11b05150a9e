//! Accounting domain: clients, fiscal years and account postings.

use ledgerlink_domain::{Result, SendRequest};
use serde_json::Value;

use super::{segment, unsupported, ApiCall, ResourceKind};
use crate::params::ParameterReader;

const BASE: &str = "accounting/v1";

/// Page size requested by list operations when none is given.
const DEFAULT_TOP: u64 = 100;

pub(super) async fn client(
    operation: &str,
    params: &ParameterReader<'_>,
    api: &ApiCall<'_>,
) -> Result<Option<Value>> {
    match operation {
        "get" => {
            let client_id = params.required_string("clientId")?;
            let request = SendRequest::get(format!("{BASE}/clients/{}", segment(&client_id)));
            Ok(api.send(request).await?.into_body())
        }
        "getAll" => {
            let request = list(SendRequest::get(format!("{BASE}/clients")), params)?;
            Ok(api.send(request).await?.into_body())
        }
        other => Err(unsupported(ResourceKind::Client, other)),
    }
}

pub(super) async fn fiscal_year(
    operation: &str,
    params: &ParameterReader<'_>,
    api: &ApiCall<'_>,
) -> Result<Option<Value>> {
    let client_id = params.required_string("clientId")?;
    let base = format!("{BASE}/clients/{}/fiscal-years", segment(&client_id));

    match operation {
        "get" => {
            let fiscal_year_id = params.required_string("fiscalYearId")?;
            let request = SendRequest::get(format!("{base}/{}", segment(&fiscal_year_id)));
            Ok(api.send(request).await?.into_body())
        }
        "getAll" => {
            let request = list(SendRequest::get(base), params)?;
            Ok(api.send(request).await?.into_body())
        }
        other => Err(unsupported(ResourceKind::FiscalYear, other)),
    }
}

pub(super) async fn account_posting(
    operation: &str,
    params: &ParameterReader<'_>,
    api: &ApiCall<'_>,
) -> Result<Option<Value>> {
    let client_id = params.required_string("clientId")?;
    let fiscal_year_id = params.required_string("fiscalYearId")?;
    let base = format!(
        "{BASE}/clients/{}/fiscal-years/{}/account-postings",
        segment(&client_id),
        segment(&fiscal_year_id)
    );

    match operation {
        "get" => {
            let posting_id = params.required_string("accountPostingId")?;
            let request = SendRequest::get(format!("{base}/{}", segment(&posting_id)));
            Ok(api.send(request).await?.into_body())
        }
        "getAll" => {
            let request = list(SendRequest::get(base), params)?
                .query("select", params.optional_string("select"));
            Ok(api.send(request).await?.into_body())
        }
        other => Err(unsupported(ResourceKind::AccountPosting, other)),
    }
}

fn list(request: SendRequest, params: &ParameterReader<'_>) -> Result<SendRequest> {
    Ok(request
        .query("filter", params.optional_string("filter"))
        .query("top", Some(params.number_or("top", DEFAULT_TOP)?))
        .query("skip", params.optional_number("skip")?))
}
