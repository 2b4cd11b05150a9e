//! Generic resource dispatcher
//!
//! Drives one host execution: for every input item it validates the
//! authentication context, routes the resource/operation pair through the
//! catalogue, runs the handler and appends normalized records. Failures are
//! handled in exactly one place, [`Dispatcher::execute_item`].

use std::sync::Arc;

use ledgerlink_domain::{LedgerLinkError, OperationRequest, OutputRecord, Result};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::api_ports::{ApiSender, ExecutionHost};
use crate::auth::AuthContext;
use crate::normalize::{normalize, to_error_record};
use crate::params::ParameterReader;
use crate::resources::{ApiCall, ResourceKind};

/// Resource dispatcher shared by every item of a run.
pub struct Dispatcher {
    sender: Arc<dyn ApiSender>,
}

impl Dispatcher {
    pub fn new(sender: Arc<dyn ApiSender>) -> Self {
        Self { sender }
    }

    /// Process `items` strictly in order and return the emitted records.
    ///
    /// Stops at the first item whose failure aborts the run.
    #[instrument(skip_all, fields(items = items.len()))]
    pub async fn run(
        &self,
        host: &dyn ExecutionHost,
        auth: &AuthContext,
        items: &[OperationRequest],
    ) -> Result<Vec<OutputRecord>> {
        let mut output = Vec::new();
        for request in items {
            self.execute_item(host, auth, request, &mut output).await?;
        }
        info!(records = output.len(), "dispatch run finished");
        Ok(output)
    }

    /// Execute one item and append its records to `output`.
    ///
    /// Under continue-on-fail a failure becomes a single `{error}` record;
    /// otherwise it is returned as the abort error. Only an unsupported
    /// operation bypasses continue-on-fail and always aborts; incomplete
    /// auth, missing parameters and invalid JSON follow the host flag like
    /// any transport failure. An item never contributes both success and
    /// error records.
    #[instrument(
        skip(self, host, auth, output),
        fields(
            resource = %request.resource,
            operation = %request.operation,
            item = request.item_index
        )
    )]
    pub async fn execute_item(
        &self,
        host: &dyn ExecutionHost,
        auth: &AuthContext,
        request: &OperationRequest,
        output: &mut Vec<OutputRecord>,
    ) -> Result<()> {
        match self.attempt(host, auth, request).await {
            Ok(value) => {
                let records = normalize(value);
                debug!(records = records.len(), "operation succeeded");
                output.extend(records);
                Ok(())
            }
            Err(err) if err.is_configuration_fault() || !host.continue_on_fail() => {
                warn!(error = %err, "operation failed, aborting run");
                Err(err.into_abort())
            }
            Err(err) => {
                warn!(error = %err, "operation failed, capturing error record");
                output.push(to_error_record(&err).into_output());
                Ok(())
            }
        }
    }

    async fn attempt(
        &self,
        host: &dyn ExecutionHost,
        auth: &AuthContext,
        request: &OperationRequest,
    ) -> Result<Option<Value>> {
        auth.validate()?;

        let kind = ResourceKind::from_name(&request.resource)
            .filter(|kind| kind.supports(&request.operation))
            .ok_or_else(|| {
                LedgerLinkError::unsupported(&request.resource, &request.operation)
            })?;

        let params = ParameterReader::new(host, request.item_index);
        let api = ApiCall { sender: self.sender.as_ref(), auth, domain: kind.domain() };
        kind.execute(&request.operation, &params, &api).await
    }
}
