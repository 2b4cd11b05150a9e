//! Conversions from external infrastructure errors into domain errors.

use ledgerlink_domain::LedgerLinkError;
use reqwest::Error as HttpError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub LedgerLinkError);

impl From<InfraError> for LedgerLinkError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<LedgerLinkError> for InfraError {
    fn from(value: LedgerLinkError) -> Self {
        InfraError(value)
    }
}

trait IntoLedgerLinkError {
    fn into_ledgerlink(self) -> LedgerLinkError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → LedgerLinkError */
/* -------------------------------------------------------------------------- */

impl IntoLedgerLinkError for HttpError {
    fn into_ledgerlink(self) -> LedgerLinkError {
        if self.is_timeout() {
            return LedgerLinkError::Network(format!("HTTP request timed out: {self}"));
        }

        if self.is_connect() {
            return LedgerLinkError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return LedgerLinkError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let message = format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            );
            return LedgerLinkError::api(message, Some(status.as_u16()));
        }

        LedgerLinkError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_ledgerlink())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → LedgerLinkError */
/* -------------------------------------------------------------------------- */

impl IntoLedgerLinkError for UrlError {
    fn into_ledgerlink(self) -> LedgerLinkError {
        LedgerLinkError::Config(format!("invalid API host URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_ledgerlink())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
