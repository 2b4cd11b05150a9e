//! Application constants

// HTTP defaults
pub const DEFAULT_TENANT_HEADER: &str = "X-Client-Instance-Id";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("ledgerlink/", env!("CARGO_PKG_VERSION"));

// Logging defaults
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Marker keys on emitted records
pub const SUCCESS_KEY: &str = "success";
pub const VALUE_KEY: &str = "value";
pub const ERROR_KEY: &str = "error";
