//! Configuration loader
//!
//! Loads [`Config`] from environment variables or a file.
//!
//! ## Loading Strategy
//! 1. If `LEDGERLINK_CONFIG` names a file, load it (JSON or TOML)
//! 2. Otherwise read environment variables on top of the defaults
//!
//! ## Environment Variables
//! - `LEDGERLINK_TENANT_HEADER`: Header carrying the tenant identifier
//! - `LEDGERLINK_HTTP_TIMEOUT_SECS`: Timeout of the built-in HTTP transport
//! - `LEDGERLINK_USER_AGENT`: User agent of the built-in HTTP transport
//! - `LEDGERLINK_LOG_LEVEL`: Default log filter directive
//! - `LEDGERLINK_LOG_JSON`: Emit JSON log lines (true/false)

use std::path::Path;

use ledgerlink_domain::{Config, LedgerLinkError, Result};

/// Variable naming an explicit config file.
pub const CONFIG_PATH_VAR: &str = "LEDGERLINK_CONFIG";

/// Load configuration from `LEDGERLINK_CONFIG` if set, else from the
/// environment.
///
/// # Errors
/// Returns `LedgerLinkError::Config` if the file cannot be read or parsed,
/// or an environment value is invalid.
pub fn load() -> Result<Config> {
    match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) if !path.trim().is_empty() => load_from_file(path.trim()),
        _ => {
            tracing::debug!("No config file given, loading from environment");
            load_from_env()
        }
    }
}

/// Load configuration from environment variables
///
/// Unset variables keep their defaults.
///
/// # Errors
/// Returns `LedgerLinkError::Config` if a value cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();

    if let Some(header) = env_string("LEDGERLINK_TENANT_HEADER") {
        config.http.tenant_header = header;
    }
    if let Some(timeout) = env_string("LEDGERLINK_HTTP_TIMEOUT_SECS") {
        config.http.timeout_secs = timeout.parse::<u64>().map_err(|e| {
            LedgerLinkError::Config(format!("Invalid HTTP timeout '{timeout}': {e}"))
        })?;
    }
    if let Some(agent) = env_string("LEDGERLINK_USER_AGENT") {
        config.http.user_agent = agent;
    }
    if let Some(level) = env_string("LEDGERLINK_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("LEDGERLINK_LOG_JSON", config.logging.json);

    Ok(config)
}

/// Load configuration from a file
///
/// Supports JSON and TOML, detected by file extension.
///
/// # Errors
/// Returns `LedgerLinkError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LedgerLinkError::Config(format!("Config file not found: {}", path.display())));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| LedgerLinkError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, path)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| LedgerLinkError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| LedgerLinkError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(LedgerLinkError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
