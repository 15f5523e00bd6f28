//! Configuration loading and representation.

use std::net::SocketAddr;

use thiserror::Error;

use invoicer_invoicing::DEFAULT_CURRENCY;
use invoicer_observability::LogFormat;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

/// Process configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Postgres connection string; `None` selects the in-memory stores.
    pub database_url: Option<String>,
    pub bind_addr: SocketAddr,
    /// Currency applied to invoices created without one.
    pub default_currency: String,
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup` (variable name -> value).
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut bind_addr: SocketAddr = get("INVOICER_BIND_ADDR")
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
            .map_err(|e| ConfigError::invalid("INVOICER_BIND_ADDR", format!("{e}")))?;
        if let Some(port) = get("PORT") {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("PORT", format!("{e}")))?;
            bind_addr.set_port(port);
        }

        let default_currency = match get("INVOICER_DEFAULT_CURRENCY") {
            Some(code) => parse_currency(&code)?,
            None => DEFAULT_CURRENCY.to_string(),
        };

        let db_max_connections = match get("INVOICER_DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                Ok(_) => {
                    return Err(ConfigError::invalid(
                        "INVOICER_DB_MAX_CONNECTIONS",
                        "must be positive",
                    ));
                }
                Err(e) => {
                    return Err(ConfigError::invalid(
                        "INVOICER_DB_MAX_CONNECTIONS",
                        format!("{e}"),
                    ));
                }
            },
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        let log_format = match get("INVOICER_LOG_FORMAT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| ConfigError::invalid("INVOICER_LOG_FORMAT", format!("{e}")))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            bind_addr,
            default_currency,
            db_max_connections,
            log_format,
        })
    }
}

fn parse_currency(raw: &str) -> Result<String, ConfigError> {
    let code = raw.trim();
    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(code.to_ascii_uppercase())
    } else {
        Err(ConfigError::invalid(
            "INVOICER_DEFAULT_CURRENCY",
            format!("'{raw}' is not a three-letter currency code"),
        ))
    }
}
