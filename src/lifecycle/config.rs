//! Store configuration, loaded from defaults and `BOOKING_SYNC_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;
use sync_framework::{SettlementPolicy, Url};
use thiserror::Error;

pub const ENV_API_URL: &str = "BOOKING_SYNC_API_URL";
pub const ENV_STATE_DIR: &str = "BOOKING_SYNC_STATE_DIR";
pub const ENV_TIMEOUT_SECS: &str = "BOOKING_SYNC_TIMEOUT_SECS";
pub const ENV_BUFFER: &str = "BOOKING_SYNC_BUFFER";
pub const ENV_SETTLEMENT: &str = "BOOKING_SYNC_SETTLEMENT";

const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var}: invalid URL {value:?}: {reason}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("{var}: expected a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var}: {reason}")]
    InvalidSettlement { var: &'static str, reason: String },
}

/// Everything [`AppStore`](crate::lifecycle::AppStore) needs to start.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub api_base_url: Url,
    /// Directory holding the persisted auth record.
    pub state_dir: PathBuf,
    pub request_timeout: Duration,
    /// Capacity of every slice actor's mailbox.
    pub buffer_size: usize,
    pub settlement: SettlementPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_url(),
            state_dir: PathBuf::from(".booking-sync"),
            request_timeout: Duration::from_secs(30),
            buffer_size: 32,
            settlement: SettlementPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by the process environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the variable whose value could not be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `BOOKING_SYNC_*` variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_API_URL) {
            config.api_base_url = Url::parse(&value).map_err(|e| ConfigError::InvalidUrl {
                var: ENV_API_URL,
                value: value.clone(),
                reason: e.to_string(),
            })?;
        }
        if let Some(value) = lookup(ENV_STATE_DIR) {
            config.state_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
            config.request_timeout = Duration::from_secs(positive(ENV_TIMEOUT_SECS, &value)?);
        }
        if let Some(value) = lookup(ENV_BUFFER) {
            let buffer = positive(ENV_BUFFER, &value)?;
            config.buffer_size = usize::try_from(buffer).map_err(|_| ConfigError::InvalidNumber {
                var: ENV_BUFFER,
                value: value.clone(),
            })?;
        }
        if let Some(value) = lookup(ENV_SETTLEMENT) {
            config.settlement = value
                .parse()
                .map_err(|reason| ConfigError::InvalidSettlement {
                    var: ENV_SETTLEMENT,
                    reason,
                })?;
        }

        Ok(config)
    }
}

fn default_url() -> Url {
    match Url::parse(DEFAULT_API_URL) {
        Ok(url) => url,
        Err(e) => unreachable!("default API URL is valid: {e}"),
    }
}

fn positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        }),
    }
}
