use std::env;

use rosrustext_tf2_core::error::{CoreError, Domain, ErrorKind, Payload};
use rosrustext_tf2_core::tf::Duration;

use crate::error::log_core_error;

pub const DEFAULT_ACTION_NAMESPACE: &str = "tf2_buffer_server";

pub const ENV_ACTION_NAMESPACE: &str = "ROSRUSTEXT_TF2_NAMESPACE";
pub const ENV_DEFAULT_TIMEOUT: &str = "ROSRUSTEXT_TF2_TIMEOUT";

/// Buffer client settings.
///
/// `default_timeout` is what goes on the wire when a call passes no timeout.
/// It is zero unless configured, which by convention leaves the deadline to
/// the buffer server. The client itself never enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferClientConfig {
    pub action_namespace: String,
    pub default_timeout: Duration,
}

impl Default for BufferClientConfig {
    fn default() -> Self {
        Self {
            action_namespace: DEFAULT_ACTION_NAMESPACE.to_string(),
            default_timeout: Duration::ZERO,
        }
    }
}

impl BufferClientConfig {
    pub fn new(action_namespace: impl Into<String>) -> Self {
        Self {
            action_namespace: action_namespace.into(),
            ..Self::default()
        }
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Defaults overridden by `ROSRUSTEXT_TF2_NAMESPACE` / `ROSRUSTEXT_TF2_TIMEOUT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    ///
    /// Invalid values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ns) = lookup(ENV_ACTION_NAMESPACE) {
            let ns = ns.trim();
            if ns.is_empty() {
                log_core_error(invalid_setting(ENV_ACTION_NAMESPACE, "must not be empty"));
            } else {
                config.action_namespace = ns.to_string();
            }
        }

        if let Some(raw) = lookup(ENV_DEFAULT_TIMEOUT) {
            match parse_timeout(&raw) {
                Ok(timeout) => config.default_timeout = timeout,
                Err(err) => log_core_error(err),
            }
        }

        config
    }
}

/// Parse a timeout given in (fractional) seconds.
pub fn parse_timeout(raw: &str) -> Result<Duration, CoreError> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid_setting(ENV_DEFAULT_TIMEOUT, "not a number of seconds"))?;
    Duration::from_secs_f64(secs)
        .filter(|timeout| !timeout.is_negative())
        .ok_or_else(|| {
            invalid_setting(
                ENV_DEFAULT_TIMEOUT,
                "must be a finite, non-negative number of seconds",
            )
        })
}

fn invalid_setting(key: &'static str, reason: &'static str) -> CoreError {
    CoreError::warn()
        .domain(Domain::Config)
        .kind(ErrorKind::InvalidArgument)
        .msgf(format_args!("ignoring {key}: {reason}"))
        .payload(Payload::Context {
            key: "setting",
            value: key.into(),
        })
        .build()
}
