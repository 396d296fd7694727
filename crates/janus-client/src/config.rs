//! Client configuration.
//!
//! Configuration is supplied programmatically or read from `JANUS_*`
//! environment variables.

use janus_auth::Credentials;

use crate::error::{ClientError, ClientResult};

/// Configuration for a [`crate::JanusClient`].
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ClientConfig {
    /// Base URL of the platform endpoint, without a trailing slash.
    pub base_url: String,
    /// Signing credentials.
    pub credentials: Credentials,
    /// Whether to verify the server's TLS certificate. Off by default: the
    /// platform appliances ship with self-signed certificates.
    pub tls_verify: bool,
}

impl ClientConfig {
    /// Default region when none is configured.
    pub const DEFAULT_REGION: &str = "default";
    /// Default service name when none is configured.
    pub const DEFAULT_SERVICE: &str = "janus";

    /// Create a configuration from an endpoint URL and credentials.
    ///
    /// A trailing slash on the base URL is trimmed so path interpolation
    /// never produces double slashes.
    #[must_use]
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials,
            tls_verify: false,
        }
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// `JANUS_ENDPOINT_URL`, `JANUS_ACCESS_KEY` and `JANUS_SECRET_KEY` are
    /// required; `JANUS_REGION` and `JANUS_SERVICE` fall back to defaults and
    /// `JANUS_TLS_VERIFY` enables certificate verification.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when a required variable is unset.
    pub fn from_env() -> ClientResult<Self> {
        let base_url = require_env("JANUS_ENDPOINT_URL")?;
        let access_key = require_env("JANUS_ACCESS_KEY")?;
        let secret_key = require_env("JANUS_SECRET_KEY")?;
        let region =
            std::env::var("JANUS_REGION").unwrap_or_else(|_| Self::DEFAULT_REGION.to_owned());
        let service =
            std::env::var("JANUS_SERVICE").unwrap_or_else(|_| Self::DEFAULT_SERVICE.to_owned());

        let mut config = Self::new(
            base_url,
            Credentials::new(access_key, secret_key, region, service),
        );
        if let Ok(v) = std::env::var("JANUS_TLS_VERIFY") {
            config.tls_verify = v == "1" || v.eq_ignore_ascii_case("true");
        }
        Ok(config)
    }
}

fn require_env(name: &str) -> ClientResult<String> {
    std::env::var(name).map_err(|_| ClientError::Config(format!("{name} is not set")))
}
