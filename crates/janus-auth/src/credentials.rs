//! API credentials for request signing.

use std::fmt;

/// Immutable credential set scoping a signing key: access key, secret key,
/// region and service name.
///
/// Supplied once at client construction and held for the lifetime of the
/// client. The secret key is redacted from `Debug` output.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct Credentials {
    /// The access key ID carried in the `Credential=` component.
    pub access_key: String,
    /// The secret key the signing key chain is derived from.
    pub secret_key: String,
    /// Region component of the credential scope.
    pub region: String,
    /// Service component of the credential scope.
    pub service: String,
}

impl Credentials {
    /// Create a new credential set.
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: region.into(),
            service: service.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .field("service", &self.service)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_redact_secret_key_in_debug_output() {
        let creds = Credentials::new("AKID", "very-secret", "region1", "janus");
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("AKID"));
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
