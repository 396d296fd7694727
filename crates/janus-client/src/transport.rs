//! HTTP transport abstraction.
//!
//! The client speaks to the platform through the [`Transport`] trait: an
//! [`ApiRequest`] goes out, an [`ApiResponse`] comes back for both success and
//! HTTP-error outcomes, and only connection-level failures surface as errors.
//! The production implementation is [`HttpTransport`], which joins the base
//! URL, signs every request before sending it, and optionally trusts
//! self-signed certificates. Tests substitute their own implementations.

use async_trait::async_trait;
use janus_auth::{RequestSigner, SignableRequest};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// An outgoing API request, before signing.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: http::Method,
    /// URL path relative to the base URL.
    pub path: String,
    /// Query parameters, sent on the wire but never signed.
    pub query: Vec<(String, String)>,
    /// Optional JSON body.
    pub body: Option<serde_json::Value>,
}

/// The transport-level outcome of a sent request.
///
/// Carries the status line and raw body text for success and HTTP-error
/// responses alike; decoding is the caller's concern.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// HTTP reason phrase.
    pub reason: String,
    /// Raw response body text.
    pub body: String,
}

impl ApiResponse {
    /// Whether the status code is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The HTTP collaborator the client sends requests through.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when no HTTP response was obtained.
    /// HTTP error statuses are NOT errors at this level; they come back as an
    /// [`ApiResponse`].
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse>;
}

impl std::fmt::Debug for dyn Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Transport")
    }
}

/// reqwest-backed [`Transport`] that signs every outgoing request.
#[derive(Debug)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
    host: String,
    signer: RequestSigner,
}

impl HttpTransport {
    /// Build a transport from the client configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the base URL does not parse, or
    /// [`ClientError::Transport`] when the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let url = reqwest::Url::parse(&config.base_url)
            .map_err(|err| ClientError::Config(format!("invalid base URL: {err}")))?;
        let host = url
            .host_str()
            .ok_or_else(|| ClientError::Config("base URL has no host".to_owned()))?;
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };

        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(!config.tls_verify)
            .build()
            .map_err(ClientError::transport)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            host,
            signer: RequestSigner::new(config.credentials.clone()),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        // Serialize the body once so the signed hash and the wire bytes can
        // never diverge.
        let body_bytes = match &request.body {
            Some(value) => serde_json::to_vec(value).map_err(ClientError::transport)?,
            None => Vec::new(),
        };

        let signed = self.signer.sign(&SignableRequest {
            method: request.method.clone(),
            host: self.host.clone(),
            path: request.path.clone(),
            query: request.query.clone(),
            body: body_bytes.clone(),
        });

        debug!(method = %request.method, url, "sending signed request");

        // The Host header reqwest derives from the URL is the host we signed.
        let mut builder = self
            .http
            .request(request.method, &url)
            .query(&request.query)
            .header("X-Amz-Date", &signed.amz_date)
            .header(http::header::AUTHORIZATION, &signed.authorization);
        if request.body.is_some() {
            builder = builder
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(body_bytes);
        }

        let response = builder.send().await.map_err(ClientError::transport)?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_owned();
        let body = response.text().await.map_err(ClientError::transport)?;

        Ok(ApiResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_classify_status_ranges() {
        let mut response = ApiResponse {
            status: 200,
            reason: "OK".to_owned(),
            body: String::new(),
        };
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 404;
        assert!(!response.is_success());
        response.status = 500;
        assert!(!response.is_success());
    }

    #[test]
    fn test_should_keep_host_and_port_for_signing() {
        let config = ClientConfig::new(
            "https://scp.example.com:4430/",
            janus_auth::Credentials::new("AKID", "secret", "region1", "janus"),
        );
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.host, "scp.example.com:4430");
        assert_eq!(transport.base_url, "https://scp.example.com:4430");
    }

    #[test]
    fn test_should_reject_unparsable_base_url() {
        let config = ClientConfig::new(
            "not a url",
            janus_auth::Credentials::new("AKID", "secret", "region1", "janus"),
        );
        assert!(matches!(
            HttpTransport::new(&config),
            Err(ClientError::Config(_))
        ));
    }
}
