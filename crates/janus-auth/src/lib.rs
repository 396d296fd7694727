//! AWS Signature V4-style request signing for the Janus platform API.
//!
//! This crate implements the signing side of the scheme the Janus Open-API
//! verifies: a canonical request is built from the outgoing HTTP request, a
//! signing key is derived from the secret key through a chained HMAC-SHA256,
//! and the resulting signature is carried in the `Authorization` header
//! alongside `Host` and `X-Amz-Date`.
//!
//! The scheme deliberately deviates from standard SigV4 in two places, both
//! matched bit-exactly to the deployed verifier:
//!
//! - the canonical query string is always empty, even when query parameters
//!   are sent on the wire;
//! - the key-derivation date stamp uses a non-standard `%Ym%d` layout
//!   (see [`signer::DATE_STAMP_FORMAT`]).
//!
//! # Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use janus_auth::{Credentials, RequestSigner, SignableRequest};
//!
//! let signer = RequestSigner::new(Credentials::new(
//!     "AKIDEXAMPLE",
//!     "secret",
//!     "region1",
//!     "janus",
//! ));
//!
//! let request = SignableRequest {
//!     method: http::Method::GET,
//!     host: "scp.example.com".to_owned(),
//!     path: "/janus/20190725/azs".to_owned(),
//!     query: Vec::new(),
//!     body: Vec::new(),
//! };
//!
//! let t = Utc.with_ymd_and_hms(2019, 7, 25, 0, 0, 0).unwrap();
//! let headers = signer.sign_at(&request, t);
//! assert!(headers.authorization.starts_with("AWS4-HMAC-SHA256 Credential="));
//! ```

pub mod canonical;
pub mod credentials;
pub mod signer;

pub use credentials::Credentials;
pub use signer::{RequestSigner, SignableRequest, SignedHeaders};
