//! Canonical request construction for the Janus signing scheme.
//!
//! The canonical request follows the SigV4 layout:
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! with one Janus-specific normalization: the canonical query string is the
//! empty string regardless of what is sent on the wire, because the platform's
//! verifier recomputes signatures without it. Query parameters therefore never
//! influence the signature.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

/// Build the full canonical request string from its components.
///
/// `headers` holds the header name/value pairs to sign; every entry is
/// included, lowercased and sorted by name. The empty canonical query string
/// contributes an empty line between the URI and the header block.
///
/// # Examples
///
/// ```
/// use janus_auth::canonical::build_canonical_request;
///
/// let canonical = build_canonical_request(
///     "GET",
///     "/janus/20190725/azs",
///     &[("Host", "scp.example.com"), ("X-Amz-Date", "20190725T000000Z")],
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
/// );
/// assert!(canonical.starts_with("GET\n/janus/20190725/azs\n\n"));
/// ```
#[must_use]
pub fn build_canonical_request(
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    payload_hash: &str,
) -> String {
    let canonical_uri = build_canonical_uri(path);
    let canonical_headers = build_canonical_headers(headers);
    let signed_headers = build_signed_headers_string(headers);

    // The empty canonical query string sits between the URI and the headers.
    format!("{method}\n{canonical_uri}\n\n{canonical_headers}\n{signed_headers}\n{payload_hash}")
}

/// Normalize the request path for signing.
///
/// An empty path becomes `/`; anything else is used verbatim. The verifier
/// does not percent-normalize paths, so neither do we.
///
/// # Examples
///
/// ```
/// use janus_auth::canonical::build_canonical_uri;
///
/// assert_eq!(build_canonical_uri(""), "/");
/// assert_eq!(build_canonical_uri("/janus/20190725/servers"), "/janus/20190725/servers");
/// ```
#[must_use]
pub fn build_canonical_uri(path: &str) -> String {
    if path.is_empty() {
        "/".to_owned()
    } else {
        path.to_owned()
    }
}

/// Build the canonical headers block: one `name:value\n` entry per signed
/// header, names lowercased, sorted by name.
///
/// The trailing newline of the last entry is part of the block, matching the
/// verifier's reconstruction.
#[must_use]
pub fn build_canonical_headers(headers: &[(&str, &str)]) -> String {
    let sorted: BTreeMap<String, &str> = headers
        .iter()
        .map(|(name, value)| (name.to_lowercase(), *value))
        .collect();

    sorted
        .iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect()
}

/// Build the signed headers list: lowercase names, sorted, semicolon-joined.
///
/// # Examples
///
/// ```
/// use janus_auth::canonical::build_signed_headers_string;
///
/// assert_eq!(
///     build_signed_headers_string(&[("X-Amz-Date", "t"), ("Host", "h")]),
///     "host;x-amz-date"
/// );
/// ```
#[must_use]
pub fn build_signed_headers_string(headers: &[(&str, &str)]) -> String {
    let mut names: Vec<String> = headers
        .iter()
        .map(|(name, _)| name.to_lowercase())
        .collect();
    names.sort_unstable();
    names.join(";")
}

/// Hex SHA-256 of the request payload. An absent body hashes as zero bytes.
///
/// # Examples
///
/// ```
/// use janus_auth::canonical::hash_payload;
///
/// assert_eq!(
///     hash_payload(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[must_use]
pub fn hash_payload(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}
