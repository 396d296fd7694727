//! The platform's response envelope for list endpoints.
//!
//! List responses arrive double-wrapped:
//!
//! ```json
//! { "data": { "data": [ ... records ... ], "next_page_num": 1 } }
//! ```
//!
//! The inner `next_page_num` drives pagination. The server has been observed
//! to send it as either a JSON number or a numeric string, so both are
//! accepted; an absent, zero, or unparsable token means there is no next page.

use serde::{Deserialize, Serialize};

/// Outer envelope wrapping every list payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// The inner payload; absent on malformed responses.
    #[serde(default)]
    pub data: Option<PageData<T>>,
    /// Fields the SDK does not interpret (result codes, messages, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Inner page payload: the records plus the next-page token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageData<T> {
    /// Records on this page, in server order.
    #[serde(default)]
    pub data: Vec<T>,
    /// Token naming the next page to request, when more pages exist.
    #[serde(default)]
    pub next_page_num: Option<PageToken>,
    /// Fields the SDK does not interpret (total counts, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl<T> Default for PageData<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            next_page_num: None,
            extra: serde_json::Map::new(),
        }
    }
}

/// A next-page token as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageToken {
    /// Numeric token.
    Num(u64),
    /// Numeric token sent as a string.
    Str(String),
}

impl PageToken {
    /// Resolve the token to a page number.
    ///
    /// Returns `None` when the token is zero, empty, or not a number — all of
    /// which terminate pagination.
    #[must_use]
    pub fn as_page_num(&self) -> Option<u64> {
        let n = match self {
            Self::Num(n) => *n,
            Self::Str(s) => s.trim().parse().ok()?,
        };
        (n > 0).then_some(n)
    }
}

#[cfg(test)]
mod tests {
    use crate::types::Vm;

    use super::*;

    #[test]
    fn test_should_deserialize_double_wrapped_page() {
        let envelope: ApiEnvelope<Vm> = serde_json::from_value(serde_json::json!({
            "data": {
                "data": [{"id": "a", "name": "one"}, {"id": "b", "name": "two"}],
                "next_page_num": 1
            }
        }))
        .unwrap();

        let page = envelope.data.unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.next_page_num.unwrap().as_page_num(), Some(1));
    }

    #[test]
    fn test_should_accept_string_page_token() {
        let token: PageToken = serde_json::from_value(serde_json::json!("3")).unwrap();
        assert_eq!(token.as_page_num(), Some(3));
    }

    #[test]
    fn test_should_terminate_on_zero_or_garbage_token() {
        assert_eq!(PageToken::Num(0).as_page_num(), None);
        assert_eq!(PageToken::Str("0".to_owned()).as_page_num(), None);
        assert_eq!(PageToken::Str(String::new()).as_page_num(), None);
        assert_eq!(PageToken::Str("last".to_owned()).as_page_num(), None);
    }

    #[test]
    fn test_should_tolerate_missing_inner_payload() {
        let envelope: ApiEnvelope<Vm> =
            serde_json::from_value(serde_json::json!({"code": 500})).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.extra["code"], 500);
    }

    #[test]
    fn test_should_default_missing_record_list_to_empty() {
        let envelope: ApiEnvelope<Vm> =
            serde_json::from_value(serde_json::json!({"data": {}})).unwrap();
        let page = envelope.data.unwrap();
        assert!(page.data.is_empty());
        assert!(page.next_page_num.is_none());
    }
}
