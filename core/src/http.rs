//! Wire-level data types shared by the adapter and its transports.
//!
//! # Design
//! `RawResponse` is plain owned data so a transport can hand it over without
//! lifetime concerns and so every after-response hook can receive its own
//! clone. Header casing from the wire is preserved in `RawResponse`; lookups
//! and the mapped envelope normalize names to lowercase.

use std::collections::BTreeMap;

/// HTTP method for a request. `Patch` also carries OData MERGE semantics;
/// the adapter's `merge` verb forwards to `patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Header mapping with lowercase names, so lookups downstream are
/// case-insensitive by construction.
pub type HeaderMap = BTreeMap<String, String>;

/// An HTTP response as returned by a [`crate::Fetch`] transport, before any
/// status interpretation or body parsing.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    /// Header pairs in original wire casing and order.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the 2xx success range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup. Returns the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// All headers with names folded to lowercase. Later duplicates win,
    /// matching plain map insertion.
    pub fn lowercased_headers(&self) -> HeaderMap {
        self.headers
            .iter()
            .map(|(key, value)| (key.to_ascii_lowercase(), value.clone()))
            .collect()
    }
}

/// The uniform envelope returned for every successful call.
///
/// `data` is `None` when the response declared `content-length: 0` or carried
/// an empty body; otherwise it holds the parsed JSON body. `headers` keys are
/// always lowercase.
#[derive(Debug, Clone)]
pub struct HttpResponse<T> {
    pub data: Option<T>,
    pub headers: HeaderMap,
    pub status: u16,
    pub status_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_headers(headers: Vec<(&str, &str)>) -> RawResponse {
        RawResponse {
            status: 200,
            status_text: "OK".to_string(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: String::new(),
        }
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let response = response_with_headers(vec![("Content-Length", "0")]);
        assert_eq!(response.header("content-length"), Some("0"));
        assert_eq!(response.header("CONTENT-LENGTH"), Some("0"));
        assert_eq!(response.header("content-type"), None);
    }

    #[test]
    fn lowercased_headers_fold_names() {
        let response =
            response_with_headers(vec![("Content-Type", "application/json"), ("X-Trace", "abc")]);
        let headers = response.lowercased_headers();
        assert_eq!(
            headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(headers.get("x-trace").map(String::as_str), Some("abc"));
        assert!(!headers.contains_key("Content-Type"));
    }

    #[test]
    fn is_success_covers_only_2xx() {
        for status in [200, 201, 204, 299] {
            let mut response = response_with_headers(Vec::new());
            response.status = status;
            assert!(response.is_success(), "{status} should be success");
        }
        for status in [199, 300, 304, 404, 500] {
            let mut response = response_with_headers(Vec::new());
            response.status = status;
            assert!(!response.is_success(), "{status} should not be success");
        }
    }

    #[test]
    fn method_as_str_matches_wire_names() {
        assert_eq!(Method::Get.as_str(), "GET");
        assert_eq!(Method::Patch.as_str(), "PATCH");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
