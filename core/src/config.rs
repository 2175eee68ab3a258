//! Request configuration and the three-tier merge.
//!
//! # Design
//! Every field of `RequestConfig` is optional so that "the overlay supplies a
//! value" is expressible. The effective configuration for a call is built by
//! applying [`RequestConfig::layered`] twice: baseline → instance default at
//! client construction, then instance default → per-call override at call
//! time. Headers merge key-by-key (more specific layer wins); all other
//! fields are replaced wholesale when the overlay sets them. The verb method
//! and serialized body are injected by the client after layering, so callers
//! can never override them.

use std::time::Duration;

use crate::http::{HeaderMap, Method};

/// Credentials policy for the transport, mirroring the fetch `credentials`
/// option. Carried opaquely; each [`crate::Fetch`] implementation honors what
/// it can.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsPolicy {
    /// Send session credentials on every request (the baseline default,
    /// chosen for cross-origin session reuse).
    Include,
    SameOrigin,
    Omit,
}

/// Transport-level options for one request.
///
/// Constructed fresh per call by the layering step and never shared across
/// calls; before-request hooks receive it mutably and may adjust anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    pub method: Option<Method>,
    pub credentials: Option<CredentialsPolicy>,
    /// Opaque timeout handed to the transport. The adapter itself provides no
    /// cancellation mechanism.
    pub timeout: Option<Duration>,
    /// Header names are folded to lowercase when layered.
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestConfig {
    /// The built-in bottom layer: credentials included, JSON accept and
    /// content-type headers.
    pub fn baseline() -> Self {
        RequestConfig {
            credentials: Some(CredentialsPolicy::Include),
            ..RequestConfig::default()
        }
        .header("accept", "application/json")
        .header("content-type", "application/json")
    }

    /// Set a header, folding the name to lowercase.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    /// Merge `overlay` on top of `self` into a fresh configuration.
    ///
    /// Headers are merged key-by-key with overlay entries winning; every
    /// other field is replaced when the overlay supplies it. Header names
    /// from both layers are folded to lowercase.
    pub fn layered(&self, overlay: Option<&RequestConfig>) -> RequestConfig {
        let mut merged = RequestConfig {
            method: self.method,
            credentials: self.credentials,
            timeout: self.timeout,
            headers: self
                .headers
                .iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
                .collect(),
            body: self.body.clone(),
        };
        let Some(overlay) = overlay else {
            return merged;
        };
        if let Some(method) = overlay.method {
            merged.method = Some(method);
        }
        if let Some(credentials) = overlay.credentials {
            merged.credentials = Some(credentials);
        }
        if let Some(timeout) = overlay.timeout {
            merged.timeout = Some(timeout);
        }
        if let Some(body) = &overlay.body {
            merged.body = Some(body.clone());
        }
        for (name, value) in &overlay.headers {
            merged
                .headers
                .insert(name.to_ascii_lowercase(), value.clone());
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_has_json_headers_and_included_credentials() {
        let baseline = RequestConfig::baseline();
        assert_eq!(baseline.credentials, Some(CredentialsPolicy::Include));
        assert_eq!(
            baseline.headers.get("accept").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            baseline.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert!(baseline.method.is_none());
        assert!(baseline.body.is_none());
    }

    #[test]
    fn layered_without_overlay_is_a_copy() {
        let base = RequestConfig::baseline();
        assert_eq!(base.layered(None), base);
    }

    #[test]
    fn overlay_headers_win_key_by_key() {
        let base = RequestConfig::baseline().header("x-tenant", "alpha");
        let overlay = RequestConfig::default()
            .header("accept", "application/xml")
            .header("x-trace", "1");
        let merged = base.layered(Some(&overlay));

        // Overridden key takes the overlay value.
        assert_eq!(
            merged.headers.get("accept").map(String::as_str),
            Some("application/xml")
        );
        // Keys unique to either layer survive.
        assert_eq!(merged.headers.get("x-tenant").map(String::as_str), Some("alpha"));
        assert_eq!(merged.headers.get("x-trace").map(String::as_str), Some("1"));
        assert_eq!(
            merged.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn header_names_fold_to_lowercase_from_both_layers() {
        let mut base = RequestConfig::default();
        base.headers.insert("X-Base".to_string(), "b".to_string());
        let mut overlay = RequestConfig::default();
        overlay.headers.insert("X-Over".to_string(), "o".to_string());

        let merged = base.layered(Some(&overlay));
        assert_eq!(merged.headers.get("x-base").map(String::as_str), Some("b"));
        assert_eq!(merged.headers.get("x-over").map(String::as_str), Some("o"));
        assert!(!merged.headers.contains_key("X-Base"));
        assert!(!merged.headers.contains_key("X-Over"));
    }

    #[test]
    fn scalar_fields_replace_wholesale() {
        let base = RequestConfig {
            credentials: Some(CredentialsPolicy::Include),
            timeout: Some(Duration::from_secs(30)),
            ..RequestConfig::default()
        };
        let overlay = RequestConfig {
            credentials: Some(CredentialsPolicy::Omit),
            body: Some("{}".to_string()),
            ..RequestConfig::default()
        };
        let merged = base.layered(Some(&overlay));
        assert_eq!(merged.credentials, Some(CredentialsPolicy::Omit));
        // Overlay left timeout unset, so the base value survives.
        assert_eq!(merged.timeout, Some(Duration::from_secs(30)));
        assert_eq!(merged.body.as_deref(), Some("{}"));
    }

    #[test]
    fn three_tier_precedence_is_per_call_over_instance_over_baseline() {
        let instance = RequestConfig::default()
            .header("accept", "application/xml")
            .header("x-instance", "i");
        let per_call = RequestConfig::default().header("accept", "text/plain");

        let default_config = RequestConfig::baseline().layered(Some(&instance));
        let effective = default_config.layered(Some(&per_call));

        assert_eq!(
            effective.headers.get("accept").map(String::as_str),
            Some("text/plain")
        );
        assert_eq!(effective.headers.get("x-instance").map(String::as_str), Some("i"));
        assert_eq!(
            effective.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }
}
