//! The injected network primitive.
//!
//! # Design
//! The adapter never opens a socket itself: it hands a URL and the effective
//! `RequestConfig` to a `Fetch` trait object and gets back a plain-data
//! `RawResponse`. `ReqwestFetch` is the bundled implementation; unit tests
//! inject in-process fakes instead. Exactly one `send` happens per adapter
//! call and transport failures are surfaced unchanged.

use async_trait::async_trait;

use crate::config::RequestConfig;
use crate::error::BoxError;
use crate::http::{Method, RawResponse};

/// A fetch-like network primitive.
///
/// Implementations execute the request described by `config` against `url`
/// and return the response without interpreting its status. Status handling,
/// hooks, and body parsing are the adapter's job.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn send(&self, url: &str, config: RequestConfig) -> Result<RawResponse, BoxError>;
}

/// [`Fetch`] implementation over `reqwest`.
///
/// The client keeps a cookie store so session credentials set by the server
/// are replayed on later calls, the native analogue of the fetch
/// `credentials: include` default. Finer [`crate::CredentialsPolicy`]
/// distinctions are advisory for this transport; supply a differently
/// configured `reqwest::Client` via [`ReqwestFetch::with_client`] if needed.
#[derive(Debug, Clone)]
pub struct ReqwestFetch {
    client: reqwest::Client,
}

impl ReqwestFetch {
    pub fn new() -> Result<Self, BoxError> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(ReqwestFetch { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        ReqwestFetch { client }
    }
}

#[async_trait]
impl Fetch for ReqwestFetch {
    async fn send(&self, url: &str, config: RequestConfig) -> Result<RawResponse, BoxError> {
        let method = match config.method.unwrap_or(Method::Get) {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut request = self.client.request(method, url);
        for (name, value) in &config.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = config.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = config.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.text().await?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}
