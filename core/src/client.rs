//! The transport adapter: one method per HTTP verb over an injected `Fetch`.
//!
//! # Design
//! Each verb method follows the same pipeline: layer the per-call override on
//! the retained default configuration, inject the verb (and serialized body
//! for mutating verbs) so callers cannot override them, run every
//! before-request hook to completion, issue exactly one transport call, then
//! map the response into the uniform envelope. Non-2xx responses become
//! [`Error::Status`] before after-response hooks run; hook failures abort the
//! call unwrapped. `merge` is a semantic alias that forwards to `patch`.

use std::sync::Arc;

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::RequestConfig;
use crate::error::Error;
use crate::fetch::Fetch;
use crate::hook::{AfterResponseHook, BeforeRequestHook};
use crate::http::{HeaderMap, HttpResponse, Method, RawResponse};

/// OData-flavored HTTP client over an injected [`Fetch`] primitive.
///
/// Holds the merged default configuration and the two hook registries for its
/// whole lifetime. Register hooks before sharing the instance; verb methods
/// take `&self` and allocate a fresh configuration per call, so concurrent
/// calls on one client never share mutable state.
pub struct ODataHttpClient {
    transport: Arc<dyn Fetch>,
    default_config: RequestConfig,
    before_request: Vec<Box<dyn BeforeRequestHook>>,
    after_response: Vec<Box<dyn AfterResponseHook>>,
}

impl ODataHttpClient {
    /// Client with the built-in baseline configuration only.
    pub fn new(transport: Arc<dyn Fetch>) -> Self {
        Self::with_config(transport, RequestConfig::default())
    }

    /// Client whose default configuration is the baseline layered with
    /// `base`. The merged result is retained for the instance lifetime.
    pub fn with_config(transport: Arc<dyn Fetch>, base: RequestConfig) -> Self {
        ODataHttpClient {
            transport,
            default_config: RequestConfig::baseline().layered(Some(&base)),
            before_request: Vec::new(),
            after_response: Vec::new(),
        }
    }

    /// Append a before-request hook. Hooks run in registration order; bind
    /// any context as fields of the hook type before registering.
    pub fn add_before_request_handler(&mut self, handler: impl BeforeRequestHook + 'static) {
        self.before_request.push(Box::new(handler));
    }

    /// Append an after-response hook.
    pub fn add_after_response_handler(&mut self, handler: impl AfterResponseHook + 'static) {
        self.after_response.push(Box::new(handler));
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        config: Option<RequestConfig>,
    ) -> Result<HttpResponse<T>, Error> {
        let effective = self.effective_config(Method::Get, None, config);
        let raw = self.dispatch(url, effective).await?;
        self.map_response(raw).await
    }

    pub async fn post<T, B>(
        &self,
        url: &str,
        payload: &B,
        config: Option<RequestConfig>,
    ) -> Result<HttpResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_with_body(Method::Post, url, payload, config).await
    }

    pub async fn put<T, B>(
        &self,
        url: &str,
        payload: &B,
        config: Option<RequestConfig>,
    ) -> Result<HttpResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_with_body(Method::Put, url, payload, config).await
    }

    pub async fn patch<T, B>(
        &self,
        url: &str,
        payload: &B,
        config: Option<RequestConfig>,
    ) -> Result<HttpResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_with_body(Method::Patch, url, payload, config).await
    }

    /// OData V2 MERGE semantics: forwards to [`ODataHttpClient::patch`] with
    /// identical arguments.
    pub async fn merge<T, B>(
        &self,
        url: &str,
        payload: &B,
        config: Option<RequestConfig>,
    ) -> Result<HttpResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.patch(url, payload, config).await
    }

    /// DELETE with void semantics: the envelope always carries `data: None`
    /// and the response body is never parsed.
    pub async fn delete(
        &self,
        url: &str,
        config: Option<RequestConfig>,
    ) -> Result<HttpResponse<()>, Error> {
        let effective = self.effective_config(Method::Delete, None, config);
        let raw = self.dispatch(url, effective).await?;
        let headers = self.finish(&raw).await?;
        Ok(HttpResponse {
            data: None,
            headers,
            status: raw.status,
            status_text: raw.status_text,
        })
    }

    /// Raw escape hatch: layers the configuration, runs before-request hooks,
    /// and returns the unmapped response. No status interpretation, no
    /// after-response hooks, no body parsing. Unlike the verb methods no
    /// method is injected, so a caller-supplied `config.method` is honored.
    pub async fn fetch(
        &self,
        url: &str,
        config: Option<RequestConfig>,
    ) -> Result<RawResponse, Error> {
        let effective = self.default_config.layered(config.as_ref());
        self.dispatch(url, effective).await
    }

    async fn send_with_body<T, B>(
        &self,
        method: Method,
        url: &str,
        payload: &B,
        config: Option<RequestConfig>,
    ) -> Result<HttpResponse<T>, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(payload).map_err(Error::Serialize)?;
        let effective = self.effective_config(method, Some(body), config);
        let raw = self.dispatch(url, effective).await?;
        self.map_response(raw).await
    }

    /// Effective per-call configuration: default layered with the override,
    /// then the verb (and body, when present) injected last.
    fn effective_config(
        &self,
        method: Method,
        body: Option<String>,
        overrides: Option<RequestConfig>,
    ) -> RequestConfig {
        let mut config = self.default_config.layered(overrides.as_ref());
        config.method = Some(method);
        if body.is_some() {
            config.body = body;
        }
        config
    }

    /// Run every before-request hook to completion, then issue the single
    /// network call.
    async fn dispatch(&self, url: &str, mut config: RequestConfig) -> Result<RawResponse, Error> {
        for hook in &self.before_request {
            hook.invoke(url, &mut config).await.map_err(Error::Hook)?;
        }
        tracing::debug!(url, method = ?config.method, "dispatching request");
        self.transport.send(url, config).await.map_err(Error::Transport)
    }

    /// Status check plus after-response hook fan-out, shared by every mapped
    /// verb. Returns the lowercased headers on success.
    async fn finish(&self, raw: &RawResponse) -> Result<HeaderMap, Error> {
        if !raw.is_success() {
            tracing::debug!(status = raw.status, "non-success response");
            return Err(Error::Status {
                status: raw.status,
                status_text: raw.status_text.clone(),
                body: raw.body.clone(),
            });
        }
        try_join_all(self.after_response.iter().map(|hook| hook.invoke(raw.clone())))
            .await
            .map_err(Error::Hook)?;
        Ok(raw.lowercased_headers())
    }

    /// Map a successful response into the envelope. `data` is `None` when the
    /// response declared `content-length: 0` or the body is empty (some 204
    /// responses omit the header entirely); in that case the body is never
    /// parsed, so a declared-empty response can carry arbitrary bytes without
    /// failing the call.
    async fn map_response<T: DeserializeOwned>(
        &self,
        raw: RawResponse,
    ) -> Result<HttpResponse<T>, Error> {
        let headers = self.finish(&raw).await?;
        let declared_empty = headers.get("content-length").is_some_and(|len| len == "0");
        let data = if declared_empty || raw.body.is_empty() {
            None
        } else {
            Some(serde_json::from_str(&raw.body).map_err(Error::Deserialize)?)
        };
        Ok(HttpResponse {
            data,
            headers,
            status: raw.status,
            status_text: raw.status_text,
        })
    }
}
