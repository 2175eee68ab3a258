//! Async OData HTTP transport adapter.
//!
//! # Overview
//! Wraps an injected network primitive (the [`Fetch`] trait) behind one method
//! per HTTP verb. Every call layers request configuration
//! (baseline → instance default → per-call override), runs registered
//! lifecycle hooks, issues exactly one network call, and maps the result into
//! a uniform [`HttpResponse`] envelope — or fails with a single [`Error`].
//!
//! # Design
//! - `ODataHttpClient` owns its hook registries and default configuration;
//!   nothing is global, so independent clients can coexist in one process.
//! - The network primitive is a trait object, so the adapter itself never
//!   opens a socket. [`ReqwestFetch`] is the bundled implementation; tests
//!   inject in-process fakes.
//! - Request payloads and response bodies go through `serde_json`; the
//!   envelope is generic over whatever the body deserializes to.
//! - URLs are opaque strings. Query construction, metadata parsing, and typed
//!   service generation all live upstream of this crate.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod hook;
pub mod http;

pub use client::ODataHttpClient;
pub use config::{CredentialsPolicy, RequestConfig};
pub use error::{BoxError, Error};
pub use fetch::{Fetch, ReqwestFetch};
pub use hook::{AfterResponseHook, BeforeRequestHook};
pub use http::{HeaderMap, HttpResponse, Method, RawResponse};

// Implementors of `Fetch` and the hook traits need the same macro.
pub use async_trait::async_trait;
