//! Lifecycle hooks for the request/response cycle.
//!
//! # Design
//! Hooks are trait objects so callers bind whatever context they need as
//! fields of the implementing type before registration; there is no runtime
//! rebinding. The registries live on the client instance as append-only,
//! registration-ordered vectors with no upper bound and no de-duplication.
//!
//! Before-request hooks get exclusive mutable access to the fully-merged
//! per-call configuration and are awaited one after another; all must succeed
//! before the network call fires. After-response hooks each get their own
//! clone of the raw response, so one hook consuming the body cannot starve
//! another, and they run concurrently after a successful call.

use async_trait::async_trait;

use crate::config::RequestConfig;
use crate::error::BoxError;
use crate::http::RawResponse;

/// Runs before the network call with the target URL and the mutable effective
/// configuration. A failure aborts the call before any request is issued.
#[async_trait]
pub trait BeforeRequestHook: Send + Sync {
    async fn invoke(&self, url: &str, config: &mut RequestConfig) -> Result<(), BoxError>;
}

/// Runs after a successful (2xx) response with an independently consumable
/// copy of it, before the envelope is produced. A failure suppresses the
/// envelope even though the network call succeeded.
#[async_trait]
pub trait AfterResponseHook: Send + Sync {
    async fn invoke(&self, response: RawResponse) -> Result<(), BoxError>;
}
