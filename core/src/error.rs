//! Error types for the transport adapter.
//!
//! # Design
//! The adapter recovers nothing locally: every failure class surfaces to the
//! caller through one enum, and there is no retry, backoff, or circuit
//! breaking. `Status` gets the full response body so a failed call is
//! diagnosable from the error alone; hook and transport failures pass the
//! underlying error through without extra framing.

use thiserror::Error;

/// Boxed error used at the transport and hook boundaries, where the concrete
/// failure type belongs to the caller-supplied implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by [`crate::ODataHttpClient`].
#[derive(Debug, Error)]
pub enum Error {
    /// The network primitive itself failed (DNS, connection reset, abort).
    #[error("transport error: {0}")]
    Transport(BoxError),

    /// The server answered with a non-2xx status. No envelope is constructed;
    /// the status line and full body text are carried here instead.
    #[error("{status} {status_text}\n\n{body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    /// A before-request or after-response hook failed, aborting the call.
    #[error("{0}")]
    Hook(BoxError),

    /// The request payload could not be serialized to JSON.
    #[error("request payload is not valid JSON: {0}")]
    Serialize(serde_json::Error),

    /// The response declared a non-empty body that is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Deserialize(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_carries_status_and_body() {
        let err = Error::Status {
            status: 404,
            status_text: "Not Found".to_string(),
            body: "not found".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("not found"));
    }

    #[test]
    fn hook_error_displays_the_inner_error() {
        let inner: BoxError = "token refresh failed".into();
        let err = Error::Hook(inner);
        assert_eq!(err.to_string(), "token refresh failed");
    }
}
