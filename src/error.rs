use serde_json::{json, Value as JsonValue};

/// Number of body bytes echoed in HTTP failure messages.
const BODY_SNIPPET_BYTES: usize = 300;

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum ModsError {
    /// Every attempt failed on transport or was throttled by the server.
    #[error("HTTP request failed (no response object) after {attempts} attempt(s)")]
    RetryExhausted {
        /// Request path that was being fetched.
        endpoint: String,
        /// Number of attempts made before giving up.
        attempts: u32,
    },
    /// Non-success HTTP status other than 429, returned without retry.
    #[error("HTTP request failed with status {status}{}", body_suffix(.body))]
    Http {
        endpoint: String,
        status: u16,
        /// Full response body, lossily decoded as UTF-8.
        body: String,
    },
    /// Successful status with a body that is not valid JSON.
    #[error("JSON parse failed: {message}")]
    Decode { endpoint: String, message: String },
    /// A header could not be encoded, so no request was sent.
    #[error("invalid header `{name}`: {reason}")]
    InvalidHeader {
        endpoint: String,
        name: String,
        reason: String,
    },
    /// Client configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ModsError {
    /// Numeric code used by the legacy error documents.
    ///
    /// `998` means no response could be obtained, `997` a non-success
    /// status and `996` an unparseable body.
    pub fn code(&self) -> i32 {
        match self {
            Self::RetryExhausted { .. } | Self::InvalidHeader { .. } | Self::Config(_) => 998,
            Self::Http { .. } => 997,
            Self::Decode { .. } => 996,
        }
    }

    /// Request path the error belongs to, when there is one.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::RetryExhausted { endpoint, .. }
            | Self::Http { endpoint, .. }
            | Self::Decode { endpoint, .. }
            | Self::InvalidHeader { endpoint, .. } => Some(endpoint),
            Self::Config(_) => None,
        }
    }

    /// Rebuilds the `{code, message, endpoint}` document older callers
    /// branch on.
    pub fn to_error_document(&self) -> JsonValue {
        json!({
            "code": self.code(),
            "message": format!("[ERROR] {self}"),
            "endpoint": self.endpoint().unwrap_or_default(),
        })
    }
}

/// Failure to obtain any response from the transport.
///
/// Never returned to callers of [`crate::ModsClient`]; the retry loop
/// absorbs it.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("transport error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("transport error: {0}")]
    Other(String),
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" | Body: {}", body_snippet(body))
    }
}

/// Truncates to at most 300 bytes without splitting a character.
pub(crate) fn body_snippet(body: &str) -> &str {
    if body.len() <= BODY_SNIPPET_BYTES {
        return body;
    }
    let mut end = BODY_SNIPPET_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
