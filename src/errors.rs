use thiserror::Error;

/// All errors that can occur when using the Vizlook SDK.
///
/// A well-formed `error` event inside a stream is not one of these: it is
/// yielded as [`StreamEvent::Error`](crate::StreamEvent::Error) and the caller
/// checks it explicitly.
#[derive(Error, Debug)]
pub enum VizlookError {
    /// The client could not be configured, e.g. no API key was supplied.
    /// Raised before any network activity.
    #[error("configuration error: {0}")]
    Config(String),

    /// The API key was rejected (HTTP 401).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The API key does not grant access to the endpoint (HTTP 403).
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    /// The requested resource was not found (HTTP 404).
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The request was rate-limited (HTTP 429). Not retried by the SDK.
    #[error("rate limited (retry after {retry_after:?}s): {message}")]
    RateLimit {
        message: String,
        retry_after: Option<f64>,
    },

    /// A non-specific API error with the HTTP status code and response body.
    #[error("API error {status_code}: {message}")]
    Api {
        status_code: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// A transport-level HTTP error from reqwest.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An I/O error while reading a blocking response stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The response body or a stream frame was not valid JSON, or did not
    /// match the expected shape.
    #[error("failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    /// A stream frame was complete but could not be turned into an event.
    #[error("malformed stream frame: {0}")]
    MalformedFrame(String),

    /// The stream closed in the middle of a frame.
    #[error("stream truncated: {pending} bytes of an unterminated frame")]
    Truncated { pending: usize },
}

impl VizlookError {
    /// `true` for errors caused by an undecodable body or frame.
    ///
    /// [`Truncated`](Self::Truncated) is not a decode error.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Json(_) | Self::MalformedFrame(_))
    }
}

/// A convenience alias for `Result<T, VizlookError>`.
pub type Result<T> = std::result::Result<T, VizlookError>;
