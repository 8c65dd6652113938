use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::{Result, VizlookError};
use crate::models::{
    AnswerParams, AnswerResponse, SearchParams, SearchResponse, VideoContentsParams,
    VideoContentsResponse,
};
use crate::stream::EventStream;

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.vizlook.com";
pub(crate) const API_KEY_ENV: &str = "VIZLOOK_API_KEY";
const API_KEY_HEADER: &str = "x-api-key";
const EVENT_STREAM: &str = "text/event-stream";

/// Builder for constructing a [`Client`] or a
/// [`blocking::Client`](crate::blocking::Client).
///
/// # Example
///
/// ```no_run
/// use vizlook::ClientBuilder;
///
/// # fn example() -> vizlook::Result<()> {
/// let client = ClientBuilder::new()
///     .api_key("vl_your_api_key")
///     .base_url("https://custom.example.com")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: String,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set the API key sent in the `x-api-key` header.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the base URL (defaults to `https://api.vizlook.com`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Build the async [`Client`].
    ///
    /// If no API key was set via [`api_key`](Self::api_key), the builder reads
    /// the `VIZLOOK_API_KEY` environment variable.
    ///
    /// Returns [`VizlookError::Config`] if no key is available. Nothing is sent
    /// over the network.
    pub fn build(self) -> Result<Client> {
        let config = self.into_config()?;
        let http = reqwest::Client::builder()
            .default_headers(config.headers.clone())
            .build()
            .map_err(VizlookError::Http)?;
        Ok(Client { config, http })
    }

    /// Build the [`blocking::Client`](crate::blocking::Client) from the same
    /// settings as [`build`](Self::build).
    ///
    /// Must not be called from inside an async runtime.
    pub fn build_blocking(self) -> Result<crate::blocking::Client> {
        let config = self.into_config()?;
        crate::blocking::Client::from_config(config)
    }

    pub(crate) fn into_config(self) -> Result<ClientConfig> {
        let api_key = resolve_api_key(self.api_key, std::env::var(API_KEY_ENV).ok())?;
        ClientConfig::new(&api_key, &self.base_url)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_api_key(explicit: Option<String>, from_env: Option<String>) -> Result<String> {
    explicit
        .or(from_env)
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| {
            VizlookError::Config(format!(
                "the API key must be passed to ClientBuilder::api_key() \
                 or set in the {API_KEY_ENV} environment variable"
            ))
        })
}

// ---------------------------------------------------------------------------
// Shared request core used by both the async and the blocking client
// ---------------------------------------------------------------------------

/// Fixed, read-only configuration shared by every request of a client.
#[derive(Debug, Clone)]
pub(crate) struct ClientConfig {
    pub base_url: String,
    pub headers: HeaderMap,
}

impl ClientConfig {
    fn new(api_key: &str, base_url: &str) -> Result<Self> {
        let mut key = HeaderValue::from_str(api_key).map_err(|_| {
            VizlookError::Config("the API key contains characters not allowed in a header".into())
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("vizlook-rust-sdk ", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Endpoint {
    Search,
    Answer,
    VideoContents,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Search => "/search",
            Self::Answer => "/answer",
            Self::VideoContents => "/video-contents",
        }
    }
}

/// A request ready to be sent by either client.
#[derive(Debug)]
pub(crate) struct ApiRequest {
    pub endpoint: Endpoint,
    pub body: Value,
    pub stream: bool,
}

impl ApiRequest {
    pub fn new<P: Serialize>(endpoint: Endpoint, params: &P, stream: bool) -> Result<Self> {
        let mut body = serde_json::to_value(params)?;
        if stream {
            if let Value::Object(map) = &mut body {
                map.insert("stream".into(), Value::Bool(true));
            }
        }
        debug!(path = endpoint.path(), stream, "building request");
        Ok(Self {
            endpoint,
            body,
            stream,
        })
    }

    /// Extra headers on top of the client's fixed ones.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if self.stream {
            headers.insert(ACCEPT, HeaderValue::from_static(EVENT_STREAM));
        }
        headers
    }
}

/// Parse a successful buffered body.
pub(crate) fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Map a non-2xx response to a typed error.
pub(crate) fn api_error(status: StatusCode, response_text: &str) -> VizlookError {
    let status_code = status.as_u16();
    let parsed_body: Option<Value> = serde_json::from_str(response_text).ok();

    let message = parsed_body
        .as_ref()
        .and_then(|b| b.get("error").or_else(|| b.get("message")))
        .and_then(|e| e.as_str())
        .unwrap_or(response_text)
        .to_string();

    debug!(status = status_code, %message, "API returned an error");

    match status_code {
        401 => VizlookError::Authentication { message },
        403 => VizlookError::PermissionDenied { message },
        404 => VizlookError::NotFound { message },
        429 => {
            let retry_after = parsed_body
                .as_ref()
                .and_then(|b| b.get("retryAfter"))
                .and_then(|v| v.as_f64());

            VizlookError::RateLimit {
                message,
                retry_after,
            }
        }
        _ => VizlookError::Api {
            status_code,
            message,
            body: parsed_body,
        },
    }
}

// ---------------------------------------------------------------------------
// Async client
// ---------------------------------------------------------------------------

/// The async Vizlook API client.
///
/// Use [`Client::new`] for quick construction or [`ClientBuilder`] for full
/// control. Cloning is cheap and clones share the connection pool.
///
/// # Example
///
/// ```no_run
/// use futures::StreamExt;
/// use vizlook::{AnswerParams, Client, StreamEvent};
///
/// # async fn example() -> vizlook::Result<()> {
/// let client = Client::new("vl_your_api_key")?;
///
/// let mut events = client
///     .stream_answer(AnswerParams::new("how to be productive"))
///     .await?;
/// while let Some(event) = events.next().await {
///     if let StreamEvent::AnswerChunk(text) = event? {
///         print!("{text}");
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    http: reqwest::Client,
}

impl Client {
    /// Create a client with the given API key and the default base URL.
    ///
    /// For customization, use [`ClientBuilder`] instead.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build()
    }

    /// Search for videos matching a query.
    pub async fn search(&self, params: SearchParams) -> Result<SearchResponse> {
        let request = ApiRequest::new(Endpoint::Search, &params, false)?;
        self.execute(request).await
    }

    /// Answer a question from video content, waiting for the full answer.
    pub async fn answer(&self, params: AnswerParams) -> Result<AnswerResponse> {
        let request = ApiRequest::new(Endpoint::Answer, &params, false)?;
        self.execute(request).await
    }

    /// Answer a question from video content as a stream of events.
    ///
    /// Resolves once the response headers arrive; the body is decoded lazily
    /// as the returned [`EventStream`] is polled.
    pub async fn stream_answer(&self, params: AnswerParams) -> Result<EventStream> {
        let request = ApiRequest::new(Endpoint::Answer, &params, true)?;
        let response = self.send(&request).await?;
        Ok(EventStream::new(response.bytes_stream()))
    }

    /// Fetch metadata, summary and transcription of a specific video.
    pub async fn get_video_contents(
        &self,
        params: VideoContentsParams,
    ) -> Result<VideoContentsResponse> {
        let request = ApiRequest::new(Endpoint::VideoContents, &params, false)?;
        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.send(&request).await?;
        let bytes = response.bytes().await.map_err(VizlookError::Http)?;
        parse_body(&bytes)
    }

    /// Send the request and fail on any non-2xx status.
    async fn send(&self, request: &ApiRequest) -> Result<reqwest::Response> {
        let response = self
            .http
            .post(self.config.url(request.endpoint))
            .headers(request.headers())
            .json(&request.body)
            .send()
            .await
            .map_err(VizlookError::Http)?;

        let status = response.status();
        debug!(path = request.endpoint.path(), status = status.as_u16(), "response");
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(api_error(status, &text))
    }
}
