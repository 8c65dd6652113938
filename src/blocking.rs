//! A blocking client with the same methods as the async [`Client`](crate::Client).
//!
//! Each call blocks the current thread until the response (or, for
//! [`Client::stream_answer`], the response headers) arrives. Do not use it
//! from inside an async runtime.
//!
//! ```no_run
//! use vizlook::blocking::Client;
//! use vizlook::SearchParams;
//!
//! # fn example() -> vizlook::Result<()> {
//! let client = Client::new("vl_your_api_key")?;
//! let response = client.search(SearchParams::new("how to be productive").max_results(5))?;
//! for video in &response.results {
//!     println!("{}", video.url);
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::{api_error, parse_body, ApiRequest, ClientConfig, ClientBuilder, Endpoint};
use crate::errors::{Result, VizlookError};
use crate::models::{
    AnswerParams, AnswerResponse, SearchParams, SearchResponse, VideoContentsParams,
    VideoContentsResponse,
};
use crate::stream::BlockingEventStream;

/// Event stream returned by [`Client::stream_answer`].
pub type EventStream = BlockingEventStream<reqwest::blocking::Response>;

/// The blocking Vizlook API client.
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    http: reqwest::blocking::Client,
}

impl Client {
    /// Create a client with the given API key and the default base URL.
    ///
    /// For customization, use [`ClientBuilder::build_blocking`].
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ClientBuilder::new().api_key(api_key).build_blocking()
    }

    pub(crate) fn from_config(config: ClientConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .default_headers(config.headers.clone())
            // No client-side timeout; a stream lasts as long as the server sends.
            .timeout(None::<Duration>)
            .build()
            .map_err(VizlookError::Http)?;
        Ok(Self { config, http })
    }

    /// Search for videos matching a query.
    pub fn search(&self, params: SearchParams) -> Result<SearchResponse> {
        let request = ApiRequest::new(Endpoint::Search, &params, false)?;
        self.execute(request)
    }

    /// Answer a question from video content, waiting for the full answer.
    pub fn answer(&self, params: AnswerParams) -> Result<AnswerResponse> {
        let request = ApiRequest::new(Endpoint::Answer, &params, false)?;
        self.execute(request)
    }

    /// Answer a question from video content as an iterator of events.
    pub fn stream_answer(&self, params: AnswerParams) -> Result<EventStream> {
        let request = ApiRequest::new(Endpoint::Answer, &params, true)?;
        let response = self.send(&request)?;
        Ok(BlockingEventStream::new(response))
    }

    /// Fetch metadata, summary and transcription of a specific video.
    pub fn get_video_contents(&self, params: VideoContentsParams) -> Result<VideoContentsResponse> {
        let request = ApiRequest::new(Endpoint::VideoContents, &params, false)?;
        self.execute(request)
    }

    fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.send(&request)?;
        let bytes = response.bytes().map_err(VizlookError::Http)?;
        parse_body(&bytes)
    }

    fn send(&self, request: &ApiRequest) -> Result<reqwest::blocking::Response> {
        let response = self
            .http
            .post(self.config.url(request.endpoint))
            .headers(request.headers())
            .json(&request.body)
            .send()
            .map_err(VizlookError::Http)?;

        let status = response.status();
        debug!(path = request.endpoint.path(), status = status.as_u16(), "response");
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().unwrap_or_default();
        Err(api_error(status, &text))
    }
}
