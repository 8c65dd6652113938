use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::casing::{to_camel_case, to_snake_case, transform_map};
use crate::errors::Result;

/// Shared behaviour of every typed value the API returns.
///
/// The typed struct is the only stored representation. [`to_dict`](Self::to_dict)
/// renders it either with the API's own field names or with snake_case names;
/// values are identical in both views.
pub trait ApiModel: Sized {
    /// The value exactly as the API would send it.
    fn to_api_value(&self) -> Result<Value>;

    /// Build the model from a value keyed by API field names.
    fn from_api_value(value: Value) -> Result<Self>;

    /// Render as a JSON object.
    ///
    /// With `use_api_field_name = true` keys match the wire format
    /// (`publishedDate`); otherwise every key, nested ones included, is
    /// snake_case (`published_date`). Fields the SDK does not know about are
    /// included under the same key transform.
    fn to_dict(&self, use_api_field_name: bool) -> Result<Map<String, Value>> {
        let map = match self.to_api_value()? {
            Value::Object(map) => map,
            other => {
                let err = <serde_json::Error as serde::ser::Error>::custom(format!(
                    "expected a JSON object, got {other}"
                ));
                return Err(err.into());
            }
        };

        if use_api_field_name {
            Ok(map)
        } else {
            Ok(transform_map(map, &to_snake_case))
        }
    }

    /// Inverse of [`to_dict`](Self::to_dict).
    ///
    /// With `use_api_field_name = false` keys are camelCased back. That is
    /// exact for every field the SDK models. Unknown keys are best-effort: an
    /// acronym such as `videoURL` is snake-cased to `video_url` and comes
    /// back as `videoUrl`.
    fn from_dict(map: Map<String, Value>, use_api_field_name: bool) -> Result<Self> {
        let map = if use_api_field_name {
            map
        } else {
            transform_map(map, &to_camel_case)
        };
        Self::from_api_value(Value::Object(map))
    }
}

macro_rules! impl_api_model {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ApiModel for $ty {
                fn to_api_value(&self) -> Result<Value> {
                    Ok(serde_json::to_value(self)?)
                }

                fn from_api_value(value: Value) -> Result<Self> {
                    Ok(serde_json::from_value(value)?)
                }
            }
        )*
    };
}

impl_api_model!(
    VideoResult,
    Citation,
    DollarCost,
    SearchResponse,
    AnswerResponse,
    VideoContentsResponse,
    CitationsData,
    CostData,
    ErrorData,
);

/// `null` on the wire reads as the field's default, same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// A publish date bound, accepted by the API either as a Unix timestamp in
/// milliseconds or as an ISO 8601 string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PublishedDate {
    Timestamp(i64),
    Iso(String),
}

impl From<i64> for PublishedDate {
    fn from(millis: i64) -> Self {
        Self::Timestamp(millis)
    }
}

impl From<&str> for PublishedDate {
    fn from(iso: &str) -> Self {
        Self::Iso(iso.to_string())
    }
}

impl From<String> for PublishedDate {
    fn from(iso: String) -> Self {
        Self::Iso(iso)
    }
}

impl From<DateTime<Utc>> for PublishedDate {
    fn from(at: DateTime<Utc>) -> Self {
        Self::Timestamp(at.timestamp_millis())
    }
}

/// How `get_video_contents` fetches a video the service has not indexed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum CrawlMode {
    /// Only return already-indexed content.
    Never,
    /// Crawl when no indexed content exists.
    Fallback,
    /// Always crawl fresh content.
    Always,
}

/// Parameters for [`Client::search`](crate::Client::search).
///
/// ```
/// use vizlook::SearchParams;
///
/// let params = SearchParams::new("how to be productive")
///     .max_results(5)
///     .start_published_date("2025-08-19T15:01:36.000Z")
///     .end_published_date(1_755_615_696_000_i64)
///     .include_summary(true);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_results: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_published_date: Option<PublishedDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_published_date: Option<PublishedDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_transcription: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_summary: Option<bool>,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: None,
            start_published_date: None,
            end_published_date: None,
            include_transcription: None,
            include_summary: None,
        }
    }

    pub fn max_results(mut self, n: u32) -> Self {
        self.max_results = Some(n);
        self
    }

    /// Only return videos published at or after this date.
    pub fn start_published_date(mut self, date: impl Into<PublishedDate>) -> Self {
        self.start_published_date = Some(date.into());
        self
    }

    /// Only return videos published at or before this date.
    pub fn end_published_date(mut self, date: impl Into<PublishedDate>) -> Self {
        self.end_published_date = Some(date.into());
        self
    }

    pub fn include_transcription(mut self, yes: bool) -> Self {
        self.include_transcription = Some(yes);
        self
    }

    pub fn include_summary(mut self, yes: bool) -> Self {
        self.include_summary = Some(yes);
        self
    }
}

/// Parameters for [`Client::answer`](crate::Client::answer) and
/// [`Client::stream_answer`](crate::Client::stream_answer).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerParams {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_transcription: Option<bool>,
}

impl AnswerParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            include_transcription: None,
        }
    }

    /// Ground the answer in video transcriptions as well as metadata.
    pub fn include_transcription(mut self, yes: bool) -> Self {
        self.include_transcription = Some(yes);
        self
    }

    /// Alias of [`include_transcription`](Self::include_transcription).
    pub fn need_transcription(self, yes: bool) -> Self {
        self.include_transcription(yes)
    }
}

/// Parameters for [`Client::get_video_contents`](crate::Client::get_video_contents).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContentsParams {
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    crawl_mode: Option<CrawlMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_transcription: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_summary: Option<bool>,
}

impl VideoContentsParams {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            crawl_mode: None,
            include_transcription: None,
            include_summary: None,
        }
    }

    pub fn crawl_mode(mut self, mode: CrawlMode) -> Self {
        self.crawl_mode = Some(mode);
        self
    }

    pub fn include_transcription(mut self, yes: bool) -> Self {
        self.include_transcription = Some(yes);
        self
    }

    pub fn include_summary(mut self, yes: bool) -> Self {
        self.include_summary = Some(yes);
        self
    }
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

/// One video returned by search or video-contents.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<PublishedDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Present when `include_summary` was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Present when `include_transcription` was requested. Kept as raw JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcription: Option<Value>,

    /// Fields this version of the SDK does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A source backing part of an answer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Seconds from video start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Billing for one request, in US dollars.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DollarCost {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    /// Per-component breakdown and anything else the API adds.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Returned by `search`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<VideoResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dollar_cost: Option<DollarCost>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Returned by the buffered `answer`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub citations: Vec<Citation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dollar_cost: Option<DollarCost>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Returned by `get_video_contents`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoContentsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<VideoResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dollar_cost: Option<DollarCost>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Stream event payloads
// ---------------------------------------------------------------------------

/// Payload of a `data-citations` event.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationsData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub citations: Vec<Citation>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of a `data-cost` event.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dollar_cost: Option<DollarCost>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload of an `error` event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub error_text: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
