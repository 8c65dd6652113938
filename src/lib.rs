//! # Vizlook SDK for Rust
//!
//! Client for the [Vizlook](https://vizlook.com) video search and answer
//! API. Search videos, ask questions answered from video content (buffered or
//! streamed), and fetch the contents of a specific video, from async or
//! blocking code.
//!
//! ## Quick start
//!
//! ```no_run
//! use vizlook::{ApiModel, Client, SearchParams};
//!
//! #[tokio::main]
//! async fn main() -> vizlook::Result<()> {
//!     // Reads VIZLOOK_API_KEY when no key is passed.
//!     let client = vizlook::ClientBuilder::new().build()?;
//!
//!     let response = client
//!         .search(SearchParams::new("how to be productive").max_results(5))
//!         .await?;
//!
//!     for video in &response.results {
//!         println!("{} {}", video.url, video.title.as_deref().unwrap_or(""));
//!     }
//!
//!     // The same data keyed as the API sends it, or in snake_case.
//!     println!("{:?}", response.to_dict(true)?);
//!     println!("{:?}", response.to_dict(false)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming answers
//!
//! ```no_run
//! use futures::StreamExt;
//! use vizlook::{AnswerParams, Client, StreamEvent};
//!
//! # async fn example() -> vizlook::Result<()> {
//! let client = Client::new("vl_your_api_key")?;
//! let mut events = client
//!     .stream_answer(AnswerParams::new("how to be productive").include_transcription(true))
//!     .await?;
//!
//! let mut answer = String::new();
//! while let Some(event) = events.next().await {
//!     match event? {
//!         StreamEvent::AnswerChunk(text) => answer.push_str(&text),
//!         StreamEvent::Citations(data) => println!("{} citations", data.citations.len()),
//!         StreamEvent::Error(err) => eprintln!("error: {}", err.error_text),
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The [`blocking`] module offers the same methods without async.

pub mod blocking;
pub mod casing;
mod client;
mod errors;
mod models;
mod stream;

pub use client::{Client, ClientBuilder};
pub use errors::{Result, VizlookError};
pub use models::{
    AnswerParams, AnswerResponse, ApiModel, Citation, CitationsData, CostData, CrawlMode,
    DollarCost, ErrorData, PublishedDate, SearchParams, SearchResponse, VideoContentsParams,
    VideoContentsResponse, VideoResult,
};
pub use stream::{BlockingEventStream, EventStream, FrameDecoder, StreamEvent};
