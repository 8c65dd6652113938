//! Decoding of streamed answers.
//!
//! The API streams server-sent-event frames. Each frame is a block of
//! `field: value` lines ended by a blank line, and its `data` carries a JSON
//! object `{"type": ..., "data": ...}`:
//!
//! ```text
//! data: {"type":"answer-chunk","data":"Block your "}
//!
//! data: {"type":"answer-chunk","data":"calendar."}
//!
//! data: {"type":"data-cost","data":{"dollarCost":{"total":0.01}}}
//!
//! ```
//!
//! [`FrameDecoder`] does the framing and typing without any I/O.
//! [`EventStream`] and [`BlockingEventStream`] drive it from an async byte
//! stream and from a [`Read`] respectively.

use std::collections::VecDeque;
use std::io::Read;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::stream::{BoxStream, Stream, StreamExt};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::errors::{Result, VizlookError};
use crate::models::{ApiModel, CitationsData, CostData, ErrorData};

const ANSWER_CHUNK: &str = "answer-chunk";
const DATA_CITATIONS: &str = "data-citations";
const DATA_COST: &str = "data-cost";
const ERROR: &str = "error";
const FINISH: &str = "finish";

/// Sent by some deployments after the last event.
const DONE_SENTINEL: &str = "[DONE]";

/// One typed event of a streamed answer.
///
/// Events arrive in order. Only [`AnswerChunk`](Self::AnswerChunk) repeats;
/// concatenating its payloads in arrival order gives the full answer.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// `answer-chunk`: the next piece of answer text.
    AnswerChunk(String),
    /// `data-citations`: the sources the answer draws on.
    Citations(CitationsData),
    /// `data-cost`: what the request cost.
    Cost(CostData),
    /// `error`: the server gave up. Always the last event of a stream.
    Error(ErrorData),
    /// `finish`: the server finished producing the answer.
    Finish(Value),
    /// An event type this version of the SDK does not know.
    Unknown { event_type: String, data: Value },
}

impl StreamEvent {
    /// The wire `type` tag.
    pub fn event_type(&self) -> &str {
        match self {
            Self::AnswerChunk(_) => ANSWER_CHUNK,
            Self::Citations(_) => DATA_CITATIONS,
            Self::Cost(_) => DATA_COST,
            Self::Error(_) => ERROR,
            Self::Finish(_) => FINISH,
            Self::Unknown { event_type, .. } => event_type,
        }
    }

    /// The answer text carried by an `answer-chunk`.
    pub fn answer_text(&self) -> Option<&str> {
        match self {
            Self::AnswerChunk(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    fn from_parts(event_type: String, data: Value) -> Result<Self> {
        let event = match event_type.as_str() {
            ANSWER_CHUNK => match data {
                Value::String(text) => Self::AnswerChunk(text),
                other => {
                    return Err(VizlookError::MalformedFrame(format!(
                        "answer-chunk payload must be a string, got {other}"
                    )))
                }
            },
            DATA_CITATIONS => Self::Citations(CitationsData::from_api_value(data)?),
            DATA_COST => Self::Cost(CostData::from_api_value(data)?),
            ERROR => Self::Error(error_data(data)),
            FINISH => Self::Finish(data),
            _ => {
                debug!(event_type = %event_type, "passing through unknown stream event");
                Self::Unknown { event_type, data }
            }
        };
        Ok(event)
    }
}

impl ApiModel for StreamEvent {
    fn to_api_value(&self) -> Result<Value> {
        let data = match self {
            Self::AnswerChunk(text) => Value::String(text.clone()),
            Self::Citations(data) => data.to_api_value()?,
            Self::Cost(data) => data.to_api_value()?,
            Self::Error(data) => data.to_api_value()?,
            Self::Finish(data) | Self::Unknown { data, .. } => data.clone(),
        };

        let mut map = Map::new();
        map.insert("type".into(), Value::String(self.event_type().to_string()));
        map.insert("data".into(), data);
        Ok(Value::Object(map))
    }

    fn from_api_value(value: Value) -> Result<Self> {
        let envelope: Envelope = serde_json::from_value(value)?;
        Self::from_parts(envelope.event_type, envelope.data)
    }
}

/// An `error` payload in whatever shape the server sent it.
fn error_data(data: Value) -> ErrorData {
    match data {
        Value::Null => ErrorData::default(),
        Value::String(error_text) => ErrorData {
            error_text,
            ..ErrorData::default()
        },
        Value::Object(map) => ErrorData::from_api_value(Value::Object(map.clone()))
            .unwrap_or_else(|_| ErrorData {
                extra: map,
                ..ErrorData::default()
            }),
        other => ErrorData {
            error_text: other.to_string(),
            ..ErrorData::default()
        },
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: Value,
}

/// What a complete frame turned out to be.
enum Frame {
    Event(StreamEvent),
    Done,
    KeepAlive,
}

/// Incremental, I/O-free decoder from raw bytes to [`StreamEvent`]s.
///
/// Feed transport chunks with [`push`](Self::push) in arrival order and call
/// [`finish`](Self::finish) when the transport closes. Chunks may split frames,
/// lines and UTF-8 sequences anywhere.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buffer: Vec<u8>,
    /// Buffer offset where the search for the next `\n\n` resumes.
    scanned: usize,
    /// The previous chunk ended in `\r`; a leading `\n` belongs to it.
    after_cr: bool,
    done: bool,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once the stream has ended: an `error` event, the `[DONE]`
    /// sentinel or a decode failure was seen. Later input is ignored.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Consume one chunk and return every event it completes.
    ///
    /// A decode failure is returned as the last item and ends the stream.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<StreamEvent>> {
        let mut out = Vec::new();
        if self.done {
            return out;
        }

        self.extend_normalized(chunk);

        while let Some(pos) = find_frame_end(&self.buffer, self.scanned) {
            let block: Vec<u8> = self.buffer.drain(..pos + 2).take(pos).collect();
            self.scanned = 0;

            match decode_frame(&block) {
                Ok(Frame::Event(event)) => {
                    let terminal = event.is_error();
                    out.push(Ok(event));
                    if terminal {
                        debug!("stream ended by error event");
                        self.end();
                        break;
                    }
                }
                Ok(Frame::Done) => {
                    trace!("stream ended by [DONE]");
                    self.end();
                    break;
                }
                Ok(Frame::KeepAlive) => {}
                Err(err) => {
                    debug!(error = %err, "undecodable stream frame");
                    out.push(Err(err));
                    self.end();
                    break;
                }
            }
        }

        if !self.done {
            self.scanned = self.buffer.len().saturating_sub(1);
        }
        out
    }

    /// Append `chunk` with `\r\n` and lone `\r` line endings rewritten to
    /// `\n`, including a `\r\n` split across two chunks.
    fn extend_normalized(&mut self, chunk: &[u8]) {
        self.buffer.reserve(chunk.len());
        for &b in chunk {
            match b {
                b'\r' => {
                    self.buffer.push(b'\n');
                    self.after_cr = true;
                }
                b'\n' if self.after_cr => self.after_cr = false,
                _ => {
                    self.buffer.push(b);
                    self.after_cr = false;
                }
            }
        }
    }

    /// Signal that the transport closed.
    ///
    /// Returns [`VizlookError::Truncated`] if a frame was left unterminated.
    pub fn finish(&mut self) -> Result<()> {
        let pending = if self.done {
            0
        } else {
            self.buffer
                .iter()
                .filter(|b| !b.is_ascii_whitespace())
                .count()
        };
        self.end();

        if pending > 0 {
            return Err(VizlookError::Truncated { pending });
        }
        Ok(())
    }

    fn end(&mut self) {
        self.done = true;
        self.scanned = 0;
        self.buffer.clear();
    }
}

fn find_frame_end(buf: &[u8], from: usize) -> Option<usize> {
    buf.get(from..)?
        .windows(2)
        .position(|w| w == b"\n\n")
        .map(|pos| pos + from)
}

fn decode_frame(block: &[u8]) -> Result<Frame> {
    let text = std::str::from_utf8(block)
        .map_err(|e| VizlookError::MalformedFrame(format!("invalid UTF-8: {e}")))?;

    let mut event_name: Option<&str> = None;
    let mut data: Option<String> = None;

    for line in text.lines() {
        // Comment line.
        if line.starts_with(':') {
            continue;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "data" => match data.as_mut() {
                Some(buf) => {
                    buf.push('\n');
                    buf.push_str(value);
                }
                None => data = Some(value.to_string()),
            },
            "event" => event_name = Some(value),
            _ => {}
        }
    }

    match (event_name, data) {
        (None, None) => Ok(Frame::KeepAlive),
        (None, Some(data)) if data.trim() == DONE_SENTINEL => Ok(Frame::Done),
        (None, Some(data)) => {
            let value: Value = serde_json::from_str(&data)?;
            StreamEvent::from_api_value(value).map(Frame::Event)
        }
        (Some(name), data) => {
            let data = data.unwrap_or_default();
            let payload = if name == ANSWER_CHUNK {
                Value::String(data)
            } else if data.trim().is_empty() {
                Value::Null
            } else if name == ERROR {
                serde_json::from_str(&data).unwrap_or(Value::String(data))
            } else {
                serde_json::from_str(&data)?
            };
            StreamEvent::from_parts(name.to_string(), payload).map(Frame::Event)
        }
    }
}

/// Async stream of [`StreamEvent`]s returned by
/// [`Client::stream_answer`](crate::Client::stream_answer).
///
/// Ends after an `error` event, after a decode or transport error, or when the
/// connection closes. Dropping it closes the connection.
pub struct EventStream {
    bytes: BoxStream<'static, reqwest::Result<Bytes>>,
    decoder: FrameDecoder,
    pending: VecDeque<Result<StreamEvent>>,
    finished: bool,
}

impl EventStream {
    pub fn new<S>(bytes: S) -> Self
    where
        S: Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
    {
        Self {
            bytes: bytes.boxed(),
            decoder: FrameDecoder::new(),
            pending: VecDeque::new(),
            finished: false,
        }
    }

    /// Drain the stream, concatenating every `answer-chunk`.
    ///
    /// Returns the text and the terminal `error` event, if there was one.
    pub async fn collect_answer(mut self) -> Result<(String, Option<ErrorData>)> {
        let mut answer = String::new();
        while let Some(event) = self.next().await {
            match event? {
                StreamEvent::AnswerChunk(text) => answer.push_str(&text),
                StreamEvent::Error(err) => return Ok((answer, Some(err))),
                _ => {}
            }
        }
        Ok((answer, None))
    }
}

impl Stream for EventStream {
    type Item = Result<StreamEvent>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(item) = this.pending.pop_front() {
                return Poll::Ready(Some(item));
            }
            if this.finished || this.decoder.is_done() {
                this.finished = true;
                return Poll::Ready(None);
            }

            match this.bytes.poll_next_unpin(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    trace!(len = chunk.len(), "stream chunk");
                    this.pending.extend(this.decoder.push(&chunk));
                }
                Poll::Ready(Some(Err(e))) => {
                    this.finished = true;
                    return Poll::Ready(Some(Err(VizlookError::Http(e))));
                }
                Poll::Ready(None) => {
                    this.finished = true;
                    if let Err(e) = this.decoder.finish() {
                        return Poll::Ready(Some(Err(e)));
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Blocking counterpart of [`EventStream`], returned by
/// [`blocking::Client::stream_answer`](crate::blocking::Client::stream_answer).
pub struct BlockingEventStream<R> {
    reader: R,
    decoder: FrameDecoder,
    pending: VecDeque<Result<StreamEvent>>,
    finished: bool,
    buf: Box<[u8]>,
}

impl<R: Read> BlockingEventStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoder: FrameDecoder::new(),
            pending: VecDeque::new(),
            finished: false,
            buf: vec![0u8; 8 * 1024].into_boxed_slice(),
        }
    }

    /// Drain the stream, concatenating every `answer-chunk`.
    ///
    /// Returns the text and the terminal `error` event, if there was one.
    pub fn collect_answer(self) -> Result<(String, Option<ErrorData>)> {
        let mut answer = String::new();
        for event in self {
            match event? {
                StreamEvent::AnswerChunk(text) => answer.push_str(&text),
                StreamEvent::Error(err) => return Ok((answer, Some(err))),
                _ => {}
            }
        }
        Ok((answer, None))
    }
}

impl<R: Read> Iterator for BlockingEventStream<R> {
    type Item = Result<StreamEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }
            if self.finished || self.decoder.is_done() {
                self.finished = true;
                return None;
            }

            match self.reader.read(&mut self.buf) {
                Ok(0) => {
                    self.finished = true;
                    return self.decoder.finish().err().map(Err);
                }
                Ok(n) => {
                    let events = self.decoder.push(&self.buf[..n]);
                    self.pending.extend(events);
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(VizlookError::Io(e)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frame(value: Value) -> String {
        format!("data: {value}\n\n")
    }

    fn chunk(text: &str) -> String {
        frame(json!({ "type": "answer-chunk", "data": text }))
    }

    fn decode_all(decoder: &mut FrameDecoder, input: &[u8]) -> Vec<Result<StreamEvent>> {
        let mut out = decoder.push(input);
        if let Err(e) = decoder.finish() {
            out.push(Err(e));
        }
        out
    }

    fn answer_of(events: &[Result<StreamEvent>]) -> String {
        events
            .iter()
            .filter_map(|e| e.as_ref().ok().and_then(StreamEvent::answer_text))
            .collect()
    }

    #[test]
    fn chunks_concatenate_regardless_of_fragmentation() {
        let body = format!("{}{}{}", chunk("a"), chunk("b"), chunk("c"));
        let bytes = body.as_bytes();

        for split in 1..=bytes.len() {
            let mut decoder = FrameDecoder::new();
            let mut events = Vec::new();
            for piece in bytes.chunks(split) {
                events.extend(decoder.push(piece));
            }
            decoder.finish().unwrap();
            assert_eq!(answer_of(&events), "abc", "split size {split}");
            assert_eq!(events.len(), 3);
        }
    }

    #[test]
    fn multibyte_text_split_mid_character() {
        let body = chunk("héllo wörld");
        let bytes = body.as_bytes();
        let mut decoder = FrameDecoder::new();
        let mut events = Vec::new();
        for b in bytes {
            events.extend(decoder.push(std::slice::from_ref(b)));
        }
        decoder.finish().unwrap();
        assert_eq!(answer_of(&events), "héllo wörld");
    }

    #[test]
    fn typed_events_are_decoded() {
        let body = [
            frame(json!({ "type": "data-citations", "data": { "citations": [
                { "url": "https://example.com/v", "startTime": 12.5 }
            ] } })),
            frame(json!({ "type": "data-cost", "data": { "dollarCost": { "total": 0.01 } } })),
            frame(json!({ "type": "finish" })),
        ]
        .concat();

        let events = decode_all(&mut FrameDecoder::new(), body.as_bytes());
        let events: Vec<StreamEvent> = events.into_iter().map(|e| e.unwrap()).collect();

        match &events[0] {
            StreamEvent::Citations(data) => {
                assert_eq!(data.citations[0].url, "https://example.com/v");
                assert_eq!(data.citations[0].start_time, Some(12.5));
            }
            other => panic!("expected citations, got {other:?}"),
        }
        match &events[1] {
            StreamEvent::Cost(data) => {
                assert_eq!(data.dollar_cost.as_ref().and_then(|c| c.total), Some(0.01));
            }
            other => panic!("expected cost, got {other:?}"),
        }
        assert_eq!(events[2], StreamEvent::Finish(Value::Null));
    }

    #[test]
    fn unknown_types_pass_through() {
        let body = frame(json!({ "type": "data-progress", "data": { "percent": 40 } }));
        let events = decode_all(&mut FrameDecoder::new(), body.as_bytes());

        let event = events.into_iter().next().unwrap().unwrap();
        assert_eq!(event.event_type(), "data-progress");
        assert_eq!(
            event,
            StreamEvent::Unknown {
                event_type: "data-progress".into(),
                data: json!({ "percent": 40 }),
            }
        );
    }

    #[test]
    fn error_event_is_last() {
        let body = [
            chunk("partial"),
            frame(json!({ "type": "error", "data": { "errorText": "upstream failed" } })),
            chunk("never seen"),
        ]
        .concat();

        let events = decode_all(&mut FrameDecoder::new(), body.as_bytes());

        assert_eq!(events.len(), 2);
        match events.last().unwrap() {
            Ok(StreamEvent::Error(data)) => assert_eq!(data.error_text, "upstream failed"),
            other => panic!("expected error event, got {other:?}"),
        }
    }

    #[test]
    fn clean_close_ends_without_error() {
        let mut decoder = FrameDecoder::new();
        let events = decoder.push(chunk("done").as_bytes());
        assert_eq!(events.len(), 1);
        assert!(decoder.finish().is_ok());
    }

    #[test]
    fn truncation_differs_from_decode_error() {
        let mut decoder = FrameDecoder::new();
        let mut events = decoder.push(b"data: {\"type\":\"answer-chunk\",\"da");
        assert!(events.is_empty());
        let err = decoder.finish().unwrap_err();
        assert!(matches!(err, VizlookError::Truncated { .. }));
        assert!(!err.is_decode());

        let mut decoder = FrameDecoder::new();
        events = decode_all(&mut decoder, b"data: {\"type\": oops}\n\n");
        let err = events.pop().unwrap().unwrap_err();
        assert!(matches!(err, VizlookError::Json(_)));
        assert!(err.is_decode());
    }

    #[test]
    fn decode_error_ends_the_stream() {
        let body = format!("data: not json\n\n{}", chunk("after"));
        let mut decoder = FrameDecoder::new();
        let events = decode_all(&mut decoder, body.as_bytes());

        assert_eq!(events.len(), 1);
        assert!(events[0].as_ref().unwrap_err().is_decode());
        assert!(decoder.is_done());
    }

    #[test]
    fn non_string_answer_chunk_is_malformed() {
        let body = frame(json!({ "type": "answer-chunk", "data": { "text": "x" } }));
        let events = decode_all(&mut FrameDecoder::new(), body.as_bytes());
        assert!(matches!(
            events[0].as_ref().unwrap_err(),
            VizlookError::MalformedFrame(_)
        ));
    }

    #[test]
    fn crlf_comments_and_keepalives_are_tolerated() {
        let body = ": ping\r\n\r\nid: 7\r\ndata: {\"type\":\"answer-chunk\",\"data\":\"hi\"}\r\n\r\n";
        let events = decode_all(&mut FrameDecoder::new(), body.as_bytes());
        assert_eq!(answer_of(&events), "hi");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn lone_carriage_returns_end_lines() {
        let body = "data: {\"type\":\"answer-chunk\",\"data\":\"a\"}\r\r\
                    event: answer-chunk\rdata: b\rc\r\r";
        let events = decode_all(&mut FrameDecoder::new(), body.as_bytes());

        // `c` sits on its own line, a field named `c`, and is not data.
        assert_eq!(answer_of(&events), "ab");
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn crlf_split_across_chunks_counts_once() {
        let mut decoder = FrameDecoder::new();
        let mut events = decoder.push(b"data: {\"type\":\"answer-chunk\",\"data\":\"x\"}\r");
        events.extend(decoder.push(b"\n\r"));
        assert_eq!(events.len(), 1);
        events.extend(decoder.push(b"\ndata: {\"type\":\"answer-chunk\",\"data\":\"y\"}\r\n\r\n"));
        decoder.finish().unwrap();

        assert_eq!(answer_of(&events), "xy");
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn large_frame_in_small_chunks() {
        let text = "word ".repeat(20_000);
        let body = chunk(&text);
        let mut decoder = FrameDecoder::new();
        let mut events = Vec::new();
        for piece in body.as_bytes().chunks(7) {
            events.extend(decoder.push(piece));
        }
        decoder.finish().unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(answer_of(&events), text);
    }

    #[test]
    fn error_event_without_data_is_yielded() {
        let body = format!("{}{}", chunk("a"), frame(json!({ "type": "error" })));
        let events = decode_all(&mut FrameDecoder::new(), body.as_bytes());

        assert_eq!(events.len(), 2);
        match events.last().unwrap() {
            Ok(StreamEvent::Error(data)) => assert!(data.error_text.is_empty()),
            other => panic!("expected error event, got {other:?}"),
        }
    }

    #[test]
    fn error_event_with_null_or_string_data_is_yielded() {
        let body = frame(json!({ "type": "error", "data": null }));
        let events = decode_all(&mut FrameDecoder::new(), body.as_bytes());
        assert!(matches!(events.last(), Some(Ok(StreamEvent::Error(_)))));

        let body = format!(
            "{}{}",
            chunk("a"),
            frame(json!({ "type": "error", "data": "rate limited" }))
        );
        let events = decode_all(&mut FrameDecoder::new(), body.as_bytes());
        assert_eq!(events.len(), 2);
        match events.last().unwrap() {
            Ok(StreamEvent::Error(data)) => assert_eq!(data.error_text, "rate limited"),
            other => panic!("expected error event, got {other:?}"),
        }
    }

    #[test]
    fn named_error_event_keeps_plain_text() {
        let body = format!("{}event: error\ndata: model overloaded\n\n", chunk("a"));
        let events = decode_all(&mut FrameDecoder::new(), body.as_bytes());

        assert_eq!(events.len(), 2);
        match events.last().unwrap() {
            Ok(StreamEvent::Error(data)) => assert_eq!(data.error_text, "model overloaded"),
            other => panic!("expected error event, got {other:?}"),
        }
    }

    #[test]
    fn named_events_carry_raw_text_for_chunks() {
        let body = "event: answer-chunk\ndata: plain {not json}\n\n\
                    event: data-cost\ndata: {\"dollarCost\":{\"total\":1.5}}\n\n";
        let events = decode_all(&mut FrameDecoder::new(), body.as_bytes());

        assert_eq!(answer_of(&events), "plain {not json}");
        assert!(matches!(events[1], Ok(StreamEvent::Cost(_))));
    }

    #[test]
    fn done_sentinel_ends_the_stream() {
        let body = format!("{}data: [DONE]\n\n{}", chunk("x"), chunk("ignored"));
        let mut decoder = FrameDecoder::new();
        let events = decode_all(&mut decoder, body.as_bytes());
        assert_eq!(answer_of(&events), "x");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn event_to_dict_renames_payload_keys_only() {
        let event = StreamEvent::from_api_value(json!({
            "type": "error",
            "data": { "errorText": "boom" },
        }))
        .unwrap();

        let api = event.to_dict(true).unwrap();
        let snake = event.to_dict(false).unwrap();

        assert_eq!(api["type"], json!("error"));
        assert_eq!(snake["type"], json!("error"));
        assert_eq!(api["data"]["errorText"], snake["data"]["error_text"]);
    }

    #[test]
    fn blocking_stream_reads_from_any_reader() {
        let body = format!("{}{}", chunk("a"), chunk("b"));
        let stream = BlockingEventStream::new(std::io::Cursor::new(body.into_bytes()));
        let (answer, error) = stream.collect_answer().unwrap();
        assert_eq!(answer, "ab");
        assert!(error.is_none());
    }

    #[tokio::test]
    async fn async_stream_reports_truncation() {
        let pieces: Vec<reqwest::Result<Bytes>> = vec![
            Ok(Bytes::from(chunk("a"))),
            Ok(Bytes::from_static(b"data: {\"type\":\"answer-")),
        ];
        let mut stream = EventStream::new(futures::stream::iter(pieces));

        assert_eq!(
            stream.next().await.unwrap().unwrap(),
            StreamEvent::AnswerChunk("a".into())
        );
        let err = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(err, VizlookError::Truncated { .. }));
        assert!(stream.next().await.is_none());
    }
}
