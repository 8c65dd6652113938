#![allow(dead_code)]

use serde_json::{json, Value};

pub const TEST_KEY: &str = "vl_test_key";

/// Body of a streamed answer: one `data:` frame per event.
pub fn sse_body(events: &[Value]) -> String {
    let mut sse = String::new();
    for event in events {
        sse.push_str("data: ");
        sse.push_str(&event.to_string());
        sse.push_str("\n\n");
    }
    sse
}

pub fn answer_chunk(text: &str) -> Value {
    json!({ "type": "answer-chunk", "data": text })
}

pub fn search_body() -> Value {
    json!({
        "results": [
            {
                "url": "https://www.youtube.com/watch?v=QdBokRd2ahw",
                "title": "How I stay productive",
                "publishedDate": "2025-08-19T15:01:36.000Z",
                "author": "Ali Abdaal",
                "duration": 812.0,
                "summary": "Time blocking and a weekly review.",
                "transcription": [
                    { "startTime": 0.0, "endTime": 4.2, "text": "Hey friends" }
                ],
            },
            {
                "url": "https://www.youtube.com/watch?v=abc",
                "publishedDate": 1_755_615_696_000_i64,
                "channelId": "UC123",
            },
        ],
        "dollarCost": { "total": 0.005, "search": 0.005 },
    })
}

pub fn answer_body() -> Value {
    json!({
        "answer": "Block your calendar and review weekly.",
        "citations": [
            { "url": "https://www.youtube.com/watch?v=QdBokRd2ahw", "startTime": 12.0, "endTime": 30.5 }
        ],
        "dollarCost": { "total": 0.01 },
    })
}

pub fn video_contents_body() -> Value {
    json!({
        "results": [{
            "url": "https://www.youtube.com/watch?v=QdBokRd2ahw",
            "title": "How I stay productive",
            "summary": "Time blocking and a weekly review.",
        }],
        "dollarCost": { "total": 0.002 },
    })
}
