//! Ask a question with the blocking client, buffered and then streamed.
//!
//! Run with:
//!   VIZLOOK_API_KEY=... cargo run --example answer

use vizlook::{AnswerParams, ApiModel, ClientBuilder, StreamEvent};

fn main() -> vizlook::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = ClientBuilder::new().build_blocking()?;

    // -----------------------------------------------------------------------
    // 1. Buffered
    // -----------------------------------------------------------------------
    let response =
        client.answer(AnswerParams::new("how to be productive").include_transcription(true))?;

    println!("response with original API field names:");
    println!("{}", serde_json::to_string_pretty(&response.to_dict(true)?)?);
    println!("response with snake_case field names:");
    println!("{}", serde_json::to_string_pretty(&response.to_dict(false)?)?);
    println!("answer: {}", response.answer);
    println!();

    // -----------------------------------------------------------------------
    // 2. Streamed
    // -----------------------------------------------------------------------
    let events = client
        .stream_answer(AnswerParams::new("how to be productive").include_transcription(true))?;

    let mut answer = String::new();
    for event in events {
        match event? {
            StreamEvent::AnswerChunk(text) => answer.push_str(&text),
            StreamEvent::Citations(data) => {
                for citation in &data.citations {
                    println!("citation: {}", citation.url);
                }
            }
            StreamEvent::Cost(data) => {
                if let Some(total) = data.dollar_cost.and_then(|c| c.total) {
                    println!("cost: ${total:.4}");
                }
            }
            StreamEvent::Error(err) => eprintln!("error: {}", err.error_text),
            _ => {}
        }
    }

    println!("answer: {answer}");
    Ok(())
}
