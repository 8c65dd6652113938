//! Ask a question with the async client on a single-threaded runtime.
//!
//! Run with:
//!   VIZLOOK_API_KEY=... cargo run --example async_answer

use futures::StreamExt;
use vizlook::{AnswerParams, ApiModel, ClientBuilder, StreamEvent};

#[tokio::main(flavor = "current_thread")]
async fn main() -> vizlook::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = ClientBuilder::new().build()?;

    let response = client
        .answer(AnswerParams::new("how to be productive").need_transcription(true))
        .await?;
    println!("{}", serde_json::to_string_pretty(&response.to_dict(false)?)?);
    println!("answer: {}", response.answer);
    println!();

    let mut events = client
        .stream_answer(AnswerParams::new("how to be productive").need_transcription(true))
        .await?;

    let mut answer = String::new();
    while let Some(event) = events.next().await {
        let event = event?;
        match &event {
            StreamEvent::AnswerChunk(text) => answer.push_str(text),
            StreamEvent::Error(err) => eprintln!("error: {}", err.error_text),
            // Everything else, printed with the API's own field names.
            other => println!("{}: {:?}", other.event_type(), other.to_dict(true)?.get("data")),
        }
    }

    println!("answer: {answer}");
    Ok(())
}
