//! Search videos and print the response in both key conventions.
//!
//! Run with:
//!   VIZLOOK_API_KEY=... cargo run --example search
//!
//! A `.env` file in the working directory is also honoured.

use chrono::Utc;
use vizlook::{ApiModel, ClientBuilder, SearchParams};

fn main() -> vizlook::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = ClientBuilder::new().build_blocking()?;

    let response = client.search(
        SearchParams::new("how to be productive")
            .max_results(5)
            .start_published_date("2025-08-19T15:01:36.000Z")
            .end_published_date(Utc::now())
            .include_transcription(true)
            .include_summary(true),
    )?;

    println!("response with original API field names:");
    println!("{}", serde_json::to_string_pretty(&response.to_dict(true)?)?);

    println!("response with snake_case field names:");
    println!("{}", serde_json::to_string_pretty(&response.to_dict(false)?)?);

    println!("results:");
    for video in &response.results {
        println!("  {} {}", video.url, video.title.as_deref().unwrap_or("(untitled)"));
    }

    Ok(())
}
