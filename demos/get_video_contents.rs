//! Fetch the summary and transcription of one video.
//!
//! Run with:
//!   VIZLOOK_API_KEY=... cargo run --example get_video_contents

use vizlook::{ApiModel, ClientBuilder, CrawlMode, VideoContentsParams};

fn main() -> vizlook::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = ClientBuilder::new().build_blocking()?;

    let response = client.get_video_contents(
        VideoContentsParams::new("https://www.youtube.com/watch?v=QdBokRd2ahw")
            .crawl_mode(CrawlMode::Fallback)
            .include_transcription(true)
            .include_summary(true),
    )?;

    println!("response with original API field names:");
    println!("{}", serde_json::to_string_pretty(&response.to_dict(true)?)?);
    println!("response with snake_case field names:");
    println!("{}", serde_json::to_string_pretty(&response.to_dict(false)?)?);

    for video in &response.results {
        println!("{}: {}", video.url, video.summary.as_deref().unwrap_or("(no summary)"));
    }

    Ok(())
}
