//! Example: stream one reply from the chat function to stdout.
//!
//! Requires SUPABASE_URL and SUPABASE_PUBLISHABLE_KEY (or their VITE_ variants).
//!
//! Run with: SUPABASE_URL=https://xyz.supabase.co SUPABASE_PUBLISHABLE_KEY=... \
//!     cargo run --example chat -p storechat-client -- "Do you ship to Canada?"

use std::io::Write;

use storechat_client::{ChatClient, ChatConfig, ChatMessage};
use storechat_types::callbacks;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let prompt = if prompt.trim().is_empty() {
        "What is your return policy?".to_string()
    } else {
        prompt
    };

    let client = ChatClient::from_config(ChatConfig::from_env()?);
    let messages = vec![ChatMessage::user(prompt)];

    let mut failure = None;
    let mut sink = callbacks(
        |delta: &str| {
            print!("{delta}");
            let _ = std::io::stdout().flush();
        },
        || println!(),
        |message: &str| failure = Some(message.to_string()),
    );
    client.stream_chat(&messages, &mut sink).await?;
    drop(sink);

    if let Some(message) = failure {
        eprintln!("\nchat failed: {message}");
    }
    Ok(())
}
